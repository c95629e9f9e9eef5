//! Timer-driven bot sessions.
//!
//! A [`Session`] owns a rules engine, an evaluator, and a [`Timer`], and
//! steps a game forward one scheduled turn at a time. Hosts pump it with
//! [`Session::poll`] and drive the lifecycle with start, pause, reset, and
//! mode controls.

pub mod config;
pub mod controller;
pub mod state;
pub mod timer;

pub use config::SessionConfig;
pub use controller::{SearchStats, Session, SessionError, SessionEvent};
pub use state::SessionState;
pub use timer::{ManualTimer, MonotonicTimer, Timer, TimerHandle};
