//! Game variants: piece sets and material tables for the supported games,
//! plus the built-in skirmish demo game.

pub mod chess;
pub mod skirmish;
pub mod xiangqi;
