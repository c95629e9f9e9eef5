//! Shared utilities for CLI commands.

use std::time::Duration;

use boardbot::alpha_beta_searcher::RulesEngine;
use boardbot::evaluate::MaterialEvaluator;
use boardbot::games::skirmish::{SkirmishGame, SkirmishMove, SkirmishValues};
use boardbot::session::{MonotonicTimer, Session, SessionConfig};

/// Both commands run the built-in skirmish game.
pub(crate) type SkirmishSession =
    Session<SkirmishGame, MaterialEvaluator<SkirmishValues>, MonotonicTimer>;

/// How often the commands pump an idle session.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_millis(10);

pub(crate) fn create_config(depth: u8, delay_ms: u64, seed: Option<u64>) -> SessionConfig {
    SessionConfig {
        search_depth: depth,
        move_delay: Duration::from_millis(delay_ms),
        rng_seed: seed,
        ..SessionConfig::default()
    }
}

pub(crate) fn new_skirmish_session(config: SessionConfig) -> SkirmishSession {
    Session::new(
        SkirmishGame::new(),
        MaterialEvaluator::new(SkirmishValues),
        MonotonicTimer::new(),
        config,
    )
}

pub(crate) fn print_board_and_stats(session: &SkirmishSession, last_move: Option<&SkirmishMove>) {
    let stats = session.search_stats();
    let last_move_str = match last_move {
        Some(game_move) => game_move.to_string(),
        None => "-".to_string(),
    };
    let score = match stats.last_score {
        Some(score) => score.to_string(),
        None => "-".to_string(),
    };
    println!("{}", session.rules());
    println!();
    println!("Last move: {}", last_move_str);
    println!("* Turn: {}", session.rules().turn());
    println!("* Halfmove: {}", session.rules().move_count());
    println!("* Score: {}", score);
    println!(
        "* Positions searched: {} (depth {})",
        stats.positions_searched, stats.depth
    );
    println!();
}
