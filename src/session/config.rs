use std::time::Duration;

/// Knobs for a bot session: how deep to search and how the turn loop paces
/// itself.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Plies searched per move selection.
    pub search_depth: u8,
    /// Delay between an applied move and the next scheduled turn.
    pub move_delay: Duration,
    /// Delay before the first scheduled turn after the session starts. Kept
    /// short so the board reacts promptly to the start control.
    pub startup_delay: Duration,
    /// How long a finished game stays up before the automatic restart.
    pub restart_delay: Duration,
    /// Delay before the first scheduled turn of a freshly restarted game.
    pub post_restart_delay: Duration,
    /// Seed for the move-shuffle rng; `None` draws one from entropy.
    pub rng_seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            search_depth: 3,
            move_delay: Duration::from_millis(800),
            startup_delay: Duration::from_millis(100),
            restart_delay: Duration::from_secs(10),
            post_restart_delay: Duration::from_secs(1),
            rng_seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pacing() {
        let config = SessionConfig::default();
        assert_eq!(3, config.search_depth);
        assert_eq!(Duration::from_millis(800), config.move_delay);
        assert!(config.startup_delay < config.move_delay);
        assert!(config.post_restart_delay < config.restart_delay);
        assert_eq!(None, config.rng_seed);
    }
}
