use crate::session::timer::TimerHandle;

/// The mutable face of a session: pause and game-over flags, the control
/// mode, the pending turn handle, and the square a human has picked up.
///
/// Sessions begin paused with the bot controlling both sides, so nothing
/// moves until the host calls start.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionState<Sq> {
    /// True while the session is not running.
    pub is_paused: bool,
    /// True from the moment a game ends until the restart wipes the board.
    pub game_over: bool,
    /// True when the bot plays both sides; false leaves one side to a human.
    pub ai_controls_both_sides: bool,
    /// The single outstanding scheduled-turn handle, if any.
    pub pending_turn: Option<TimerHandle>,
    /// The square a human player currently has selected.
    pub selected_square: Option<Sq>,
}

impl<Sq> SessionState<Sq> {
    pub fn new() -> Self {
        Self {
            is_paused: true,
            game_over: false,
            ai_controls_both_sides: true,
            pending_turn: None,
            selected_square: None,
        }
    }

    /// Forgets per-game state while keeping the pause flag and control mode.
    pub fn clear_game(&mut self) {
        self.game_over = false;
        self.selected_square = None;
    }
}

impl<Sq> Default for SessionState<Sq> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_paused_with_both_sides_automated() {
        let state: SessionState<u8> = SessionState::new();
        assert!(state.is_paused);
        assert!(state.ai_controls_both_sides);
        assert!(!state.game_over);
        assert_eq!(None, state.pending_turn);
        assert_eq!(None, state.selected_square);
    }

    #[test]
    fn test_clear_game_preserves_pause_and_mode() {
        let mut state: SessionState<u8> = SessionState::new();
        state.is_paused = false;
        state.ai_controls_both_sides = false;
        state.game_over = true;
        state.selected_square = Some(12);
        state.clear_game();
        assert!(!state.game_over);
        assert_eq!(None, state.selected_square);
        assert!(!state.is_paused, "clearing a game must not pause the session");
        assert!(!state.ai_controls_both_sides, "clearing a game must not change the mode");
    }
}
