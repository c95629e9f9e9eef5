//! The turn controller: a timer-driven loop that runs move selection for
//! whichever side the bot controls.
//!
//! The session is single-threaded and cooperative. Nothing here spawns a
//! thread or sleeps: lifecycle calls arm and cancel deadlines on the
//! [`Timer`], and the host pumps [`Session::poll`] from its own loop. State
//! can change between arming a turn and polling it due, so every fired turn
//! re-checks the session state before doing any work; a turn that fires
//! after a pause, a mode switch, or a game ending quietly does nothing.
//!
//! Scheduling is single-flight: arming a turn first cancels any turn
//! already pending, so at most one selection is ever outstanding.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

use crate::alpha_beta_searcher::{
    select_best_move, CoordinateMove, Evaluator, RulesEngine, SearchContext, SearchError,
};
use crate::evaluate::{game_ending, GameEnding};
use crate::session::config::SessionConfig;
use crate::session::state::SessionState;
use crate::session::timer::{Timer, TimerHandle};
use crate::side::Side;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("search error: {error}")]
    Search {
        #[from]
        error: SearchError,
    },
    #[error("rules engine rejected the selected move")]
    MoveRejected,
}

/// What a poll or an input call did, for hosts that render or log progress.
#[derive(Clone, PartialEq, Debug)]
pub enum SessionEvent<M> {
    /// A move was applied. `ending` is set when the move finished the game.
    MovePlayed {
        game_move: M,
        ending: Option<GameEnding>,
    },
    /// A fired turn found the game already decided; the restart countdown
    /// is running.
    GameEnded(GameEnding),
    /// The restart countdown expired and the board is back to the initial
    /// layout.
    Restarted,
}

/// A snapshot of the most recent selection's search counters.
#[derive(Clone, Debug)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub cutoffs: usize,
    pub depth: u8,
    pub last_score: Option<i16>,
    pub last_search_duration: Option<Duration>,
}

/// A self-contained bot session: the rules engine, the evaluator, the turn
/// timer, and the scheduling state machine gluing them together.
pub struct Session<R, E, T>
where
    R: RulesEngine,
    E: Evaluator<R>,
    T: Timer,
{
    rules: R,
    evaluator: E,
    timer: T,
    config: SessionConfig,
    context: SearchContext,
    state: SessionState<R::Square>,
    pending_restart: Option<TimerHandle>,
    bot_side: Side,
    outcome: Option<GameEnding>,
    rng: StdRng,
}

impl<R, E, T> Session<R, E, T>
where
    R: RulesEngine,
    E: Evaluator<R>,
    T: Timer,
{
    pub fn new(rules: R, evaluator: E, timer: T, config: SessionConfig) -> Self {
        let seed = config.rng_seed.unwrap_or_else(|| fastrand::u64(..));
        Self {
            context: SearchContext::new(config.search_depth),
            rng: StdRng::seed_from_u64(seed),
            rules,
            evaluator,
            timer,
            config,
            state: SessionState::new(),
            pending_restart: None,
            bot_side: Side::Dark,
            outcome: None,
        }
    }

    /// Hands `side` to the bot for human-vs-bot play. Has no effect while
    /// the bot controls both sides.
    pub fn with_bot_side(mut self, side: Side) -> Self {
        self.bot_side = side;
        self
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn state(&self) -> &SessionState<R::Square> {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn bot_side(&self) -> Side {
        self.bot_side
    }

    pub fn is_paused(&self) -> bool {
        self.state.is_paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// How the last finished game ended, until the restart wipes it.
    pub fn outcome(&self) -> Option<GameEnding> {
        self.outcome
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// A snapshot of the latest selection's counters.
    pub fn search_stats(&self) -> SearchStats {
        SearchStats {
            positions_searched: self.context.searched_position_count(),
            cutoffs: self.context.cutoff_count(),
            depth: self.context.search_depth(),
            last_score: self.context.last_score(),
            last_search_duration: self.context.last_search_duration(),
        }
    }

    /// Resumes a paused session. The first turn fires after the startup
    /// delay.
    pub fn start(&mut self) {
        if !self.state.is_paused {
            return;
        }
        self.state.is_paused = false;
        debug!("session started");
        if !self.state.game_over {
            self.schedule_next_move(self.config.startup_delay);
        }
    }

    /// Pauses the session. The pending turn (if any) is cancelled; a
    /// restart countdown keeps running, and its expiry re-checks the pause.
    pub fn pause(&mut self) {
        if self.state.is_paused {
            return;
        }
        self.state.is_paused = true;
        debug!("session paused");
        if let Some(handle) = self.state.pending_turn.take() {
            self.timer.cancel(handle);
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.state.is_paused {
            self.start();
        } else {
            self.pause();
        }
    }

    /// Switches between bot-vs-bot and human-vs-bot without touching the
    /// pause flag. Handing the side currently on the move to the bot while
    /// the session is running schedules its turn right away.
    pub fn set_mode(&mut self, ai_controls_both_sides: bool) {
        let was_both = self.state.ai_controls_both_sides;
        self.state.ai_controls_both_sides = ai_controls_both_sides;
        if ai_controls_both_sides
            && !was_both
            && !self.state.is_paused
            && !self.state.game_over
            && self.rules.turn() != self.bot_side
        {
            self.schedule_next_move(self.config.startup_delay);
        }
    }

    /// Starts the game over from any state: pending timers are cancelled
    /// and the board returns to the initial layout. Scheduling resumes only
    /// if the session was already running.
    pub fn reset(&mut self) {
        self.cancel_pending_timers();
        self.rules.reset();
        self.state.clear_game();
        self.outcome = None;
        info!("session reset");
        if !self.state.is_paused {
            self.schedule_next_move(self.config.startup_delay);
        }
    }

    /// Tears the session down: every outstanding timer is cancelled and the
    /// session is marked over so nothing fires afterwards.
    pub fn shutdown(&mut self) {
        self.cancel_pending_timers();
        self.state.game_over = true;
        debug!("session shut down");
    }

    /// Pumps the session: fires whichever armed deadline has come due.
    /// Never blocks; call it from the host loop.
    pub fn poll(&mut self) -> Result<Option<SessionEvent<R::Move>>, SessionError> {
        if let Some(handle) = self.pending_restart {
            if self.timer.is_due(handle) {
                self.timer.cancel(handle);
                self.pending_restart = None;
                return Ok(Some(self.restart_game()));
            }
        }
        if let Some(handle) = self.state.pending_turn {
            if self.timer.is_due(handle) {
                self.timer.cancel(handle);
                self.state.pending_turn = None;
                return self.run_scheduled_turn();
            }
        }
        Ok(None)
    }

    /// Arms the next bot turn `delay` from now. Any turn already pending is
    /// cancelled first, and nothing is armed while the session is paused.
    fn schedule_next_move(&mut self, delay: Duration) {
        if let Some(handle) = self.state.pending_turn.take() {
            self.timer.cancel(handle);
        }
        if !self.state.is_paused {
            let handle = self.timer.set(delay);
            debug!("next turn scheduled in {:?}", delay);
            self.state.pending_turn = Some(handle);
        }
    }

    fn cancel_pending_timers(&mut self) {
        if let Some(handle) = self.state.pending_turn.take() {
            self.timer.cancel(handle);
        }
        if let Some(handle) = self.pending_restart.take() {
            self.timer.cancel(handle);
        }
    }

    fn bot_owns_turn(&self) -> bool {
        self.state.ai_controls_both_sides || self.rules.turn() == self.bot_side
    }

    /// A scheduled turn fired. The session may have moved on since the turn
    /// was armed, so everything is re-checked before any work happens.
    fn run_scheduled_turn(&mut self) -> Result<Option<SessionEvent<R::Move>>, SessionError> {
        if self.state.game_over || self.state.is_paused {
            debug!("scheduled turn fired on a paused or finished session; ignoring");
            return Ok(None);
        }
        if !self.bot_owns_turn() {
            debug!("scheduled turn fired on the human's turn; ignoring");
            return Ok(None);
        }
        if self.rules.is_game_over() {
            let ending = self.enter_game_over();
            return Ok(Some(SessionEvent::GameEnded(ending)));
        }

        let selected = select_best_move(
            &mut self.context,
            &mut self.rules,
            &self.evaluator,
            &mut self.rng,
        )?;
        let game_move = match selected {
            Some(game_move) => game_move,
            None => {
                // No legal moves without the engine reporting the game
                // over: treat it as an ending all the same.
                let ending = self.enter_game_over();
                return Ok(Some(SessionEvent::GameEnded(ending)));
            }
        };

        if self.rules.apply_move(&game_move).is_err() {
            return Err(SessionError::MoveRejected);
        }
        info!("bot played {:?}", game_move);
        Ok(Some(self.after_move_applied(game_move)))
    }

    /// Shared post-move transition: detect an ending right away, otherwise
    /// line up the next turn.
    fn after_move_applied(&mut self, game_move: R::Move) -> SessionEvent<R::Move> {
        let ending = game_ending(&mut self.rules);
        match ending {
            Some(ending) => {
                self.begin_game_over(ending);
            }
            None => {
                self.schedule_next_move(self.config.move_delay);
            }
        }
        SessionEvent::MovePlayed { game_move, ending }
    }

    fn enter_game_over(&mut self) -> GameEnding {
        let ending = game_ending(&mut self.rules).unwrap_or(GameEnding::Stalemate);
        self.begin_game_over(ending)
    }

    /// Parks the session in its game-over state: the outcome goes on record
    /// and the restart countdown starts. The countdown outlives pauses;
    /// only `reset` and `shutdown` cancel it.
    fn begin_game_over(&mut self, ending: GameEnding) -> GameEnding {
        self.state.game_over = true;
        self.state.selected_square = None;
        self.outcome = Some(ending);
        info!("game over: {}", ending);
        if let Some(handle) = self.state.pending_turn.take() {
            self.timer.cancel(handle);
        }
        if let Some(handle) = self.pending_restart.take() {
            self.timer.cancel(handle);
        }
        self.pending_restart = Some(self.timer.set(self.config.restart_delay));
        ending
    }

    /// The restart countdown expired: wipe the finished game and, if the
    /// session is still running and the bot owns the opening turn, line up
    /// the first move of the fresh game.
    fn restart_game(&mut self) -> SessionEvent<R::Move> {
        self.rules.reset();
        self.state.clear_game();
        self.outcome = None;
        info!("board reset for a new game");
        if self.bot_owns_turn() {
            self.schedule_next_move(self.config.post_restart_delay);
        }
        SessionEvent::Restarted
    }
}

impl<R, E, T> Session<R, E, T>
where
    R: RulesEngine,
    R::Move: CoordinateMove<Square = R::Square>,
    E: Evaluator<R>,
    T: Timer,
{
    /// Feeds one square of human input: the first tap on an own piece picks
    /// it up, a second tap tries to move it there. Input is ignored when
    /// the game is over, while the bot controls both sides, and on the
    /// bot's turn. A tap with no matching legal move reselects (own piece)
    /// or deselects (anything else).
    pub fn handle_square_input(
        &mut self,
        square: R::Square,
    ) -> Result<Option<SessionEvent<R::Move>>, SessionError> {
        if self.state.game_over || self.state.ai_controls_both_sides {
            return Ok(None);
        }
        if self.rules.turn() == self.bot_side {
            return Ok(None);
        }

        let selected = match self.state.selected_square {
            Some(selected) => selected,
            None => {
                if self.owns_square(square) {
                    self.state.selected_square = Some(square);
                }
                return Ok(None);
            }
        };

        if selected == square {
            self.state.selected_square = None;
            return Ok(None);
        }

        let matching = self
            .rules
            .moves_from(selected)
            .as_ref()
            .iter()
            .find(|candidate| candidate.to_square() == square)
            .cloned();
        let game_move = match matching {
            Some(game_move) => game_move,
            None => {
                // No legal move to that square: treat the tap as a fresh
                // selection attempt.
                self.state.selected_square = if self.owns_square(square) {
                    Some(square)
                } else {
                    None
                };
                return Ok(None);
            }
        };

        if self.rules.apply_move(&game_move).is_err() {
            return Err(SessionError::MoveRejected);
        }
        self.state.selected_square = None;
        info!("player moved {:?}", game_move);
        Ok(Some(self.after_move_applied(game_move)))
    }

    fn owns_square(&self, square: R::Square) -> bool {
        self.rules
            .piece_at(square)
            .map_or(false, |piece| piece.side == self.rules.turn())
    }
}
