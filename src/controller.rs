use std::time::Instant;

use log::{debug, error, info, warn};

use crate::config::RESTART_DELAY;
use crate::food::CellSource;
use crate::game::{GameState, GameStatus};
use crate::input::{Direction, GameInput};
use crate::schedule::{Schedule, Timer};
use crate::score::ScoreStore;

/// Drives a [`GameState`] from input events and timers.
///
/// The controller never reads the clock itself: every entry point takes the
/// current instant, so an event loop (or a test) decides how time passes.
#[derive(Debug)]
pub struct Controller<S, St> {
    state: GameState<S>,
    schedule: Schedule,
    store: St,
}

impl<S: CellSource, St: ScoreStore> Controller<S, St> {
    /// Wraps an idle state, seeding its high score from `store`.
    ///
    /// A store that cannot be read, or holds something other than a number,
    /// counts as a high score of 0.
    pub fn new(mut state: GameState<S>, mut store: St) -> Self {
        state.high_score = match store.load_high_score() {
            Ok(score) => score,
            Err(e) => {
                warn!("{e}; starting with a high score of 0");
                0
            }
        };
        info!("loaded high score {}", state.high_score);

        Self {
            state,
            schedule: Schedule::new(),
            store,
        }
    }

    /// Begins a new run from [`GameStatus::NotStarted`]. A running or finished
    /// game ignores the request; only [`Controller::restart`] leaves a game over.
    pub fn start(&mut self, now: Instant) {
        if !self.state.start() {
            return;
        }

        self.schedule.cancel(Timer::Start);
        self.schedule
            .schedule(Timer::Tick, now + self.state.tick_interval());
        info!(
            "run started on a {0}x{0} board, food at {1:?}",
            self.state.board().tile_count(),
            self.state.food
        );
    }

    /// Abandons the current run and starts a fresh one after a short cooldown.
    ///
    /// The outstanding tick is cancelled first, so nothing from the previous
    /// run can touch the new state.
    pub fn restart(&mut self, now: Instant) {
        self.state.stop();
        self.schedule.cancel(Timer::Tick);
        self.schedule.schedule(Timer::Start, now + RESTART_DELAY);
        info!("restart requested");
    }

    /// Handles a directional key.
    ///
    /// Before the first run the key starts the game instead of steering. After
    /// a game over it is ignored until a restart.
    pub fn handle_direction(&mut self, direction: Direction, now: Instant) {
        match self.state.status {
            GameStatus::NotStarted => self.start(now),
            GameStatus::Over => {}
            GameStatus::Running => self.state.steer(direction),
        }
    }

    /// Dispatches one input event. Quitting is left to the caller.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) {
        match input {
            GameInput::Direction(direction) => self.handle_direction(direction, now),
            GameInput::Start => self.start(now),
            GameInput::Restart => self.restart(now),
            GameInput::Quit => {}
        }
    }

    /// Fires every timer due at `now`. Returns whether anything fired.
    pub fn run_due(&mut self, now: Instant) -> bool {
        let mut fired = false;
        while let Some(timer) = self.schedule.pop_due(now) {
            fired = true;
            match timer {
                Timer::Tick => self.tick(now),
                Timer::Start => self.start(now),
            }
        }
        fired
    }

    /// When the loop next needs to wake up for a timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.schedule.next_deadline()
    }

    #[must_use]
    pub fn state(&self) -> &GameState<S> {
        &self.state
    }

    /// Direct access for scripted scenarios.
    pub fn state_mut(&mut self) -> &mut GameState<S> {
        &mut self.state
    }

    #[must_use]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    #[must_use]
    pub fn store(&self) -> &St {
        &self.store
    }

    /// Consumes the controller, handing back its store.
    pub fn into_store(self) -> St {
        self.store
    }

    fn tick(&mut self, now: Instant) {
        let report = self.state.tick();
        if !report.moved {
            return;
        }

        if report.ate {
            debug!(
                "ate food, score {} speed {}, next food at {:?}",
                self.state.score, self.state.speed, self.state.food
            );
        }

        if let Some(score) = report.new_high_score {
            info!("new high score {score}");
            if let Err(e) = self.store.save_high_score(score) {
                error!("failed to save high score: {e}");
            }
        }

        if let Some(collision) = report.collision {
            info!(
                "game over ({collision:?}) with score {} after {} ticks",
                self.state.score, self.state.tick_count
            );
            return;
        }

        self.schedule
            .schedule(Timer::Tick, now + self.state.tick_interval());
    }
}
