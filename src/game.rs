use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, Collision};
use crate::config::{BASE_SPEED, Board, MAX_SPEED, ORIGIN, POINTS_PER_SPEED_STEP, SPEED_STEP};
use crate::food::{self, CellSource, RngCells};
use crate::input::Direction;
use crate::snake::{Cell, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Over,
}

/// What one call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct TickReport {
    /// The snake moved this tick.
    pub moved: bool,
    /// Food was eaten this tick.
    pub ate: bool,
    /// Set when the eaten food pushed the score past the previous best.
    pub new_high_score: Option<u32>,
    /// Set when the move ended the run.
    pub collision: Option<Collision>,
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState<S = RngCells<StdRng>> {
    pub snake: Snake,
    pub food: Cell,
    pub score: u32,
    pub high_score: u32,
    /// Ticks per second.
    pub speed: f64,
    pub tick_count: u64,
    pub status: GameStatus,
    pub last_collision: Option<Collision>,
    board: Board,
    cells: S,
}

impl GameState<RngCells<StdRng>> {
    /// Creates a state whose food placement is seeded from the OS.
    #[must_use]
    pub fn from_entropy(board: Board) -> Self {
        Self::new(board, RngCells::new(StdRng::from_entropy()))
    }

    /// Creates a deterministic state for tests and reproducible runs.
    #[must_use]
    pub fn new_with_seed(board: Board, seed: u64) -> Self {
        Self::new(board, RngCells::new(StdRng::seed_from_u64(seed)))
    }
}

impl<S> GameState<S> {
    /// Delay until the next tick at the current speed.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.speed)
    }

    #[must_use]
    pub fn board(&self) -> Board {
        self.board
    }
}

impl<S: CellSource> GameState<S> {
    /// Creates an idle state: one-cell snake at the origin, food placed,
    /// status [`GameStatus::NotStarted`].
    #[must_use]
    pub fn new(board: Board, cells: S) -> Self {
        let mut state = Self {
            snake: Snake::new(ORIGIN, Direction::Right),
            food: ORIGIN,
            score: 0,
            high_score: 0,
            speed: BASE_SPEED,
            tick_count: 0,
            status: GameStatus::NotStarted,
            last_collision: None,
            board,
            cells,
        };
        state.place_food();
        state
    }

    /// Resets the run and enters [`GameStatus::Running`].
    ///
    /// Only a [`GameStatus::NotStarted`] game can start; a finished run must
    /// be stopped first. Returns `false` without touching anything otherwise.
    pub fn start(&mut self) -> bool {
        if self.status != GameStatus::NotStarted {
            return false;
        }

        self.snake = Snake::new(ORIGIN, Direction::Right);
        self.place_food();
        self.score = 0;
        self.speed = BASE_SPEED;
        self.tick_count = 0;
        self.last_collision = None;
        self.status = GameStatus::Running;
        true
    }

    /// Drops back to [`GameStatus::NotStarted`], keeping the board as drawn.
    pub fn stop(&mut self) {
        self.status = GameStatus::NotStarted;
    }

    /// Buffers a heading change. Has no effect unless running.
    pub fn steer(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            self.snake.buffer_direction(direction);
        }
    }

    /// Advances simulation by one gameplay tick.
    ///
    /// Moves the snake (committing the pending heading), resolves food, then
    /// checks for collisions.
    pub fn tick(&mut self) -> TickReport {
        let mut report = TickReport::default();
        if self.status != GameStatus::Running {
            return report;
        }

        self.tick_count += 1;
        self.snake.move_forward();
        report.moved = true;

        if self.snake.head() == self.food {
            report.ate = true;
            report.new_high_score = self.eat();
        }

        if let Some(collision) = collision::check(&self.snake, self.board.tile_count()) {
            self.status = GameStatus::Over;
            self.last_collision = Some(collision);
            report.collision = Some(collision);
        }

        report
    }

    /// Moves the food to a free cell. A fully covered board leaves it put.
    fn place_food(&mut self) {
        let tile_count = self.board.tile_count();
        if let Some(cell) = food::place(&mut self.cells, &self.snake, tile_count) {
            self.food = cell;
        }
    }

    fn eat(&mut self) -> Option<u32> {
        self.snake.grow();
        self.place_food();
        self.score += 1;

        if self.speed < MAX_SPEED && self.score % POINTS_PER_SPEED_STEP == 0 {
            self.speed += SPEED_STEP;
        }

        if self.score > self.high_score {
            self.high_score = self.score;
            return Some(self.high_score);
        }
        None
    }
}
