use rand::Rng;

use crate::snake::{Cell, Snake};

/// Source of candidate food cells.
pub trait CellSource {
    /// Returns a cell in `[0, tile_count) × [0, tile_count)`.
    fn sample(&mut self, tile_count: u16) -> Cell;
}

/// Uniform cells drawn from a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngCells<R> {
    rng: R,
}

impl<R: Rng> RngCells<R> {
    #[must_use]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CellSource for RngCells<R> {
    fn sample(&mut self, tile_count: u16) -> Cell {
        let side = i32::from(tile_count);
        Cell {
            x: self.rng.gen_range(0..side),
            y: self.rng.gen_range(0..side),
        }
    }
}

/// Replays a fixed list of cells in a loop, for reproducible sequences.
///
/// The list must contain at least one cell that will be free whenever food is
/// placed, otherwise placement never returns.
#[derive(Debug, Clone)]
pub struct ScriptedCells {
    cells: Vec<Cell>,
    next: usize,
}

impl ScriptedCells {
    /// # Panics
    ///
    /// Panics when `cells` is empty.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        assert!(!cells.is_empty(), "scripted cell source needs at least one cell");
        Self { cells, next: 0 }
    }
}

impl CellSource for ScriptedCells {
    fn sample(&mut self, _tile_count: u16) -> Cell {
        let cell = self.cells[self.next];
        self.next = (self.next + 1) % self.cells.len();
        cell
    }
}

/// Samples cells until one is not covered by a positioned snake segment.
///
/// Returns `None` without sampling when the snake covers every cell.
/// Otherwise retries are unbounded; with a uniform source this terminates
/// with probability 1.
#[must_use]
pub fn place<S: CellSource + ?Sized>(
    source: &mut S,
    snake: &Snake,
    tile_count: u16,
) -> Option<Cell> {
    debug_assert!(tile_count > 0);

    let total = usize::from(tile_count) * usize::from(tile_count);
    let covered = snake
        .cells()
        .filter(|cell| cell.is_within_bounds(tile_count))
        .count();
    if covered >= total {
        return None;
    }

    loop {
        let candidate = source.sample(tile_count);
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
