use std::time::Duration;

use ratatui::style::Color;
use thiserror::Error;

use crate::snake::Cell;

/// Logical board geometry: a square canvas split into square tiles.
///
/// The canvas is measured in logical pixels. Only the tile count matters to
/// the simulation; pixel sizes are kept so the render surface can lay out
/// grid lines and text in canvas coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Board {
    canvas_size: u16,
    grid_size: u16,
}

impl Board {
    /// Validates and creates a board from canvas and grid cell sizes in pixels.
    pub fn new(canvas_size: u16, grid_size: u16) -> Result<Self, ConfigError> {
        if grid_size == 0 {
            return Err(ConfigError::ZeroGridSize);
        }
        if canvas_size % grid_size != 0 {
            return Err(ConfigError::UnevenCanvas {
                canvas_size,
                grid_size,
            });
        }

        let tile_count = canvas_size / grid_size;
        let min_tile_count = u16::try_from(ORIGIN.x.max(ORIGIN.y) + 1).unwrap_or(u16::MAX);
        if tile_count < min_tile_count {
            return Err(ConfigError::BoardTooSmall {
                tile_count,
                min_tile_count,
            });
        }

        Ok(Self {
            canvas_size,
            grid_size,
        })
    }

    /// Number of tiles along each side.
    #[must_use]
    pub fn tile_count(self) -> u16 {
        self.canvas_size / self.grid_size
    }

    /// Canvas side length in logical pixels.
    #[must_use]
    pub fn canvas_size(self) -> u16 {
        self.canvas_size
    }

    /// Tile side length in logical pixels.
    #[must_use]
    pub fn grid_size(self) -> u16 {
        self.grid_size
    }
}

impl Default for Board {
    fn default() -> Self {
        Self {
            canvas_size: DEFAULT_CANVAS_SIZE,
            grid_size: DEFAULT_GRID_SIZE,
        }
    }
}

/// Invalid board configuration.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be greater than zero")]
    ZeroGridSize,
    #[error("canvas size {canvas_size} is not a multiple of grid size {grid_size}")]
    UnevenCanvas { canvas_size: u16, grid_size: u16 },
    #[error("board has {tile_count} tiles per side, at least {min_tile_count} are needed")]
    BoardTooSmall { tile_count: u16, min_tile_count: u16 },
}

/// Flat colors used by the render surface.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub grid_line: Color,
    pub snake_head: Color,
    pub snake_body: Color,
    pub food: Color,
    /// Border stroked around every filled cell.
    pub cell_border: Color,
    pub overlay: Color,
    pub overlay_text: Color,
    pub hud_label: Color,
    pub hud_value: Color,
}

pub const THEME: Theme = Theme {
    background: Color::Rgb(0x22, 0x22, 0x22),
    grid_line: Color::Rgb(0x33, 0x33, 0x33),
    snake_head: Color::Rgb(0x38, 0x8E, 0x3C),
    snake_body: Color::Rgb(0x4C, 0xAF, 0x50),
    food: Color::Rgb(0xF4, 0x43, 0x36),
    cell_border: Color::Rgb(0x22, 0x22, 0x22),
    overlay: Color::Black,
    overlay_text: Color::White,
    hud_label: Color::DarkGray,
    hud_value: Color::White,
};

/// Opacity of the game-over overlay.
pub const OVERLAY_ALPHA: f32 = 0.75;

/// Default canvas side length in logical pixels.
pub const DEFAULT_CANVAS_SIZE: u16 = 400;

/// Default tile side length in logical pixels.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Cell the snake head starts on.
pub const ORIGIN: Cell = Cell { x: 10, y: 10 };

/// Ticks per second at the start of a run.
pub const BASE_SPEED: f64 = 7.0;

/// Speed added every `POINTS_PER_SPEED_STEP` points.
pub const SPEED_STEP: f64 = 0.5;

/// Speed above which no further ramp is applied.
pub const MAX_SPEED: f64 = 15.0;

/// Score needed per speed increase.
pub const POINTS_PER_SPEED_STEP: u32 = 5;

/// Cooldown between a restart request and the new run starting.
pub const RESTART_DELAY: Duration = Duration::from_millis(100);

/// Upper bound on how long the event loop waits for input before redrawing.
pub const FRAME_BUDGET: Duration = Duration::from_millis(16);

/// Key of the persisted high score slot.
pub const HIGH_SCORE_KEY: &str = "snakeHighScore";

/// Directory under the platform data dir holding the store and log file.
pub const APP_DIR_NAME: &str = "grid-snake";

#[cfg(test)]
mod tests {
    use super::{Board, ConfigError};

    #[test]
    fn default_board_has_twenty_tiles() {
        let board = Board::default();
        assert_eq!(board.tile_count(), 20);
    }

    #[test]
    fn canvas_must_divide_evenly() {
        assert_eq!(
            Board::new(410, 20),
            Err(ConfigError::UnevenCanvas {
                canvas_size: 410,
                grid_size: 20,
            })
        );
        assert_eq!(Board::new(400, 0), Err(ConfigError::ZeroGridSize));
    }

    #[test]
    fn board_must_contain_origin() {
        assert!(matches!(
            Board::new(200, 20),
            Err(ConfigError::BoardTooSmall {
                tile_count: 10,
                min_tile_count: 11,
            })
        ));
        assert_eq!(Board::new(220, 20).map(Board::tile_count), Ok(11));
    }
}
