//! Backend-independent frame drawing.
//!
//! [`draw`] walks a [`Scene`] and issues flat-color primitives to a
//! [`Surface`]. It reads state only, so it can be called any number of times
//! per tick. [`DisplayList`] records the primitives; the terminal front end
//! replays one of those, and tests inspect them.

use ratatui::style::Color;

use crate::config::{Board, OVERLAY_ALPHA, Theme};
use crate::game::{GameState, GameStatus};
use crate::snake::{Cell, Snake};

/// Point in canvas pixels, origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Relative weight of overlay text.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TextSize {
    Title,
    Body,
    Hint,
}

/// Something frames can be drawn on.
pub trait Surface {
    /// Paints the whole canvas.
    fn fill_background(&mut self, color: Color);

    /// Strokes a thin line between two canvas points.
    fn stroke_line(&mut self, from: Point, to: Point, color: Color);

    /// Fills one grid cell and strokes its border.
    fn fill_cell(&mut self, cell: Cell, fill: Color, border: Color);

    /// Covers the whole canvas with a translucent color.
    fn fill_overlay(&mut self, color: Color, alpha: f32);

    /// Draws one line of text horizontally centered on `anchor`.
    fn draw_text(&mut self, text: &str, anchor: Point, size: TextSize, color: Color);
}

/// Everything a frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub board: Board,
    pub snake: &'a Snake,
    pub food: Cell,
    pub status: GameStatus,
    pub score: u32,
}

impl<'a> Scene<'a> {
    #[must_use]
    pub fn of<S>(state: &'a GameState<S>) -> Self {
        Self {
            board: state.board(),
            snake: &state.snake,
            food: state.food,
            status: state.status,
            score: state.score,
        }
    }
}

pub const GAME_OVER_TITLE: &str = "Game Over!";
pub const RESTART_HINT: &str = "Press R to play again";

/// Draws one frame: background, grid, food, snake, then the game-over overlay
/// when the run has ended.
pub fn draw<T: Surface + ?Sized>(surface: &mut T, scene: &Scene<'_>, theme: &Theme) {
    let board = scene.board;
    let canvas = f64::from(board.canvas_size());
    let grid = f64::from(board.grid_size());

    surface.fill_background(theme.background);

    for i in 0..=board.tile_count() {
        let offset = f64::from(i) * grid;
        surface.stroke_line(
            Point::new(offset, 0.0),
            Point::new(offset, canvas),
            theme.grid_line,
        );
    }
    for i in 0..=board.tile_count() {
        let offset = f64::from(i) * grid;
        surface.stroke_line(
            Point::new(0.0, offset),
            Point::new(canvas, offset),
            theme.grid_line,
        );
    }

    surface.fill_cell(scene.food, theme.food, theme.cell_border);

    // Placeholder segments from the last meal have no cell to draw yet.
    for (index, segment) in scene.snake.segments().enumerate() {
        let Some(cell) = segment else {
            continue;
        };
        let fill = if index == 0 {
            theme.snake_head
        } else {
            theme.snake_body
        };
        surface.fill_cell(cell, fill, theme.cell_border);
    }

    if scene.status == GameStatus::Over {
        draw_game_over(surface, scene.score, canvas, theme);
    }
}

fn draw_game_over<T: Surface + ?Sized>(surface: &mut T, score: u32, canvas: f64, theme: &Theme) {
    surface.fill_overlay(theme.overlay, OVERLAY_ALPHA);

    let center = canvas / 2.0;
    surface.draw_text(
        GAME_OVER_TITLE,
        Point::new(center, center - 30.0),
        TextSize::Title,
        theme.overlay_text,
    );
    surface.draw_text(
        &format!("Score: {score}"),
        Point::new(center, center + 10.0),
        TextSize::Body,
        theme.overlay_text,
    );
    surface.draw_text(
        RESTART_HINT,
        Point::new(center, center + 40.0),
        TextSize::Hint,
        theme.overlay_text,
    );
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Line {
        from: Point,
        to: Point,
        color: Color,
    },
    Cell {
        cell: Cell,
        fill: Color,
        border: Color,
    },
    Overlay {
        color: Color,
        alpha: f32,
    },
    Text {
        text: String,
        anchor: Point,
        size: TextSize,
        color: Color,
    },
}

/// Surface that records every call in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DrawCommand>,
}

impl DisplayList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a full frame of `scene`.
    #[must_use]
    pub fn record(scene: &Scene<'_>, theme: &Theme) -> Self {
        let mut list = Self::new();
        draw(&mut list, scene, theme);
        list
    }

    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

impl Surface for DisplayList {
    fn fill_background(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn fill_cell(&mut self, cell: Cell, fill: Color, border: Color) {
        self.commands.push(DrawCommand::Cell { cell, fill, border });
    }

    fn fill_overlay(&mut self, color: Color, alpha: f32) {
        self.commands.push(DrawCommand::Overlay { color, alpha });
    }

    fn draw_text(&mut self, text: &str, anchor: Point, size: TextSize, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_owned(),
            anchor,
            size,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{Board, THEME};
    use crate::game::{GameState, GameStatus};
    use crate::input::Direction;
    use crate::snake::{Cell, Snake};

    use super::{DisplayList, DrawCommand, GAME_OVER_TITLE, Scene};

    fn state_with_snake(snake: Snake) -> GameState {
        let mut state = GameState::new_with_seed(Board::default(), 5);
        state.snake = snake;
        state.food = Cell::new(0, 0);
        state
    }

    fn cells(list: &DisplayList) -> Vec<Cell> {
        list.commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Cell { cell, .. } => Some(*cell),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn frame_is_drawn_back_to_front() {
        let state = state_with_snake(Snake::from_segments(
            vec![Cell::new(3, 3), Cell::new(2, 3)],
            Direction::Right,
        ));

        let list = DisplayList::record(&Scene::of(&state), &THEME);
        let commands = list.commands();

        assert_eq!(commands[0], DrawCommand::Background(THEME.background));
        let lines = commands
            .iter()
            .filter(|command| matches!(command, DrawCommand::Line { .. }))
            .count();
        assert_eq!(lines, 2 * 21);
        assert!(commands[1..=lines]
            .iter()
            .all(|command| matches!(command, DrawCommand::Line { .. })));
        assert_eq!(
            cells(&list),
            vec![Cell::new(0, 0), Cell::new(3, 3), Cell::new(2, 3)]
        );
        assert_eq!(commands.len(), 1 + lines + 3);
    }

    #[test]
    fn head_is_colored_apart_from_body() {
        let state = state_with_snake(Snake::from_segments(
            vec![Cell::new(3, 3), Cell::new(2, 3), Cell::new(1, 3)],
            Direction::Right,
        ));

        let list = DisplayList::record(&Scene::of(&state), &THEME);
        let fills: Vec<_> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Cell { fill, .. } => Some(*fill),
                _ => None,
            })
            .collect();

        assert_eq!(
            fills,
            vec![THEME.food, THEME.snake_head, THEME.snake_body, THEME.snake_body]
        );
        assert_ne!(THEME.snake_head, THEME.snake_body);
    }

    #[test]
    fn placeholder_segment_is_not_drawn() {
        let mut snake = Snake::new(Cell::new(4, 4), Direction::Right);
        snake.grow();
        let state = state_with_snake(snake);

        let list = DisplayList::record(&Scene::of(&state), &THEME);

        assert_eq!(cells(&list), vec![Cell::new(0, 0), Cell::new(4, 4)]);
    }

    #[test]
    fn overlay_only_when_over() {
        let mut state = state_with_snake(Snake::new(Cell::new(4, 4), Direction::Right));
        state.score = 7;

        for status in [GameStatus::NotStarted, GameStatus::Running] {
            state.status = status;
            let list = DisplayList::record(&Scene::of(&state), &THEME);
            assert!(!list
                .commands()
                .iter()
                .any(|command| matches!(
                    command,
                    DrawCommand::Overlay { .. } | DrawCommand::Text { .. }
                )));
        }

        state.status = GameStatus::Over;
        let list = DisplayList::record(&Scene::of(&state), &THEME);
        let texts: Vec<&str> = list
            .commands()
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();

        assert!(matches!(
            list.commands()[list.commands().len() - 4],
            DrawCommand::Overlay { .. }
        ));
        assert_eq!(texts[0], GAME_OVER_TITLE);
        assert_eq!(texts[1], "Score: 7");
        assert_eq!(texts.len(), 3);
    }

    #[test]
    fn drawing_twice_gives_the_same_frame() {
        let state = state_with_snake(Snake::new(Cell::new(9, 9), Direction::Up));
        let scene = Scene::of(&state);

        assert_eq!(
            DisplayList::record(&scene, &THEME),
            DisplayList::record(&scene, &THEME)
        );
    }
}
