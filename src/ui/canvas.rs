use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::Widget;
use ratatui::widgets::canvas::{Canvas, Context, Line as CanvasLine, Painter, Shape};
use unicode_width::UnicodeWidthStr;

use crate::config::Board;
use crate::render::{DisplayList, DrawCommand, Point, TextSize};
use crate::snake::Cell;

/// Replays a recorded frame onto a terminal area.
///
/// Pixels are half-block characters, so one terminal cell holds two
/// vertically stacked pixels and the square board is laid out twice as wide
/// (in columns) as it is tall (in rows).
#[derive(Debug, Clone, Copy)]
pub struct CanvasView<'a> {
    list: &'a DisplayList,
    board: Board,
}

impl<'a> CanvasView<'a> {
    #[must_use]
    pub fn new(list: &'a DisplayList, board: Board) -> Self {
        Self { list, board }
    }
}

impl Widget for CanvasView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = fit_square(area);
        if area.is_empty() {
            return;
        }

        let side = f64::from(self.board.canvas_size());
        let grid = f64::from(self.board.grid_size());
        let background = self
            .list
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::Background(color) => Some(*color),
                _ => None,
            })
            .unwrap_or(Color::Reset);

        Canvas::default()
            .marker(Marker::HalfBlock)
            .background_color(background)
            .x_bounds([0.0, side])
            .y_bounds([0.0, side])
            .paint(|ctx| paint_shapes(ctx, self.list, side, grid))
            .render(area, buf);

        // Overlay and text go straight into the buffer, after the canvas.
        for command in self.list.commands() {
            match command {
                DrawCommand::Overlay { color, alpha } => blend_area(buf, area, *color, *alpha),
                DrawCommand::Text {
                    text,
                    anchor,
                    size,
                    color,
                } => draw_text(buf, area, side, text, *anchor, *size, *color),
                _ => {}
            }
        }
    }
}

fn paint_shapes(ctx: &mut Context<'_>, list: &DisplayList, side: f64, grid: f64) {
    for command in list.commands() {
        match command {
            DrawCommand::Line { from, to, color } => ctx.draw(&CanvasLine::new(
                from.x,
                side - from.y,
                to.x,
                side - to.y,
                *color,
            )),
            DrawCommand::Cell { cell, fill, border } => ctx.draw(&FilledCell {
                cell: *cell,
                grid,
                side,
                fill: *fill,
                border: *border,
            }),
            _ => {}
        }
    }
}

/// Grid cell filled with one color and outlined with another.
///
/// The outline is skipped when the cell is too small on screen to have an
/// interior.
struct FilledCell {
    cell: Cell,
    grid: f64,
    side: f64,
    fill: Color,
    border: Color,
}

impl Shape for FilledCell {
    fn draw(&self, painter: &mut Painter<'_, '_>) {
        let left = f64::from(self.cell.x) * self.grid;
        let top = f64::from(self.cell.y) * self.grid;
        let right = left + self.grid - 1.0;
        let bottom = top + self.grid - 1.0;

        let Some((x0, y0)) = painter.get_point(left, self.side - top) else {
            return;
        };
        let Some((x1, y1)) = painter.get_point(right, self.side - bottom) else {
            return;
        };

        let outlined = x1.saturating_sub(x0) >= 2 && y1.saturating_sub(y0) >= 2;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let on_edge = x == x0 || x == x1 || y == y0 || y == y1;
                let color = if outlined && on_edge {
                    self.border
                } else {
                    self.fill
                };
                painter.paint(x, y, color);
            }
        }
    }
}

/// Largest area with a 2:1 column-to-row ratio, centered in `area`.
fn fit_square(area: Rect) -> Rect {
    let rows = area.height.min(area.width / 2);
    let cols = rows * 2;

    Rect {
        x: area.x + (area.width - cols) / 2,
        y: area.y + (area.height - rows) / 2,
        width: cols,
        height: rows,
    }
}

fn blend_area(buf: &mut Buffer, area: Rect, color: Color, alpha: f32) {
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.fg = blend(cell.fg, color, alpha);
                cell.bg = blend(cell.bg, color, alpha);
            }
        }
    }
}

/// Composites `over` on top of `base`. Non-RGB colors cannot be mixed, so
/// the more opaque side wins.
fn blend(base: Color, over: Color, alpha: f32) -> Color {
    let alpha = alpha.clamp(0.0, 1.0);
    match (rgb(base), rgb(over)) {
        (Some(base), Some(over)) => {
            let mix = |b: u8, o: u8| {
                (f32::from(b) * (1.0 - alpha) + f32::from(o) * alpha).round() as u8
            };
            Color::Rgb(
                mix(base.0, over.0),
                mix(base.1, over.1),
                mix(base.2, over.2),
            )
        }
        _ if alpha >= 0.5 => over,
        _ => base,
    }
}

fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    match color {
        Color::Rgb(r, g, b) => Some((r, g, b)),
        Color::Black => Some((0, 0, 0)),
        Color::White => Some((255, 255, 255)),
        _ => None,
    }
}

fn draw_text(
    buf: &mut Buffer,
    area: Rect,
    side: f64,
    text: &str,
    anchor: Point,
    size: TextSize,
    color: Color,
) {
    let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
    let row = (anchor.y / side * f64::from(area.height)).round() as u16;
    let center = (anchor.x / side * f64::from(area.width)).round() as u16;

    let y = area.y + row.min(area.height.saturating_sub(1));
    let x = (area.x + center)
        .saturating_sub(width / 2)
        .max(area.x);

    let style = match size {
        TextSize::Title => Style::new().fg(color).add_modifier(Modifier::BOLD),
        TextSize::Body => Style::new().fg(color),
        TextSize::Hint => Style::new().fg(color).add_modifier(Modifier::ITALIC),
    };
    buf.set_stringn(x, y, text, usize::from(area.right() - x), style);
}
