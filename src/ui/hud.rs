use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::config::Theme;
use crate::game::GameStatus;

/// Values shown in the HUD rows.
#[derive(Debug, Clone, Copy)]
pub struct HudInfo {
    pub score: u32,
    pub high_score: u32,
    pub status: GameStatus,
}

/// Renders the score row and the controls row, returning the play area above.
#[must_use]
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, info: HudInfo, theme: &Theme) -> Rect {
    let [play_area, score_area, help_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new(score_line(info, theme)).alignment(Alignment::Center),
        score_area,
    );
    frame.render_widget(
        Paragraph::new(help_line(info.status))
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.hud_label)),
        help_area,
    );

    play_area
}

fn score_line(info: HudInfo, theme: &Theme) -> Line<'static> {
    let label = Style::new().fg(theme.hud_label);
    let value = Style::new()
        .fg(theme.hud_value)
        .add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("Score: ", label),
        Span::styled(info.score.to_string(), value),
        Span::raw("    "),
        Span::styled("High Score: ", label),
        Span::styled(info.high_score.to_string(), value),
    ])
}

fn help_line(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotStarted => "[Enter]/arrows Start   [R] Restart   [Q] Quit",
        GameStatus::Running => "arrows/WASD Move   [R] Restart   [Q] Quit",
        GameStatus::Over => "[R] Restart   [Q] Quit",
    }
}

#[cfg(test)]
mod tests {
    use crate::config::THEME;
    use crate::game::GameStatus;

    use super::{HudInfo, help_line, score_line};

    #[test]
    fn score_line_shows_both_scores() {
        let line = score_line(
            HudInfo {
                score: 3,
                high_score: 11,
                status: GameStatus::Running,
            },
            &THEME,
        );

        assert_eq!(line.to_string(), "Score: 3    High Score: 11");
    }

    #[test]
    fn help_hides_start_once_over() {
        assert!(help_line(GameStatus::NotStarted).contains("Start"));
        assert!(!help_line(GameStatus::Over).contains("Start"));
    }
}
