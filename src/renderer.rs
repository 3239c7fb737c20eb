use ratatui::Frame;

use crate::config::Theme;
use crate::game::GameState;
use crate::render::{DisplayList, Scene};
use crate::ui::canvas::CanvasView;
use crate::ui::hud::{HudInfo, render_hud};

/// Renders the full terminal frame from immutable state.
pub fn render<S>(frame: &mut Frame<'_>, state: &GameState<S>, theme: &Theme) {
    let area = frame.area();
    let play_area = render_hud(
        frame,
        area,
        HudInfo {
            score: state.score,
            high_score: state.high_score,
            status: state.status,
        },
        theme,
    );

    let list = DisplayList::record(&Scene::of(state), theme);
    frame.render_widget(CanvasView::new(&list, state.board()), play_area);
}
