use std::io;
use std::panic;
use std::sync::Once;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::Theme;
use crate::game::GameState;
use crate::renderer;

type GameTerminal = Terminal<CrosstermBackend<io::Stdout>>;

static PANIC_HOOK: Once = Once::new();

/// Raw-mode alternate screen the game is drawn on.
///
/// Dropping the session hands the terminal back in its previous mode, and a
/// panic while the session is live does the same before the message prints.
pub struct GameScreen {
    terminal: GameTerminal,
}

impl GameScreen {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(error);
        }

        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => {
                debug!("entered game screen");
                Ok(Self { terminal })
            }
            Err(error) => {
                restore_terminal();
                Err(error)
            }
        }
    }

    /// Draws one frame of `state`.
    pub fn draw<S>(&mut self, state: &GameState<S>, theme: &Theme) -> io::Result<()> {
        self.terminal
            .draw(|frame| renderer::render(frame, state, theme))
            .map(drop)
    }
}

impl Drop for GameScreen {
    fn drop(&mut self) {
        restore_terminal();
        debug!("left game screen");
    }
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |panic_info| {
            restore_terminal();
            default_hook(panic_info);
        }));
    });
}

fn restore_terminal() {
    let _ = disable_raw_mode();
    if let Err(error) = execute!(io::stdout(), Show, LeaveAlternateScreen) {
        warn!("failed to restore terminal: {error}");
    }
}
