use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use grid_snake::config::{
    APP_DIR_NAME, Board, DEFAULT_CANVAS_SIZE, DEFAULT_GRID_SIZE, FRAME_BUDGET, THEME,
};
use grid_snake::controller::Controller;
use grid_snake::food::RngCells;
use grid_snake::game::GameState;
use grid_snake::input::{self, GameInput};
use grid_snake::score::{FileStore, default_store_path};
use grid_snake::terminal_runtime::GameScreen;
use log::{LevelFilter, info};
use rand::rngs::StdRng;
use simplelog::{Config, WriteLogger};

const LOG_FILE_NAME: &str = "grid-snake.log";

type GameController = Controller<RngCells<StdRng>, FileStore>;

/// Grid snake in the terminal.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Canvas side length in logical pixels.
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    canvas_size: u16,

    /// Tile side length in logical pixels; must divide the canvas size.
    #[arg(long, default_value_t = DEFAULT_GRID_SIZE)]
    grid_size: u16,

    /// Seed food placement for a reproducible run.
    #[arg(long)]
    seed: Option<u64>,

    /// Key-value file holding the high score.
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// File to write the log to.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Minimum level written to the log file.
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let board = match Board::new(cli.canvas_size, cli.grid_size) {
        Ok(board) => board,
        Err(error) => {
            eprintln!("Invalid board: {error}");
            return Err(io::Error::new(io::ErrorKind::InvalidInput, error));
        }
    };

    let log_path = cli.log_file.clone().unwrap_or_else(default_log_path);
    if let Err(error) = init_logging(&log_path, cli.log_level) {
        eprintln!("Logging disabled, cannot open {}: {error}", log_path.display());
    }

    let store = FileStore::new(cli.store.clone().unwrap_or_else(default_store_path));
    info!(
        "starting: {}x{} tiles, seed {:?}, store {}",
        board.tile_count(),
        board.tile_count(),
        cli.seed,
        store.path().display()
    );

    let state = match cli.seed {
        Some(seed) => GameState::new_with_seed(board, seed),
        None => GameState::from_entropy(board),
    };
    let mut controller = Controller::new(state, store);

    let mut screen = GameScreen::enter()?;
    let result = run(&mut screen, &mut controller);
    drop(screen);

    info!("exiting with high score {}", controller.state().high_score);
    result
}

fn run(screen: &mut GameScreen, controller: &mut GameController) -> io::Result<()> {
    loop {
        screen.draw(controller.state(), &THEME)?;

        let now = Instant::now();
        let timeout = controller
            .next_deadline()
            .map_or(FRAME_BUDGET, |at| {
                at.saturating_duration_since(now).min(FRAME_BUDGET)
            });

        if let Some(game_input) = input::poll_input(timeout)? {
            if game_input == GameInput::Quit {
                return Ok(());
            }
            controller.handle_input(game_input, Instant::now());
        }

        controller.run_due(Instant::now());
    }
}

fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(LOG_FILE_NAME);
    base
}

fn init_logging(path: &Path, level: LevelFilter) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let file = File::create(path)?;
    WriteLogger::init(level, Config::default(), file)
        .map_err(|error| io::Error::new(io::ErrorKind::Other, error))
}
