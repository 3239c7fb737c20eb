use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use grid_snake::config::Board;
use grid_snake::controller::Controller;
use grid_snake::food::ScriptedCells;
use grid_snake::game::{GameState, GameStatus};
use grid_snake::input::Direction;
use grid_snake::score::FileStore;
use grid_snake::snake::Cell;

type FileController = Controller<ScriptedCells, FileStore>;

fn open(path: &Path) -> FileController {
    let state = GameState::new(
        Board::default(),
        ScriptedCells::new(vec![Cell::new(0, 0)]),
    );
    Controller::new(state, FileStore::new(path))
}

/// Parks food in front of the head and ticks, `count` times.
fn eat(controller: &mut FileController, count: u32) {
    for _ in 0..count {
        let next = controller.state().snake.head().step(Direction::Right);
        controller.state_mut().food = next;
        let at = controller
            .next_deadline()
            .expect("a tick should be scheduled while running");
        controller.run_due(at);
    }
}

/// Restarts and waits out the cooldown.
fn restart(controller: &mut FileController) {
    let t = Instant::now();
    controller.restart(t);
    assert_eq!(controller.state().status, GameStatus::NotStarted);
    let at = controller
        .next_deadline()
        .expect("start should be scheduled after a restart");
    controller.run_due(at);
    assert_eq!(controller.state().status, GameStatus::Running);
}

#[test]
fn high_score_never_decreases_and_survives_a_new_process() {
    let path = unique_store_path("monotonic");

    let mut controller = open(&path);
    assert_eq!(controller.state().high_score, 0);
    controller.start(Instant::now());
    eat(&mut controller, 3);
    assert_eq!(controller.state().high_score, 3);

    restart(&mut controller);
    assert_eq!(controller.state().score, 0);
    eat(&mut controller, 1);
    assert_eq!(controller.state().high_score, 3);

    restart(&mut controller);
    eat(&mut controller, 4);
    assert_eq!(controller.state().high_score, 4);
    drop(controller);

    let reopened = open(&path);
    assert_eq!(reopened.state().high_score, 4);

    let raw = fs::read_to_string(&path).expect("store file should exist");
    assert!(raw.contains(r#""snakeHighScore": "4""#), "unexpected file: {raw}");
    cleanup(&path);
}

#[test]
fn corrupt_store_starts_from_zero_and_is_rewritten() {
    let path = unique_store_path("corrupt");
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("test directory should be creatable");
    }
    fs::write(&path, r#"{"snakeHighScore": "NaN"}"#).expect("test file write should succeed");

    let mut controller = open(&path);
    assert_eq!(controller.state().high_score, 0);

    controller.start(Instant::now());
    eat(&mut controller, 1);
    drop(controller);

    assert_eq!(open(&path).state().high_score, 1);
    cleanup(&path);
}

fn unique_store_path(label: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after epoch")
        .as_nanos();

    std::env::temp_dir()
        .join(format!("grid-snake-persistence-{label}-{nanos}"))
        .join("storage.json")
}

fn cleanup(path: &Path) {
    let _ = fs::remove_file(path);
    if let Some(parent) = path.parent() {
        let _ = fs::remove_dir(parent);
    }
}
