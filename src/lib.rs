//! Grid snake: a fixed-tick snake simulation with a pluggable render surface
//! and a terminal front end.

pub mod collision;
pub mod config;
pub mod controller;
pub mod food;
pub mod game;
pub mod input;
pub mod render;
pub mod renderer;
pub mod schedule;
pub mod score;
pub mod snake;
pub mod terminal_runtime;
pub mod ui;
