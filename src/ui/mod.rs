pub mod canvas;
pub mod hud;
