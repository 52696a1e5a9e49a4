pub mod app;
pub mod editor;
pub mod input;
pub mod render;
pub mod theme;
pub mod wrap;

pub use app::{RunOptions, run};
