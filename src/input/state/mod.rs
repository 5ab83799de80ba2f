mod actions;
mod core;
mod mouse;
mod persistence;

pub use core::{BoardOptions, InputState};
