//! Freehand drawing board with stroke recording and replay.
//!
//! The library holds everything except process startup: the recorded
//! [`draw::Drawing`] and its replay onto a Cairo [`draw::Canvas`], the
//! [`input::InputState`] controller, keyed [`storage`] slots, image
//! [`export`], configuration and the Wayland front-end.

pub mod backend;
pub mod config;
pub mod draw;
pub mod export;
pub mod input;
pub mod status;
pub mod storage;
pub mod ui;
pub mod util;

pub use config::Config;
