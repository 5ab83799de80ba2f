//! Wayland front-end: a fullscreen layer-shell surface showing the canvas,
//! driven by a calloop event loop.

mod backend;
mod handlers;
mod state;
mod surface;

pub use backend::WaylandBackend;
