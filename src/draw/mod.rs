//! Stroke model and Cairo rendering.
//!
//! - [`Color`]: RGBA color with hex conversion and predefined constants
//! - [`StrokePoint`]: one recorded pointer sample
//! - [`Drawing`]: append-only stroke log with pen lifts
//! - [`Canvas`]: owned raster target for incremental painting and replay
//! - [`DirtyTracker`]: damage accumulation for the on-screen buffer

pub mod canvas;
pub mod color;
pub mod dirty;
pub mod drawing;
pub mod point;
pub mod render;

pub use canvas::Canvas;
pub use color::{Color, ColorParseError};
pub use dirty::DirtyTracker;
pub use drawing::Drawing;
pub use point::StrokePoint;
pub use render::{render_background, render_segment, replay};

pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, PURPLE, RED, WHITE, YELLOW};
