//! Input handling and tool state.
//!
//! This module translates backend keyboard and mouse events into painting
//! actions. It owns the brush settings, the recorded drawing and the canvas
//! the strokes are painted on.

pub mod events;
pub mod modifiers;
pub mod settings;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use settings::BrushSettings;
pub use state::{BoardOptions, InputState};
pub use tool::Tool;

pub use modifiers::Modifiers;
