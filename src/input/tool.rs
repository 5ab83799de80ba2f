//! Painting tool selection.

use crate::status::StatusKind;

/// The tool applied by pointer drags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    /// Paints with the user's brush color
    Brush,
    /// Paints with the background color at maximum size
    Eraser,
}

impl Tool {
    /// Status line entry naming this tool.
    pub fn status(self) -> StatusKind {
        match self {
            Tool::Brush => StatusKind::Brush,
            Tool::Eraser => StatusKind::Eraser,
        }
    }
}
