//! Configuration enum types.

use crate::draw::Color;
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Status bar position on screen.
///
/// Controls where the status bar appears relative to screen edges.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum StatusPosition {
    /// Top-left corner
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
}

/// Configured color - either a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Hex color
/// brush_color = "#A51DAB"
///
/// # Custom RGB color (0-255 per component)
/// background_color = [255, 255, 255]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Hex color such as `#A51DAB` (the `#` is optional)
    Hex(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Converts the configured value to a [`Color`], falling back when the hex is invalid.
    pub fn to_color_or(&self, fallback: Color) -> Color {
        match self {
            ColorSpec::Hex(raw) => Color::from_hex(raw).unwrap_or_else(|err| {
                warn!("{err}; using {fallback}");
                fallback
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}

impl From<Color> for ColorSpec {
    fn from(color: Color) -> Self {
        ColorSpec::Hex(color.to_hex())
    }
}

/// Where the saved drawing lives on disk.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// `$XDG_DATA_HOME/paintboard`
    Auto,
    /// Next to `config.toml`
    Config,
    /// `storage.custom_directory`
    Custom,
}

/// Encoding used when exporting the canvas.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// Lossy JPEG with configurable quality
    Jpeg,
    /// Lossless PNG
    Png,
}

impl ExportFormat {
    /// File extension written after the filename template.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Png => "png",
        }
    }
}
