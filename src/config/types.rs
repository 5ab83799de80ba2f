//! Configuration type definitions.

use super::enums::{ColorSpec, ExportFormat, StatusPosition, StorageMode};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush and canvas defaults applied when the board opens.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial brush color, hex (`"#A51DAB"`) or `[r, g, b]`
    #[serde(default = "default_brush_color")]
    pub brush_color: ColorSpec,

    /// Initial canvas background color
    #[serde(default = "default_background_color")]
    pub background_color: ColorSpec,

    /// Initial brush size in pixels (valid range: 1.0 - max_brush_size)
    #[serde(default = "default_brush_size")]
    pub brush_size: f64,

    /// Largest selectable size; the eraser always uses this (valid range: 1.0 - 200.0)
    #[serde(default = "default_max_brush_size")]
    pub max_brush_size: f64,

    /// Step applied by the size keybindings and scroll wheel
    #[serde(default = "default_size_step")]
    pub size_step: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            brush_color: default_brush_color(),
            background_color: default_background_color(),
            brush_size: default_brush_size(),
            max_brush_size: default_max_brush_size(),
            size_step: default_size_step(),
        }
    }
}

/// Performance tuning options.
///
/// These settings control rendering performance and smoothness. Most users
/// won't need to change these from their defaults.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceConfig {
    /// Number of buffers for buffering (valid range: 2 - 4)
    #[serde(default = "default_buffer_count")]
    pub buffer_count: u32,

    /// Enable vsync frame synchronization to prevent tearing
    #[serde(default = "default_enable_vsync")]
    pub enable_vsync: bool,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            buffer_count: default_buffer_count(),
            enable_vsync: default_enable_vsync(),
        }
    }
}

/// UI display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct UiConfig {
    /// Show the status bar with the active tool, color and brush size
    #[serde(default = "default_show_status")]
    pub show_status_bar: bool,

    /// Status bar screen position (top-left, top-right, bottom-left, bottom-right)
    #[serde(default = "default_status_position")]
    pub status_bar_position: StatusPosition,

    /// Milliseconds a transient message ("Canvas Saved", ...) stays before the tool label returns
    #[serde(default = "default_status_revert_ms")]
    pub status_revert_ms: u64,

    /// Status bar styling options
    #[serde(default)]
    pub status_bar_style: StatusBarStyle,

    /// Help overlay styling options
    #[serde(default)]
    pub help_overlay_style: HelpOverlayStyle,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_status_bar: default_show_status(),
            status_bar_position: default_status_position(),
            status_revert_ms: default_status_revert_ms(),
            status_bar_style: StatusBarStyle::default(),
            help_overlay_style: HelpOverlayStyle::default(),
        }
    }
}

/// RGBA color with components in the 0.0-1.0 range.
pub type Rgba = [f64; 4];

const OVERLAY_BACKDROP: Rgba = [0.0, 0.0, 0.0, 0.85];
const OVERLAY_TEXT: Rgba = [1.0, 1.0, 1.0, 1.0];

/// Look of the status bar. Missing keys keep their default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StatusBarStyle {
    /// Label font size; the text is drawn at three quarters of it
    pub font_size: f64,
    /// Distance from the screen edge and around the label
    pub padding: f64,
    pub bg_color: Rgba,
    pub text_color: Rgba,
    /// Radius of the current color dot
    pub dot_radius: f64,
}

impl Default for StatusBarStyle {
    fn default() -> Self {
        Self {
            font_size: 21.0,
            padding: 15.0,
            bg_color: OVERLAY_BACKDROP,
            text_color: OVERLAY_TEXT,
            dot_radius: 6.0,
        }
    }
}

/// Look of the F10 keybinding overlay. Missing keys keep their default.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct HelpOverlayStyle {
    pub font_size: f64,
    /// Vertical distance between help rows
    pub line_height: f64,
    pub padding: f64,
    pub bg_color: Rgba,
    /// Frame color; defaults to the brush purple
    pub border_color: Rgba,
    pub border_width: f64,
    pub text_color: Rgba,
}

impl Default for HelpOverlayStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            line_height: 22.0,
            padding: 20.0,
            bg_color: OVERLAY_BACKDROP,
            border_color: [0.65, 0.11, 0.67, 0.9],
            border_width: 2.0,
            text_color: OVERLAY_TEXT,
        }
    }
}

/// Location of the saved drawing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorageConfig {
    /// `auto` (data dir), `config` (next to config.toml) or `custom`
    #[serde(default = "default_storage_mode")]
    pub storage: StorageMode,

    /// Directory used when `storage = "custom"`; `~/` is expanded
    #[serde(default)]
    pub custom_directory: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage: default_storage_mode(),
            custom_directory: None,
        }
    }
}

/// Image export settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Directory exported images are written to; `~/` is expanded
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// Filename without extension; chrono format specifiers are allowed
    #[serde(default = "default_filename_template")]
    pub filename_template: String,

    /// `jpeg` or `png`
    #[serde(default = "default_export_format")]
    pub format: ExportFormat,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
            format: default_export_format(),
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_brush_color() -> ColorSpec {
    ColorSpec::Hex("#A51DAB".to_string())
}

fn default_background_color() -> ColorSpec {
    ColorSpec::Hex("#FFFFFF".to_string())
}

fn default_brush_size() -> f64 {
    10.0
}

fn default_max_brush_size() -> f64 {
    50.0
}

fn default_size_step() -> f64 {
    1.0
}

fn default_buffer_count() -> u32 {
    3
}

fn default_enable_vsync() -> bool {
    true
}

fn default_show_status() -> bool {
    true
}

fn default_status_position() -> StatusPosition {
    StatusPosition::BottomLeft
}

fn default_status_revert_ms() -> u64 {
    1500
}

fn default_storage_mode() -> StorageMode {
    StorageMode::Auto
}

fn default_export_directory() -> String {
    "~/Pictures/Paintboard".to_string()
}

fn default_filename_template() -> String {
    "paint-example".to_string()
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Jpeg
}

fn default_jpeg_quality() -> u8 {
    100
}
