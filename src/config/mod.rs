//! Configuration file support for paintboard.
//!
//! Settings are loaded from `~/.config/paintboard/config.toml`. Missing files and
//! missing keys fall back to defaults; out-of-range values are clamped with a warning.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::{ColorSpec, ExportFormat, StatusPosition, StorageMode};
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{
    DrawingConfig, ExportConfig, HelpOverlayStyle, PerformanceConfig, StatusBarStyle,
    StorageConfig, UiConfig,
};

use crate::draw::{Color, PURPLE, WHITE};
use anyhow::{Context, Result};
use log::{debug, info, warn};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// brush_color = "#A51DAB"
/// background_color = "#FFFFFF"
/// brush_size = 10.0
///
/// [ui]
/// status_revert_ms = 1500
///
/// [export]
/// format = "jpeg"
/// jpeg_quality = 100
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush and background defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Performance tuning options
    #[serde(default)]
    pub performance: PerformanceConfig,

    /// UI display preferences
    #[serde(default)]
    pub ui: UiConfig,

    /// Saved drawing location
    #[serde(default)]
    pub storage: StorageConfig,

    /// Image export settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `max_brush_size`: 1.0 - 200.0
    /// - `brush_size`: 1.0 - `max_brush_size`
    /// - `size_step`: 0.5 - 20.0
    /// - `buffer_count`: 2 - 4
    /// - `status_revert_ms`: 100 - 60000
    /// - `jpeg_quality`: 1 - 100
    pub fn validate_and_clamp(&mut self) {
        if !(1.0..=200.0).contains(&self.drawing.max_brush_size) {
            warn!(
                "Invalid max_brush_size {:.1}, clamping to 1.0-200.0 range",
                self.drawing.max_brush_size
            );
            self.drawing.max_brush_size = self.drawing.max_brush_size.clamp(1.0, 200.0);
        }

        let max = self.drawing.max_brush_size;
        if !(1.0..=max).contains(&self.drawing.brush_size) {
            warn!(
                "Invalid brush_size {:.1}, clamping to 1.0-{max:.1} range",
                self.drawing.brush_size
            );
            self.drawing.brush_size = self.drawing.brush_size.clamp(1.0, max);
        }

        if !(0.5..=20.0).contains(&self.drawing.size_step) {
            warn!(
                "Invalid size_step {:.1}, clamping to 0.5-20.0 range",
                self.drawing.size_step
            );
            self.drawing.size_step = self.drawing.size_step.clamp(0.5, 20.0);
        }

        if !(2..=4).contains(&self.performance.buffer_count) {
            warn!(
                "Invalid buffer_count {}, clamping to 2-4 range",
                self.performance.buffer_count
            );
            self.performance.buffer_count = self.performance.buffer_count.clamp(2, 4);
        }

        if !(100..=60_000).contains(&self.ui.status_revert_ms) {
            warn!(
                "Invalid status_revert_ms {}, clamping to 100-60000 range",
                self.ui.status_revert_ms
            );
            self.ui.status_revert_ms = self.ui.status_revert_ms.clamp(100, 60_000);
        }

        if !(1..=100).contains(&self.export.jpeg_quality) {
            warn!(
                "Invalid jpeg_quality {}, clamping to 1-100 range",
                self.export.jpeg_quality
            );
            self.export.jpeg_quality = self.export.jpeg_quality.clamp(1, 100);
        }

        if self.export.filename_template.trim().is_empty() {
            warn!("Empty export filename_template, falling back to 'paint-example'");
            self.export.filename_template = "paint-example".to_string();
        } else if !crate::export::is_valid_template(&self.export.filename_template) {
            warn!(
                "Invalid export filename_template '{}', falling back to 'paint-example'",
                self.export.filename_template
            );
            self.export.filename_template = "paint-example".to_string();
        }
    }

    /// Brush color with invalid values replaced by the default purple.
    pub fn brush_color(&self) -> Color {
        self.drawing.brush_color.to_color_or(PURPLE)
    }

    /// Background color with invalid values replaced by white.
    pub fn background_color(&self) -> Color {
        self.drawing.background_color.to_color_or(WHITE)
    }

    /// Directory holding `config.toml`.
    pub fn config_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Could not find config directory")?
            .join("paintboard"))
    }

    /// Returns the path to the configuration file.
    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads and validates configuration from `config_path`.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or is not valid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing `config.toml`.
    pub fn json_schema() -> Schema {
        schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::BLACK;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.brush_color(), PURPLE);
        assert_eq!(config.background_color(), WHITE);
        assert_eq!(config.drawing.brush_size, 10.0);
        assert_eq!(config.ui.status_revert_ms, 1500);
        assert_eq!(config.export.filename_template, "paint-example");
        assert_eq!(config.export.format, ExportFormat::Jpeg);
        assert_eq!(config.export.jpeg_quality, 100);
        assert_eq!(config.storage.storage, StorageMode::Auto);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r##"
            [drawing]
            background_color = "#000000"

            [keybindings]
            save_canvas = ["Ctrl+Shift+S"]
            "##,
        )
        .unwrap();
        assert_eq!(config.background_color(), BLACK);
        assert_eq!(config.drawing.max_brush_size, 50.0);
        assert_eq!(config.keybindings.save_canvas, vec!["Ctrl+Shift+S"]);
        assert_eq!(config.keybindings.exit, vec!["Escape", "Ctrl+Q"]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.max_brush_size = 20.0;
        config.drawing.brush_size = 99.0;
        config.performance.buffer_count = 9;
        config.ui.status_revert_ms = 1;
        config.export.jpeg_quality = 0;
        config.export.filename_template = "  ".to_string();
        config.validate_and_clamp();

        assert_eq!(config.drawing.brush_size, 20.0);
        assert_eq!(config.performance.buffer_count, 4);
        assert_eq!(config.ui.status_revert_ms, 100);
        assert_eq!(config.export.jpeg_quality, 1);
        assert_eq!(config.export.filename_template, "paint-example");
    }

    #[test]
    fn partial_overlay_styles_keep_other_defaults() {
        let config: Config = toml::from_str(
            r##"
            [ui.status_bar_style]
            font_size = 30.0

            [ui.help_overlay_style]
            border_width = 4.0
            "##,
        )
        .unwrap();
        assert_eq!(config.ui.status_bar_style.font_size, 30.0);
        assert_eq!(config.ui.status_bar_style.dot_radius, 6.0);
        assert_eq!(config.ui.help_overlay_style.border_width, 4.0);
        assert_eq!(config.ui.help_overlay_style.line_height, 22.0);
        assert_eq!(
            config.ui.help_overlay_style.text_color,
            config.ui.status_bar_style.text_color
        );
    }

    #[test]
    fn unrenderable_filename_template_falls_back() {
        let mut config = Config::default();
        config.export.filename_template = "paint-%Q".to_string();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "paint-example");

        config.export.filename_template = "paint_%Y%m%d".to_string();
        config.validate_and_clamp();
        assert_eq!(config.export.filename_template, "paint_%Y%m%d");
    }

    #[test]
    fn load_from_missing_path_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.drawing.brush_size, 10.0);
    }

    #[test]
    fn load_from_reports_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\nbrush_size = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("drawing"));
        assert!(schema.contains("keybindings"));
        assert!(schema.contains("jpeg_quality"));
    }
}
