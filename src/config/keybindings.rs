//! Keybinding configuration types and parsing.
//!
//! Every action the board supports is reachable from the keyboard; users
//! override the defaults in the `[keybindings]` table of `config.toml`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// All possible actions that can be bound to keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Exit,

    // Tools
    SwitchToBrush,
    SwitchToEraser,
    IncreaseBrushSize,
    DecreaseBrushSize,

    // Canvas and storage
    ClearCanvas,
    SaveCanvas,
    LoadCanvas,
    ClearStorage,
    ExportImage,

    // UI toggles
    ToggleHelp,
    ToggleStatusBar,

    // Brush colors
    SetColorRed,
    SetColorGreen,
    SetColorBlue,
    SetColorYellow,
    SetColorOrange,
    SetColorPink,
    SetColorWhite,
    SetColorBlack,
    SetColorPurple,

    // Background colors
    SetBackgroundWhite,
    SetBackgroundBlack,
    SetBackgroundYellow,
    SetBackgroundBlue,
}

/// A single keybinding: a key name with optional modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parse a keybinding string like "Ctrl+Shift+S" or "Escape".
    ///
    /// Modifiers can appear in any order and spaces around `+` are ignored.
    /// A trailing `++` binds the `+` key itself.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty keybinding string".to_string());
        }

        let normalized = s.replace(" + ", "+").replace("+ ", "+").replace(" +", "+");

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key_parts = Vec::new();

        for part in normalized.split('+') {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                _ => key_parts.push(part),
            }
        }

        if key_parts.is_empty() {
            return Err(format!("No key specified in: {s}"));
        }

        // "Ctrl++" splits into ["Ctrl", "", ""]: the empty parts are the '+' key
        let key = match key_parts.join("+") {
            joined if joined.is_empty() || joined == "+" => "+".to_string(),
            joined => joined,
        };

        Ok(Self {
            key,
            ctrl,
            shift,
            alt,
        })
    }

    /// Check if this keybinding matches the current input state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Configuration for all keybindings.
///
/// Each action can have multiple keybindings:
/// ```toml
/// [keybindings]
/// exit = ["Escape", "Ctrl+Q"]
/// save_canvas = ["Ctrl+S"]
/// switch_to_eraser = ["E"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct KeybindingsConfig {
    #[serde(default = "default_exit")]
    pub exit: Vec<String>,

    #[serde(default = "default_switch_to_brush")]
    pub switch_to_brush: Vec<String>,

    #[serde(default = "default_switch_to_eraser")]
    pub switch_to_eraser: Vec<String>,

    #[serde(default = "default_increase_brush_size")]
    pub increase_brush_size: Vec<String>,

    #[serde(default = "default_decrease_brush_size")]
    pub decrease_brush_size: Vec<String>,

    #[serde(default = "default_clear_canvas")]
    pub clear_canvas: Vec<String>,

    #[serde(default = "default_save_canvas")]
    pub save_canvas: Vec<String>,

    #[serde(default = "default_load_canvas")]
    pub load_canvas: Vec<String>,

    #[serde(default = "default_clear_storage")]
    pub clear_storage: Vec<String>,

    #[serde(default = "default_export_image")]
    pub export_image: Vec<String>,

    #[serde(default = "default_toggle_help")]
    pub toggle_help: Vec<String>,

    #[serde(default = "default_toggle_status_bar")]
    pub toggle_status_bar: Vec<String>,

    #[serde(default = "default_set_color_red")]
    pub set_color_red: Vec<String>,

    #[serde(default = "default_set_color_green")]
    pub set_color_green: Vec<String>,

    #[serde(default = "default_set_color_blue")]
    pub set_color_blue: Vec<String>,

    #[serde(default = "default_set_color_yellow")]
    pub set_color_yellow: Vec<String>,

    #[serde(default = "default_set_color_orange")]
    pub set_color_orange: Vec<String>,

    #[serde(default = "default_set_color_pink")]
    pub set_color_pink: Vec<String>,

    #[serde(default = "default_set_color_white")]
    pub set_color_white: Vec<String>,

    #[serde(default = "default_set_color_black")]
    pub set_color_black: Vec<String>,

    #[serde(default = "default_set_color_purple")]
    pub set_color_purple: Vec<String>,

    #[serde(default = "default_set_background_white")]
    pub set_background_white: Vec<String>,

    #[serde(default = "default_set_background_black")]
    pub set_background_black: Vec<String>,

    #[serde(default = "default_set_background_yellow")]
    pub set_background_yellow: Vec<String>,

    #[serde(default = "default_set_background_blue")]
    pub set_background_blue: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            exit: default_exit(),
            switch_to_brush: default_switch_to_brush(),
            switch_to_eraser: default_switch_to_eraser(),
            increase_brush_size: default_increase_brush_size(),
            decrease_brush_size: default_decrease_brush_size(),
            clear_canvas: default_clear_canvas(),
            save_canvas: default_save_canvas(),
            load_canvas: default_load_canvas(),
            clear_storage: default_clear_storage(),
            export_image: default_export_image(),
            toggle_help: default_toggle_help(),
            toggle_status_bar: default_toggle_status_bar(),
            set_color_red: default_set_color_red(),
            set_color_green: default_set_color_green(),
            set_color_blue: default_set_color_blue(),
            set_color_yellow: default_set_color_yellow(),
            set_color_orange: default_set_color_orange(),
            set_color_pink: default_set_color_pink(),
            set_color_white: default_set_color_white(),
            set_color_black: default_set_color_black(),
            set_color_purple: default_set_color_purple(),
            set_background_white: default_set_background_white(),
            set_background_black: default_set_background_black(),
            set_background_yellow: default_set_background_yellow(),
            set_background_blue: default_set_background_blue(),
        }
    }
}

impl KeybindingsConfig {
    fn bindings(&self) -> [(&[String], Action); 25] {
        [
            (self.exit.as_slice(), Action::Exit),
            (self.switch_to_brush.as_slice(), Action::SwitchToBrush),
            (self.switch_to_eraser.as_slice(), Action::SwitchToEraser),
            (self.increase_brush_size.as_slice(), Action::IncreaseBrushSize),
            (self.decrease_brush_size.as_slice(), Action::DecreaseBrushSize),
            (self.clear_canvas.as_slice(), Action::ClearCanvas),
            (self.save_canvas.as_slice(), Action::SaveCanvas),
            (self.load_canvas.as_slice(), Action::LoadCanvas),
            (self.clear_storage.as_slice(), Action::ClearStorage),
            (self.export_image.as_slice(), Action::ExportImage),
            (self.toggle_help.as_slice(), Action::ToggleHelp),
            (self.toggle_status_bar.as_slice(), Action::ToggleStatusBar),
            (self.set_color_red.as_slice(), Action::SetColorRed),
            (self.set_color_green.as_slice(), Action::SetColorGreen),
            (self.set_color_blue.as_slice(), Action::SetColorBlue),
            (self.set_color_yellow.as_slice(), Action::SetColorYellow),
            (self.set_color_orange.as_slice(), Action::SetColorOrange),
            (self.set_color_pink.as_slice(), Action::SetColorPink),
            (self.set_color_white.as_slice(), Action::SetColorWhite),
            (self.set_color_black.as_slice(), Action::SetColorBlack),
            (self.set_color_purple.as_slice(), Action::SetColorPurple),
            (self.set_background_white.as_slice(), Action::SetBackgroundWhite),
            (self.set_background_black.as_slice(), Action::SetBackgroundBlack),
            (self.set_background_yellow.as_slice(), Action::SetBackgroundYellow),
            (self.set_background_blue.as_slice(), Action::SetBackgroundBlue),
        ]
    }

    /// Build a lookup map from keybindings to actions for efficient matching.
    /// Returns an error if any keybinding string is invalid or if duplicates are detected.
    pub fn build_action_map(&self) -> Result<HashMap<KeyBinding, Action>, String> {
        let mut map = HashMap::new();

        for (binding_strs, action) in self.bindings() {
            for binding_str in binding_strs {
                let binding = KeyBinding::parse(binding_str)?;
                if let Some(existing_action) = map.insert(binding, action) {
                    return Err(format!(
                        "Duplicate keybinding '{binding_str}' assigned to both {existing_action:?} and {action:?}"
                    ));
                }
            }
        }

        Ok(map)
    }

    /// First configured key for `action`, for the help overlay.
    pub fn label_for(&self, action: Action) -> Option<&str> {
        self.bindings()
            .into_iter()
            .find(|(_, candidate)| *candidate == action)
            .and_then(|(strs, _)| strs.first())
            .map(String::as_str)
    }
}

// =============================================================================
// Default keybinding functions
// =============================================================================

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn default_exit() -> Vec<String> {
    keys(&["Escape", "Ctrl+Q"])
}

fn default_switch_to_brush() -> Vec<String> {
    keys(&["D"])
}

fn default_switch_to_eraser() -> Vec<String> {
    keys(&["E"])
}

fn default_increase_brush_size() -> Vec<String> {
    keys(&["+", "=", "Shift++"])
}

fn default_decrease_brush_size() -> Vec<String> {
    keys(&["-", "_", "Shift+_"])
}

fn default_clear_canvas() -> Vec<String> {
    keys(&["C"])
}

fn default_save_canvas() -> Vec<String> {
    keys(&["Ctrl+S"])
}

fn default_load_canvas() -> Vec<String> {
    keys(&["Ctrl+O"])
}

fn default_clear_storage() -> Vec<String> {
    keys(&["Ctrl+Shift+X"])
}

fn default_export_image() -> Vec<String> {
    keys(&["Ctrl+E"])
}

fn default_toggle_help() -> Vec<String> {
    keys(&["F10"])
}

fn default_toggle_status_bar() -> Vec<String> {
    keys(&["F12"])
}

fn default_set_color_red() -> Vec<String> {
    keys(&["R"])
}

fn default_set_color_green() -> Vec<String> {
    keys(&["G"])
}

fn default_set_color_blue() -> Vec<String> {
    keys(&["B"])
}

fn default_set_color_yellow() -> Vec<String> {
    keys(&["Y"])
}

fn default_set_color_orange() -> Vec<String> {
    keys(&["O"])
}

fn default_set_color_pink() -> Vec<String> {
    keys(&["P"])
}

fn default_set_color_white() -> Vec<String> {
    keys(&["W"])
}

fn default_set_color_black() -> Vec<String> {
    keys(&["K"])
}

fn default_set_color_purple() -> Vec<String> {
    keys(&["V"])
}

fn default_set_background_white() -> Vec<String> {
    keys(&["Shift+W"])
}

fn default_set_background_black() -> Vec<String> {
    keys(&["Shift+K"])
}

fn default_set_background_yellow() -> Vec<String> {
    keys(&["Shift+Y"])
}

fn default_set_background_blue() -> Vec<String> {
    keys(&["Shift+B"])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_key() {
        let binding = KeyBinding::parse("Escape").unwrap();
        assert_eq!(binding.key, "Escape");
        assert!(!binding.ctrl && !binding.shift && !binding.alt);
    }

    #[test]
    fn parse_modifiers_in_any_order() {
        let a = KeyBinding::parse("Ctrl+Shift+X").unwrap();
        let b = KeyBinding::parse("shift + ctrl + X").unwrap();
        assert_eq!(a, b);
        assert!(a.ctrl && a.shift && !a.alt);
    }

    #[test]
    fn parse_plus_key() {
        assert_eq!(KeyBinding::parse("+").unwrap().key, "+");
        let binding = KeyBinding::parse("Ctrl++").unwrap();
        assert_eq!(binding.key, "+");
        assert!(binding.ctrl);
    }

    #[test]
    fn parse_rejects_modifier_only() {
        assert!(KeyBinding::parse("Ctrl+Shift").is_err());
        assert!(KeyBinding::parse("   ").is_err());
    }

    #[test]
    fn matches_is_case_insensitive_but_modifier_exact() {
        let binding = KeyBinding::parse("Ctrl+S").unwrap();
        assert!(binding.matches("s", true, false, false));
        assert!(!binding.matches("s", true, true, false));
        assert!(!binding.matches("s", false, false, false));
    }

    #[test]
    fn default_map_covers_storage_actions() {
        let map = KeybindingsConfig::default().build_action_map().unwrap();
        let lookup = |s: &str| map.get(&KeyBinding::parse(s).unwrap()).copied();
        assert_eq!(lookup("Ctrl+S"), Some(Action::SaveCanvas));
        assert_eq!(lookup("Ctrl+O"), Some(Action::LoadCanvas));
        assert_eq!(lookup("Ctrl+E"), Some(Action::ExportImage));
        assert_eq!(lookup("Shift+K"), Some(Action::SetBackgroundBlack));
        assert_eq!(lookup("K"), Some(Action::SetColorBlack));
    }

    #[test]
    fn duplicate_keybinding_is_rejected() {
        let config = KeybindingsConfig {
            save_canvas: keys(&["Ctrl+E"]),
            ..KeybindingsConfig::default()
        };
        let err = config.build_action_map().unwrap_err();
        assert!(err.contains("Duplicate keybinding"));
        assert!(err.contains("Ctrl+E"));
    }

    #[test]
    fn label_for_uses_first_binding() {
        let config = KeybindingsConfig::default();
        assert_eq!(config.label_for(Action::Exit), Some("Escape"));
        assert_eq!(config.label_for(Action::SwitchToEraser), Some("E"));
    }
}
