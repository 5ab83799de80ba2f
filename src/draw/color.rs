//! RGBA color type, hex conversion, and predefined color constants.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum). Colors are
/// exchanged with the outside world (config, storage) as `#RRGGBB` hex strings.
///
/// # Examples
///
/// ```
/// use paintboard::draw::Color;
/// let purple = Color::from_hex("#A51DAB").unwrap();
/// assert_eq!(purple.to_hex(), "#A51DAB");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color '{0}' must have 6 or 8 hex digits")]
    Length(String),
    #[error("color '{0}' contains non-hex characters")]
    Digits(String),
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA`. The leading `#` is optional.
    pub fn from_hex(raw: &str) -> Result<Self, ColorParseError> {
        let digits = raw.trim().trim_start_matches('#');
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::Length(raw.to_string()));
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::Digits(raw.to_string()));
        }

        let channel = |index: usize| -> Result<u8, ColorParseError> {
            u8::from_str_radix(&digits[index..index + 2], 16)
                .map_err(|_| ColorParseError::Digits(raw.to_string()))
        };

        let mut color = Self::from_rgb8(channel(0)?, channel(2)?, channel(4)?);
        if digits.len() == 8 {
            color.a = channel(6)? as f64 / 255.0;
        }
        Ok(color)
    }

    /// Formats the color as uppercase `#RRGGBB`, appending alpha only when translucent.
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == u8::MAX {
            format!("#{r:02X}{g:02X}{b:02X}")
        } else {
            format!("#{r:02X}{g:02X}{b:02X}{a:02X}")
        }
    }

    /// Converts to 8-bit RGBA channels.
    pub fn to_rgba8(&self) -> [u8; 4] {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }

    /// Perceived brightness used to pick contrasting UI colors.
    pub fn brightness(&self) -> f64 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Default brush color (#A51DAB)
pub const PURPLE: Color = Color {
    r: 165.0 / 255.0,
    g: 29.0 / 255.0,
    b: 171.0 / 255.0,
    a: 1.0,
};

/// Predefined red color (R=1.0, G=0.0, B=0.0)
pub const RED: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined green color (R=0.0, G=1.0, B=0.0)
pub const GREEN: Color = Color {
    r: 0.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined blue color (R=0.0, G=0.0, B=1.0)
pub const BLUE: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined yellow color (R=1.0, G=1.0, B=0.0)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Predefined orange color (R=1.0, G=0.5, B=0.0)
pub const ORANGE: Color = Color {
    r: 1.0,
    g: 0.5,
    b: 0.0,
    a: 1.0,
};

/// Predefined pink/magenta color (R=1.0, G=0.0, B=1.0)
pub const PINK: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined white color, also the default background
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Predefined black color (R=0.0, G=0.0, B=0.0)
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_uppercase() {
        let color = Color::from_hex("#a51dab").unwrap();
        assert_eq!(color.to_hex(), "#A51DAB");
        assert_eq!(color, PURPLE);
    }

    #[test]
    fn hash_prefix_is_optional() {
        assert_eq!(Color::from_hex("FFFFFF").unwrap(), WHITE);
    }

    #[test]
    fn eight_digit_hex_keeps_alpha() {
        let color = Color::from_hex("#00000080").unwrap();
        assert_eq!(color.to_rgba8(), [0, 0, 0, 128]);
        assert_eq!(color.to_hex(), "#00000080");
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(matches!(
            Color::from_hex("#12345"),
            Err(ColorParseError::Length(_))
        ));
        assert!(matches!(
            Color::from_hex("#GGGGGG"),
            Err(ColorParseError::Digits(_))
        ));
    }

    #[test]
    fn serializes_as_quoted_hex() {
        let json = serde_json::to_string(&BLACK).unwrap();
        assert_eq!(json, "\"#000000\"");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, BLACK);
    }
}
