//! Recorded pointer samples.

use super::color::Color;
use serde::{Deserialize, Deserializer, Serialize};

/// One sampled pointer position together with the paint attributes it was drawn with.
///
/// Points are immutable once appended to a [`Drawing`](super::Drawing). The JSON
/// field names (`x`, `y`, `size`, `color`, `erase`) are part of the storage format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePoint {
    /// X coordinate in canvas pixels
    pub x: f64,
    /// Y coordinate in canvas pixels
    pub y: f64,
    /// Line width of the segment ending at this point
    #[serde(deserialize_with = "size_from_number_or_string")]
    pub size: f64,
    /// Color the point was recorded with
    pub color: Color,
    /// Whether the point was recorded by the eraser
    pub erase: bool,
}

impl StrokePoint {
    pub fn new(x: f64, y: f64, size: f64, color: Color, erase: bool) -> Self {
        Self {
            x,
            y,
            size,
            color,
            erase,
        }
    }

    /// Color the segment ending at this point is stroked with.
    ///
    /// Erased points always take the current background so they track
    /// background changes on replay.
    pub fn stroke_color(&self, background: Color) -> Color {
        if self.erase { background } else { self.color }
    }
}

/// Older saves stored slider values as strings (`"10"`); accept both forms.
fn size_from_number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawSize {
        Number(f64),
        Text(String),
    }

    match RawSize::deserialize(deserializer)? {
        RawSize::Number(value) => Ok(value),
        RawSize::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid stroke size '{text}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, PURPLE};

    #[test]
    fn erase_points_stroke_with_background() {
        let point = StrokePoint::new(1.0, 2.0, 5.0, PURPLE, true);
        assert_eq!(point.stroke_color(BLACK), BLACK);

        let brush = StrokePoint::new(1.0, 2.0, 5.0, PURPLE, false);
        assert_eq!(brush.stroke_color(BLACK), PURPLE);
    }

    #[test]
    fn size_accepts_string_values() {
        let json = r##"{"x":3,"y":4,"size":"12","color":"#A51DAB","erase":false}"##;
        let point: StrokePoint = serde_json::from_str(json).unwrap();
        assert_eq!(point.size, 12.0);
        assert_eq!(point.color, PURPLE);
    }

    #[test]
    fn size_rejects_garbage_strings() {
        let json = r##"{"x":3,"y":4,"size":"big","color":"#A51DAB","erase":false}"##;
        assert!(serde_json::from_str::<StrokePoint>(json).is_err());
    }
}
