//! Brush settings with invariant-guarding accessors.

use super::tool::Tool;
use crate::draw::Color;

/// Smallest selectable brush size.
pub const MIN_BRUSH_SIZE: f64 = 1.0;

/// Active tool, color and size.
///
/// `size` always lies in `MIN_BRUSH_SIZE..=max_size`. While the eraser is active
/// the size sits at `max_size` and the size chosen for the brush waits in
/// `previous_size` until the brush comes back.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushSettings {
    tool: Tool,
    brush_color: Color,
    size: f64,
    previous_size: f64,
    max_size: f64,
}

impl BrushSettings {
    pub fn new(brush_color: Color, size: f64, max_size: f64) -> Self {
        let max_size = max_size.max(MIN_BRUSH_SIZE);
        let size = clamp_size(size, max_size).unwrap_or(MIN_BRUSH_SIZE);
        Self {
            tool: Tool::Brush,
            brush_color,
            size,
            previous_size: size,
            max_size,
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn is_eraser(&self) -> bool {
        self.tool == Tool::Eraser
    }

    /// Color chosen by the user for the brush.
    pub fn brush_color(&self) -> Color {
        self.brush_color
    }

    /// Color new points are recorded with.
    pub fn current_color(&self, background: Color) -> Color {
        match self.tool {
            Tool::Brush => self.brush_color,
            Tool::Eraser => background,
        }
    }

    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn previous_size(&self) -> f64 {
        self.previous_size
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }

    /// Stores a clamped size and returns the value actually applied.
    ///
    /// Non-finite input leaves the size unchanged.
    pub fn set_size(&mut self, value: f64) -> f64 {
        if let Some(size) = clamp_size(value, self.max_size) {
            self.size = size;
        }
        self.size
    }

    /// Display label, zero-padded below 10 (`"05"`, `"10"`).
    pub fn size_label(&self) -> String {
        let rounded = self.size.round() as u32;
        if rounded < 10 {
            format!("0{rounded}")
        } else {
            rounded.to_string()
        }
    }

    pub fn set_brush_color(&mut self, color: Color) {
        self.brush_color = color;
    }

    /// Switches to the eraser. Returns false when it was already active.
    pub fn enter_eraser(&mut self) -> bool {
        if self.tool == Tool::Eraser {
            return false;
        }
        self.previous_size = self.size;
        self.size = self.max_size;
        self.tool = Tool::Eraser;
        true
    }

    /// Switches back to the brush. Returns false when it was already active.
    pub fn enter_brush(&mut self) -> bool {
        if self.tool == Tool::Brush {
            return false;
        }
        self.size = self.previous_size;
        self.tool = Tool::Brush;
        true
    }
}

fn clamp_size(value: f64, max_size: f64) -> Option<f64> {
    value
        .is_finite()
        .then(|| value.clamp(MIN_BRUSH_SIZE, max_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{BLACK, PURPLE};

    #[test]
    fn size_is_clamped() {
        let mut brush = BrushSettings::new(PURPLE, 10.0, 50.0);
        assert_eq!(brush.set_size(0.0), 1.0);
        assert_eq!(brush.set_size(120.0), 50.0);
        assert_eq!(brush.set_size(f64::NAN), 50.0);
        assert_eq!(BrushSettings::new(PURPLE, 99.0, 20.0).size(), 20.0);
    }

    #[test]
    fn size_label_is_zero_padded() {
        let mut brush = BrushSettings::new(PURPLE, 5.0, 50.0);
        assert_eq!(brush.size_label(), "05");
        brush.set_size(10.0);
        assert_eq!(brush.size_label(), "10");
        brush.set_size(42.0);
        assert_eq!(brush.size_label(), "42");
    }

    #[test]
    fn eraser_round_trip_restores_size() {
        let mut brush = BrushSettings::new(PURPLE, 7.0, 50.0);
        assert!(brush.enter_eraser());
        assert_eq!(brush.size(), 50.0);
        assert_eq!(brush.current_color(BLACK), BLACK);

        assert!(brush.enter_brush());
        assert_eq!(brush.size(), 7.0);
        assert_eq!(brush.current_color(BLACK), PURPLE);
    }

    #[test]
    fn repeated_switch_keeps_size_memory() {
        let mut brush = BrushSettings::new(PURPLE, 7.0, 50.0);
        assert!(!brush.enter_brush());
        brush.set_size(12.0);
        assert!(!brush.enter_brush());
        assert_eq!(brush.size(), 12.0);

        brush.enter_eraser();
        assert!(!brush.enter_eraser());
        brush.enter_brush();
        assert_eq!(brush.size(), 12.0);
    }
}
