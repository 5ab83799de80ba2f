//! Geometry and path helpers shared across the crate.

use crate::draw::StrokePoint;
use std::path::PathBuf;

/// Axis-aligned rectangle helper used for dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Clips the rectangle to `0..width` x `0..height`.
    pub fn clamp_to_bounds(self, width: i32, height: i32) -> Option<Self> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x + self.width).clamp(0, width);
        let max_y = (self.y + self.height).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Bounding box covering a round-capped segment, including antialiasing slack.
pub fn segment_bounds(from: &StrokePoint, to: &StrokePoint) -> Option<Rect> {
    let pad = to.size / 2.0 + 2.0;
    let min_x = (from.x.min(to.x) - pad).floor() as i32;
    let min_y = (from.y.min(to.y) - pad).floor() as i32;
    let max_x = (from.x.max(to.x) + pad).ceil() as i32;
    let max_y = (from.y.max(to.y) + pad).ceil() as i32;
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}

/// Expand tilde (~) in path strings.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(stripped);
    }
    PathBuf::from(path)
}
