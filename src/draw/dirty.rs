//! Dirty region tracking for incremental rendering.
//!
//! Collects axis-aligned rectangles that need repainting between frames.

use super::StrokePoint;
use crate::util::{self, Rect};

/// Tracks dirty rectangles accumulated between renders.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    force_full: bool,
}

impl DirtyTracker {
    /// Creates a new, empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the entire surface as dirty. Clears any accumulated rectangles.
    pub fn mark_full(&mut self) {
        self.force_full = true;
        self.regions.clear();
    }

    /// Adds a dirty rectangle if the tracker is not already full.
    pub fn mark_rect(&mut self, rect: Rect) {
        if !rect.is_valid() || self.force_full {
            return;
        }
        self.regions.push(rect);
    }

    /// Adds the area covered by a freshly painted segment.
    pub fn mark_segment(&mut self, from: &StrokePoint, to: &StrokePoint) {
        match util::segment_bounds(from, to) {
            Some(rect) => self.mark_rect(rect),
            None => self.mark_full(),
        }
    }

    /// Returns true when nothing needs repainting.
    pub fn is_clean(&self) -> bool {
        !self.force_full && self.regions.is_empty()
    }

    /// Drains the dirty regions gathered so far, clipped to the surface.
    ///
    /// When the full surface is marked, returns a single rectangle covering the
    /// entire surface; otherwise returns accumulated rectangles.
    pub fn take_regions(&mut self, width: i32, height: i32) -> Vec<Rect> {
        if self.force_full {
            self.force_full = false;
            self.regions.clear();
            return Rect::new(0, 0, width, height).into_iter().collect();
        }
        self.regions
            .drain(..)
            .filter_map(|rect| rect.clamp_to_bounds(width, height))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::PURPLE;

    fn point(x: f64, y: f64) -> StrokePoint {
        StrokePoint::new(x, y, 4.0, PURPLE, false)
    }

    #[test]
    fn mark_segment_records_rectangles() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_segment(&point(10.0, 10.0), &point(20.0, 30.0));

        let rects = tracker.take_regions(100, 100);
        assert_eq!(rects.len(), 1);
        assert!(rects[0].width > 10);
        assert!(rects[0].height > 20);
        assert!(tracker.is_clean());
    }

    #[test]
    fn mark_full_takes_precedence() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_segment(&point(5.0, 5.0), &point(10.0, 10.0));
        tracker.mark_full();
        tracker.mark_segment(&point(20.0, 20.0), &point(35.0, 35.0));

        let rects = tracker.take_regions(200, 100);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0], Rect::new(0, 0, 200, 100).unwrap());
    }

    #[test]
    fn offscreen_regions_are_dropped() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_segment(&point(500.0, 500.0), &point(510.0, 510.0));
        assert!(tracker.take_regions(100, 100).is_empty());
    }
}
