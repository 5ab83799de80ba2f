//! Append-only stroke log.

use super::point::StrokePoint;
use serde::{Deserialize, Deserializer, Serialize};

/// Ordered record of everything painted on the canvas.
///
/// Insertion order is drawing order is replay order. Entries are either points or
/// pen lifts (`None`, stored as JSON `null`; an empty object `{}` also reads as a
/// pen lift). A pen lift separates two strokes so the point after it only
/// anchors the next segment instead of joining the previous stroke.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Drawing {
    #[serde(deserialize_with = "entries_with_empty_lifts")]
    entries: Vec<Option<StrokePoint>>,
}

/// Browser saves wrote unpressed samples as `{}`; read those as pen lifts.
fn entries_with_empty_lifts<'de, D>(deserializer: D) -> Result<Vec<Option<StrokePoint>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct EmptyEntry {}

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawEntry {
        Point(StrokePoint),
        Lift(#[allow(dead_code)] Option<EmptyEntry>),
    }

    let raw = Vec::<RawEntry>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|entry| match entry {
            RawEntry::Point(point) => Some(point),
            RawEntry::Lift(_) => None,
        })
        .collect())
}

impl Drawing {
    /// Creates an empty drawing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a point.
    pub fn record(&mut self, point: StrokePoint) {
        self.entries.push(Some(point));
    }

    /// Ends the current stroke.
    ///
    /// No-op on an empty drawing or when the last entry is already a pen lift,
    /// so repeated presses never accumulate separators.
    pub fn lift_pen(&mut self) {
        if matches!(self.entries.last(), Some(Some(_))) {
            self.entries.push(None);
        }
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Returns true when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded points, excluding pen lifts.
    pub fn point_count(&self) -> usize {
        self.points().count()
    }

    /// Raw entries including pen lifts.
    pub fn entries(&self) -> &[Option<StrokePoint>] {
        &self.entries
    }

    /// Iterates recorded points in order, skipping pen lifts.
    pub fn points(&self) -> impl Iterator<Item = &StrokePoint> {
        self.entries.iter().flatten()
    }

    /// Most recently recorded entry if it is a point.
    pub fn last_point(&self) -> Option<&StrokePoint> {
        self.entries.last().and_then(Option::as_ref)
    }

    /// Iterates the drawable segments as `(from, to)` pairs.
    ///
    /// `to` carries the paint attributes for the segment. The first point of
    /// every stroke only ever appears as a `from`.
    pub fn segments(&self) -> impl Iterator<Item = (&StrokePoint, &StrokePoint)> {
        self.entries.windows(2).filter_map(|pair| match pair {
            [Some(from), Some(to)] => Some((from, to)),
            _ => None,
        })
    }
}

impl FromIterator<StrokePoint> for Drawing {
    fn from_iter<I: IntoIterator<Item = StrokePoint>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Some).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::PURPLE;

    fn point(x: f64, y: f64) -> StrokePoint {
        StrokePoint::new(x, y, 10.0, PURPLE, false)
    }

    #[test]
    fn single_point_has_no_segments() {
        let mut drawing = Drawing::new();
        drawing.record(point(1.0, 1.0));
        assert_eq!(drawing.segments().count(), 0);
    }

    #[test]
    fn consecutive_points_form_segments() {
        let drawing: Drawing = [point(0.0, 0.0), point(5.0, 5.0), point(9.0, 1.0)]
            .into_iter()
            .collect();
        let segments: Vec<_> = drawing.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!((segments[0].0.x, segments[0].1.x), (0.0, 5.0));
        assert_eq!((segments[1].0.x, segments[1].1.x), (5.0, 9.0));
    }

    #[test]
    fn pen_lift_breaks_the_chain() {
        let mut drawing = Drawing::new();
        drawing.record(point(0.0, 0.0));
        drawing.record(point(5.0, 5.0));
        drawing.lift_pen();
        drawing.record(point(50.0, 50.0));
        drawing.record(point(60.0, 60.0));

        let segments: Vec<_> = drawing.segments().collect();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].0.x, 50.0);
        assert_eq!(drawing.point_count(), 4);
    }

    #[test]
    fn lift_pen_does_not_stack() {
        let mut drawing = Drawing::new();
        drawing.lift_pen();
        assert!(drawing.is_empty());

        drawing.record(point(0.0, 0.0));
        drawing.lift_pen();
        drawing.lift_pen();
        assert_eq!(drawing.entries().len(), 2);
        assert!(drawing.last_point().is_none());
    }

    #[test]
    fn pen_lifts_serialize_as_null() {
        let mut drawing = Drawing::new();
        drawing.record(point(0.0, 0.0));
        drawing.lift_pen();
        let json = serde_json::to_string(&drawing).unwrap();
        assert!(json.starts_with('['));
        assert!(json.ends_with(",null]"));

        let back: Drawing = serde_json::from_str(&json).unwrap();
        assert_eq!(back, drawing);
    }

    #[test]
    fn empty_objects_read_as_pen_lifts() {
        let json = r##"[{"x":0,"y":0,"size":10,"color":"#A51DAB","erase":false},{},{"x":5,"y":5,"size":10,"color":"#A51DAB","erase":false}]"##;
        let drawing: Drawing = serde_json::from_str(json).unwrap();
        assert_eq!(drawing.entries().len(), 3);
        assert!(drawing.entries()[1].is_none());
        assert_eq!(drawing.segments().count(), 0);
    }

    #[test]
    fn partial_points_are_rejected() {
        let json = r##"[{"x":0,"y":0}]"##;
        assert!(serde_json::from_str::<Drawing>(json).is_err());
    }
}
