use crate::draw::StrokePoint;
use crate::input::events::MouseButton;

use super::InputState;

impl InputState {
    /// Processes a mouse button press event.
    ///
    /// A left press ends any previous stroke and records an anchor point. The
    /// anchor itself is not painted; the first motion draws from it.
    pub fn on_mouse_press(&mut self, button: MouseButton, x: f64, y: f64) {
        if button != MouseButton::Left {
            return;
        }
        self.pointer_down = true;
        self.drawing.lift_pen();
        let anchor = self.point_at(x, y);
        self.drawing.record(anchor);
    }

    /// Processes pointer motion.
    ///
    /// While the left button is held, records the point and paints the segment
    /// from the previous point immediately. Motion without a press records nothing.
    pub fn on_mouse_motion(&mut self, x: f64, y: f64) {
        if !self.pointer_down {
            return;
        }

        let point = self.point_at(x, y);
        let previous = self.drawing.last_point().cloned();
        self.drawing.record(point.clone());

        if let Some(previous) = previous {
            if let Err(err) = self.canvas.paint_segment(&previous, &point, self.background) {
                log::error!("Failed to paint segment: {err}");
            }
            self.dirty_tracker.mark_segment(&previous, &point);
            self.needs_redraw = true;
        }
    }

    /// Processes a mouse button release; a left release ends the stroke.
    pub fn on_mouse_release(&mut self, button: MouseButton) {
        if button != MouseButton::Left || !self.pointer_down {
            return;
        }
        self.pointer_down = false;
        self.drawing.lift_pen();
    }

    /// Scroll adjusts the brush size; negative deltas (wheel up) grow it.
    pub fn on_scroll(&mut self, delta: f64) {
        if delta < 0.0 {
            self.adjust_brush_size(self.size_step);
        } else if delta > 0.0 {
            self.adjust_brush_size(-self.size_step);
        }
    }

    fn point_at(&self, x: f64, y: f64) -> StrokePoint {
        StrokePoint::new(
            x,
            y,
            self.brush.size(),
            self.brush.current_color(self.background),
            self.brush.is_eraser(),
        )
    }
}
