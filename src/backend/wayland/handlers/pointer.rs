// Feeds pointer events into `InputState`: drags paint, the wheel resizes the brush.
use log::debug;
use smithay_client_toolkit::seat::pointer::{
    AxisScroll, BTN_LEFT, BTN_MIDDLE, BTN_RIGHT, PointerEvent, PointerEventKind, PointerHandler,
};
use wayland_client::{Connection, QueueHandle, protocol::wl_pointer};

use crate::input::MouseButton;

use super::super::state::WaylandState;

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let (x, y) = event.position;
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    debug!("Pointer entered at ({}, {})", x, y);
                }
                PointerEventKind::Leave { .. } => {
                    debug!("Pointer left surface");
                }
                PointerEventKind::Motion { .. } => {
                    self.input_state.on_mouse_motion(x, y);
                }
                PointerEventKind::Press { button, .. } => {
                    debug!("Button {} pressed at ({}, {})", button, x, y);
                    if let Some(mb) = map_button(button) {
                        self.input_state.on_mouse_press(mb, x, y);
                    }
                }
                PointerEventKind::Release { button, .. } => {
                    debug!("Button {} released", button);
                    if let Some(mb) = map_button(button) {
                        self.input_state.on_mouse_release(mb);
                    }
                }
                PointerEventKind::Axis { vertical, .. } => {
                    let direction = scroll_direction(&vertical);
                    if direction != 0.0 {
                        self.input_state.on_scroll(direction);
                        debug!("Brush size now {}", self.input_state.brush().size_label());
                    }
                }
            }
        }
    }
}

fn map_button(button: u32) -> Option<MouseButton> {
    match button {
        BTN_LEFT => Some(MouseButton::Left),
        BTN_MIDDLE => Some(MouseButton::Middle),
        BTN_RIGHT => Some(MouseButton::Right),
        _ => None,
    }
}

/// -1 for wheel up, 1 for wheel down, 0 for noise.
fn scroll_direction(vertical: &AxisScroll) -> f64 {
    if vertical.discrete != 0 {
        f64::from(vertical.discrete.signum())
    } else if vertical.absolute.abs() > 0.1 {
        vertical.absolute.signum()
    } else {
        0.0
    }
}
