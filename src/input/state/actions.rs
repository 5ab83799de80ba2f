use crate::config::Action;
use crate::draw::{BLACK, BLUE, Color, GREEN, ORANGE, PINK, PURPLE, RED, WHITE, YELLOW};
use crate::input::events::Key;
use crate::status::StatusKind;

use super::InputState;

impl InputState {
    /// Processes a key press event.
    ///
    /// Modifier keys update the modifier state; every other key is looked up in
    /// the keybinding map together with the held modifiers.
    pub fn on_key_press(&mut self, key: Key) {
        match key {
            Key::Shift => {
                self.modifiers.shift = true;
                return;
            }
            Key::Ctrl => {
                self.modifiers.ctrl = true;
                return;
            }
            Key::Alt => {
                self.modifiers.alt = true;
                return;
            }
            _ => {}
        }

        let Some(key_str) = key.binding_name() else {
            return;
        };

        if let Some(action) = self.find_action(&key_str) {
            log::debug!("Key {key_str} triggered {action:?}");
            self.handle_action(action);
        }
    }

    /// Processes a key release event; only modifiers are tracked.
    pub fn on_key_release(&mut self, key: Key) {
        match key {
            Key::Shift => self.modifiers.shift = false,
            Key::Ctrl => self.modifiers.ctrl = false,
            Key::Alt => self.modifiers.alt = false,
            _ => {}
        }
    }

    /// Handle an action triggered by a keybinding.
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Exit => {
                if self.pointer_down {
                    self.pointer_down = false;
                    self.drawing.lift_pen();
                } else {
                    self.should_exit = true;
                }
            }
            Action::SwitchToBrush => self.switch_to_brush(),
            Action::SwitchToEraser => self.switch_to_eraser(),
            Action::IncreaseBrushSize => self.adjust_brush_size(self.size_step),
            Action::DecreaseBrushSize => self.adjust_brush_size(-self.size_step),
            Action::ClearCanvas => self.clear_canvas(),
            Action::SaveCanvas => self.save_canvas(),
            Action::LoadCanvas => self.load_canvas(),
            Action::ClearStorage => self.clear_storage(),
            Action::ExportImage => {
                self.export_image();
            }
            Action::ToggleHelp => {
                self.show_help = !self.show_help;
                self.mark_full_redraw();
            }
            Action::ToggleStatusBar => {
                self.show_status_bar = !self.show_status_bar;
                self.mark_full_redraw();
            }
            Action::SetColorRed => self.set_brush_color(RED),
            Action::SetColorGreen => self.set_brush_color(GREEN),
            Action::SetColorBlue => self.set_brush_color(BLUE),
            Action::SetColorYellow => self.set_brush_color(YELLOW),
            Action::SetColorOrange => self.set_brush_color(ORANGE),
            Action::SetColorPink => self.set_brush_color(PINK),
            Action::SetColorWhite => self.set_brush_color(WHITE),
            Action::SetColorBlack => self.set_brush_color(BLACK),
            Action::SetColorPurple => self.set_brush_color(PURPLE),
            Action::SetBackgroundWhite => self.set_background_color(WHITE),
            Action::SetBackgroundBlack => self.set_background_color(BLACK),
            Action::SetBackgroundYellow => self.set_background_color(YELLOW),
            Action::SetBackgroundBlue => self.set_background_color(BLUE),
        }
    }

    /// Sets the brush size, clamped to `1..=max`.
    pub fn set_brush_size(&mut self, value: f64) {
        let applied = self.brush.set_size(value);
        log::debug!("Brush size set to {applied:.1}");
        self.mark_full_redraw();
    }

    /// Grows or shrinks the brush by `delta`.
    pub fn adjust_brush_size(&mut self, delta: f64) {
        self.set_brush_size(self.brush.size() + delta);
    }

    /// Activates the brush, restoring the size it had before the eraser.
    pub fn switch_to_brush(&mut self) {
        if self.brush.enter_brush() {
            log::info!("Switched to brush (size {})", self.brush.size_label());
        }
        self.status.set_tool(StatusKind::Brush);
        self.scheduled_revert = None;
        self.mark_full_redraw();
    }

    /// Activates the eraser at maximum size, remembering the brush size.
    pub fn switch_to_eraser(&mut self) {
        if self.brush.enter_eraser() {
            log::info!("Switched to eraser (size {})", self.brush.size_label());
        }
        self.status.set_tool(StatusKind::Eraser);
        self.scheduled_revert = None;
        self.mark_full_redraw();
    }

    /// Chooses a new brush color and leaves eraser mode.
    pub fn set_brush_color(&mut self, color: Color) {
        self.brush.set_brush_color(color);
        log::debug!("Brush color set to {color}");
        self.switch_to_brush();
    }

    /// Replaces the background and rebuilds the canvas.
    ///
    /// Erased segments are replayed in the new color. The active tool is unchanged.
    pub fn set_background_color(&mut self, color: Color) {
        self.background = color;
        log::info!("Background color set to {color}");
        self.rebuild_canvas(self.canvas.width(), self.canvas.height());
    }

    /// Forgets every stroke and clears the canvas to the background.
    pub fn clear_canvas(&mut self) {
        self.drawing.clear();
        self.pointer_down = false;
        self.rebuild_canvas(self.canvas.width(), self.canvas.height());
        log::info!("Canvas cleared");
        self.show_status(StatusKind::Cleared);
    }
}
