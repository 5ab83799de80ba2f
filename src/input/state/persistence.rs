use crate::export;
use crate::status::StatusKind;
use crate::storage::{self, LoadOutcome};
use std::path::PathBuf;

use super::InputState;

impl InputState {
    /// Writes the drawing and background to storage.
    pub fn save_canvas(&mut self) {
        match storage::save_canvas(self.storage.as_ref(), &self.drawing, self.background) {
            Ok(()) => self.show_status(StatusKind::Saved),
            Err(err) => {
                log::error!("Failed to save canvas: {err}");
                self.show_status(StatusKind::SaveFailed);
            }
        }
    }

    /// Replaces the drawing and background with the saved ones and replays them.
    ///
    /// A missing save shows "No Canvas Found"; unreadable data leaves the
    /// current drawing untouched.
    pub fn load_canvas(&mut self) {
        match storage::load_canvas(self.storage.as_ref()) {
            Ok(LoadOutcome::Loaded {
                drawing,
                background,
            }) => {
                self.drawing = drawing;
                self.background = background;
                self.pointer_down = false;
                self.rebuild_canvas(self.canvas.width(), self.canvas.height());
                self.show_status(StatusKind::Loaded);
            }
            Ok(LoadOutcome::NotFound) => self.show_status(StatusKind::NotFound),
            Err(err) => {
                log::warn!("Failed to load canvas: {err}");
                self.show_status(StatusKind::LoadFailed);
            }
        }
    }

    /// Removes the saved drawing and background from storage.
    pub fn clear_storage(&mut self) {
        match storage::clear_saved(self.storage.as_ref()) {
            Ok(_) => self.show_status(StatusKind::StorageCleared),
            Err(err) => {
                log::error!("Failed to clear storage: {err}");
                self.show_status(StatusKind::SaveFailed);
            }
        }
    }

    /// Exports the canvas using the configured options. Returns the written path.
    pub fn export_image(&mut self) -> Option<PathBuf> {
        match export::export_canvas(&self.canvas, &self.export_options) {
            Ok(path) => {
                log::info!("Exported canvas to {}", path.display());
                self.show_status(StatusKind::Exported);
                Some(path)
            }
            Err(err) => {
                log::error!("Failed to export canvas: {err}");
                self.show_status(StatusKind::ExportFailed);
                None
            }
        }
    }
}
