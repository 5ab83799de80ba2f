//! Layer surface, shm pool and frame pacing for the board window.

use anyhow::{Context, Result};
use log::info;
use smithay_client_toolkit::{
    shell::wlr_layer::LayerSurface,
    shm::{Shm, slot::SlotPool},
};

/// The board's layer surface together with the pool its buffers come from.
///
/// The pool is sized for the current dimensions and dropped whenever they change.
#[derive(Default)]
pub struct SurfaceState {
    layer_surface: Option<LayerSurface>,
    pool: Option<SlotPool>,
    width: u32,
    height: u32,
    configured: bool,
    frame_callback_pending: bool,
}

impl SurfaceState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_layer_surface(&mut self, surface: LayerSurface) {
        self.layer_surface = Some(surface);
    }

    pub fn layer_surface(&self) -> Option<&LayerSurface> {
        self.layer_surface.as_ref()
    }

    /// Applies a configure size. Returns `true` if the size changed.
    pub fn update_dimensions(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pool = None;
        true
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dimensions as Cairo canvas sizes.
    pub fn canvas_size(&self) -> (i32, i32) {
        (
            self.width.min(i32::MAX as u32) as i32,
            self.height.min(i32::MAX as u32) as i32,
        )
    }

    pub fn set_configured(&mut self, configured: bool) {
        self.configured = configured;
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn set_frame_callback_pending(&mut self, pending: bool) {
        self.frame_callback_pending = pending;
    }

    pub fn frame_callback_pending(&self) -> bool {
        self.frame_callback_pending
    }

    /// Returns the shm pool, creating one with room for `buffer_count` frames.
    pub fn ensure_pool(&mut self, shm: &Shm, buffer_count: usize) -> Result<&mut SlotPool> {
        if self.pool.is_none() {
            let frame_bytes = self.width as usize * self.height as usize * 4;
            let pool_size = frame_bytes * buffer_count;
            info!(
                "Creating SlotPool for {}x{} ({} buffers, {} bytes)",
                self.width, self.height, buffer_count, pool_size
            );
            let pool = SlotPool::new(pool_size, shm).context("Failed to create slot pool")?;
            self.pool = Some(pool);
        }

        self.pool.as_mut().context("Buffer pool missing after creation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_change_is_reported_once() {
        let mut surface = SurfaceState::new();
        assert!(surface.update_dimensions(800, 600));
        assert!(!surface.update_dimensions(800, 600));
        assert_eq!(surface.canvas_size(), (800, 600));
        assert!(!surface.is_configured());
    }
}
