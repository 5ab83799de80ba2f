// Holds the live Wayland protocol state shared by the backend loop and the handler
// submodules; provides rendering and status timer helpers used across them.
use anyhow::{Context, Result};
use log::{debug, warn};
use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    reexports::calloop::{
        LoopHandle, RegistrationToken,
        timer::{TimeoutAction, Timer},
    },
    registry::RegistryState,
    seat::SeatState,
    shell::{WaylandSurface, wlr_layer::LayerShell},
    shm::Shm,
};
use wayland_client::{QueueHandle, protocol::wl_shm};

use crate::{config::Config, input::InputState, util::Rect};

use super::surface::SurfaceState;

/// Internal Wayland state shared across modules.
pub(super) struct WaylandState {
    // Wayland protocol objects
    pub(super) registry_state: RegistryState,
    pub(super) compositor_state: CompositorState,
    pub(super) layer_shell: LayerShell,
    pub(super) shm: Shm,
    pub(super) output_state: OutputState,
    pub(super) seat_state: SeatState,

    // Surface and buffer management
    pub(super) surface: SurfaceState,

    // Configuration
    pub(super) config: Config,

    // Input state
    pub(super) input_state: InputState,

    // Status revert timer
    pub(super) loop_handle: LoopHandle<'static, WaylandState>,
    pub(super) revert_timer: Option<RegistrationToken>,
}

impl WaylandState {
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        registry_state: RegistryState,
        compositor_state: CompositorState,
        layer_shell: LayerShell,
        shm: Shm,
        output_state: OutputState,
        seat_state: SeatState,
        config: Config,
        input_state: InputState,
        loop_handle: LoopHandle<'static, WaylandState>,
    ) -> Self {
        Self {
            registry_state,
            compositor_state,
            layer_shell,
            shm,
            output_state,
            seat_state,
            surface: SurfaceState::new(),
            config,
            input_state,
            loop_handle,
            revert_timer: None,
        }
    }

    /// Arms a timer for the status message just shown, replacing the previous one.
    pub(super) fn schedule_status_revert(&mut self) {
        let Some(revert) = self.input_state.take_scheduled_revert() else {
            return;
        };

        if let Some(token) = self.revert_timer.take() {
            self.loop_handle.remove(token);
        }

        let timer = Timer::from_deadline(revert.deadline);
        let inserted = self
            .loop_handle
            .insert_source(timer, move |_deadline, _, state: &mut WaylandState| {
                state.revert_timer = None;
                state.input_state.fire_status_revert(revert.id);
                TimeoutAction::Drop
            });

        match inserted {
            Ok(token) => self.revert_timer = Some(token),
            Err(err) => warn!("Failed to schedule status revert: {}", err.error),
        }
    }

    pub(super) fn render(&mut self, qh: &QueueHandle<Self>) -> Result<()> {
        debug!("=== RENDER START ===");
        let buffer_count = self.config.performance.buffer_count as usize;
        let width = self.surface.width();
        let height = self.surface.height();

        // Get a buffer from the pool
        let (buffer, canvas) = {
            let pool = self.surface.ensure_pool(&self.shm, buffer_count)?;
            pool.create_buffer(
                width as i32,
                height as i32,
                (width * 4) as i32,
                wl_shm::Format::Argb8888,
            )
            .context("Failed to create buffer")?
        };

        // SAFETY: `canvas` is a mutable slice from SlotPool holding exactly
        // width * height * 4 bytes in ARGB32 layout with a stride of width * 4.
        // `cairo_surface` and `ctx` are dropped before the buffer is attached,
        // so Cairo never touches the memory after ownership moves to the compositor.
        let cairo_surface = unsafe {
            cairo::ImageSurface::create_for_data_unsafe(
                canvas.as_mut_ptr(),
                cairo::Format::ARgb32,
                width as i32,
                height as i32,
                (width * 4) as i32,
            )
            .context("Failed to create Cairo surface")?
        };

        let ctx = cairo::Context::new(&cairo_surface).context("Failed to create Cairo context")?;

        // The canvas already holds background and strokes; copy it over
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(self.input_state.canvas().surface(), 0.0, 0.0)
            .context("Failed to use canvas as source")?;
        ctx.paint().context("Failed to blit canvas")?;
        ctx.set_operator(cairo::Operator::Over);

        if self.input_state.show_status_bar {
            crate::ui::render_status_bar(
                &ctx,
                &self.input_state,
                self.config.ui.status_bar_position,
                &self.config.ui.status_bar_style,
                width,
                height,
            );
        }

        if self.input_state.show_help {
            crate::ui::render_help_overlay(
                &ctx,
                &self.config.ui.help_overlay_style,
                &self.config.keybindings,
                width,
                height,
            );
        }

        cairo_surface.flush();
        drop(ctx);
        drop(cairo_surface);

        // Attach buffer and commit
        let wl_surface = self
            .surface
            .layer_surface()
            .context("Layer surface not created")?
            .wl_surface();
        wl_surface.attach(Some(buffer.wl_buffer()), 0, 0);

        let (surface_width, surface_height) = self.surface.canvas_size();

        // Status and overlay changes request a full redraw; strokes damage their bounds
        let dirty_regions = resolve_damage_regions(
            surface_width,
            surface_height,
            self.input_state.take_dirty_regions(),
        );

        for rect in &dirty_regions {
            debug!(
                "Damaging buffer region x={} y={} w={} h={}",
                rect.x, rect.y, rect.width, rect.height
            );
            wl_surface.damage_buffer(rect.x, rect.y, rect.width, rect.height);
        }

        if self.config.performance.enable_vsync {
            wl_surface.frame(qh, wl_surface.clone());
        }

        wl_surface.commit();
        debug!("=== RENDER COMPLETE ===");

        Ok(())
    }
}

fn resolve_damage_regions(width: i32, height: i32, mut regions: Vec<Rect>) -> Vec<Rect> {
    regions.retain(Rect::is_valid);

    if regions.is_empty()
        && width > 0
        && height > 0
        && let Some(full) = Rect::new(0, 0, width, height)
    {
        regions.push(full);
    }

    regions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_damage_returns_full_when_empty() {
        let regions = resolve_damage_regions(1920, 1080, Vec::new());
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0], Rect::new(0, 0, 1920, 1080).unwrap());
    }

    #[test]
    fn resolve_damage_filters_invalid_rects() {
        let regions = resolve_damage_regions(
            800,
            600,
            vec![
                Rect {
                    x: 10,
                    y: 10,
                    width: 50,
                    height: 40,
                },
                Rect {
                    x: 0,
                    y: 0,
                    width: 0,
                    height: 10,
                },
            ],
        );

        assert_eq!(regions, vec![Rect::new(10, 10, 50, 40).unwrap()]);
    }
}
