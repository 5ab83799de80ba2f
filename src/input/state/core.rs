//! Board state: brush settings, stroke log, canvas and status line.

use crate::config::{Action, Config, KeyBinding, KeybindingsConfig};
use crate::draw::{Canvas, Color, DirtyTracker, Drawing, PURPLE, WHITE};
use crate::export::ExportOptions;
use crate::input::{modifiers::Modifiers, settings::BrushSettings, tool::Tool};
use crate::status::{PendingRevert, StatusKind, StatusLine};
use crate::storage::{MemoryStorage, Storage};
use crate::util::Rect;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Startup values for [`InputState`], usually derived from [`Config`].
#[derive(Debug, Clone)]
pub struct BoardOptions {
    pub brush_color: Color,
    pub background: Color,
    pub brush_size: f64,
    pub max_brush_size: f64,
    /// Step used by the size keybindings and scroll wheel
    pub size_step: f64,
    pub show_status_bar: bool,
    pub status_revert: Duration,
    pub export: ExportOptions,
    pub action_map: HashMap<KeyBinding, Action>,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            brush_color: PURPLE,
            background: WHITE,
            brush_size: 10.0,
            max_brush_size: 50.0,
            size_step: 1.0,
            show_status_bar: true,
            status_revert: Duration::from_millis(1500),
            export: ExportOptions::default(),
            action_map: KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default(),
        }
    }
}

impl BoardOptions {
    /// Builds options from a loaded configuration.
    ///
    /// # Errors
    /// Returns the keybinding error message when a binding is invalid or duplicated.
    pub fn from_config(config: &Config) -> Result<Self, String> {
        Ok(Self {
            brush_color: config.brush_color(),
            background: config.background_color(),
            brush_size: config.drawing.brush_size,
            max_brush_size: config.drawing.max_brush_size,
            size_step: config.drawing.size_step,
            show_status_bar: config.ui.show_status_bar,
            status_revert: Duration::from_millis(config.ui.status_revert_ms),
            export: ExportOptions::from_config(&config.export),
            action_map: config.keybindings.build_action_map()?,
        })
    }
}

/// Main input state containing everything painted and every setting in effect.
///
/// All pointer and keyboard events funnel through this struct. It paints
/// strokes onto its [`Canvas`] as they are recorded and replays the full
/// [`Drawing`] whenever the canvas has to be rebuilt (resize, background
/// change, load).
pub struct InputState {
    /// Tool, brush color and size
    pub(crate) brush: BrushSettings,
    /// Every recorded point, in drawing order
    pub(crate) drawing: Drawing,
    /// Canvas background; erased segments take this color
    pub(crate) background: Color,
    /// Raster the strokes are painted on
    pub(crate) canvas: Canvas,
    /// Tool label or transient message
    pub(crate) status: StatusLine,
    /// Revert the backend still has to schedule
    pub(crate) scheduled_revert: Option<PendingRevert>,
    /// Where saves and loads go
    pub(crate) storage: Box<dyn Storage>,
    /// Export destination and encoding
    pub export_options: ExportOptions,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// True between a left-button press and its release
    pub(crate) pointer_down: bool,
    pub(crate) size_step: f64,
    /// Whether user requested to exit the board
    pub should_exit: bool,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
    /// Whether the help overlay is currently visible
    pub show_help: bool,
    /// Whether the status bar is currently visible
    pub show_status_bar: bool,
    /// Tracks dirty regions between renders
    pub(crate) dirty_tracker: DirtyTracker,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates a board with a 1x1 canvas; the backend resizes it once configured.
    pub fn new(options: BoardOptions, storage: Box<dyn Storage>) -> Result<Self, cairo::Error> {
        let canvas = Canvas::new(1, 1, options.background)?;
        Ok(Self {
            brush: BrushSettings::new(
                options.brush_color,
                options.brush_size,
                options.max_brush_size,
            ),
            drawing: Drawing::new(),
            background: options.background,
            canvas,
            status: StatusLine::new(options.status_revert),
            scheduled_revert: None,
            storage,
            export_options: options.export,
            modifiers: Modifiers::new(),
            pointer_down: false,
            size_step: options.size_step,
            should_exit: false,
            needs_redraw: true,
            show_help: false,
            show_status_bar: options.show_status_bar,
            dirty_tracker: DirtyTracker::new(),
            action_map: options.action_map,
        })
    }

    /// Board backed by in-memory storage and default settings.
    pub fn in_memory(width: i32, height: i32) -> Result<Self, cairo::Error> {
        let mut state = Self::new(BoardOptions::default(), Box::new(MemoryStorage::new()))?;
        state.resize(width, height);
        Ok(state)
    }

    pub fn brush(&self) -> &BrushSettings {
        &self.brush
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    /// Text currently shown in the status line.
    pub fn status_label(&self) -> &'static str {
        self.status.label()
    }

    pub fn active_tool(&self) -> Tool {
        self.brush.tool()
    }

    pub fn is_drawing(&self) -> bool {
        self.pointer_down
    }

    /// Recreates the canvas at the new size and replays the drawing onto it.
    pub fn resize(&mut self, width: i32, height: i32) {
        if width == self.canvas.width() && height == self.canvas.height() {
            return;
        }
        log::debug!("Resizing canvas to {}x{}", width, height);
        self.rebuild_canvas(width, height);
    }

    /// Drains pending dirty rectangles for the current canvas size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.dirty_tracker
            .take_regions(self.canvas.width(), self.canvas.height())
    }

    /// Marks everything dirty, e.g. after an overlay toggled.
    pub fn mark_full_redraw(&mut self) {
        self.dirty_tracker.mark_full();
        self.needs_redraw = true;
    }

    /// Takes the revert the backend should schedule, if a message was just shown.
    pub fn take_scheduled_revert(&mut self) -> Option<PendingRevert> {
        self.scheduled_revert.take()
    }

    /// Applies a scheduled revert. Stale ids are ignored.
    pub fn fire_status_revert(&mut self, id: u64) {
        if self.status.fire(id) {
            self.mark_full_redraw();
        }
    }

    /// Applies the pending revert if its deadline has passed.
    pub fn poll_status(&mut self, now: Instant) {
        if self.status.poll(now) {
            self.mark_full_redraw();
        }
    }

    /// Shows a status message, queueing its revert for the backend.
    pub(crate) fn show_status(&mut self, kind: StatusKind) {
        if let Some(revert) = self.status.show(kind, Instant::now()) {
            self.scheduled_revert = Some(revert);
        }
        self.mark_full_redraw();
    }

    /// Look up an action for the given key and the current modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Replaces the canvas with a fresh one and replays the history.
    ///
    /// On allocation failure the previous canvas is kept.
    pub(crate) fn rebuild_canvas(&mut self, width: i32, height: i32) {
        match Canvas::new(width, height, self.background) {
            Ok(canvas) => self.canvas = canvas,
            Err(err) => {
                log::error!("Failed to create {width}x{height} canvas: {err}");
                return;
            }
        }
        self.replay();
    }

    /// Clears the canvas to the background and redraws every recorded segment.
    pub(crate) fn replay(&mut self) {
        match self.canvas.replay(&self.drawing, self.background) {
            Ok(segments) => log::debug!("Replayed {segments} segments"),
            Err(err) => log::error!("Canvas replay failed: {err}"),
        }
        self.mark_full_redraw();
    }
}
