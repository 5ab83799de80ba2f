//! Status line text with scheduled auto-revert.
//!
//! Storage, export and clear actions show a transient message that reverts to
//! the active tool's label after a delay. Each transient message gets a fresh
//! revert id; a revert firing with an older id is ignored, so a newer message
//! is never overwritten by an earlier schedule.

use std::time::{Duration, Instant};

/// Everything the status line can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Brush,
    Eraser,
    Cleared,
    Saved,
    SaveFailed,
    Loaded,
    NotFound,
    StorageCleared,
    Exported,
    LoadFailed,
    ExportFailed,
}

impl StatusKind {
    /// Text shown in the status bar.
    pub fn label(self) -> &'static str {
        match self {
            StatusKind::Brush => "Brush",
            StatusKind::Eraser => "Eraser",
            StatusKind::Cleared => "Canvas Cleared",
            StatusKind::Saved => "Canvas Saved",
            StatusKind::SaveFailed => "Canvas Save Failed",
            StatusKind::Loaded => "Canvas Loaded",
            StatusKind::NotFound => "No Canvas Found",
            StatusKind::StorageCleared => "Local Storage Cleared",
            StatusKind::Exported => "Image File Saved",
            StatusKind::LoadFailed => "Canvas Load Failed",
            StatusKind::ExportFailed => "Export Failed",
        }
    }

    /// Tool labels are persistent; everything else reverts.
    pub fn is_transient(self) -> bool {
        !matches!(self, StatusKind::Brush | StatusKind::Eraser)
    }
}

/// A scheduled revert of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRevert {
    pub id: u64,
    pub deadline: Instant,
}

/// Current status text plus at most one pending revert.
#[derive(Debug)]
pub struct StatusLine {
    current: StatusKind,
    tool: StatusKind,
    pending: Option<PendingRevert>,
    next_id: u64,
    revert_after: Duration,
}

impl StatusLine {
    pub fn new(revert_after: Duration) -> Self {
        Self {
            current: StatusKind::Brush,
            tool: StatusKind::Brush,
            pending: None,
            next_id: 0,
            revert_after,
        }
    }

    /// Status currently displayed.
    pub fn current(&self) -> StatusKind {
        self.current
    }

    pub fn label(&self) -> &'static str {
        self.current.label()
    }

    pub fn pending(&self) -> Option<PendingRevert> {
        self.pending
    }

    pub fn revert_after(&self) -> Duration {
        self.revert_after
    }

    /// Records the active tool and shows its label, cancelling any pending revert.
    pub fn set_tool(&mut self, tool: StatusKind) {
        debug_assert!(!tool.is_transient());
        self.tool = tool;
        self.current = tool;
        self.pending = None;
    }

    /// Shows a message. Transient messages replace any pending revert with a new one.
    ///
    /// Returns the new revert for the caller to schedule.
    pub fn show(&mut self, kind: StatusKind, now: Instant) -> Option<PendingRevert> {
        if !kind.is_transient() {
            self.set_tool(kind);
            return None;
        }

        self.current = kind;
        self.next_id += 1;
        let revert = PendingRevert {
            id: self.next_id,
            deadline: now + self.revert_after,
        };
        self.pending = Some(revert);
        Some(revert)
    }

    /// Applies the revert identified by `id`. Stale ids are ignored.
    ///
    /// Returns true when the visible text changed.
    pub fn fire(&mut self, id: u64) -> bool {
        match self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                let changed = self.current != self.tool;
                self.current = self.tool;
                changed
            }
            _ => false,
        }
    }

    /// Applies the pending revert if its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.pending {
            Some(pending) if now >= pending.deadline => self.fire(pending.id),
            _ => false,
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(Duration::from_millis(1500))
    }
}
