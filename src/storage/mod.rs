//! Keyed persistence for the drawing and its background color.
//!
//! Two slots are used: [`DRAWING_KEY`] holds the stroke log as a JSON array
//! (pen lifts are `null`) and [`BACKGROUND_KEY`] holds the background as a JSON
//! string. Backends only move opaque strings; encoding lives here.

mod file;
mod memory;
mod options;

pub use file::{FileStorage, StorageInspection, inspect_storage};
pub use memory::MemoryStorage;
pub use options::resolve_directory;

use crate::draw::{Color, Drawing};
use log::{debug, info};
use std::path::PathBuf;
use thiserror::Error;

/// Slot holding the serialized stroke log.
pub const DRAWING_KEY: &str = "savedCanvas";
/// Slot holding the serialized background color.
pub const BACKGROUND_KEY: &str = "backgroundColor";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed '{key}' slot: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid slot key '{0}'")]
    InvalidKey(String),
    #[error("storage error: {0}")]
    Other(String),
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A string key/value store with the semantics of browser local storage.
pub trait Storage: Send + Sync {
    /// Reads a slot; `None` when absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Writes a slot, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes a slot. Returns whether it existed.
    fn remove(&self, key: &str) -> StorageResult<bool>;
}

/// Result of [`load_canvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    Loaded { drawing: Drawing, background: Color },
    NotFound,
}

/// Which slots [`clear_saved`] removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClearOutcome {
    pub removed_drawing: bool,
    pub removed_background: bool,
}

/// Writes the drawing and background into their slots.
pub fn save_canvas(
    storage: &dyn Storage,
    drawing: &Drawing,
    background: Color,
) -> StorageResult<()> {
    let drawing_json = serde_json::to_string(drawing).map_err(|source| {
        StorageError::Serialization {
            key: DRAWING_KEY.to_string(),
            source,
        }
    })?;
    let background_json = serde_json::to_string(&background).map_err(|source| {
        StorageError::Serialization {
            key: BACKGROUND_KEY.to_string(),
            source,
        }
    })?;

    storage.set(DRAWING_KEY, &drawing_json)?;
    storage.set(BACKGROUND_KEY, &background_json)?;

    info!(
        "Saved canvas ({} points, background {})",
        drawing.point_count(),
        background
    );
    Ok(())
}

/// Reads both slots. Anything short of both present yields [`LoadOutcome::NotFound`].
pub fn load_canvas(storage: &dyn Storage) -> StorageResult<LoadOutcome> {
    let (Some(drawing_json), Some(background_json)) =
        (storage.get(DRAWING_KEY)?, storage.get(BACKGROUND_KEY)?)
    else {
        debug!("No saved canvas in storage");
        return Ok(LoadOutcome::NotFound);
    };

    let drawing: Drawing =
        serde_json::from_str(&drawing_json).map_err(|source| StorageError::Serialization {
            key: DRAWING_KEY.to_string(),
            source,
        })?;
    let background: Color =
        serde_json::from_str(&background_json).map_err(|source| StorageError::Serialization {
            key: BACKGROUND_KEY.to_string(),
            source,
        })?;

    info!(
        "Loaded canvas ({} points, background {})",
        drawing.point_count(),
        background
    );
    Ok(LoadOutcome::Loaded {
        drawing,
        background,
    })
}

/// Removes both slots.
pub fn clear_saved(storage: &dyn Storage) -> StorageResult<ClearOutcome> {
    let outcome = ClearOutcome {
        removed_drawing: storage.remove(DRAWING_KEY)?,
        removed_background: storage.remove(BACKGROUND_KEY)?,
    };
    info!(
        "Cleared storage (drawing removed: {}, background removed: {})",
        outcome.removed_drawing, outcome.removed_background
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests;
