//! Directory-backed storage: one JSON file per slot.

use super::{BACKGROUND_KEY, DRAWING_KEY, Storage, StorageError, StorageResult};
use crate::draw::{Color, Drawing};
use fs2::FileExt;
use log::{debug, warn};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

const LOCK_FILE: &str = "paintboard.lock";

/// Stores each slot as `<base_dir>/<key>.json`.
///
/// Writes go to a temporary file that is renamed over the slot, under an
/// exclusive lock on `paintboard.lock`; reads take a shared lock.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_dir: PathBuf,
}

impl FileStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Path of the file backing `key`.
    pub fn slot_path(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.base_dir.join(format!("{key}.json")))
    }

    pub fn lock_path(&self) -> PathBuf {
        self.base_dir.join(LOCK_FILE)
    }

    fn with_lock<T>(
        &self,
        exclusive: bool,
        f: impl FnOnce() -> StorageResult<T>,
    ) -> StorageResult<T> {
        let lock_path = self.lock_path();
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|err| StorageError::io(&lock_path, err))?;

        let locked = if exclusive {
            FileExt::lock_exclusive(&lock_file)
        } else {
            FileExt::lock_shared(&lock_file)
        };
        locked.map_err(|err| StorageError::io(&lock_path, err))?;

        let result = f();

        FileExt::unlock(&lock_file).unwrap_or_else(|err| {
            warn!("failed to unlock {}: {}", lock_path.display(), err)
        });

        result
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.slot_path(key)?;
        if !self.base_dir.is_dir() {
            return Ok(None);
        }

        self.with_lock(false, || match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::io(&path, err)),
        })
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.slot_path(key)?;
        fs::create_dir_all(&self.base_dir).map_err(|err| StorageError::io(&self.base_dir, err))?;

        self.with_lock(true, || {
            let tmp_path = temp_path(&path);
            write_synced(&tmp_path, value.as_bytes())?;
            fs::rename(&tmp_path, &path).map_err(|err| {
                fs::remove_file(&tmp_path).ok();
                StorageError::io(&path, err)
            })?;
            debug!("Wrote slot {} ({} bytes)", path.display(), value.len());
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> StorageResult<bool> {
        let path = self.slot_path(key)?;
        if !self.base_dir.is_dir() {
            return Ok(false);
        }

        self.with_lock(true, || match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(StorageError::io(&path, err)),
        })
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> StorageResult<()> {
    let mut file: File = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|err| StorageError::io(path, err))?;
    file.write_all(bytes)
        .and_then(|_| file.sync_all())
        .map_err(|err| StorageError::io(path, err))
}

fn temp_path(target: &Path) -> PathBuf {
    let mut candidate = target.with_extension("json.tmp");
    let mut counter = 0u32;
    while candidate.exists() {
        counter += 1;
        candidate = target.with_extension(format!("json.tmp{counter}"));
    }
    candidate
}

/// Summary of what is on disk, for `--storage-info`.
#[derive(Debug, Clone)]
pub struct StorageInspection {
    pub base_dir: PathBuf,
    pub drawing_path: PathBuf,
    pub drawing_size_bytes: Option<u64>,
    pub modified: Option<SystemTime>,
    pub background_path: PathBuf,
    pub background: Option<Color>,
    pub point_count: Option<usize>,
    pub segment_count: Option<usize>,
}

impl StorageInspection {
    /// True when a load would succeed in finding both slots.
    pub fn has_saved_canvas(&self) -> bool {
        self.drawing_size_bytes.is_some() && self.background.is_some()
    }
}

/// Inspect the slot files without modifying them.
///
/// Malformed slot contents are reported as errors.
pub fn inspect_storage(storage: &FileStorage) -> StorageResult<StorageInspection> {
    let drawing_path = storage.slot_path(DRAWING_KEY)?;
    let background_path = storage.slot_path(BACKGROUND_KEY)?;
    let metadata = fs::metadata(&drawing_path).ok();

    let mut inspection = StorageInspection {
        base_dir: storage.base_dir().to_path_buf(),
        drawing_size_bytes: metadata.as_ref().map(|m| m.len()),
        modified: metadata.as_ref().and_then(|m| m.modified().ok()),
        drawing_path,
        background_path,
        background: None,
        point_count: None,
        segment_count: None,
    };

    if let Some(raw) = storage.get(DRAWING_KEY)? {
        let drawing: Drawing =
            serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
                key: DRAWING_KEY.to_string(),
                source,
            })?;
        inspection.point_count = Some(drawing.point_count());
        inspection.segment_count = Some(drawing.segments().count());
    }

    if let Some(raw) = storage.get(BACKGROUND_KEY)? {
        let color: Color =
            serde_json::from_str(&raw).map_err(|source| StorageError::Serialization {
                key: BACKGROUND_KEY.to_string(),
                source,
            })?;
        inspection.background = Some(color);
    }

    Ok(inspection)
}
