use super::*;
use crate::draw::{BLACK, PURPLE, StrokePoint, WHITE};
use std::fs;
use tempfile::TempDir;

fn sample_drawing() -> Drawing {
    let mut drawing = Drawing::new();
    drawing.record(StrokePoint::new(0.0, 0.0, 10.0, PURPLE, false));
    drawing.record(StrokePoint::new(5.0, 5.0, 10.0, PURPLE, false));
    drawing.lift_pen();
    drawing.record(StrokePoint::new(40.0, 40.0, 50.0, WHITE, true));
    drawing.record(StrokePoint::new(60.0, 45.0, 50.0, WHITE, true));
    drawing
}

fn file_storage() -> (TempDir, FileStorage) {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path().join("store"));
    (dir, storage)
}

#[test]
fn save_then_load_round_trips_in_memory() {
    let storage = MemoryStorage::new();
    let drawing = sample_drawing();
    save_canvas(&storage, &drawing, BLACK).unwrap();

    assert_eq!(
        load_canvas(&storage).unwrap(),
        LoadOutcome::Loaded {
            drawing,
            background: BLACK
        }
    );
}

#[test]
fn save_then_load_round_trips_on_disk() {
    let (_dir, storage) = file_storage();
    let drawing = sample_drawing();
    save_canvas(&storage, &drawing, BLACK).unwrap();

    let reopened = FileStorage::new(storage.base_dir());
    assert_eq!(
        load_canvas(&reopened).unwrap(),
        LoadOutcome::Loaded {
            drawing,
            background: BLACK
        }
    );
}

#[test]
fn slots_use_local_storage_layout() {
    let (_dir, storage) = file_storage();
    save_canvas(&storage, &sample_drawing(), WHITE).unwrap();

    let background = fs::read_to_string(storage.base_dir().join("backgroundColor.json")).unwrap();
    assert_eq!(background, "\"#FFFFFF\"");

    let drawing = fs::read_to_string(storage.base_dir().join("savedCanvas.json")).unwrap();
    assert!(drawing.starts_with("[{\"x\":0.0,\"y\":0.0,\"size\":10.0,\"color\":\"#A51DAB\""));
    assert!(drawing.contains("null"));
    assert!(!storage.base_dir().join("savedCanvas.json.tmp").exists());
}

#[test]
fn load_without_save_is_not_found() {
    let (_dir, storage) = file_storage();
    assert_eq!(load_canvas(&storage).unwrap(), LoadOutcome::NotFound);
    assert!(!storage.base_dir().exists());
}

#[test]
fn load_requires_both_slots() {
    let storage = MemoryStorage::new();
    storage.set(DRAWING_KEY, "[]").unwrap();
    assert_eq!(load_canvas(&storage).unwrap(), LoadOutcome::NotFound);
}

#[test]
fn malformed_slot_is_a_serialization_error() {
    let storage = MemoryStorage::new();
    storage.set(DRAWING_KEY, "{not json").unwrap();
    storage.set(BACKGROUND_KEY, "\"#FFFFFF\"").unwrap();

    match load_canvas(&storage) {
        Err(StorageError::Serialization { key, .. }) => assert_eq!(key, DRAWING_KEY),
        other => panic!("expected serialization error, got {other:?}"),
    }
}

#[test]
fn browser_saves_with_string_sizes_load() {
    let storage = MemoryStorage::new();
    storage
        .set(
            DRAWING_KEY,
            r##"[null,{"x":1,"y":2,"size":"10","color":"#A51DAB","erase":false},{"x":3,"y":4,"size":"10","color":"#A51DAB","erase":false}]"##,
        )
        .unwrap();
    storage.set(BACKGROUND_KEY, "\"#FFFFFF\"").unwrap();

    let LoadOutcome::Loaded { drawing, background } = load_canvas(&storage).unwrap() else {
        panic!("expected a loaded canvas");
    };
    assert_eq!(background, WHITE);
    assert_eq!(drawing.point_count(), 2);
    assert_eq!(drawing.segments().count(), 1);
}

#[test]
fn browser_saves_with_empty_samples_load() {
    let storage = MemoryStorage::new();
    storage
        .set(
            DRAWING_KEY,
            r##"[{"x":1,"y":2,"size":"10","color":"#A51DAB","erase":false},{},{"x":30,"y":40,"size":"10","color":"#A51DAB","erase":false},{"x":35,"y":45,"size":"10","color":"#A51DAB","erase":false}]"##,
        )
        .unwrap();
    storage.set(BACKGROUND_KEY, "\"#000000\"").unwrap();

    let LoadOutcome::Loaded { drawing, background } = load_canvas(&storage).unwrap() else {
        panic!("expected a loaded canvas");
    };
    assert_eq!(background, BLACK);
    assert_eq!(drawing.point_count(), 3);

    let segments: Vec<_> = drawing.segments().collect();
    assert_eq!(segments.len(), 1);
    assert_eq!((segments[0].0.x, segments[0].1.x), (30.0, 35.0));
}

#[test]
fn clear_removes_both_slots() {
    let (_dir, storage) = file_storage();
    save_canvas(&storage, &sample_drawing(), WHITE).unwrap();

    let outcome = clear_saved(&storage).unwrap();
    assert!(outcome.removed_drawing);
    assert!(outcome.removed_background);
    assert_eq!(load_canvas(&storage).unwrap(), LoadOutcome::NotFound);

    let again = clear_saved(&storage).unwrap();
    assert!(!again.removed_drawing && !again.removed_background);
}

#[test]
fn invalid_keys_are_rejected() {
    let (_dir, storage) = file_storage();
    assert!(matches!(
        storage.set("../escape", "x"),
        Err(StorageError::InvalidKey(_))
    ));
}

#[test]
fn inspection_reports_counts() {
    let (_dir, storage) = file_storage();
    let empty = inspect_storage(&storage).unwrap();
    assert!(!empty.has_saved_canvas());

    save_canvas(&storage, &sample_drawing(), BLACK).unwrap();
    let inspection = inspect_storage(&storage).unwrap();
    assert!(inspection.has_saved_canvas());
    assert_eq!(inspection.point_count, Some(4));
    assert_eq!(inspection.segment_count, Some(2));
    assert_eq!(inspection.background, Some(BLACK));
}
