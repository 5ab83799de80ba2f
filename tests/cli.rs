use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn paintboard_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("paintboard").expect("binary exists");
    cmd.env_remove("WAYLAND_DISPLAY")
        .env("XDG_CONFIG_HOME", config_home.path());
    cmd
}

fn write_saved_canvas(dir: &std::path::Path) {
    std::fs::create_dir_all(dir).unwrap();
    std::fs::write(
        dir.join("savedCanvas.json"),
        r##"[{"x":10,"y":10,"size":"8","color":"#A51DAB","erase":false},{"x":60,"y":40,"size":8,"color":"#A51DAB","erase":false},null]"##,
    )
    .unwrap();
    std::fs::write(dir.join("backgroundColor.json"), r##""#000000""##).unwrap();
}

#[test]
fn help_prints_usage() {
    let home = TempDir::new().unwrap();
    paintboard_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Freehand drawing board for Wayland compositors",
        ));
}

#[test]
fn active_mode_requires_wayland_env() {
    let home = TempDir::new().unwrap();
    paintboard_cmd(&home)
        .arg("--active")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Wayland environment required"));
}

#[test]
fn output_requires_export_flag() {
    let home = TempDir::new().unwrap();
    paintboard_cmd(&home)
        .args(["--output", "out.png"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "required arguments were not provided",
        ));
}

#[test]
fn storage_info_reports_empty_storage() {
    let home = TempDir::new().unwrap();
    let storage = TempDir::new().unwrap();
    paintboard_cmd(&home)
        .arg("--storage-info")
        .arg("--storage-dir")
        .arg(storage.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved canvas"));
}

#[test]
fn storage_info_counts_saved_points() {
    let home = TempDir::new().unwrap();
    let storage = TempDir::new().unwrap();
    write_saved_canvas(storage.path());

    paintboard_cmd(&home)
        .arg("--storage-info")
        .arg("--storage-dir")
        .arg(storage.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Points: 2"))
        .stdout(predicate::str::contains("Segments: 1"))
        .stdout(predicate::str::contains("Background: #000000"));
}

#[test]
fn export_renders_saved_canvas_to_png() {
    let home = TempDir::new().unwrap();
    let storage = TempDir::new().unwrap();
    write_saved_canvas(storage.path());
    let output = storage.path().join("out.png");

    paintboard_cmd(&home)
        .arg("--export")
        .arg("--storage-dir")
        .arg(storage.path())
        .arg("--output")
        .arg(&output)
        .args(["--width", "80", "--height", "60"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Image File Saved"));

    let bytes = std::fs::read(&output).unwrap();
    assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn export_without_saved_canvas_fails() {
    let home = TempDir::new().unwrap();
    let storage = TempDir::new().unwrap();
    paintboard_cmd(&home)
        .arg("--export")
        .arg("--storage-dir")
        .arg(storage.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No Canvas Found"));
}

#[test]
fn clear_storage_removes_both_slots() {
    let home = TempDir::new().unwrap();
    let storage = TempDir::new().unwrap();
    write_saved_canvas(storage.path());

    paintboard_cmd(&home)
        .arg("--clear-storage")
        .arg("--storage-dir")
        .arg(storage.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Local Storage Cleared"));

    assert!(!storage.path().join("savedCanvas.json").exists());
    assert!(!storage.path().join("backgroundColor.json").exists());
}
