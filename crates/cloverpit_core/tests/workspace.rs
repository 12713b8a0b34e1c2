use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use cloverpit_core::{CoreErrorCode, SaveDocument, Workspace, codec};
use serde_json::json;

fn doc(value: serde_json::Value) -> SaveDocument {
    value
        .as_object()
        .cloned()
        .expect("fixture root must be an object")
}

fn sample() -> SaveDocument {
    doc(json!({
        "gameplayData": {
            "cloverTickets": 12,
            "spinsLeft": 4
        },
        "drawersUnlocked": [true, false, false, false]
    }))
}

fn temp_save_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.json", std::process::id(), nanos))
}

fn write_fixture(prefix: &str) -> PathBuf {
    let path = temp_save_path(prefix);
    let raw = codec::encode(&sample()).expect("failed to encode fixture");
    fs::write(&path, raw).expect("failed to write fixture");
    path
}

#[test]
fn fresh_workspace_has_nothing_loaded() {
    let workspace = Workspace::new();
    assert!(!workspace.is_loaded());
    let err = workspace.session().expect_err("no session before load");
    assert_eq!(err.code, CoreErrorCode::NotLoaded);
    let err = workspace.save().expect_err("save before load must fail");
    assert_eq!(err.code, CoreErrorCode::NotLoaded);
}

#[test]
fn load_edit_save_round_trip() {
    let path = write_fixture("cloverpit_ws_roundtrip");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    workspace.load().expect("failed to load fixture");
    assert!(workspace.is_loaded());

    workspace
        .session_mut()
        .expect("session after load")
        .unlock_all_drawers();
    workspace.save().expect("failed to save in place");

    let raw = fs::read(&path).expect("failed to re-read save");
    let document = codec::decode(&raw).expect("failed to decode saved file");
    assert_eq!(document["drawersUnlocked"], json!([true, true, true, true]));

    fs::remove_file(&path).ok();
}

#[test]
fn save_to_writes_elsewhere_and_keeps_selection() {
    let path = write_fixture("cloverpit_ws_saveto");
    let out = temp_save_path("cloverpit_ws_saveto_out");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    workspace.load().expect("failed to load fixture");
    workspace.save_to(&out).expect("failed to save to output path");

    assert_eq!(workspace.path(), Some(path.as_path()));
    let raw = fs::read(&out).expect("failed to read output file");
    assert_eq!(
        codec::decode(&raw).expect("failed to decode output"),
        sample()
    );

    fs::remove_file(&path).ok();
    fs::remove_file(&out).ok();
}

#[test]
fn backup_is_a_plain_byte_copy() {
    let path = write_fixture("cloverpit_ws_backup");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    let backup = workspace.create_backup().expect("failed to create backup");
    assert_eq!(backup, workspace.backup_path().expect("backup path"));
    assert!(backup.to_string_lossy().ends_with(".backup"));

    let original = fs::read(&path).expect("failed to read save");
    let copied = fs::read(&backup).expect("failed to read backup");
    assert_eq!(copied, original);

    fs::remove_file(&path).ok();
    fs::remove_file(&backup).ok();
}

#[test]
fn restore_backup_overwrites_live_file_and_reloads() {
    let path = write_fixture("cloverpit_ws_restore");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    workspace.load().expect("failed to load fixture");
    workspace.create_backup().expect("failed to create backup");

    workspace
        .session_mut()
        .expect("session after load")
        .unlock_all_drawers();
    workspace.save().expect("failed to save mutation");

    workspace.restore_backup().expect("failed to restore backup");
    let drawers = &workspace
        .session()
        .expect("session after restore")
        .document()["drawersUnlocked"];
    assert_eq!(drawers, &json!([true, false, false, false]));

    fs::remove_file(workspace.backup_path().expect("backup path")).ok();
    fs::remove_file(&path).ok();
}

#[test]
fn load_of_missing_file_is_an_io_error() {
    let mut workspace = Workspace::new();
    workspace.select(temp_save_path("cloverpit_ws_missing"));
    let err = workspace.load().expect_err("missing file must not load");
    assert_eq!(err.code, CoreErrorCode::Io);
    assert!(!workspace.is_loaded());
}

#[test]
fn load_of_corrupt_file_leaves_nothing_loaded() {
    let path = temp_save_path("cloverpit_ws_corrupt");
    fs::write(&path, codec::mask(&[0xff, 0xfe, 0x00])).expect("failed to write corrupt file");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    let err = workspace.load().expect_err("corrupt file must not load");
    assert_eq!(err.code, CoreErrorCode::Decode);
    assert!(!workspace.is_loaded());

    fs::remove_file(&path).ok();
}

#[test]
fn restore_without_backup_is_an_io_error() {
    let path = write_fixture("cloverpit_ws_nobackup");

    let mut workspace = Workspace::new();
    workspace.select(&path);
    let err = workspace
        .restore_backup()
        .expect_err("restore without a backup must fail");
    assert_eq!(err.code, CoreErrorCode::Io);

    fs::remove_file(&path).ok();
}
