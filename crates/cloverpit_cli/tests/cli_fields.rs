use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

use cloverpit_core::{SaveDocument, codec};
use serde_json::json;

fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_cloverpit-se"))
        .args(args)
        .output()
        .expect("failed to run cloverpit-se CLI")
}

fn temp_path(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("{prefix}_{}_{}.json", std::process::id(), nanos))
}

fn sample() -> SaveDocument {
    json!({
        "gameplayData": {
            "coins_ByteArray": [16, 39],
            "cloverTickets": 12,
            "spinsLeft": 4,
            "maxSpins": 7,
            "symbolsData": [
                {
                    "symbolKindAsString": "cherry",
                    "extraValue_ByteArray": [5],
                    "spawnChance": 0.25,
                    "modifierChance01_Golden": 0.1,
                    "modifierChance01_InstantReward": 0.05,
                    "modifierChance01_CloverTicket": 0.02
                }
            ],
            "patternsData": [
                {"patternKindAsString": "jackpot", "extraValue": 2.0}
            ],
            "patternsAvailable_AsString": ["jackpot"],
            "equippedPowerups": ["luckyCharm", "undefined", "horseshoe"],
            "powerupsData": [
                {"powerupIdentifierAsString": "luckyCharm"},
                {"powerupIdentifierAsString": "horseshoe"}
            ],
            "powerupLuck": 1.5
        },
        "drawersUnlocked": [true, false, false, false],
        "_runModSavingList": [
            {
                "runModifierIdentifierAsString": "headStart",
                "ownedCount": 5,
                "unlockedTimes": 2,
                "playedTimes": 9,
                "wonTimes": 1,
                "foilLevel": 0
            }
        ]
    })
    .as_object()
    .cloned()
    .expect("fixture root must be an object")
}

fn write_fixture(prefix: &str) -> PathBuf {
    let path = temp_path(prefix);
    let raw = codec::encode(&sample()).expect("failed to encode fixture");
    fs::write(&path, raw).expect("failed to write fixture");
    path
}

#[test]
fn cli_prints_single_coins_field() {
    let path = write_fixture("cloverpit_cli_coins");
    let output = run_cli(&["--coins", &path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout.trim(), "coins=10000");

    fs::remove_file(&path).ok();
}

#[test]
fn cli_prints_multiple_requested_fields_in_fixed_order() {
    let path = write_fixture("cloverpit_cli_multi");
    let output = run_cli(&["--spins-left", "--clover-tickets", &path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["clover_tickets=12", "spins_left=4"]);

    fs::remove_file(&path).ok();
}

#[test]
fn cli_prints_symbol_and_pattern_rows() {
    let path = write_fixture("cloverpit_cli_rows");
    let output = run_cli(&["--symbols", "--patterns", &path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("symbol=cherry extra=5 spawn=0.25"));
    assert!(stdout.contains("symbol=lemon (no record)"));
    assert!(stdout.contains("pattern=jackpot on extra=2"));
    assert!(stdout.contains("pattern=eye off (no record)"));

    fs::remove_file(&path).ok();
}

#[test]
fn cli_without_field_flags_prints_summary_sheet() {
    let path = write_fixture("cloverpit_cli_sheet");
    let output = run_cli(&[&path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("CLOVER PIT"));
    assert!(stdout.contains("::: Currency :::"));
    assert!(stdout.contains("Coins: 10,000"));
    assert!(stdout.contains("::: Run Modifiers :::"));
    assert!(stdout.contains("headStart"));

    fs::remove_file(&path).ok();
}

#[test]
fn cli_json_dumps_pretty_document() {
    let path = write_fixture("cloverpit_cli_json");
    let output = run_cli(&["--json", &path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"gameplayData\""));
    assert!(stdout.contains("\n  "));
    let parsed: serde_json::Value =
        serde_json::from_str(stdout.trim()).expect("CLI JSON output must parse");
    assert_eq!(parsed["gameplayData"]["cloverTickets"], json!(12));

    fs::remove_file(&path).ok();
}

#[test]
fn cli_quick_fields_lists_dotted_paths() {
    let path = write_fixture("cloverpit_cli_quick");
    let output = run_cli(&["--quick-fields", &path.to_string_lossy()]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("gameplayData.cloverTickets=12"));
    assert!(stdout.contains("gameplayData.powerupLuck=1.5"));

    fs::remove_file(&path).ok();
}

#[test]
fn cli_rejects_unknown_pattern_name() {
    let path = write_fixture("cloverpit_cli_badpattern");
    let output = run_cli(&[
        "--enable-pattern",
        "doesNotExist",
        "--in-place",
        &path.to_string_lossy(),
    ]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown pattern"));

    fs::remove_file(&path).ok();
}
