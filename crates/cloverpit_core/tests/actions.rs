use cloverpit_core::fields::actions::{self, HOLY_ABILITIES, SKELETON_PARTS};
use cloverpit_core::fields::{IDENTIFIER_KEY, STANDARD_MODIFIERS};
use cloverpit_core::{CoreErrorCode, SaveDocument};
use serde_json::{Value as JsonValue, json};

fn doc(value: JsonValue) -> SaveDocument {
    value
        .as_object()
        .cloned()
        .expect("fixture root must be an object")
}

fn with_powerups() -> SaveDocument {
    doc(json!({
        "gameplayData": {
            "powerupsData": [
                {"powerupIdentifierAsString": "luckyCharm"},
                {"powerupIdentifierAsString": "horseshoe"},
                {"powerupIdentifierAsString": "undefined"},
                {"powerupIdentifierAsString": ""},
                {"powerupIdentifierAsString": "magnet"}
            ]
        }
    }))
}

#[test]
fn unlock_all_drawers_overwrites_with_four_true() {
    let mut document = doc(json!({"drawersUnlocked": [true, false, false, false]}));
    actions::unlock_all_drawers(&mut document);
    assert_eq!(document["drawersUnlocked"], json!([true, true, true, true]));
}

#[test]
fn unlock_all_powerups_builds_prefixed_csv_in_stored_order() {
    let mut document = with_powerups();
    let count = actions::unlock_all_powerups(&mut document)
        .expect("failed to unlock powerups");
    assert_eq!(count, 3);
    assert_eq!(
        document["_unlockedPowerupsString"],
        json!("undefined,luckyCharm,horseshoe,magnet")
    );
}

#[test]
fn powerup_names_are_sorted_for_display() {
    let names = actions::powerup_names(&with_powerups()).expect("failed to list powerups");
    assert_eq!(names, vec!["horseshoe", "luckyCharm", "magnet"]);
}

#[test]
fn add_standard_modifiers_is_a_union_without_duplicates() {
    let mut document = doc(json!({
        "gameplayData": {},
        "_runModSavingList": [
            {
                "runModifierIdentifierAsString": "headStart",
                "ownedCount": 5,
                "unlockedTimes": 2,
                "playedTimes": 9,
                "wonTimes": 1,
                "foilLevel": 0
            },
            {
                "runModifierIdentifierAsString": "customCommunityMod",
                "ownedCount": 1,
                "unlockedTimes": 0,
                "playedTimes": 0,
                "wonTimes": 0,
                "foilLevel": 3
            }
        ]
    }));

    let added = actions::add_standard_run_modifiers(&mut document)
        .expect("failed to add standard modifiers");
    assert_eq!(added, STANDARD_MODIFIERS.len() - 1);

    let records = document["_runModSavingList"]
        .as_array()
        .expect("_runModSavingList must be an array");
    assert_eq!(records.len(), STANDARD_MODIFIERS.len() + 1);

    let mut identifiers: Vec<&str> = records
        .iter()
        .filter_map(|record| record[IDENTIFIER_KEY].as_str())
        .collect();
    identifiers.sort_unstable();
    let before = identifiers.len();
    identifiers.dedup();
    assert_eq!(identifiers.len(), before, "no duplicate identifiers");
    for name in STANDARD_MODIFIERS {
        assert!(identifiers.contains(&name), "missing {name}");
    }
    assert!(identifiers.contains(&"customCommunityMod"));

    let head_start = records
        .iter()
        .find(|record| record[IDENTIFIER_KEY] == json!("headStart"))
        .expect("prior record survives");
    assert_eq!(head_start["ownedCount"], json!(5), "prior counters untouched");
    assert_eq!(head_start["playedTimes"], json!(9));
}

#[test]
fn add_standard_modifiers_creates_the_list_when_absent() {
    let mut document = doc(json!({"gameplayData": {}}));
    let added = actions::add_standard_run_modifiers(&mut document)
        .expect("failed to add standard modifiers");
    assert_eq!(added, STANDARD_MODIFIERS.len());

    let records = document["_runModSavingList"]
        .as_array()
        .expect("_runModSavingList must be an array");
    assert_eq!(records.len(), STANDARD_MODIFIERS.len());
    assert_eq!(records[0]["ownedCount"], json!(0));
}

#[test]
fn running_add_standard_modifiers_twice_changes_nothing() {
    let mut document = doc(json!({"gameplayData": {}}));
    actions::add_standard_run_modifiers(&mut document)
        .expect("failed to add standard modifiers");
    let after_first = document.clone();
    let added = actions::add_standard_run_modifiers(&mut document)
        .expect("failed to re-run the action");
    assert_eq!(added, 0);
    assert_eq!(document, after_first);
}

#[test]
fn complete_skeleton_is_detected() {
    let parts: Vec<&str> = SKELETON_PARTS.to_vec();
    let document = doc(json!({
        "gameplayData": {"equippedPowerups_Skeleton": parts}
    }));
    assert!(actions::has_complete_skeleton(&document).expect("failed to check skeleton"));

    let partial = doc(json!({
        "gameplayData": {
            "equippedPowerups_Skeleton": ["Skeleton_Head", "undefined", "undefined", "undefined", "undefined"]
        }
    }));
    assert!(!actions::has_complete_skeleton(&partial).expect("failed to check skeleton"));

    let missing = doc(json!({"gameplayData": {}}));
    assert!(!actions::has_complete_skeleton(&missing).expect("failed to check skeleton"));
}

#[test]
fn phone_transform_sets_flags_and_ability_pool() {
    let mut document = doc(json!({
        "gameplayData": {"_phone_SpecialCalls_Counter": 0}
    }));
    actions::transform_phone_holy(&mut document).expect("failed to transform phone");

    let gd = document["gameplayData"]
        .as_object()
        .expect("gameplayData must be an object");
    assert_eq!(gd["_phoneAlreadyTransformed"], json!(true));
    assert_eq!(gd["_phone_bookSpecialCall"], json!(true));
    assert_eq!(gd["_phone_EvilCallsIgnored_Counter"], json!(3));
    assert_eq!(gd["phoneEasyCounter_SkippedCalls_Evil"], json!(3));
    assert_eq!(gd["_phone_SpecialCalls_Counter"], json!(1));
    assert_eq!(gd["_phone_AbilitiesToPick_String"], json!(HOLY_ABILITIES));
    assert_eq!(gd["_phone_lastAbilityCategory"], json!(2));
}

#[test]
fn phone_transform_never_decreases_special_calls() {
    let mut document = doc(json!({
        "gameplayData": {"_phone_SpecialCalls_Counter": 5}
    }));
    actions::transform_phone_holy(&mut document).expect("failed to transform phone");
    assert_eq!(
        document["gameplayData"]["_phone_SpecialCalls_Counter"],
        json!(5)
    );
}

#[test]
fn phone_transform_requires_gameplay_data() {
    let mut document = doc(json!({}));
    let err = actions::transform_phone_holy(&mut document)
        .expect_err("transform needs gameplayData");
    assert_eq!(err.code, CoreErrorCode::Validation);
}
