//! Whole-document convenience operations: the unlock buttons, the standard
//! modifier fill, and the phone transformation.

use serde_json::Value as JsonValue;

use crate::codec::SaveDocument;
use crate::error::CoreError;
use crate::value;

use super::modifiers;
use super::slots::EMPTY_SENTINEL;
use super::{gameplay_data, gameplay_data_mut};

/// The five equip-slot items whose simultaneous presence is the normal
/// precondition for the phone transformation.
pub const SKELETON_PARTS: [&str; 5] = [
    "Skeleton_Head",
    "Skeleton_Arm1",
    "Skeleton_Arm2",
    "Skeleton_Leg1",
    "Skeleton_Leg2",
];

/// Ability pool offered by the transformed ("holy") phone.
pub const HOLY_ABILITIES: &str = "holyGeneric_SpawnSacredCharm,holyPatternsValue_3LessElements,holyGeneric_MultiplierSymbols_1,holyGeneric_ReduceChargesNeeded_ForRedButtonCharms";

const POWERUPS_KEY: &str = "powerupsData";
const UNLOCKED_KEY: &str = "_unlockedPowerupsString";
const DRAWERS_KEY: &str = "drawersUnlocked";
const SKELETON_KEY: &str = "equippedPowerups_Skeleton";

/// All powerup identifiers known to the save, sorted for display.
pub fn powerup_names(doc: &SaveDocument) -> Result<Vec<String>, CoreError> {
    let mut names = collect_powerup_names(doc)?;
    names.sort();
    Ok(names)
}

/// Rewrite `_unlockedPowerupsString` to cover every powerup the save knows
/// about. Returns how many powerups the string now names.
pub fn unlock_all_powerups(doc: &mut SaveDocument) -> Result<usize, CoreError> {
    let names = collect_powerup_names(doc)?;
    let unlocked = format!("undefined,{}", names.join(","));
    doc.insert(UNLOCKED_KEY.to_string(), JsonValue::from(unlocked));
    Ok(names.len())
}

pub fn unlock_all_drawers(doc: &mut SaveDocument) {
    doc.insert(
        DRAWERS_KEY.to_string(),
        JsonValue::Array(vec![JsonValue::from(true); 4]),
    );
}

/// See [`modifiers::STANDARD_MODIFIERS`]. Returns how many records were
/// appended; prior records and their counters are untouched.
pub fn add_standard_run_modifiers(doc: &mut SaveDocument) -> Result<usize, CoreError> {
    modifiers::add_standard(doc)
}

/// Whether all five skeleton parts are currently equipped. A shell should
/// ask the user to confirm the transformation when this is false.
pub fn has_complete_skeleton(doc: &SaveDocument) -> Result<bool, CoreError> {
    let gd = gameplay_data(doc)?;
    let Some(equipped) = value::get_array(gd, SKELETON_KEY)? else {
        return Ok(false);
    };
    Ok(SKELETON_PARTS
        .iter()
        .all(|part| equipped.iter().any(|entry| entry.as_str() == Some(*part))))
}

/// Flip the phone from possessed (666) to holy (999): set the
/// transformation flags and counters and replace the ability pool. The
/// special-calls counter is raised to at least 1, never decreased.
pub fn transform_phone_holy(doc: &mut SaveDocument) -> Result<(), CoreError> {
    let special_calls = {
        let gd = gameplay_data(doc)?;
        value::get_i64(gd, "_phone_SpecialCalls_Counter")?.unwrap_or(0)
    };
    let gd = gameplay_data_mut(doc)?;
    gd.insert("_phoneAlreadyTransformed".to_string(), JsonValue::from(true));
    gd.insert("_phone_bookSpecialCall".to_string(), JsonValue::from(true));
    gd.insert("_phone_EvilCallsIgnored_Counter".to_string(), JsonValue::from(3));
    gd.insert("phoneEasyCounter_SkippedCalls_Evil".to_string(), JsonValue::from(3));
    gd.insert(
        "_phone_SpecialCalls_Counter".to_string(),
        JsonValue::from(special_calls.max(1)),
    );
    gd.insert(
        "_phone_AbilitiesToPick_String".to_string(),
        JsonValue::from(HOLY_ABILITIES),
    );
    gd.insert("_phone_lastAbilityCategory".to_string(), JsonValue::from(2));
    Ok(())
}

/// Powerup identifiers in stored order, skipping blanks and the empty-slot
/// sentinel.
fn collect_powerup_names(doc: &SaveDocument) -> Result<Vec<String>, CoreError> {
    let gd = gameplay_data(doc)?;
    let Some(records) = value::get_array(gd, POWERUPS_KEY)? else {
        return Ok(Vec::new());
    };
    let mut names = Vec::new();
    for record in records {
        let Some(obj) = record.as_object() else {
            continue;
        };
        let Some(name) = value::get_str(obj, "powerupIdentifierAsString")? else {
            continue;
        };
        if !name.is_empty() && name != EMPTY_SENTINEL {
            names.push(name.to_string());
        }
    }
    Ok(names)
}
