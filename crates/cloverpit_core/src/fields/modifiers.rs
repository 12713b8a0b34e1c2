use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::codec::SaveDocument;
use crate::error::{CoreError, CoreErrorCode};
use crate::value::{self, type_name};

pub const IDENTIFIER_KEY: &str = "runModifierIdentifierAsString";

const LIST_KEY: &str = "_runModSavingList";

/// Every run modifier the game ships. "Add standard run modifiers" appends a
/// zero-initialized record for each name missing from the save.
pub const STANDARD_MODIFIERS: [&str; 20] = [
    "defaultModifier",
    "phoneEnhancer",
    "redButtonOverload",
    "smallerStore",
    "smallItemPool",
    "interestsGrow",
    "lessSpaceMoreDiscount",
    "smallRoundsMoreRounds",
    "oneRoundPerDeadline",
    "headStart",
    "extraPacks",
    "_666BigBetDouble_SmallBetNoone",
    "_666DoubleChances_JackpotRecovers",
    "_666LastRoundGuaranteed",
    "drawerTableModifications",
    "drawerModGamble",
    "halven2SymbolsChances",
    "charmsRecycling",
    "allCharmsStoreModded",
    "bigDebt",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModifierValues {
    pub identifier: String,
    pub owned_count: i64,
    pub unlocked_times: i64,
    pub played_times: i64,
    pub won_times: i64,
    pub foil_level: i64,
}

impl ModifierValues {
    pub fn fresh(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            owned_count: 0,
            unlocked_times: 0,
            played_times: 0,
            won_times: 0,
            foil_level: 0,
        }
    }
}

/// One row per record already in the save, in stored order.
pub(crate) fn project(doc: &SaveDocument) -> Result<Vec<ModifierValues>, CoreError> {
    let Some(records) = value::get_array(doc, LIST_KEY)? else {
        return Ok(Vec::new());
    };
    let mut out = Vec::with_capacity(records.len());
    for record in records {
        let record = record.as_object().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("{LIST_KEY} entries must be objects, found {}", type_name(record)),
            )
        })?;
        out.push(ModifierValues {
            identifier: value::get_str(record, IDENTIFIER_KEY)?.unwrap_or("").to_string(),
            owned_count: value::get_i64(record, "ownedCount")?.unwrap_or(0),
            unlocked_times: value::get_i64(record, "unlockedTimes")?.unwrap_or(0),
            played_times: value::get_i64(record, "playedTimes")?.unwrap_or(0),
            won_times: value::get_i64(record, "wonTimes")?.unwrap_or(0),
            foil_level: value::get_i64(record, "foilLevel")?.unwrap_or(0),
        });
    }
    Ok(out)
}

/// Update existing records in place by identifier match. Rows whose
/// identifier has no record are ignored; records are never created here.
pub(crate) fn merge(doc: &mut SaveDocument, rows: &[ModifierValues]) -> Result<(), CoreError> {
    let Some(records) = value::get_array_mut(doc, LIST_KEY)? else {
        return Ok(());
    };
    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else {
            continue;
        };
        let Some(row) = value::get_str(obj, IDENTIFIER_KEY)?
            .and_then(|identifier| rows.iter().find(|row| row.identifier == identifier))
        else {
            continue;
        };
        obj.insert("ownedCount".to_string(), JsonValue::from(row.owned_count));
        obj.insert("unlockedTimes".to_string(), JsonValue::from(row.unlocked_times));
        obj.insert("playedTimes".to_string(), JsonValue::from(row.played_times));
        obj.insert("wonTimes".to_string(), JsonValue::from(row.won_times));
        obj.insert("foilLevel".to_string(), JsonValue::from(row.foil_level));
    }
    Ok(())
}

/// Append a zero-initialized record for every standard modifier missing from
/// the list, creating the list itself if absent. Returns how many were added.
pub(crate) fn add_standard(doc: &mut SaveDocument) -> Result<usize, CoreError> {
    if !doc.contains_key(LIST_KEY) {
        doc.insert(LIST_KEY.to_string(), JsonValue::Array(Vec::new()));
    }
    let existing: Vec<String> = {
        let records = value::get_array(doc, LIST_KEY)?.expect("list inserted above");
        let mut names = Vec::with_capacity(records.len());
        for record in records {
            if let Some(obj) = record.as_object() {
                names.push(value::get_str(obj, IDENTIFIER_KEY)?.unwrap_or("").to_string());
            }
        }
        names
    };

    let mut added = 0;
    let records = value::get_array_mut(doc, LIST_KEY)?.expect("list inserted above");
    for name in STANDARD_MODIFIERS {
        if existing.iter().any(|existing| existing == name) {
            continue;
        }
        records.push(record_to_json(&ModifierValues::fresh(name)));
        added += 1;
    }
    Ok(added)
}

fn record_to_json(row: &ModifierValues) -> JsonValue {
    let mut record = JsonMap::new();
    record.insert(IDENTIFIER_KEY.to_string(), JsonValue::from(row.identifier.as_str()));
    record.insert("ownedCount".to_string(), JsonValue::from(row.owned_count));
    record.insert("unlockedTimes".to_string(), JsonValue::from(row.unlocked_times));
    record.insert("playedTimes".to_string(), JsonValue::from(row.played_times));
    record.insert("wonTimes".to_string(), JsonValue::from(row.won_times));
    record.insert("foilLevel".to_string(), JsonValue::from(row.foil_level));
    JsonValue::Object(record)
}
