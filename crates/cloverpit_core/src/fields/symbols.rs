use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::byte_array;
use crate::error::{CoreError, CoreErrorCode};
use crate::value::{self, type_name};

use super::byte_array_field;

/// The seven reel symbols, in the game's display order.
pub const SYMBOL_NAMES: [&str; 7] = [
    "lemon", "cherry", "clover", "bell", "diamond", "coins", "seven",
];

const KIND_KEY: &str = "symbolKindAsString";
const RECORDS_KEY: &str = "symbolsData";

#[derive(Debug, Clone, PartialEq)]
pub struct SymbolValues {
    pub extra_value: i128,
    pub spawn_chance: f64,
    pub golden_chance: f64,
    pub instant_reward_chance: f64,
    pub clover_ticket_chance: f64,
}

/// One entry per known symbol name, `None` when the save has no record for
/// that symbol. Records for unknown symbol names are left untouched.
pub(crate) fn project(
    gd: &JsonMap<String, JsonValue>,
) -> Result<[Option<SymbolValues>; 7], CoreError> {
    let mut out: [Option<SymbolValues>; 7] = Default::default();
    let Some(records) = value::get_array(gd, RECORDS_KEY)? else {
        return Ok(out);
    };
    for record in records {
        let record = record.as_object().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("{RECORDS_KEY} entries must be objects, found {}", type_name(record)),
            )
        })?;
        let Some(kind) = value::get_str(record, KIND_KEY)? else {
            continue;
        };
        let Some(slot) = SYMBOL_NAMES.iter().position(|&name| name == kind) else {
            continue;
        };
        out[slot] = Some(SymbolValues {
            extra_value: byte_array_field(record, "extraValue_ByteArray", 0)?,
            spawn_chance: value::get_f64(record, "spawnChance")?.unwrap_or(0.0),
            golden_chance: value::get_f64(record, "modifierChance01_Golden")?.unwrap_or(0.0),
            instant_reward_chance: value::get_f64(record, "modifierChance01_InstantReward")?
                .unwrap_or(0.0),
            clover_ticket_chance: value::get_f64(record, "modifierChance01_CloverTicket")?
                .unwrap_or(0.0),
        });
    }
    Ok(out)
}

/// Write edited values back into matching records. A symbol with no record
/// in the save is skipped; records are never synthesized here.
pub(crate) fn merge(
    gd: &mut JsonMap<String, JsonValue>,
    symbols: &[Option<SymbolValues>; 7],
) -> Result<(), CoreError> {
    let Some(records) = value::get_array_mut(gd, RECORDS_KEY)? else {
        return Ok(());
    };
    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else {
            continue;
        };
        let Some(slot) = value::get_str(obj, KIND_KEY)?
            .and_then(|kind| SYMBOL_NAMES.iter().position(|&name| name == kind))
        else {
            continue;
        };
        let Some(values) = &symbols[slot] else {
            continue;
        };
        let extra = byte_array::encode_int(values.extra_value)?;
        obj.insert(
            "extraValue_ByteArray".to_string(),
            byte_array::to_json(&extra),
        );
        obj.insert("spawnChance".to_string(), JsonValue::from(values.spawn_chance));
        obj.insert(
            "modifierChance01_Golden".to_string(),
            JsonValue::from(values.golden_chance),
        );
        obj.insert(
            "modifierChance01_InstantReward".to_string(),
            JsonValue::from(values.instant_reward_chance),
        );
        obj.insert(
            "modifierChance01_CloverTicket".to_string(),
            JsonValue::from(values.clover_ticket_chance),
        );
    }
    Ok(())
}
