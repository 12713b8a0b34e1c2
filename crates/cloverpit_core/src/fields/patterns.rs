use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{CoreError, CoreErrorCode};
use crate::value::{self, type_name};

/// The sixteen win patterns. `patternsAvailable_AsString` is rebuilt in this
/// order whenever availability toggles are merged back.
pub const PATTERN_NAMES: [&str; 16] = [
    "jackpot",
    "horizontal2",
    "horizontal3",
    "horizontal4",
    "horizontal5",
    "vertical2",
    "vertical3",
    "diagonal2",
    "diagonal3",
    "pyramid",
    "pyramidInverted",
    "triangle",
    "triangleInverted",
    "snakeUpDown",
    "snakeDownUp",
    "eye",
];

const KIND_KEY: &str = "patternKindAsString";
const RECORDS_KEY: &str = "patternsData";
const AVAILABLE_KEY: &str = "patternsAvailable_AsString";

pub(crate) fn project_values(
    gd: &JsonMap<String, JsonValue>,
) -> Result<[Option<f64>; 16], CoreError> {
    let mut out = [None; 16];
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
        let Some(slot) = PATTERN_NAMES.iter().position(|&name| name == kind) else {
            continue;
        };
        out[slot] = Some(value::get_f64(record, "extraValue")?.unwrap_or(0.0));
    }
    Ok(out)
}

/// Membership test per known pattern name. A missing availability array
/// projects as all-disabled.
pub(crate) fn project_available(
    gd: &JsonMap<String, JsonValue>,
) -> Result<[bool; 16], CoreError> {
    let mut out = [false; 16];
    let Some(available) = value::get_array(gd, AVAILABLE_KEY)? else {
        return Ok(out);
    };
    for (slot, name) in PATTERN_NAMES.iter().enumerate() {
        out[slot] = available.iter().any(|entry| entry.as_str() == Some(name));
    }
    Ok(out)
}

pub(crate) fn merge_values(
    gd: &mut JsonMap<String, JsonValue>,
    values: &[Option<f64>; 16],
) -> Result<(), CoreError> {
    let Some(records) = value::get_array_mut(gd, RECORDS_KEY)? else {
        return Ok(());
    };
    for record in records.iter_mut() {
        let Some(obj) = record.as_object_mut() else {
            continue;
        };
        let Some(slot) = value::get_str(obj, KIND_KEY)?
            .and_then(|kind| PATTERN_NAMES.iter().position(|&name| name == kind))
        else {
            continue;
        };
        let Some(extra_value) = values[slot] else {
            continue;
        };
        obj.insert("extraValue".to_string(), JsonValue::from(extra_value));
    }
    Ok(())
}

/// Rebuild the availability array from the enabled toggles, in the fixed
/// canonical name order.
pub(crate) fn merge_available(gd: &mut JsonMap<String, JsonValue>, enabled: &[bool; 16]) {
    let rebuilt: Vec<JsonValue> = PATTERN_NAMES
        .iter()
        .zip(enabled)
        .filter(|&(_, &on)| on)
        .map(|(&name, _)| JsonValue::from(name))
        .collect();
    gd.insert(AVAILABLE_KEY.to_string(), JsonValue::Array(rebuilt));
}
