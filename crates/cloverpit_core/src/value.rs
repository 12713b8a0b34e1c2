//! Typed lookups over the loosely-typed save document.
//!
//! Every accessor distinguishes a missing field (`Ok(None)`) from a field
//! that is present with the wrong JSON type (`Err` with a `Validation`
//! code), so callers apply their defaults only when a field is genuinely
//! absent.

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{CoreError, CoreErrorCode};

pub fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}

pub fn get_i64(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<Option<i64>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => as_i64(value)
            .map(Some)
            .ok_or_else(|| wrong_type(key, "integer", value)),
    }
}

pub fn get_f64(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<Option<f64>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "number", value)),
    }
}

pub fn get_bool(obj: &JsonMap<String, JsonValue>, key: &str) -> Result<Option<bool>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_bool()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "boolean", value)),
    }
}

pub fn get_str<'a>(
    obj: &'a JsonMap<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a str>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "string", value)),
    }
}

pub fn get_array<'a>(
    obj: &'a JsonMap<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a Vec<JsonValue>>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_array()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "array", value)),
    }
}

pub fn get_array_mut<'a>(
    obj: &'a mut JsonMap<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a mut Vec<JsonValue>>, CoreError> {
    match obj.get_mut(key) {
        None => Ok(None),
        Some(value) => {
            if value.is_array() {
                Ok(value.as_array_mut())
            } else {
                Err(wrong_type(key, "array", value))
            }
        }
    }
}

pub fn get_object<'a>(
    obj: &'a JsonMap<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a JsonMap<String, JsonValue>>, CoreError> {
    match obj.get(key) {
        None => Ok(None),
        Some(value) => value
            .as_object()
            .map(Some)
            .ok_or_else(|| wrong_type(key, "object", value)),
    }
}

pub fn get_object_mut<'a>(
    obj: &'a mut JsonMap<String, JsonValue>,
    key: &str,
) -> Result<Option<&'a mut JsonMap<String, JsonValue>>, CoreError> {
    match obj.get_mut(key) {
        None => Ok(None),
        Some(value) => {
            if value.is_object() {
                Ok(value.as_object_mut())
            } else {
                Err(wrong_type(key, "object", value))
            }
        }
    }
}

/// Saves written by older game builds store some counters as floats with a
/// zero fraction; accept those alongside plain integers.
fn as_i64(value: &JsonValue) -> Option<i64> {
    if let Some(v) = value.as_i64() {
        return Some(v);
    }
    match value.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
            Some(f as i64)
        }
        _ => None,
    }
}

fn wrong_type(key: &str, expected: &str, found: &JsonValue) -> CoreError {
    CoreError::new(
        CoreErrorCode::Validation,
        format!("field `{key}`: expected {expected}, found {}", type_name(found)),
    )
}
