use serde_json::Value as JsonValue;

use crate::error::{CoreError, CoreErrorCode};
use crate::value::type_name;

/// Decode a little-endian base-256 byte array into an integer. An empty
/// array decodes to 0. Elements must be integers in 0..=255.
pub fn decode_int(values: &[JsonValue]) -> Result<i128, CoreError> {
    let mut result: i128 = 0;
    for value in values.iter().rev() {
        let byte = element_byte(value)?;
        result = result
            .checked_mul(256)
            .and_then(|v| v.checked_add(i128::from(byte)))
            .ok_or_else(|| {
                CoreError::new(
                    CoreErrorCode::Range,
                    format!("byte array of {} elements overflows the editor's integer range", values.len()),
                )
            })?;
    }
    Ok(result)
}

/// Encode a non-negative integer as a little-endian base-256 byte array.
/// Zero encodes as `[0]`; the output never carries a superfluous
/// most-significant zero byte.
pub fn encode_int(value: i128) -> Result<Vec<u8>, CoreError> {
    if value < 0 {
        return Err(CoreError::new(
            CoreErrorCode::Range,
            format!("cannot byte-array encode negative value {value}"),
        ));
    }
    if value == 0 {
        return Ok(vec![0]);
    }
    let mut out = Vec::new();
    let mut rest = value;
    while rest > 0 {
        out.push((rest % 256) as u8);
        rest /= 256;
    }
    Ok(out)
}

/// Render an encoded byte array as the JSON value stored in the save.
pub fn to_json(bytes: &[u8]) -> JsonValue {
    JsonValue::Array(bytes.iter().map(|&b| JsonValue::from(b)).collect())
}

fn element_byte(value: &JsonValue) -> Result<u8, CoreError> {
    let number = value.as_i64().ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::Validation,
            format!("byte array element must be an integer, found {}", type_name(value)),
        )
    })?;
    u8::try_from(number).map_err(|_| {
        CoreError::new(
            CoreErrorCode::Validation,
            format!("byte array element {number} is outside 0..=255"),
        )
    })
}
