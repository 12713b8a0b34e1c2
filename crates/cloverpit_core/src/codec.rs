use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{CoreError, CoreErrorCode};
use crate::value::type_name;

/// Decoded save state. The root of a Clover Pit save is always a JSON
/// object; `preserve_order` keeps the file's own key order through a
/// decode/encode round trip.
pub type SaveDocument = JsonMap<String, JsonValue>;

/// Repeating XOR key applied byte-wise to the on-disk file. The game uses
/// the same transform in both directions; there is no key derivation or
/// format versioning.
pub const XOR_KEY: [u8; 27] = [
    0x48, 0x06, 0x5c, 0x11, 0x06, 0x43, 0x01, 0x60, 0x18, 0x55, 0x42, 0x18, 0x19, 0x1a, 0x00,
    0x4a, 0x5a, 0x1a, 0x00, 0x51, 0x56, 0x46, 0x4e, 0x47, 0x0c, 0x1b, 0x01,
];

/// Apply the XOR mask. Self-inverse: masking twice returns the input.
pub fn mask(data: &[u8]) -> Vec<u8> {
    data.iter()
        .enumerate()
        .map(|(i, byte)| byte ^ XOR_KEY[i % XOR_KEY.len()])
        .collect()
}

/// Unmask raw file bytes and parse the underlying JSON document.
pub fn decode(raw: &[u8]) -> Result<SaveDocument, CoreError> {
    let plain = mask(raw);
    let text = String::from_utf8(plain).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Decode,
            format!("save is not valid UTF-8 after unmasking: {e}"),
        )
    })?;
    parse_text(&text)
}

/// Serialize the document compactly (no extra whitespace, key order as
/// stored) and apply the XOR mask.
pub fn encode(doc: &SaveDocument) -> Result<Vec<u8>, CoreError> {
    let text = serde_json::to_string(doc).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Parse,
            format!("failed to serialize save document: {e}"),
        )
    })?;
    Ok(mask(text.as_bytes()))
}

/// Parse editor-facing JSON text into a save document. The root must be an
/// object.
pub fn parse_text(text: &str) -> Result<SaveDocument, CoreError> {
    let value: JsonValue = serde_json::from_str(text).map_err(|e| {
        CoreError::new(CoreErrorCode::Parse, format!("invalid JSON: {e}"))
    })?;
    match value {
        JsonValue::Object(map) => Ok(map),
        other => Err(CoreError::new(
            CoreErrorCode::Parse,
            format!("save root must be a JSON object, found {}", type_name(&other)),
        )),
    }
}

/// Pretty-print the document for the raw text view (2-space indent).
pub fn to_pretty_text(doc: &SaveDocument) -> Result<String, CoreError> {
    serde_json::to_string_pretty(doc).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Parse,
            format!("failed to render save document: {e}"),
        )
    })
}
