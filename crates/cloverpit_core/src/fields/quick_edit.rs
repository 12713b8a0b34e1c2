//! Generic projection of arbitrary top-level fields onto dotted-path quick
//! edits. Rebuilt from scratch on every load; never persisted or diffed.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::codec::SaveDocument;
use crate::error::{CoreError, CoreErrorCode};
use crate::value::type_name;

/// Strings at or above this length stay in the raw document view.
pub const SHORT_STRING_LIMIT: usize = 100;

/// Objects whose compact JSON text is at or above this length are not
/// recursed into.
pub const SMALL_OBJECT_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickFieldKind {
    Boolean,
    Integer,
    Float,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickField {
    pub path: String,
    pub kind: QuickFieldKind,
    pub value: String,
}

/// Walk the document and expose every editable leaf: booleans, numbers, and
/// short strings, recursing only into small objects. Arrays and anything
/// large never become discrete fields.
pub fn project(doc: &SaveDocument) -> Vec<QuickField> {
    let mut out = Vec::new();
    walk("", doc, &mut out);
    out
}

fn walk(prefix: &str, map: &JsonMap<String, JsonValue>, out: &mut Vec<QuickField>) {
    for (key, entry) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match entry {
            JsonValue::Bool(flag) => out.push(QuickField {
                path,
                kind: QuickFieldKind::Boolean,
                value: flag.to_string(),
            }),
            JsonValue::Number(number) => out.push(QuickField {
                path,
                kind: if number.is_f64() {
                    QuickFieldKind::Float
                } else {
                    QuickFieldKind::Integer
                },
                value: number.to_string(),
            }),
            JsonValue::String(text) if text.chars().count() < SHORT_STRING_LIMIT => {
                out.push(QuickField {
                    path,
                    kind: QuickFieldKind::Text,
                    value: text.clone(),
                });
            }
            JsonValue::Object(inner) if compact_len(entry) < SMALL_OBJECT_LIMIT => {
                walk(&path, inner, out);
            }
            _ => {}
        }
    }
}

/// Coerce `raw` to the type of the existing leaf at `path` and overwrite it.
pub fn apply(doc: &mut SaveDocument, path: &str, raw: &str) -> Result<(), CoreError> {
    let coerced = coerce_for_path(doc, path, raw)?;
    write(doc, path, coerced)
}

/// All-or-nothing batch: every edit is validated against the current
/// document before any field is overwritten.
pub fn apply_batch(doc: &mut SaveDocument, edits: &[(String, String)]) -> Result<(), CoreError> {
    let mut staged = Vec::with_capacity(edits.len());
    for (path, raw) in edits {
        staged.push((path.as_str(), coerce_for_path(doc, path, raw)?));
    }
    for (path, coerced) in staged {
        write(doc, path, coerced)?;
    }
    Ok(())
}

fn coerce_for_path(doc: &SaveDocument, path: &str, raw: &str) -> Result<JsonValue, CoreError> {
    let existing = lookup(doc, path)?;
    coerce(path, existing, raw)
}

fn coerce(path: &str, existing: &JsonValue, raw: &str) -> Result<JsonValue, CoreError> {
    match existing {
        JsonValue::Bool(_) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(JsonValue::from(true)),
            "false" | "0" => Ok(JsonValue::from(false)),
            _ => Err(CoreError::new(
                CoreErrorCode::Validation,
                format!("field `{path}`: `{raw}` is not a boolean"),
            )),
        },
        JsonValue::Number(number) if !number.is_f64() => raw
            .trim()
            .parse::<i64>()
            .map(JsonValue::from)
            .map_err(|_| {
                CoreError::new(
                    CoreErrorCode::Validation,
                    format!("field `{path}`: `{raw}` is not an integer"),
                )
            }),
        JsonValue::Number(_) => raw.trim().parse::<f64>().map(JsonValue::from).map_err(|_| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("field `{path}`: `{raw}` is not a number"),
            )
        }),
        JsonValue::String(_) => Ok(JsonValue::from(raw)),
        other => Err(CoreError::new(
            CoreErrorCode::Validation,
            format!(
                "field `{path}` is {} and can only be edited through the raw document view",
                type_name(other)
            ),
        )),
    }
}

fn lookup<'a>(doc: &'a SaveDocument, path: &str) -> Result<&'a JsonValue, CoreError> {
    let (parent_path, leaf) = split_leaf(path);
    let mut current = doc;
    if let Some(parent_path) = parent_path {
        for segment in parent_path.split('.') {
            current = current
                .get(segment)
                .and_then(JsonValue::as_object)
                .ok_or_else(|| missing(path))?;
        }
    }
    current.get(leaf).ok_or_else(|| missing(path))
}

fn write(doc: &mut SaveDocument, path: &str, value: JsonValue) -> Result<(), CoreError> {
    let (parent_path, leaf) = split_leaf(path);
    let mut current = doc;
    if let Some(parent_path) = parent_path {
        for segment in parent_path.split('.') {
            current = current
                .get_mut(segment)
                .and_then(JsonValue::as_object_mut)
                .ok_or_else(|| missing(path))?;
        }
    }
    if !current.contains_key(leaf) {
        return Err(missing(path));
    }
    current.insert(leaf.to_string(), value);
    Ok(())
}

fn split_leaf(path: &str) -> (Option<&str>, &str) {
    match path.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    }
}

fn compact_len(value: &JsonValue) -> usize {
    serde_json::to_string(value).map(|text| text.len()).unwrap_or(usize::MAX)
}

fn missing(path: &str) -> CoreError {
    CoreError::new(
        CoreErrorCode::Validation,
        format!("no editable field at path `{path}`"),
    )
}
