use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::error::{CoreError, CoreErrorCode};
use crate::value::{self, type_name};

pub const EQUIPPED_SLOTS: usize = 30;
pub const STORE_SLOTS: usize = 4;
pub const DRAWER_SLOTS: usize = 4;
pub const SKELETON_SLOTS: usize = 5;

/// The game stores an empty slot as the literal string "undefined".
pub const EMPTY_SENTINEL: &str = "undefined";

/// A fixed-capacity powerup slot array. Blank entries are empty slots; the
/// sentinel never appears here, it is translated at the document boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotArray {
    slots: Vec<String>,
}

impl SlotArray {
    pub fn empty(capacity: usize) -> Self {
        Self {
            slots: vec![String::new(); capacity],
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn slots(&self) -> &[String] {
        &self.slots
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.slots.get(index).map(String::as_str)
    }

    pub fn set(&mut self, index: usize, name: impl Into<String>) -> Result<(), CoreError> {
        let capacity = self.capacity();
        let slot = self.slots.get_mut(index).ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("slot index {index} is outside 0..{capacity}"),
            )
        })?;
        *slot = name.into();
        Ok(())
    }

    pub fn clear_all(&mut self) {
        for slot in &mut self.slots {
            slot.clear();
        }
    }

    /// Non-blank slots with their indices, for display.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &str)> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, name)| !name.is_empty())
            .map(|(index, name)| (index, name.as_str()))
    }
}

/// Project a stored slot array onto the fixed capacity: sentinel entries and
/// missing indices become blank, entries past capacity are ignored.
pub(crate) fn project(
    gd: &JsonMap<String, JsonValue>,
    key: &str,
    capacity: usize,
) -> Result<SlotArray, CoreError> {
    let mut out = SlotArray::empty(capacity);
    let Some(stored) = value::get_array(gd, key)? else {
        return Ok(out);
    };
    for (index, entry) in stored.iter().take(capacity).enumerate() {
        let name = entry.as_str().ok_or_else(|| {
            CoreError::new(
                CoreErrorCode::Validation,
                format!("field `{key}`[{index}]: expected string, found {}", type_name(entry)),
            )
        })?;
        if name != EMPTY_SENTINEL {
            out.slots[index] = name.to_string();
        }
    }
    Ok(out)
}

/// Always re-emit exactly `capacity` entries: blank slots become the
/// sentinel, names are trimmed.
pub(crate) fn merge(gd: &mut JsonMap<String, JsonValue>, key: &str, slots: &SlotArray) {
    let rebuilt: Vec<JsonValue> = slots
        .slots
        .iter()
        .map(|name| {
            let trimmed = name.trim();
            if trimmed.is_empty() {
                JsonValue::from(EMPTY_SENTINEL)
            } else {
                JsonValue::from(trimmed)
            }
        })
        .collect();
    gd.insert(key.to_string(), JsonValue::Array(rebuilt));
}
