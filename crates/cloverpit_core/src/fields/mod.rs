//! Bidirectional mapping between the save document's nested JSON paths and
//! a flat registry of named, typed editable values.
//!
//! Each field category is a `project`/`merge` pair: `project` reads the
//! document into [`GameValues`], `merge` writes an edited [`GameValues`]
//! back. Both are pure with respect to any interactive surface and are
//! exercised directly by the integration tests.

pub mod actions;
mod modifiers;
mod patterns;
pub mod quick_edit;
mod slots;
mod symbols;

use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::byte_array;
use crate::codec::SaveDocument;
use crate::error::{CoreError, CoreErrorCode};
use crate::value;

pub use modifiers::{IDENTIFIER_KEY, ModifierValues, STANDARD_MODIFIERS};
pub use patterns::PATTERN_NAMES;
pub use quick_edit::{QuickField, QuickFieldKind};
pub use slots::{
    DRAWER_SLOTS, EMPTY_SENTINEL, EQUIPPED_SLOTS, SKELETON_SLOTS, STORE_SLOTS, SlotArray,
};
pub use symbols::{SYMBOL_NAMES, SymbolValues};

const GAMEPLAY_KEY: &str = "gameplayData";

/// Flat registry of every editable game value. Scalar defaults match what
/// the game assumes when a field is absent from the save.
#[derive(Debug, Clone, PartialEq)]
pub struct GameValues {
    pub coins: i128,
    pub deposited_coins: i128,
    pub clover_tickets: i64,
    pub interest_rate: f64,
    pub spins_left: i64,
    pub max_spins: i64,
    pub extra_spins: i64,
    pub round_of_deadline: i64,
    pub all_symbols_multiplier: i128,
    pub all_patterns_multiplier: i128,
    /// Indexed parallel to [`SYMBOL_NAMES`]; `None` when the save has no
    /// record for that symbol.
    pub symbols: [Option<SymbolValues>; 7],
    /// Indexed parallel to [`PATTERN_NAMES`]; the per-pattern extra value.
    pub pattern_values: [Option<f64>; 16],
    /// Indexed parallel to [`PATTERN_NAMES`].
    pub patterns_available: [bool; 16],
    pub equipped: SlotArray,
    pub store: SlotArray,
    pub drawers: SlotArray,
    pub skeleton: SlotArray,
    pub powerup_luck: f64,
    pub activation_luck: f64,
    pub store_luck: f64,
    pub chance_666: f64,
    pub chance_666_max: f64,
    pub suppressed_spins_666: i64,
    pub max_equippable_powerups: i64,
    pub red_button_multiplier: i64,
    pub modifiers: Vec<ModifierValues>,
}

impl GameValues {
    /// The "Max Luck Values" convenience button.
    pub fn max_luck(&mut self) {
        self.powerup_luck = 10.0;
        self.activation_luck = 10.0;
        self.store_luck = 10.0;
    }
}

pub fn project(doc: &SaveDocument) -> Result<GameValues, CoreError> {
    let gd = gameplay_data(doc)?;
    Ok(GameValues {
        coins: byte_array_field(gd, "coins_ByteArray", 0)?,
        deposited_coins: byte_array_field(gd, "depositedCoins_ByteArray", 0)?,
        clover_tickets: value::get_i64(gd, "cloverTickets")?.unwrap_or(0),
        interest_rate: value::get_f64(gd, "interestRate")?.unwrap_or(0.0),
        spins_left: value::get_i64(gd, "spinsLeft")?.unwrap_or(0),
        max_spins: value::get_i64(gd, "maxSpins")?.unwrap_or(0),
        extra_spins: value::get_i64(gd, "extraSpins")?.unwrap_or(0),
        round_of_deadline: value::get_i64(gd, "roundOfDeadline")?.unwrap_or(0),
        all_symbols_multiplier: byte_array_field(gd, "allSymbolsMultiplier_ByteArray", 1)?,
        all_patterns_multiplier: byte_array_field(gd, "allPatternsMultiplier_ByteArray", 1)?,
        symbols: symbols::project(gd)?,
        pattern_values: patterns::project_values(gd)?,
        patterns_available: patterns::project_available(gd)?,
        equipped: slots::project(gd, "equippedPowerups", EQUIPPED_SLOTS)?,
        store: slots::project(gd, "storePowerups", STORE_SLOTS)?,
        drawers: slots::project(gd, "drawerPowerups", DRAWER_SLOTS)?,
        skeleton: slots::project(gd, "equippedPowerups_Skeleton", SKELETON_SLOTS)?,
        powerup_luck: value::get_f64(gd, "powerupLuck")?.unwrap_or(1.0),
        activation_luck: value::get_f64(gd, "activationLuck")?.unwrap_or(1.0),
        store_luck: value::get_f64(gd, "storeLuck")?.unwrap_or(1.0),
        chance_666: value::get_f64(gd, "_666Chance")?.unwrap_or(0.0),
        chance_666_max: value::get_f64(gd, "_666ChanceMaxAbsolute")?.unwrap_or(0.0),
        suppressed_spins_666: value::get_i64(gd, "_666SuppressedSpinsLeft")?.unwrap_or(0),
        max_equippable_powerups: value::get_i64(gd, "maxEquippablePowerups")?.unwrap_or(8),
        red_button_multiplier: value::get_i64(gd, "_redButtonActivationsMultiplier")?.unwrap_or(1),
        modifiers: modifiers::project(doc)?,
    })
}

/// Write an edited [`GameValues`] back into the document. Mutates
/// incrementally; callers that need an all-or-nothing apply should merge
/// into a copy and swap (see `Session::apply_game_values`).
pub fn merge(doc: &mut SaveDocument, values: &GameValues) -> Result<(), CoreError> {
    let coins = byte_array::encode_int(values.coins)?;
    let deposited = byte_array::encode_int(values.deposited_coins)?;
    let symbols_multiplier = byte_array::encode_int(values.all_symbols_multiplier)?;
    let patterns_multiplier = byte_array::encode_int(values.all_patterns_multiplier)?;

    {
        let gd = gameplay_data_mut(doc)?;
        gd.insert("coins_ByteArray".to_string(), byte_array::to_json(&coins));
        gd.insert(
            "depositedCoins_ByteArray".to_string(),
            byte_array::to_json(&deposited),
        );
        gd.insert("cloverTickets".to_string(), JsonValue::from(values.clover_tickets));
        gd.insert("interestRate".to_string(), JsonValue::from(values.interest_rate));
        gd.insert("spinsLeft".to_string(), JsonValue::from(values.spins_left));
        gd.insert("maxSpins".to_string(), JsonValue::from(values.max_spins));
        gd.insert("extraSpins".to_string(), JsonValue::from(values.extra_spins));
        gd.insert(
            "roundOfDeadline".to_string(),
            JsonValue::from(values.round_of_deadline),
        );
        gd.insert(
            "allSymbolsMultiplier_ByteArray".to_string(),
            byte_array::to_json(&symbols_multiplier),
        );
        gd.insert(
            "allPatternsMultiplier_ByteArray".to_string(),
            byte_array::to_json(&patterns_multiplier),
        );

        symbols::merge(gd, &values.symbols)?;
        patterns::merge_values(gd, &values.pattern_values)?;
        patterns::merge_available(gd, &values.patterns_available);

        slots::merge(gd, "equippedPowerups", &values.equipped);
        slots::merge(gd, "storePowerups", &values.store);
        slots::merge(gd, "drawerPowerups", &values.drawers);
        slots::merge(gd, "equippedPowerups_Skeleton", &values.skeleton);

        gd.insert("powerupLuck".to_string(), JsonValue::from(values.powerup_luck));
        gd.insert(
            "activationLuck".to_string(),
            JsonValue::from(values.activation_luck),
        );
        gd.insert("storeLuck".to_string(), JsonValue::from(values.store_luck));
        gd.insert("_666Chance".to_string(), JsonValue::from(values.chance_666));
        gd.insert(
            "_666ChanceMaxAbsolute".to_string(),
            JsonValue::from(values.chance_666_max),
        );
        gd.insert(
            "_666SuppressedSpinsLeft".to_string(),
            JsonValue::from(values.suppressed_spins_666),
        );
        gd.insert(
            "maxEquippablePowerups".to_string(),
            JsonValue::from(values.max_equippable_powerups),
        );
        gd.insert(
            "_redButtonActivationsMultiplier".to_string(),
            JsonValue::from(values.red_button_multiplier),
        );
    }

    modifiers::merge(doc, &values.modifiers)
}

pub(crate) fn gameplay_data(doc: &SaveDocument) -> Result<&JsonMap<String, JsonValue>, CoreError> {
    value::get_object(doc, GAMEPLAY_KEY)?.ok_or_else(|| {
        CoreError::new(CoreErrorCode::Validation, "save has no gameplayData object")
    })
}

pub(crate) fn gameplay_data_mut(
    doc: &mut SaveDocument,
) -> Result<&mut JsonMap<String, JsonValue>, CoreError> {
    value::get_object_mut(doc, GAMEPLAY_KEY)?.ok_or_else(|| {
        CoreError::new(CoreErrorCode::Validation, "save has no gameplayData object")
    })
}

/// Read a byte-array encoded integer field, with a default for when the
/// field is absent.
pub(crate) fn byte_array_field(
    obj: &JsonMap<String, JsonValue>,
    key: &str,
    default: i128,
) -> Result<i128, CoreError> {
    match value::get_array(obj, key)? {
        None => Ok(default),
        Some(stored) => byte_array::decode_int(stored),
    }
}
