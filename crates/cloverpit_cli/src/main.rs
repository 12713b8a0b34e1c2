use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use cloverpit_core::fields::{
    GameValues, ModifierValues, PATTERN_NAMES, SYMBOL_NAMES, SlotArray,
};
use cloverpit_core::{Session, Workspace};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "SAVE")]
    path: PathBuf,

    // Inspection flags: print `key=value` lines instead of the summary sheet.
    #[arg(long)]
    coins: bool,
    #[arg(long = "deposited-coins")]
    deposited_coins: bool,
    #[arg(long = "clover-tickets")]
    clover_tickets: bool,
    #[arg(long = "interest-rate")]
    interest_rate: bool,
    #[arg(long = "spins-left")]
    spins_left: bool,
    #[arg(long = "max-spins")]
    max_spins: bool,
    #[arg(long = "extra-spins")]
    extra_spins: bool,
    #[arg(long = "round-deadline")]
    round_deadline: bool,
    #[arg(long)]
    luck: bool,
    #[arg(long = "chance-666")]
    chance_666: bool,
    #[arg(long)]
    symbols: bool,
    #[arg(long)]
    patterns: bool,
    #[arg(long)]
    slots: bool,
    #[arg(long)]
    modifiers: bool,
    #[arg(long = "powerup-names")]
    powerup_names: bool,
    #[arg(long = "quick-fields")]
    quick_fields: bool,
    #[arg(long)]
    json: bool,

    #[arg(long = "set-coins", value_name = "N", value_parser = parse_big_int)]
    set_coins: Option<i128>,
    #[arg(long = "set-deposited-coins", value_name = "N", value_parser = parse_big_int)]
    set_deposited_coins: Option<i128>,
    #[arg(long = "set-clover-tickets", value_name = "N")]
    set_clover_tickets: Option<i64>,
    #[arg(long = "set-interest-rate", value_name = "PCT", allow_hyphen_values = true)]
    set_interest_rate: Option<f64>,
    #[arg(long = "set-spins-left", value_name = "N")]
    set_spins_left: Option<i64>,
    #[arg(long = "set-max-spins", value_name = "N")]
    set_max_spins: Option<i64>,
    #[arg(long = "set-extra-spins", value_name = "N")]
    set_extra_spins: Option<i64>,
    #[arg(long = "set-round-deadline", value_name = "N")]
    set_round_deadline: Option<i64>,
    #[arg(long = "set-all-symbols-multiplier", value_name = "N", value_parser = parse_big_int)]
    set_all_symbols_multiplier: Option<i128>,
    #[arg(long = "set-all-patterns-multiplier", value_name = "N", value_parser = parse_big_int)]
    set_all_patterns_multiplier: Option<i128>,
    #[arg(long = "set-powerup-luck", value_name = "F")]
    set_powerup_luck: Option<f64>,
    #[arg(long = "set-activation-luck", value_name = "F")]
    set_activation_luck: Option<f64>,
    #[arg(long = "set-store-luck", value_name = "F")]
    set_store_luck: Option<f64>,
    #[arg(long = "max-luck")]
    max_luck: bool,
    #[arg(long = "set-666-chance", value_name = "F")]
    set_666_chance: Option<f64>,
    #[arg(long = "set-666-max-chance", value_name = "F")]
    set_666_max_chance: Option<f64>,
    #[arg(long = "set-666-suppressed-spins", value_name = "N")]
    set_666_suppressed_spins: Option<i64>,
    #[arg(long = "set-max-equippable", value_name = "N")]
    set_max_equippable: Option<i64>,
    #[arg(long = "set-red-button-multiplier", value_name = "N")]
    set_red_button_multiplier: Option<i64>,

    #[arg(long = "set-symbol", value_name = "SYMBOL.FIELD=VALUE")]
    set_symbol: Vec<String>,
    #[arg(long = "set-pattern", value_name = "PATTERN=VALUE")]
    set_pattern: Vec<String>,
    #[arg(long = "enable-pattern", value_name = "PATTERN")]
    enable_pattern: Vec<String>,
    #[arg(long = "disable-pattern", value_name = "PATTERN")]
    disable_pattern: Vec<String>,
    #[arg(long = "set-equipped", value_name = "INDEX=NAME")]
    set_equipped: Vec<String>,
    #[arg(long = "set-store-slot", value_name = "INDEX=NAME")]
    set_store_slot: Vec<String>,
    #[arg(long = "set-drawer-slot", value_name = "INDEX=NAME")]
    set_drawer_slot: Vec<String>,
    #[arg(long = "set-skeleton-slot", value_name = "INDEX=NAME")]
    set_skeleton_slot: Vec<String>,
    #[arg(long = "clear-equipped")]
    clear_equipped: bool,
    #[arg(long = "clear-store")]
    clear_store: bool,
    #[arg(long = "clear-drawers")]
    clear_drawers: bool,
    #[arg(long = "set-modifier", value_name = "NAME.FIELD=VALUE")]
    set_modifier: Vec<String>,
    #[arg(long = "set", value_name = "PATH=VALUE")]
    set: Vec<String>,

    #[arg(long = "unlock-all-drawers")]
    unlock_all_drawers: bool,
    #[arg(long = "unlock-all-powerups")]
    unlock_all_powerups: bool,
    #[arg(long = "add-run-modifiers")]
    add_run_modifiers: bool,
    #[arg(long = "transform-phone-holy")]
    transform_phone_holy: bool,
    #[arg(long)]
    force: bool,

    #[arg(long = "dump-json", value_name = "FILE")]
    dump_json: Option<PathBuf>,
    #[arg(long = "load-json", value_name = "FILE")]
    load_json: Option<PathBuf>,
    #[arg(long = "validate-json", value_name = "FILE")]
    validate_json: Option<PathBuf>,

    #[arg(long, conflicts_with = "in_place")]
    output: Option<PathBuf>,
    #[arg(long = "in-place")]
    in_place: bool,
    #[arg(long)]
    backup: bool,
    #[arg(long = "restore-backup")]
    restore_backup: bool,
    #[arg(long)]
    yes: bool,
}

impl Cli {
    fn has_game_value_edits(&self) -> bool {
        self.set_coins.is_some()
            || self.set_deposited_coins.is_some()
            || self.set_clover_tickets.is_some()
            || self.set_interest_rate.is_some()
            || self.set_spins_left.is_some()
            || self.set_max_spins.is_some()
            || self.set_extra_spins.is_some()
            || self.set_round_deadline.is_some()
            || self.set_all_symbols_multiplier.is_some()
            || self.set_all_patterns_multiplier.is_some()
            || self.set_powerup_luck.is_some()
            || self.set_activation_luck.is_some()
            || self.set_store_luck.is_some()
            || self.max_luck
            || self.set_666_chance.is_some()
            || self.set_666_max_chance.is_some()
            || self.set_666_suppressed_spins.is_some()
            || self.set_max_equippable.is_some()
            || self.set_red_button_multiplier.is_some()
            || !self.set_symbol.is_empty()
            || !self.set_pattern.is_empty()
            || !self.enable_pattern.is_empty()
            || !self.disable_pattern.is_empty()
            || !self.set_equipped.is_empty()
            || !self.set_store_slot.is_empty()
            || !self.set_drawer_slot.is_empty()
            || !self.set_skeleton_slot.is_empty()
            || self.clear_equipped
            || self.clear_store
            || self.clear_drawers
            || !self.set_modifier.is_empty()
    }

    fn has_actions(&self) -> bool {
        self.unlock_all_drawers
            || self.unlock_all_powerups
            || self.add_run_modifiers
            || self.transform_phone_holy
    }

    fn has_edits(&self) -> bool {
        self.has_game_value_edits()
            || self.has_actions()
            || !self.set.is_empty()
            || self.load_json.is_some()
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct FieldSelection {
    coins: bool,
    deposited_coins: bool,
    clover_tickets: bool,
    interest_rate: bool,
    spins_left: bool,
    max_spins: bool,
    extra_spins: bool,
    round_deadline: bool,
    luck: bool,
    chance_666: bool,
    symbols: bool,
    patterns: bool,
    slots: bool,
    modifiers: bool,
    powerup_names: bool,
    quick_fields: bool,
}

impl FieldSelection {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            coins: cli.coins,
            deposited_coins: cli.deposited_coins,
            clover_tickets: cli.clover_tickets,
            interest_rate: cli.interest_rate,
            spins_left: cli.spins_left,
            max_spins: cli.max_spins,
            extra_spins: cli.extra_spins,
            round_deadline: cli.round_deadline,
            luck: cli.luck,
            chance_666: cli.chance_666,
            symbols: cli.symbols,
            patterns: cli.patterns,
            slots: cli.slots,
            modifiers: cli.modifiers,
            powerup_names: cli.powerup_names,
            quick_fields: cli.quick_fields,
        }
    }

    fn is_field_mode(&self) -> bool {
        self.coins
            || self.deposited_coins
            || self.clover_tickets
            || self.interest_rate
            || self.spins_left
            || self.max_spins
            || self.extra_spins
            || self.round_deadline
            || self.luck
            || self.chance_666
            || self.symbols
            || self.patterns
            || self.slots
            || self.modifiers
            || self.powerup_names
            || self.quick_fields
    }

    fn print_selected(&self, session: &Session, values: &GameValues) {
        if self.coins {
            println!("coins={}", values.coins);
        }
        if self.deposited_coins {
            println!("deposited_coins={}", values.deposited_coins);
        }
        if self.clover_tickets {
            println!("clover_tickets={}", values.clover_tickets);
        }
        if self.interest_rate {
            println!("interest_rate={}", values.interest_rate);
        }
        if self.spins_left {
            println!("spins_left={}", values.spins_left);
        }
        if self.max_spins {
            println!("max_spins={}", values.max_spins);
        }
        if self.extra_spins {
            println!("extra_spins={}", values.extra_spins);
        }
        if self.round_deadline {
            println!("round_deadline={}", values.round_of_deadline);
        }
        if self.luck {
            println!("powerup_luck={}", values.powerup_luck);
            println!("activation_luck={}", values.activation_luck);
            println!("store_luck={}", values.store_luck);
        }
        if self.chance_666 {
            println!("666_chance={}", values.chance_666);
            println!("666_max_chance={}", values.chance_666_max);
            println!("666_suppressed_spins={}", values.suppressed_spins_666);
        }
        if self.symbols {
            for (index, name) in SYMBOL_NAMES.iter().enumerate() {
                match &values.symbols[index] {
                    Some(symbol) => println!(
                        "symbol={} extra={} spawn={} golden={} instant={} ticket={}",
                        name,
                        symbol.extra_value,
                        symbol.spawn_chance,
                        symbol.golden_chance,
                        symbol.instant_reward_chance,
                        symbol.clover_ticket_chance
                    ),
                    None => println!("symbol={name} (no record)"),
                }
            }
        }
        if self.patterns {
            for (index, name) in PATTERN_NAMES.iter().enumerate() {
                let state = if values.patterns_available[index] {
                    "on"
                } else {
                    "off"
                };
                match values.pattern_values[index] {
                    Some(extra) => println!("pattern={name} {state} extra={extra}"),
                    None => println!("pattern={name} {state} (no record)"),
                }
            }
        }
        if self.slots {
            print_slot_lines("equipped", &values.equipped);
            print_slot_lines("store", &values.store);
            print_slot_lines("drawer", &values.drawers);
            print_slot_lines("skeleton", &values.skeleton);
        }
        if self.modifiers {
            for row in &values.modifiers {
                println!(
                    "modifier={} owned={} unlocked={} played={} won={} foil={}",
                    row.identifier,
                    row.owned_count,
                    row.unlocked_times,
                    row.played_times,
                    row.won_times,
                    row.foil_level
                );
            }
        }
        if self.powerup_names {
            match session.powerup_names() {
                Ok(names) => {
                    for name in names {
                        println!("powerup={name}");
                    }
                }
                Err(e) => eprintln!("Error listing powerups: {e}"),
            }
        }
        if self.quick_fields {
            for field in session.quick_fields() {
                println!("{}={}", field.path, field.value);
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(path) = &cli.validate_json {
        let text = fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        });
        match Session::validate_text(&text) {
            Ok(()) => println!("{} is valid JSON", path.display()),
            Err(e) => {
                eprintln!("Error validating {}: {e}", path.display());
                process::exit(1);
            }
        }
        return;
    }

    let has_edits = cli.has_edits();
    let fields = FieldSelection::from_cli(&cli);
    if has_edits && cli.output.is_none() && !cli.in_place {
        eprintln!("edit flags require --output <PATH> or --in-place");
        process::exit(2);
    }
    if (cli.output.is_some() || cli.in_place) && !has_edits {
        eprintln!("--output and --in-place require at least one edit flag");
        process::exit(2);
    }

    let mut workspace = Workspace::new();
    workspace.select(&cli.path);

    if cli.restore_backup {
        if !cli.yes {
            eprintln!(
                "--restore-backup overwrites {} with its backup; pass --yes to confirm",
                cli.path.display()
            );
            process::exit(2);
        }
        workspace.restore_backup().unwrap_or_else(|e| {
            eprintln!("Error restoring backup: {e}");
            process::exit(1);
        });
        println!("Backup restored over {}", cli.path.display());
    }

    if cli.backup {
        let backup = workspace.create_backup().unwrap_or_else(|e| {
            eprintln!("Error creating backup: {e}");
            process::exit(1);
        });
        println!("Backup created: {}", backup.display());
    }

    // Backup-only invocations never need to decode the file; everything
    // else does.
    let needs_document = has_edits
        || cli.json
        || cli.dump_json.is_some()
        || fields.is_field_mode()
        || !(cli.backup || cli.restore_backup);
    if needs_document && !workspace.is_loaded() {
        workspace.load().unwrap_or_else(|e| {
            eprintln!("Error loading {}: {e}", cli.path.display());
            process::exit(1);
        });
    }

    if needs_document {
        let session = workspace.session_mut().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });

        if let Some(path) = &cli.load_json {
            let text = fs::read_to_string(path).unwrap_or_else(|e| {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(1);
            });
            session.replace_document_text(&text).unwrap_or_else(|e| {
                eprintln!("Error loading document from {}: {e}", path.display());
                process::exit(1);
            });
        }

        if cli.has_game_value_edits() {
            let mut values = session.game_values().unwrap_or_else(|e| {
                eprintln!("Error reading game values: {e}");
                process::exit(1);
            });
            stage_game_value_edits(&cli, &mut values).unwrap_or_else(|message| {
                eprintln!("{message}");
                process::exit(2);
            });
            session.apply_game_values(&values).unwrap_or_else(|e| {
                eprintln!("Error applying game values: {e}");
                process::exit(1);
            });
        }

        if cli.unlock_all_drawers {
            session.unlock_all_drawers();
            println!("All drawers unlocked");
        }
        if cli.unlock_all_powerups {
            let count = session.unlock_all_powerups().unwrap_or_else(|e| {
                eprintln!("Error unlocking powerups: {e}");
                process::exit(1);
            });
            println!("Unlocked {count} powerups");
        }
        if cli.add_run_modifiers {
            let added = session.add_standard_run_modifiers().unwrap_or_else(|e| {
                eprintln!("Error adding run modifiers: {e}");
                process::exit(1);
            });
            println!("Added {added} run modifiers");
        }
        if cli.transform_phone_holy {
            let complete = session.has_complete_skeleton().unwrap_or_else(|e| {
                eprintln!("Error checking skeleton: {e}");
                process::exit(1);
            });
            if !complete && !cli.force {
                eprintln!(
                    "the phone transformation normally requires all 5 skeleton pieces equipped; pass --force to proceed anyway"
                );
                process::exit(2);
            }
            session.transform_phone_holy().unwrap_or_else(|e| {
                eprintln!("Error transforming phone: {e}");
                process::exit(1);
            });
            println!("Phone transformed to holy (999) mode");
        }

        if !cli.set.is_empty() {
            let edits: Vec<(String, String)> = cli
                .set
                .iter()
                .map(|raw| parse_assignment(raw))
                .collect::<Result<_, _>>()
                .unwrap_or_else(|message| {
                    eprintln!("{message}");
                    process::exit(2);
                });
            session.apply_quick_edits(&edits).unwrap_or_else(|e| {
                eprintln!("Error applying quick edits: {e}");
                process::exit(1);
            });
        }
    }

    if has_edits {
        match &cli.output {
            Some(out) => {
                workspace.save_to(out).unwrap_or_else(|e| {
                    eprintln!("Error writing {}: {e}", out.display());
                    process::exit(1);
                });
                println!("Wrote edited save to {}", out.display());
            }
            None => {
                workspace.save().unwrap_or_else(|e| {
                    eprintln!("Error writing {}: {e}", cli.path.display());
                    process::exit(1);
                });
                println!("Wrote edited save to {}", cli.path.display());
            }
        }
    }

    if let Some(out) = &cli.dump_json {
        let session = workspace.session().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        let text = session.document_text().unwrap_or_else(|e| {
            eprintln!("Error rendering document: {e}");
            process::exit(1);
        });
        fs::write(out, text).unwrap_or_else(|e| {
            eprintln!("Error writing {}: {e}", out.display());
            process::exit(1);
        });
        println!("Wrote decoded document to {}", out.display());
    }

    if cli.json {
        let session = workspace.session().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        let text = serde_json::to_string_pretty(session.document()).unwrap_or_else(|e| {
            eprintln!("Error rendering document: {e}");
            process::exit(1);
        });
        println!("{text}");
        return;
    }

    if fields.is_field_mode() {
        let session = workspace.session().unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        let values = session.game_values().unwrap_or_else(|e| {
            eprintln!("Error reading game values: {e}");
            process::exit(1);
        });
        fields.print_selected(session, &values);
        return;
    }

    if has_edits || cli.dump_json.is_some() || cli.backup || cli.restore_backup {
        return;
    }

    let session = workspace.session().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let values = session.game_values().unwrap_or_else(|e| {
        eprintln!("Error reading game values: {e}");
        process::exit(1);
    });
    print_summary_sheet(&cli.path, &values);
}

// ---------------------------------------------------------------------------
// Edit staging
// ---------------------------------------------------------------------------

fn stage_game_value_edits(cli: &Cli, values: &mut GameValues) -> Result<(), String> {
    if let Some(coins) = cli.set_coins {
        values.coins = coins;
    }
    if let Some(deposited) = cli.set_deposited_coins {
        values.deposited_coins = deposited;
    }
    if let Some(tickets) = cli.set_clover_tickets {
        values.clover_tickets = tickets;
    }
    if let Some(rate) = cli.set_interest_rate {
        values.interest_rate = rate;
    }
    if let Some(spins) = cli.set_spins_left {
        values.spins_left = spins;
    }
    if let Some(spins) = cli.set_max_spins {
        values.max_spins = spins;
    }
    if let Some(spins) = cli.set_extra_spins {
        values.extra_spins = spins;
    }
    if let Some(round) = cli.set_round_deadline {
        values.round_of_deadline = round;
    }
    if let Some(multiplier) = cli.set_all_symbols_multiplier {
        values.all_symbols_multiplier = multiplier;
    }
    if let Some(multiplier) = cli.set_all_patterns_multiplier {
        values.all_patterns_multiplier = multiplier;
    }
    if let Some(luck) = cli.set_powerup_luck {
        values.powerup_luck = luck;
    }
    if let Some(luck) = cli.set_activation_luck {
        values.activation_luck = luck;
    }
    if let Some(luck) = cli.set_store_luck {
        values.store_luck = luck;
    }
    if cli.max_luck {
        values.max_luck();
    }
    if let Some(chance) = cli.set_666_chance {
        values.chance_666 = chance;
    }
    if let Some(chance) = cli.set_666_max_chance {
        values.chance_666_max = chance;
    }
    if let Some(spins) = cli.set_666_suppressed_spins {
        values.suppressed_spins_666 = spins;
    }
    if let Some(count) = cli.set_max_equippable {
        values.max_equippable_powerups = count;
    }
    if let Some(multiplier) = cli.set_red_button_multiplier {
        values.red_button_multiplier = multiplier;
    }

    for raw in &cli.set_symbol {
        stage_symbol_edit(values, raw)?;
    }
    for raw in &cli.set_pattern {
        stage_pattern_edit(values, raw)?;
    }
    for name in &cli.enable_pattern {
        toggle_pattern(values, name, true)?;
    }
    for name in &cli.disable_pattern {
        toggle_pattern(values, name, false)?;
    }

    for raw in &cli.set_equipped {
        stage_slot_edit(&mut values.equipped, "equipped", raw)?;
    }
    for raw in &cli.set_store_slot {
        stage_slot_edit(&mut values.store, "store", raw)?;
    }
    for raw in &cli.set_drawer_slot {
        stage_slot_edit(&mut values.drawers, "drawer", raw)?;
    }
    for raw in &cli.set_skeleton_slot {
        stage_slot_edit(&mut values.skeleton, "skeleton", raw)?;
    }
    if cli.clear_equipped {
        values.equipped.clear_all();
    }
    if cli.clear_store {
        values.store.clear_all();
    }
    if cli.clear_drawers {
        values.drawers.clear_all();
    }

    for raw in &cli.set_modifier {
        stage_modifier_edit(&mut values.modifiers, raw)?;
    }

    Ok(())
}

fn stage_symbol_edit(values: &mut GameValues, raw: &str) -> Result<(), String> {
    let (target, value) = parse_assignment(raw)?;
    let (symbol, field) = target.split_once('.').ok_or_else(|| {
        format!("invalid --set-symbol '{raw}', expected SYMBOL.FIELD=VALUE")
    })?;
    let index = SYMBOL_NAMES
        .iter()
        .position(|&name| name == symbol)
        .ok_or_else(|| {
            format!(
                "unknown symbol '{symbol}', expected one of: {}",
                SYMBOL_NAMES.join(", ")
            )
        })?;
    let entry = values.symbols[index]
        .as_mut()
        .ok_or_else(|| format!("the save has no symbolsData record for '{symbol}'"))?;

    match field {
        "extraValue" => entry.extra_value = parse_big_int(&value)?,
        "spawnChance" => entry.spawn_chance = parse_float(&value, raw)?,
        "golden" => entry.golden_chance = parse_float(&value, raw)?,
        "instantReward" => entry.instant_reward_chance = parse_float(&value, raw)?,
        "cloverTicket" => entry.clover_ticket_chance = parse_float(&value, raw)?,
        other => {
            return Err(format!(
                "unknown symbol field '{other}', expected one of: extraValue, spawnChance, golden, instantReward, cloverTicket"
            ));
        }
    }
    Ok(())
}

fn stage_pattern_edit(values: &mut GameValues, raw: &str) -> Result<(), String> {
    let (pattern, value) = parse_assignment(raw)?;
    let index = pattern_index(&pattern)?;
    if values.pattern_values[index].is_none() {
        return Err(format!("the save has no patternsData record for '{pattern}'"));
    }
    values.pattern_values[index] = Some(parse_float(&value, raw)?);
    Ok(())
}

fn toggle_pattern(values: &mut GameValues, name: &str, enabled: bool) -> Result<(), String> {
    values.patterns_available[pattern_index(name)?] = enabled;
    Ok(())
}

fn pattern_index(name: &str) -> Result<usize, String> {
    PATTERN_NAMES
        .iter()
        .position(|&pattern| pattern == name)
        .ok_or_else(|| {
            format!(
                "unknown pattern '{name}', expected one of: {}",
                PATTERN_NAMES.join(", ")
            )
        })
}

fn stage_slot_edit(slots: &mut SlotArray, label: &str, raw: &str) -> Result<(), String> {
    let (index_text, name) = parse_assignment(raw)?;
    let index: usize = index_text
        .trim()
        .parse()
        .map_err(|_| format!("invalid {label} slot index '{index_text}'"))?;
    slots
        .set(index, name)
        .map_err(|e| format!("invalid {label} slot edit '{raw}': {e}"))
}

fn stage_modifier_edit(rows: &mut [ModifierValues], raw: &str) -> Result<(), String> {
    let (target, value) = parse_assignment(raw)?;
    let (name, field) = target.split_once('.').ok_or_else(|| {
        format!("invalid --set-modifier '{raw}', expected NAME.FIELD=VALUE")
    })?;
    let row = rows
        .iter_mut()
        .find(|row| row.identifier == name)
        .ok_or_else(|| format!("the save has no run modifier record for '{name}'"))?;
    let count: i64 = value
        .trim()
        .parse()
        .map_err(|_| format!("invalid modifier count '{value}' in '{raw}'"))?;

    match field {
        "owned" => row.owned_count = count,
        "unlocked" => row.unlocked_times = count,
        "played" => row.played_times = count,
        "won" => row.won_times = count,
        "foil" => row.foil_level = count,
        other => {
            return Err(format!(
                "unknown modifier field '{other}', expected one of: owned, unlocked, played, won, foil"
            ));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("invalid assignment '{raw}', expected KEY=VALUE"))
}

fn parse_big_int(value: &str) -> Result<i128, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("'{value}' is not an integer"))
}

fn parse_float(value: &str, context: &str) -> Result<f64, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("invalid number '{value}' in '{context}'"))
}

fn print_slot_lines(label: &str, slots: &SlotArray) {
    for (index, name) in slots.occupied() {
        println!("{label}[{index}]={name}");
    }
}

// ---------------------------------------------------------------------------
// Summary sheet
// ---------------------------------------------------------------------------

fn print_summary_sheet(path: &std::path::Path, values: &GameValues) {
    println!();
    println!("{:^72}", "CLOVER PIT");
    println!("{:^72}", "SAVE FILE REPORT");
    println!("{:^72}", path.display().to_string());
    println!();

    println!(" ::: Currency :::");
    println!(
        "  Coins: {:<18}Deposited: {}",
        format_number_with_commas(values.coins),
        format_number_with_commas(values.deposited_coins)
    );
    println!(
        "  Clover Tickets: {:<9}Interest Rate: {}%",
        values.clover_tickets, values.interest_rate
    );
    println!();

    println!(" ::: Spins :::");
    println!(
        "  Left: {:<5}Max: {:<5}Extra: {:<5}Round Deadline: {}",
        values.spins_left, values.max_spins, values.extra_spins, values.round_of_deadline
    );
    println!();

    println!(
        " ::: Symbols :::  (all-symbols multiplier: {})",
        values.all_symbols_multiplier
    );
    for (index, name) in SYMBOL_NAMES.iter().enumerate() {
        if let Some(symbol) = &values.symbols[index] {
            println!(
                "  {:<10}extra={:<8}spawn={:<8}golden={:<8}instant={:<8}ticket={}",
                name,
                symbol.extra_value,
                symbol.spawn_chance,
                symbol.golden_chance,
                symbol.instant_reward_chance,
                symbol.clover_ticket_chance
            );
        }
    }
    println!();

    println!(
        " ::: Patterns :::  (all-patterns multiplier: {})",
        values.all_patterns_multiplier
    );
    for (index, name) in PATTERN_NAMES.iter().enumerate() {
        let state = if values.patterns_available[index] {
            "on "
        } else {
            "off"
        };
        match values.pattern_values[index] {
            Some(extra) => println!("  [{state}] {name:<17}extra={extra}"),
            None => println!("  [{state}] {name}"),
        }
    }
    println!();

    println!(" ::: Powerups :::");
    print_slot_summary("Equipped", &values.equipped);
    print_slot_summary("Store", &values.store);
    print_slot_summary("Drawers", &values.drawers);
    print_slot_summary("Skeleton", &values.skeleton);
    println!(
        "  Max equippable: {}   Red button multiplier: {}",
        values.max_equippable_powerups, values.red_button_multiplier
    );
    println!();

    println!(" ::: Luck :::");
    println!(
        "  Powerup: {:<7}Activation: {:<7}Store: {}",
        values.powerup_luck, values.activation_luck, values.store_luck
    );
    println!();

    println!(" ::: 666 Events :::");
    println!(
        "  Chance: {:<7}Max: {:<7}Suppressed Spins: {}",
        values.chance_666, values.chance_666_max, values.suppressed_spins_666
    );
    println!();

    if !values.modifiers.is_empty() {
        println!(" ::: Run Modifiers :::");
        for row in &values.modifiers {
            println!(
                "  {:<36}owned={:<4}unlocked={:<4}played={:<4}won={:<4}foil={}",
                row.identifier,
                row.owned_count,
                row.unlocked_times,
                row.played_times,
                row.won_times,
                row.foil_level
            );
        }
        println!();
    }
}

fn print_slot_summary(label: &str, slots: &SlotArray) {
    let occupied: Vec<String> = slots
        .occupied()
        .map(|(index, name)| format!("{index}={name}"))
        .collect();
    let used = occupied.len();
    let capacity = slots.capacity();
    if occupied.is_empty() {
        println!("  {label} ({used}/{capacity}): empty");
    } else {
        println!("  {label} ({used}/{capacity}): {}", occupied.join(" "));
    }
}

fn format_number_with_commas(n: i128) -> String {
    if n < 0 {
        return format!("-{}", format_number_with_commas(-n));
    }
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
