use crate::command::{Command, CommandRegistries};
use crate::error::{KeyEventError, LoadErrorKind, LoadLineError};
use crate::key_event_util::{fingerprint, normalize_modifiers, text_input_fingerprint};
use crate::keymap::KeyMapState;
use crate::parser::parse_key_spec;
use crate::types::{Fingerprint, KeyEvent, Modifiers};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Fingerprint → command mapping for one state. Later inserts win.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable<C> {
    rules: HashMap<Fingerprint, C>,
}

impl<C> Default for RuleTable<C> {
    fn default() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }
}

impl<C: Copy> RuleTable<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds the normalized form of `event` to `command`.
    pub fn add_rule(&mut self, event: &KeyEvent, command: C) -> Result<Fingerprint, KeyEventError> {
        let key = fingerprint(&normalize_modifiers(event))?;
        self.rules.insert(key, command);
        Ok(key)
    }

    pub fn insert(&mut self, key: Fingerprint, command: C) {
        self.rules.insert(key, command);
    }

    pub fn get(&self, key: Fingerprint) -> Option<C> {
        self.rules.get(&key).copied()
    }

    /// Exact match first, then the stub key if one applies.
    pub fn lookup(&self, key: Fingerprint, stub: Option<Fingerprint>) -> Option<C> {
        self.get(key).or_else(|| stub.and_then(|s| self.get(s)))
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Fingerprint, C)> + '_ {
        self.rules.iter().map(|(k, c)| (*k, *c))
    }

    pub fn sorted_keys(&self) -> Vec<Fingerprint> {
        let mut keys: Vec<Fingerprint> = self.rules.keys().copied().collect();
        keys.sort_unstable();
        keys
    }
}

/// One rule table per keymap state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMapTables {
    tables: [RuleTable<Command>; KeyMapState::COUNT],
}

impl Default for KeyMapTables {
    fn default() -> Self {
        Self {
            tables: std::array::from_fn(|_| RuleTable::new()),
        }
    }
}

impl KeyMapTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table(&self, state: KeyMapState) -> &RuleTable<Command> {
        &self.tables[state.index()]
    }

    pub fn table_mut(&mut self, state: KeyMapState) -> &mut RuleTable<Command> {
        &mut self.tables[state.index()]
    }

    /// Builds fresh tables from keymap-table lines.
    pub fn load<I, S>(lines: I, registries: &CommandRegistries) -> (Self, Vec<LoadLineError>)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tables = Self::new();
        let errors = tables.merge(lines, registries);
        (tables, errors)
    }

    /// Loads keymap-table lines on top of the current rules.
    ///
    /// The first line is a header and is always skipped. Bad lines are
    /// reported and skipped. The implicit text-input rules are applied last.
    pub fn merge<I, S>(&mut self, lines: I, registries: &CommandRegistries) -> Vec<LoadLineError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut errors = Vec::new();
        let mut added = 0usize;
        for (idx, line) in lines.into_iter().enumerate().skip(1) {
            let line = line.as_ref().trim_end_matches(&['\r', '\n'][..]);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_rule_line(line, registries) {
                Ok((state, key, command)) => {
                    self.table_mut(state).insert(key, command);
                    added += 1;
                }
                Err(kind) => {
                    let error = LoadLineError {
                        line_number: idx + 1,
                        line: line.to_string(),
                        kind,
                    };
                    warn!("Skipping keymap rule: {}", error);
                    errors.push(error);
                }
            }
        }
        self.add_implicit_rules();
        debug!("Keymap: {} rules merged, {} rejected", added, errors.len());
        errors
    }

    fn add_implicit_rules(&mut self) {
        let text_input = text_input_fingerprint();
        for state in [
            KeyMapState::Precomposition,
            KeyMapState::Composition,
            KeyMapState::Conversion,
        ] {
            if let Some(command) = Command::insert_character(state.category()) {
                self.table_mut(state).insert(text_input, command);
            }
        }

        let shift_only = Fingerprint::from_parts(Modifiers::SHIFT.bits(), 0, 0);
        if let Some(command) = Command::insert_character(KeyMapState::Composition.category()) {
            self.table_mut(KeyMapState::Composition)
                .insert(shift_only, command);
        }
    }
}

fn parse_rule_line(
    line: &str,
    registries: &CommandRegistries,
) -> Result<(KeyMapState, Fingerprint, Command), LoadErrorKind> {
    let fields: Vec<&str> = line.split('\t').filter(|f| !f.is_empty()).collect();
    let [state_name, spec, command_name] = fields.as_slice() else {
        return Err(LoadErrorKind::FieldCount(fields.len()));
    };

    let state = KeyMapState::from_name(state_name)
        .ok_or_else(|| LoadErrorKind::UnknownState(state_name.to_string()))?;

    let event = parse_key_spec(spec).map_err(|source| LoadErrorKind::InvalidKeySpec {
        spec: spec.to_string(),
        source,
    })?;
    let key = fingerprint(&normalize_modifiers(&event)).map_err(|source| {
        LoadErrorKind::Encoding {
            spec: spec.to_string(),
            source,
        }
    })?;

    let command = registries
        .get(state.category())
        .command(command_name)
        .ok_or_else(|| LoadErrorKind::UnknownCommand {
            state: state_name.to_string(),
            name: command_name.to_string(),
        })?;

    Ok((state, key, command))
}
