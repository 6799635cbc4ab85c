use crate::command::{Command, CommandCategory, CommandRegistries};
use crate::config::{KeyMapConfig, KeymapProfile};
use crate::error::{KeyEventError, LoadLineError};
use crate::key_event_util::{fingerprint, key_stub, normalize_modifiers};
use crate::rule_table::{KeyMapTables, RuleTable};
use crate::source::{EmbeddedProfiles, ProfileSource};
use crate::types::{Fingerprint, KeyEvent};
use anyhow::bail;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use tracing::{info, warn};

/// Session state a lookup is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyMapState {
    Direct,
    Precomposition,
    Composition,
    Conversion,
    ZeroQuerySuggestion,
    Suggestion,
    Prediction,
}

/// Overlay states and the base state consulted when they have no rule.
const FALLBACKS: [(KeyMapState, KeyMapState); 3] = [
    (KeyMapState::ZeroQuerySuggestion, KeyMapState::Precomposition),
    (KeyMapState::Suggestion, KeyMapState::Composition),
    (KeyMapState::Prediction, KeyMapState::Conversion),
];

impl KeyMapState {
    pub const COUNT: usize = 7;

    pub const ALL: [KeyMapState; Self::COUNT] = [
        KeyMapState::Direct,
        KeyMapState::Precomposition,
        KeyMapState::Composition,
        KeyMapState::Conversion,
        KeyMapState::ZeroQuerySuggestion,
        KeyMapState::Suggestion,
        KeyMapState::Prediction,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn category(self) -> CommandCategory {
        match self {
            KeyMapState::Direct => CommandCategory::Direct,
            KeyMapState::Precomposition | KeyMapState::ZeroQuerySuggestion => {
                CommandCategory::Precomposition
            }
            KeyMapState::Composition | KeyMapState::Suggestion => CommandCategory::Composition,
            KeyMapState::Conversion | KeyMapState::Prediction => CommandCategory::Conversion,
        }
    }

    pub fn fallback(self) -> Option<KeyMapState> {
        FALLBACKS
            .iter()
            .find(|(state, _)| *state == self)
            .map(|(_, base)| *base)
    }

    /// Parses the first column of a keymap table.
    pub fn from_name(name: &str) -> Option<Self> {
        let state = match name {
            "DirectInput" | "Direct" => KeyMapState::Direct,
            "Precomposition" => KeyMapState::Precomposition,
            "Composition" => KeyMapState::Composition,
            "Conversion" => KeyMapState::Conversion,
            "ZeroQuerySuggestion" => KeyMapState::ZeroQuerySuggestion,
            "Suggestion" => KeyMapState::Suggestion,
            "Prediction" => KeyMapState::Prediction,
            _ => return None,
        };
        Some(state)
    }

    pub fn name(self) -> &'static str {
        match self {
            KeyMapState::Direct => "DirectInput",
            KeyMapState::Precomposition => "Precomposition",
            KeyMapState::Composition => "Composition",
            KeyMapState::Conversion => "Conversion",
            KeyMapState::ZeroQuerySuggestion => "ZeroQuerySuggestion",
            KeyMapState::Suggestion => "Suggestion",
            KeyMapState::Prediction => "Prediction",
        }
    }
}

impl fmt::Display for KeyMapState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolves key events to commands for every session state.
///
/// Built once from a [`KeyMapConfig`] and never mutated afterwards; a
/// configuration change builds a new manager (see
/// [`SharedKeyMap`](crate::shared::SharedKeyMap)).
#[derive(Debug, Clone)]
pub struct KeyMapManager {
    config: KeyMapConfig,
    tables: KeyMapTables,
    registries: CommandRegistries,
    load_errors: Vec<LoadLineError>,
    used_fallback: bool,
}

impl Default for KeyMapManager {
    fn default() -> Self {
        Self::new(&KeyMapConfig::default())
    }
}

impl KeyMapManager {
    /// Builds a manager from the built-in tables.
    pub fn new(config: &KeyMapConfig) -> Self {
        Self::with_source(config, &EmbeddedProfiles)
    }

    pub fn with_source(config: &KeyMapConfig, source: &dyn ProfileSource) -> Self {
        let registries = CommandRegistries::new();
        let mut tables = KeyMapTables::new();
        let mut load_errors = Vec::new();

        let primary = match open_table(config, &config.profile, source) {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(
                    "Keymap {:?} unavailable ({:#}), using platform default",
                    config.profile, e
                );
                None
            }
        };
        let used_fallback = primary.is_none();
        let primary = primary.unwrap_or_else(|| default_table(source));
        load_errors.extend(tables.merge(primary.lines(), &registries));

        for overlay in &config.overlay_keymaps {
            match open_table(config, overlay, source) {
                Ok(text) => load_errors.extend(tables.merge(text.lines(), &registries)),
                Err(e) => warn!("Keymap overlay {:?} skipped: {:#}", overlay, e),
            }
        }

        info!(
            "KeyMap: built {:?} with {} overlays ({} invalid lines)",
            config.profile,
            config.overlay_keymaps.len(),
            load_errors.len()
        );

        Self {
            config: config.clone(),
            tables,
            registries,
            load_errors,
            used_fallback,
        }
    }

    /// Resolves `event` in `state`.
    ///
    /// Each table along the state's fallback chain is tried with the exact
    /// key first and then with the text-input stub; the first hit wins.
    pub fn get_command(
        &self,
        state: KeyMapState,
        event: &KeyEvent,
    ) -> Result<Option<Command>, KeyEventError> {
        let normalized = normalize_modifiers(event);
        let key = fingerprint(&normalized)?;
        let stub = key_stub(&normalized);

        let mut current = Some(state);
        while let Some(s) = current {
            if let Some(command) = self.tables.table(s).lookup(key, stub) {
                return Ok(Some(command));
            }
            current = s.fallback();
        }
        Ok(None)
    }

    pub fn name_for(&self, category: CommandCategory, command: Command) -> Option<&'static str> {
        self.registries.get(category).name(command)
    }

    pub fn command_for(&self, category: CommandCategory, name: &str) -> Option<Command> {
        self.registries.get(category).command(name)
    }

    pub fn command_names(&self, category: CommandCategory) -> BTreeSet<&'static str> {
        self.registries.get(category).names()
    }

    pub fn registries(&self) -> &CommandRegistries {
        &self.registries
    }

    pub fn table(&self, state: KeyMapState) -> &RuleTable<Command> {
        self.tables.table(state)
    }

    /// Sorted keys bound while the IME is off. Clients forward only these
    /// to the engine in direct mode.
    pub fn direct_mode_keys(&self) -> Vec<Fingerprint> {
        self.tables.table(KeyMapState::Direct).sorted_keys()
    }

    pub fn is_direct_mode_key(&self, event: &KeyEvent) -> Result<bool, KeyEventError> {
        Ok(self.get_command(KeyMapState::Direct, event)?.is_some())
    }

    pub fn config(&self) -> &KeyMapConfig {
        &self.config
    }

    /// Rule lines rejected while loading, for keybinding editors.
    pub fn load_errors(&self) -> &[LoadLineError] {
        &self.load_errors
    }

    /// True when the configured profile could not be loaded and the platform
    /// default was used instead.
    pub fn used_fallback(&self) -> bool {
        self.used_fallback
    }
}

fn open_table(
    config: &KeyMapConfig,
    profile: &KeymapProfile,
    source: &dyn ProfileSource,
) -> anyhow::Result<Cow<'static, str>> {
    if *profile == KeymapProfile::Custom {
        if config.custom_keymap_table.is_empty() {
            bail!("custom keymap table is empty");
        }
        return Ok(Cow::Owned(config.custom_keymap_table.clone()));
    }
    source.open(profile)
}

fn default_table(source: &dyn ProfileSource) -> Cow<'static, str> {
    let profile = KeymapProfile::platform_default();
    source.open(&profile).unwrap_or_else(|e| {
        warn!("Default keymap unavailable from source ({:#}), using built-in table", e);
        EmbeddedProfiles::table(&profile)
            .map(Cow::Borrowed)
            .unwrap_or_default()
    })
}
