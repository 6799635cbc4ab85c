//! Commands a keymap can resolve to, per command category.
//!
//! Each category has a closed enum and a static `(name, command)` table. The
//! names are the vocabulary of the third column of a keymap table and are
//! what configuration UIs show to users.

use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Which command vocabulary a state uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandCategory {
    Direct,
    Precomposition,
    Composition,
    Conversion,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 4] = [
        CommandCategory::Direct,
        CommandCategory::Precomposition,
        CommandCategory::Composition,
        CommandCategory::Conversion,
    ];
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandCategory::Direct => "DirectInput",
            CommandCategory::Precomposition => "Precomposition",
            CommandCategory::Composition => "Composition",
            CommandCategory::Conversion => "Conversion",
        };
        f.write_str(name)
    }
}

/// Commands available while the IME is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirectCommand {
    ImeOn,
    InputModeHiragana,
    InputModeFullKatakana,
    InputModeHalfKatakana,
    InputModeFullAlphanumeric,
    InputModeHalfAlphanumeric,
    Reconvert,
}

/// Commands available while the IME is on with an empty composition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrecompositionCommand {
    ImeOff,
    ImeOn,
    InsertCharacter,
    InsertSpace,
    InsertAlternateSpace,
    InsertHalfSpace,
    InsertFullSpace,
    ToggleAlphanumericMode,
    InputModeHiragana,
    InputModeFullKatakana,
    InputModeHalfKatakana,
    InputModeFullAlphanumeric,
    InputModeHalfAlphanumeric,
    InputModeSwitchKanaType,
    LaunchConfigDialog,
    LaunchDictionaryTool,
    LaunchWordRegisterDialog,
    Revert,
    Undo,
    Reconvert,
    Cancel,
    CancelAndImeOff,
    CommitFirstSuggestion,
    PredictAndConvert,
}

/// Commands available while a composition is being typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompositionCommand {
    ImeOff,
    ImeOn,
    InsertCharacter,
    Delete,
    Backspace,
    InsertSpace,
    InsertAlternateSpace,
    InsertHalfSpace,
    InsertFullSpace,
    Cancel,
    CancelAndImeOff,
    Undo,
    MoveCursorLeft,
    MoveCursorRight,
    MoveCursorToBeginning,
    MoveCursorToEnd,
    Commit,
    CommitFirstSuggestion,
    Convert,
    ConvertWithoutHistory,
    PredictAndConvert,
    ConvertToHiragana,
    ConvertToFullKatakana,
    ConvertToHalfKatakana,
    ConvertToHalfWidth,
    ConvertToFullAlphanumeric,
    ConvertToHalfAlphanumeric,
    SwitchKanaType,
    DisplayAsHiragana,
    DisplayAsFullKatakana,
    DisplayAsHalfKatakana,
    TranslateHalfWidth,
    TranslateFullAscii,
    TranslateHalfAscii,
    ToggleAlphanumericMode,
    InputModeHiragana,
    InputModeFullKatakana,
    InputModeHalfKatakana,
    InputModeFullAlphanumeric,
    InputModeHalfAlphanumeric,
}

/// Commands available while candidates are shown after conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionCommand {
    ImeOff,
    ImeOn,
    InsertCharacter,
    InsertSpace,
    InsertAlternateSpace,
    InsertHalfSpace,
    InsertFullSpace,
    Cancel,
    CancelAndImeOff,
    Undo,
    SegmentFocusLeft,
    SegmentFocusRight,
    SegmentFocusFirst,
    SegmentFocusLast,
    SegmentWidthExpand,
    SegmentWidthShrink,
    ConvertNext,
    ConvertPrev,
    ConvertNextPage,
    ConvertPrevPage,
    PredictAndConvert,
    Commit,
    CommitOnlyFirstSegment,
    ConvertToHiragana,
    ConvertToFullKatakana,
    ConvertToHalfKatakana,
    ConvertToHalfWidth,
    ConvertToFullAlphanumeric,
    ConvertToHalfAlphanumeric,
    SwitchKanaType,
    DisplayAsHiragana,
    DisplayAsFullKatakana,
    DisplayAsHalfKatakana,
    TranslateHalfWidth,
    TranslateFullAscii,
    TranslateHalfAscii,
    ToggleAlphanumericMode,
    DeleteSelectedCandidate,
    InputModeHiragana,
    InputModeFullKatakana,
    InputModeHalfKatakana,
    InputModeFullAlphanumeric,
    InputModeHalfAlphanumeric,
}

pub const DIRECT_COMMANDS: &[(&str, DirectCommand)] = &[
    ("IMEOn", DirectCommand::ImeOn),
    ("InputModeHiragana", DirectCommand::InputModeHiragana),
    ("InputModeFullKatakana", DirectCommand::InputModeFullKatakana),
    ("InputModeHalfKatakana", DirectCommand::InputModeHalfKatakana),
    ("InputModeFullAlphanumeric", DirectCommand::InputModeFullAlphanumeric),
    ("InputModeHalfAlphanumeric", DirectCommand::InputModeHalfAlphanumeric),
    ("Reconvert", DirectCommand::Reconvert),
];

pub const PRECOMPOSITION_COMMANDS: &[(&str, PrecompositionCommand)] = &[
    ("IMEOff", PrecompositionCommand::ImeOff),
    ("IMEOn", PrecompositionCommand::ImeOn),
    ("InsertCharacter", PrecompositionCommand::InsertCharacter),
    ("InsertSpace", PrecompositionCommand::InsertSpace),
    ("InsertAlternateSpace", PrecompositionCommand::InsertAlternateSpace),
    ("InsertHalfSpace", PrecompositionCommand::InsertHalfSpace),
    ("InsertFullSpace", PrecompositionCommand::InsertFullSpace),
    ("ToggleAlphanumericMode", PrecompositionCommand::ToggleAlphanumericMode),
    ("InputModeHiragana", PrecompositionCommand::InputModeHiragana),
    ("InputModeFullKatakana", PrecompositionCommand::InputModeFullKatakana),
    ("InputModeHalfKatakana", PrecompositionCommand::InputModeHalfKatakana),
    ("InputModeFullAlphanumeric", PrecompositionCommand::InputModeFullAlphanumeric),
    ("InputModeHalfAlphanumeric", PrecompositionCommand::InputModeHalfAlphanumeric),
    ("InputModeSwitchKanaType", PrecompositionCommand::InputModeSwitchKanaType),
    ("LaunchConfigDialog", PrecompositionCommand::LaunchConfigDialog),
    ("LaunchDictionaryTool", PrecompositionCommand::LaunchDictionaryTool),
    ("LaunchWordRegisterDialog", PrecompositionCommand::LaunchWordRegisterDialog),
    ("Revert", PrecompositionCommand::Revert),
    ("Undo", PrecompositionCommand::Undo),
    ("Reconvert", PrecompositionCommand::Reconvert),
    ("Cancel", PrecompositionCommand::Cancel),
    ("CancelAndIMEOff", PrecompositionCommand::CancelAndImeOff),
    ("CommitFirstSuggestion", PrecompositionCommand::CommitFirstSuggestion),
    ("PredictAndConvert", PrecompositionCommand::PredictAndConvert),
];

pub const COMPOSITION_COMMANDS: &[(&str, CompositionCommand)] = &[
    ("IMEOff", CompositionCommand::ImeOff),
    ("IMEOn", CompositionCommand::ImeOn),
    ("InsertCharacter", CompositionCommand::InsertCharacter),
    ("Delete", CompositionCommand::Delete),
    ("Backspace", CompositionCommand::Backspace),
    ("InsertSpace", CompositionCommand::InsertSpace),
    ("InsertAlternateSpace", CompositionCommand::InsertAlternateSpace),
    ("InsertHalfSpace", CompositionCommand::InsertHalfSpace),
    ("InsertFullSpace", CompositionCommand::InsertFullSpace),
    ("Cancel", CompositionCommand::Cancel),
    ("CancelAndIMEOff", CompositionCommand::CancelAndImeOff),
    ("Undo", CompositionCommand::Undo),
    ("MoveCursorLeft", CompositionCommand::MoveCursorLeft),
    ("MoveCursorRight", CompositionCommand::MoveCursorRight),
    ("MoveCursorToBeginning", CompositionCommand::MoveCursorToBeginning),
    ("MoveCursorToEnd", CompositionCommand::MoveCursorToEnd),
    ("Commit", CompositionCommand::Commit),
    ("CommitFirstSuggestion", CompositionCommand::CommitFirstSuggestion),
    ("Convert", CompositionCommand::Convert),
    ("ConvertWithoutHistory", CompositionCommand::ConvertWithoutHistory),
    ("PredictAndConvert", CompositionCommand::PredictAndConvert),
    ("ConvertToHiragana", CompositionCommand::ConvertToHiragana),
    ("ConvertToFullKatakana", CompositionCommand::ConvertToFullKatakana),
    ("ConvertToHalfKatakana", CompositionCommand::ConvertToHalfKatakana),
    ("ConvertToHalfWidth", CompositionCommand::ConvertToHalfWidth),
    ("ConvertToFullAlphanumeric", CompositionCommand::ConvertToFullAlphanumeric),
    ("ConvertToHalfAlphanumeric", CompositionCommand::ConvertToHalfAlphanumeric),
    ("SwitchKanaType", CompositionCommand::SwitchKanaType),
    ("DisplayAsHiragana", CompositionCommand::DisplayAsHiragana),
    ("DisplayAsFullKatakana", CompositionCommand::DisplayAsFullKatakana),
    ("DisplayAsHalfKatakana", CompositionCommand::DisplayAsHalfKatakana),
    ("TranslateHalfWidth", CompositionCommand::TranslateHalfWidth),
    ("TranslateFullASCII", CompositionCommand::TranslateFullAscii),
    ("TranslateHalfASCII", CompositionCommand::TranslateHalfAscii),
    ("ToggleAlphanumericMode", CompositionCommand::ToggleAlphanumericMode),
    ("InputModeHiragana", CompositionCommand::InputModeHiragana),
    ("InputModeFullKatakana", CompositionCommand::InputModeFullKatakana),
    ("InputModeHalfKatakana", CompositionCommand::InputModeHalfKatakana),
    ("InputModeFullAlphanumeric", CompositionCommand::InputModeFullAlphanumeric),
    ("InputModeHalfAlphanumeric", CompositionCommand::InputModeHalfAlphanumeric),
];

pub const CONVERSION_COMMANDS: &[(&str, ConversionCommand)] = &[
    ("IMEOff", ConversionCommand::ImeOff),
    ("IMEOn", ConversionCommand::ImeOn),
    ("InsertCharacter", ConversionCommand::InsertCharacter),
    ("InsertSpace", ConversionCommand::InsertSpace),
    ("InsertAlternateSpace", ConversionCommand::InsertAlternateSpace),
    ("InsertHalfSpace", ConversionCommand::InsertHalfSpace),
    ("InsertFullSpace", ConversionCommand::InsertFullSpace),
    ("Cancel", ConversionCommand::Cancel),
    ("CancelAndIMEOff", ConversionCommand::CancelAndImeOff),
    ("Undo", ConversionCommand::Undo),
    ("SegmentFocusLeft", ConversionCommand::SegmentFocusLeft),
    ("SegmentFocusRight", ConversionCommand::SegmentFocusRight),
    ("SegmentFocusFirst", ConversionCommand::SegmentFocusFirst),
    ("SegmentFocusLast", ConversionCommand::SegmentFocusLast),
    ("SegmentWidthExpand", ConversionCommand::SegmentWidthExpand),
    ("SegmentWidthShrink", ConversionCommand::SegmentWidthShrink),
    ("ConvertNext", ConversionCommand::ConvertNext),
    ("ConvertPrev", ConversionCommand::ConvertPrev),
    ("ConvertNextPage", ConversionCommand::ConvertNextPage),
    ("ConvertPrevPage", ConversionCommand::ConvertPrevPage),
    ("PredictAndConvert", ConversionCommand::PredictAndConvert),
    ("Commit", ConversionCommand::Commit),
    ("CommitOnlyFirstSegment", ConversionCommand::CommitOnlyFirstSegment),
    ("ConvertToHiragana", ConversionCommand::ConvertToHiragana),
    ("ConvertToFullKatakana", ConversionCommand::ConvertToFullKatakana),
    ("ConvertToHalfKatakana", ConversionCommand::ConvertToHalfKatakana),
    ("ConvertToHalfWidth", ConversionCommand::ConvertToHalfWidth),
    ("ConvertToFullAlphanumeric", ConversionCommand::ConvertToFullAlphanumeric),
    ("ConvertToHalfAlphanumeric", ConversionCommand::ConvertToHalfAlphanumeric),
    ("SwitchKanaType", ConversionCommand::SwitchKanaType),
    ("DisplayAsHiragana", ConversionCommand::DisplayAsHiragana),
    ("DisplayAsFullKatakana", ConversionCommand::DisplayAsFullKatakana),
    ("DisplayAsHalfKatakana", ConversionCommand::DisplayAsHalfKatakana),
    ("TranslateHalfWidth", ConversionCommand::TranslateHalfWidth),
    ("TranslateFullASCII", ConversionCommand::TranslateFullAscii),
    ("TranslateHalfASCII", ConversionCommand::TranslateHalfAscii),
    ("ToggleAlphanumericMode", ConversionCommand::ToggleAlphanumericMode),
    ("DeleteSelectedCandidate", ConversionCommand::DeleteSelectedCandidate),
    ("InputModeHiragana", ConversionCommand::InputModeHiragana),
    ("InputModeFullKatakana", ConversionCommand::InputModeFullKatakana),
    ("InputModeHalfKatakana", ConversionCommand::InputModeHalfKatakana),
    ("InputModeFullAlphanumeric", ConversionCommand::InputModeFullAlphanumeric),
    ("InputModeHalfAlphanumeric", ConversionCommand::InputModeHalfAlphanumeric),
];

/// A resolved command, tagged with the vocabulary it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Direct(DirectCommand),
    Precomposition(PrecompositionCommand),
    Composition(CompositionCommand),
    Conversion(ConversionCommand),
}

impl Command {
    pub fn category(self) -> CommandCategory {
        match self {
            Command::Direct(_) => CommandCategory::Direct,
            Command::Precomposition(_) => CommandCategory::Precomposition,
            Command::Composition(_) => CommandCategory::Composition,
            Command::Conversion(_) => CommandCategory::Conversion,
        }
    }

    /// The category's insert-character command, which stub rules map to.
    /// Direct input has none.
    pub fn insert_character(category: CommandCategory) -> Option<Command> {
        match category {
            CommandCategory::Direct => None,
            CommandCategory::Precomposition => Some(Command::Precomposition(
                PrecompositionCommand::InsertCharacter,
            )),
            CommandCategory::Composition => {
                Some(Command::Composition(CompositionCommand::InsertCharacter))
            }
            CommandCategory::Conversion => {
                Some(Command::Conversion(ConversionCommand::InsertCharacter))
            }
        }
    }

    pub fn as_direct(self) -> Option<DirectCommand> {
        match self {
            Command::Direct(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_precomposition(self) -> Option<PrecompositionCommand> {
        match self {
            Command::Precomposition(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_composition(self) -> Option<CompositionCommand> {
        match self {
            Command::Composition(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_conversion(self) -> Option<ConversionCommand> {
        match self {
            Command::Conversion(c) => Some(c),
            _ => None,
        }
    }
}

/// Bidirectional name table for one command category.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    category: CommandCategory,
    by_name: HashMap<&'static str, Command>,
    by_command: HashMap<Command, &'static str>,
}

impl CommandRegistry {
    fn from_table<C: Copy>(
        category: CommandCategory,
        table: &[(&'static str, C)],
        wrap: fn(C) -> Command,
    ) -> Self {
        let mut by_name = HashMap::with_capacity(table.len());
        let mut by_command = HashMap::with_capacity(table.len());
        for (name, command) in table {
            let command = wrap(*command);
            by_name.insert(*name, command);
            by_command.entry(command).or_insert(*name);
        }
        Self {
            category,
            by_name,
            by_command,
        }
    }

    pub fn new(category: CommandCategory) -> Self {
        match category {
            CommandCategory::Direct => {
                Self::from_table(category, DIRECT_COMMANDS, Command::Direct)
            }
            CommandCategory::Precomposition => Self::from_table(
                category,
                PRECOMPOSITION_COMMANDS,
                Command::Precomposition,
            ),
            CommandCategory::Composition => {
                Self::from_table(category, COMPOSITION_COMMANDS, Command::Composition)
            }
            CommandCategory::Conversion => {
                Self::from_table(category, CONVERSION_COMMANDS, Command::Conversion)
            }
        }
    }

    pub fn category(&self) -> CommandCategory {
        self.category
    }

    pub fn command(&self, name: &str) -> Option<Command> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, command: Command) -> Option<&'static str> {
        self.by_command.get(&command).copied()
    }

    /// Sorted command names, for configuration UIs.
    pub fn names(&self) -> BTreeSet<&'static str> {
        self.by_name.keys().copied().collect()
    }
}

/// The four registries, built once per keymap manager.
#[derive(Debug, Clone)]
pub struct CommandRegistries {
    direct: CommandRegistry,
    precomposition: CommandRegistry,
    composition: CommandRegistry,
    conversion: CommandRegistry,
}

impl CommandRegistries {
    pub fn new() -> Self {
        Self {
            direct: CommandRegistry::new(CommandCategory::Direct),
            precomposition: CommandRegistry::new(CommandCategory::Precomposition),
            composition: CommandRegistry::new(CommandCategory::Composition),
            conversion: CommandRegistry::new(CommandCategory::Conversion),
        }
    }

    pub fn get(&self, category: CommandCategory) -> &CommandRegistry {
        match category {
            CommandCategory::Direct => &self.direct,
            CommandCategory::Precomposition => &self.precomposition,
            CommandCategory::Composition => &self.composition,
            CommandCategory::Conversion => &self.conversion,
        }
    }
}

impl Default for CommandRegistries {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_round_trips_every_name() {
        let registries = CommandRegistries::new();
        for category in CommandCategory::ALL {
            let registry = registries.get(category);
            assert_eq!(registry.category(), category);
            for name in registry.names() {
                let command = registry.command(name).unwrap();
                assert_eq!(command.category(), category);
                assert_eq!(registry.name(command), Some(name));
            }
        }
    }

    #[test]
    fn test_tables_have_unique_names() {
        assert_eq!(
            CommandRegistry::new(CommandCategory::Direct).names().len(),
            DIRECT_COMMANDS.len()
        );
        assert_eq!(
            CommandRegistry::new(CommandCategory::Precomposition).names().len(),
            PRECOMPOSITION_COMMANDS.len()
        );
        assert_eq!(
            CommandRegistry::new(CommandCategory::Composition).names().len(),
            COMPOSITION_COMMANDS.len()
        );
        assert_eq!(
            CommandRegistry::new(CommandCategory::Conversion).names().len(),
            CONVERSION_COMMANDS.len()
        );
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let registry = CommandRegistry::new(CommandCategory::Composition);
        assert_eq!(
            registry.command("Commit"),
            Some(Command::Composition(CompositionCommand::Commit))
        );
        assert_eq!(registry.command("commit"), None);
        assert_eq!(registry.command("SegmentFocusLeft"), None);
    }

    #[test]
    fn test_insert_character() {
        assert_eq!(Command::insert_character(CommandCategory::Direct), None);
        assert_eq!(
            Command::insert_character(CommandCategory::Conversion)
                .and_then(Command::as_conversion),
            Some(ConversionCommand::InsertCharacter)
        );
        assert_eq!(
            Command::Precomposition(PrecompositionCommand::ImeOff).as_composition(),
            None
        );
    }
}
