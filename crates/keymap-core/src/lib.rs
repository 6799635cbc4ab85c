pub mod command;
pub mod config;
pub mod error;
pub mod key_event_util;
pub mod key_names;
pub mod keymap;
pub mod parser;
pub mod rule_table;
pub mod shared;
pub mod source;
pub mod types;

pub use command::{Command, CommandCategory, CommandRegistries, CommandRegistry};
pub use config::{KeyMapConfig, KeymapProfile};
pub use error::{KeyEventError, LoadErrorKind, LoadLineError, ParseError};
pub use keymap::{KeyMapManager, KeyMapState};
pub use parser::{parse_key_spec, parse_key_spec_list};
pub use shared::SharedKeyMap;
pub use source::{DirectorySource, EmbeddedProfiles, ProfileSource};
pub use types::{Fingerprint, KeyEvent, Modifiers, SpecialKey};
