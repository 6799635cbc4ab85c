use thiserror::Error;

/// A KeySpec string that could not be turned into a key event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("key spec is empty")]
    Empty,
    #[error("more than one literal character in key spec")]
    MultipleCharacters,
    #[error("more than one special key in key spec")]
    MultipleSpecialKeys,
    #[error("unknown key name: {0}")]
    UnknownToken(String),
    #[error("non-ASCII key spec: {0}")]
    NonAscii(String),
}

/// A key event that cannot be fingerprinted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyEventError {
    /// Control characters must arrive as special keys, never as raw codes.
    #[error("control character code {0:#04x} in key event")]
    ControlCharacterCode(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadErrorKind {
    #[error("expected 3 tab-separated fields, found {0}")]
    FieldCount(usize),
    #[error("unknown state: {0}")]
    UnknownState(String),
    #[error("invalid key spec {spec:?}: {source}")]
    InvalidKeySpec { spec: String, source: ParseError },
    #[error("invalid key {spec:?}: {source}")]
    Encoding { spec: String, source: KeyEventError },
    #[error("unknown command {name:?} for state {state}")]
    UnknownCommand { state: String, name: String },
}

/// One rejected rule line. Loading continues past it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line_number}: {kind}")]
pub struct LoadLineError {
    pub line_number: usize,
    pub line: String,
    pub kind: LoadErrorKind,
}
