use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Modifier keys attached to a key event.
    ///
    /// Side-qualified flags (`LEFT_CTRL`, ...) are always accompanied by their
    /// base flag when produced by the parser.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct Modifiers: u16 {
        const CTRL = 0x0001;
        const ALT = 0x0002;
        const SHIFT = 0x0004;
        const KEY_DOWN = 0x0008;
        const KEY_UP = 0x0010;
        const LEFT_CTRL = 0x0020;
        const LEFT_ALT = 0x0040;
        const LEFT_SHIFT = 0x0080;
        const RIGHT_CTRL = 0x0100;
        const RIGHT_ALT = 0x0200;
        const RIGHT_SHIFT = 0x0400;
        const CAPS = 0x0800;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

impl Modifiers {
    /// Left/Right variants of every base modifier.
    pub const SIDES: Modifiers = Modifiers::LEFT_CTRL
        .union(Modifiers::RIGHT_CTRL)
        .union(Modifiers::LEFT_ALT)
        .union(Modifiers::RIGHT_ALT)
        .union(Modifiers::LEFT_SHIFT)
        .union(Modifiers::RIGHT_SHIFT);

    /// Flags dropped before every rule-table lookup.
    pub const IGNORABLE: Modifiers = Modifiers::CAPS.union(Modifiers::SIDES);

    /// Expands base modifiers in `self` to also cover their side variants.
    pub fn with_sides(self) -> Self {
        let mut out = self;
        if self.contains(Modifiers::CTRL) {
            out |= Modifiers::LEFT_CTRL | Modifiers::RIGHT_CTRL;
        }
        if self.contains(Modifiers::ALT) {
            out |= Modifiers::LEFT_ALT | Modifiers::RIGHT_ALT;
        }
        if self.contains(Modifiers::SHIFT) {
            out |= Modifiers::LEFT_SHIFT | Modifiers::RIGHT_SHIFT;
        }
        out
    }
}

/// Named non-printable or IME-specific key.
///
/// The discriminant is the value packed into a [`Fingerprint`]; zero is
/// reserved for "no special key".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum SpecialKey {
    Digit = 1,
    On,
    Off,
    Space,
    Enter,
    Left,
    Right,
    Up,
    Down,
    Escape,
    Delete,
    Backspace,
    Henkan,
    Muhenkan,
    Kana,
    Home,
    End,
    Tab,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    PageUp,
    PageDown,
    Insert,
    Hankaku,
    Numpad0,
    Numpad1,
    Numpad2,
    Numpad3,
    Numpad4,
    Numpad5,
    Numpad6,
    Numpad7,
    Numpad8,
    Numpad9,
    Multiply,
    Add,
    Separator,
    Subtract,
    Decimal,
    Divide,
    Equals,
    Eisu,
    Hangul,
    Hanja,
    Katakana,
    CapsLock,
    UndefinedKey,
    Comma,
    Clear,
    VirtualLeft,
    VirtualRight,
    VirtualEnter,
    VirtualUp,
    VirtualDown,
    Kanji,
    /// Generic "printable text" marker used by stub rules.
    TextInput,
}

impl SpecialKey {
    pub const FUNCTION_KEYS: [SpecialKey; 24] = [
        SpecialKey::F1,
        SpecialKey::F2,
        SpecialKey::F3,
        SpecialKey::F4,
        SpecialKey::F5,
        SpecialKey::F6,
        SpecialKey::F7,
        SpecialKey::F8,
        SpecialKey::F9,
        SpecialKey::F10,
        SpecialKey::F11,
        SpecialKey::F12,
        SpecialKey::F13,
        SpecialKey::F14,
        SpecialKey::F15,
        SpecialKey::F16,
        SpecialKey::F17,
        SpecialKey::F18,
        SpecialKey::F19,
        SpecialKey::F20,
        SpecialKey::F21,
        SpecialKey::F22,
        SpecialKey::F23,
        SpecialKey::F24,
    ];

    pub const NUMPAD_DIGITS: [SpecialKey; 10] = [
        SpecialKey::Numpad0,
        SpecialKey::Numpad1,
        SpecialKey::Numpad2,
        SpecialKey::Numpad3,
        SpecialKey::Numpad4,
        SpecialKey::Numpad5,
        SpecialKey::Numpad6,
        SpecialKey::Numpad7,
        SpecialKey::Numpad8,
        SpecialKey::Numpad9,
    ];

    pub const fn as_u16(self) -> u16 {
        self as u16
    }

    pub fn from_u16(value: u16) -> Option<Self> {
        crate::key_names::special_key_from_u16(value)
    }
}

/// One physical key press as delivered by the OS translation layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub modifiers: Modifiers,
    pub special_key: Option<SpecialKey>,
    /// Literal character code point.
    pub code: Option<u32>,
    /// Literal payload when no single code point is available.
    pub text: Option<String>,
}

impl KeyEvent {
    pub fn from_char(c: char) -> Self {
        Self {
            code: Some(c as u32),
            ..Self::default()
        }
    }

    pub fn from_special(key: SpecialKey) -> Self {
        Self {
            special_key: Some(key),
            ..Self::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }

    pub fn code_char(&self) -> Option<char> {
        self.code.and_then(char::from_u32)
    }
}

/// Canonical KeySpec rendering, e.g. `Ctrl Shift a`.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = crate::key_names::modifier_display_names(self.modifiers)
            .into_iter()
            .map(str::to_string)
            .collect();
        if let Some(key) = self.special_key {
            parts.push(crate::key_names::special_key_name(key).to_string());
        }
        if let Some(c) = self.code_char().filter(|c| !c.is_whitespace() && !c.is_control()) {
            parts.push(c.to_string());
        } else if let Some(code) = self.code {
            parts.push(format!("U+{:04X}", code));
        }
        if parts.is_empty() {
            if let Some(text) = &self.text {
                return write!(f, "{}", text);
            }
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Packed lookup key: modifiers(16) | special key(16) | code(32).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Fingerprint(u64);

impl Fingerprint {
    pub const fn from_parts(modifiers: u16, special_key: u16, code: u32) -> Self {
        Self(((modifiers as u64) << 48) | ((special_key as u64) << 32) | code as u64)
    }

    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn modifiers(self) -> Modifiers {
        Modifiers::from_bits_retain((self.0 >> 48) as u16)
    }

    pub fn special_key(self) -> Option<SpecialKey> {
        SpecialKey::from_u16((self.0 >> 32) as u16)
    }

    pub const fn code(self) -> u32 {
        self.0 as u32
    }

    /// Rebuilds the (normalized) key event this fingerprint was made from.
    pub fn to_key_event(self) -> KeyEvent {
        let code = self.code();
        KeyEvent {
            modifiers: self.modifiers(),
            special_key: self.special_key(),
            code: if code == 0 { None } else { Some(code) },
            text: None,
        }
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}
