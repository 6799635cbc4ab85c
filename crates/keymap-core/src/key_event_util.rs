//! Normalization and fingerprinting of key events.
//!
//! Every rule-table lookup goes through [`normalize_modifiers`] and then
//! [`fingerprint`]. Normalization collapses side-qualified modifiers into
//! their base flag and undoes the letter-case flip CapsLock causes, so a
//! shortcut such as `Ctrl h` fires the same way with CapsLock on or off.

use crate::error::KeyEventError;
use crate::types::{Fingerprint, KeyEvent, Modifiers, SpecialKey};

/// Removes `remove` from the event's modifiers.
///
/// Removing a base modifier also removes its Left/Right variants.
pub fn remove_modifiers(event: &KeyEvent, remove: Modifiers) -> KeyEvent {
    let mut out = event.clone();
    out.modifiers = event.modifiers - remove.with_sides();
    out
}

/// Removes `ignore` from the modifiers; if CapsLock is among the removed
/// flags, flips the case of an alphabetic code back.
pub fn normalize(event: &KeyEvent, ignore: Modifiers) -> KeyEvent {
    let mut out = remove_modifiers(event, ignore);
    if ignore.contains(Modifiers::CAPS) && event.modifiers.contains(Modifiers::CAPS) {
        out.code = event.code.map(flip_ascii_case);
    }
    out
}

/// Full normalization applied before every lookup.
pub fn normalize_modifiers(event: &KeyEvent) -> KeyEvent {
    normalize(event, Modifiers::IGNORABLE)
}

/// Drops CapsLock only, keeping side-qualified flags.
pub fn strip_caps(event: &KeyEvent) -> KeyEvent {
    normalize(event, Modifiers::CAPS)
}

fn flip_ascii_case(code: u32) -> u32 {
    match char::from_u32(code) {
        Some(c @ 'A'..='Z') => c.to_ascii_lowercase() as u32,
        Some(c @ 'a'..='z') => c.to_ascii_uppercase() as u32,
        _ => code,
    }
}

/// Turns numpad keys into the literal characters they type.
pub fn normalize_numpad_key(event: &KeyEvent) -> KeyEvent {
    let Some(key) = event.special_key else {
        return event.clone();
    };
    let literal = if let Some(digit) = SpecialKey::NUMPAD_DIGITS.iter().position(|k| *k == key) {
        char::from_digit(digit as u32, 10)
    } else {
        match key {
            SpecialKey::Multiply => Some('*'),
            SpecialKey::Add => Some('+'),
            SpecialKey::Subtract => Some('-'),
            SpecialKey::Decimal => Some('.'),
            SpecialKey::Divide => Some('/'),
            SpecialKey::Equals => Some('='),
            _ => None,
        }
    };
    let mut out = event.clone();
    if let Some(c) = literal {
        out.special_key = None;
        out.code = Some(c as u32);
    }
    out
}

/// Packs an event into its lookup key. The event should be normalized.
pub fn fingerprint(event: &KeyEvent) -> Result<Fingerprint, KeyEventError> {
    let code = event.code.unwrap_or(0);
    if (1..=31).contains(&code) {
        return Err(KeyEventError::ControlCharacterCode(code));
    }
    let special = event.special_key.map_or(0, SpecialKey::as_u16);
    Ok(Fingerprint::from_parts(event.modifiers.bits(), special, code))
}

/// Fingerprint of the generic `TextInput` key.
pub fn text_input_fingerprint() -> Fingerprint {
    Fingerprint::from_parts(0, SpecialKey::TextInput.as_u16(), 0)
}

/// Generic fallback key for an unmodified printable keystroke.
pub fn key_stub(event: &KeyEvent) -> Option<Fingerprint> {
    if !event.modifiers.is_empty() || event.special_key.is_some() {
        return None;
    }
    let has_code = event.code.is_some_and(|c| c > 0x20);
    let has_text = event.text.as_deref().is_some_and(|t| !t.is_empty());
    if !has_code && !has_text {
        return None;
    }
    Some(text_input_fingerprint())
}

pub fn has_ctrl(modifiers: Modifiers) -> bool {
    modifiers.intersects(Modifiers::CTRL.with_sides())
}

pub fn has_alt(modifiers: Modifiers) -> bool {
    modifiers.intersects(Modifiers::ALT.with_sides())
}

pub fn has_shift(modifiers: Modifiers) -> bool {
    modifiers.intersects(Modifiers::SHIFT.with_sides())
}

pub fn has_caps(modifiers: Modifiers) -> bool {
    modifiers.contains(Modifiers::CAPS)
}

fn base_modifiers(modifiers: Modifiers) -> Modifiers {
    let mut base = modifiers - Modifiers::SIDES;
    if has_ctrl(modifiers) {
        base |= Modifiers::CTRL;
    }
    if has_alt(modifiers) {
        base |= Modifiers::ALT;
    }
    if has_shift(modifiers) {
        base |= Modifiers::SHIFT;
    }
    base
}

/// Ctrl and nothing else, ignoring left/right qualification.
pub fn is_ctrl(modifiers: Modifiers) -> bool {
    base_modifiers(modifiers) == Modifiers::CTRL
}

pub fn is_alt(modifiers: Modifiers) -> bool {
    base_modifiers(modifiers) == Modifiers::ALT
}

pub fn is_shift(modifiers: Modifiers) -> bool {
    base_modifiers(modifiers) == Modifiers::SHIFT
}

pub fn is_ctrl_shift(modifiers: Modifiers) -> bool {
    base_modifiers(modifiers) == Modifiers::CTRL | Modifiers::SHIFT
}

pub fn is_alt_ctrl(modifiers: Modifiers) -> bool {
    base_modifiers(modifiers) == Modifiers::CTRL | Modifiers::ALT
}

pub fn is_lower_alphabet(event: &KeyEvent) -> bool {
    matches!(event.code_char(), Some('a'..='z'))
}

pub fn is_upper_alphabet(event: &KeyEvent) -> bool {
    matches!(event.code_char(), Some('A'..='Z'))
}

pub fn is_numpad_key(event: &KeyEvent) -> bool {
    event
        .special_key
        .is_some_and(|k| (SpecialKey::Numpad0..=SpecialKey::Equals).contains(&k))
}

/// True when the event carries modifiers but no key at all.
pub fn is_modifiers_only(event: &KeyEvent) -> bool {
    !event.modifiers.is_empty()
        && event.special_key.is_none()
        && event.code.is_none()
        && event.text.as_deref().map_or(true, str::is_empty)
}
