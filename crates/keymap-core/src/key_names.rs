use crate::types::{Modifiers, SpecialKey};
use std::collections::HashMap;

/// Canonical spelling of every special key, as written in keymap tables.
const SPECIAL_KEY_NAMES: &[(&str, SpecialKey)] = &[
    ("Digit", SpecialKey::Digit),
    ("ON", SpecialKey::On),
    ("OFF", SpecialKey::Off),
    ("Space", SpecialKey::Space),
    ("Enter", SpecialKey::Enter),
    ("Left", SpecialKey::Left),
    ("Right", SpecialKey::Right),
    ("Up", SpecialKey::Up),
    ("Down", SpecialKey::Down),
    ("Escape", SpecialKey::Escape),
    ("Delete", SpecialKey::Delete),
    ("Backspace", SpecialKey::Backspace),
    ("Henkan", SpecialKey::Henkan),
    ("Muhenkan", SpecialKey::Muhenkan),
    ("Kana", SpecialKey::Kana),
    ("Home", SpecialKey::Home),
    ("End", SpecialKey::End),
    ("Tab", SpecialKey::Tab),
    ("F1", SpecialKey::F1),
    ("F2", SpecialKey::F2),
    ("F3", SpecialKey::F3),
    ("F4", SpecialKey::F4),
    ("F5", SpecialKey::F5),
    ("F6", SpecialKey::F6),
    ("F7", SpecialKey::F7),
    ("F8", SpecialKey::F8),
    ("F9", SpecialKey::F9),
    ("F10", SpecialKey::F10),
    ("F11", SpecialKey::F11),
    ("F12", SpecialKey::F12),
    ("F13", SpecialKey::F13),
    ("F14", SpecialKey::F14),
    ("F15", SpecialKey::F15),
    ("F16", SpecialKey::F16),
    ("F17", SpecialKey::F17),
    ("F18", SpecialKey::F18),
    ("F19", SpecialKey::F19),
    ("F20", SpecialKey::F20),
    ("F21", SpecialKey::F21),
    ("F22", SpecialKey::F22),
    ("F23", SpecialKey::F23),
    ("F24", SpecialKey::F24),
    ("PageUp", SpecialKey::PageUp),
    ("PageDown", SpecialKey::PageDown),
    ("Insert", SpecialKey::Insert),
    ("Hankaku/Zenkaku", SpecialKey::Hankaku),
    ("Numpad0", SpecialKey::Numpad0),
    ("Numpad1", SpecialKey::Numpad1),
    ("Numpad2", SpecialKey::Numpad2),
    ("Numpad3", SpecialKey::Numpad3),
    ("Numpad4", SpecialKey::Numpad4),
    ("Numpad5", SpecialKey::Numpad5),
    ("Numpad6", SpecialKey::Numpad6),
    ("Numpad7", SpecialKey::Numpad7),
    ("Numpad8", SpecialKey::Numpad8),
    ("Numpad9", SpecialKey::Numpad9),
    ("Multiply", SpecialKey::Multiply),
    ("Add", SpecialKey::Add),
    ("Separator", SpecialKey::Separator),
    ("Subtract", SpecialKey::Subtract),
    ("Decimal", SpecialKey::Decimal),
    ("Divide", SpecialKey::Divide),
    ("Equals", SpecialKey::Equals),
    ("Eisu", SpecialKey::Eisu),
    ("Hangul", SpecialKey::Hangul),
    ("Hanja", SpecialKey::Hanja),
    ("Katakana", SpecialKey::Katakana),
    ("CapsLock", SpecialKey::CapsLock),
    ("UndefinedKey", SpecialKey::UndefinedKey),
    ("Comma", SpecialKey::Comma),
    ("Clear", SpecialKey::Clear),
    ("VirtualLeft", SpecialKey::VirtualLeft),
    ("VirtualRight", SpecialKey::VirtualRight),
    ("VirtualEnter", SpecialKey::VirtualEnter),
    ("VirtualUp", SpecialKey::VirtualUp),
    ("VirtualDown", SpecialKey::VirtualDown),
    ("Kanji", SpecialKey::Kanji),
    ("TextInput", SpecialKey::TextInput),
];

/// Extra spellings accepted by the parser. Lowercase.
const SPECIAL_KEY_ALIASES: &[(&str, SpecialKey)] = &[
    ("return", SpecialKey::Enter),
    ("esc", SpecialKey::Escape),
    ("del", SpecialKey::Delete),
    ("bs", SpecialKey::Backspace),
    ("hiragana", SpecialKey::Kana),
    ("hankaku", SpecialKey::Hankaku),
    ("zenkaku", SpecialKey::Hankaku),
    ("ascii", SpecialKey::Eisu),
    ("pgup", SpecialKey::PageUp),
    ("pgdn", SpecialKey::PageDown),
    ("ins", SpecialKey::Insert),
];

lazy_static::lazy_static! {
    static ref MODIFIER_MAP: HashMap<&'static str, Modifiers> = {
        let mut m = HashMap::new();
        m.insert("ctrl", Modifiers::CTRL);
        m.insert("control", Modifiers::CTRL);
        m.insert("alt", Modifiers::ALT);
        m.insert("option", Modifiers::ALT);
        m.insert("meta", Modifiers::ALT);
        m.insert("super", Modifiers::ALT);
        m.insert("hyper", Modifiers::ALT);
        m.insert("shift", Modifiers::SHIFT);
        m.insert("caps", Modifiers::CAPS);
        m.insert("keydown", Modifiers::KEY_DOWN);
        m.insert("keyup", Modifiers::KEY_UP);
        m.insert("leftctrl", Modifiers::CTRL | Modifiers::LEFT_CTRL);
        m.insert("rightctrl", Modifiers::CTRL | Modifiers::RIGHT_CTRL);
        m.insert("leftalt", Modifiers::ALT | Modifiers::LEFT_ALT);
        m.insert("rightalt", Modifiers::ALT | Modifiers::RIGHT_ALT);
        m.insert("leftshift", Modifiers::SHIFT | Modifiers::LEFT_SHIFT);
        m.insert("rightshift", Modifiers::SHIFT | Modifiers::RIGHT_SHIFT);
        m
    };

    static ref SPECIAL_KEY_MAP: HashMap<String, SpecialKey> = {
        let mut m = HashMap::new();
        for (name, key) in SPECIAL_KEY_NAMES {
            m.insert(name.to_ascii_lowercase(), *key);
        }
        for (name, key) in SPECIAL_KEY_ALIASES {
            m.insert(name.to_string(), *key);
        }
        m
    };

    static ref SPECIAL_KEY_BY_VALUE: HashMap<u16, (&'static str, SpecialKey)> = SPECIAL_KEY_NAMES
        .iter()
        .map(|(name, key)| (key.as_u16(), (*name, *key)))
        .collect();
}

/// Looks up a modifier token. `name` must already be lowercase.
pub fn modifier_from_name(name: &str) -> Option<Modifiers> {
    MODIFIER_MAP.get(name).copied()
}

/// Looks up a special-key token. `name` must already be lowercase.
pub fn special_key_from_name(name: &str) -> Option<SpecialKey> {
    SPECIAL_KEY_MAP.get(name).copied()
}

pub fn special_key_name(key: SpecialKey) -> &'static str {
    SPECIAL_KEY_BY_VALUE
        .get(&key.as_u16())
        .map(|(name, _)| *name)
        .unwrap_or("UndefinedKey")
}

pub fn special_key_from_u16(value: u16) -> Option<SpecialKey> {
    SPECIAL_KEY_BY_VALUE.get(&value).map(|(_, key)| *key)
}

/// Token names for `modifiers`, in canonical order.
///
/// A side-qualified flag is printed instead of its base flag, since parsing
/// the qualified name sets both.
pub fn modifier_display_names(modifiers: Modifiers) -> Vec<&'static str> {
    let mut names = Vec::new();
    let groups = [
        (Modifiers::CTRL, Modifiers::LEFT_CTRL, Modifiers::RIGHT_CTRL, "Ctrl", "LeftCtrl", "RightCtrl"),
        (Modifiers::ALT, Modifiers::LEFT_ALT, Modifiers::RIGHT_ALT, "Alt", "LeftAlt", "RightAlt"),
        (
            Modifiers::SHIFT,
            Modifiers::LEFT_SHIFT,
            Modifiers::RIGHT_SHIFT,
            "Shift",
            "LeftShift",
            "RightShift",
        ),
    ];
    for (base, left, right, base_name, left_name, right_name) in groups {
        let sided = modifiers.intersects(left | right);
        if modifiers.contains(left) {
            names.push(left_name);
        }
        if modifiers.contains(right) {
            names.push(right_name);
        }
        if !sided && modifiers.contains(base) {
            names.push(base_name);
        }
    }
    if modifiers.contains(Modifiers::CAPS) {
        names.push("Caps");
    }
    if modifiers.contains(Modifiers::KEY_DOWN) {
        names.push("KeyDown");
    }
    if modifiers.contains(Modifiers::KEY_UP) {
        names.push("KeyUp");
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_special_key_has_a_name() {
        assert_eq!(SPECIAL_KEY_NAMES.len(), SpecialKey::TextInput.as_u16() as usize);
        for value in 1..=SpecialKey::TextInput.as_u16() {
            let key = special_key_from_u16(value).expect("value has a name");
            assert_eq!(key.as_u16(), value);
            let name = special_key_name(key).to_ascii_lowercase();
            assert_eq!(special_key_from_name(&name), Some(key));
        }
        assert_eq!(special_key_from_u16(0), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(special_key_from_name("return"), Some(SpecialKey::Enter));
        assert_eq!(special_key_from_name("del"), Some(SpecialKey::Delete));
        assert_eq!(special_key_from_name("delete"), Some(SpecialKey::Delete));
        assert_eq!(special_key_from_name("hiragana"), Some(SpecialKey::Kana));
        assert_eq!(special_key_from_name("kana"), Some(SpecialKey::Kana));
        assert_eq!(special_key_from_name("hankaku/zenkaku"), Some(SpecialKey::Hankaku));
        assert_eq!(special_key_from_name("zenkaku"), Some(SpecialKey::Hankaku));
        assert_eq!(modifier_from_name("super"), Some(Modifiers::ALT));
        assert_eq!(
            modifier_from_name("rightshift"),
            Some(Modifiers::SHIFT | Modifiers::RIGHT_SHIFT)
        );
    }

    #[test]
    fn test_modifier_display_names() {
        let m = Modifiers::CTRL | Modifiers::ALT | Modifiers::LEFT_ALT | Modifiers::CAPS;
        assert_eq!(modifier_display_names(m), vec!["Ctrl", "LeftAlt", "Caps"]);
    }
}
