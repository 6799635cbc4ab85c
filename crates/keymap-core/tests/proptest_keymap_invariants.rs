//! Property-based tests for key normalization and lookup.
//!
//! 1. **Determinism**: fingerprinting the same event twice gives the same key.
//! 2. **Idempotence**: normalizing a normalized event changes nothing.
//! 3. **Control codes**: raw codes 1..=31 never encode; 0 and >= 32 always do.
//! 4. **CapsLock invariance**: a lookup with CapsLock on and the letter case
//!    flipped resolves exactly like the plain lookup.
//! 5. **Display re-parse**: printing an event and parsing it back yields the
//!    same event.

use keymap_core::key_event_util::{fingerprint, normalize_modifiers};
use keymap_core::keymap::{KeyMapManager, KeyMapState};
use keymap_core::parser::parse_key_spec;
use keymap_core::{KeyEvent, KeyEventError, KeyMapConfig, KeymapProfile, Modifiers, SpecialKey};
use proptest::prelude::*;
use std::sync::OnceLock;

fn manager() -> &'static KeyMapManager {
    static MANAGER: OnceLock<KeyMapManager> = OnceLock::new();
    MANAGER.get_or_init(|| KeyMapManager::new(&KeyMapConfig::new(KeymapProfile::MsIme)))
}

fn any_modifiers() -> impl Strategy<Value = Modifiers> {
    any::<u16>().prop_map(Modifiers::from_bits_truncate)
}

fn base_modifiers() -> impl Strategy<Value = Modifiers> {
    (0u16..8).prop_map(|bits| {
        Modifiers::from_bits_truncate(bits) & (Modifiers::CTRL | Modifiers::ALT | Modifiers::SHIFT)
    })
}

fn any_special_key() -> impl Strategy<Value = Option<SpecialKey>> {
    prop_oneof![
        Just(None),
        (1u16..=SpecialKey::TextInput.as_u16()).prop_map(SpecialKey::from_u16),
    ]
}

fn printable_code() -> impl Strategy<Value = Option<u32>> {
    prop_oneof![Just(None), (0x21u32..0x7f).prop_map(Some)]
}

fn any_event() -> impl Strategy<Value = KeyEvent> {
    (any_modifiers(), any_special_key(), printable_code()).prop_map(
        |(modifiers, special_key, code)| KeyEvent {
            modifiers,
            special_key,
            code,
            text: None,
        },
    )
}

fn any_state() -> impl Strategy<Value = KeyMapState> {
    (0..KeyMapState::COUNT).prop_map(|i| KeyMapState::ALL[i])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn fingerprint_is_deterministic(event in any_event()) {
        prop_assert_eq!(fingerprint(&event), fingerprint(&event.clone()));
    }

    #[test]
    fn normalization_is_idempotent(event in any_event()) {
        let once = normalize_modifiers(&event);
        prop_assert_eq!(normalize_modifiers(&once), once.clone());
        prop_assert!(!once.modifiers.intersects(Modifiers::IGNORABLE));
    }

    #[test]
    fn control_codes_never_encode(code in 0u32..0x200) {
        let event = KeyEvent { code: Some(code), ..KeyEvent::default() };
        if (1..=31).contains(&code) {
            prop_assert_eq!(fingerprint(&event), Err(KeyEventError::ControlCharacterCode(code)));
        } else {
            prop_assert!(fingerprint(&event).is_ok());
        }
    }

    #[test]
    fn caps_lock_does_not_change_lookups(
        state in any_state(),
        modifiers in base_modifiers(),
        letter in proptest::char::range('a', 'z'),
    ) {
        let plain = KeyEvent::from_char(letter).with_modifiers(modifiers);
        let caps = KeyEvent::from_char(letter.to_ascii_uppercase())
            .with_modifiers(modifiers | Modifiers::CAPS);
        prop_assert_eq!(
            manager().get_command(state, &plain),
            manager().get_command(state, &caps)
        );
    }

    #[test]
    fn display_reparses(
        modifiers in base_modifiers(),
        special_key in any_special_key(),
        code in printable_code(),
    ) {
        prop_assume!(special_key.is_some() || code.is_some());
        prop_assume!(special_key.is_none() || code.is_none());
        let event = KeyEvent { modifiers, special_key, code, text: None };
        let shown = event.to_string();
        prop_assert_eq!(parse_key_spec(&shown), Ok(event), "{}", shown);
    }
}
