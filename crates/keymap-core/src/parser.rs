use crate::error::ParseError;
use crate::key_names::{modifier_from_name, special_key_from_name};
use crate::types::KeyEvent;
use anyhow::Context;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, warn};

/// Reads a keymap table file and decodes it to text.
pub fn read_table_file<P: AsRef<Path>>(path: P) -> anyhow::Result<String> {
    let path = path.as_ref();
    let raw = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    Ok(decode_table_bytes(&raw).into_owned())
}

/// Decodes a table resource: BOM first, then UTF-8, then Shift_JIS.
pub fn decode_table_bytes(raw: &[u8]) -> Cow<'_, str> {
    if let Some((enc, bom_len)) = encoding_rs::Encoding::for_bom(raw) {
        debug!("Decoded using BOM: {}", enc.name());
        let (cow, _, had_errors) = enc.decode(&raw[bom_len..]);
        if had_errors {
            warn!("Decode had errors (replacement characters used)");
        }
        return cow;
    }

    match std::str::from_utf8(raw) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => {
            debug!("UTF-8 decode failed, falling back to Shift_JIS");
            let (cow, _, had_errors) = encoding_rs::SHIFT_JIS.decode(raw);
            if had_errors {
                warn!("Shift_JIS decode had errors");
            }
            cow
        }
    }
}

/// Parses a KeySpec such as `"Ctrl Shift a"` or `"Hankaku/Zenkaku"`.
pub fn parse_key_spec(spec: &str) -> Result<KeyEvent, ParseError> {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    if !spec.is_ascii() {
        // A lone non-ASCII character (e.g. a kana key) is accepted as-is.
        let lone_literal = tokens.len() == 1 && tokens[0].chars().count() == 1;
        if !lone_literal {
            return Err(ParseError::NonAscii(spec.to_string()));
        }
    }
    parse_key_spec_list(&tokens)
}

/// Parses already-split tokens. Used when building events in code.
pub fn parse_key_spec_list<S: AsRef<str>>(tokens: &[S]) -> Result<KeyEvent, ParseError> {
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut event = KeyEvent::default();
    for token in tokens {
        let token = token.as_ref();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if event.code.is_some() {
                return Err(ParseError::MultipleCharacters);
            }
            event.code = Some(c as u32);
            continue;
        }

        let name = token.to_ascii_lowercase();
        if let Some(mods) = modifier_from_name(&name) {
            event.modifiers |= mods;
        } else if let Some(key) = special_key_from_name(&name) {
            if event.special_key.is_some() {
                return Err(ParseError::MultipleSpecialKeys);
            }
            event.special_key = Some(key);
        } else {
            return Err(ParseError::UnknownToken(token.to_string()));
        }
    }
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Modifiers, SpecialKey};

    fn key(modifiers: Modifiers, special_key: Option<SpecialKey>, code: Option<char>) -> KeyEvent {
        KeyEvent {
            modifiers,
            special_key,
            code: code.map(|c| c as u32),
            text: None,
        }
    }

    #[test]
    fn test_parse_key_spec() {
        assert_eq!(parse_key_spec("a"), Ok(key(Modifiers::empty(), None, Some('a'))));
        assert_eq!(
            parse_key_spec("Ctrl Shift a"),
            Ok(key(Modifiers::CTRL | Modifiers::SHIFT, None, Some('a')))
        );
        assert_eq!(
            parse_key_spec("CAPS H"),
            Ok(key(Modifiers::CAPS, None, Some('H')))
        );
        assert_eq!(
            parse_key_spec("Shift Space"),
            Ok(key(Modifiers::SHIFT, Some(SpecialKey::Space), None))
        );
        assert_eq!(
            parse_key_spec("control option F12"),
            Ok(key(Modifiers::CTRL | Modifiers::ALT, Some(SpecialKey::F12), None))
        );
        assert_eq!(parse_key_spec("Shift"), Ok(key(Modifiers::SHIFT, None, None)));
        assert_eq!(
            parse_key_spec("  Ctrl   Enter "),
            Ok(key(Modifiers::CTRL, Some(SpecialKey::Enter), None))
        );
    }

    #[test]
    fn test_side_modifiers_set_base_flag() {
        let e = parse_key_spec("LeftCtrl RightShift x").unwrap();
        assert_eq!(
            e.modifiers,
            Modifiers::CTRL | Modifiers::LEFT_CTRL | Modifiers::SHIFT | Modifiers::RIGHT_SHIFT
        );
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            parse_key_spec("return").unwrap().special_key,
            Some(SpecialKey::Enter)
        );
        assert_eq!(
            parse_key_spec("DEL").unwrap().special_key,
            Some(SpecialKey::Delete)
        );
        assert_eq!(
            parse_key_spec("Hankaku/Zenkaku").unwrap().special_key,
            Some(SpecialKey::Hankaku)
        );
        assert_eq!(
            parse_key_spec("Hiragana").unwrap().special_key,
            Some(SpecialKey::Kana)
        );
        assert_eq!(
            parse_key_spec("NUMPAD0").unwrap().special_key,
            Some(SpecialKey::Numpad0)
        );
        assert_eq!(
            parse_key_spec("KeyUp Shift").unwrap().modifiers,
            Modifiers::KEY_UP | Modifiers::SHIFT
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_key_spec(""), Err(ParseError::Empty));
        assert_eq!(parse_key_spec("   "), Err(ParseError::Empty));
        assert_eq!(parse_key_spec("a b"), Err(ParseError::MultipleCharacters));
        assert_eq!(
            parse_key_spec("Enter Space"),
            Err(ParseError::MultipleSpecialKeys)
        );
        assert_eq!(
            parse_key_spec("Ctrl Foo"),
            Err(ParseError::UnknownToken("Foo".into()))
        );
        let empty: [&str; 0] = [];
        assert_eq!(parse_key_spec_list(&empty), Err(ParseError::Empty));
    }

    #[test]
    fn test_non_ascii_literal() {
        assert_eq!(
            parse_key_spec("あ"),
            Ok(key(Modifiers::empty(), None, Some('あ')))
        );
        assert!(matches!(
            parse_key_spec("Ctrl あ"),
            Err(ParseError::NonAscii(_))
        ));
        assert!(matches!(
            parse_key_spec("ひらがな"),
            Err(ParseError::NonAscii(_))
        ));
    }

    #[test]
    fn test_parse_key_spec_list() {
        let e = parse_key_spec_list(&["ctrl", "ひ"]).unwrap();
        assert_eq!(e.modifiers, Modifiers::CTRL);
        assert_eq!(e.code, Some('ひ' as u32));
    }

    #[test]
    fn test_display_reparses() {
        for spec in ["Ctrl Shift a", "LeftAlt F4", "Caps H", "Shift Space", "Alt KeyUp ?"] {
            let e = parse_key_spec(spec).unwrap();
            assert_eq!(parse_key_spec(&e.to_string()).unwrap(), e, "{}", spec);
        }
    }

    #[test]
    fn test_decode_sjis() {
        // "テスト" in Shift_JIS
        let sjis_bytes = vec![0x83, 0x65, 0x83, 0x58, 0x83, 0x67];
        let decoded = decode_table_bytes(&sjis_bytes);
        assert_eq!(decoded, "テスト");
    }

    #[test]
    fn test_decode_utf8() {
        let utf8_bytes = "テスト".as_bytes();
        let decoded = decode_table_bytes(utf8_bytes);
        assert_eq!(decoded, "テスト");
    }

    #[test]
    fn test_decode_utf8_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("status\tkey\tcommand".as_bytes());
        assert_eq!(decode_table_bytes(&bytes), "status\tkey\tcommand");
    }
}
