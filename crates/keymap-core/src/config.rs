use serde::{Deserialize, Serialize};

/// A named keymap table: a platform preset, the user's custom table, an
/// overlay, or any other table a [`ProfileSource`](crate::source::ProfileSource)
/// can find by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeymapProfile {
    /// Platform default.
    None,
    /// Table text stored in [`KeyMapConfig::custom_keymap_table`].
    Custom,
    Atok,
    MsIme,
    Kotoeri,
    Mobile,
    ChromeOs,
    OverlayHenkanMuhenkanToImeOnOff,
    Named(String),
}

impl Default for KeymapProfile {
    fn default() -> Self {
        Self::None
    }
}

impl KeymapProfile {
    pub fn platform_default() -> Self {
        if cfg!(target_os = "macos") {
            Self::Kotoeri
        } else {
            Self::MsIme
        }
    }

    /// Replaces `None` with the platform default.
    pub fn resolve(&self) -> Self {
        match self {
            Self::None => Self::platform_default(),
            other => other.clone(),
        }
    }

    /// Resource file name, or `None` for the custom table.
    pub fn file_name(&self) -> Option<String> {
        let name = match self {
            Self::None => return Self::platform_default().file_name(),
            Self::Custom => return None,
            Self::Atok => "atok.tsv".to_string(),
            Self::MsIme => "ms-ime.tsv".to_string(),
            Self::Kotoeri => "kotoeri.tsv".to_string(),
            Self::Mobile => "mobile.tsv".to_string(),
            Self::ChromeOs => "chromeos.tsv".to_string(),
            Self::OverlayHenkanMuhenkanToImeOnOff => {
                "overlay_henkan_muhenkan_to_ime_on_off.tsv".to_string()
            }
            Self::Named(name) => format!("{}.tsv", name),
        };
        Some(name)
    }
}

/// Everything a keymap manager is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyMapConfig {
    pub profile: KeymapProfile,
    pub custom_keymap_table: String,
    /// Applied in order on top of `profile`; later overlays win.
    pub overlay_keymaps: Vec<KeymapProfile>,
}

impl KeyMapConfig {
    pub fn new(profile: KeymapProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    pub fn custom(table: impl Into<String>) -> Self {
        Self {
            profile: KeymapProfile::Custom,
            custom_keymap_table: table.into(),
            overlay_keymaps: Vec::new(),
        }
    }

    pub fn with_overlay(mut self, overlay: KeymapProfile) -> Self {
        self.overlay_keymaps.push(overlay);
        self
    }

    fn uses_custom_table(&self) -> bool {
        self.profile == KeymapProfile::Custom
            || self.overlay_keymaps.contains(&KeymapProfile::Custom)
    }

    /// True when both configs would build keymaps that behave identically,
    /// so an existing manager can be reused.
    pub fn is_same_applicable(&self, other: &KeyMapConfig) -> bool {
        if self.profile.resolve() != other.profile.resolve() {
            return false;
        }
        let overlays = |c: &KeyMapConfig| -> Vec<KeymapProfile> {
            c.overlay_keymaps.iter().map(KeymapProfile::resolve).collect()
        };
        if overlays(self) != overlays(other) {
            return false;
        }
        if self.uses_custom_table() && self.custom_keymap_table != other.custom_keymap_table {
            return false;
        }
        true
    }
}
