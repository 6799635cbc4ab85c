use crate::config::KeymapProfile;
use crate::parser::read_table_file;
use anyhow::{anyhow, Result};
use std::borrow::Cow;
use std::path::{Path, PathBuf};

const MS_IME: &str = include_str!("../data/keymap/ms-ime.tsv");
const ATOK: &str = include_str!("../data/keymap/atok.tsv");
const KOTOERI: &str = include_str!("../data/keymap/kotoeri.tsv");
const MOBILE: &str = include_str!("../data/keymap/mobile.tsv");
const CHROMEOS: &str = include_str!("../data/keymap/chromeos.tsv");
const OVERLAY_HENKAN_MUHENKAN: &str =
    include_str!("../data/keymap/overlay_henkan_muhenkan_to_ime_on_off.tsv");

/// Where keymap tables come from.
///
/// The custom profile is never opened through a source; its text lives in
/// the configuration.
pub trait ProfileSource {
    fn open(&self, profile: &KeymapProfile) -> Result<Cow<'static, str>>;
}

/// Tables compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedProfiles;

impl EmbeddedProfiles {
    pub fn table(profile: &KeymapProfile) -> Option<&'static str> {
        match profile.resolve() {
            KeymapProfile::MsIme => Some(MS_IME),
            KeymapProfile::Atok => Some(ATOK),
            KeymapProfile::Kotoeri => Some(KOTOERI),
            KeymapProfile::Mobile => Some(MOBILE),
            KeymapProfile::ChromeOs => Some(CHROMEOS),
            KeymapProfile::OverlayHenkanMuhenkanToImeOnOff => Some(OVERLAY_HENKAN_MUHENKAN),
            _ => None,
        }
    }
}

impl ProfileSource for EmbeddedProfiles {
    fn open(&self, profile: &KeymapProfile) -> Result<Cow<'static, str>> {
        Self::table(profile)
            .map(Cow::Borrowed)
            .ok_or_else(|| anyhow!("no built-in keymap for {:?}", profile))
    }
}

/// Tables read from `<dir>/<profile file name>`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ProfileSource for DirectorySource {
    fn open(&self, profile: &KeymapProfile) -> Result<Cow<'static, str>> {
        let name = profile
            .file_name()
            .ok_or_else(|| anyhow!("{:?} has no keymap file", profile))?;
        Ok(Cow::Owned(read_table_file(self.dir.join(name))?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_tables() {
        for profile in [
            KeymapProfile::None,
            KeymapProfile::MsIme,
            KeymapProfile::Atok,
            KeymapProfile::Kotoeri,
            KeymapProfile::Mobile,
            KeymapProfile::ChromeOs,
            KeymapProfile::OverlayHenkanMuhenkanToImeOnOff,
        ] {
            let table = EmbeddedProfiles.open(&profile).unwrap();
            assert!(table.starts_with("status\tkey\tcommand"), "{:?}", profile);
        }
        assert!(EmbeddedProfiles.open(&KeymapProfile::Custom).is_err());
        assert!(EmbeddedProfiles
            .open(&KeymapProfile::Named("emacs".into()))
            .is_err());
    }

    #[test]
    fn test_directory_source() {
        let dir = std::env::temp_dir().join(format!("keymap-source-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("emacs.tsv"),
            "status\tkey\tcommand\nComposition\tCtrl g\tCancel\n",
        )
        .unwrap();

        let source = DirectorySource::new(&dir);
        let text = source.open(&KeymapProfile::Named("emacs".into())).unwrap();
        assert!(text.contains("Ctrl g"));
        assert!(source.open(&KeymapProfile::Atok).is_err());
        assert!(source.open(&KeymapProfile::Custom).is_err());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
