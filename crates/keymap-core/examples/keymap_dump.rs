use keymap_core::keymap::{KeyMapManager, KeyMapState};
use keymap_core::parser::parse_key_spec;
use keymap_core::source::DirectorySource;
use keymap_core::{KeyMapConfig, KeymapProfile};

// Usage: keymap_dump [profile-name [table-dir]] [-- key spec ...]
fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (opts, specs) = match args.iter().position(|a| a == "--") {
        Some(i) => (&args[..i], &args[i + 1..]),
        None => (&args[..], &[][..]),
    };

    let profile = match opts.first().map(String::as_str) {
        None | Some("default") => KeymapProfile::None,
        Some("ms-ime") => KeymapProfile::MsIme,
        Some("atok") => KeymapProfile::Atok,
        Some("kotoeri") => KeymapProfile::Kotoeri,
        Some("mobile") => KeymapProfile::Mobile,
        Some("chromeos") => KeymapProfile::ChromeOs,
        Some(other) => KeymapProfile::Named(other.to_string()),
    };
    let config = KeyMapConfig::new(profile);
    let manager = match opts.get(1) {
        Some(dir) => KeyMapManager::with_source(&config, &DirectorySource::new(dir)),
        None => KeyMapManager::new(&config),
    };

    println!("Profile: {:?} (fallback: {})", config.profile, manager.used_fallback());
    for error in manager.load_errors() {
        println!("  invalid {}", error);
    }
    for state in KeyMapState::ALL {
        println!("  [{}] {} rules", state, manager.table(state).len());
    }

    for spec in specs {
        let key = parse_key_spec(spec)?;
        println!("{}:", key);
        for state in KeyMapState::ALL {
            match manager.get_command(state, &key)? {
                Some(command) => {
                    let name = manager.name_for(command.category(), command).unwrap_or("?");
                    println!("  {:<20} {}", state.name(), name);
                }
                None => println!("  {:<20} -", state.name()),
            }
        }
    }

    Ok(())
}
