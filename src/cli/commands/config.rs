//! Config command handler

use crate::args::ConfigSubcommand;
use family_tree::config::Config;
use std::io::{self, Write};

/// Dispatch config subcommands
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) {
    let result = match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            show_all(config);
            Ok(())
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => config
            .get(&key)
            .map(|value| println!("{value}"))
            .ok_or_else(|| format!("✗ Unknown config key: '{key}'")),
        Some(ConfigSubcommand::Set { key, value }) => {
            update(config, &key, |c| c.set(&key, &value)).map(|effective| {
                println!("✓ Set {key} = {effective}");
            })
        }
        Some(ConfigSubcommand::Unset { key }) => {
            update(config, &key, |c| c.unset(&key, defaults)).map(|effective| {
                println!("✓ Reset {key} to default ({effective})");
            })
        }
        Some(ConfigSubcommand::Reset) => reset(),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

fn show_all(config: &Config) {
    println!("\n=== familytree configuration ===");
    println!("({})\n", Config::get_config_file_path().display());
    print!("{config}");
}

/// Apply one change, persist it and return the value as stored
///
/// Stored values can differ from the input (`EN` is stored as `en`, URLs are
/// trimmed), so the caller echoes what will actually be used.
fn update(
    config: &mut Config,
    key: &str,
    change: impl FnOnce(&mut Config) -> Result<(), String>,
) -> Result<String, String> {
    let effective = apply(config, key, change)?;
    config
        .save()
        .map_err(|e| format!("✗ Failed to save config: {e}"))?;
    Ok(effective)
}

fn apply(
    config: &mut Config,
    key: &str,
    change: impl FnOnce(&mut Config) -> Result<(), String>,
) -> Result<String, String> {
    change(config).map_err(|e| format!("✗ {e}"))?;
    config
        .get(key)
        .ok_or_else(|| format!("✗ Unknown config key: '{key}'"))
}

fn reset() -> Result<(), String> {
    if !Config::get_config_file_path().exists() {
        println!("✓ Config is already at defaults");
        return Ok(());
    }

    if !confirm("Reset familytree config to defaults? (y/n): ") {
        println!("✗ Reset cancelled");
        return Ok(());
    }

    Config::reset().map_err(|e| format!("✗ Failed to remove config file: {e}"))?;
    println!("✓ Config reset to defaults");
    Ok(())
}

fn confirm(prompt: &str) -> bool {
    print!("{prompt}");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    matches!(response.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_echoes_stored_value() {
        let mut config = Config::from_defaults();
        let effective = apply(&mut config, "locale", |c| c.set("locale", "EN")).unwrap();
        assert_eq!(effective, "en");

        let effective = apply(&mut config, "card-width", |c| c.set("card-width", "180")).unwrap();
        assert_eq!(effective, "180");
    }

    #[test]
    fn test_apply_reports_rejected_values() {
        let mut config = Config::from_defaults();
        let before = config.source.url.clone();

        let err = apply(&mut config, "url", |c| c.set("url", "not-a-link")).unwrap_err();
        assert!(err.starts_with("✗ Invalid value for 'url'"));
        assert_eq!(config.source.url, before);

        let err = apply(&mut config, "locale", |c| c.set("locale", "de")).unwrap_err();
        assert!(err.contains("Unknown locale"));
    }

    #[test]
    fn test_apply_unset_restores_default() {
        let defaults = Config::from_defaults();
        let mut config = Config::from_defaults();
        config.set("padding", "3").unwrap();

        let effective = apply(&mut config, "padding", |c| c.unset("padding", &defaults)).unwrap();
        assert_eq!(effective, defaults.layout.padding.to_string());
    }
}
