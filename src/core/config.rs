//! Configuration module for `familytree`

use crate::core::labels::Locale;
use crate::core::tree::LayoutMetrics;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Variable expanded to the config directory in string values
const DIR_VARIABLE: &str = "$FAMILY_TREE";

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Data source configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Published spreadsheet CSV export URL
    #[serde(default)]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default)]
    pub timeout_secs: u64,
}

impl SourceConfig {
    /// Request timeout as a `Duration`
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Paths configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for rendered pages
    #[serde(default)]
    pub out_dir: String,
}

/// Display configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Page locale (ru, en)
    #[serde(default)]
    pub locale: String,
}

impl DisplayConfig {
    /// Parsed locale, falling back to the default for unknown values
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale.parse().unwrap_or_default()
    }
}

/// Card layout configuration, in pixels
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Card width
    #[serde(default)]
    pub card_width: u32,
    /// Card height
    #[serde(default)]
    pub card_height: u32,
    /// Horizontal gap between cards
    #[serde(default)]
    pub card_gap: u32,
    /// Vertical gap between generation bands
    #[serde(default)]
    pub band_gap: u32,
    /// Height of the generation label
    #[serde(default)]
    pub label_height: u32,
    /// Container padding
    #[serde(default)]
    pub padding: u32,
}

impl LayoutConfig {
    /// Box model for the render surface
    #[must_use]
    pub fn metrics(&self) -> LayoutMetrics {
        LayoutMetrics {
            card_width: f64::from(self.card_width),
            card_height: f64::from(self.card_height),
            card_gap: f64::from(self.card_gap),
            band_gap: f64::from(self.band_gap),
            label_height: f64::from(self.label_height),
            padding: f64::from(self.padding),
        }
    }

    fn field_mut(&mut self, key: &str) -> Option<&mut u32> {
        match key {
            "card_width" | "card-width" => Some(&mut self.card_width),
            "card_height" | "card-height" => Some(&mut self.card_height),
            "card_gap" | "card-gap" => Some(&mut self.card_gap),
            "band_gap" | "band-gap" => Some(&mut self.band_gap),
            "label_height" | "label-height" => Some(&mut self.label_height),
            "padding" => Some(&mut self.padding),
            _ => None,
        }
    }

    fn field(&self, key: &str) -> Option<u32> {
        match key {
            "card_width" | "card-width" => Some(self.card_width),
            "card_height" | "card-height" => Some(self.card_height),
            "card_gap" | "card-gap" => Some(self.card_gap),
            "band_gap" | "band-gap" => Some(self.band_gap),
            "label_height" | "label-height" => Some(self.label_height),
            "padding" => Some(self.padding),
            _ => None,
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Data source settings
    #[serde(default)]
    pub source: SourceConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
    /// Layout settings
    #[serde(default)]
    pub layout: LayoutConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override data source URL
    pub source_url: Option<String>,
    /// Override output directory
    pub out_dir: Option<String>,
    /// Override page locale
    pub locale: Option<String>,
}

const LAYOUT_KEYS: [&str; 6] = [
    "card_width",
    "card_height",
    "card_gap",
    "band_gap",
    "label_height",
    "padding",
];

impl Config {
    /// Get the `$FAMILY_TREE` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/familytree`
    /// - macOS: `~/Library/Application Support/familytree`
    /// - Windows: `%APPDATA%\familytree`
    #[must_use]
    pub fn get_familytree_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("familytree")
    }

    /// Merge missing fields from defaults into this config
    ///
    /// Fills fields that are empty (or zero, for numbers) here and set in
    /// `defaults`. Used on load so that settings added in a newer release
    /// appear in an existing config file.
    ///
    /// # Returns
    ///
    /// `true` if any fields were added/changed, `false` otherwise
    #[allow(clippy::useless_let_if_seq)]
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        let mut changed = false;

        let mut merge_text = |value: &mut String, default: &String| {
            if value.is_empty() && !default.is_empty() {
                value.clone_from(default);
                changed = true;
            }
        };
        merge_text(&mut self.logging.level, &defaults.logging.level);
        merge_text(&mut self.logging.file, &defaults.logging.file);
        merge_text(&mut self.source.url, &defaults.source.url);
        merge_text(&mut self.paths.out_dir, &defaults.paths.out_dir);
        merge_text(&mut self.display.locale, &defaults.display.locale);

        if self.source.timeout_secs == 0 && defaults.source.timeout_secs != 0 {
            self.source.timeout_secs = defaults.source.timeout_secs;
            changed = true;
        }

        for key in LAYOUT_KEYS {
            let default = defaults.layout.field(key).unwrap_or_default();
            if let Some(value) = self.layout.field_mut(key) {
                if *value == 0 && default != 0 {
                    *value = default;
                    changed = true;
                }
            }
        }

        changed
    }

    /// Apply CLI-provided overrides onto the loaded configuration
    ///
    /// Overrides last for this run only; the config file is not modified.
    /// Only non-`None` values replace config values.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(url) = &overrides.source_url {
            self.source.url.clone_from(url);
        }
        if let Some(out_dir) = &overrides.out_dir {
            self.paths.out_dir.clone_from(out_dir);
        }
        if let Some(locale) = &overrides.locale {
            self.display.locale.clone_from(locale);
        }
    }

    /// Get the user config file path
    ///
    /// `config.toml` for release builds, `dconfig.toml` for debug builds,
    /// inside [`get_familytree_dir`](Self::get_familytree_dir).
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_familytree_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$FAMILY_TREE` in a string to the config directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_familytree_dir();
            value.replace(DIR_VARIABLE, dir.to_str().unwrap_or("."))
        } else {
            value.to_string()
        }
    }

    /// Initialize config from a TOML string
    ///
    /// Missing fields take their serde defaults (empty strings, zero, false)
    /// and `$FAMILY_TREE` is expanded in path values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML cannot be parsed or doesn't match the expected schema
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.out_dir = Self::expand_variables(&config.paths.out_dir);

        Ok(config)
    }

    /// Load configuration from embedded defaults
    ///
    /// # Panics
    /// Panics if the embedded default configuration is invalid TOML.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).expect("Failed to parse compiled-in default configuration")
    }

    /// Load configuration from file, or create from defaults if not found
    ///
    /// - Config file exists: load it, merge missing fields from defaults, save if anything was added
    /// - First run: create the config directory and write the defaults
    ///
    /// Falls back to defaults if the file cannot be read or parsed.
    #[must_use]
    pub fn load() -> Self {
        let config_file = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if config_file.exists() {
            if let Ok(content) = fs::read_to_string(&config_file) {
                if let Ok(mut config) = Self::from_toml(&content) {
                    if config.merge_defaults(&defaults) {
                        let _ = config.save();
                    }
                    return config;
                }
            }
        } else {
            if let Some(parent) = config_file.parent() {
                let _ = fs::create_dir_all(parent);
            }
            let _ = defaults.save();
            return defaults;
        }

        defaults
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Returns an error if the config cannot be serialized, the config
    /// directory cannot be created, or the file cannot be written.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_file = Self::get_config_file_path();
        if let Some(parent) = config_file.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(&config_file, toml_str)?;
        Ok(())
    }

    /// Get a configuration value by key
    ///
    /// Supported keys: `level`, `file`, `verbose`, `url`, `timeout_secs`,
    /// `out_dir`, `locale`, and the layout keys `card_width`, `card_height`,
    /// `card_gap`, `band_gap`, `label_height`, `padding`.
    ///
    /// # Returns
    /// - `Some(String)`: The configuration value as a string
    /// - `None`: If the key is not recognized
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "url" => Some(self.source.url.clone()),
            "timeout_secs" | "timeout-secs" => Some(self.source.timeout_secs.to_string()),
            "out_dir" | "out-dir" => Some(self.paths.out_dir.clone()),
            "locale" => Some(self.display.locale.clone()),
            _ => self.layout.field(key).map(|value| value.to_string()),
        }
    }

    /// Set a configuration value by key
    ///
    /// Updates the in-memory config only. Call [`save()`](Config::save) to persist changes.
    ///
    /// # Errors
    /// Returns an error if the key is not recognized or the value cannot be
    /// parsed for that key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value
                    .parse::<crate::logger::Level>()
                    .map_err(|e| format!("Invalid value for 'level': {e}"))?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "url" => {
                let url = value.trim();
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    return Err(format!(
                        "Invalid value for 'url': '{value}' (expected an http(s) CSV export link)"
                    ));
                }
                self.source.url = url.to_string();
            }
            "timeout_secs" | "timeout-secs" => {
                self.source.timeout_secs = value
                    .parse::<u64>()
                    .map_err(|_| format!("Invalid number for 'timeout_secs': '{value}'"))?;
            }
            "out_dir" | "out-dir" => self.paths.out_dir = value.to_string(),
            "locale" => {
                let locale: Locale = value.parse()?;
                self.display.locale = locale.to_string();
            }
            _ => {
                let field = self
                    .layout
                    .field_mut(key)
                    .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
                *field = value
                    .parse::<u32>()
                    .map_err(|_| format!("Invalid number for '{key}': '{value}'"))?;
            }
        }
        Ok(())
    }

    /// Unset a configuration value by key (reset to default)
    ///
    /// The default value is taken from `defaults`, typically
    /// [`from_defaults()`](Config::from_defaults).
    ///
    /// # Errors
    /// Returns an error if the key is not recognized.
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "url" => self.source.url.clone_from(&defaults.source.url),
            "timeout_secs" | "timeout-secs" => {
                self.source.timeout_secs = defaults.source.timeout_secs;
            }
            "out_dir" | "out-dir" => self.paths.out_dir.clone_from(&defaults.paths.out_dir),
            "locale" => self.display.locale.clone_from(&defaults.display.locale),
            _ => {
                let default = defaults
                    .layout
                    .field(key)
                    .ok_or_else(|| format!("Unknown config key: '{key}'"))?;
                if let Some(field) = self.layout.field_mut(key) {
                    *field = default;
                }
            }
        }
        Ok(())
    }

    /// Reset all configuration to defaults
    ///
    /// Deletes the configuration file so the next [`load()`](Config::load)
    /// recreates it. Succeeds when no file exists.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be deleted.
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[source]")?;
        writeln!(f, "  url = \"{}\"", self.source.url)?;
        writeln!(f, "  timeout_secs = {}", self.source.timeout_secs)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  out_dir = \"{}\"", self.paths.out_dir)?;

        writeln!(f, "\n[display]")?;
        writeln!(f, "  locale = \"{}\"", self.display.locale)?;

        writeln!(f, "\n[layout]")?;
        for key in LAYOUT_KEYS {
            writeln!(f, "  {key} = {}", self.layout.field(key).unwrap_or_default())?;
        }

        Ok(())
    }
}
