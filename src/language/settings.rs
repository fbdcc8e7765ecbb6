//! Settings Store
//!
//! The plugin's settings file is a small line-oriented key/value format:
//!
//! ```text
//! ; comment
//! theme = light
//! override = false
//! python = *.py;*.pyw
//! ```
//!
//! `theme` and `override` are reserved keys, every other key names a
//! language and maps it to a `;`-separated list of file name patterns.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;

/// Display name of the plugin
pub const PLUGIN_NAME: &str = "LPeg Binder";

/// File name of the settings file inside the plugins config directory
pub const SETTINGS_FILE_NAME: &str = "LPegBinder.ini";

/// Directory (inside the plugins config directory) holding the lexer
/// library, its grammars and the default settings template
pub const PLUGIN_HOME_DIR: &str = "LPegBinder";

/// Name of the template copied on first run
pub const DEFAULT_TEMPLATE_NAME: &str = "default.ini";

const EMBEDDED_TEMPLATE: &str = include_str!("../../resources/default.ini");

/// Parsed plugin settings
///
/// Languages keep the order in which they appear in the settings file; that
/// order decides which language wins when several patterns match and is the
/// order the language picker shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Settings {
    override_enabled: bool,
    theme: String,
    languages: IndexMap<String, Vec<String>>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build settings from the text of a settings file
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::new();
        settings.load(text);
        settings
    }

    /// Replace the language table with the one described by `text`.
    ///
    /// `theme` and `override` keep their current values unless `text`
    /// sets them. Lines that are not a single `key = value` pair are skipped.
    pub fn load(&mut self, text: &str) {
        self.languages.clear();

        for (index, line) in text.lines().enumerate() {
            if line.is_empty() || line.starts_with(';') {
                continue;
            }

            let parts: Vec<&str> = line.split('=').collect();
            let [key, value] = parts.as_slice() else {
                log::trace!("Skipping settings line {}: {:?}", index + 1, line);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());

            match key {
                "theme" => self.theme = value.to_string(),
                "override" => self.override_enabled = value == "true",
                _ => self.insert_language(key, value),
            }
        }

        log::debug!(
            "Loaded {} languages (theme: {:?}, override: {})",
            self.languages.len(),
            self.theme,
            self.override_enabled
        );
    }

    fn insert_language(&mut self, name: &str, value: &str) {
        let patterns: Vec<String> = value
            .split(';')
            .filter(|pattern| !pattern.is_empty())
            .map(str::to_string)
            .collect();

        if name.is_empty() || patterns.is_empty() {
            log::trace!("Skipping language entry {:?} = {:?}", name, value);
            return;
        }

        // Re-inserting an existing key keeps its original position
        self.languages.insert(name.to_string(), patterns);
    }

    /// Reload from a settings file on disk.
    ///
    /// On failure the current settings are left untouched.
    pub fn reload_from(&mut self, path: &Path) -> Result<()> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        self.load(&String::from_utf8_lossy(&bytes));
        Ok(())
    }

    /// Whether resolved languages replace a lexer the editor already chose
    pub fn override_enabled(&self) -> bool {
        self.override_enabled
    }

    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn languages(&self) -> &IndexMap<String, Vec<String>> {
        &self.languages
    }

    /// Language names in settings file order
    pub fn language_names(&self) -> Vec<&str> {
        self.languages.keys().map(String::as_str).collect()
    }

    pub fn patterns(&self, language: &str) -> Option<&[String]> {
        self.languages.get(language).map(Vec::as_slice)
    }
}

/// Path of the settings file for a plugins config directory
pub fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join(SETTINGS_FILE_NAME)
}

/// Directory handed to the lexer as `lexer.lpeg.home`
pub fn plugin_home(config_dir: &Path) -> PathBuf {
    config_dir.join(PLUGIN_HOME_DIR)
}

/// Settings template bundled with the plugin
pub fn embedded_template() -> &'static str {
    EMBEDDED_TEMPLATE
}

/// Make sure a settings file exists, seeding it on first run.
///
/// The template shipped next to the lexer (`<home>/default.ini`) is preferred;
/// the embedded copy is used when that is missing. An existing settings file
/// is never overwritten.
pub fn ensure_settings_file(config_dir: &Path) -> Result<PathBuf> {
    let path = settings_path(config_dir);
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(config_dir).with_context(|| {
        format!("Failed to create config directory: {}", config_dir.display())
    })?;

    let template = plugin_home(config_dir).join(DEFAULT_TEMPLATE_NAME);
    if template.is_file() {
        fs::copy(&template, &path).with_context(|| {
            format!(
                "Failed to copy {} to {}",
                template.display(),
                path.display()
            )
        })?;
        log::info!("Created settings file {:?} from {:?}", path, template);
    } else {
        fs::write(&path, EMBEDDED_TEMPLATE)
            .with_context(|| format!("Failed to write settings file: {}", path.display()))?;
        log::info!("Created settings file {:?} from built-in template", path);
    }

    Ok(path)
}
