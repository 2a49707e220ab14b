//! Shared configuration loader for the ticha toolchain.
//!
//! `defaults/ticha.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`TichaConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use ticha_magic::{AbbrChoice, OutlineOptions, SpellChoice, StylesheetParams};

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/ticha.default.toml");

/// Name of the optional per-project config file.
pub const PROJECT_FILE: &str = "ticha.toml";

/// Top-level configuration consumed by ticha applications.
#[derive(Debug, Clone, Deserialize)]
pub struct TichaConfig {
    pub convert: ConvertConfig,
    pub outline: OutlineConfig,
    #[serde(default)]
    pub texts: BTreeMap<String, TextConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub spellchoice: SpellChoice,
    pub abbrchoice: AbbrChoice,
    pub format: String,
    pub stylesheet: String,
    pub flex: bool,
}

impl ConvertConfig {
    pub fn stylesheet_params(&self) -> StylesheetParams {
        StylesheetParams {
            spellchoice: self.spellchoice,
            abbrchoice: self.abbrchoice,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutlineConfig {
    pub first_page: u32,
    pub url_template: String,
}

impl OutlineConfig {
    pub fn options(&self, text: &str) -> OutlineOptions {
        OutlineOptions::new(text)
            .with_first_page(self.first_page)
            .with_url_template(self.url_template.as_str())
    }
}

/// Per-text settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextConfig {
    #[serde(default)]
    flex_path: String,
}

impl TextConfig {
    /// The FLEx export for this text, if it has one.
    pub fn flex_path(&self) -> Option<&Path> {
        if self.flex_path.is_empty() {
            None
        } else {
            Some(Path::new(&self.flex_path))
        }
    }
}

impl TichaConfig {
    /// The longest configured text id that occurs in `file_stem`.
    pub fn infer_text(&self, file_stem: &str) -> Option<&str> {
        self.texts
            .keys()
            .filter(|id| file_stem.contains(id.as_str()))
            .max_by_key(|id| id.len())
            .map(String::as_str)
    }

    pub fn text(&self, id: &str) -> Option<&TextConfig> {
        self.texts.get(id)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<TichaConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<TichaConfig, ConfigError> {
    Loader::new().build()
}
