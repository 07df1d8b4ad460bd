//! Layered settings for hosts that configure expansion from files.
//!
//! `defaults/zencode.default.toml` is embedded into the binary so the documented
//! defaults and runtime behavior stay in sync. [`Loader`] layers user files and
//! single-key overrides on top before deserializing into [`Settings`].

use crate::context::ExpansionContext;
use crate::error::ConfigError;
use crate::options::RenderOptions;
use crate::tables::{CssPreferences, Tables};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/zencode.default.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub render: RenderOptions,
    pub css: CssPreferences,
    /// Extension -> filter chain, merged over the built-in mapping.
    #[serde(default)]
    pub default_filters: HashMap<String, Vec<String>>,
}

impl Settings {
    /// The built-in tables with these preferences applied.
    pub fn tables(&self) -> Tables {
        let mut tables = Tables::builtin().with_css_preferences(self.css.clone());
        tables.default_filters.extend(self.default_filters.clone());
        tables
    }

    /// A validated context over [`Settings::tables`]. A seed makes lorem text
    /// reproducible.
    pub fn context(&self, seed: Option<u64>) -> Result<ExpansionContext, ConfigError> {
        let builder = ExpansionContext::builder().tables(self.tables());
        match seed {
            Some(seed) => builder.seed(seed).build(),
            None => builder.build(),
        }
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

    /// Layer a settings file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (used for CLI flags).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    pub fn build(self) -> Result<Settings, ConfigError> {
        Ok(self.builder.build()?.try_deserialize()?)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

pub fn load_defaults() -> Result<Settings, ConfigError> {
    Loader::new().build()
}
