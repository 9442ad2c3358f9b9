//! Editor configuration loading.
//!
//! An optional TOML profile overrides the built-in container layout
//! defaults. Node-local overrides in the model still win over the
//! profile at resolution time.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::{LayoutError, LayoutOptions, LayoutOverrides};
use crate::model::ElementId;

/// Errors that can occur when loading or parsing a configuration profile
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(#[from] LayoutError),
}

/// Editor-wide configuration
#[derive(Debug, Clone, Default)]
pub struct EditorConfig {
    /// Container layout defaults applied when a node has no override
    pub layout: LayoutOptions,
}

/// TOML structure for deserializing profiles
#[derive(Deserialize)]
struct TomlConfig {
    layout: Option<LayoutOverrides>,
}

impl EditorConfig {
    /// Load a profile from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a profile from a TOML string. Profile values are validated
    /// the same way node overrides are.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let defaults = LayoutOptions::default();
        let layout = defaults.resolve(&ElementId::new("<config>"), parsed.layout.as_ref())?;
        Ok(EditorConfig { layout })
    }
}
