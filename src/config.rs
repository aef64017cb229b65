//! TOML configuration.
//!
//! Every table and field is optional; a missing or empty file yields
//! [`DiscoveryConfig::default`].
//!
//! ```toml
//! [discovery]
//! max_results = 10
//! catalog = "/path/to/resources.json"
//!
//! [tokenizer]
//! min_length = 2
//! stem = false
//!
//! [bm25]
//! k1 = 1.2
//!
//! [text_weights]
//! preset = "title-heavy"
//!
//! [profiles.exploratory]
//! free = 5
//! ```

use crate::discovery::ProfileWeights;
use crate::error::{DiscoveryError, Result};
use crate::search::{Bm25Params, DEFAULT_MAX_RESULTS, FuzzyConfig, TokenizerConfig, WeightPreset};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Directory name under the platform config directory.
const APP_DIR: &str = "resource-discovery";
const CONFIG_FILE: &str = "config.toml";

/// Settings of the discovery engine itself.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoverySettings {
    /// Result ceiling when a request does not set one.
    pub max_results: usize,
    /// JSON catalog loaded at startup.
    pub catalog: Option<PathBuf>,
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            catalog: None,
        }
    }
}

/// Selection of the text-field weight preset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TextWeights {
    pub preset: WeightPreset,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiscoveryConfig {
    pub discovery: DiscoverySettings,
    pub tokenizer: TokenizerConfig,
    pub fuzzy: FuzzyConfig,
    pub bm25: Bm25Params,
    pub text_weights: TextWeights,
    pub profiles: ProfileWeights,
}

impl DiscoveryConfig {
    /// `<config_dir>/resource-discovery/config.toml`, when the platform has a
    /// config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| DiscoveryError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`. Relative catalog paths resolve against the config
    /// file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| DiscoveryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&source)?;

        if let Some(catalog) = &config.discovery.catalog
            && catalog.is_relative()
            && let Some(parent) = path.parent()
        {
            config.discovery.catalog = Some(parent.join(catalog));
        }

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, else from the default location if a file
    /// exists there, else use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                tracing::debug!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.discovery.max_results == 0 {
            return Err(DiscoveryError::Config(
                "discovery.max_results must be at least 1".to_string(),
            ));
        }
        if self.tokenizer.min_length == 0 {
            return Err(DiscoveryError::Config(
                "tokenizer.min_length must be at least 1".to_string(),
            ));
        }
        if self.fuzzy.prefix_length == 0 {
            return Err(DiscoveryError::Config(
                "fuzzy.prefix_length must be at least 1".to_string(),
            ));
        }
        self.bm25
            .validate()
            .map_err(|e| DiscoveryError::Config(format!("bm25: {e}")))?;
        self.profiles
            .validate()
            .map_err(|e| DiscoveryError::Config(e.to_string()))?;
        Ok(())
    }
}
