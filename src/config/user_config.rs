//! User-level configuration for chared
//!
//! Supports loading config from:
//! - Environment variables
//! - ~/.config/chared/config.toml

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub detect: DetectConfig,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct DetectConfig {
    /// Directory holding `<language>.edm` models
    pub models_dir: Option<PathBuf>,

    /// Model used when `chared detect` is run without `--model`
    pub default_model: Option<String>,
}

impl UserConfig {
    /// Load config from all sources, with priority:
    /// 1. Environment variables (highest)
    /// 2. User config (~/.config/chared/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = UserConfig::default();

        if let Some(path) = Self::user_config_path().filter(|p| p.exists()) {
            if let Some(user_config) = Self::read_file(&path) {
                config.merge(user_config);
            }
        }

        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read a config file; unparsable files are logged and skipped.
    fn read_file(path: &Path) -> Option<UserConfig> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str::<UserConfig>(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                None
            }
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = var("CHARED_MODELS_DIR").filter(|v| !v.is_empty()) {
            self.detect.models_dir = Some(PathBuf::from(dir));
        }
        if let Some(model) = var("CHARED_MODEL").filter(|v| !v.is_empty()) {
            self.detect.default_model = Some(model);
        }
    }

    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("chared").join("config.toml"))
    }

    /// Merge another config into this one (other takes priority)
    fn merge(&mut self, other: UserConfig) {
        if other.detect.models_dir.is_some() {
            self.detect.models_dir = other.detect.models_dir;
        }
        if other.detect.default_model.is_some() {
            self.detect.default_model = other.detect.default_model;
        }
    }

    pub fn models_dir(&self) -> Option<&Path> {
        self.detect.models_dir.as_deref()
    }

    pub fn default_model(&self) -> Option<&str> {
        self.detect.default_model.as_deref()
    }

    /// Create the user config directory and an example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        if !config_path.exists() {
            let example = r#"# chared user configuration

[detect]
# Directory with <language>.edm models (env: CHARED_MODELS_DIR)
# models_dir = "/usr/share/chared/models"

# Model used when --model is not given (env: CHARED_MODEL)
# default_model = "czech"
"#;
            std::fs::write(&config_path, example)?;
        }

        Ok(config_path)
    }
}
