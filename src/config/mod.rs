//! Configuration module for chared
//!
//! This module handles:
//! - User-level configuration (~/.config/chared/config.toml + environment)
//! - Training manifests consumed by `chared learn`

mod manifest;
mod user_config;

pub use manifest::TrainingManifest;
pub use user_config::{DetectConfig, UserConfig};

use crate::detector::DetectorError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid value for {field}: {source}")]
    InvalidField {
        field: &'static str,
        #[source]
        source: DetectorError,
    },

    #[error("Training manifest lists no encodings")]
    NoEncodings,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
