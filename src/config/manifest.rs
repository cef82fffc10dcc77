//! Training manifest (`chared learn --manifest`)
//!
//! ```toml
//! [model]
//! encodings = ["utf_8", "windows_1250", "iso8859_2"]
//! reduce = true
//! ```
//!
//! The encoding list is also the preference order of the learned model.

use super::{ConfigError, ConfigResult};
use crate::detector::PreferenceOrder;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainingManifest {
    /// Encodings to train, most preferred first
    pub encodings: PreferenceOrder,
    /// Strip characters shared by every encoding after training
    pub reduce: bool,
}

impl TrainingManifest {
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse manifest TOML.
    ///
    /// `encodings` goes through the dynamic type check, so a scalar such as
    /// `encodings = "utf_8"` is rejected rather than read as a one-item list.
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let table: toml::Table = toml::from_str(content)?;
        let model = table
            .get("model")
            .and_then(toml::Value::as_table)
            .ok_or(ConfigError::MissingField("model"))?;

        let encodings_value = model
            .get("encodings")
            .ok_or(ConfigError::MissingField("model.encodings"))?;
        let encodings = PreferenceOrder::try_from(encodings_value).map_err(|source| {
            ConfigError::InvalidField {
                field: "model.encodings",
                source,
            }
        })?;
        if encodings.is_empty() {
            return Err(ConfigError::NoEncodings);
        }

        let reduce = match model.get("reduce") {
            None => true,
            Some(value) => value.as_bool().ok_or_else(|| ConfigError::InvalidField {
                field: "model.reduce",
                source: crate::detector::DetectorError::InvalidType {
                    expected: "boolean",
                    found: value.type_str(),
                },
            })?,
        };

        Ok(Self { encodings, reduce })
    }
}
