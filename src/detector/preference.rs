//! Encoding preference order
//!
//! Only consulted to break exact score ties: the earlier an encoding is
//! listed, the more it is preferred.

use super::{DetectorError, DetectorResult};
use serde::{Deserialize, Serialize};

/// Position of an encoding in the preference order.
///
/// Variant order matters: every `Preferred(_)` sorts before `Unranked`, so an
/// encoding missing from the order loses every tie against a listed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rank {
    /// Zero-based position in the order
    Preferred(usize),
    /// Not listed; worse than any listed encoding
    Unranked,
}

impl Rank {
    pub fn position(&self) -> Option<usize> {
        match self {
            Rank::Preferred(pos) => Some(*pos),
            Rank::Unranked => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Preferred(pos) => write!(f, "{}", pos),
            Rank::Unranked => f.write_str("-"),
        }
    }
}

/// Ordered encoding identifiers, most preferred first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceOrder(Vec<String>);

impl PreferenceOrder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank of `encoding`. Duplicates keep their first position.
    pub fn rank(&self, encoding: &str) -> Rank {
        self.0
            .iter()
            .position(|e| e == encoding)
            .map_or(Rank::Unranked, Rank::Preferred)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for PreferenceOrder {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Dynamically typed input (configuration files). Only an array of strings is
/// an ordered sequence of identifiers; anything else is a type error.
impl TryFrom<&toml::Value> for PreferenceOrder {
    type Error = DetectorError;

    fn try_from(value: &toml::Value) -> DetectorResult<Self> {
        let items = value.as_array().ok_or_else(|| DetectorError::InvalidType {
            expected: "array of encoding names",
            found: value.type_str(),
        })?;

        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| DetectorError::InvalidType {
                        expected: "encoding name (string)",
                        found: item.type_str(),
                    })
            })
            .collect::<DetectorResult<Vec<_>>>()
            .map(Self)
    }
}
