//! Frequency-profile encoding detector
//!
//! Text in a known language looks different depending on the encoding it was
//! stored in. A model keeps one character frequency vector per encoding,
//! trained on the same sample, and classifies new text by the scalar product
//! of its own frequency vector with each trained one.
//!
//! Flow: `train` every encoding → `reduce` once → `classify` read-only.
//!
//! # Example
//!
//! ```rust
//! use chared::detector::EncodingModel;
//!
//! let mut model = EncodingModel::new();
//! model.train("aaab", "enc_a");
//! model.train("bbba", "enc_b");
//! model.set_preference_order(["enc_a", "enc_b"].into_iter().collect());
//!
//! let text = "aaaa";
//! assert_eq!(model.classify(text, text.as_bytes()), vec!["enc_a".to_string()]);
//! ```

mod model;
mod preference;
mod vector;

pub use model::{Candidate, EncodingModel};
pub use preference::{PreferenceOrder, Rank};
pub use vector::{scalar_product, vectorize, FrequencyVector};

use thiserror::Error;

/// Identifier of the UTF-8 encoding. Candidates with this id are scored 0
/// when the raw input is not valid UTF-8.
pub const UTF_8: &str = "utf_8";

/// Schema tag of persisted models
pub const FORMAT_VERSION: &str = "1.0";

/// Errors raised by the detector core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DetectorError {
    #[error("Invalid type: expected {expected}, found {found}")]
    InvalidType {
        expected: &'static str,
        found: &'static str,
    },
}

pub type DetectorResult<T> = Result<T, DetectorError>;
