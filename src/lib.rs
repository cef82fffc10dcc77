//! chared - character encoding detection for text in a known language
//!
//! Each language model holds one character frequency profile per candidate
//! encoding, trained on the same sample text. Input is classified by the
//! scalar product of its own profile with each trained profile.

pub mod charset;
pub mod config;
pub mod detector;
pub mod store;
pub mod training;

pub use detector::{Candidate, EncodingModel, PreferenceOrder, Rank};
pub use store::ModelStore;
