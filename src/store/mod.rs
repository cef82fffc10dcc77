//! Model persistence and catalog
//!
//! Models are stored as JSON blobs in `<id>.edm` files. The catalog is just a
//! directory of such files; the model id is the file stem.

mod catalog;
mod paths;

pub use catalog::ModelStore;
pub use paths::{default_models_dir, resolve_models_dir};

use crate::detector::{EncodingModel, FORMAT_VERSION};
use thiserror::Error;

/// File extension of persisted models
pub const MODEL_EXTENSION: &str = "edm";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Model format version mismatch: file has {found}, expected {expected}")]
    VersionMismatch { found: String, expected: &'static str },

    #[error("Malformed model data: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Serialize a model to its persistent byte form.
pub fn save_model(model: &EncodingModel) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec(model)?)
}

/// Rebuild a model from bytes written by [`save_model`].
pub fn load_model(bytes: &[u8]) -> StoreResult<EncodingModel> {
    let model: EncodingModel = serde_json::from_slice(bytes)?;
    if model.version() != FORMAT_VERSION {
        return Err(StoreError::VersionMismatch {
            found: model.version().to_string(),
            expected: FORMAT_VERSION,
        });
    }
    Ok(model)
}
