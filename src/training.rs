//! Learning a language model from a sample text
//!
//! The sample is written once in UTF-8. For every encoding in the manifest it
//! is encoded into that encoding, widened byte-for-char and trained, so all
//! vectors describe the same text and differ only by encoding.

use crate::charset::{self, CharsetResult};
use crate::config::TrainingManifest;
use crate::detector::EncodingModel;

/// Per-encoding vector sizes
#[derive(Debug, Clone, PartialEq)]
pub struct EncodingStats {
    pub encoding: String,
    /// Distinct characters before reduction
    pub trained: usize,
    /// Distinct characters kept after reduction
    pub kept: usize,
}

/// Training result
#[derive(Debug, Clone)]
pub struct LearnReport {
    /// Sample length in characters
    pub sample_chars: usize,
    pub reduced: bool,
    pub encodings: Vec<EncodingStats>,
}

/// Train a model on `sample` for every encoding in `manifest`.
pub fn learn(sample: &str, manifest: &TrainingManifest) -> CharsetResult<(EncodingModel, LearnReport)> {
    let sample_chars = sample.chars().count();
    if sample_chars == 0 {
        tracing::warn!("Training sample is empty; all vectors will be empty");
    }

    let mut model = EncodingModel::new();
    for encoding in manifest.encodings.as_slice() {
        let bytes = charset::encode_sample(sample, encoding)?;
        model.train(&charset::widen(&bytes), encoding);
    }

    let trained: Vec<(String, usize)> = model
        .encodings()
        .map(|e| (e.to_string(), model.vector(e).map_or(0, |v| v.len())))
        .collect();

    model.set_preference_order(manifest.encodings.clone());
    if manifest.reduce {
        model.reduce();
    }

    let encodings = trained
        .into_iter()
        .map(|(encoding, trained)| {
            let kept = model.vector(&encoding).map_or(0, |v| v.len());
            EncodingStats { encoding, trained, kept }
        })
        .collect();

    tracing::info!(
        "Learned {} encodings from {} characters{}",
        model.len(),
        sample_chars,
        if manifest.reduce { " (reduced)" } else { "" }
    );

    Ok((
        model,
        LearnReport {
            sample_chars,
            reduced: manifest.reduce,
            encodings,
        },
    ))
}
