//! Encoding model: training, reduction and classification

use super::preference::{PreferenceOrder, Rank};
use super::vector::{scalar_product, vectorize, FrequencyVector};
use super::{DetectorResult, FORMAT_VERSION, UTF_8};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// One scored encoding, produced per classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub encoding: String,
    pub score: f64,
    #[serde(serialize_with = "serialize_rank")]
    pub rank: Rank,
}

fn serialize_rank<S: serde::Serializer>(rank: &Rank, s: S) -> Result<S::Ok, S::Error> {
    match rank.position() {
        Some(pos) => s.serialize_some(&pos),
        None => s.serialize_none(),
    }
}

impl Candidate {
    /// Score descending, then rank ascending, then identifier ascending.
    fn cmp_ranking(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.rank.cmp(&other.rank))
            .then_with(|| self.encoding.cmp(&other.encoding))
    }

    /// Identifiers sharing the top score of `candidates`, which must already
    /// be in ranking order.
    pub fn top_tied(candidates: &[Candidate]) -> Vec<String> {
        let Some(top) = candidates.first().map(|c| c.score) else {
            return Vec::new();
        };

        candidates
            .iter()
            .take_while(|c| c.score == top)
            .map(|c| c.encoding.clone())
            .collect()
    }
}

/// Trained detector for a single language.
///
/// Vectors are only mutated through [`train`](Self::train) and
/// [`reduce`](Self::reduce); classification borrows the model immutably and
/// may run from many threads at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingModel {
    version: String,
    vectors: BTreeMap<String, FrequencyVector>,
    preference_order: PreferenceOrder,
}

impl EncodingModel {
    pub fn new() -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            vectors: BTreeMap::new(),
            preference_order: PreferenceOrder::new(),
        }
    }

    /// Store the frequency vector of `text` for `encoding`, replacing any
    /// earlier vector for the same encoding.
    ///
    /// `text` must already be the sample as seen through `encoding`.
    pub fn train(&mut self, text: &str, encoding: &str) {
        let vector = vectorize(text);
        tracing::debug!(
            "Trained {} on {} chars ({} distinct)",
            encoding,
            vector.total(),
            vector.len()
        );
        self.vectors.insert(encoding.to_string(), vector);
    }

    /// Replace the preference order used to break score ties.
    pub fn set_preference_order(&mut self, order: PreferenceOrder) {
        self.preference_order = order;
    }

    /// Replace the preference order from a dynamically typed value.
    ///
    /// Fails with [`DetectorError::InvalidType`](super::DetectorError) unless
    /// `value` is an array of strings; the current order is then kept.
    pub fn set_preference_order_value(&mut self, value: &toml::Value) -> DetectorResult<()> {
        self.preference_order = PreferenceOrder::try_from(value)?;
        Ok(())
    }

    pub fn rank(&self, encoding: &str) -> Rank {
        self.preference_order.rank(encoding)
    }

    /// Remove every character whose count is identical in all trained vectors.
    ///
    /// Run once, after all encodings are trained. Reducing a partially trained
    /// model, or training after reducing, leaves vectors that are no longer
    /// comparable.
    pub fn reduce(&mut self) {
        let encodings = self.vectors.len();
        if encodings == 0 {
            return;
        }

        let mut pair_counts: HashMap<(char, u64), usize> = HashMap::new();
        for vector in self.vectors.values() {
            for (ch, count) in vector.iter() {
                *pair_counts.entry((ch, count.to_bits())).or_insert(0) += 1;
            }
        }

        let mut common: Vec<char> = pair_counts
            .into_iter()
            .filter(|&(_, seen)| seen >= encodings)
            .map(|((ch, _), _)| ch)
            .collect();
        common.sort_unstable();
        common.dedup();

        for vector in self.vectors.values_mut() {
            for &ch in &common {
                vector.remove(ch);
            }
        }

        tracing::debug!(
            "Reduced {} vectors: removed {} shared characters",
            encodings,
            common.len()
        );
        for (encoding, vector) in &self.vectors {
            if vector.is_empty() {
                tracing::debug!("Vector for {} is empty after reduction", encoding);
            }
        }
    }

    /// Every trained encoding scored against `text`, best first.
    ///
    /// `raw` is the undecoded input; it is only used to rule out UTF-8 when
    /// the bytes are not valid UTF-8.
    pub fn classify_candidates(&self, text: &str, raw: &[u8]) -> Vec<Candidate> {
        let input = vectorize(text);
        let valid_utf8 = self.vectors.contains_key(UTF_8) && std::str::from_utf8(raw).is_ok();

        let mut candidates: Vec<Candidate> = self
            .vectors
            .iter()
            .map(|(encoding, vector)| {
                let score = if encoding == UTF_8 && !valid_utf8 {
                    0.0
                } else {
                    scalar_product(&input, vector)
                };
                Candidate {
                    encoding: encoding.clone(),
                    score,
                    rank: self.rank(encoding),
                }
            })
            .collect();

        candidates.sort_by(Candidate::cmp_ranking);
        candidates
    }

    /// The encoding(s) best matching `text`, in preference order.
    ///
    /// Several identifiers are returned when they share the top score exactly.
    /// Empty only when the model has no trained encodings.
    pub fn classify(&self, text: &str, raw: &[u8]) -> Vec<String> {
        Candidate::top_tied(&self.classify_candidates(text, raw))
    }

    /// Trained encoding identifiers, sorted
    pub fn encodings(&self) -> impl Iterator<Item = &str> {
        self.vectors.keys().map(String::as_str)
    }

    pub fn vector(&self, encoding: &str) -> Option<&FrequencyVector> {
        self.vectors.get(encoding)
    }

    pub fn preference_order(&self) -> &PreferenceOrder {
        &self.preference_order
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Number of trained encodings
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }
}

impl Default for EncodingModel {
    fn default() -> Self {
        Self::new()
    }
}
