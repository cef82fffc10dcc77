//! Character frequency vectors
//!
//! A text sample is reduced to a sparse map of character → occurrence count.
//! Two vectors are compared with a plain scalar product; no normalization.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sparse character frequency vector.
///
/// Counts are `f64` so persisted models keep the same representation, but
/// every count produced by [`vectorize`] is a whole number. A character that
/// does not occur has no entry (never a stored zero).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "HashMap<char, f64>", into = "HashMap<char, f64>")]
pub struct FrequencyVector {
    counts: HashMap<char, f64>,
}

impl FrequencyVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count of `ch`, 0.0 when absent.
    pub fn get(&self, ch: char) -> f64 {
        self.counts.get(&ch).copied().unwrap_or(0.0)
    }

    pub fn contains(&self, ch: char) -> bool {
        self.counts.contains_key(&ch)
    }

    /// Number of distinct characters
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts. Equals the character length of the vectorized text
    /// until the vector is reduced.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (char, f64)> + '_ {
        self.counts.iter().map(|(&ch, &count)| (ch, count))
    }

    fn increment(&mut self, ch: char) {
        *self.counts.entry(ch).or_insert(0.0) += 1.0;
    }

    /// Drop a character entirely. Only reduction removes entries.
    pub(crate) fn remove(&mut self, ch: char) -> bool {
        self.counts.remove(&ch).is_some()
    }
}

impl FromIterator<char> for FrequencyVector {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut vector = FrequencyVector::new();
        for ch in iter {
            vector.increment(ch);
        }
        vector
    }
}

/// Loaded counts go through here, so a persisted zero (or a negative/NaN
/// count) never becomes a live entry.
impl From<HashMap<char, f64>> for FrequencyVector {
    fn from(mut counts: HashMap<char, f64>) -> Self {
        counts.retain(|_, count| *count > 0.0);
        Self { counts }
    }
}

impl From<FrequencyVector> for HashMap<char, f64> {
    fn from(vector: FrequencyVector) -> Self {
        vector.counts
    }
}

/// Build the frequency vector of `text`.
pub fn vectorize(text: &str) -> FrequencyVector {
    text.chars().collect()
}

/// Scalar product of two frequency vectors.
///
/// Keys present in only one vector contribute nothing, so it is enough to
/// walk the smaller vector and probe the larger one.
pub fn scalar_product(a: &FrequencyVector, b: &FrequencyVector) -> f64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small
        .counts
        .iter()
        .filter_map(|(ch, &count)| large.counts.get(ch).map(|&other| count * other))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vectorize_empty() {
        let v = vectorize("");
        assert!(v.is_empty());
        assert_eq!(v.total(), 0.0);
    }

    #[test]
    fn test_vectorize_counts() {
        let v = vectorize("aab");
        assert_eq!(v.len(), 2);
        assert_eq!(v.get('a'), 2.0);
        assert_eq!(v.get('b'), 1.0);
        assert_eq!(v.get('c'), 0.0);
        assert!(!v.contains('c'));
    }

    #[test]
    fn test_total_mass_equals_char_length() {
        for text in ["", "x", "hello world", "příliš žluťoučký kůň", "日本語のテキスト"] {
            let v = vectorize(text);
            assert_eq!(v.total(), text.chars().count() as f64, "text: {text:?}");
        }
    }

    #[test]
    fn test_scalar_product_symmetric() {
        let a = vectorize("abracadabra");
        let b = vectorize("cabbage and radish");
        assert_eq!(scalar_product(&a, &b), scalar_product(&b, &a));
    }

    #[test]
    fn test_scalar_product_value() {
        // a:2 b:1  ·  a:1 c:3  = 2
        let a = vectorize("aab");
        let b = vectorize("accc");
        assert_eq!(scalar_product(&a, &b), 2.0);
    }

    #[test]
    fn test_self_product_non_negative() {
        assert_eq!(scalar_product(&vectorize(""), &vectorize("")), 0.0);
        let v = vectorize("zz y");
        // 2*2 + 1*1 + 1*1
        assert_eq!(scalar_product(&v, &v), 6.0);
    }

    #[test]
    fn test_disjoint_vectors_score_zero() {
        assert_eq!(scalar_product(&vectorize("abc"), &vectorize("xyz")), 0.0);
    }

    #[test]
    fn test_from_map_drops_zero_counts() {
        let mut counts = HashMap::new();
        counts.insert('a', 3.0);
        counts.insert('b', 0.0);
        let v = FrequencyVector::from(counts);
        assert_eq!(v.len(), 1);
        assert!(!v.contains('b'));
    }
}
