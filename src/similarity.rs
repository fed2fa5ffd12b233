//! Default similarity oracle.
//!
//! Compares the lowercased password against each configured attribute
//! value, and against the word-like parts of that value, using a
//! character-multiset ratio.

use std::collections::HashMap;

use crate::config::ConfigError;
use crate::oracle::{OracleError, SimilarityOracle, UserAttributes};
use crate::violation::Violation;

pub const DEFAULT_MAX_SIMILARITY: f64 = 0.7;
const MIN_MAX_SIMILARITY: f64 = 0.1;

/// Flags passwords whose similarity ratio to an attribute reaches
/// `max_similarity`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeSimilarity {
    max_similarity: f64,
}

impl Default for AttributeSimilarity {
    fn default() -> Self {
        Self {
            max_similarity: DEFAULT_MAX_SIMILARITY,
        }
    }
}

impl AttributeSimilarity {
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSimilarity`] below 0.1, where nearly
    /// every password would be rejected.
    pub fn new(max_similarity: f64) -> Result<Self, ConfigError> {
        if max_similarity.is_nan() || max_similarity < MIN_MAX_SIMILARITY {
            return Err(ConfigError::InvalidSimilarity(max_similarity));
        }
        Ok(Self { max_similarity })
    }

    pub fn max_similarity(&self) -> f64 {
        self.max_similarity
    }

    fn matches(&self, password: &str, value: &str) -> bool {
        let value = value.to_lowercase();
        let whole = std::iter::once(value.as_str());
        let parts = value
            .split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .filter(|p| !p.is_empty());

        parts.chain(whole).any(|part| {
            !self.exceeds_length_ratio(password, part)
                && quick_ratio(password, part) >= self.max_similarity
        })
    }

    /// A part much shorter than the password cannot make it "similar".
    fn exceeds_length_ratio(&self, password: &str, part: &str) -> bool {
        let pwd_len = password.chars().count();
        let part_len = part.chars().count();
        let bound = self.max_similarity / 2.0 * pwd_len as f64;
        pwd_len >= 10 * part_len && (part_len as f64) < bound
    }
}

impl SimilarityOracle for AttributeSimilarity {
    fn similarity(
        &self,
        password: &str,
        attributes: &UserAttributes,
        fields: &[String],
    ) -> Result<Vec<Violation>, OracleError> {
        let password = password.to_lowercase();
        let violations = fields
            .iter()
            .filter(|field| {
                attributes
                    .get(field.as_str())
                    .is_some_and(|value| !value.is_empty() && self.matches(&password, value))
            })
            .map(|field| Violation::similar_to(field.as_str()))
            .collect();
        Ok(violations)
    }
}

/// Upper bound on the longest-matching-blocks ratio: twice the size of the
/// character multiset intersection over the combined length.
fn quick_ratio(a: &str, b: &str) -> f64 {
    let mut available: HashMap<char, usize> = HashMap::new();
    for c in b.chars() {
        *available.entry(c).or_insert(0) += 1;
    }

    let mut matches = 0usize;
    let mut a_len = 0usize;
    for c in a.chars() {
        a_len += 1;
        if let Some(n) = available.get_mut(&c) {
            if *n > 0 {
                *n -= 1;
                matches += 1;
            }
        }
    }

    let total = a_len + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    2.0 * matches as f64 / total as f64
}
