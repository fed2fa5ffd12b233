//! Collaborator interfaces consulted by the engine.
//!
//! The engine treats both oracles as black boxes: it hands them the
//! password (or its case-folded form) and reports whatever they return.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::sync::Arc;
use thiserror::Error;

use crate::violation::Violation;

/// Contextual user attributes, e.g. `username` or `email`.
pub type UserAttributes = HashMap<String, String>;

/// Failure inside an oracle. Propagated to the caller unchanged.
#[derive(Error, Debug)]
pub enum OracleError {
    #[error("{oracle} oracle failed: {source}")]
    Failed {
        oracle: &'static str,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl OracleError {
    pub fn failed(
        oracle: &'static str,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self::Failed {
            oracle,
            source: source.into(),
        }
    }
}

/// Judges whether a password is too similar to the user's attributes.
pub trait SimilarityOracle: Send + Sync {
    /// Returns one `SIMILAR_TO_ATTRIBUTE` violation per matched field.
    fn similarity(
        &self,
        password: &str,
        attributes: &UserAttributes,
        fields: &[String],
    ) -> Result<Vec<Violation>, OracleError>;
}

/// Set-membership test against a corpus of known-weak passwords.
pub trait WeakPasswordOracle: Send + Sync {
    /// `normalized` is already lowercased.
    fn is_weak(&self, normalized: &str) -> Result<bool, OracleError>;
}

impl<T: SimilarityOracle + ?Sized> SimilarityOracle for Arc<T> {
    fn similarity(
        &self,
        password: &str,
        attributes: &UserAttributes,
        fields: &[String],
    ) -> Result<Vec<Violation>, OracleError> {
        (**self).similarity(password, attributes, fields)
    }
}

impl<T: WeakPasswordOracle + ?Sized> WeakPasswordOracle for Arc<T> {
    fn is_weak(&self, normalized: &str) -> Result<bool, OracleError> {
        (**self).is_weak(normalized)
    }
}
