//! Policy engine - runs every rule section and collects the violations.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::config::PolicyConfig;
use crate::corpus::SharedCorpus;
use crate::oracle::{OracleError, SimilarityOracle, UserAttributes, WeakPasswordOracle};
use crate::sections::{
    all_numeric_section, common_password_section, max_length_section, min_alpha_section,
    min_digits_section, min_length_section, min_lower_section, min_special_section,
    min_upper_section, similarity_section, CharCounts, Section, SectionContext,
};
use crate::similarity::AttributeSimilarity;
use crate::violation::PolicyEvaluation;

/// Misuse by the caller, or a collaborator failure.
///
/// A rejected password is not an error; see [`PolicyEvaluation`].
#[derive(Error, Debug)]
pub enum PolicyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Rule sections in reporting order.
const SECTIONS: [(&str, Section); 10] = [
    ("all_numeric", all_numeric_section),
    ("similarity", similarity_section),
    ("common_password", common_password_section),
    ("max_length", max_length_section),
    ("min_length", min_length_section),
    ("min_digits", min_digits_section),
    ("min_alpha", min_alpha_section),
    ("min_upper", min_upper_section),
    ("min_lower", min_lower_section),
    ("min_special", min_special_section),
];

/// Evaluates passwords against a [`PolicyConfig`].
///
/// Stateless apart from its configuration and oracles, so one engine can be
/// shared across threads.
#[derive(Clone)]
pub struct PolicyEngine {
    config: PolicyConfig,
    similarity: Arc<dyn SimilarityOracle>,
    weak: Arc<dyn WeakPasswordOracle>,
}

impl fmt::Debug for PolicyEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyEngine")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Default for PolicyEngine {
    fn default() -> Self {
        Self::new(PolicyConfig::default())
    }
}

impl PolicyEngine {
    /// Engine with the default oracles: [`AttributeSimilarity`] and the
    /// process-wide common password corpus.
    pub fn new(config: PolicyConfig) -> Self {
        Self {
            config,
            similarity: Arc::new(AttributeSimilarity::default()),
            weak: Arc::new(SharedCorpus),
        }
    }

    pub fn with_similarity_oracle(mut self, oracle: impl SimilarityOracle + 'static) -> Self {
        self.similarity = Arc::new(oracle);
        self
    }

    pub fn with_weak_password_oracle(mut self, oracle: impl WeakPasswordOracle + 'static) -> Self {
        self.weak = Arc::new(oracle);
        self
    }

    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Evaluates a password and returns every violated rule.
    ///
    /// # Arguments
    /// * `password` - The candidate password
    /// * `attributes` - Optional user attributes for the similarity rule
    ///
    /// # Errors
    /// Only oracle failures; a rejected password is an `Ok` evaluation
    /// with violations.
    pub fn evaluate(
        &self,
        password: &SecretString,
        attributes: Option<&UserAttributes>,
    ) -> Result<PolicyEvaluation, PolicyError> {
        self.run_sections(password.expose_secret(), attributes)
    }

    /// Like [`evaluate`](Self::evaluate) for raw bytes.
    ///
    /// # Errors
    /// [`PolicyError::InvalidInput`] if `password` is not valid UTF-8.
    pub fn evaluate_bytes(
        &self,
        password: &[u8],
        attributes: Option<&UserAttributes>,
    ) -> Result<PolicyEvaluation, PolicyError> {
        let password = std::str::from_utf8(password).map_err(|e| {
            PolicyError::InvalidInput(format!("password is not valid UTF-8: {e}"))
        })?;
        self.run_sections(password, attributes)
    }

    fn run_sections(
        &self,
        password: &str,
        attributes: Option<&UserAttributes>,
    ) -> Result<PolicyEvaluation, PolicyError> {
        let no_attributes = UserAttributes::new();
        let ctx = SectionContext {
            password,
            counts: CharCounts::new(password, &self.config),
            config: &self.config,
            attributes: attributes.unwrap_or(&no_attributes),
            similarity: self.similarity.as_ref(),
            weak: self.weak.as_ref(),
        };

        // Every section runs; none short-circuits the others.
        let mut violations = Vec::new();
        for (_section_name, section) in SECTIONS {
            match section(&ctx) {
                Ok(found) => violations.extend(found),
                Err(e) => {
                    #[cfg(feature = "tracing")]
                    tracing::error!("Oracle failure in policy section {}: {}", _section_name, e);
                    return Err(e.into());
                }
            }
        }

        let evaluation = PolicyEvaluation::new(violations);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            accepted = evaluation.is_accepted(),
            codes = ?evaluation.codes(),
            "password evaluated"
        );

        Ok(evaluation)
    }
}

/// Evaluates on tokio's blocking pool and sends the result via channel.
///
/// A panic inside an oracle is resumed on the calling task.
#[cfg(feature = "async")]
pub async fn evaluate_tx(
    engine: Arc<PolicyEngine>,
    password: SecretString,
    attributes: Option<UserAttributes>,
    tx: mpsc::Sender<Result<PolicyEvaluation, PolicyError>>,
) {
    let handle =
        tokio::task::spawn_blocking(move || engine.evaluate(&password, attributes.as_ref()));

    let result = match handle.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(_e) => {
            #[cfg(feature = "tracing")]
            tracing::error!("Password evaluation task cancelled: {}", _e);
            return;
        }
    };

    if let Err(_e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send password evaluation result: {}", _e);
    }
}
