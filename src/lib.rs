//! Password policy evaluation library
//!
//! This library checks a candidate password against a configurable set of
//! rules and reports every rule it violates, not just the first one.
//!
//! # Features
//!
//! - `async` (default): Enables evaluation on tokio's blocking pool with the
//!   result delivered over a channel
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `PWD_COMMON_PASSWORDS_PATH`: Custom path to the common password list
//!   (default: `./assets/common-passwords.txt`)
//! - `PWD_POLICY_*`: Thresholds read by [`PolicyConfig::from_env`]
//!
//! # Example
//!
//! ```rust,no_run
//! use pwd_policy::{init_common_passwords, PolicyConfig, PolicyEngine, UserAttributes};
//! use secrecy::SecretString;
//!
//! // Load the common password list (call once at startup)
//! init_common_passwords().expect("Failed to load common passwords");
//!
//! let config = PolicyConfig::builder().min_digits(1).min_upper(1).build();
//! println!("{}", config.help_text());
//!
//! let engine = PolicyEngine::new(config);
//! let mut user = UserAttributes::new();
//! user.insert("username".to_string(), "jdoe".to_string());
//!
//! let password = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let evaluation = engine.evaluate(&password, Some(&user)).expect("oracles available");
//!
//! for violation in &evaluation {
//!     println!("{}: {}", violation.code(), violation.message);
//! }
//! ```

// Internal modules
mod config;
mod corpus;
mod engine;
mod help;
mod oracle;
mod sections;
mod similarity;
mod violation;

// Public API
pub use config::{
    ConfigError, PolicyConfig, PolicyConfigBuilder, DEFAULT_MAX_LENGTH, DEFAULT_MIN_LENGTH,
    DEFAULT_SPECIAL_CHARACTERS,
};
pub use corpus::{
    common_passwords, corpus_path, init_common_passwords, init_common_passwords_from_path,
    CommonPasswords, CorpusError, SharedCorpus,
};
pub use engine::{PolicyEngine, PolicyError};
pub use help::describe;
pub use oracle::{OracleError, SimilarityOracle, UserAttributes, WeakPasswordOracle};
pub use sections::CharCounts;
pub use similarity::{AttributeSimilarity, DEFAULT_MAX_SIMILARITY};
pub use violation::{
    PolicyEvaluation, Violation, ViolationKind, PARAM_ACTUAL, PARAM_MAX_LENGTH, PARAM_MIN_LENGTH,
};

#[cfg(feature = "async")]
pub use engine::evaluate_tx;
