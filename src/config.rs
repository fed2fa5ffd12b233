//! Policy configuration.
//!
//! A [`PolicyConfig`] is built once, typically at startup, and shared
//! read-only by every evaluation.

use thiserror::Error;

/// Default alphabet of the "special" character class.
pub const DEFAULT_SPECIAL_CHARACTERS: &str = "~!@#$%^&*()_+{}\":;'[]";

pub const DEFAULT_MAX_LENGTH: usize = 128;
pub const DEFAULT_MIN_LENGTH: usize = 8;

const ENV_PREFIX: &str = "PWD_POLICY_";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {value:?}")]
    InvalidValue { var: String, value: String },
    #[error("Maximum similarity must be at least 0.1, got {0}")]
    InvalidSimilarity(f64),
}

/// Thresholds governing password acceptability.
///
/// A class minimum of zero disables that rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    max_length: usize,
    min_length: usize,
    min_digits: usize,
    min_alpha: usize,
    min_upper: usize,
    min_lower: usize,
    min_special: usize,
    special_characters: String,
    similarity_fields: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            min_length: DEFAULT_MIN_LENGTH,
            min_digits: 0,
            min_alpha: 0,
            min_upper: 0,
            min_lower: 0,
            min_special: 0,
            special_characters: DEFAULT_SPECIAL_CHARACTERS.to_string(),
            similarity_fields: vec!["username".to_string(), "email".to_string()],
        }
    }
}

impl PolicyConfig {
    pub fn builder() -> PolicyConfigBuilder {
        PolicyConfigBuilder::default()
    }

    /// Builds a configuration from `PWD_POLICY_*` environment variables.
    ///
    /// Unset variables keep their defaults:
    /// `PWD_POLICY_MAX_LENGTH`, `PWD_POLICY_MIN_LENGTH`, `PWD_POLICY_MIN_DIGITS`,
    /// `PWD_POLICY_MIN_ALPHA`, `PWD_POLICY_MIN_UPPER`, `PWD_POLICY_MIN_LOWER`,
    /// `PWD_POLICY_MIN_SPECIAL`, `PWD_POLICY_SPECIAL_CHARACTERS` and
    /// `PWD_POLICY_SIMILARITY_FIELDS` (comma separated).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for a count that is not a
    /// non-negative integer or for a value that is not valid unicode.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut builder = Self::builder();

        if let Some(v) = env_count("MAX_LENGTH")? {
            builder = builder.max_length(v);
        }
        if let Some(v) = env_count("MIN_LENGTH")? {
            builder = builder.min_length(v);
        }
        if let Some(v) = env_count("MIN_DIGITS")? {
            builder = builder.min_digits(v);
        }
        if let Some(v) = env_count("MIN_ALPHA")? {
            builder = builder.min_alpha(v);
        }
        if let Some(v) = env_count("MIN_UPPER")? {
            builder = builder.min_upper(v);
        }
        if let Some(v) = env_count("MIN_LOWER")? {
            builder = builder.min_lower(v);
        }
        if let Some(v) = env_count("MIN_SPECIAL")? {
            builder = builder.min_special(v);
        }
        if let Some(v) = env_string("SPECIAL_CHARACTERS")? {
            builder = builder.special_characters(v);
        }
        if let Some(v) = env_string("SIMILARITY_FIELDS")? {
            builder = builder.similarity_fields(
                v.split(',').map(str::trim).filter(|f| !f.is_empty()),
            );
        }

        let config = builder.build();

        #[cfg(feature = "tracing")]
        tracing::debug!("Policy configuration loaded from environment: {:?}", config);

        Ok(config)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }

    pub fn min_digits(&self) -> usize {
        self.min_digits
    }

    pub fn min_alpha(&self) -> usize {
        self.min_alpha
    }

    pub fn min_upper(&self) -> usize {
        self.min_upper
    }

    pub fn min_lower(&self) -> usize {
        self.min_lower
    }

    pub fn min_special(&self) -> usize {
        self.min_special
    }

    pub fn special_characters(&self) -> &str {
        &self.special_characters
    }

    pub fn is_special(&self, c: char) -> bool {
        self.special_characters.contains(c)
    }

    pub fn similarity_fields(&self) -> &[String] {
        &self.similarity_fields
    }

    /// Human-readable summary of the requirements. See [`crate::describe`].
    pub fn help_text(&self) -> String {
        crate::help::describe(self)
    }
}

/// Builder for [`PolicyConfig`]; starts from the defaults.
#[derive(Debug, Clone, Default)]
pub struct PolicyConfigBuilder {
    config: PolicyConfig,
}

impl PolicyConfigBuilder {
    pub fn max_length(mut self, value: usize) -> Self {
        self.config.max_length = value;
        self
    }

    pub fn min_length(mut self, value: usize) -> Self {
        self.config.min_length = value;
        self
    }

    pub fn min_digits(mut self, value: usize) -> Self {
        self.config.min_digits = value;
        self
    }

    pub fn min_alpha(mut self, value: usize) -> Self {
        self.config.min_alpha = value;
        self
    }

    pub fn min_upper(mut self, value: usize) -> Self {
        self.config.min_upper = value;
        self
    }

    pub fn min_lower(mut self, value: usize) -> Self {
        self.config.min_lower = value;
        self
    }

    pub fn min_special(mut self, value: usize) -> Self {
        self.config.min_special = value;
        self
    }

    pub fn special_characters(mut self, alphabet: impl Into<String>) -> Self {
        self.config.special_characters = alphabet.into();
        self
    }

    /// Replaces the attribute names compared by the similarity rule.
    /// Repeated names are kept once, at their first position.
    pub fn similarity_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for field in fields {
            let field = field.into();
            if !unique.contains(&field) {
                unique.push(field);
            }
        }
        self.config.similarity_fields = unique;
        self
    }

    pub fn build(self) -> PolicyConfig {
        self.config
    }
}

fn env_string(suffix: &str) -> Result<Option<String>, ConfigError> {
    let var = format!("{ENV_PREFIX}{suffix}");
    match std::env::var(&var) {
        Ok(value) => Ok(Some(value)),
        Err(std::env::VarError::NotPresent) => Ok(None),
        Err(std::env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
            var,
            value: raw.to_string_lossy().into_owned(),
        }),
    }
}

fn env_count(suffix: &str) -> Result<Option<usize>, ConfigError> {
    let Some(value) = env_string(suffix)? else {
        return Ok(None);
    };
    value
        .trim()
        .parse::<usize>()
        .map(Some)
        .map_err(|_| ConfigError::InvalidValue {
            var: format!("{ENV_PREFIX}{suffix}"),
            value,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "PWD_POLICY_MAX_LENGTH",
        "PWD_POLICY_MIN_LENGTH",
        "PWD_POLICY_MIN_DIGITS",
        "PWD_POLICY_MIN_ALPHA",
        "PWD_POLICY_MIN_UPPER",
        "PWD_POLICY_MIN_LOWER",
        "PWD_POLICY_MIN_SPECIAL",
        "PWD_POLICY_SPECIAL_CHARACTERS",
        "PWD_POLICY_SIMILARITY_FIELDS",
    ];

    fn set_env(key: &str, value: &str) {
        // SAFETY: tests touching the environment run under #[serial]
        unsafe { std::env::set_var(key, value); }
    }

    fn clear_env() {
        for var in VARS {
            // SAFETY: tests touching the environment run under #[serial]
            unsafe { std::env::remove_var(var); }
        }
    }

    #[test]
    fn test_defaults() {
        let config = PolicyConfig::default();
        assert_eq!(config.max_length(), 128);
        assert_eq!(config.min_length(), 8);
        assert_eq!(config.min_digits(), 0);
        assert_eq!(config.min_special(), 0);
        assert_eq!(config.special_characters(), "~!@#$%^&*()_+{}\":;'[]");
        assert_eq!(config.similarity_fields(), ["username", "email"]);
    }

    #[test]
    fn test_defaults_are_not_shared_between_instances() {
        let custom = PolicyConfig::builder().similarity_fields(["nickname"]).build();
        assert_eq!(custom.similarity_fields(), ["nickname"]);
        assert_eq!(PolicyConfig::default().similarity_fields(), ["username", "email"]);
    }

    #[test]
    fn test_builder_dedupes_similarity_fields_in_order() {
        let config = PolicyConfig::builder()
            .similarity_fields(["email", "username", "email"])
            .build();
        assert_eq!(config.similarity_fields(), ["email", "username"]);
    }

    #[test]
    fn test_builder_does_not_validate_consistency() {
        let config = PolicyConfig::builder().min_length(20).max_length(4).build();
        assert_eq!(config.min_length(), 20);
        assert_eq!(config.max_length(), 4);
    }

    #[test]
    fn test_is_special_uses_alphabet() {
        let config = PolicyConfig::builder().special_characters("#a").build();
        assert!(config.is_special('#'));
        assert!(config.is_special('a'));
        assert!(!config.is_special('!'));
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_is_default() {
        clear_env();
        assert_eq!(PolicyConfig::from_env(), Ok(PolicyConfig::default()));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        set_env("PWD_POLICY_MIN_LENGTH", "12");
        set_env("PWD_POLICY_MIN_DIGITS", " 2 ");
        set_env("PWD_POLICY_SPECIAL_CHARACTERS", "!?");
        set_env("PWD_POLICY_SIMILARITY_FIELDS", "username, first_name,,");

        let config = PolicyConfig::from_env().expect("valid environment");
        assert_eq!(config.min_length(), 12);
        assert_eq!(config.min_digits(), 2);
        assert_eq!(config.max_length(), 128);
        assert_eq!(config.special_characters(), "!?");
        assert_eq!(config.similarity_fields(), ["username", "first_name"]);

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_count() {
        clear_env();
        set_env("PWD_POLICY_MIN_UPPER", "-1");

        let result = PolicyConfig::from_env();
        assert_eq!(
            result,
            Err(ConfigError::InvalidValue {
                var: "PWD_POLICY_MIN_UPPER".to_string(),
                value: "-1".to_string(),
            })
        );

        clear_env();
    }
}
