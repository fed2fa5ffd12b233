//! Violation model - the values a policy evaluation reports.

use std::collections::BTreeMap;
use std::fmt;

/// Stable identifier of a failed rule.
///
/// Callers branch on [`ViolationKind::code`]; messages are for display only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ViolationKind {
    AllNumeric,
    SimilarToAttribute,
    CommonPassword,
    PasswordTooLong,
    PasswordTooShort,
    MinLengthDigit,
    MinLengthAlpha,
    MinLengthUpper,
    MinLengthLower,
    MinLengthSpecial,
}

impl ViolationKind {
    /// The language-agnostic code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::AllNumeric => "ALL_NUMERIC",
            Self::SimilarToAttribute => "SIMILAR_TO_ATTRIBUTE",
            Self::CommonPassword => "COMMON_PASSWORD",
            Self::PasswordTooLong => "PASSWORD_TOO_LONG",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::MinLengthDigit => "MIN_LENGTH_DIGIT",
            Self::MinLengthAlpha => "MIN_LENGTH_ALPHA",
            Self::MinLengthUpper => "MIN_LENGTH_UPPER",
            Self::MinLengthLower => "MIN_LENGTH_LOWER",
            Self::MinLengthSpecial => "MIN_LENGTH_SPECIAL",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Param key carrying the configured maximum length.
pub const PARAM_MAX_LENGTH: &str = "max_length";
/// Param key carrying the threshold of a minimum rule.
pub const PARAM_MIN_LENGTH: &str = "min_length";
/// Param key carrying the count actually found in the password.
pub const PARAM_ACTUAL: &str = "actual";

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
    pub params: BTreeMap<&'static str, usize>,
    /// Attribute the password was judged similar to (`SIMILAR_TO_ATTRIBUTE` only).
    pub attribute: Option<String>,
}

/// Picks the singular form exactly when `n == 1`.
pub(crate) fn plural<'a>(n: usize, singular: &'a str, plural: &'a str) -> &'a str {
    if n == 1 { singular } else { plural }
}

impl Violation {
    fn new(kind: ViolationKind, message: String) -> Self {
        Self {
            kind,
            message,
            params: BTreeMap::new(),
            attribute: None,
        }
    }

    fn with_param(mut self, key: &'static str, value: usize) -> Self {
        self.params.insert(key, value);
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Looks up a named numeric parameter.
    pub fn param(&self, key: &str) -> Option<usize> {
        self.params.get(key).copied()
    }

    pub fn all_numeric() -> Self {
        Self::new(
            ViolationKind::AllNumeric,
            "This password is entirely numeric.".to_string(),
        )
    }

    pub fn common_password() -> Self {
        Self::new(
            ViolationKind::CommonPassword,
            "This password is too common.".to_string(),
        )
    }

    /// Similarity to a user attribute such as `username`.
    pub fn similar_to(attribute: impl Into<String>) -> Self {
        let attribute = attribute.into();
        let mut violation = Self::new(
            ViolationKind::SimilarToAttribute,
            format!(
                "The password is too similar to the {}.",
                attribute.replace('_', " ")
            ),
        );
        violation.attribute = Some(attribute);
        violation
    }

    pub fn too_long(max_length: usize) -> Self {
        Self::new(
            ViolationKind::PasswordTooLong,
            format!(
                "This password is too long; it accepts up to {} {}.",
                max_length,
                plural(max_length, "character", "characters")
            ),
        )
        .with_param(PARAM_MAX_LENGTH, max_length)
    }

    /// The parameterless "too short" message.
    pub fn too_short() -> Self {
        Self::new(
            ViolationKind::PasswordTooShort,
            "This password is too short.".to_string(),
        )
    }

    /// The "too short" message naming the required length.
    pub fn too_short_with_minimum(min_length: usize) -> Self {
        Self::new(
            ViolationKind::PasswordTooShort,
            format!(
                "This password must contain at least {} {}.",
                min_length,
                plural(min_length, "character", "characters")
            ),
        )
        .with_param(PARAM_MIN_LENGTH, min_length)
    }

    pub fn min_digits(minimum: usize, actual: usize) -> Self {
        Self::class_minimum(ViolationKind::MinLengthDigit, "digit", "digits", minimum, actual)
    }

    pub fn min_alpha(minimum: usize, actual: usize) -> Self {
        Self::class_minimum(ViolationKind::MinLengthAlpha, "letter", "letters", minimum, actual)
    }

    pub fn min_upper(minimum: usize, actual: usize) -> Self {
        Self::class_minimum(
            ViolationKind::MinLengthUpper,
            "upper case letter",
            "upper case letters",
            minimum,
            actual,
        )
    }

    pub fn min_lower(minimum: usize, actual: usize) -> Self {
        Self::class_minimum(
            ViolationKind::MinLengthLower,
            "lower case letter",
            "lower case letters",
            minimum,
            actual,
        )
    }

    pub fn min_special(minimum: usize, actual: usize) -> Self {
        Self::class_minimum(
            ViolationKind::MinLengthSpecial,
            "special character",
            "special characters",
            minimum,
            actual,
        )
    }

    fn class_minimum(
        kind: ViolationKind,
        singular: &str,
        plural_form: &str,
        minimum: usize,
        actual: usize,
    ) -> Self {
        Self::new(
            kind,
            format!(
                "This password must contain at least {} {} (only {} found).",
                minimum,
                plural(minimum, singular, plural_form),
                actual
            ),
        )
        .with_param(PARAM_MIN_LENGTH, minimum)
        .with_param(PARAM_ACTUAL, actual)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.message)
    }
}

/// Ordered outcome of one evaluation. Empty means the password is accepted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyEvaluation {
    violations: Vec<Violation>,
}

impl PolicyEvaluation {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    pub fn is_accepted(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Codes in report order, duplicates included.
    pub fn codes(&self) -> Vec<&'static str> {
        self.violations.iter().map(Violation::code).collect()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    /// First violation of the given kind, if any.
    pub fn find(&self, kind: ViolationKind) -> Option<&Violation> {
        self.violations.iter().find(|v| v.kind == kind)
    }

    pub fn count(&self, kind: ViolationKind) -> usize {
        self.violations.iter().filter(|v| v.kind == kind).count()
    }

    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

impl IntoIterator for PolicyEvaluation {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.into_iter()
    }
}

impl<'a> IntoIterator for &'a PolicyEvaluation {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.violations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_picks_singular_only_for_one() {
        assert_eq!(plural(1, "digit", "digits"), "digit");
        assert_eq!(plural(0, "digit", "digits"), "digits");
        assert_eq!(plural(2, "digit", "digits"), "digits");
    }

    #[test]
    fn test_class_minimum_messages_pluralize_on_threshold() {
        assert_eq!(
            Violation::min_digits(1, 0).message,
            "This password must contain at least 1 digit (only 0 found)."
        );
        assert_eq!(
            Violation::min_digits(2, 1).message,
            "This password must contain at least 2 digits (only 1 found)."
        );
        assert_eq!(
            Violation::min_upper(1, 0).message,
            "This password must contain at least 1 upper case letter (only 0 found)."
        );
        assert_eq!(
            Violation::min_upper(2, 1).message,
            "This password must contain at least 2 upper case letters (only 1 found)."
        );
        assert_eq!(
            Violation::min_lower(1, 0).message,
            "This password must contain at least 1 lower case letter (only 0 found)."
        );
        assert_eq!(
            Violation::min_alpha(1, 0).message,
            "This password must contain at least 1 letter (only 0 found)."
        );
        assert_eq!(
            Violation::min_lower(3, 2).message,
            "This password must contain at least 3 lower case letters (only 2 found)."
        );
        assert_eq!(
            Violation::min_alpha(2, 0).message,
            "This password must contain at least 2 letters (only 0 found)."
        );
        assert_eq!(
            Violation::min_special(1, 0).message,
            "This password must contain at least 1 special character (only 0 found)."
        );
        assert_eq!(
            Violation::min_special(2, 0).message,
            "This password must contain at least 2 special characters (only 0 found)."
        );
    }

    #[test]
    fn test_length_messages_pluralize() {
        assert_eq!(
            Violation::too_long(1).message,
            "This password is too long; it accepts up to 1 character."
        );
        assert_eq!(
            Violation::too_short_with_minimum(8).message,
            "This password must contain at least 8 characters."
        );
    }

    #[test]
    fn test_params_carry_threshold_and_actual() {
        let v = Violation::min_special(3, 1);
        assert_eq!(v.code(), "MIN_LENGTH_SPECIAL");
        assert_eq!(v.param(PARAM_MIN_LENGTH), Some(3));
        assert_eq!(v.param(PARAM_ACTUAL), Some(1));

        let v = Violation::too_long(64);
        assert_eq!(v.param(PARAM_MAX_LENGTH), Some(64));
        assert!(Violation::too_short().params.is_empty());
    }

    #[test]
    fn test_similar_to_renders_attribute_name() {
        let v = Violation::similar_to("first_name");
        assert_eq!(v.attribute.as_deref(), Some("first_name"));
        assert_eq!(v.message, "The password is too similar to the first name.");
        assert_eq!(
            v.to_string(),
            "[SIMILAR_TO_ATTRIBUTE] The password is too similar to the first name."
        );
    }

    #[test]
    fn test_evaluation_accessors() {
        let evaluation = PolicyEvaluation::new(vec![
            Violation::too_short(),
            Violation::too_short_with_minimum(8),
            Violation::min_digits(1, 0),
        ]);

        assert!(!evaluation.is_accepted());
        assert_eq!(evaluation.len(), 3);
        assert_eq!(
            evaluation.codes(),
            vec!["PASSWORD_TOO_SHORT", "PASSWORD_TOO_SHORT", "MIN_LENGTH_DIGIT"]
        );
        assert_eq!(evaluation.count(ViolationKind::PasswordTooShort), 2);
        assert!(evaluation.find(ViolationKind::AllNumeric).is_none());
        assert!(PolicyEvaluation::default().is_accepted());
    }
}
