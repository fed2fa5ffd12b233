//! Requirements summary for display next to a password field.

use crate::config::PolicyConfig;
use crate::violation::plural;

/// Describes `config` in one sentence.
///
/// Clauses appear in a fixed order (maximum length, minimum length,
/// letters, digits, lower case, upper case, special characters) and only
/// for non-zero thresholds. The special character clause needs a
/// non-empty alphabet, which it lists verbatim.
pub fn describe(config: &PolicyConfig) -> String {
    let mut clauses: Vec<String> = Vec::new();

    if config.max_length() > 0 {
        clauses.push(bound("at most", config.max_length(), "character", "characters"));
    }
    if config.min_length() > 0 {
        clauses.push(bound("at least", config.min_length(), "character", "characters"));
    }
    if config.min_alpha() > 0 {
        clauses.push(bound("at least", config.min_alpha(), "letter", "letters"));
    }
    if config.min_digits() > 0 {
        clauses.push(bound("at least", config.min_digits(), "digit", "digits"));
    }
    if config.min_lower() > 0 {
        clauses.push(bound(
            "at least",
            config.min_lower(),
            "lower case letter",
            "lower case letters",
        ));
    }
    if config.min_upper() > 0 {
        clauses.push(bound(
            "at least",
            config.min_upper(),
            "upper case letter",
            "upper case letters",
        ));
    }
    if config.min_special() > 0 && !config.special_characters().is_empty() {
        let clause = bound(
            "at least",
            config.min_special(),
            "special character",
            "special characters",
        );
        clauses.push(format!("{clause}, such as {}", config.special_characters()));
    }

    if clauses.is_empty() {
        return "This password has no composition requirements.".to_string();
    }
    format!("This password must contain {}.", clauses.join(", "))
}

fn bound(qualifier: &str, n: usize, singular: &str, plural_form: &str) -> String {
    format!("{qualifier} {n} {}", plural(n, singular, plural_form))
}
