//! Policy rule sections
//!
//! Each section checks one rule and appends its violations, if any.

mod common;
mod composition;
mod length;
mod numeric;
mod similarity;

pub use common::common_password_section;
pub use composition::{
    min_alpha_section, min_digits_section, min_lower_section, min_special_section,
    min_upper_section,
};
pub use length::{max_length_section, min_length_section};
pub use numeric::all_numeric_section;
pub use similarity::similarity_section;

use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

use crate::config::PolicyConfig;
use crate::oracle::{OracleError, SimilarityOracle, UserAttributes, WeakPasswordOracle};
use crate::violation::Violation;

/// Result type for section functions.
/// - `Ok(vec![])` - Section passed
/// - `Ok(violations)` - Section failed with one or more violations
/// - `Err(_)` - A collaborator failed
pub type SectionResult = Result<Vec<Violation>, OracleError>;

/// A rule section as run by the engine's orchestrator.
pub type Section = fn(&SectionContext<'_>) -> SectionResult;

/// Character class counts, computed once per evaluation.
///
/// A character may land in several classes (e.g. alpha and upper, or
/// alpha and special when the alphabet holds letters).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharCounts {
    pub length: usize,
    pub digits: usize,
    pub alpha: usize,
    pub lower: usize,
    pub upper: usize,
    pub special: usize,
}

impl CharCounts {
    pub fn new(password: &str, config: &PolicyConfig) -> Self {
        password.chars().fold(Self::default(), |mut counts, c| {
            counts.length += 1;
            counts.digits += usize::from(is_decimal_digit(c));
            counts.alpha += usize::from(c.is_alphabetic());
            counts.lower += usize::from(c.is_lowercase());
            counts.upper += usize::from(c.is_uppercase());
            counts.special += usize::from(config.is_special(c));
            counts
        })
    }
}

/// Decimal digits only (general category Nd); Roman numerals and
/// fractions are not digits.
pub fn is_decimal_digit(c: char) -> bool {
    c.general_category() == GeneralCategory::DecimalNumber
}

/// Everything a section may look at.
pub struct SectionContext<'a> {
    pub password: &'a str,
    pub counts: CharCounts,
    pub config: &'a PolicyConfig,
    pub attributes: &'a UserAttributes,
    pub similarity: &'a dyn SimilarityOracle,
    pub weak: &'a dyn WeakPasswordOracle,
}
