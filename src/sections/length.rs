//! Length sections - check the password against the configured bounds.
//! Length is measured in characters, not bytes.

use super::{SectionContext, SectionResult};
use crate::violation::Violation;

pub fn max_length_section(ctx: &SectionContext<'_>) -> SectionResult {
    let max = ctx.config.max_length();
    if ctx.counts.length > max {
        return Ok(vec![Violation::too_long(max)]);
    }
    Ok(vec![])
}

/// A short password yields both the generic and the parameterised
/// `PASSWORD_TOO_SHORT` violation.
pub fn min_length_section(ctx: &SectionContext<'_>) -> SectionResult {
    let min = ctx.config.min_length();
    if ctx.counts.length < min {
        return Ok(vec![
            Violation::too_short(),
            Violation::too_short_with_minimum(min),
        ]);
    }
    Ok(vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::oracle::UserAttributes;
    use crate::sections::testing::run;

    fn config() -> PolicyConfig {
        PolicyConfig::builder().min_length(8).max_length(12).build()
    }

    #[test]
    fn test_min_length_section_too_short() {
        let result = run(min_length_section, "Short1!", &config(), &UserAttributes::new());
        assert_eq!(
            result.unwrap(),
            vec![Violation::too_short(), Violation::too_short_with_minimum(8)]
        );
    }

    #[test]
    fn test_min_length_section_exactly_minimum() {
        let result = run(min_length_section, "12345678", &config(), &UserAttributes::new());
        assert_eq!(result.unwrap(), vec![]);
    }

    #[test]
    fn test_min_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        let result = run(min_length_section, "ééééééé", &config(), &UserAttributes::new());
        assert_eq!(result.unwrap().len(), 2);
    }

    #[test]
    fn test_max_length_section_too_long() {
        let result = run(max_length_section, "ThirteenChars", &config(), &UserAttributes::new());
        let violations = result.unwrap();
        assert_eq!(violations, vec![Violation::too_long(12)]);
        assert_eq!(violations[0].param("max_length"), Some(12));
    }

    #[test]
    fn test_max_length_section_exactly_maximum() {
        let result = run(max_length_section, "TwelveChars!", &config(), &UserAttributes::new());
        assert_eq!(result.unwrap(), vec![]);
    }
}
