//! All-numeric section - rejects passwords made only of digits.

use super::{SectionContext, SectionResult};
use crate::violation::Violation;

/// Flags a non-empty password whose every character is a decimal digit.
/// The empty password is not "all numeric".
pub fn all_numeric_section(ctx: &SectionContext<'_>) -> SectionResult {
    let counts = ctx.counts;
    if counts.length > 0 && counts.digits == counts.length {
        return Ok(vec![Violation::all_numeric()]);
    }
    Ok(vec![])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PolicyConfig;
    use crate::oracle::UserAttributes;
    use crate::sections::testing::run;

    fn check(password: &str) -> SectionResult {
        run(all_numeric_section, password, &PolicyConfig::default(), &UserAttributes::new())
    }

    #[test]
    fn test_numeric_section_digits_only() {
        assert_eq!(check("12345678").unwrap(), vec![Violation::all_numeric()]);
    }

    #[test]
    fn test_numeric_section_unicode_digits() {
        assert_eq!(check("١٢٣٤").unwrap(), vec![Violation::all_numeric()]);
    }

    #[test]
    fn test_numeric_section_other_numerals_are_not_digits() {
        assert_eq!(check("ⅠⅡⅢⅣⅤⅥⅦⅧ").unwrap(), vec![]);
        assert_eq!(check("½¼¾½¼¾½¼").unwrap(), vec![]);
    }

    #[test]
    fn test_numeric_section_empty_is_not_numeric() {
        assert_eq!(check("").unwrap(), vec![]);
    }

    #[test]
    fn test_numeric_section_mixed() {
        assert_eq!(check("1234567a").unwrap(), vec![]);
    }
}
