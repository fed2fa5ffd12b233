//! Composition sections - per character class minimums.
//!
//! A minimum of zero never fires: no count is below zero.

use super::{SectionContext, SectionResult};
use crate::violation::Violation;

fn at_least(
    minimum: usize,
    actual: usize,
    violation: fn(usize, usize) -> Violation,
) -> SectionResult {
    if actual < minimum {
        return Ok(vec![violation(minimum, actual)]);
    }
    Ok(vec![])
}

pub fn min_digits_section(ctx: &SectionContext<'_>) -> SectionResult {
    at_least(ctx.config.min_digits(), ctx.counts.digits, Violation::min_digits)
}

pub fn min_alpha_section(ctx: &SectionContext<'_>) -> SectionResult {
    at_least(ctx.config.min_alpha(), ctx.counts.alpha, Violation::min_alpha)
}

pub fn min_upper_section(ctx: &SectionContext<'_>) -> SectionResult {
    at_least(ctx.config.min_upper(), ctx.counts.upper, Violation::min_upper)
}

pub fn min_lower_section(ctx: &SectionContext<'_>) -> SectionResult {
    at_least(ctx.config.min_lower(), ctx.counts.lower, Violation::min_lower)
}

pub fn min_special_section(ctx: &SectionContext<'_>) -> SectionResult {
    at_least(ctx.config.min_special(), ctx.counts.special, Violation::min_special)
}
