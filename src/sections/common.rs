//! Common password section - checks the case-folded password against the
//! weak password oracle.

use super::{SectionContext, SectionResult};
use crate::violation::Violation;

pub fn common_password_section(ctx: &SectionContext<'_>) -> SectionResult {
    if ctx.weak.is_weak(&ctx.password.to_lowercase())? {
        return Ok(vec![Violation::common_password()]);
    }
    Ok(vec![])
}
