//! Similarity section - asks the similarity oracle about the configured
//! user attributes.

use super::{SectionContext, SectionResult};

/// Every violation the oracle reports is passed through individually.
pub fn similarity_section(ctx: &SectionContext<'_>) -> SectionResult {
    ctx.similarity
        .similarity(ctx.password, ctx.attributes, ctx.config.similarity_fields())
}
