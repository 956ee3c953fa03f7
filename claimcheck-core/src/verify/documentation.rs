use super::{claimed, VerifyContext, DOCUMENTATION_SECTION};
use crate::fuzzy::fuzzy_contains;
use crate::models::{ClaimVerdict, SectionResult};

/// Missing documentation should reappear in the reviewer's information request.
pub fn verify_documentation(ctx: &VerifyContext<'_>) -> SectionResult {
    let mut section = SectionResult::new(DOCUMENTATION_SECTION);
    let requested = &ctx.brief.reviewer_action.additional_info_needed;

    for item in claimed(&ctx.brief.documentation_review.missing_documentation) {
        let claim = format!("Missing documentation: {}", item);
        let verdict = if fuzzy_contains(requested, item) {
            ClaimVerdict::verified(
                claim,
                Some("Additional information needed".to_string()),
                "Also requested as additional information; internally consistent",
            )
        } else {
            ClaimVerdict::unverified(
                claim,
                "Not requested as additional information; may be minor",
            )
        };
        section.claims.push(verdict);
    }

    tracing::debug!("Documentation section: {} claims", section.claims.len());
    section
}
