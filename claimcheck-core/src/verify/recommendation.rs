use super::{claimed, VerifyContext, RECOMMENDATION_SECTION};
use crate::models::{ClaimVerdict, SectionResult};
use crate::resolver::matches_regulatory_format;

/// State-specific requirements must at least look like a real regulation.
pub fn verify_recommendation(ctx: &VerifyContext<'_>) -> SectionResult {
    let mut section = SectionResult::new(RECOMMENDATION_SECTION);

    for requirement in claimed(&ctx.brief.ai_recommendation.state_specific_requirements) {
        let claim = format!("State requirement: {}", requirement);
        if matches_regulatory_format(requirement) {
            section.claims.push(ClaimVerdict::unverified(
                claim,
                "Follows a recognized regulatory citation format; requires manual confirmation",
            ));
        } else {
            tracing::warn!("Potentially fabricated state requirement: {}", requirement);
            section.flags.push(format!(
                "Potentially fabricated state requirement: \"{}\"",
                requirement
            ));
            section.claims.push(ClaimVerdict::flagged(
                claim,
                "Does not reference a recognizable regulation or authority",
            ));
        }
    }

    tracing::debug!(
        "Recommendation section: {} claims, {} flags",
        section.claims.len(),
        section.flags.len()
    );
    section
}
