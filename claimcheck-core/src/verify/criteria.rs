//! Criteria-match section: claimed criteria against the catalog entries for the
//! case's procedure codes, plus the cited guideline sources.

use super::{claimed, VerifyContext, CRITERIA_SECTION};
use crate::codes::leading_token;
use crate::fuzzy::fuzzy_match;
use crate::models::{ClaimVerdict, SectionResult};
use crate::reference::CriteriaEntry;
use crate::resolver::{is_plan_specific, resolve_guideline, GuidelineResolution};

const SOURCE_SEPARATORS: [char; 3] = ['/', ',', ';'];

pub fn verify_criteria(ctx: &VerifyContext<'_>) -> SectionResult {
    let mut section = SectionResult::new(CRITERIA_SECTION);
    let criteria = &ctx.brief.criteria_match;
    let reference = reference_criteria(ctx);

    for text in claimed(&criteria.criteria_met) {
        let claim = format!("Criterion met: {}", text);
        let verdict = if reference.is_empty() {
            ClaimVerdict::unverified(
                claim,
                "No reference data: the case's procedure codes have no catalogued criteria",
            )
        } else if let Some((entry, matched)) = find_match(&reference, text) {
            ClaimVerdict::verified(
                claim,
                Some(format!("{} ({})", entry.name, entry.code)),
                format!("Matches typical criterion \"{}\"", matched),
            )
        } else {
            ClaimVerdict::unverified(
                claim,
                "Could not match against reference criteria; needs manual review",
            )
        };
        section.claims.push(verdict);
    }

    // Without reference criteria there is nothing to check a "not met" claim against.
    if !reference.is_empty() {
        for text in claimed(&criteria.criteria_not_met) {
            let claim = format!("Criterion not met: {}", text);
            let verdict = match find_match(&reference, text) {
                Some((entry, matched)) => ClaimVerdict::verified(
                    claim,
                    Some(format!("{} ({})", entry.name, entry.code)),
                    format!("Recognized criterion \"{}\" reported as not met", matched),
                ),
                None => ClaimVerdict::unverified(
                    claim,
                    "Not a recognized criterion for the requested procedure; needs manual review",
                ),
            };
            section.claims.push(verdict);
        }
    }

    for fragment in criteria
        .guideline_source
        .split(SOURCE_SEPARATORS)
        .map(str::trim)
        .filter(|f| !f.is_empty())
    {
        verify_citation(ctx, &mut section, format!("Guideline source: {}", fragment), fragment);
    }

    let applicable = criteria.applicable_guideline.trim();
    if !applicable.is_empty() {
        verify_citation(ctx, &mut section, format!("Applicable guideline: {}", applicable), applicable);
    }

    tracing::debug!(
        "Criteria section: {} claims, {} flags, {} reference criteria",
        section.claims.len(),
        section.flags.len(),
        reference.len()
    );
    section
}

/// Union of typical criteria for every case procedure code found in the catalog.
fn reference_criteria<'a>(ctx: &VerifyContext<'a>) -> Vec<(&'a CriteriaEntry, &'a str)> {
    let criteria = ctx.criteria;
    ctx.case
        .procedure_codes
        .iter()
        .filter_map(|code| criteria.lookup(leading_token(code)))
        .flat_map(|entry| entry.typical_criteria.iter().map(move |c| (entry, c.as_str())))
        .collect()
}

fn find_match<'a>(
    reference: &[(&'a CriteriaEntry, &'a str)],
    text: &str,
) -> Option<(&'a CriteriaEntry, &'a str)> {
    reference
        .iter()
        .find(|(_, criterion)| fuzzy_match(criterion, text))
        .copied()
}

fn verify_citation(
    ctx: &VerifyContext<'_>,
    section: &mut SectionResult,
    claim: String,
    citation: &str,
) {
    let verdict = match resolve_guideline(ctx.guidelines, citation) {
        GuidelineResolution::Catalog(entry) => ClaimVerdict::verified(
            claim,
            Some(format!("{} ({})", entry.canonical_name, entry.organization)),
            format!("Recognized {} published by {}", entry.category.label(), entry.organization),
        ),
        GuidelineResolution::RegulatoryFormat => ClaimVerdict::unverified(
            claim,
            "Follows a known regulatory or evidence citation format but is not in the guideline catalog",
        ),
        GuidelineResolution::Unrecognized if is_plan_specific(citation) => ClaimVerdict::unverified(
            claim,
            "Plan-specific policy reference; cannot be verified against public guidelines",
        ),
        GuidelineResolution::Unrecognized => {
            tracing::warn!("Unrecognized guideline citation: {}", citation);
            section
                .flags
                .push(format!("Unrecognized guideline citation: \"{}\"", citation));
            ClaimVerdict::flagged(
                claim,
                "Not found in the guideline catalog and does not match any known citation format",
            )
        }
    };
    section.claims.push(verdict);
}
