use std::collections::HashSet;

use super::{claimed, VerifyContext, CODES_SECTION};
use crate::codes::{code_system, is_diagnosis_code, leading_token, CodeSystem};
use crate::models::{ClaimVerdict, SectionResult};

pub fn verify_codes(ctx: &VerifyContext<'_>) -> SectionResult {
    let mut section = SectionResult::new(CODES_SECTION);

    let case_codes: HashSet<String> = ctx
        .case
        .procedure_codes
        .iter()
        .map(|c| leading_token(c).to_uppercase())
        .filter(|c| !c.is_empty())
        .collect();

    for entry in claimed(&ctx.brief.procedure_analysis.codes) {
        let token = leading_token(entry);
        let claim = format!("Procedure code: {}", entry);

        match code_system(token) {
            Some(system) => {
                section.claims.push(ClaimVerdict::verified(
                    claim,
                    Some(format!("{} code format", system.label())),
                    format!("{} is a well-formed {} code", token, system.label()),
                ));
                // Independent of the claim verdict.
                if !case_codes.contains(&token.to_uppercase()) {
                    section.flags.push(format!(
                        "Brief references procedure code {} which is not in the original case",
                        token
                    ));
                }
            }
            None => {
                tracing::warn!("Invalid procedure code in brief: {}", token);
                section.claims.push(ClaimVerdict::flagged(
                    claim,
                    format!(
                        "\"{}\" is not a valid CPT, HCPCS or ICD-10 code format",
                        token
                    ),
                ));
            }
        }
    }

    let primary = ctx.brief.diagnosis_analysis.primary_diagnosis.trim();
    if !primary.is_empty() {
        let token = leading_token(primary);
        let claim = format!("Primary diagnosis: {}", primary);
        let verdict = if is_diagnosis_code(token) {
            ClaimVerdict::verified(
                claim,
                Some(format!("{} code format", CodeSystem::Diagnosis.label())),
                format!("{} is a well-formed ICD-10 code", token),
            )
        } else {
            ClaimVerdict::unverified(
                claim,
                "Could not extract a standard ICD-10 code from the primary diagnosis",
            )
        };
        section.claims.push(verdict);
    }

    tracing::debug!(
        "Codes section: {} claims, {} flags",
        section.claims.len(),
        section.flags.len()
    );
    section
}
