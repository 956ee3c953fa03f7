use claimcheck_core::codes::{code_system, leading_token};
use claimcheck_core::ipc::{ClaimCheckRequest, ClaimCheckResponse};
use claimcheck_core::resolver::{is_plan_specific, resolve_guideline, GuidelineResolution};
use claimcheck_core::FactChecker;

pub fn handle_request(request: ClaimCheckRequest, checker: &FactChecker) -> ClaimCheckResponse {
    match request {
        ClaimCheckRequest::Ping => ClaimCheckResponse::pong(),
        ClaimCheckRequest::Health => ClaimCheckResponse::ok(serde_json::json!({
            "status": "healthy",
            "guideline_entries": checker.guidelines().entries().len(),
        })),
        ClaimCheckRequest::Check { brief, case } => {
            let result = checker.check(&brief, &case);
            match serde_json::to_value(&result) {
                Ok(data) => ClaimCheckResponse::ok(data),
                Err(e) => ClaimCheckResponse::err(format!("Failed to serialize result: {}", e)),
            }
        }
        ClaimCheckRequest::ResolveGuideline { citation } => {
            ClaimCheckResponse::ok(resolution_json(checker, &citation))
        }
        ClaimCheckRequest::ValidateCode { code } => ClaimCheckResponse::ok(code_json(&code)),
    }
}

/// Describe how a citation resolves.
pub fn resolution_json(checker: &FactChecker, citation: &str) -> serde_json::Value {
    let plan_specific = is_plan_specific(citation);
    match resolve_guideline(checker.guidelines(), citation) {
        GuidelineResolution::Catalog(entry) => serde_json::json!({
            "citation": citation,
            "resolution": "catalog",
            "entry": entry,
            "plan_specific": plan_specific,
        }),
        GuidelineResolution::RegulatoryFormat => serde_json::json!({
            "citation": citation,
            "resolution": "regulatory_format",
            "entry": null,
            "plan_specific": plan_specific,
        }),
        GuidelineResolution::Unrecognized => serde_json::json!({
            "citation": citation,
            "resolution": "unrecognized",
            "entry": null,
            "plan_specific": plan_specific,
        }),
    }
}

/// Describe which coding system, if any, the leading token matches.
pub fn code_json(code: &str) -> serde_json::Value {
    let token = leading_token(code);
    let system = code_system(token);
    serde_json::json!({
        "code": code,
        "token": token,
        "valid": system.is_some(),
        "system": system,
        "label": system.map(|s| s.label()),
    })
}
