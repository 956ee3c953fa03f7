//! Internal-consistency rules over the brief's own fields. No reference data.
//!
//! Every rule always reports, pass or fail, with the observed values in `detail`.

use crate::models::{Brief, Confidence, ConsistencyCheckResult, Recommendation};

pub const RECOMMENDATION_CRITERIA_CHECK: &str = "Recommendation-criteria alignment";
pub const CONFIDENCE_UNCERTAINTY_CHECK: &str = "Confidence-uncertainty alignment";
pub const MISSING_DOCUMENTATION_CHECK: &str = "Missing documentation impact";
pub const PEER_TO_PEER_CHECK: &str = "Peer-to-peer necessity";

/// Run all four rules in canonical order.
pub fn check_consistency(brief: &Brief) -> Vec<ConsistencyCheckResult> {
    vec![
        recommendation_vs_criteria(brief),
        confidence_vs_uncertainty(brief),
        missing_documentation_impact(brief),
        peer_to_peer_necessity(brief),
    ]
}

pub fn recommendation_vs_criteria(brief: &Brief) -> ConsistencyCheckResult {
    let recommendation = brief.ai_recommendation.recommendation;
    let met = brief.criteria_match.criteria_met.len();
    let not_met = brief.criteria_match.criteria_not_met.len();

    let passed = match recommendation {
        Recommendation::Approve => !(not_met > met && met > 0),
        Recommendation::Deny => !(met > not_met && not_met == 0),
        Recommendation::Pend => true,
    };

    let detail = if passed {
        format!(
            "Recommendation '{}' is consistent with {} criteria met and {} not met",
            recommendation, met, not_met
        )
    } else {
        format!(
            "Recommendation '{}' conflicts with criteria balance: {} met, {} not met",
            recommendation, met, not_met
        )
    };

    ConsistencyCheckResult {
        check: RECOMMENDATION_CRITERIA_CHECK.to_string(),
        passed,
        detail,
    }
}

pub fn confidence_vs_uncertainty(brief: &Brief) -> ConsistencyCheckResult {
    let confidence = brief.ai_recommendation.confidence;
    let unable = brief.criteria_match.criteria_unable_to_assess.len();
    let passed = !(confidence == Confidence::High && unable >= 3);

    let detail = if passed {
        format!(
            "Confidence '{}' with {} criteria unable to assess",
            confidence, unable
        )
    } else {
        format!(
            "Confidence is 'high' but {} criteria could not be assessed",
            unable
        )
    };

    ConsistencyCheckResult {
        check: CONFIDENCE_UNCERTAINTY_CHECK.to_string(),
        passed,
        detail,
    }
}

pub fn missing_documentation_impact(brief: &Brief) -> ConsistencyCheckResult {
    let missing = brief.documentation_review.missing_documentation.len();
    let requested = brief.reviewer_action.additional_info_needed.len();
    let recommendation = brief.ai_recommendation.recommendation;
    let passed = !(missing >= 3 && recommendation == Recommendation::Approve && requested == 0);

    let detail = if passed {
        format!(
            "{} missing documents, {} additional information requests, recommendation '{}'",
            missing, requested, recommendation
        )
    } else {
        format!(
            "Recommends approval with {} missing documents and no additional information requested",
            missing
        )
    };

    ConsistencyCheckResult {
        check: MISSING_DOCUMENTATION_CHECK.to_string(),
        passed,
        detail,
    }
}

pub fn peer_to_peer_necessity(brief: &Brief) -> ConsistencyCheckResult {
    let suggested = brief.reviewer_action.peer_to_peer_suggested;
    let recommendation = brief.ai_recommendation.recommendation;
    let confidence = brief.ai_recommendation.confidence;
    let passed = !(suggested
        && recommendation == Recommendation::Approve
        && confidence == Confidence::High);

    let detail = if passed {
        format!(
            "Peer-to-peer suggested: {}; recommendation '{}' with '{}' confidence",
            suggested, recommendation, confidence
        )
    } else {
        "Peer-to-peer suggested for a high-confidence approval".to_string()
    };

    ConsistencyCheckResult {
        check: PEER_TO_PEER_CHECK.to_string(),
        passed,
        detail,
    }
}
