//! Fact-check engine: runs the four section verifiers and the consistency
//! rules over one brief, then aggregates a trust score.
//!
//! Pure and synchronous. The only shared state is the read-only reference
//! data behind `Arc`, so one `FactChecker` can serve concurrent requests.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::consistency::check_consistency;
use crate::models::{Brief, CaseRecord, ClaimSummary, FactCheckResult};
use crate::reference::{CriteriaCatalog, CriteriaRepository, GuidelineCatalog, GuidelineRepository};
use crate::score::{classify, compute_score};
use crate::verify::{
    verify_codes, verify_criteria, verify_documentation, verify_recommendation, VerifyContext,
};

#[derive(Clone)]
pub struct FactChecker {
    guidelines: Arc<dyn GuidelineRepository>,
    criteria: Arc<dyn CriteriaRepository>,
}

impl FactChecker {
    pub fn new(
        guidelines: Arc<dyn GuidelineRepository>,
        criteria: Arc<dyn CriteriaRepository>,
    ) -> Self {
        Self {
            guidelines,
            criteria,
        }
    }

    /// Engine backed by the compiled-in catalogs.
    pub fn builtin() -> Self {
        Self::new(GuidelineCatalog::shared(), CriteriaCatalog::shared())
    }

    pub fn guidelines(&self) -> &dyn GuidelineRepository {
        self.guidelines.as_ref()
    }

    /// Verify a brief against its case, stamped with the current time.
    pub fn check(&self, brief: &Brief, case: &CaseRecord) -> FactCheckResult {
        self.check_at(brief, case, Utc::now())
    }

    pub fn check_at(
        &self,
        brief: &Brief,
        case: &CaseRecord,
        checked_at: DateTime<Utc>,
    ) -> FactCheckResult {
        let ctx = VerifyContext {
            brief,
            case,
            guidelines: self.guidelines.as_ref(),
            criteria: self.criteria.as_ref(),
        };

        let sections = vec![
            verify_criteria(&ctx),
            verify_codes(&ctx),
            verify_documentation(&ctx),
            verify_recommendation(&ctx),
        ];
        let consistency_checks = check_consistency(brief);

        let summary = ClaimSummary::from_sections(&sections);
        let section_flags: usize = sections.iter().map(|s| s.flags.len()).sum();
        let failed_checks = consistency_checks.iter().filter(|c| !c.passed).count();

        let overall_score = compute_score(&summary, section_flags, failed_checks);
        let overall_status = classify(overall_score, summary.flagged, failed_checks);

        tracing::info!(
            "Fact check complete: score {} ({}), {} verified / {} unverified / {} flagged, {} section flags, {} failed checks",
            overall_score,
            overall_status,
            summary.verified,
            summary.unverified,
            summary.flagged,
            section_flags,
            failed_checks
        );

        FactCheckResult {
            overall_score,
            overall_status,
            sections,
            summary,
            consistency_checks,
            checked_at,
        }
    }
}

impl Default for FactChecker {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consistency::{CONFIDENCE_UNCERTAINTY_CHECK, RECOMMENDATION_CRITERIA_CHECK};
    use crate::models::{ClaimStatus, Confidence, OverallStatus, Recommendation};
    use crate::verify::{fixtures, CRITERIA_SECTION, SECTION_ORDER};

    fn synthetic_checker() -> FactChecker {
        FactChecker::new(Arc::new(fixtures::guidelines()), Arc::new(fixtures::criteria()))
    }

    fn lumbar_case() -> CaseRecord {
        CaseRecord {
            id: Some("case-001".to_string()),
            procedure_codes: vec!["72148".to_string()],
            diagnosis_codes: vec!["M54.16".to_string()],
            ..Default::default()
        }
    }

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn assert_invariants(result: &FactCheckResult) {
        let names: Vec<_> = result.sections.iter().map(|s| s.section.as_str()).collect();
        assert_eq!(names, SECTION_ORDER.to_vec());
        assert_eq!(result.consistency_checks.len(), 4);
        let total: usize = result.sections.iter().map(|s| s.claims.len()).sum();
        assert_eq!(result.summary.total(), total);
        assert!(result.overall_score <= 100);
        if result.overall_status == OverallStatus::Pass {
            assert!(result.overall_score >= 80);
            assert_eq!(result.summary.flagged, 0);
            assert_eq!(result.failed_checks().count(), 0);
        }
    }

    // ========================================================================
    // TEST 1: empty brief scores 100 and passes
    // ========================================================================
    #[test]
    fn test_empty_brief_scores_100() {
        let result = synthetic_checker().check(&Brief::default(), &CaseRecord::default());
        assert_invariants(&result);
        assert_eq!(result.summary.total(), 0);
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.overall_status, OverallStatus::Pass);
    }

    // ========================================================================
    // TEST 2 (scenario A): exact typical criterion is verified
    // ========================================================================
    #[test]
    fn test_exact_criterion_verified() {
        let mut brief = Brief::default();
        brief.criteria_match.criteria_met = strings(&["Low back pain for at least 6 weeks"]);

        let result = synthetic_checker().check(&brief, &lumbar_case());
        assert_invariants(&result);
        let section = result.section(CRITERIA_SECTION).unwrap();
        assert_eq!(section.claims[0].status, ClaimStatus::Verified);
    }

    // ========================================================================
    // TEST 3 (scenario B): proprietary guideline is flagged with a section flag
    // ========================================================================
    #[test]
    fn test_unrecognized_guideline_flagged() {
        let mut brief = Brief::default();
        brief.criteria_match.guideline_source = "ACME Proprietary Guideline 9.0".to_string();

        for checker in [synthetic_checker(), FactChecker::builtin()] {
            let result = checker.check(&brief, &lumbar_case());
            assert_invariants(&result);
            let section = result.section(CRITERIA_SECTION).unwrap();
            assert_eq!(section.claims[0].status, ClaimStatus::Flagged);
            assert!(section.flags.iter().any(|f| f.contains("ACME Proprietary Guideline 9.0")));
            // 1 flagged claim: -50, one section flag: -5, clamped at 0
            assert_eq!(result.overall_score, 0);
            assert_eq!(result.overall_status, OverallStatus::Fail);
        }
    }

    // ========================================================================
    // TEST 4 (scenario C): approve with 1 met / 3 not met fails alignment
    // ========================================================================
    #[test]
    fn test_recommendation_criteria_misalignment() {
        let mut brief = Brief::default();
        brief.ai_recommendation.recommendation = Recommendation::Approve;
        brief.criteria_match.criteria_met = strings(&["Low back pain for at least 6 weeks"]);
        brief.criteria_match.criteria_not_met = strings(&[
            "Failed conservative therapy including physical therapy",
            "Radiculopathy with neurological deficit",
            "Progressive weakness",
        ]);

        let result = synthetic_checker().check(&brief, &lumbar_case());
        assert_invariants(&result);
        let check = result
            .consistency_checks
            .iter()
            .find(|c| c.check == RECOMMENDATION_CRITERIA_CHECK)
            .unwrap();
        assert!(!check.passed);
    }

    // ========================================================================
    // TEST 5 (scenario D): high confidence with 3 unassessable criteria
    // ========================================================================
    #[test]
    fn test_confidence_uncertainty_misalignment() {
        let mut brief = Brief::default();
        brief.ai_recommendation.confidence = Confidence::High;
        brief.criteria_match.criteria_unable_to_assess = strings(&["a", "b", "c"]);

        let result = synthetic_checker().check(&brief, &lumbar_case());
        assert_invariants(&result);
        let check = result
            .consistency_checks
            .iter()
            .find(|c| c.check == CONFIDENCE_UNCERTAINTY_CHECK)
            .unwrap();
        assert!(!check.passed);
        // No claims at all, so the score stays at 100 but the status cannot pass.
        assert_eq!(result.overall_score, 100);
        assert_eq!(result.overall_status, OverallStatus::Warning);
    }

    // ========================================================================
    // TEST 6: realistic brief against built-in catalogs
    // ========================================================================
    #[test]
    fn test_builtin_catalogs_full_brief() {
        let mut brief = Brief::default();
        brief.criteria_match.guideline_source = "InterQual 2026, ACR Appropriateness Criteria".to_string();
        brief.criteria_match.applicable_guideline = "CMS NCD 240.4".to_string();
        brief.criteria_match.criteria_met = strings(&[
            "Apnea-hypopnea index (AHI) of 15 or more events per hour",
            "Face-to-face clinical evaluation before the sleep test",
        ]);
        brief.procedure_analysis.codes = strings(&["E0601 CPAP device"]);
        brief.diagnosis_analysis.primary_diagnosis = "G47.33 Obstructive sleep apnea".to_string();
        brief.ai_recommendation.recommendation = Recommendation::Approve;
        brief.ai_recommendation.confidence = Confidence::High;

        let case = CaseRecord {
            procedure_codes: strings(&["E0601"]),
            diagnosis_codes: strings(&["G47.33"]),
            ..Default::default()
        };

        let result = FactChecker::builtin().check(&brief, &case);
        assert_invariants(&result);
        assert_eq!(result.summary.flagged, 0);
        // CMS NCD 240.4 is regulatory-format only, so one unverified claim.
        assert_eq!(result.summary.unverified, 1);
        assert_eq!(result.summary.verified, 6);
        // round(6/7 * 100) = 86
        assert_eq!(result.overall_score, 86);
        assert_eq!(result.overall_status, OverallStatus::Pass);
    }

    // ========================================================================
    // TEST 7: check_at is deterministic for identical inputs
    // ========================================================================
    #[test]
    fn test_deterministic_output() {
        let mut brief = Brief::default();
        brief.criteria_match.guideline_source = "InterQual / Unknown Society Handbook".to_string();
        brief.procedure_analysis.codes = strings(&["72148", "BAD"]);
        brief.documentation_review.missing_documentation = strings(&["PT notes"]);

        let at = Utc::now();
        let checker = synthetic_checker();
        let a = checker.check_at(&brief, &lumbar_case(), at);
        let b = checker.check_at(&brief, &lumbar_case(), at);
        assert_eq!(
            serde_json::to_value(&a).unwrap(),
            serde_json::to_value(&b).unwrap()
        );
        assert_invariants(&a);
    }

    // ========================================================================
    // TEST 8: concurrent invocations share the checker without locks
    // ========================================================================
    #[test]
    fn test_concurrent_checks() {
        let checker = FactChecker::builtin();
        let mut brief = Brief::default();
        brief.criteria_match.criteria_met = strings(&["Radiculopathy with objective neurological deficit"]);
        let case = CaseRecord {
            procedure_codes: strings(&["72148"]),
            ..Default::default()
        };

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let checker = checker.clone();
                let brief = brief.clone();
                let case = case.clone();
                std::thread::spawn(move || checker.check(&brief, &case).overall_score)
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 100);
        }
    }

    // ========================================================================
    // TEST 9: builtin checkers share the process-wide catalogs
    // ========================================================================
    #[test]
    fn test_builtin_shares_static_catalogs() {
        fn addr<T: ?Sized>(r: &T) -> *const () {
            r as *const T as *const ()
        }

        let a = FactChecker::builtin();
        let b = FactChecker::default();
        assert_eq!(addr(a.guidelines()), addr(GuidelineCatalog::builtin()));
        assert_eq!(addr(b.guidelines()), addr(GuidelineCatalog::builtin()));
        assert_eq!(addr(a.criteria.as_ref()), addr(CriteriaCatalog::builtin()));
    }
}
