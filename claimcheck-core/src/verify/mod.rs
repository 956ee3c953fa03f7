//! Section verifiers. Each is a pure function of the brief, the case and the
//! reference repositories; none depends on another's output.

pub mod codes;
pub mod criteria;
pub mod documentation;
pub mod recommendation;

use crate::models::{Brief, CaseRecord};
use crate::reference::{CriteriaRepository, GuidelineRepository};

pub use codes::verify_codes;
pub use criteria::verify_criteria;
pub use documentation::verify_documentation;
pub use recommendation::verify_recommendation;

pub const CRITERIA_SECTION: &str = "Criteria Match";
pub const CODES_SECTION: &str = "Procedure & Diagnosis Codes";
pub const DOCUMENTATION_SECTION: &str = "Documentation";
pub const RECOMMENDATION_SECTION: &str = "Recommendation";

/// Canonical section order of a fact-check result.
pub const SECTION_ORDER: [&str; 4] = [
    CRITERIA_SECTION,
    CODES_SECTION,
    DOCUMENTATION_SECTION,
    RECOMMENDATION_SECTION,
];

/// Borrowed inputs shared by all verifiers for one invocation.
#[derive(Clone, Copy)]
pub struct VerifyContext<'a> {
    pub brief: &'a Brief,
    pub case: &'a CaseRecord,
    pub guidelines: &'a dyn GuidelineRepository,
    pub criteria: &'a dyn CriteriaRepository,
}

/// Non-blank, trimmed entries of a claim list.
pub(crate) fn claimed(items: &[String]) -> impl Iterator<Item = &str> {
    items.iter().map(|s| s.trim()).filter(|s| !s.is_empty())
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::reference::{
        CriteriaCatalog, CriteriaEntry, GuidelineCatalog, GuidelineCategory, GuidelineEntry,
    };

    /// Two-guideline catalog: InterQual first, then a specialty society.
    pub fn guidelines() -> GuidelineCatalog {
        GuidelineCatalog::from_entries(vec![
            GuidelineEntry {
                canonical_name: "InterQual".to_string(),
                aliases: vec!["interqual".to_string()],
                organization: "Change Healthcare".to_string(),
                category: GuidelineCategory::CriteriaSet,
            },
            GuidelineEntry {
                canonical_name: "ACR Appropriateness Criteria".to_string(),
                aliases: vec!["acr appropriateness".to_string()],
                organization: "American College of Radiology".to_string(),
                category: GuidelineCategory::SpecialtySociety,
            },
        ])
        .expect("fixture guidelines")
    }

    /// One procedure (72148) with three typical criteria.
    pub fn criteria() -> CriteriaCatalog {
        CriteriaCatalog::from_entries(vec![CriteriaEntry {
            code: "72148".to_string(),
            name: "MRI lumbar spine without contrast".to_string(),
            category: "Advanced Imaging".to_string(),
            typical_criteria: vec![
                "Low back pain for at least 6 weeks".to_string(),
                "Failed conservative therapy including physical therapy".to_string(),
                "Radiculopathy with neurological deficit".to_string(),
            ],
            common_denial_reasons: vec![],
            guideline_references: vec![],
        }])
        .expect("fixture criteria")
    }
}
