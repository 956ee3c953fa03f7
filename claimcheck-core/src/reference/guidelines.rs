use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::GuidelineRepository;
use crate::error::ClaimCheckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidelineCategory {
    CriteriaSet,
    SpecialtySociety,
    Government,
    EvidenceReview,
}

impl GuidelineCategory {
    pub fn label(&self) -> &'static str {
        match self {
            GuidelineCategory::CriteriaSet => "criteria set",
            GuidelineCategory::SpecialtySociety => "specialty society guideline",
            GuidelineCategory::Government => "government guidance",
            GuidelineCategory::EvidenceReview => "evidence review",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuidelineEntry {
    pub canonical_name: String,
    /// Lower-case match terms.
    pub aliases: Vec<String>,
    pub organization: String,
    pub category: GuidelineCategory,
}

impl GuidelineEntry {
    /// True when the lower-cased citation contains the canonical name or any alias.
    pub fn is_cited_by(&self, citation_lower: &str) -> bool {
        citation_lower.contains(&self.canonical_name.to_lowercase())
            || self
                .aliases
                .iter()
                .any(|alias| citation_lower.contains(alias.as_str()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct GuidelineCatalog {
    entries: Vec<GuidelineEntry>,
}

impl GuidelineCatalog {
    /// The compiled-in production catalog, built once per process.
    pub fn builtin() -> &'static GuidelineCatalog {
        &**BUILTIN
    }

    /// Shared handle to the compiled-in catalog; cloning only bumps the refcount.
    pub fn shared() -> Arc<GuidelineCatalog> {
        Arc::clone(&BUILTIN)
    }

    /// Build a catalog from entries, keeping their order. Aliases are lower-cased.
    pub fn from_entries(entries: Vec<GuidelineEntry>) -> Result<Self, ClaimCheckError> {
        let mut normalized = Vec::with_capacity(entries.len());
        for mut entry in entries {
            if entry.canonical_name.trim().is_empty() {
                return Err(ClaimCheckError::Catalog(
                    "guideline entry with empty canonical_name".to_string(),
                ));
            }
            entry.aliases = entry
                .aliases
                .into_iter()
                .map(|a| a.trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect();
            normalized.push(entry);
        }
        Ok(Self { entries: normalized })
    }

    /// Load a JSON array of entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClaimCheckError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<GuidelineEntry> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GuidelineRepository for GuidelineCatalog {
    fn entries(&self) -> &[GuidelineEntry] {
        &self.entries
    }
}

// ============================================================================
// Built-in data
// ============================================================================

// Order is significant: overlapping aliases resolve to the earliest entry.
const SEED: &[(&str, &[&str], &str, GuidelineCategory)] = &[
    (
        "InterQual",
        &["interqual", "change healthcare interqual", "iq criteria"],
        "Change Healthcare",
        GuidelineCategory::CriteriaSet,
    ),
    (
        "MCG Care Guidelines",
        &["mcg", "milliman", "milliman care guidelines"],
        "MCG Health",
        GuidelineCategory::CriteriaSet,
    ),
    (
        "eviCore Clinical Guidelines",
        &["evicore"],
        "eviCore healthcare",
        GuidelineCategory::CriteriaSet,
    ),
    (
        "Carelon Clinical Appropriateness Guidelines",
        &["carelon", "aim specialty health", "aim guidelines"],
        "Carelon Medical Benefits Management",
        GuidelineCategory::CriteriaSet,
    ),
    (
        "ASAM Criteria",
        &["asam", "american society of addiction medicine"],
        "American Society of Addiction Medicine",
        GuidelineCategory::CriteriaSet,
    ),
    (
        "ACR Appropriateness Criteria",
        &["acr appropriateness", "american college of radiology", "acr ac"],
        "American College of Radiology",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "AASM Clinical Practice Guidelines",
        &["aasm", "american academy of sleep medicine"],
        "American Academy of Sleep Medicine",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "AAOS Clinical Practice Guidelines",
        &[
            "aaos",
            "american academy of orthopaedic surgeons",
            "american academy of orthopedic surgeons",
        ],
        "American Academy of Orthopaedic Surgeons",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "NASS Coverage Policy Recommendations",
        &["nass", "north american spine society"],
        "North American Spine Society",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "NCCN Clinical Practice Guidelines in Oncology",
        &["nccn", "national comprehensive cancer network"],
        "National Comprehensive Cancer Network",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "ACC/AHA Clinical Practice Guidelines",
        &["acc/aha", "american college of cardiology", "american heart association"],
        "American College of Cardiology / American Heart Association",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "ASMBS Guidelines",
        &["asmbs", "american society for metabolic and bariatric surgery"],
        "American Society for Metabolic and Bariatric Surgery",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "ACOG Practice Bulletins",
        &["acog", "american college of obstetricians and gynecologists"],
        "American College of Obstetricians and Gynecologists",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "ADA Standards of Care in Diabetes",
        &["american diabetes association", "ada standards", "standards of medical care in diabetes"],
        "American Diabetes Association",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "AAN Practice Guidelines",
        &["american academy of neurology", "aan guideline"],
        "American Academy of Neurology",
        GuidelineCategory::SpecialtySociety,
    ),
    (
        "Medicare Benefit Policy Manual",
        &["benefit policy manual", "mbpm"],
        "Centers for Medicare & Medicaid Services",
        GuidelineCategory::Government,
    ),
    (
        "Medicare Coverage Database",
        &["medicare coverage database", "cms mcd"],
        "Centers for Medicare & Medicaid Services",
        GuidelineCategory::Government,
    ),
    (
        "USPSTF Recommendations",
        &["uspstf", "preventive services task force"],
        "U.S. Preventive Services Task Force",
        GuidelineCategory::Government,
    ),
    (
        "NICE Guidelines",
        &["nice guideline", "national institute for health and care excellence"],
        "National Institute for Health and Care Excellence",
        GuidelineCategory::Government,
    ),
    (
        "AHRQ Evidence Reports",
        &["ahrq", "agency for healthcare research and quality"],
        "Agency for Healthcare Research and Quality",
        GuidelineCategory::EvidenceReview,
    ),
    (
        "Hayes Technology Assessments",
        &["hayes health technology", "hayes technology", "hayes inc"],
        "Hayes, a symplr company",
        GuidelineCategory::EvidenceReview,
    ),
    (
        "ECRI Clinical Evidence Assessments",
        &["ecri"],
        "ECRI",
        GuidelineCategory::EvidenceReview,
    ),
];

static BUILTIN: Lazy<Arc<GuidelineCatalog>> = Lazy::new(|| {
    Arc::new(GuidelineCatalog {
        entries: SEED
            .iter()
            .map(|(name, aliases, org, category)| GuidelineEntry {
                canonical_name: (*name).to_string(),
                aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
                organization: (*org).to_string(),
                category: *category,
            })
            .collect(),
    })
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_aliases_are_lowercase() {
        for entry in GuidelineCatalog::builtin().entries() {
            for alias in &entry.aliases {
                assert_eq!(alias, &alias.to_lowercase(), "{} alias not lowercase", entry.canonical_name);
            }
        }
    }

    #[test]
    fn test_builtin_order_starts_with_interqual() {
        let first = &GuidelineCatalog::builtin().entries()[0];
        assert_eq!(first.canonical_name, "InterQual");
        assert_eq!(first.category, GuidelineCategory::CriteriaSet);
    }

    #[test]
    fn test_is_cited_by_canonical_name_or_alias() {
        let entry = &GuidelineCatalog::builtin().entries()[1];
        assert!(entry.is_cited_by("mcg care guidelines, 27th edition"));
        assert!(entry.is_cited_by("per milliman criteria"));
        assert!(!entry.is_cited_by("interqual 2026"));
    }

    #[test]
    fn test_from_entries_lowercases_and_rejects_empty_name() {
        let catalog = GuidelineCatalog::from_entries(vec![GuidelineEntry {
            canonical_name: "Acme Criteria".to_string(),
            aliases: vec!["  ACME  ".to_string(), "".to_string()],
            organization: "Acme".to_string(),
            category: GuidelineCategory::CriteriaSet,
        }])
        .unwrap();
        assert_eq!(catalog.entries()[0].aliases, vec!["acme".to_string()]);

        let err = GuidelineCatalog::from_entries(vec![GuidelineEntry {
            canonical_name: " ".to_string(),
            aliases: vec![],
            organization: "Nobody".to_string(),
            category: GuidelineCategory::Government,
        }]);
        assert!(matches!(err, Err(ClaimCheckError::Catalog(_))));
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"canonical_name":"Plan Criteria","aliases":["PLAN CRIT"],"organization":"Plan","category":"criteria_set"}}]"#
        )
        .unwrap();

        let catalog = GuidelineCatalog::from_json_file(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.entries()[0].aliases[0], "plan crit");
    }
}
