use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::CriteriaRepository;
use crate::error::ClaimCheckError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaEntry {
    pub code: String,
    pub name: String,
    pub category: String,
    pub typical_criteria: Vec<String>,
    #[serde(default)]
    pub common_denial_reasons: Vec<String>,
    #[serde(default)]
    pub guideline_references: Vec<String>,
}

/// Criteria keyed by upper-cased procedure/service code.
#[derive(Debug, Clone, Default)]
pub struct CriteriaCatalog {
    by_code: HashMap<String, CriteriaEntry>,
}

impl CriteriaCatalog {
    /// The compiled-in production catalog, built once per process.
    pub fn builtin() -> &'static CriteriaCatalog {
        &**BUILTIN
    }

    /// Shared handle to the compiled-in catalog; cloning only bumps the refcount.
    pub fn shared() -> Arc<CriteriaCatalog> {
        Arc::clone(&BUILTIN)
    }

    pub fn from_entries(entries: Vec<CriteriaEntry>) -> Result<Self, ClaimCheckError> {
        let mut by_code = HashMap::with_capacity(entries.len());
        for mut entry in entries {
            let key = entry.code.trim().to_uppercase();
            if key.is_empty() {
                return Err(ClaimCheckError::Catalog(format!(
                    "criteria entry '{}' has an empty code",
                    entry.name
                )));
            }
            if by_code.contains_key(&key) {
                return Err(ClaimCheckError::Catalog(format!(
                    "duplicate criteria entry for code {}",
                    key
                )));
            }
            entry.code = key.clone();
            by_code.insert(key, entry);
        }
        Ok(Self { by_code })
    }

    /// Load a JSON array of entries.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ClaimCheckError> {
        let raw = std::fs::read_to_string(path)?;
        let entries: Vec<CriteriaEntry> = serde_json::from_str(&raw)?;
        Self::from_entries(entries)
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl CriteriaRepository for CriteriaCatalog {
    fn lookup(&self, code: &str) -> Option<&CriteriaEntry> {
        self.by_code.get(&code.trim().to_uppercase())
    }
}

// ============================================================================
// Built-in data
// ============================================================================

struct Seed {
    code: &'static str,
    name: &'static str,
    category: &'static str,
    typical_criteria: &'static [&'static str],
    common_denial_reasons: &'static [&'static str],
    guideline_references: &'static [&'static str],
}

const SEED: &[Seed] = &[
    Seed {
        code: "72148",
        name: "MRI lumbar spine without contrast",
        category: "Advanced Imaging",
        typical_criteria: &[
            "Low back pain persisting for at least 6 weeks despite conservative treatment",
            "Failed conservative therapy including physical therapy and NSAIDs",
            "Radiculopathy with objective neurological deficit",
            "Red flag symptoms such as cauda equina syndrome, suspected malignancy, infection or fracture",
            "Pre-operative planning for a scheduled spinal procedure",
        ],
        common_denial_reasons: &[
            "Insufficient duration of conservative treatment",
            "No documented neurological findings",
            "Imaging requested for uncomplicated acute low back pain",
        ],
        guideline_references: &[
            "ACR Appropriateness Criteria: Low Back Pain",
            "InterQual Imaging Criteria: Spine",
            "NASS Coverage Policy Recommendations",
        ],
    },
    Seed {
        code: "73721",
        name: "MRI lower extremity joint without contrast",
        category: "Advanced Imaging",
        typical_criteria: &[
            "Knee pain persisting for at least 4 weeks despite conservative treatment",
            "Mechanical symptoms such as locking, catching or giving way",
            "Suspected meniscal or ligament tear on physical examination",
            "Non-diagnostic plain radiographs",
        ],
        common_denial_reasons: &[
            "No plain radiographs obtained before MRI",
            "Advanced osteoarthritis already evident on radiographs",
        ],
        guideline_references: &[
            "ACR Appropriateness Criteria: Chronic Knee Pain",
            "MCG Care Guidelines: Knee MRI",
        ],
    },
    Seed {
        code: "70553",
        name: "MRI brain without and with contrast",
        category: "Advanced Imaging",
        typical_criteria: &[
            "New or progressive focal neurological deficit",
            "Headache with red flag features such as papilledema or sudden onset",
            "Suspected intracranial mass, infection or demyelinating disease",
            "New onset seizure in an adult",
        ],
        common_denial_reasons: &[
            "Chronic stable headache without red flag features",
            "Recent equivalent imaging without interval clinical change",
        ],
        guideline_references: &[
            "ACR Appropriateness Criteria: Headache",
            "AAN Practice Guidelines",
        ],
    },
    Seed {
        code: "27447",
        name: "Total knee arthroplasty",
        category: "Orthopedic Surgery",
        typical_criteria: &[
            "Radiographic evidence of advanced osteoarthritis (Kellgren-Lawrence grade 3 or 4)",
            "Persistent pain limiting activities of daily living",
            "Failure of at least 3 months of non-operative management",
            "Body mass index below 40 or documented weight management",
            "No active infection in the joint or elsewhere",
        ],
        common_denial_reasons: &[
            "Non-operative management not documented",
            "Radiographs do not show advanced joint space narrowing",
            "Uncontrolled comorbidities",
        ],
        guideline_references: &[
            "AAOS Clinical Practice Guidelines: Osteoarthritis of the Knee",
            "InterQual Procedures: Knee Arthroplasty",
        ],
    },
    Seed {
        code: "29881",
        name: "Knee arthroscopy with meniscectomy",
        category: "Orthopedic Surgery",
        typical_criteria: &[
            "MRI-confirmed meniscal tear",
            "Mechanical symptoms such as locking, catching or giving way",
            "Failure of at least 6 weeks of conservative treatment",
            "Absence of advanced osteoarthritis",
        ],
        common_denial_reasons: &[
            "Degenerative tear in the setting of advanced osteoarthritis",
            "Pain without mechanical symptoms",
        ],
        guideline_references: &["AAOS Clinical Practice Guidelines: Meniscal Tears"],
    },
    Seed {
        code: "63030",
        name: "Lumbar laminotomy with decompression",
        category: "Spine Surgery",
        typical_criteria: &[
            "Imaging-confirmed nerve root compression correlating with symptoms",
            "Radicular pain persisting for at least 6 weeks",
            "Failed conservative therapy including physical therapy and NSAIDs",
            "Progressive motor weakness or cauda equina syndrome",
        ],
        common_denial_reasons: &[
            "Imaging findings do not correlate with clinical symptoms",
            "Conservative therapy not completed",
        ],
        guideline_references: &[
            "NASS Coverage Policy Recommendations: Lumbar Discectomy",
            "InterQual Procedures: Spine Surgery",
        ],
    },
    Seed {
        code: "95810",
        name: "Attended polysomnography",
        category: "Sleep Medicine",
        typical_criteria: &[
            "Suspected obstructive sleep apnea with excessive daytime sleepiness",
            "Epworth Sleepiness Scale score greater than 10",
            "Home sleep apnea test inconclusive, negative despite high suspicion, or contraindicated",
            "Significant cardiopulmonary or neuromuscular comorbidity",
        ],
        common_denial_reasons: &[
            "Home sleep apnea test not attempted",
            "No documented symptoms of sleep-disordered breathing",
        ],
        guideline_references: &["AASM Clinical Practice Guidelines", "eviCore Sleep Guidelines"],
    },
    Seed {
        code: "E0601",
        name: "Continuous positive airway pressure device",
        category: "Durable Medical Equipment",
        typical_criteria: &[
            "Apnea-hypopnea index (AHI) of 15 or more events per hour",
            "AHI of 5 to 14 events per hour with excessive daytime sleepiness, hypertension, ischemic heart disease or history of stroke",
            "Face-to-face clinical evaluation before the sleep test",
            "Obstructive sleep apnea confirmed by polysomnography or home sleep apnea test",
        ],
        common_denial_reasons: &[
            "AHI below coverage threshold",
            "Sleep test not performed or not interpretable",
            "Missing face-to-face evaluation",
        ],
        guideline_references: &[
            "CMS NCD 240.4 Continuous Positive Airway Pressure Therapy",
            "AASM Clinical Practice Guidelines",
        ],
    },
    Seed {
        code: "78452",
        name: "Myocardial perfusion imaging, multiple studies",
        category: "Cardiac Imaging",
        typical_criteria: &[
            "Intermediate pre-test probability of coronary artery disease",
            "Inability to exercise or uninterpretable resting ECG",
            "New or worsening symptoms in a patient with known coronary artery disease",
        ],
        common_denial_reasons: &[
            "Low pre-test probability in an asymptomatic patient",
            "Repeat testing within 2 years without change in symptoms",
        ],
        guideline_references: &["ACC/AHA Clinical Practice Guidelines", "eviCore Cardiac Imaging Guidelines"],
    },
    Seed {
        code: "43644",
        name: "Laparoscopic gastric bypass",
        category: "Bariatric Surgery",
        typical_criteria: &[
            "Body mass index of 40 or greater, or 35 or greater with obesity-related comorbidity",
            "Completion of a medically supervised weight loss program",
            "Psychological evaluation clearing the patient for surgery",
            "Nutritional evaluation by a registered dietitian",
        ],
        common_denial_reasons: &[
            "Supervised weight loss program not documented",
            "Psychological evaluation missing",
        ],
        guideline_references: &["ASMBS Guidelines", "MCG Care Guidelines: Bariatric Surgery"],
    },
];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

static BUILTIN: Lazy<Arc<CriteriaCatalog>> = Lazy::new(|| {
    Arc::new(CriteriaCatalog {
        by_code: SEED
            .iter()
            .map(|seed| {
                (
                    seed.code.to_string(),
                    CriteriaEntry {
                        code: seed.code.to_string(),
                        name: seed.name.to_string(),
                        category: seed.category.to_string(),
                        typical_criteria: strings(seed.typical_criteria),
                        common_denial_reasons: strings(seed.common_denial_reasons),
                        guideline_references: strings(seed.guideline_references),
                    },
                )
            })
            .collect(),
    })
});
