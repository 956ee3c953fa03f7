use serde::{Deserialize, Serialize};

/// The originally submitted request, used as ground truth when cross-checking a brief.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseRecord {
    pub id: Option<String>,
    pub procedure_codes: Vec<String>,
    pub diagnosis_codes: Vec<String>,
    pub patient_age: Option<u32>,
    pub payer: Option<String>,
    pub state: Option<String>,
    pub clinical_notes: Option<String>,
}
