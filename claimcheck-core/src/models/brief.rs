//! Typed clinical brief produced by the upstream generation step.
//!
//! Every field defaults so a partially populated brief still deserializes;
//! the verifiers treat empty strings and empty lists as "nothing claimed".

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Brief {
    pub clinical_question: ClinicalQuestion,
    pub patient_summary: PatientSummary,
    pub diagnosis_analysis: DiagnosisAnalysis,
    pub procedure_analysis: ProcedureAnalysis,
    pub criteria_match: CriteriaMatch,
    pub documentation_review: DocumentationReview,
    pub ai_recommendation: AiRecommendation,
    pub reviewer_action: ReviewerAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClinicalQuestion {
    pub question: String,
    pub service_requested: String,
    pub urgency: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientSummary {
    pub demographics: String,
    pub relevant_history: Vec<String>,
    pub current_treatments: Vec<String>,
    pub prior_treatments: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisAnalysis {
    /// "Code + description", e.g. `M17.11 Unilateral primary osteoarthritis, right knee`.
    pub primary_diagnosis: String,
    pub secondary_diagnoses: Vec<String>,
    pub diagnosis_procedure_alignment: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcedureAnalysis {
    /// Each entry is "code + description", e.g. `72148 MRI lumbar spine without contrast`.
    pub codes: Vec<String>,
    pub description: String,
    pub medical_necessity_summary: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CriteriaMatch {
    /// Free text; may list several sources separated by `/`, `,` or `;`.
    pub guideline_source: String,
    pub applicable_guideline: String,
    pub criteria_met: Vec<String>,
    pub criteria_not_met: Vec<String>,
    pub criteria_unable_to_assess: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationQuality {
    Complete,
    #[default]
    Adequate,
    Incomplete,
    Insufficient,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationReview {
    pub documents_provided: Vec<String>,
    pub missing_documentation: Vec<String>,
    pub documentation_quality: DocumentationQuality,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    Approve,
    Deny,
    #[default]
    #[serde(alias = "pend_for_info", alias = "request_info", alias = "more_info_needed")]
    Pend,
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Recommendation::Approve => "approve",
            Recommendation::Deny => "deny",
            Recommendation::Pend => "pend",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Confidence::High => "high",
            Confidence::Medium => "medium",
            Confidence::Low => "low",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AiRecommendation {
    pub recommendation: Recommendation,
    pub confidence: Confidence,
    pub rationale: String,
    pub key_considerations: Vec<String>,
    pub state_specific_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewerAction {
    pub suggested_action: String,
    pub additional_info_needed: Vec<String>,
    pub peer_to_peer_suggested: bool,
    pub time_sensitivity: String,
}
