pub mod brief;
pub mod case;
pub mod result;

pub use brief::{
    AiRecommendation, Brief, ClinicalQuestion, Confidence, CriteriaMatch, DiagnosisAnalysis,
    DocumentationQuality, DocumentationReview, PatientSummary, ProcedureAnalysis,
    Recommendation, ReviewerAction,
};
pub use case::CaseRecord;
pub use result::{
    ClaimStatus, ClaimSummary, ClaimVerdict, ConsistencyCheckResult, FactCheckResult,
    OverallStatus, SectionResult,
};
