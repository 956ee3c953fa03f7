//! Deterministic claim verification for AI-generated clinical review briefs.
//!
//! A [`FactChecker`] checks every factual claim in a [`Brief`] against static
//! reference data and the original [`CaseRecord`], then scores the brief.
//! No model calls, no I/O.

pub mod codes;
pub mod config;
pub mod consistency;
pub mod engine;
pub mod error;
pub mod fuzzy;
pub mod ipc;
pub mod models;
pub mod reference;
pub mod resolver;
pub mod score;
pub mod verify;

pub use codes::CodeSystem;
pub use config::ClaimCheckConfig;
pub use engine::FactChecker;
pub use error::ClaimCheckError;
pub use models::{
    Brief, CaseRecord, ClaimStatus, ClaimSummary, ClaimVerdict, ConsistencyCheckResult,
    FactCheckResult, OverallStatus, SectionResult,
};
pub use reference::{
    CriteriaCatalog, CriteriaRepository, GuidelineCatalog, GuidelineRepository,
};
pub use resolver::GuidelineResolution;
