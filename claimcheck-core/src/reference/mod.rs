//! Read-only reference data consulted by the verifiers.
//!
//! The engine only sees these traits, so tests can inject small synthetic
//! catalogs while production uses the compiled-in data.

pub mod criteria;
pub mod guidelines;

pub use criteria::{CriteriaCatalog, CriteriaEntry};
pub use guidelines::{GuidelineCatalog, GuidelineCategory, GuidelineEntry};

/// Source of recognised clinical guideline publications.
pub trait GuidelineRepository: Send + Sync {
    /// Entries in authored order. Resolution is first-hit, so order is significant.
    fn entries(&self) -> &[GuidelineEntry];
}

/// Per-code coverage criteria, keyed by procedure/service code.
pub trait CriteriaRepository: Send + Sync {
    fn lookup(&self, code: &str) -> Option<&CriteriaEntry>;
}
