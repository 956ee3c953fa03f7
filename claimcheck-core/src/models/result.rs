//! Engine output types. Field names are the wire format consumed by the review UI.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Verified,
    Unverified,
    Flagged,
}

/// Verdict for a single claim made by the brief.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    pub claim: String,
    pub status: ClaimStatus,
    pub source: Option<String>,
    pub explanation: String,
}

impl ClaimVerdict {
    pub fn verified(
        claim: impl Into<String>,
        source: Option<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            claim: claim.into(),
            status: ClaimStatus::Verified,
            source,
            explanation: explanation.into(),
        }
    }

    pub fn unverified(claim: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            status: ClaimStatus::Unverified,
            source: None,
            explanation: explanation.into(),
        }
    }

    pub fn flagged(claim: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            claim: claim.into(),
            status: ClaimStatus::Flagged,
            source: None,
            explanation: explanation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionResult {
    pub section: String,
    pub claims: Vec<ClaimVerdict>,
    /// Section-level warnings not tied to one claim. Each costs score points.
    pub flags: Vec<String>,
}

impl SectionResult {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            claims: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn count(&self, status: ClaimStatus) -> usize {
        self.claims.iter().filter(|c| c.status == status).count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsistencyCheckResult {
    pub check: String,
    pub passed: bool,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub verified: usize,
    pub unverified: usize,
    pub flagged: usize,
}

impl ClaimSummary {
    pub fn from_sections(sections: &[SectionResult]) -> Self {
        sections.iter().fold(Self::default(), |acc, s| Self {
            verified: acc.verified + s.count(ClaimStatus::Verified),
            unverified: acc.unverified + s.count(ClaimStatus::Unverified),
            flagged: acc.flagged + s.count(ClaimStatus::Flagged),
        })
    }

    pub fn total(&self) -> usize {
        self.verified + self.unverified + self.flagged
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Pass,
    Warning,
    Fail,
}

impl std::fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OverallStatus::Pass => "pass",
            OverallStatus::Warning => "warning",
            OverallStatus::Fail => "fail",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub overall_score: u8,
    pub overall_status: OverallStatus,
    pub sections: Vec<SectionResult>,
    pub summary: ClaimSummary,
    pub consistency_checks: Vec<ConsistencyCheckResult>,
    pub checked_at: DateTime<Utc>,
}

impl FactCheckResult {
    pub fn section(&self, label: &str) -> Option<&SectionResult> {
        self.sections.iter().find(|s| s.section == label)
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &ConsistencyCheckResult> {
        self.consistency_checks.iter().filter(|c| !c.passed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_across_sections() {
        let mut a = SectionResult::new("A");
        a.claims.push(ClaimVerdict::verified("x", None, "ok"));
        a.claims.push(ClaimVerdict::flagged("y", "bad"));
        let mut b = SectionResult::new("B");
        b.claims.push(ClaimVerdict::unverified("z", "unknown"));
        b.claims.push(ClaimVerdict::verified("w", Some("src".into()), "ok"));

        let summary = ClaimSummary::from_sections(&[a, b]);
        assert_eq!(summary.verified, 2);
        assert_eq!(summary.unverified, 1);
        assert_eq!(summary.flagged, 1);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn test_status_serializes_snake_case() {
        let v = ClaimVerdict::unverified("claim", "why");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["status"], "unverified");
        assert!(json["source"].is_null());
        assert_eq!(serde_json::to_value(OverallStatus::Warning).unwrap(), "warning");
    }
}
