//! Guideline citation resolution.
//!
//! A citation resolves to the first catalog entry whose canonical name or alias
//! it contains. Failing that, it may still have the shape of a regulatory or
//! evidence citation, which is weaker than a catalog hit but not suspicious.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};

use crate::reference::{GuidelineEntry, GuidelineRepository};

static REGULATORY_FORMATS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // Coverage determination phrasing
        r"(?i)\bcoverage\s+(?:determination|decision)s?\b",
        // NCD 240.4, LCD L33718, LCA #A57059
        r"(?i)\b(?:NCD|LCD|LCA)\s*#?\s*[LA]?[0-9]+(?:\.[0-9]+)*\b",
        // 42 CFR 410.32, 42 C.F.R. § 411.15
        r"(?i)\b[0-9]+\s*C\.?\s?F\.?\s?R\b",
        // state law, federal regulations, state mandate
        r"(?i)\b(?:state|federal)\s+(?:law|regulation|statute|mandate|requirement|rule)s?\b",
        r"(?i)\b(?:insurance|administrative)\s+code\b",
        // Recognised organisation abbreviations, upper-case only
        r"\b(?:CMS|HHS|OIG|AMA|ACR|AASM|AAOS|AAN|ACC|AHA|ADA|ACOG|ASAM|ASMBS|NASS|NCCN|USPSTF|AHRQ|NIH|CDC|FDA|NICE)\b",
        r"(?i)\bcochrane\b",
        r"(?i)\bFDA[\s-]*approv(?:ed|al)\b",
    ])
    .expect("regulatory format patterns")
});

static PLAN_SPECIFIC: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:policy|policies|plan|plans|formulary|benefit|benefits)\b")
        .expect("plan-specific pattern")
});

/// Outcome of resolving a single citation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuidelineResolution<'a> {
    Catalog(&'a GuidelineEntry),
    RegulatoryFormat,
    Unrecognized,
}

/// Resolve a free-text citation against the catalog, then the format heuristic.
pub fn resolve_guideline<'a>(
    repo: &'a dyn GuidelineRepository,
    citation: &str,
) -> GuidelineResolution<'a> {
    if let Some(entry) = lookup_catalog(repo, citation) {
        return GuidelineResolution::Catalog(entry);
    }
    if matches_regulatory_format(citation) {
        return GuidelineResolution::RegulatoryFormat;
    }
    GuidelineResolution::Unrecognized
}

/// First catalog entry cited by the text (case-insensitive substring match).
pub fn lookup_catalog<'a>(
    repo: &'a dyn GuidelineRepository,
    citation: &str,
) -> Option<&'a GuidelineEntry> {
    let lower = citation.to_lowercase();
    repo.entries().iter().find(|entry| entry.is_cited_by(&lower))
}

/// True if the text has the shape of a coverage determination, regulation,
/// recognised organisation or evidence citation.
pub fn matches_regulatory_format(text: &str) -> bool {
    REGULATORY_FORMATS.is_match(text)
}

/// True for payer policy, plan, formulary or benefit references, which cannot
/// be checked against public sources.
pub fn is_plan_specific(text: &str) -> bool {
    PLAN_SPECIFIC.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::{GuidelineCatalog, GuidelineCategory};

    fn entry(name: &str, aliases: &[&str]) -> GuidelineEntry {
        GuidelineEntry {
            canonical_name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            organization: format!("{} Org", name),
            category: GuidelineCategory::CriteriaSet,
        }
    }

    #[test]
    fn test_interqual_resolves_to_catalog_entry() {
        let catalog = GuidelineCatalog::builtin();
        for _ in 0..3 {
            match resolve_guideline(catalog, "InterQual 2026") {
                GuidelineResolution::Catalog(e) => assert_eq!(e.canonical_name, "InterQual"),
                other => panic!("expected catalog hit, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_first_hit_wins_for_overlapping_aliases() {
        let catalog = GuidelineCatalog::from_entries(vec![
            entry("Alpha Criteria", &["shared"]),
            entry("Beta Criteria", &["shared", "beta"]),
        ])
        .unwrap();

        match resolve_guideline(&catalog, "Shared criteria v2") {
            GuidelineResolution::Catalog(e) => assert_eq!(e.canonical_name, "Alpha Criteria"),
            other => panic!("expected Alpha, got {:?}", other),
        }
        match resolve_guideline(&catalog, "beta") {
            GuidelineResolution::Catalog(e) => assert_eq!(e.canonical_name, "Beta Criteria"),
            other => panic!("expected Beta, got {:?}", other),
        }
    }

    #[test]
    fn test_regulatory_shapes() {
        let hits = [
            "Medicare national coverage determination for CPAP",
            "NCD 240.4",
            "LCD L33718",
            "42 CFR 410.32",
            "42 C.F.R. § 411.15",
            "Texas state law requires a 72-hour response",
            "Federal regulations on prior authorization timelines",
            "California Insurance Code section 10123.135",
            "CMS guidance",
            "Cochrane review of lumbar imaging",
            "fda-approved indication",
        ];
        for text in hits {
            assert!(matches_regulatory_format(text), "{:?} should match", text);
        }
    }

    #[test]
    fn test_non_regulatory_text() {
        let misses = [
            "ACME Proprietary Guideline 9.0",
            "Patient must be seen within 3 days",
            "cms",
            "Our internal review standards",
            "",
        ];
        for text in misses {
            assert!(!matches_regulatory_format(text), "{:?} should not match", text);
        }
    }

    #[test]
    fn test_unrecognized_citation() {
        let catalog = GuidelineCatalog::builtin();
        assert_eq!(
            resolve_guideline(catalog, "ACME Proprietary Guideline 9.0"),
            GuidelineResolution::Unrecognized
        );
        assert_eq!(
            resolve_guideline(catalog, "LCD L34220"),
            GuidelineResolution::RegulatoryFormat
        );
    }

    #[test]
    fn test_plan_specific() {
        assert!(is_plan_specific("Aetna Clinical Policy Bulletin 0236"));
        assert!(is_plan_specific("Health plan formulary"));
        assert!(is_plan_specific("Member benefit booklet"));
        assert!(!is_plan_specific("Planned procedure"));
        assert!(!is_plan_specific("ACME Proprietary Guideline 9.0"));
    }
}
