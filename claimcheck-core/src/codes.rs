//! Format checks for the three coding systems a brief may cite.
//!
//! Only shape is checked, never existence. Each predicate takes a single
//! token; use [`leading_token`] to pull the code out of "code + description".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static PROCEDURE_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("procedure code pattern"));
static SUPPLY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][0-9]{4}$").expect("supply code pattern"));
static DIAGNOSIS_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][0-9]{2}(\.[0-9]{1,4})?$").expect("diagnosis code pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodeSystem {
    /// CPT: five digits.
    Procedure,
    /// HCPCS Level II: one letter and four digits.
    Supply,
    /// ICD-10-CM: letter, two digits, optional dot and up to four digits.
    Diagnosis,
}

impl CodeSystem {
    pub fn label(&self) -> &'static str {
        match self {
            CodeSystem::Procedure => "CPT",
            CodeSystem::Supply => "HCPCS",
            CodeSystem::Diagnosis => "ICD-10",
        }
    }
}

/// First whitespace-delimited token, or "" for blank input.
pub fn leading_token(text: &str) -> &str {
    text.split_whitespace().next().unwrap_or("")
}

pub fn is_procedure_code(token: &str) -> bool {
    PROCEDURE_CODE.is_match(token)
}

pub fn is_supply_code(token: &str) -> bool {
    SUPPLY_CODE.is_match(token)
}

pub fn is_diagnosis_code(token: &str) -> bool {
    DIAGNOSIS_CODE.is_match(token)
}

/// True if the token has the shape of any supported coding system.
pub fn is_valid_code(token: &str) -> bool {
    code_system(token).is_some()
}

/// The coding system whose shape the token matches. The three shapes are disjoint.
pub fn code_system(token: &str) -> Option<CodeSystem> {
    if is_procedure_code(token) {
        Some(CodeSystem::Procedure)
    } else if is_supply_code(token) {
        Some(CodeSystem::Supply)
    } else if is_diagnosis_code(token) {
        Some(CodeSystem::Diagnosis)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_codes() {
        assert!(is_procedure_code("72148"));
        assert!(is_supply_code("E0601"));
        assert!(is_diagnosis_code("M17.11"));
        assert!(!is_procedure_code("ABC"));
        assert!(!is_supply_code("ABC"));
        assert!(!is_diagnosis_code("ABC"));
        assert!(!is_valid_code("ABC"));
    }

    #[test]
    fn test_case_insensitive_letters() {
        assert!(is_supply_code("e0601"));
        assert!(is_diagnosis_code("g47.33"));
        assert!(is_diagnosis_code("M54"));
    }

    #[test]
    fn test_malformed_tokens() {
        for token in ["", "7214", "721488", "72148a", "EE601", "E060", "M17.", "M17.12345", "M1.11", "M17-11", "７２１４８"] {
            assert!(!is_valid_code(token), "{:?} should be invalid", token);
        }
    }

    #[test]
    fn test_code_system_detection() {
        assert_eq!(code_system("72148"), Some(CodeSystem::Procedure));
        assert_eq!(code_system("E0601"), Some(CodeSystem::Supply));
        assert_eq!(code_system("M17.11"), Some(CodeSystem::Diagnosis));
        assert_eq!(code_system("lumbar"), None);
    }

    #[test]
    fn test_leading_token() {
        assert_eq!(leading_token("72148 MRI lumbar spine"), "72148");
        assert_eq!(leading_token("   M17.11\tosteoarthritis"), "M17.11");
        assert_eq!(leading_token("   "), "");
        assert_eq!(leading_token(""), "");
    }
}
