//! Trust score and status classification.
//!
//! score = round(100·V/T − 50·F/T) − 5·section_flags − 10·failed_checks,
//! clamped to [0, 100] once, after all deductions. T = 0 scores 100.

use crate::models::{ClaimSummary, OverallStatus};

const SECTION_FLAG_PENALTY: i64 = 5;
const FAILED_CHECK_PENALTY: i64 = 10;

const PASS_MIN_SCORE: u8 = 80;
const FAIL_BELOW_SCORE: u8 = 50;
const FAIL_MIN_FLAGGED: usize = 3;
const FAIL_MIN_FAILED_CHECKS: usize = 2;

pub fn compute_score(summary: &ClaimSummary, section_flags: usize, failed_checks: usize) -> u8 {
    let total = summary.total();
    if total == 0 {
        return 100;
    }

    let t = total as f64;
    let raw = (summary.verified as f64 / t) * 100.0 - (summary.flagged as f64 / t) * 50.0;
    // Half-up rounding, so x.5 always rounds toward +inf.
    let rounded = (raw + 0.5).floor() as i64;

    let adjusted = rounded
        - SECTION_FLAG_PENALTY * section_flags as i64
        - FAILED_CHECK_PENALTY * failed_checks as i64;

    adjusted.clamp(0, 100) as u8
}

/// Pass is checked first, then fail; anything else is a warning.
pub fn classify(score: u8, flagged: usize, failed_checks: usize) -> OverallStatus {
    if score >= PASS_MIN_SCORE && flagged == 0 && failed_checks == 0 {
        OverallStatus::Pass
    } else if score < FAIL_BELOW_SCORE
        || flagged >= FAIL_MIN_FLAGGED
        || failed_checks >= FAIL_MIN_FAILED_CHECKS
    {
        OverallStatus::Fail
    } else {
        OverallStatus::Warning
    }
}
