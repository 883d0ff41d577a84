//! Expected finding types.

use crate::category::CheckCategory;
use serde::{Deserialize, Serialize};

/// How firmly an analyzer is expected to report a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expectation {
    /// A stock clang-tidy run with the exported compile flags reports it.
    Required,
    /// The fixture author's intent; no stock check is guaranteed to fire.
    Advisory,
}

/// A single diagnostic an analyzer is expected to report against a fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExpectedFinding {
    /// clang-tidy check name or glob over check names (e.g., "clang-analyzer-*").
    pub rule: &'static str,

    /// Check family the rule belongs to.
    pub category: CheckCategory,

    /// 1-based line the finding is reported on.
    pub line: u32,

    /// Text that occurs on `line`.
    pub anchor: &'static str,

    /// Human-readable description of the defect.
    pub description: &'static str,

    /// Whether the finding must be reported.
    pub expectation: Expectation,
}

impl ExpectedFinding {
    /// Creates a finding a stock analyzer run must report.
    pub const fn required(
        rule: &'static str,
        category: CheckCategory,
        line: u32,
        anchor: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            rule,
            category,
            line,
            anchor,
            description,
            expectation: Expectation::Required,
        }
    }

    /// Creates a finding recording the author's intent only.
    pub const fn advisory(
        rule: &'static str,
        category: CheckCategory,
        line: u32,
        anchor: &'static str,
        description: &'static str,
    ) -> Self {
        Self {
            rule,
            category,
            line,
            anchor,
            description,
            expectation: Expectation::Advisory,
        }
    }

    /// Returns true if the finding must be reported.
    pub fn is_required(&self) -> bool {
        self.expectation == Expectation::Required
    }

    /// Returns true if `check` is matched by this finding's rule pattern.
    ///
    /// Invalid patterns fall back to exact comparison.
    pub fn matches_check(&self, check: &str) -> bool {
        match glob::Pattern::new(self.rule) {
            Ok(pattern) => pattern.matches(check),
            Err(_) => self.rule == check,
        }
    }
}
