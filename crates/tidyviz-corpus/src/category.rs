//! clang-tidy check families.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Check family a clang-tidy check belongs to, derived from its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CheckCategory {
    /// `bugprone-*`: code constructs that are likely bugs.
    Bugprone,
    /// `cert-*`: CERT secure coding rules.
    Cert,
    /// `clang-analyzer-*`: path-sensitive static analyzer checkers.
    ClangAnalyzer,
    /// `clang-diagnostic-*`: compiler warnings and errors surfaced by clang-tidy.
    ClangDiagnostic,
    /// `cppcoreguidelines-*`: C++ Core Guidelines.
    Cppcoreguidelines,
    /// `google-*`: Google C++ style guide.
    Google,
    /// `misc-*`: checks without a better home.
    Misc,
    /// `modernize-*`: migration to newer language features.
    Modernize,
    /// `performance-*`: avoidable copies and allocations.
    Performance,
    /// `readability-*`: naming, formatting and structure.
    Readability,
}

impl CheckCategory {
    /// All categories in stable order.
    pub const ALL: [CheckCategory; 10] = [
        CheckCategory::Bugprone,
        CheckCategory::Cert,
        CheckCategory::ClangAnalyzer,
        CheckCategory::ClangDiagnostic,
        CheckCategory::Cppcoreguidelines,
        CheckCategory::Google,
        CheckCategory::Misc,
        CheckCategory::Modernize,
        CheckCategory::Performance,
        CheckCategory::Readability,
    ];

    /// Returns the check-name prefix (e.g., "clang-analyzer").
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckCategory::Bugprone => "bugprone",
            CheckCategory::Cert => "cert",
            CheckCategory::ClangAnalyzer => "clang-analyzer",
            CheckCategory::ClangDiagnostic => "clang-diagnostic",
            CheckCategory::Cppcoreguidelines => "cppcoreguidelines",
            CheckCategory::Google => "google",
            CheckCategory::Misc => "misc",
            CheckCategory::Modernize => "modernize",
            CheckCategory::Performance => "performance",
            CheckCategory::Readability => "readability",
        }
    }

    /// Derives the category from a check name or check-name pattern.
    ///
    /// The prefix must be followed by `-` so that `clang-analyzer-core.DivideZero`
    /// maps to [`CheckCategory::ClangAnalyzer`] and not to something shorter.
    pub fn from_check(check: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .filter(|cat| {
                check
                    .strip_prefix(cat.as_str())
                    .is_some_and(|rest| rest.starts_with('-'))
            })
            .max_by_key(|cat| cat.as_str().len())
            .copied()
    }
}

impl fmt::Display for CheckCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CheckCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        Self::ALL
            .iter()
            .find(|cat| cat.as_str() == lowered)
            .copied()
            .ok_or_else(|| format!("unknown check category '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_check_prefixes() {
        assert_eq!(
            CheckCategory::from_check("bugprone-assignment-in-if-condition"),
            Some(CheckCategory::Bugprone)
        );
        assert_eq!(
            CheckCategory::from_check("clang-analyzer-core.NullDereference"),
            Some(CheckCategory::ClangAnalyzer)
        );
        assert_eq!(
            CheckCategory::from_check("clang-diagnostic-sign-compare"),
            Some(CheckCategory::ClangDiagnostic)
        );
        assert_eq!(
            CheckCategory::from_check("clang-analyzer-*"),
            Some(CheckCategory::ClangAnalyzer)
        );
    }

    #[test]
    fn test_from_check_rejects_unknown() {
        assert_eq!(CheckCategory::from_check("llvm-header-guard"), None);
        assert_eq!(CheckCategory::from_check("google"), None);
        assert_eq!(CheckCategory::from_check("googlefoo-bar"), None);
    }

    #[test]
    fn test_parse_category() {
        assert_eq!(
            "clang-analyzer".parse::<CheckCategory>().unwrap(),
            CheckCategory::ClangAnalyzer
        );
        assert_eq!(
            "MODERNIZE".parse::<CheckCategory>().unwrap(),
            CheckCategory::Modernize
        );
        assert!("lint".parse::<CheckCategory>().is_err());
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&CheckCategory::Cppcoreguidelines).unwrap();
        assert_eq!(json, "\"cppcoreguidelines\"");
        let json = serde_json::to_string(&CheckCategory::ClangDiagnostic).unwrap();
        assert_eq!(json, "\"clang-diagnostic\"");
    }
}
