//! Comparing analyzer diagnostics with a fixture's expected findings.

use crate::diagnostics::{Diagnostic, Severity};
use crate::finding::ExpectedFinding;
use crate::fixture::Fixture;
use serde::{Deserialize, Serialize};

/// Options controlling how diagnostics are matched to findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    /// How many lines a diagnostic may be away from the finding's line.
    pub line_tolerance: u32,
    /// Check-name globs whose diagnostics are never reported as unexpected.
    pub ignore_checks: Vec<String>,
    /// Fail when unexpected diagnostics remain.
    pub strict: bool,
}

impl CheckOptions {
    fn is_ignored(&self, diagnostic: &Diagnostic) -> bool {
        !diagnostic.checks.is_empty()
            && diagnostic.checks.iter().all(|check| {
                self.ignore_checks.iter().any(|pattern| {
                    glob::Pattern::new(pattern)
                        .map(|p| p.matches(check))
                        .unwrap_or_else(|_| pattern == check)
                })
            })
    }
}

/// A finding together with the diagnostic that satisfied it.
#[derive(Debug, Clone, Serialize)]
pub struct Match {
    /// The expected finding.
    pub finding: ExpectedFinding,
    /// The diagnostic reported for it.
    pub diagnostic: Diagnostic,
}

/// Summary counts for a conformance check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConformanceSummary {
    /// Findings matched by a diagnostic.
    pub matched_count: usize,
    /// Required findings with no diagnostic.
    pub missing_count: usize,
    /// Advisory findings with no diagnostic.
    pub missing_advisory_count: usize,
    /// Diagnostics no finding accounts for.
    pub unexpected_count: usize,
}

/// Result of checking one fixture's diagnostics.
#[derive(Debug, Clone, Serialize)]
pub struct ConformanceReport {
    /// Fixture name.
    pub fixture: String,
    /// True if every required finding was matched (and, in strict mode,
    /// nothing unexpected was reported).
    pub ok: bool,
    /// Matched findings.
    pub matched: Vec<Match>,
    /// Required findings that were not reported.
    pub missing: Vec<ExpectedFinding>,
    /// Advisory findings that were not reported.
    pub missing_advisory: Vec<ExpectedFinding>,
    /// Diagnostics that match no finding.
    pub unexpected: Vec<Diagnostic>,
    /// Summary counts.
    pub summary: ConformanceSummary,
}

impl ConformanceReport {
    fn new(fixture: &Fixture) -> Self {
        Self {
            fixture: fixture.name.to_string(),
            ok: true,
            matched: Vec::new(),
            missing: Vec::new(),
            missing_advisory: Vec::new(),
            unexpected: Vec::new(),
            summary: ConformanceSummary::default(),
        }
    }

    /// Returns the share of required findings that were matched, in `[0, 1]`.
    ///
    /// A fixture without required findings has full coverage.
    pub fn required_coverage(&self) -> f64 {
        let matched_required = self
            .matched
            .iter()
            .filter(|m| m.finding.is_required())
            .count();
        let total = matched_required + self.missing.len();
        if total == 0 {
            1.0
        } else {
            matched_required as f64 / total as f64
        }
    }
}

fn within_tolerance(finding: &ExpectedFinding, diagnostic: &Diagnostic, tolerance: u32) -> bool {
    finding.line.abs_diff(diagnostic.line) <= tolerance
}

fn satisfies(finding: &ExpectedFinding, diagnostic: &Diagnostic, tolerance: u32) -> bool {
    within_tolerance(finding, diagnostic, tolerance)
        && diagnostic.checks.iter().any(|c| finding.matches_check(c))
}

/// Compares `diagnostics` against the expected findings of `fixture`.
///
/// Only diagnostics whose file name equals the fixture's file name are
/// considered. A diagnostic may satisfy several findings on the same line
/// (clang-tidy lists aliases such as
/// `[google-readability-casting,cppcoreguidelines-pro-type-cstyle-cast]`);
/// findings on other lines need a diagnostic of their own. Notes are never
/// reported as unexpected.
pub fn check_fixture(
    fixture: &Fixture,
    diagnostics: &[Diagnostic],
    options: &CheckOptions,
) -> ConformanceReport {
    let mut report = ConformanceReport::new(fixture);

    let relevant: Vec<&Diagnostic> = diagnostics
        .iter()
        .filter(|d| d.file_name() == fixture.file_name)
        .collect();
    // Line of the first finding each diagnostic satisfied. Only findings on
    // that same line may share it.
    let mut claimed_by: Vec<Option<u32>> = vec![None; relevant.len()];

    for finding in fixture.findings {
        // Prefer the closest diagnostic when several are in range.
        let best = relevant
            .iter()
            .enumerate()
            .filter(|(i, _)| claimed_by[*i].map_or(true, |line| line == finding.line))
            .filter(|(_, d)| satisfies(finding, d, options.line_tolerance))
            .min_by_key(|(_, d)| finding.line.abs_diff(d.line));

        match best {
            Some((i, diagnostic)) => {
                claimed_by[i].get_or_insert(finding.line);
                report.matched.push(Match {
                    finding: *finding,
                    diagnostic: (*diagnostic).clone(),
                });
            }
            None if finding.is_required() => report.missing.push(*finding),
            None => report.missing_advisory.push(*finding),
        }
    }

    for (i, diagnostic) in relevant.iter().enumerate() {
        if claimed_by[i].is_some() || diagnostic.severity == Severity::Note || options.is_ignored(diagnostic) {
            continue;
        }
        report.unexpected.push((*diagnostic).clone());
    }

    report.summary = ConformanceSummary {
        matched_count: report.matched.len(),
        missing_count: report.missing.len(),
        missing_advisory_count: report.missing_advisory.len(),
        unexpected_count: report.unexpected.len(),
    };
    report.ok = report.missing.is_empty() && !(options.strict && !report.unexpected.is_empty());

    tracing::debug!(
        fixture = fixture.name,
        matched = report.summary.matched_count,
        missing = report.summary.missing_count,
        unexpected = report.summary.unexpected_count,
        "checked fixture"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::Corpus;
    use crate::diagnostics::parse_text;

    fn diag(file: &str, line: u32, severity: Severity, checks: &[&str]) -> Diagnostic {
        Diagnostic {
            file: file.to_string(),
            line,
            column: 1,
            severity,
            message: "test".to_string(),
            checks: checks.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Diagnostics for every required finding of `fixture`, as clang-tidy would print them.
    fn perfect_run(fixture: &Fixture) -> Vec<Diagnostic> {
        fixture
            .required_findings()
            .map(|f| {
                let check = f.rule.replace('*', "synthetic");
                diag(&format!("/work/{}", fixture.file_name), f.line, Severity::Warning, &[check.as_str()])
            })
            .collect()
    }

    #[test]
    fn test_perfect_run_passes_every_fixture() {
        for fixture in Corpus::embedded().list_fixtures() {
            let report = check_fixture(fixture, &perfect_run(fixture), &CheckOptions::default());
            assert!(report.ok, "{}: missing {:?}", fixture.name, report.missing);
            assert!(report.unexpected.is_empty(), "{}: {:?}", fixture.name, report.unexpected);
            assert_eq!(report.required_coverage(), 1.0);
        }
    }

    #[test]
    fn test_empty_run_reports_required_as_missing() {
        let fixture = Corpus::embedded().get("basic").unwrap();
        let report = check_fixture(fixture, &[], &CheckOptions::default());
        assert!(!report.ok);
        assert_eq!(report.missing.len(), fixture.required_findings().count());
        assert_eq!(
            report.missing_advisory.len(),
            fixture.findings.len() - fixture.required_findings().count()
        );
        assert_eq!(report.required_coverage(), 0.0);
    }

    #[test]
    fn test_aliases_satisfy_multiple_findings() {
        let fixture = Corpus::embedded().get("modernize").unwrap();
        let output = "/w/modernize.cpp:23:10: warning: use auto when declaring iterators [modernize-use-auto]\n\
                      /w/modernize.cpp:23:5: warning: use range-based for loop instead [modernize-loop-convert]\n";
        let report = check_fixture(fixture, &parse_text(output), &CheckOptions::default());
        let matched_rules: Vec<&str> = report.matched.iter().map(|m| m.finding.rule).collect();
        assert!(matched_rules.contains(&"modernize-use-auto"));
        assert!(matched_rules.contains(&"modernize-loop-convert"));
        assert!(report.unexpected.is_empty());
    }

    #[test]
    fn test_line_tolerance() {
        let fixture = Corpus::embedded().get("misc").unwrap();
        // Leak reported where the function returns rather than at the allocation.
        let diagnostics = vec![diag(
            "misc.cpp",
            29,
            Severity::Warning,
            &["clang-analyzer-cplusplus.NewDeleteLeaks"],
        )];

        let strict_lines = check_fixture(fixture, &diagnostics, &CheckOptions::default());
        assert!(strict_lines
            .matched
            .iter()
            .all(|m| m.finding.rule != "clang-analyzer-cplusplus.NewDeleteLeaks"));

        let options = CheckOptions {
            line_tolerance: 1,
            ..CheckOptions::default()
        };
        let tolerant = check_fixture(fixture, &diagnostics, &options);
        let leak_lines: Vec<u32> = tolerant
            .matched
            .iter()
            .filter(|m| m.finding.rule == "clang-analyzer-cplusplus.NewDeleteLeaks")
            .map(|m| m.finding.line)
            .collect();
        assert_eq!(leak_lines, vec![28]);
    }

    #[test]
    fn test_one_diagnostic_cannot_cover_two_lines() {
        let fixture = Corpus::embedded().get("misc").unwrap();
        let options = CheckOptions {
            line_tolerance: 2,
            ..CheckOptions::default()
        };
        let leak = "clang-analyzer-cplusplus.NewDeleteLeaks";

        // Both leaks (lines 28 and 31) are within two lines of 29.
        let single = vec![diag("misc.cpp", 29, Severity::Warning, &[leak])];
        let report = check_fixture(fixture, &single, &options);
        let matched: Vec<u32> = report
            .matched
            .iter()
            .filter(|m| m.finding.rule == leak)
            .map(|m| m.finding.line)
            .collect();
        let missing: Vec<u32> = report
            .missing
            .iter()
            .filter(|f| f.rule == leak)
            .map(|f| f.line)
            .collect();
        assert_eq!(matched, vec![28]);
        assert_eq!(missing, vec![31]);

        let both = vec![
            diag("misc.cpp", 29, Severity::Warning, &[leak]),
            diag("misc.cpp", 31, Severity::Warning, &[leak]),
        ];
        let report = check_fixture(fixture, &both, &options);
        assert!(report.missing.iter().all(|f| f.rule != leak));
        assert!(report.unexpected.is_empty());
    }

    #[test]
    fn test_alias_diagnostic_covers_findings_on_its_line() {
        let fixture = Corpus::embedded().get("modernize").unwrap();
        let diagnostics = vec![diag(
            "modernize.cpp",
            23,
            Severity::Warning,
            &["modernize-use-auto", "modernize-loop-convert"],
        )];
        let options = CheckOptions {
            line_tolerance: 20,
            ..CheckOptions::default()
        };
        let report = check_fixture(fixture, &diagnostics, &options);
        let matched: Vec<(u32, &str)> = report
            .matched
            .iter()
            .map(|m| (m.finding.line, m.finding.rule))
            .collect();
        assert_eq!(
            matched,
            vec![(23, "modernize-use-auto"), (23, "modernize-loop-convert")]
        );
    }

    #[test]
    fn test_terse_names_and_malloc_cast_are_expected() {
        let strict = CheckOptions {
            strict: true,
            ..CheckOptions::default()
        };

        let readability = Corpus::embedded().get("readability").unwrap();
        let terse: Vec<Diagnostic> = [58, 59, 60]
            .into_iter()
            .map(|line| diag("readability.cpp", line, Severity::Warning, &["readability-identifier-length"]))
            .collect();
        let report = check_fixture(readability, &terse, &strict);
        assert!(report.unexpected.is_empty(), "{:?}", report.unexpected);
        let matched: Vec<u32> = report.matched.iter().map(|m| m.finding.line).collect();
        assert_eq!(matched, vec![58, 59, 60]);

        let smoke = Corpus::embedded().get("smoke").unwrap();
        let mut run = perfect_run(smoke);
        run.push(diag("smoke.cpp", 64, Severity::Warning, &["clang-analyzer-security.ArrayBound"]));
        let report = check_fixture(smoke, &run, &strict);
        assert!(report.ok, "{:?} {:?}", report.missing, report.unexpected);
        assert!(report
            .matched
            .iter()
            .any(|m| m.finding.line == 75 && m.finding.rule == "google-readability-casting"));
    }

    #[test]
    fn test_other_files_and_notes_are_ignored() {
        let fixture = Corpus::embedded().get("smoke").unwrap();
        let diagnostics = vec![
            diag("/usr/include/c++/vector", 12, Severity::Warning, &["misc-include-cleaner"]),
            diag("smoke.cpp", 24, Severity::Note, &[]),
        ];
        let report = check_fixture(fixture, &diagnostics, &CheckOptions::default());
        assert!(report.unexpected.is_empty());
        assert!(report.matched.is_empty());
    }

    #[test]
    fn test_strict_mode_fails_on_unexpected() {
        let fixture = Corpus::embedded().get("readability").unwrap();
        let mut diagnostics = perfect_run(fixture);
        diagnostics.push(diag("readability.cpp", 10, Severity::Warning, &["llvm-include-order"]));

        let lenient = check_fixture(fixture, &diagnostics, &CheckOptions::default());
        assert!(lenient.ok);
        assert_eq!(lenient.summary.unexpected_count, 1);

        let strict = CheckOptions {
            strict: true,
            ..CheckOptions::default()
        };
        assert!(!check_fixture(fixture, &diagnostics, &strict).ok);

        let ignoring = CheckOptions {
            strict: true,
            ignore_checks: vec!["llvm-*".to_string()],
            ..CheckOptions::default()
        };
        let report = check_fixture(fixture, &diagnostics, &ignoring);
        assert!(report.ok);
        assert!(report.unexpected.is_empty());
    }

    #[test]
    fn test_wrong_check_on_right_line_is_unexpected() {
        let fixture = Corpus::embedded().get("basic").unwrap();
        let diagnostics = vec![diag("basic.cpp", 21, Severity::Warning, &["clang-diagnostic-parentheses"])];
        let report = check_fixture(fixture, &diagnostics, &CheckOptions::default());
        assert_eq!(report.unexpected.len(), 1);
        assert!(report
            .missing
            .iter()
            .any(|f| f.rule == "bugprone-assignment-in-if-condition"));
    }
}
