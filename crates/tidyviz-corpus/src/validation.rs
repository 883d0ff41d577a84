//! Manifest validation: checks every expected finding against the fixture text.

use crate::category::CheckCategory;
use crate::corpus::Corpus;
use crate::fixture::Fixture;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Violation codes for manifest validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ViolationCode {
    /// V001: Two fixtures share a name
    DuplicateName,
    /// V002: Two fixtures share a file name
    DuplicateFileName,
    /// V003: File name is not `<name>.cpp`
    FileNameMismatch,
    /// V004: Fixture source is empty
    EmptySource,
    /// V005: Finding line is 0 or past the end of the source
    LineOutOfRange,
    /// V006: Anchor is empty or does not occur on the finding's line
    AnchorMissing,
    /// V007: Finding category is not declared by the fixture
    UndeclaredCategory,
    /// V008: Declared category has no finding
    UncoveredCategory,
    /// V009: Rule prefix disagrees with the finding's category
    RuleCategoryMismatch,
    /// V010: Rule is not a valid glob pattern
    InvalidRulePattern,
    /// V011: Findings are not ordered by line
    FindingsOutOfOrder,
    /// V012: Waiver names a line with no defect comment, or one a finding already covers
    StaleWaiver,
}

impl ViolationCode {
    /// Returns the violation code string (e.g., "V001").
    pub fn code(&self) -> &'static str {
        match self {
            ViolationCode::DuplicateName => "V001",
            ViolationCode::DuplicateFileName => "V002",
            ViolationCode::FileNameMismatch => "V003",
            ViolationCode::EmptySource => "V004",
            ViolationCode::LineOutOfRange => "V005",
            ViolationCode::AnchorMissing => "V006",
            ViolationCode::UndeclaredCategory => "V007",
            ViolationCode::UncoveredCategory => "V008",
            ViolationCode::RuleCategoryMismatch => "V009",
            ViolationCode::InvalidRulePattern => "V010",
            ViolationCode::FindingsOutOfOrder => "V011",
            ViolationCode::StaleWaiver => "V012",
        }
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for manifest validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WarningCode {
    /// W001: Fixture has no required findings
    NoRequiredFindings,
    /// W002: Same rule listed twice on one line
    DuplicateFinding,
    /// W003: A comment names a defect that no finding records
    UnrecordedAnnotation,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::NoRequiredFindings => "W001",
            WarningCode::DuplicateFinding => "W002",
            WarningCode::UnrecordedAnnotation => "W003",
        }
    }
}

impl fmt::Display for WarningCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A manifest violation with code, message, and location in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// The violation code.
    pub code: ViolationCode,
    /// Human-readable message.
    pub message: String,
    /// Manifest location (e.g., "smoke.findings[3]").
    pub path: String,
}

impl Violation {
    fn new(code: ViolationCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: path.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// A manifest warning with code, message, and location in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
    /// Manifest location.
    pub path: String,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (at {})", self.code, self.message, self.path)
    }
}

/// Outcome of validating a corpus.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    /// Violations; any entry makes the corpus invalid.
    pub errors: Vec<Violation>,
    /// Non-fatal observations.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Returns true if there are no violations.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns true if a violation with `code` was recorded.
    pub fn has(&self, code: ViolationCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    fn add_error(&mut self, violation: Violation) {
        self.errors.push(violation);
    }

    fn add_warning(&mut self, code: WarningCode, message: impl Into<String>, path: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            code,
            message: message.into(),
            path: path.into(),
        });
    }
}

/// Validates every fixture of `corpus` and the corpus as a whole.
pub fn validate_corpus(corpus: &Corpus) -> ValidationResult {
    let mut result = ValidationResult::default();
    let mut names = HashSet::new();
    let mut file_names = HashSet::new();

    for fixture in corpus.list_fixtures() {
        if !names.insert(fixture.name) {
            result.add_error(Violation::new(
                ViolationCode::DuplicateName,
                format!("fixture name '{}' is used more than once", fixture.name),
                fixture.name,
            ));
        }
        if !file_names.insert(fixture.file_name) {
            result.add_error(Violation::new(
                ViolationCode::DuplicateFileName,
                format!("file name '{}' is used more than once", fixture.file_name),
                format!("{}.file_name", fixture.name),
            ));
        }
        validate_fixture(fixture, &mut result);
    }

    tracing::debug!(
        fixtures = corpus.len(),
        errors = result.errors.len(),
        warnings = result.warnings.len(),
        "validated corpus"
    );
    result
}

/// Validates a single fixture, appending to `result`.
pub fn validate_fixture(fixture: &Fixture, result: &mut ValidationResult) {
    let expected_file = format!("{}.cpp", fixture.name);
    if fixture.file_name != expected_file {
        result.add_error(Violation::new(
            ViolationCode::FileNameMismatch,
            format!(
                "file name must be '{}', got '{}'",
                expected_file, fixture.file_name
            ),
            format!("{}.file_name", fixture.name),
        ));
    }

    if fixture.source.is_empty() {
        result.add_error(Violation::new(
            ViolationCode::EmptySource,
            "fixture source is empty",
            format!("{}.source", fixture.name),
        ));
    }

    let line_count = fixture.line_count();
    let mut previous_line = 0;
    let mut seen = HashSet::new();

    for (i, finding) in fixture.findings.iter().enumerate() {
        let path = format!("{}.findings[{}]", fixture.name, i);

        if finding.line < previous_line {
            result.add_error(Violation::new(
                ViolationCode::FindingsOutOfOrder,
                format!(
                    "line {} follows line {}; findings must be ordered by line",
                    finding.line, previous_line
                ),
                path.clone(),
            ));
        }
        previous_line = finding.line;

        match fixture.line(finding.line) {
            None => result.add_error(Violation::new(
                ViolationCode::LineOutOfRange,
                format!(
                    "line {} is outside 1..={} of {}",
                    finding.line, line_count, fixture.file_name
                ),
                path.clone(),
            )),
            Some(text) => {
                if finding.anchor.is_empty() || !text.contains(finding.anchor) {
                    result.add_error(Violation::new(
                        ViolationCode::AnchorMissing,
                        format!(
                            "anchor '{}' does not occur on line {}: '{}'",
                            finding.anchor,
                            finding.line,
                            text.trim()
                        ),
                        path.clone(),
                    ));
                }
            }
        }

        if !fixture.declares(finding.category) {
            result.add_error(Violation::new(
                ViolationCode::UndeclaredCategory,
                format!(
                    "finding category '{}' is not declared by the fixture",
                    finding.category
                ),
                path.clone(),
            ));
        }

        match CheckCategory::from_check(finding.rule) {
            Some(category) if category == finding.category => {}
            other => result.add_error(Violation::new(
                ViolationCode::RuleCategoryMismatch,
                format!(
                    "rule '{}' belongs to {}, but the finding says '{}'",
                    finding.rule,
                    other.map_or_else(|| "no known category".to_string(), |c| format!("'{}'", c)),
                    finding.category
                ),
                path.clone(),
            )),
        }

        if let Err(e) = glob::Pattern::new(finding.rule) {
            result.add_error(Violation::new(
                ViolationCode::InvalidRulePattern,
                format!("rule '{}' is not a valid pattern: {}", finding.rule, e),
                path.clone(),
            ));
        }

        if !seen.insert((finding.rule, finding.line)) {
            result.add_warning(
                WarningCode::DuplicateFinding,
                format!("rule '{}' is listed twice on line {}", finding.rule, finding.line),
                path,
            );
        }
    }

    for category in fixture.categories {
        if fixture.findings_in(*category).next().is_none() {
            result.add_error(Violation::new(
                ViolationCode::UncoveredCategory,
                format!("declared category '{}' has no expected finding", category),
                format!("{}.categories", fixture.name),
            ));
        }
    }

    let annotations = fixture.annotations();
    for (i, waiver) in fixture.waivers.iter().enumerate() {
        let path = format!("{}.waivers[{}]", fixture.name, i);
        match annotations.iter().find(|a| a.line == waiver.line) {
            None => result.add_error(Violation::new(
                ViolationCode::StaleWaiver,
                format!("line {} has no defect comment to waive", waiver.line),
                path,
            )),
            Some(annotation) if fixture.findings.iter().any(|f| annotation.covers(f.line)) => {
                result.add_error(Violation::new(
                    ViolationCode::StaleWaiver,
                    format!("comment on line {} is already covered by a finding", waiver.line),
                    path,
                ))
            }
            Some(_) => {}
        }
    }

    for annotation in fixture.unrecorded_annotations() {
        result.add_warning(
            WarningCode::UnrecordedAnnotation,
            format!(
                "'{}' names a defect but no finding lies on lines {}..={}",
                annotation.text, annotation.first, annotation.last
            ),
            format!("{}.source:{}", fixture.name, annotation.line),
        );
    }

    if !fixture.findings.is_empty() && fixture.required_findings().next().is_none() {
        result.add_warning(
            WarningCode::NoRequiredFindings,
            "every finding is advisory",
            format!("{}.findings", fixture.name),
        );
    }
}
