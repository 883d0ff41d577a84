//! Reading clang-tidy diagnostics.
//!
//! Two input shapes are supported:
//!
//! - the plain text clang-tidy prints (`file:line:col: warning: message [check]`);
//! - the YAML document written by `clang-tidy --export-fixes`, whose byte
//!   offsets are converted to line/column through the corpus sources.

use crate::corpus::Corpus;
use crate::error::{CorpusError, CorpusResult};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// Diagnostic level as printed by clang-tidy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Notes and remarks attached to another diagnostic.
    Note,
    /// Check findings and compiler warnings.
    Warning,
    /// Compiler errors and checks promoted with `-warnings-as-errors`.
    Error,
}

impl Severity {
    fn parse(level: &str) -> Self {
        match level.to_ascii_lowercase().as_str() {
            "error" | "fatal error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Note,
        }
    }
}

/// A single diagnostic reported by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Path as printed by the analyzer.
    pub file: String,
    /// 1-based line; 0 when the position could not be resolved.
    pub line: u32,
    /// 1-based column; 0 when the position could not be resolved.
    pub column: u32,
    /// Diagnostic level.
    pub severity: Severity,
    /// Message text without the check list.
    pub message: String,
    /// Check names from the trailing `[...]` list.
    pub checks: Vec<String>,
}

impl Diagnostic {
    /// Returns the file name component of `file`, accepting `/` and `\` separators.
    pub fn file_name(&self) -> &str {
        file_name_of(&self.file)
    }
}

/// Returns the last path component of `path`, for either separator style.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path)
}

/// Input format of a diagnostics file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsFormat {
    /// clang-tidy console output.
    Text,
    /// `--export-fixes` YAML.
    Yaml,
}

impl DiagnosticsFormat {
    /// Picks a format from the file extension; `.yaml`/`.yml` are YAML, all else is text.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => DiagnosticsFormat::Yaml,
            _ => DiagnosticsFormat::Text,
        }
    }
}

impl std::str::FromStr for DiagnosticsFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(DiagnosticsFormat::Text),
            "yaml" => Ok(DiagnosticsFormat::Yaml),
            _ => Err(format!(
                "unknown diagnostics format '{}', expected 'text' or 'yaml'",
                s
            )),
        }
    }
}

const DIAGNOSTIC_LINE_PATTERN: &str = r"^(?P<file>.+?):(?P<line>\d+):(?P<col>\d+): (?P<level>fatal error|error|warning|note|remark): (?P<message>.*?)(?: \[(?P<checks>[A-Za-z0-9_.,\-]+)\])?\s*$";

static DIAGNOSTIC_LINE_REGEX: OnceLock<Regex> = OnceLock::new();

fn diagnostic_line_regex() -> &'static Regex {
    DIAGNOSTIC_LINE_REGEX
        .get_or_init(|| Regex::new(DIAGNOSTIC_LINE_PATTERN).expect("invalid regex pattern"))
}

/// Parses clang-tidy console output.
///
/// Lines that are not diagnostics (source excerpts, carets, "N warnings
/// generated.") are skipped.
pub fn parse_text(output: &str) -> Vec<Diagnostic> {
    let regex = diagnostic_line_regex();
    let diagnostics: Vec<Diagnostic> = output
        .lines()
        .filter_map(|line| {
            let caps = regex.captures(line)?;
            Some(Diagnostic {
                file: caps["file"].to_string(),
                line: caps["line"].parse().ok()?,
                column: caps["col"].parse().ok()?,
                severity: Severity::parse(&caps["level"]),
                message: caps["message"].to_string(),
                checks: caps
                    .name("checks")
                    .map(|m| {
                        m.as_str()
                            .split(',')
                            .filter(|c| !c.is_empty())
                            .map(str::to_string)
                            .collect()
                    })
                    .unwrap_or_default(),
            })
        })
        .collect();
    tracing::debug!(count = diagnostics.len(), "parsed text diagnostics");
    diagnostics
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExportFixes {
    #[serde(default)]
    diagnostics: Vec<ExportedDiagnostic>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExportedDiagnostic {
    diagnostic_name: String,
    #[serde(default)]
    level: Option<String>,
    #[serde(default)]
    diagnostic_message: Option<ExportedMessage>,
    // Pre-clang-9 documents put the message fields at the top level.
    #[serde(flatten)]
    legacy: ExportedMessage,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ExportedMessage {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    file_path: Option<String>,
    #[serde(default)]
    file_offset: Option<usize>,
}

/// Parses an `--export-fixes` YAML document.
///
/// Offsets into files that belong to `corpus` are converted to line/column;
/// any other file keeps line and column 0.
pub fn parse_export_fixes(yaml: &str, corpus: &Corpus) -> CorpusResult<Vec<Diagnostic>> {
    let document: ExportFixes = serde_yaml::from_str(yaml)?;

    let diagnostics: Vec<Diagnostic> = document
        .diagnostics
        .into_iter()
        .map(|d| {
            let message = d.diagnostic_message.unwrap_or(d.legacy);
            let file = message.file_path.unwrap_or_default();
            let (line, column) = message
                .file_offset
                .and_then(|offset| {
                    corpus
                        .get_by_file_name(file_name_of(&file))
                        .and_then(|fixture| fixture.position_of(offset))
                })
                .unwrap_or((0, 0));
            Diagnostic {
                file,
                line,
                column,
                severity: d
                    .level
                    .as_deref()
                    .map(Severity::parse)
                    .unwrap_or(Severity::Warning),
                message: message.message.unwrap_or_default(),
                checks: vec![d.diagnostic_name],
            }
        })
        .collect();
    tracing::debug!(count = diagnostics.len(), "parsed export-fixes diagnostics");
    Ok(diagnostics)
}

/// Reads and parses a diagnostics file.
pub fn load_diagnostics(
    path: &Path,
    format: DiagnosticsFormat,
    corpus: &Corpus,
) -> CorpusResult<Vec<Diagnostic>> {
    let content = std::fs::read_to_string(path).map_err(|e| CorpusError::io(path, e))?;
    match format {
        DiagnosticsFormat::Text => Ok(parse_text(&content)),
        DiagnosticsFormat::Yaml => parse_export_fixes(&content, corpus),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CONSOLE: &str = r#"2 warnings and 1 error generated.
/work/smoke.cpp:29:3: warning: single-argument constructors must be marked explicit to avoid unintentional implicit conversions [google-explicit-constructor]
   29 |   TestClass(int value) { } // Should have explicit
      |   ^
      |   explicit
/work/smoke.cpp:34:21: warning: C-style casts are discouraged; use static_cast [google-readability-casting,cppcoreguidelines-pro-type-cstyle-cast]
/work/smoke.cpp:53:13: error: invalid use of 'this' outside of a non-static member function [clang-diagnostic-error]
/work/smoke.cpp:24:10: note: Memory is allocated
Suppressed 12 warnings (12 in non-user code).
"#;

    #[test]
    fn test_parse_text_diagnostics() {
        let diagnostics = parse_text(CONSOLE);
        assert_eq!(diagnostics.len(), 4);

        let first = &diagnostics[0];
        assert_eq!(first.file, "/work/smoke.cpp");
        assert_eq!(first.file_name(), "smoke.cpp");
        assert_eq!((first.line, first.column), (29, 3));
        assert_eq!(first.severity, Severity::Warning);
        assert_eq!(first.checks, vec!["google-explicit-constructor".to_string()]);
        assert!(first.message.starts_with("single-argument constructors"));
    }

    #[test]
    fn test_parse_text_multiple_checks() {
        let diagnostics = parse_text(CONSOLE);
        assert_eq!(
            diagnostics[1].checks,
            vec![
                "google-readability-casting".to_string(),
                "cppcoreguidelines-pro-type-cstyle-cast".to_string()
            ]
        );
        assert_eq!(diagnostics[2].severity, Severity::Error);
    }

    #[test]
    fn test_parse_text_note_without_checks() {
        let diagnostics = parse_text(CONSOLE);
        let note = &diagnostics[3];
        assert_eq!(note.severity, Severity::Note);
        assert!(note.checks.is_empty());
        assert_eq!(note.message, "Memory is allocated");
    }

    #[test]
    fn test_windows_paths() {
        let diagnostics = parse_text(
            r"C:\src\tidy\fixtures\basic.cpp:21:11: warning: an assignment within an 'if' condition is bug-prone [bugprone-assignment-in-if-condition]",
        );
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].file, r"C:\src\tidy\fixtures\basic.cpp");
        assert_eq!(diagnostics[0].file_name(), "basic.cpp");
        assert_eq!(diagnostics[0].line, 21);
    }

    #[test]
    fn test_export_fixes_resolves_offsets() {
        let yaml = r#"---
MainSourceFile:  '/work/smoke.cpp'
Diagnostics:
  - DiagnosticName:  google-explicit-constructor
    DiagnosticMessage:
      Message:         'single-argument constructors must be marked explicit'
      FilePath:        '/work/smoke.cpp'
      FileOffset:      621
      Replacements:
        - FilePath:        '/work/smoke.cpp'
          Offset:          621
          Length:          0
          ReplacementText: 'explicit '
    Level:           Warning
    BuildDirectory:  '/work'
  - DiagnosticName:  google-readability-casting
    DiagnosticMessage:
      Message:         'C-style casts are discouraged'
      FilePath:        '/work/smoke.cpp'
      FileOffset:      779
      Replacements:    []
    Level:           Warning
  - DiagnosticName:  misc-include-cleaner
    DiagnosticMessage:
      Message:         'no header providing "malloc"'
      FilePath:        '/usr/include/stdlib.h'
      FileOffset:      10
      Replacements:    []
    Level:           Warning
...
"#;
        let diagnostics = parse_export_fixes(yaml, Corpus::embedded()).unwrap();
        assert_eq!(diagnostics.len(), 3);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (29, 3));
        assert_eq!(diagnostics[0].checks, vec!["google-explicit-constructor".to_string()]);
        assert_eq!((diagnostics[1].line, diagnostics[1].column), (34, 21));
        assert_eq!((diagnostics[2].line, diagnostics[2].column), (0, 0));
    }

    #[test]
    fn test_export_fixes_legacy_layout() {
        let yaml = r#"
Diagnostics:
  - DiagnosticName:  modernize-use-nullptr
    Message:         'use nullptr'
    FilePath:        'modernize.cpp'
    FileOffset:      0
"#;
        let diagnostics = parse_export_fixes(yaml, Corpus::embedded()).unwrap();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].message, "use nullptr");
        assert_eq!(diagnostics[0].severity, Severity::Warning);
        assert_eq!((diagnostics[0].line, diagnostics[0].column), (1, 1));
    }

    #[test]
    fn test_export_fixes_rejects_garbage() {
        let err = parse_export_fixes("Diagnostics: [", Corpus::embedded()).unwrap_err();
        assert!(matches!(err, CorpusError::Yaml(_)));
    }

    #[test]
    fn test_format_selection() {
        assert_eq!(
            DiagnosticsFormat::from_path(Path::new("fixes.YAML")),
            DiagnosticsFormat::Yaml
        );
        assert_eq!(
            DiagnosticsFormat::from_path(Path::new("tidy.log")),
            DiagnosticsFormat::Text
        );
        assert_eq!("yaml".parse::<DiagnosticsFormat>().unwrap(), DiagnosticsFormat::Yaml);
        assert!("html".parse::<DiagnosticsFormat>().is_err());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = load_diagnostics(
            Path::new("/nonexistent/tidy.log"),
            DiagnosticsFormat::Text,
            Corpus::embedded(),
        )
        .unwrap_err();
        assert!(matches!(err, CorpusError::Io { .. }));
    }
}
