//! Check command implementation
//!
//! Compares clang-tidy diagnostics for one fixture against its expected
//! findings.

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;
use tidyviz_corpus::{
    check_fixture, load_diagnostics, CheckOptions, ConformanceReport, Corpus, DiagnosticsFormat,
};

use super::print_json;

/// JSON output for the check command.
#[derive(Debug, Clone, Serialize)]
pub struct CheckOutput {
    /// Whether the diagnostics conform.
    pub success: bool,
    /// Path to the diagnostics file.
    pub diagnostics_path: String,
    /// Share of required findings that were reported.
    pub required_coverage: f64,
    /// The conformance report.
    pub report: ConformanceReport,
}

/// Loads the diagnostics file and checks it against fixture `name`.
pub fn execute(
    name: &str,
    diagnostics_path: &str,
    format: Option<DiagnosticsFormat>,
    options: &CheckOptions,
) -> Result<CheckOutput> {
    let corpus = Corpus::embedded();
    let fixture = corpus.get(name)?;

    let path = Path::new(diagnostics_path);
    let format = format.unwrap_or_else(|| DiagnosticsFormat::from_path(path));
    let diagnostics = load_diagnostics(path, format, corpus)
        .with_context(|| format!("Failed to load diagnostics: {}", diagnostics_path))?;
    tracing::debug!(count = diagnostics.len(), ?format, "loaded diagnostics");

    let report = check_fixture(fixture, &diagnostics, options);
    Ok(CheckOutput {
        success: report.ok,
        diagnostics_path: diagnostics_path.to_string(),
        required_coverage: report.required_coverage(),
        report,
    })
}

/// Run the check command.
///
/// # Returns
/// Exit code: 0 if every required finding was reported (and, with
/// `strict`, nothing unexpected), 1 otherwise
pub fn run(
    name: &str,
    diagnostics_path: &str,
    format: Option<DiagnosticsFormat>,
    options: &CheckOptions,
    json: bool,
) -> Result<ExitCode> {
    let output = execute(name, diagnostics_path, format, options)?;

    if json {
        print_json(&output)?;
    } else {
        print_text_output(&output, options);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_text_output(output: &CheckOutput, options: &CheckOptions) {
    let report = &output.report;
    println!(
        "{} {} against {}",
        "Checking:".cyan().bold(),
        report.fixture,
        output.diagnostics_path
    );

    if !report.matched.is_empty() {
        println!("\n{}", "Matched:".green().bold());
        for m in &report.matched {
            println!(
                "  {} {:>4}  {}  {}",
                "+".green(),
                m.finding.line,
                m.finding.rule,
                format!("(reported at {}:{})", m.diagnostic.line, m.diagnostic.column).dimmed()
            );
        }
    }

    if !report.missing.is_empty() {
        println!("\n{}", "Missing:".red().bold());
        for finding in &report.missing {
            println!("  {} {:>4}  {}", "x".red(), finding.line, finding.rule);
            println!("         {}", finding.description.dimmed());
        }
    }

    if !report.missing_advisory.is_empty() {
        println!("\n{}", "Not reported (advisory):".yellow().bold());
        for finding in &report.missing_advisory {
            println!("  {} {:>4}  {}", "!".yellow(), finding.line, finding.rule);
        }
    }

    if !report.unexpected.is_empty() {
        let header = if options.strict {
            "Unexpected:".red().bold()
        } else {
            "Unexpected:".blue().bold()
        };
        println!("\n{}", header);
        for diagnostic in &report.unexpected {
            println!(
                "  {} {:>4}  {}  {}",
                "?".blue(),
                diagnostic.line,
                diagnostic.checks.join(","),
                diagnostic.message.dimmed()
            );
        }
    }

    let summary = format!(
        "{} matched, {} missing, {} advisory not reported, {} unexpected ({:.0}% required coverage)",
        report.summary.matched_count,
        report.summary.missing_count,
        report.summary.missing_advisory_count,
        report.summary.unexpected_count,
        output.required_coverage * 100.0
    );
    if output.success {
        println!("\n{} {}", "PASSED".green().bold(), summary.dimmed());
    } else {
        println!("\n{} {}", "FAILED".red().bold(), summary.dimmed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn write_perfect_text_run(dir: &Path, name: &str) -> String {
        let fixture = Corpus::embedded().get(name).unwrap();
        let mut output = String::new();
        for finding in fixture.required_findings() {
            writeln!(
                output,
                "/src/{}:{}:1: warning: expected [{}]",
                fixture.file_name,
                finding.line,
                finding.rule.replace('*', "synthetic")
            )
            .unwrap();
        }
        writeln!(output, "/src/{}:1:1: warning: stray [llvm-header-guard]", fixture.file_name).unwrap();
        let path = dir.join("run.txt");
        std::fs::write(&path, output).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn test_perfect_run_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_perfect_text_run(dir.path(), "smoke");
        let output = execute("smoke", &path, None, &CheckOptions::default()).unwrap();
        assert!(output.success);
        assert_eq!(output.required_coverage, 1.0);
        assert_eq!(output.report.summary.unexpected_count, 1);
    }

    #[test]
    fn test_strict_fails_on_stray_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_perfect_text_run(dir.path(), "bugprone");
        let options = CheckOptions {
            strict: true,
            ..CheckOptions::default()
        };
        let output = execute("bugprone", &path, None, &options).unwrap();
        assert!(!output.success);
    }

    #[test]
    fn test_yaml_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fixes.yaml");
        std::fs::write(
            &path,
            "---\nMainSourceFile: /src/smoke.cpp\nDiagnostics:\n  - DiagnosticName: google-explicit-constructor\n    DiagnosticMessage:\n      Message: single-argument constructors must be marked explicit\n      FilePath: /src/smoke.cpp\n      FileOffset: 621\n      Replacements: []\n    Level: Warning\n",
        )
        .unwrap();
        let output = execute(
            "smoke",
            path.to_str().unwrap(),
            None,
            &CheckOptions::default(),
        )
        .unwrap();
        assert!(!output.success);
        assert!(output
            .report
            .matched
            .iter()
            .any(|m| m.finding.rule == "google-explicit-constructor"));
    }

    #[test]
    fn test_unknown_fixture() {
        let err = execute("nope", "unused.txt", None, &CheckOptions::default()).unwrap_err();
        assert!(err.to_string().contains("fixture not found"));
    }

    #[test]
    fn test_missing_diagnostics_file() {
        let err = execute("smoke", "/nonexistent/run.txt", None, &CheckOptions::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load diagnostics"));
    }
}
