//! Verify command implementation
//!
//! Validates the embedded manifest against the fixture sources and prints
//! the corpus digest.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use tidyviz_corpus::{validate_corpus, Corpus, ValidationResult};

use super::print_json;

/// JSON output for the verify command.
#[derive(Debug, Clone, Serialize)]
pub struct VerifyOutput {
    pub success: bool,
    pub fixtures: usize,
    pub findings: usize,
    pub digest: String,
    pub result: ValidationResult,
}

/// Validates `corpus` and collects the output.
pub fn verify(corpus: &Corpus) -> VerifyOutput {
    let result = validate_corpus(corpus);
    VerifyOutput {
        success: result.is_ok(),
        fixtures: corpus.len(),
        findings: corpus.finding_count(),
        digest: corpus.digest(),
        result,
    }
}

/// Run the verify command.
///
/// # Returns
/// Exit code: 0 if the manifest is valid, 1 otherwise
pub fn run(json: bool) -> Result<ExitCode> {
    let output = verify(Corpus::embedded());

    if json {
        print_json(&output)?;
    } else {
        print_text_output(&output);
    }

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn print_text_output(output: &VerifyOutput) {
    println!(
        "{} {} fixture(s), {} finding(s)",
        "Verifying:".cyan().bold(),
        output.fixtures,
        output.findings
    );

    if !output.result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &output.result.errors {
            println!("  {} {}", "x".red(), error);
        }
    }

    if !output.result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &output.result.warnings {
            println!("  {} {}", "!".yellow(), warning);
        }
    }

    println!("\n{} {}", "Digest:".bold(), output.digest);
    let summary = format!(
        "{} error(s), {} warning(s)",
        output.result.errors.len(),
        output.result.warnings.len()
    );
    if output.success {
        println!("{} {}", "PASSED".green().bold(), summary.dimmed());
    } else {
        println!("{} {}", "FAILED".red().bold(), summary.dimmed());
    }
}
