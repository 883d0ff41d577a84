//! Show command implementation
//!
//! Prints one fixture's expected findings and, optionally, its source.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeSet;
use std::process::ExitCode;
use tidyviz_corpus::{CheckCategory, Corpus, Expectation, ExpectedFinding, Fixture, Waiver};

use super::print_json;

/// JSON output for the show command.
#[derive(Debug, Clone, Serialize)]
pub struct ShowOutput {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture: Option<FixtureDetail>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FixtureDetail {
    pub name: &'static str,
    pub file: &'static str,
    pub summary: &'static str,
    pub hash: String,
    pub categories: &'static [CheckCategory],
    pub findings: &'static [ExpectedFinding],
    pub waivers: &'static [Waiver],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<&'static str>,
}

impl FixtureDetail {
    pub fn new(fixture: &Fixture, with_source: bool) -> Self {
        Self {
            name: fixture.name,
            file: fixture.file_name,
            summary: fixture.summary,
            hash: fixture.content_hash(),
            categories: fixture.categories,
            findings: fixture.findings,
            waivers: fixture.waivers,
            source: with_source.then_some(fixture.source),
        }
    }
}

/// Run the show command.
///
/// # Returns
/// Exit code: 0 if the fixture exists, 1 otherwise
pub fn run(name: &str, with_source: bool, json: bool) -> Result<ExitCode> {
    let corpus = Corpus::embedded();
    let fixture = match corpus.get(name) {
        Ok(fixture) => fixture,
        Err(e) => {
            if json {
                print_json(&ShowOutput {
                    success: false,
                    error: Some(e.to_string()),
                    fixture: None,
                })?;
            } else {
                eprintln!("{}: {}", "error".red().bold(), e);
                eprintln!("available fixtures: {}", corpus.names().join(", "));
            }
            return Ok(ExitCode::from(1));
        }
    };

    if json {
        print_json(&ShowOutput {
            success: true,
            error: None,
            fixture: Some(FixtureDetail::new(fixture, with_source)),
        })?;
    } else {
        print_text_output(fixture, with_source);
    }
    Ok(ExitCode::SUCCESS)
}

fn expectation_marker(expectation: Expectation) -> colored::ColoredString {
    match expectation {
        Expectation::Required => "required".green(),
        Expectation::Advisory => "advisory".yellow(),
    }
}

fn print_text_output(fixture: &Fixture, with_source: bool) {
    println!("{} {}", fixture.name.cyan().bold(), format!("({})", fixture.file_name).dimmed());
    println!("{}", fixture.summary);
    let categories: Vec<&str> = fixture.categories.iter().map(|c| c.as_str()).collect();
    println!("{} {}", "Categories:".bold(), categories.join(", "));
    println!("{} {}", "BLAKE3:".bold(), fixture.content_hash().dimmed());

    println!("\n{}", "Expected findings:".bold());
    for finding in fixture.findings {
        println!(
            "  {:>4}  {}  {}",
            finding.line,
            expectation_marker(finding.expectation),
            finding.rule.cyan()
        );
        println!("        {}", finding.description.dimmed());
    }

    if !fixture.waivers.is_empty() {
        println!("\n{}", "Waived comments:".bold());
        for waiver in fixture.waivers {
            println!("  {:>4}  {}", waiver.line, waiver.reason.dimmed());
        }
    }

    if with_source {
        let flagged: BTreeSet<u32> = fixture.findings.iter().map(|f| f.line).collect();
        println!("\n{}", "Source:".bold());
        for (i, text) in fixture.source.lines().enumerate() {
            let number = i as u32 + 1;
            let marker = if flagged.contains(&number) {
                ">".red().bold()
            } else {
                " ".normal()
            };
            println!("{} {:>4} | {}", marker, number, text);
        }
    }
}
