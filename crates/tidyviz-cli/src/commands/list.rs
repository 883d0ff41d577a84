//! List command implementation
//!
//! Prints the fixtures of the embedded corpus, optionally filtered by category.

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::process::ExitCode;
use tidyviz_corpus::{CheckCategory, Corpus, Fixture};

use super::print_json;

/// One row of the list output.
#[derive(Debug, Clone, Serialize)]
pub struct FixtureSummary {
    pub name: &'static str,
    pub file: &'static str,
    pub summary: &'static str,
    pub categories: &'static [CheckCategory],
    pub findings: usize,
    pub required: usize,
}

impl From<&Fixture> for FixtureSummary {
    fn from(fixture: &Fixture) -> Self {
        Self {
            name: fixture.name,
            file: fixture.file_name,
            summary: fixture.summary,
            categories: fixture.categories,
            findings: fixture.findings.len(),
            required: fixture.required_findings().count(),
        }
    }
}

/// JSON output for the list command.
#[derive(Debug, Clone, Serialize)]
pub struct ListOutput {
    pub count: usize,
    pub fixtures: Vec<FixtureSummary>,
}

/// Collects the fixtures to list.
pub fn collect(corpus: &Corpus, category: Option<CheckCategory>) -> ListOutput {
    let fixtures: Vec<FixtureSummary> = match category {
        Some(category) => corpus
            .by_category(category)
            .into_iter()
            .map(FixtureSummary::from)
            .collect(),
        None => corpus.list_fixtures().iter().map(FixtureSummary::from).collect(),
    };
    ListOutput {
        count: fixtures.len(),
        fixtures,
    }
}

/// Run the list command.
///
/// # Arguments
/// * `category` - Only list fixtures declaring this category
/// * `json` - Emit JSON instead of text
pub fn run(category: Option<&str>, json: bool) -> Result<ExitCode> {
    let category = category
        .map(|c| c.parse::<CheckCategory>())
        .transpose()
        .map_err(anyhow::Error::msg)?;
    let output = collect(Corpus::embedded(), category);

    if json {
        print_json(&output)?;
        return Ok(ExitCode::SUCCESS);
    }

    if output.fixtures.is_empty() {
        println!("{}", "No fixtures match".yellow());
        return Ok(ExitCode::SUCCESS);
    }

    let width = output.fixtures.iter().map(|f| f.name.len()).max().unwrap_or(0);
    for fixture in &output.fixtures {
        println!(
            "{:<width$}  {:>2} findings ({} required)  {}",
            fixture.name.cyan().bold(),
            fixture.findings,
            fixture.required,
            fixture.summary.dimmed(),
            width = width
        );
    }
    println!("\n{} fixture(s)", output.count);
    Ok(ExitCode::SUCCESS)
}
