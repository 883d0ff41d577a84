//! Export command implementation
//!
//! Writes the corpus, its manifest and a compilation database to a directory.

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use tidyviz_corpus::{export_corpus, Corpus, ExportOptions};

/// Run the export command.
///
/// # Arguments
/// * `out_dir` - Destination directory, created if missing
/// * `options` - Compiler invocation recorded in `compile_commands.json`
pub fn run(out_dir: &str, options: &ExportOptions) -> Result<ExitCode> {
    let corpus = Corpus::embedded();
    let summary = export_corpus(corpus, Path::new(out_dir), options)
        .with_context(|| format!("Failed to export corpus to {}", out_dir))?;

    println!(
        "{} {} fixture(s) to {}",
        "Exported".green().bold(),
        corpus.len(),
        summary.out_dir.display()
    );
    for file in &summary.files {
        println!("  {} {}", "+".green(), file.display());
    }
    println!(
        "\n{} {} -std={} {}",
        "Compiler:".bold(),
        options.compiler,
        options.std,
        options.extra_args.join(" ")
    );
    println!("{} {}", "Digest:".bold(), summary.digest.dimmed());
    println!(
        "\nRun: clang-tidy -p {} {}",
        summary.out_dir.display(),
        summary.out_dir.join("<fixture>.cpp").display()
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_into_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("corpus");
        run(out.to_str().unwrap(), &ExportOptions::default()).unwrap();
        assert!(out.join("smoke.cpp").is_file());
        assert!(out.join("manifest.json").is_file());
        assert!(out.join("compile_commands.json").is_file());
    }

    #[test]
    fn test_export_failure_has_context() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let err = run(blocker.to_str().unwrap(), &ExportOptions::default()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to export corpus"));
    }
}
