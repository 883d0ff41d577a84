//! Writing the corpus to disk for an external analyzer.
//!
//! Produces one `.cpp` file per fixture, a `manifest.json` describing the
//! expected findings, and a `compile_commands.json` so clang-tidy can be
//! pointed at the directory with `-p`.

use crate::category::CheckCategory;
use crate::corpus::Corpus;
use crate::error::{CorpusError, CorpusResult};
use crate::finding::ExpectedFinding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the manifest file written next to the fixtures.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Name of the compilation database written next to the fixtures.
pub const COMPILE_COMMANDS_FILE: &str = "compile_commands.json";

/// Compiler invocation recorded in the compilation database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// Compiler executable (first argument of each command).
    pub compiler: String,
    /// Language standard, passed as `-std=<std>`.
    pub std: String,
    /// Extra flags placed before `-c <file>`.
    pub extra_args: Vec<String>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compiler: "clang++".to_string(),
            std: "c++17".to_string(),
            extra_args: vec!["-Wall".to_string(), "-Wextra".to_string()],
        }
    }
}

/// What an export wrote.
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    /// Absolute output directory.
    pub out_dir: PathBuf,
    /// Every file written, fixtures first.
    pub files: Vec<PathBuf>,
    /// Corpus digest recorded in the manifest.
    pub digest: String,
}

/// One entry of `compile_commands.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileCommand {
    /// Working directory of the compilation.
    pub directory: String,
    /// Source file.
    pub file: String,
    /// Full command line.
    pub arguments: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ManifestDocument<'a> {
    digest: String,
    fixtures: Vec<ManifestEntry<'a>>,
}

#[derive(Debug, Serialize)]
struct ManifestEntry<'a> {
    name: &'a str,
    file: &'a str,
    hash: String,
    summary: &'a str,
    categories: &'a [CheckCategory],
    findings: &'a [ExpectedFinding],
}

fn write_file(path: &Path, contents: &[u8]) -> CorpusResult<()> {
    fs::write(path, contents).map_err(|e| CorpusError::io(path, e))
}

/// Builds the compilation database entries for `corpus` rooted at `dir`.
pub fn compile_commands(corpus: &Corpus, dir: &Path, options: &ExportOptions) -> Vec<CompileCommand> {
    corpus
        .list_fixtures()
        .iter()
        .map(|fixture| {
            let file = dir.join(fixture.file_name).to_string_lossy().into_owned();
            let mut arguments = vec![options.compiler.clone(), format!("-std={}", options.std)];
            arguments.extend(options.extra_args.iter().cloned());
            arguments.push("-c".to_string());
            arguments.push(file.clone());
            CompileCommand {
                directory: dir.to_string_lossy().into_owned(),
                file,
                arguments,
            }
        })
        .collect()
}

/// Writes every fixture plus `manifest.json` and `compile_commands.json` into `out_dir`.
///
/// The directory is created when missing; existing files are overwritten.
pub fn export_corpus(
    corpus: &Corpus,
    out_dir: &Path,
    options: &ExportOptions,
) -> CorpusResult<ExportSummary> {
    fs::create_dir_all(out_dir).map_err(|e| CorpusError::io(out_dir, e))?;
    let out_dir = fs::canonicalize(out_dir).map_err(|e| CorpusError::io(out_dir, e))?;

    let mut files = Vec::with_capacity(corpus.len() + 2);
    for fixture in corpus.list_fixtures() {
        let path = out_dir.join(fixture.file_name);
        write_file(&path, fixture.source.as_bytes())?;
        tracing::debug!(fixture = fixture.name, path = %path.display(), "wrote fixture");
        files.push(path);
    }

    let digest = corpus.digest();
    let manifest = ManifestDocument {
        digest: digest.clone(),
        fixtures: corpus
            .list_fixtures()
            .iter()
            .map(|f| ManifestEntry {
                name: f.name,
                file: f.file_name,
                hash: f.content_hash(),
                summary: f.summary,
                categories: f.categories,
                findings: f.findings,
            })
            .collect(),
    };
    let manifest_path = out_dir.join(MANIFEST_FILE);
    write_file(&manifest_path, serde_json::to_string_pretty(&manifest)?.as_bytes())?;
    files.push(manifest_path);

    let commands = compile_commands(corpus, &out_dir, options);
    let commands_path = out_dir.join(COMPILE_COMMANDS_FILE);
    write_file(&commands_path, serde_json::to_string_pretty(&commands)?.as_bytes())?;
    files.push(commands_path);

    tracing::info!(
        out_dir = %out_dir.display(),
        fixtures = corpus.len(),
        "exported corpus"
    );

    Ok(ExportSummary {
        out_dir,
        files,
        digest,
    })
}
