//! Optional JSON configuration file.
//!
//! Values from the file fill in whatever the command line leaves unset.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tidyviz_corpus::{CheckOptions, ExportOptions};

/// Configuration file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "tidyviz.json";

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    pub compiler: Option<String>,
    pub std: Option<String>,
    pub extra_args: Option<Vec<String>>,
    pub line_tolerance: Option<u32>,
    pub ignore_checks: Option<Vec<String>>,
    pub strict: Option<bool>,
}

/// Loads `explicit` if given (it must exist), else `./tidyviz.json` if present,
/// else an empty configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(path) => path,
        None => {
            let default = Path::new(DEFAULT_CONFIG_FILE);
            if !default.exists() {
                return Ok(ConfigFile::default());
            }
            default
        }
    };

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Invalid config file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?config, "config loaded");
    Ok(config)
}

pub fn parse_config(content: &str) -> Result<ConfigFile> {
    let config: ConfigFile = serde_json::from_str(content)?;
    validate(&config)?;
    Ok(config)
}

fn validate(config: &ConfigFile) -> Result<()> {
    if let Some(ref compiler) = config.compiler {
        if compiler.trim().is_empty() {
            bail!("compiler must not be empty");
        }
    }
    if let Some(ref standard) = config.std {
        if standard.trim().is_empty() || standard.starts_with("-std=") {
            bail!("std must be a bare standard name such as \"c++17\", got \"{standard}\"");
        }
    }
    Ok(())
}

impl ConfigFile {
    /// Export options with command-line overrides applied.
    pub fn export_options(&self, compiler: Option<String>, std: Option<String>) -> ExportOptions {
        let defaults = ExportOptions::default();
        ExportOptions {
            compiler: compiler
                .or_else(|| self.compiler.clone())
                .unwrap_or(defaults.compiler),
            std: std.or_else(|| self.std.clone()).unwrap_or(defaults.std),
            extra_args: self.extra_args.clone().unwrap_or(defaults.extra_args),
        }
    }

    /// Check options with command-line overrides applied.
    ///
    /// Ignore patterns from both sources are combined.
    pub fn check_options(
        &self,
        line_tolerance: Option<u32>,
        ignore_checks: &[String],
        strict: bool,
    ) -> CheckOptions {
        let mut patterns = self.ignore_checks.clone().unwrap_or_default();
        patterns.extend(ignore_checks.iter().cloned());
        CheckOptions {
            line_tolerance: line_tolerance.or(self.line_tolerance).unwrap_or(0),
            ignore_checks: patterns,
            strict: strict || self.strict.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "compiler": "g++",
            "std": "c++20",
            "extra_args": ["-O1"],
            "line_tolerance": 2,
            "ignore_checks": ["llvm-*"],
            "strict": true
        }"#;
        let config = parse_config(json).unwrap();
        assert_eq!(config.compiler.as_deref(), Some("g++"));
        assert_eq!(config.line_tolerance, Some(2));
        assert_eq!(config.strict, Some(true));
    }

    #[test]
    fn test_empty_object_is_default() {
        assert_eq!(parse_config("{}").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(parse_config(r#"{"bogus": 1}"#).is_err());
    }

    #[test]
    fn test_std_with_flag_prefix_rejected() {
        let err = parse_config(r#"{"std": "-std=c++17"}"#).unwrap_err();
        assert!(err.to_string().contains("bare standard name"));
    }

    #[test]
    fn test_empty_compiler_rejected() {
        assert!(parse_config(r#"{"compiler": " "}"#).is_err());
    }

    #[test]
    fn test_export_defaults() {
        let options = ConfigFile::default().export_options(None, None);
        assert_eq!(options, ExportOptions::default());
    }

    #[test]
    fn test_flags_override_file() {
        let file = ConfigFile {
            compiler: Some("g++".to_string()),
            std: Some("c++14".to_string()),
            extra_args: Some(vec![]),
            ..ConfigFile::default()
        };
        let options = file.export_options(None, Some("c++20".to_string()));
        assert_eq!(options.compiler, "g++");
        assert_eq!(options.std, "c++20");
        assert!(options.extra_args.is_empty());
    }

    #[test]
    fn test_check_options_merge() {
        let file = ConfigFile {
            line_tolerance: Some(1),
            ignore_checks: Some(vec!["llvm-*".to_string()]),
            strict: Some(true),
            ..ConfigFile::default()
        };
        let options = file.check_options(None, &["misc-include-cleaner".to_string()], false);
        assert_eq!(options.line_tolerance, 1);
        assert_eq!(
            options.ignore_checks,
            vec!["llvm-*".to_string(), "misc-include-cleaner".to_string()]
        );
        assert!(options.strict);

        let overridden = file.check_options(Some(3), &[], false);
        assert_eq!(overridden.line_tolerance, 3);
    }

    #[test]
    fn test_load_explicit_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(dir.path().join("missing.json").as_path())).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tidyviz.json");
        std::fs::write(&path, r#"{"line_tolerance": 4}"#).unwrap();
        assert_eq!(load_config(Some(path.as_path())).unwrap().line_tolerance, Some(4));
    }
}
