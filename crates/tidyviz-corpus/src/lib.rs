//! Immutable C++ fixture corpus for exercising clang-tidy based tooling.
//!
//! Each fixture is a small C++ translation unit seeded with known defects,
//! paired with the findings a clang-tidy run is expected to report. The
//! sources are compiled into the crate and never change at runtime.
//!
//! # Example
//!
//! ```
//! use tidyviz_corpus::{get, list_fixtures, CheckCategory};
//!
//! for fixture in list_fixtures() {
//!     println!("{}: {} findings", fixture.name, fixture.findings.len());
//! }
//!
//! let smoke = get("smoke").unwrap();
//! assert!(smoke.declares(CheckCategory::Bugprone));
//! assert!(get("no-such-fixture").unwrap_err().is_not_found());
//! ```

pub mod category;
pub mod conformance;
pub mod corpus;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod finding;
pub mod fixture;
pub mod validation;

mod manifest;

pub use category::CheckCategory;
pub use conformance::{check_fixture, CheckOptions, ConformanceReport, ConformanceSummary, Match};
pub use corpus::{get, list_fixtures, Corpus};
pub use diagnostics::{
    load_diagnostics, parse_export_fixes, parse_text, Diagnostic, DiagnosticsFormat, Severity,
};
pub use error::{CorpusError, CorpusResult};
pub use export::{export_corpus, CompileCommand, ExportOptions, ExportSummary};
pub use finding::{Expectation, ExpectedFinding};
pub use fixture::{Annotation, Fixture, Waiver};
pub use validation::{
    validate_corpus, ValidationResult, ValidationWarning, Violation, ViolationCode, WarningCode,
};
