//! Read-only fixture corpus with name lookup.

use crate::category::CheckCategory;
use crate::error::{CorpusError, CorpusResult};
use crate::fixture::Fixture;
use crate::manifest;
use std::collections::HashMap;
use std::sync::OnceLock;

/// An immutable set of named fixtures.
#[derive(Debug)]
pub struct Corpus {
    fixtures: &'static [Fixture],
    index: HashMap<&'static str, usize>,
}

impl Corpus {
    /// Builds a corpus over a static fixture table.
    ///
    /// When two fixtures share a name, lookups resolve to the first; the
    /// listing still contains both so validation can report the clash.
    pub fn from_fixtures(fixtures: &'static [Fixture]) -> Self {
        let mut index = HashMap::with_capacity(fixtures.len());
        for (i, fixture) in fixtures.iter().enumerate() {
            index.entry(fixture.name).or_insert(i);
        }
        Self { fixtures, index }
    }

    /// Returns the corpus compiled into this crate.
    pub fn embedded() -> &'static Corpus {
        static EMBEDDED: OnceLock<Corpus> = OnceLock::new();
        EMBEDDED.get_or_init(|| {
            tracing::debug!(fixtures = manifest::FIXTURES.len(), "indexing embedded corpus");
            Corpus::from_fixtures(manifest::FIXTURES)
        })
    }

    /// Returns all fixtures in listing order.
    pub fn list_fixtures(&self) -> &'static [Fixture] {
        self.fixtures
    }

    /// Looks up a fixture by name.
    pub fn get(&self, name: &str) -> CorpusResult<&'static Fixture> {
        let fixtures: &'static [Fixture] = self.fixtures;
        self.index
            .get(name)
            .map(|&i| &fixtures[i])
            .ok_or_else(|| CorpusError::NotFound(name.to_string()))
    }

    /// Looks up a fixture by its file name (e.g., "smoke.cpp").
    pub fn get_by_file_name(&self, file_name: &str) -> Option<&'static Fixture> {
        let fixtures: &'static [Fixture] = self.fixtures;
        fixtures.iter().find(|f| f.file_name == file_name)
    }

    /// Returns fixture names in listing order.
    pub fn names(&self) -> Vec<&'static str> {
        self.fixtures.iter().map(|f| f.name).collect()
    }

    /// Returns fixtures that declare `category`.
    pub fn by_category(&self, category: CheckCategory) -> Vec<&'static Fixture> {
        let fixtures: &'static [Fixture] = self.fixtures;
        fixtures.iter().filter(|f| f.declares(category)).collect()
    }

    /// Returns the number of fixtures.
    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    /// Returns true if the corpus has no fixtures.
    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }

    /// Returns the total number of expected findings.
    pub fn finding_count(&self) -> usize {
        self.fixtures.iter().map(|f| f.findings.len()).sum()
    }

    /// Returns a BLAKE3 digest over every fixture's name and source, in order.
    pub fn digest(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for fixture in self.fixtures {
            hasher.update(fixture.name.as_bytes());
            hasher.update(&[0]);
            hasher.update(&(fixture.source.len() as u64).to_le_bytes());
            hasher.update(fixture.source.as_bytes());
        }
        hasher.finalize().to_hex().to_string()
    }
}

/// Returns every fixture of the embedded corpus.
pub fn list_fixtures() -> &'static [Fixture] {
    Corpus::embedded().list_fixtures()
}

/// Looks up a fixture of the embedded corpus by name.
pub fn get(name: &str) -> CorpusResult<&'static Fixture> {
    Corpus::embedded().get(name)
}
