//! Fixture type.

use crate::category::CheckCategory;
use crate::finding::ExpectedFinding;
use serde::Serialize;

/// Lowercase comment fragments that mark a comment as naming a defect.
pub const DEFECT_MARKERS: &[&str] = &[
    "should",
    "warning",
    "violates",
    "undefined behavior",
    "what does",
    "bad",
    "unused",
    "leak",
    "missing",
    "could use",
    "inefficient",
    "unnecessary",
    "instead of",
    "c-style",
    "manual memory",
    "potential",
    "complex expression",
    "no reserve",
];

/// A defect comment that intentionally has no expected finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Waiver {
    /// Line of the comment.
    pub line: u32,
    /// Why no finding is expected there.
    pub reason: &'static str,
}

impl Waiver {
    pub const fn new(line: u32, reason: &'static str) -> Self {
        Self { line, reason }
    }
}

/// A source comment that names a defect, with the lines it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Annotation {
    /// Line of the comment.
    pub line: u32,
    /// Comment text without the leading `//`.
    pub text: &'static str,
    /// First line the comment describes.
    pub first: u32,
    /// Last line the comment describes.
    pub last: u32,
}

impl Annotation {
    /// Returns true if `line` lies within the described lines.
    pub fn covers(&self, line: u32) -> bool {
        (self.first..=self.last).contains(&line)
    }
}

/// A sample C++ source file with known, intentional defects.
///
/// Fixtures are `'static` data compiled into the crate; nothing hands out a
/// mutable one.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Fixture {
    /// Unique fixture name (e.g., "bugprone").
    pub name: &'static str,

    /// File name on disk, always `<name>.cpp`.
    pub file_name: &'static str,

    /// One-line summary of what the fixture exercises.
    pub summary: &'static str,

    /// Check categories the fixture is designed to trigger.
    pub categories: &'static [CheckCategory],

    /// Expected findings ordered by line.
    pub findings: &'static [ExpectedFinding],

    /// Defect comments that deliberately carry no finding.
    pub waivers: &'static [Waiver],

    /// Source text.
    #[serde(skip)]
    pub source: &'static str,
}

impl Fixture {
    /// Returns the source text.
    pub fn source(&self) -> &'static str {
        self.source
    }

    /// Returns the 1-based line `number`, without its terminator.
    pub fn line(&self, number: u32) -> Option<&'static str> {
        let index = (number as usize).checked_sub(1)?;
        self.source.lines().nth(index)
    }

    /// Returns the number of lines in the source.
    pub fn line_count(&self) -> usize {
        self.source.lines().count()
    }

    /// Returns the BLAKE3 hash of the source bytes as lowercase hex.
    pub fn content_hash(&self) -> String {
        blake3::hash(self.source.as_bytes()).to_hex().to_string()
    }

    /// Returns true if the fixture declares `category`.
    pub fn declares(&self, category: CheckCategory) -> bool {
        self.categories.contains(&category)
    }

    /// Returns the findings belonging to `category`.
    pub fn findings_in(&self, category: CheckCategory) -> impl Iterator<Item = &'static ExpectedFinding> {
        let findings: &'static [ExpectedFinding] = self.findings;
        findings.iter().filter(move |f| f.category == category)
    }

    /// Returns the findings a stock analyzer run must report.
    pub fn required_findings(&self) -> impl Iterator<Item = &'static ExpectedFinding> {
        let findings: &'static [ExpectedFinding] = self.findings;
        findings.iter().filter(|f| f.is_required())
    }

    /// Returns the comments that name a defect, in source order.
    ///
    /// A trailing comment describes its own line and one line either side.
    /// A standalone comment describes the paragraph it opens, or the whole
    /// item when it sits directly above a top-level declaration. A standalone
    /// comment right before a closing brace describes the paragraph above it.
    pub fn annotations(&self) -> Vec<Annotation> {
        let lines: Vec<&'static str> = self.source.lines().collect();
        let mut annotations = Vec::new();

        for (index, text) in lines.iter().copied().enumerate() {
            let Some((code, comment)) = text.split_once("//") else {
                continue;
            };
            let comment = comment.trim();
            let lowered = comment.to_lowercase();
            if !DEFECT_MARKERS.iter().any(|marker| lowered.contains(marker)) {
                continue;
            }

            let line = index + 1;
            let (first, last) = if code.trim().is_empty() {
                comment_scope(&lines, index)
            } else {
                (line - 1, line + 1)
            };
            annotations.push(Annotation {
                line: line as u32,
                text: comment,
                first: first as u32,
                last: last as u32,
            });
        }
        annotations
    }

    /// Returns the annotations with no finding in their lines and no waiver.
    pub fn unrecorded_annotations(&self) -> Vec<Annotation> {
        self.annotations()
            .into_iter()
            .filter(|a| !self.findings.iter().any(|f| a.covers(f.line)))
            .filter(|a| !self.waivers.iter().any(|w| w.line == a.line))
            .collect()
    }

    /// Converts a byte offset into a 1-based (line, column) pair.
    ///
    /// Returns `None` when the offset lies past the end of the source.
    pub fn position_of(&self, offset: usize) -> Option<(u32, u32)> {
        if offset > self.source.len() {
            return None;
        }
        let before = &self.source.as_bytes()[..offset];
        let line = before.iter().filter(|b| **b == b'\n').count() + 1;
        let line_start = before
            .iter()
            .rposition(|b| *b == b'\n')
            .map(|i| i + 1)
            .unwrap_or(0);
        Some((line as u32, (offset - line_start + 1) as u32))
    }
}

/// 1-based first and last line described by the standalone comment at `index`.
fn comment_scope(lines: &[&str], index: usize) -> (usize, usize) {
    let blank = |i: usize| lines.get(i).map_or(true, |l| l.trim().is_empty());
    let line = index + 1;

    match lines.get(index + 1) {
        Some(next) if next.trim_start().starts_with('}') => {
            let mut start = index;
            while start > 0 && blank(start - 1) {
                start -= 1;
            }
            while start > 0 && !blank(start - 1) {
                start -= 1;
            }
            (start + 1, line)
        }
        Some(next) if next.starts_with(|c: char| !c.is_whitespace()) && !next.starts_with("//") => {
            let end = (index + 1..lines.len())
                .find(|&i| lines[i].starts_with('}'))
                .unwrap_or(lines.len() - 1);
            (line - 1, end + 1)
        }
        _ => {
            let mut end = index;
            while !blank(end + 1) {
                end += 1;
            }
            (line - 1, end + 1)
        }
    }
}
