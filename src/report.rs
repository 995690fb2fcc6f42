//! Coverage report: how much source text survived into the chunks.

use serde::{Deserialize, Serialize};

use crate::{Chunk, PageText};

/// Coverage statistics for one run.
///
/// `coverage_ratio` is `chunk_chars / source_chars`, rounded to 3 decimals.
/// Heading lines dropped by section detection push it below 1.0; overlap
/// pushes it above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Number of pages.
    pub pages: usize,
    /// Number of chunks.
    pub chunks: usize,
    /// Total characters of page text.
    pub source_chars: usize,
    /// Total characters of chunk text.
    pub chunk_chars: usize,
    /// `chunk_chars / source_chars`, or 0.0 when there is no source text.
    pub coverage_ratio: f64,
}

/// Build a coverage report.
///
/// ```rust
/// use folios::{build_report, Chunk, Page, SectionPath};
///
/// let pages = vec![Page::new(1, "abcd")];
/// let chunks = vec![Chunk::new(0, SectionPath::root(), 1, 1, "abc")];
/// let report = build_report(&pages, &chunks);
///
/// assert_eq!(report.source_chars, 4);
/// assert_eq!(report.chunk_chars, 3);
/// assert_eq!(report.coverage_ratio, 0.75);
/// ```
#[must_use]
pub fn build_report<P: PageText>(pages: &[P], chunks: &[Chunk]) -> Report {
    let source_chars: usize = pages.iter().map(|p| p.text().chars().count()).sum();
    let chunk_chars: usize = chunks.iter().map(Chunk::char_len).sum();
    let coverage_ratio = if source_chars == 0 {
        0.0
    } else {
        round3(chunk_chars as f64 / source_chars as f64)
    };

    Report {
        pages: pages.len(),
        chunks: chunks.len(),
        source_chars,
        chunk_chars,
        coverage_ratio,
    }
}

/// Round to 3 decimals, ties to even.
fn round3(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Page, SectionPath};

    #[test]
    fn test_empty_source() {
        let report = build_report::<Page>(&[], &[]);
        assert_eq!(report.pages, 0);
        assert_eq!(report.chunks, 0);
        assert_eq!(report.coverage_ratio, 0.0);
    }

    #[test]
    fn test_zero_source_chars_with_chunks() {
        let pages = [Page::new(1, "")];
        let chunks = [Chunk::new(0, SectionPath::root(), 1, 1, "x")];
        assert_eq!(build_report(&pages, &chunks).coverage_ratio, 0.0);
    }

    #[test]
    fn test_ratio_rounded_to_three_decimals() {
        let pages = [Page::new(1, "abc")];
        let chunks = [Chunk::new(0, SectionPath::root(), 1, 1, "ab")];
        assert_eq!(build_report(&pages, &chunks).coverage_ratio, 0.667);
    }

    #[test]
    fn test_ratio_ties_round_to_even() {
        let pages = [Page::new(1, "x".repeat(16))];
        let one = [Chunk::new(0, SectionPath::root(), 1, 1, "x")];
        let five = [Chunk::new(0, SectionPath::root(), 1, 1, "xxxxx")];
        assert_eq!(build_report(&pages, &one).coverage_ratio, 0.062);
        assert_eq!(build_report(&pages, &five).coverage_ratio, 0.312);
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let pages = [Page::new(1, "日本語日本語")];
        let chunks = [Chunk::new(0, SectionPath::root(), 1, 1, "日本語")];
        let report = build_report(&pages, &chunks);
        assert_eq!(report.source_chars, 6);
        assert_eq!(report.coverage_ratio, 0.5);
    }

    #[test]
    fn test_serialized_field_names() {
        let report = build_report(&[Page::new(1, "ab")], &[]);
        let value = serde_json::to_value(report).unwrap();
        for key in ["pages", "chunks", "source_chars", "chunk_chars", "coverage_ratio"] {
            assert!(value.get(key).is_some(), "missing {key}");
        }
    }
}
