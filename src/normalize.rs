//! Page-level text cleanup.
//!
//! Extracted PDF text is noisy in predictable ways:
//!
//! ```text
//! "ACME Corp Annual Report\n"        <- running header, on every page
//! "The infor-\nmation   flows\r\n"   <- hyphen break, space runs, CR
//! "\n\n\n\n"                         <- layout gaps
//! "Page 4\n"                         <- running footer
//! ```
//!
//! Cleanup runs in a fixed order:
//!
//! 1. Strip running headers and footers (document-wide frequency analysis).
//! 2. Turn carriage returns into newlines.
//! 3. Join words broken by a hyphen at a line end.
//! 4. Collapse space/tab runs to one space, and 3+ newlines to one blank line.
//! 5. Trim.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, NormalizedPage, Page, Result};

/// Default header/footer frequency threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.6;

/// Every line boundary: CRLF, LF, CR, VT, FF, FS/GS/RS, NEL, LS, PS.
static LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\r\n|[\n\x0B\x0C\r\x1C-\x1E\x{85}\x{2028}\x{2029}]")
        .expect("valid line break regex")
});

static HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w+)-\n(\w+)").expect("valid hyphen break regex"));

static SPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]+").expect("valid space run regex"));

static NEWLINE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline run regex"));

/// Page normalizer.
///
/// ## Example
///
/// ```rust
/// use folios::{Normalizer, Page};
///
/// let pages = vec![
///     Page::new(1, "Confidential Draft\nThe infor-\nmation flows."),
///     Page::new(2, "Confidential Draft\nSecond   page."),
/// ];
/// let normalized = Normalizer::default().normalize(&pages);
///
/// assert_eq!(normalized[0].text, "The information flows.");
/// assert_eq!(normalized[1].text, "Second page.");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    threshold: f64,
}

impl Normalizer {
    /// Create a normalizer with a header/footer frequency threshold.
    ///
    /// A first (or last) line counts as a running header (or footer) when it
    /// occurs on at least `threshold` times as many pages as the most frequent
    /// first (or last) line, and on at least two pages.
    ///
    /// # Errors
    ///
    /// Returns an error if `threshold` is not within `0.0..=1.0`.
    pub fn new(threshold: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(Error::InvalidThreshold(threshold));
        }
        Ok(Self { threshold })
    }

    /// The header/footer frequency threshold.
    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Normalize every page. Output has the same length and order as input.
    #[must_use]
    pub fn normalize(&self, pages: &[Page]) -> Vec<NormalizedPage> {
        normalize_pages(pages, self.threshold)
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Normalize pages with the given header/footer threshold.
///
/// The threshold is not validated here; see [`Normalizer::new`].
#[must_use]
pub fn normalize_pages(pages: &[Page], threshold: f64) -> Vec<NormalizedPage> {
    strip_headers_footers(pages, threshold)
        .into_iter()
        .zip(pages)
        .map(|(text, page)| NormalizedPage {
            page_num: page.page_num,
            text: clean_text(&text),
            meta: page.meta,
        })
        .collect()
}

/// Clean one page's text (steps 2-5, no header/footer analysis).
///
/// ```rust
/// use folios::clean_text;
///
/// assert_eq!(clean_text("infor-\nmation flows"), "information flows");
/// assert_eq!(clean_text("a\t\t b\n\n\n\nc\r"), "a b\n\nc");
/// ```
#[must_use]
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\r', "\n");
    let text = fix_hyphenation(&text);
    let text = SPACE_RUN.replace_all(&text, " ");
    let text = NEWLINE_RUN.replace_all(&text, "\n\n");
    text.trim().to_string()
}

/// Join words split by a hyphen at a line end: `"infor-\nmation"` -> `"information"`.
#[must_use]
pub fn fix_hyphenation(text: &str) -> String {
    HYPHEN_BREAK.replace_all(text, "${1}${2}").into_owned()
}

/// Drop running headers and footers, returning each page's remaining text.
///
/// Only a page's literal first and last lines are candidates, compared
/// after trimming.
fn strip_headers_footers(pages: &[Page], threshold: f64) -> Vec<String> {
    let page_lines: Vec<Vec<&str>> = pages.iter().map(|p| split_lines(&p.text)).collect();

    let mut first_counts: HashMap<&str, usize> = HashMap::new();
    let mut last_counts: HashMap<&str, usize> = HashMap::new();
    for lines in &page_lines {
        let mut non_blank = lines.iter().map(|l| l.trim()).filter(|l| !l.is_empty());
        let Some(first) = non_blank.next() else {
            continue;
        };
        let last = non_blank.last().unwrap_or(first);
        *first_counts.entry(first).or_default() += 1;
        *last_counts.entry(last).or_default() += 1;
    }

    let common_first = common_lines(&first_counts, threshold);
    let common_last = common_lines(&last_counts, threshold);

    page_lines
        .iter()
        .map(|lines| {
            let last_idx = lines.len().saturating_sub(1);
            lines
                .iter()
                .enumerate()
                .filter(|&(idx, line)| {
                    let line = line.trim();
                    !((idx == 0 && common_first.contains(line))
                        || (idx == last_idx && common_last.contains(line)))
                })
                .map(|(_, line)| *line)
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect()
}

/// Lines that repeat often enough to be running headers or footers.
fn common_lines<'a>(counts: &HashMap<&'a str, usize>, threshold: f64) -> HashSet<&'a str> {
    let Some(&max_count) = counts.values().max() else {
        return HashSet::new();
    };
    let cutoff = max_count as f64 * threshold;
    counts
        .iter()
        .filter(|&(_, &count)| count >= 2 && count as f64 >= cutoff)
        .map(|(&line, _)| line)
        .collect()
}

/// Split on any line break. A trailing break does not open an empty last line.
fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<&str> = LINE_BREAK.split(text).collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}
