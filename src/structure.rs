//! Section detection: pages to ordered, section-tagged paragraph blocks.
//!
//! ## The Heuristic
//!
//! Pages are split into paragraphs on blank lines. A paragraph whose first
//! line looks like a heading is consumed as a section label; every other
//! paragraph becomes a [`SectionBlock`] under the current label.
//!
//! ```text
//! "1.1 Overview"              heading  -> path = Root / 1.1 Overview
//! "This chapter covers..."    block    (Root / 1.1 Overview, page 1)
//! "SCOPE AND PURPOSE"         heading  -> path = Root / SCOPE AND PURPOSE
//! "Applies to all staff."     block    (Root / SCOPE AND PURPOSE, page 2)
//! ```
//!
//! Two line shapes count as headings:
//!
//! - all caps, at least 4 chars of `A-Z 0-9 , ; : ' " ( ) / -`
//! - a dotted number (`2`, `2.1`, `2.1.3`), whitespace, then 4+ more chars
//!
//! The label persists across pages until the next heading.
//!
//! ## Swapping in Another Sectioner
//!
//! The heuristic is one of two interchangeable ways to produce blocks.
//! [`Sectioning::External`] hands the flattened paragraph stream to any
//! [`ParagraphSectioner`] (typically LLM-backed) instead. Its output must keep
//! paragraph order and text; [`check_completeness`] verifies that.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, NormalizedPage, Paragraph, Result, SectionBlock, SectionPath};

/// Headings longer than this are truncated when used as a label.
pub const MAX_HEADING_CHARS: usize = 120;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:[A-Z][A-Z0-9 ,;:'"()/-]{3,}|[0-9]+(?:\.[0-9]+)*[^\S\r\n].{3,})$"#)
        .expect("valid heading regex")
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid paragraph break regex"));

/// Whether a line looks like a section heading.
///
/// ```rust
/// use folios::is_heading;
///
/// assert!(is_heading("INTRODUCTION"));
/// assert!(is_heading("1.2.3 Scope of work"));
/// assert!(!is_heading("Introduction"));
/// assert!(!is_heading("THE END."));
/// ```
#[must_use]
pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// Split text into trimmed, non-empty paragraphs.
pub fn paragraphs(text: &str) -> impl Iterator<Item = &str> {
    PARAGRAPH_BREAK
        .split(text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

/// Detect sections with the line-pattern heuristic.
///
/// ## Example
///
/// ```rust
/// use folios::{detect_sections, NormalizedPage, PageMeta};
///
/// let pages = vec![NormalizedPage {
///     page_num: 1,
///     text: "1.1 Overview\n\nThis chapter covers the basics.".to_string(),
///     meta: PageMeta::default(),
/// }];
/// let blocks = detect_sections(&pages);
///
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].section_path.to_string(), "Root / 1.1 Overview");
/// assert_eq!(blocks[0].text, "This chapter covers the basics.");
/// ```
#[must_use]
pub fn detect_sections(pages: &[NormalizedPage]) -> Vec<SectionBlock> {
    let mut blocks = Vec::new();
    let mut current = SectionPath::root();

    for page in pages {
        for para in paragraphs(&page.text) {
            // Matched untrimmed: trailing spaces still satisfy the caps pattern.
            let first_line = para.split('\n').next().unwrap_or(para);
            if is_heading(first_line) {
                let label: String = first_line.trim().chars().take(MAX_HEADING_CHARS).collect();
                current = SectionPath::root().child(label);
                continue;
            }
            blocks.push(SectionBlock::new(current.clone(), page.page_num, para));
        }
    }

    blocks
}

/// Flatten pages into the page-numbered paragraph stream an external
/// sectioner consumes.
#[must_use]
pub fn paragraph_stream(pages: &[NormalizedPage]) -> Vec<Paragraph> {
    pages
        .iter()
        .flat_map(|page| paragraphs(&page.text).map(move |p| Paragraph::new(page.page_num, p)))
        .collect()
}

/// A sectioner that assigns section paths to a paragraph stream.
///
/// Implementations must return blocks in paragraph order and must neither
/// drop nor invent text. They may regroup paragraphs, as long as the
/// concatenated text survives.
pub trait ParagraphSectioner: Send + Sync {
    /// Assign section paths to the paragraphs.
    ///
    /// # Errors
    ///
    /// Implementations return an error when the backing service fails.
    fn sectionize(&self, paragraphs: &[Paragraph]) -> Result<Vec<SectionBlock>>;
}

/// How to turn normalized pages into section blocks.
///
/// ```rust
/// use folios::{NormalizedPage, PageMeta, Sectioning};
///
/// let pages = vec![NormalizedPage {
///     page_num: 1,
///     text: "SCOPE\n\nApplies to all staff.".to_string(),
///     meta: PageMeta::default(),
/// }];
/// let blocks = Sectioning::Heuristic.section(&pages).unwrap();
/// assert_eq!(blocks[0].section_path.to_string(), "Root / SCOPE");
/// ```
#[derive(Clone, Copy, Default)]
pub enum Sectioning<'a> {
    /// Line-pattern heading detection.
    #[default]
    Heuristic,
    /// An external sectioner over the paragraph stream.
    External(&'a dyn ParagraphSectioner),
}

impl Sectioning<'_> {
    /// Produce section blocks.
    ///
    /// # Errors
    ///
    /// Only the external variant fails: when the sectioner errors or its
    /// output fails [`check_completeness`].
    pub fn section(&self, pages: &[NormalizedPage]) -> Result<Vec<SectionBlock>> {
        match self {
            Self::Heuristic => Ok(detect_sections(pages)),
            Self::External(sectioner) => {
                let paragraphs = paragraph_stream(pages);
                let blocks = sectioner.sectionize(&paragraphs)?;
                check_completeness(&paragraphs, &blocks)?;
                Ok(blocks)
            }
        }
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::External(_) => "external",
        }
    }
}

impl std::fmt::Debug for Sectioning<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that blocks carry exactly the paragraphs' text, in order.
///
/// Whitespace is ignored, so a sectioner may re-split or re-join paragraphs.
///
/// # Errors
///
/// Returns [`Error::IncompleteSectioning`] when text was dropped, invented,
/// or reordered.
pub fn check_completeness(paragraphs: &[Paragraph], blocks: &[SectionBlock]) -> Result<()> {
    let expected = paragraphs.iter().flat_map(|p| p.text.chars()).filter(|c| !c.is_whitespace());
    let actual = blocks.iter().flat_map(|b| b.text.chars()).filter(|c| !c.is_whitespace());
    if expected.clone().eq(actual.clone()) {
        return Ok(());
    }
    Err(Error::IncompleteSectioning {
        expected: expected.count(),
        actual: actual.count(),
    })
}
