//! The Chunk type: retrieval-sized text with provenance.

use serde::{Deserialize, Serialize};

use crate::SectionPath;

/// A chunk of document text with the section and pages it came from.
///
/// ## Provenance
///
/// `section` is the section of the block(s) that most recently contributed to
/// the chunk, and `page_start..=page_end` is the span of pages those blocks
/// came from:
///
/// ```rust
/// use folios::{Chunk, SectionPath};
///
/// let chunk = Chunk::new(0, SectionPath::root().child("SCOPE"), 3, 4, "Spans a page break.");
/// assert_eq!(chunk.pages(), 3..=4);
/// assert_eq!(chunk.char_len(), 19);
/// ```
///
/// ## Overlap
///
/// A chunk may begin with the tail of the previous chunk. That carried-over
/// text is attributed to this chunk's section and pages, not its origin:
///
/// ```text
/// Chunk 0: "...the retention period is seven years."   pages 4..=4
/// Chunk 1: "is seven years.\n\nArchived records..."    pages 5..=5
///           ^^^^^^^^^^^^^^^
///           overlap from chunk 0
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Zero-based, contiguous position of this chunk in the sequence.
    pub chunk_id: usize,
    /// Section path of the most recent contributing block.
    pub section: SectionPath,
    /// First page contributing to this chunk.
    pub page_start: u32,
    /// Last page contributing to this chunk.
    pub page_end: u32,
    /// Contributing block texts joined by a blank line.
    pub text: String,
}

impl Chunk {
    /// Create a new chunk.
    #[must_use]
    pub fn new(
        chunk_id: usize,
        section: SectionPath,
        page_start: u32,
        page_end: u32,
        text: impl Into<String>,
    ) -> Self {
        Self {
            chunk_id,
            section,
            page_start,
            page_end,
            text: text.into(),
        }
    }

    /// The length of this chunk in characters.
    #[must_use]
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether this chunk is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// The page span of this chunk.
    #[must_use]
    pub fn pages(&self) -> std::ops::RangeInclusive<u32> {
        self.page_start..=self.page_end
    }
}

impl std::fmt::Display for Chunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chunk {{ id: {}, section: {}, pages: {}..={}, chars: {} }}",
            self.chunk_id,
            self.section,
            self.page_start,
            self.page_end,
            self.char_len()
        )
    }
}
