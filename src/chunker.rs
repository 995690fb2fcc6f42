//! Greedy boundary-aware chunking with overlap.
//!
//! Whole paragraphs are packed into a buffer until the next one would pass the
//! target, then the buffer is flushed as a chunk.
//!
//! ## How It Works
//!
//! ```text
//! target = 100, overlap = 10
//!
//! Blocks:  [A: 40][A: 40][A: 30][B: 20]
//!
//! A:40   buffer 42                  (each block costs len + 2)
//! A:40   buffer 84
//! A:30   84 + 32 > 100  -> flush chunk 0 = A40 + A40, seed 10-char tail
//!        buffer 10 + 32 = 42
//! B:20   section changed -> flush chunk 1 = tail + A30, seed tail
//!        buffer 10 + 22 = 32
//! end    flush chunk 2 = tail + B20
//! ```
//!
//! ## Rules
//!
//! 1. A block from a different section flushes a non-empty buffer first.
//! 2. A block that would push the buffer past the target flushes first.
//! 3. A single block larger than the target still goes in whole; it is
//!    flushed by the next block or at the end.
//! 4. After each flush the buffer is re-seeded with the last `overlap`
//!    characters of the flushed text.
//!
//! ## Overlap Provenance
//!
//! The seeded tail carries no page or section of its own. It is attributed to
//! whatever block arrives next, so a chunk's `page_start` can be later than the
//! page its first characters came from.
//!
//! The page span is extended before the size check, so a chunk flushed because
//! the next block did not fit records that block's page as its `page_end`.

use crate::capacity::{would_overflow, SEPARATOR_CHARS};
use crate::{Chunk, ChunkBudget, SectionBlock, SectionPath};

/// Chunk blocks with a validated budget.
///
/// ## Example
///
/// ```rust
/// use folios::{chunk_with_budget, ChunkBudget, SectionBlock};
///
/// let blocks = vec![
///     SectionBlock::new("Root / SCOPE", 1, "First paragraph."),
///     SectionBlock::new("Root / SCOPE", 2, "Second paragraph."),
/// ];
/// let chunks = chunk_with_budget(&blocks, ChunkBudget::default());
///
/// assert_eq!(chunks.len(), 1);
/// assert_eq!(chunks[0].text, "First paragraph.\n\nSecond paragraph.");
/// assert_eq!(chunks[0].pages(), 1..=2);
/// ```
#[must_use]
pub fn chunk_with_budget(blocks: &[SectionBlock], budget: ChunkBudget) -> Vec<Chunk> {
    chunk_blocks(blocks, budget.target_chars(), budget.overlap())
}

/// Chunk blocks into overlapping, section-aware chunks.
///
/// `target_chars` and `overlap` are not validated; use [`ChunkBudget`] for
/// that. Degenerate values never panic: a zero target flushes on every block.
#[must_use]
pub fn chunk_blocks(blocks: &[SectionBlock], target_chars: usize, overlap: usize) -> Vec<Chunk> {
    blocks
        .iter()
        .fold(ChunkAccumulator::new(target_chars, overlap), ChunkAccumulator::push)
        .finish()
}

/// Running state of one chunking pass.
///
/// Threaded by value through a fold over the blocks, so each step is
/// `accumulator + block -> accumulator`.
#[derive(Debug, Clone)]
pub struct ChunkAccumulator {
    target_chars: usize,
    overlap: usize,
    buffer: Vec<String>,
    buffer_len: usize,
    section: Option<SectionPath>,
    span: Option<(u32, u32)>,
    chunks: Vec<Chunk>,
}

impl ChunkAccumulator {
    /// Start an empty pass.
    #[must_use]
    pub fn new(target_chars: usize, overlap: usize) -> Self {
        Self {
            target_chars,
            overlap,
            buffer: Vec::new(),
            buffer_len: 0,
            section: None,
            span: None,
            chunks: Vec::new(),
        }
    }

    /// Consume one block.
    #[must_use]
    pub fn push(mut self, block: &SectionBlock) -> Self {
        if self.buffer_len > 0 && self.section.as_ref() != Some(&block.section_path) {
            self.flush();
        }
        self.section = Some(block.section_path.clone());

        self.span = Some(match self.span {
            Some((start, _)) => (start, block.page),
            None => (block.page, block.page),
        });

        let block_len = block.text.chars().count();
        if would_overflow(self.target_chars, self.buffer_len, block_len) {
            self.flush();
            self.section = Some(block.section_path.clone());
            self.span = Some((block.page, block.page));
        }

        self.buffer.push(block.text.clone());
        self.buffer_len += block_len + SEPARATOR_CHARS;
        self
    }

    /// Flush what remains and return the chunks.
    #[must_use]
    pub fn finish(mut self) -> Vec<Chunk> {
        self.flush();
        self.chunks
    }

    /// Chunks emitted so far.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Characters currently buffered, separators included.
    #[must_use]
    pub fn buffered_len(&self) -> usize {
        self.buffer_len
    }

    fn flush(&mut self) {
        if self.buffer_len == 0 {
            return;
        }
        // Every flush with a non-empty buffer follows a block, which sets the span.
        let Some((page_start, page_end)) = self.span.take() else {
            return;
        };

        let text = self.buffer.join("\n\n").trim().to_string();
        let section = self.section.clone().unwrap_or_default();

        self.buffer.clear();
        self.buffer_len = 0;
        if self.overlap > 0 {
            if let Some(tail) = char_tail(&text, self.overlap) {
                self.buffer.push(tail.to_string());
                self.buffer_len = self.overlap;
            }
        }

        let chunk_id = self.chunks.len();
        self.chunks
            .push(Chunk::new(chunk_id, section, page_start, page_end, text));
    }
}

/// The last `n` chars of `text`, if `text` is longer than `n` chars.
fn char_tail(text: &str, n: usize) -> Option<&str> {
    if n == 0 {
        return None;
    }
    let (start, _) = text.char_indices().rev().nth(n)?;
    let tail_start = start + text[start..].chars().next().map_or(0, char::len_utf8);
    Some(&text[tail_start..])
}
