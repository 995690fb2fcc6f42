//! # folios
//!
//! Document structuring and chunking for retrieval-augmented generation (RAG).
//!
//! ## The Problem
//!
//! Text pulled out of a PDF is not a document, it is a pile of pages. Each page
//! carries the same running header, words are broken across lines with
//! hyphens, and the heading structure that tells you what a paragraph is
//! *about* is just another line of text.
//!
//! Chunk that pile directly and every chunk starts with "ACME Corp Annual
//! Report", "infor-" never meets "mation", and a retrieved chunk can't say
//! which section or page it came from.
//!
//! ## The Pipeline
//!
//! ```text
//! pages ──> Normalizer ──> SectionDetector ──> Chunker ──> chunks ──> Report
//!                          (or an external
//!                           sectioner)
//! ```
//!
//! Each stage is a pure function over the previous stage's output.
//!
//! ### Normalizer
//!
//! Strips running headers and footers (first/last lines that repeat across
//! pages), repairs hyphenated line breaks, collapses whitespace.
//!
//! ### SectionDetector
//!
//! Splits pages into paragraphs and tracks a section path from heading-shaped
//! lines (`"INTRODUCTION"`, `"2.1 Retention"`). Each remaining paragraph
//! becomes a block tagged with its section path and page. An external
//! (e.g. LLM-backed) sectioner can take its place.
//!
//! ### Chunker
//!
//! Greedily packs whole paragraphs up to a character target. A section change
//! always starts a new chunk, and each chunk is seeded with the tail of the
//! previous one for context.
//!
//! ```text
//! target = 1200, overlap = 120
//!
//! Chunk 0: Root / SCOPE      pages 1..=2   [para][para][para]
//! Chunk 1: Root / SCOPE      pages 2..=3   [tail of 0][para][para]
//! Chunk 2: Root / METHODS    pages 3..=3   [tail of 1][para]
//! ```
//!
//! ### Report
//!
//! Compares chunk text volume to source text volume. Dropped heading lines
//! pull the ratio below 1.0, overlap pushes it above.
//!
//! ## Quick Start
//!
//! ```rust
//! use folios::{Page, Pipeline, PipelineConfig, Sectioning};
//!
//! let pages = vec![
//!     Page::new(1, "1 Introduction\n\nThis report covers the year."),
//!     Page::new(2, "2 Results\n\nRevenue grew."),
//! ];
//!
//! let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
//! let output = pipeline.run(&pages, Sectioning::Heuristic);
//!
//! assert_eq!(output.chunks.len(), 2);
//! assert_eq!(output.chunks[1].section.to_string(), "Root / 2 Results");
//! assert_eq!(output.chunks[1].pages(), 2..=2);
//! ```
//!
//! ## Using the Stages Directly
//!
//! ```rust
//! use folios::{chunk_blocks, detect_sections, Normalizer, Page};
//!
//! let pages = vec![Page::new(1, "SCOPE\n\nApplies to all staff.")];
//! let normalized = Normalizer::default().normalize(&pages);
//! let blocks = detect_sections(&normalized);
//! let chunks = chunk_blocks(&blocks, 400, 50);
//!
//! assert_eq!(chunks[0].text, "Applies to all staff.");
//! ```

mod batched;
mod block;
mod cache;
mod capacity;
mod chunk;
mod chunker;
mod config;
mod dataset;
mod error;
mod normalize;
mod page;
mod pipeline;
mod qa;
mod report;
mod structure;

pub use batched::{BatchedSectioner, SectionBackend, DEFAULT_BATCH_SIZE};
pub use block::{Paragraph, SectionBlock, SectionPath, PATH_SEPARATOR, ROOT_LABEL};
pub use cache::DiskCache;
pub use capacity::{ChunkBudget, DEFAULT_OVERLAP, DEFAULT_TARGET_CHARS};
pub use chunk::Chunk;
pub use chunker::{chunk_blocks, chunk_with_budget, ChunkAccumulator};
pub use config::{ChunkingConfig, NormalizeConfig, PipelineConfig, SectioningConfig};
pub use dataset::{write_chunks_jsonl, write_qa_jsonl, write_report};
pub use error::{Error, Result};
pub use normalize::{clean_text, fix_hyphenation, normalize_pages, Normalizer, DEFAULT_THRESHOLD};
pub use page::{NormalizedPage, Page, PageMeta, PageText};
pub use pipeline::{Pipeline, PipelineOutput, SectionSource};
pub use qa::{
    verify_quotes, QaBackend, QaGenerator, QaItem, QaRecord, QaRequest, QaSet, Quote,
    MAX_CONTEXT_CHARS, QUOTE_PREFIX_CHARS,
};
pub use report::{build_report, Report};
pub use structure::{
    check_completeness, detect_sections, is_heading, paragraph_stream, paragraphs,
    ParagraphSectioner, Sectioning, MAX_HEADING_CHARS,
};
