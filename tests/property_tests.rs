//! Property-based tests for the structuring pipeline.
//!
//! These tests verify that the stages maintain key invariants:
//! - Order: page order and block order survive into the output
//! - Coverage: chunk text exceeds source text only by overlap
//! - Idempotence: normalizing clean text changes nothing
//! - Bounds: multi-block chunks respect the target
//! - Sections: a chunk never mixes sections

use folios::{
    chunk_blocks, detect_sections, normalize_pages, Chunk, NormalizedPage, Page, PageMeta,
    SectionBlock, DEFAULT_THRESHOLD,
};
use proptest::prelude::*;

// =============================================================================
// Test Generators
// =============================================================================

/// A block's text: a letter-only word run, no newlines.
fn block_text() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::string::string_regex("[a-z]{1,12}").unwrap(), 1..20)
        .prop_map(|words| words.join(" "))
}

/// Blocks over a few sections, with non-decreasing pages.
fn blocks() -> impl Strategy<Value = Vec<SectionBlock>> {
    prop::collection::vec((0usize..3, 0u32..2, block_text()), 0..40).prop_map(|specs| {
        let mut page = 1;
        specs
            .into_iter()
            .enumerate()
            .map(|(i, (section, page_step, text))| {
                page += page_step;
                // Tag each block so its position can be recovered from chunk text.
                let tagged = format!("b{i}s{section} {text}");
                SectionBlock::new(format!("Root / S{section}"), page, tagged)
            })
            .collect()
    })
}

/// Pages of already-clean text: single-spaced words, single newlines inside
/// paragraphs, blank lines between them, and page-unique first/last lines.
fn clean_pages() -> impl Strategy<Value = Vec<Page>> {
    let paragraph = prop::collection::vec(
        prop::collection::vec(prop::string::string_regex("[a-z]{2,8}").unwrap(), 1..6)
            .prop_map(|words| words.join(" ")),
        1..4,
    )
    .prop_map(|lines| lines.join("\n"));

    prop::collection::vec(prop::collection::vec(paragraph, 1..4), 0..6).prop_map(|pages| {
        pages
            .into_iter()
            .enumerate()
            .map(|(i, paragraphs)| {
                let n = i + 1;
                let text = format!("top{n}\n{}\nend{n}", paragraphs.join("\n\n"));
                Page::new(n as u32, text)
            })
            .collect()
    })
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Index tags (`b{i}`) of the blocks that start a fragment of a chunk.
fn block_tags(chunk: &Chunk) -> Vec<usize> {
    chunk
        .text
        .split("\n\n")
        .filter_map(|part| part.strip_prefix('b'))
        .filter_map(|rest| rest.split('s').next()?.parse().ok())
        .collect()
}

// =============================================================================
// Normalizer
// =============================================================================

proptest! {
    #[test]
    fn normalize_preserves_page_order_and_count(pages in clean_pages()) {
        let out = normalize_pages(&pages, DEFAULT_THRESHOLD);
        prop_assert_eq!(out.len(), pages.len());
        for (page, norm) in pages.iter().zip(&out) {
            prop_assert_eq!(page.page_num, norm.page_num);
        }
    }

    #[test]
    fn normalize_is_identity_on_clean_text(pages in clean_pages()) {
        let out = normalize_pages(&pages, DEFAULT_THRESHOLD);
        for (page, norm) in pages.iter().zip(&out) {
            prop_assert_eq!(&page.text, &norm.text);
        }
    }

    #[test]
    fn normalize_is_idempotent(pages in clean_pages()) {
        let once = normalize_pages(&pages, DEFAULT_THRESHOLD);
        let again: Vec<Page> = once
            .iter()
            .map(|p| Page::new(p.page_num, p.text.clone()))
            .collect();
        let twice = normalize_pages(&again, DEFAULT_THRESHOLD);
        for (a, b) in once.iter().zip(&twice) {
            prop_assert_eq!(&a.text, &b.text);
        }
    }

    #[test]
    fn normalize_never_panics(texts in prop::collection::vec(".{0,200}", 0..8)) {
        let pages: Vec<Page> = texts
            .into_iter()
            .enumerate()
            .map(|(i, t)| Page::new(i as u32 + 1, t))
            .collect();
        let out = normalize_pages(&pages, DEFAULT_THRESHOLD);
        prop_assert_eq!(out.len(), pages.len());
    }
}

// =============================================================================
// SectionDetector
// =============================================================================

proptest! {
    #[test]
    fn detected_blocks_are_trimmed_and_ordered(pages in clean_pages()) {
        let normalized: Vec<NormalizedPage> = pages
            .iter()
            .map(|p| NormalizedPage {
                page_num: p.page_num,
                text: p.text.clone(),
                meta: PageMeta::default(),
            })
            .collect();
        let blocks = detect_sections(&normalized);

        for block in &blocks {
            prop_assert!(!block.text.is_empty());
            prop_assert_eq!(block.text.trim(), block.text.as_str());
            prop_assert_eq!(block.section_path.segments()[0].as_str(), "Root");
        }
        for pair in blocks.windows(2) {
            prop_assert!(pair[0].page <= pair[1].page);
        }
    }
}

// =============================================================================
// Chunker
// =============================================================================

proptest! {
    #[test]
    fn chunk_ids_contiguous_and_spans_valid(
        blocks in blocks(),
        target in 20usize..300,
        overlap in 0usize..20,
    ) {
        let chunks = chunk_blocks(&blocks, target, overlap.min(target - 1));
        for (i, chunk) in chunks.iter().enumerate() {
            prop_assert_eq!(chunk.chunk_id, i);
            prop_assert!(chunk.page_start <= chunk.page_end);
            prop_assert!(!chunk.text.is_empty());
        }
        prop_assert_eq!(chunks.is_empty(), blocks.is_empty());
    }

    #[test]
    fn chunks_follow_block_order(blocks in blocks(), target in 20usize..300) {
        let chunks = chunk_blocks(&blocks, target, 0);
        let order: Vec<usize> = chunks.iter().flat_map(block_tags).collect();
        let expected: Vec<usize> = (0..blocks.len()).collect();
        prop_assert_eq!(order, expected);
    }

    #[test]
    fn coverage_bounded_by_overlap(
        blocks in blocks(),
        target in 20usize..300,
        overlap in 0usize..20,
    ) {
        let overlap = overlap.min(target - 1);
        let chunks = chunk_blocks(&blocks, target, overlap);

        let block_chars: usize = blocks.iter().map(|b| char_len(&b.text)).sum();
        let chunk_chars: usize = chunks.iter().map(Chunk::char_len).sum();
        let bound = block_chars + 2 * blocks.len() + (overlap + 2) * chunks.len();
        prop_assert!(chunk_chars <= bound, "{} > {}", chunk_chars, bound);
    }

    #[test]
    fn multi_block_chunks_respect_target(blocks in blocks(), target in 20usize..300) {
        let chunks = chunk_blocks(&blocks, target, 0);
        for chunk in &chunks {
            if block_tags(chunk).len() > 1 {
                prop_assert!(
                    chunk.char_len() <= target,
                    "chunk of {} chars exceeds target {}",
                    chunk.char_len(),
                    target
                );
            }
        }
    }

    #[test]
    fn chunks_never_mix_sections(blocks in blocks(), target in 20usize..300) {
        let chunks = chunk_blocks(&blocks, target, 0);
        for chunk in &chunks {
            for tag in block_tags(chunk) {
                prop_assert_eq!(&blocks[tag].section_path, &chunk.section);
            }
        }
    }
}

// =============================================================================
// Consistency Tests
// =============================================================================

#[test]
fn chunking_is_deterministic() {
    let blocks: Vec<SectionBlock> = (0..30)
        .map(|i| {
            let text = "word ".repeat(i as usize + 1).trim().to_string();
            SectionBlock::new(format!("Root / S{}", i / 10), i / 5 + 1, text)
        })
        .collect();

    let first = chunk_blocks(&blocks, 120, 15);
    let second = chunk_blocks(&blocks, 120, 15);
    assert_eq!(first, second);
}
