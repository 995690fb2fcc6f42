//! Extractive question/answer pairs per chunk.
//!
//! A [`QaBackend`] (typically a language model) proposes questions, answers,
//! and supporting quotes for one chunk. Nothing it says is trusted: a quote
//! survives only if its opening text appears verbatim in the chunk, and an
//! item survives only if at least one of its quotes does.
//!
//! ```text
//! chunk 7 ──> backend ──> [Q1: 2 quotes][Q2: 1 quote][Q3: 1 quote]
//!                               |            |            |
//!                          verify quotes against the chunk text
//!                               v            v            v
//!                         [Q1: 1 quote]   dropped    [Q3: 1 quote]
//!
//! QaSet { items: [Q1, Q3], count: 2 }
//! ```
//!
//! Results are cached per chunk id, so the key does not distinguish between
//! documents. Use one cache directory per document.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{Chunk, DiskCache, Result};

/// Chunk text beyond this many characters is not sent to the backend.
pub const MAX_CONTEXT_CHARS: usize = 8000;

/// Leading characters of a quote that must appear in the chunk text.
pub const QUOTE_PREFIX_CHARS: usize = 200;

/// A verbatim passage supporting an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    /// First page of the passage, as reported by the backend.
    pub page_start: u32,
    /// Last page of the passage, as reported by the backend.
    pub page_end: u32,
    /// The quoted text.
    #[serde(default)]
    pub text: String,
}

/// One question with its answer and supporting quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaItem {
    /// The question.
    #[serde(default)]
    pub question: String,
    /// The answer, paraphrased from the quotes.
    #[serde(default)]
    pub answer: String,
    /// Supporting quotes.
    #[serde(default)]
    pub quotes: Vec<Quote>,
}

/// Verified QA items for one chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaSet {
    /// Items with at least one verified quote.
    pub items: Vec<QaItem>,
    /// `items.len()`.
    pub count: usize,
}

impl QaSet {
    /// Build a set, filling in `count`.
    #[must_use]
    pub fn new(items: Vec<QaItem>) -> Self {
        let count = items.len();
        Self { items, count }
    }
}

/// One row of the QA dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaRecord {
    /// The chunk the items were drawn from.
    pub chunk_id: usize,
    /// The verified items.
    #[serde(flatten)]
    pub qa: QaSet,
}

/// What the backend sees for one chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaRequest<'a> {
    /// The chunk's id.
    pub chunk_id: usize,
    /// The chunk's first page.
    pub page_start: u32,
    /// The chunk's last page.
    pub page_end: u32,
    /// The chunk text, cut to [`MAX_CONTEXT_CHARS`].
    pub context: &'a str,
}

impl<'a> QaRequest<'a> {
    /// The request for a chunk.
    #[must_use]
    pub fn for_chunk(chunk: &'a Chunk) -> Self {
        Self {
            chunk_id: chunk.chunk_id,
            page_start: chunk.page_start,
            page_end: chunk.page_end,
            context: char_prefix(&chunk.text, MAX_CONTEXT_CHARS),
        }
    }
}

/// Proposes QA items for one chunk.
///
/// This is the seam for an LLM client; no wire protocol is implied.
pub trait QaBackend: Send + Sync {
    /// Propose items for the request's context.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    fn extract(&self, request: &QaRequest<'_>) -> Result<Vec<QaItem>>;
}

/// The cache key for one chunk's QA.
#[derive(Serialize)]
struct QaCacheKey {
    task: &'static str,
    chunk_id: usize,
}

/// Keep quotes whose first [`QUOTE_PREFIX_CHARS`] chars occur in `context`,
/// and items left with at least one quote.
///
/// ```rust
/// use folios::{verify_quotes, QaItem, Quote};
///
/// let item = QaItem {
///     question: "How long are records kept?".to_string(),
///     answer: "Seven years.".to_string(),
///     quotes: vec![
///         Quote { page_start: 2, page_end: 2, text: "kept for seven years".to_string() },
///         Quote { page_start: 2, page_end: 2, text: "kept forever".to_string() },
///     ],
/// };
/// let verified = verify_quotes(vec![item], "Records are kept for seven years.");
///
/// assert_eq!(verified.len(), 1);
/// assert_eq!(verified[0].quotes.len(), 1);
/// ```
#[must_use]
pub fn verify_quotes(items: Vec<QaItem>, context: &str) -> Vec<QaItem> {
    items
        .into_iter()
        .filter_map(|mut item| {
            item.quotes.retain(|q| {
                !q.text.is_empty() && context.contains(char_prefix(&q.text, QUOTE_PREFIX_CHARS))
            });
            (!item.quotes.is_empty()).then_some(item)
        })
        .collect()
}

/// Generates verified QA sets for chunks, with an optional disk cache.
///
/// ## Example
///
/// ```rust
/// use folios::{
///     Chunk, QaBackend, QaGenerator, QaItem, QaRequest, Quote, Result, SectionPath,
/// };
///
/// struct FirstSentence;
///
/// impl QaBackend for FirstSentence {
///     fn extract(&self, request: &QaRequest<'_>) -> Result<Vec<QaItem>> {
///         let sentence = request.context.split(". ").next().unwrap_or_default();
///         Ok(vec![QaItem {
///             question: "What does it open with?".to_string(),
///             answer: sentence.to_string(),
///             quotes: vec![Quote {
///                 page_start: request.page_start,
///                 page_end: request.page_end,
///                 text: sentence.to_string(),
///             }],
///         }])
///     }
/// }
///
/// let chunk = Chunk::new(0, SectionPath::root(), 1, 1, "Records are kept. Holds apply.");
/// let qa = QaGenerator::new(FirstSentence).generate(&chunk).unwrap();
/// assert_eq!(qa.count, 1);
/// assert_eq!(qa.items[0].answer, "Records are kept");
/// ```
#[derive(Debug)]
pub struct QaGenerator<B> {
    backend: B,
    cache: Option<DiskCache>,
}

impl<B: QaBackend> QaGenerator<B> {
    /// Wrap a backend with no cache.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: None,
        }
    }

    /// Cache verified results on disk, keyed by chunk id.
    #[must_use]
    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Verified QA for one chunk.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails or the cache cannot be used.
    pub fn generate(&self, chunk: &Chunk) -> Result<QaSet> {
        let key = QaCacheKey {
            task: "qa",
            chunk_id: chunk.chunk_id,
        };
        if let Some(cache) = &self.cache {
            if let Some(cached) = cache.get::<_, QaSet>(&key)? {
                return Ok(cached);
            }
        }

        let proposed = self.backend.extract(&QaRequest::for_chunk(chunk))?;
        let proposed_len = proposed.len();
        let qa = QaSet::new(verify_quotes(proposed, &chunk.text));
        debug!(
            chunk_id = chunk.chunk_id,
            proposed = proposed_len,
            kept = qa.count,
            "verified qa items"
        );

        if let Some(cache) = &self.cache {
            cache.put(&key, &qa)?;
        }
        Ok(qa)
    }

    /// QA records for every chunk. A chunk whose QA fails is logged and
    /// skipped.
    #[must_use]
    pub fn generate_all(&self, chunks: &[Chunk]) -> Vec<QaRecord> {
        chunks
            .iter()
            .filter_map(|chunk| match self.generate(chunk) {
                Ok(qa) => Some(QaRecord {
                    chunk_id: chunk.chunk_id,
                    qa,
                }),
                Err(err) => {
                    warn!(chunk_id = chunk.chunk_id, error = %err, "qa failed for chunk");
                    None
                }
            })
            .collect()
    }
}

/// The first `n` chars of `text`.
fn char_prefix(text: &str, n: usize) -> &str {
    text.char_indices().nth(n).map_or(text, |(end, _)| &text[..end])
}
