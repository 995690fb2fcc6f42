//! Batched, cached external sectioning.
//!
//! Model-backed sectioners have small context windows and cost money per
//! call, so the paragraph stream is sent in fixed-size batches and each
//! batch's answer is cached by content:
//!
//! ```text
//! paragraphs: [p0 .. p39][p40 .. p79][p80 .. p95]
//!                 |           |           |
//!              cache?      cache?      cache?
//!              hit         miss        hit
//!                 |           v           |
//!                 |       backend         |
//!                 v           v           v
//! blocks:     [....... concatenated in order .......]
//! ```

use serde::Serialize;
use tracing::debug;

use crate::structure::ParagraphSectioner;
use crate::{DiskCache, Error, Paragraph, Result, SectionBlock, SectioningConfig};

/// Default number of paragraphs per backend call.
pub const DEFAULT_BATCH_SIZE: usize = 40;

/// One call's worth of sectioning, answered by a model or service.
///
/// This is the seam for an LLM client; no wire protocol is implied.
pub trait SectionBackend: Send + Sync {
    /// Assign section paths to one batch of paragraphs.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend call fails.
    fn section_batch(&self, batch: &[Paragraph]) -> Result<Vec<SectionBlock>>;
}

/// The cache key for one batch.
#[derive(Serialize)]
struct BatchRequest<'a> {
    task: &'static str,
    batch: &'a [Paragraph],
}

/// A [`ParagraphSectioner`] that batches calls to a [`SectionBackend`] and
/// caches each batch's result.
///
/// ## Example
///
/// ```rust
/// use folios::{
///     BatchedSectioner, Paragraph, ParagraphSectioner, Result, SectionBackend, SectionBlock,
/// };
///
/// struct EverythingInRoot;
///
/// impl SectionBackend for EverythingInRoot {
///     fn section_batch(&self, batch: &[Paragraph]) -> Result<Vec<SectionBlock>> {
///         Ok(batch.iter().map(|p| SectionBlock::new("Root", p.page, p.text.clone())).collect())
///     }
/// }
///
/// let sectioner = BatchedSectioner::new(EverythingInRoot).with_batch_size(2).unwrap();
/// let paragraphs: Vec<_> = (1..=5).map(|i| Paragraph::new(i, format!("p{i}"))).collect();
/// let blocks = sectioner.sectionize(&paragraphs).unwrap();
/// assert_eq!(blocks.len(), 5);
/// ```
#[derive(Debug)]
pub struct BatchedSectioner<B> {
    backend: B,
    cache: Option<DiskCache>,
    batch_size: usize,
}

impl<B: SectionBackend> BatchedSectioner<B> {
    /// Wrap a backend with the default batch size and no cache.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            cache: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Wrap a backend with the batch size from config.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured batch size is zero.
    pub fn from_config(backend: B, config: &SectioningConfig) -> Result<Self> {
        Self::new(backend).with_batch_size(config.batch_size)
    }

    /// Cache batch results on disk.
    #[must_use]
    pub fn with_cache(mut self, cache: DiskCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Set the number of paragraphs per backend call.
    ///
    /// # Errors
    ///
    /// Returns an error if `batch_size == 0`.
    pub fn with_batch_size(mut self, batch_size: usize) -> Result<Self> {
        if batch_size == 0 {
            return Err(Error::InvalidBatchSize(batch_size));
        }
        self.batch_size = batch_size;
        Ok(self)
    }

    /// Paragraphs per backend call.
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// The wrapped backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn section_cached(&self, batch: &[Paragraph]) -> Result<Vec<SectionBlock>> {
        let Some(cache) = &self.cache else {
            return self.backend.section_batch(batch);
        };

        let request = BatchRequest {
            task: "sections",
            batch,
        };
        if let Some(blocks) = cache.get::<_, Vec<SectionBlock>>(&request)? {
            return Ok(blocks);
        }
        let blocks = self.backend.section_batch(batch)?;
        cache.put(&request, &blocks)?;
        Ok(blocks)
    }
}

impl<B: SectionBackend> ParagraphSectioner for BatchedSectioner<B> {
    fn sectionize(&self, paragraphs: &[Paragraph]) -> Result<Vec<SectionBlock>> {
        let mut blocks = Vec::with_capacity(paragraphs.len());
        for (i, batch) in paragraphs.chunks(self.batch_size).enumerate() {
            debug!(batch = i, paragraphs = batch.len(), "sectioning batch");
            blocks.extend(self.section_cached(batch)?);
        }
        Ok(blocks)
    }
}
