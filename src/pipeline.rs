//! End-to-end orchestration: pages in, chunks and a report out.
//!
//! ```text
//! pages -> normalize -> section -> chunk -> report
//!                          |
//!            external sectioner fails or loses text?
//!                          |
//!                          v
//!                 warn, use the heuristic
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    build_report, chunk_with_budget, detect_sections, Chunk, ChunkBudget, NormalizedPage,
    Normalizer, Page, PipelineConfig, Report, Result, SectionBlock, Sectioning,
};

/// Which sectioner produced the blocks of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionSource {
    /// Line-pattern heuristic, chosen or fallen back to.
    Heuristic,
    /// The external sectioner.
    External,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// Normalized pages.
    pub pages: Vec<NormalizedPage>,
    /// Section blocks fed to the chunker.
    pub blocks: Vec<SectionBlock>,
    /// Chunks.
    pub chunks: Vec<Chunk>,
    /// Coverage report over the normalized pages.
    pub report: Report,
    /// Which sectioner produced `blocks`.
    pub sectioned_by: SectionSource,
}

/// A configured pipeline.
///
/// ## Example
///
/// ```rust
/// use folios::{Page, Pipeline, PipelineConfig, Sectioning};
///
/// let pages = vec![
///     Page::new(1, "ACME Corp\nINTRODUCTION\n\nWelcome to the infor-\nmation age."),
///     Page::new(2, "ACME Corp\nMore text on page two."),
/// ];
/// let pipeline = Pipeline::new(PipelineConfig::default()).unwrap();
/// let output = pipeline.run(&pages, Sectioning::Heuristic);
///
/// assert_eq!(output.chunks.len(), 1);
/// assert_eq!(output.chunks[0].section.to_string(), "Root / INTRODUCTION");
/// assert_eq!(
///     output.chunks[0].text,
///     "Welcome to the information age.\n\nMore text on page two."
/// );
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    normalizer: Normalizer,
    budget: ChunkBudget,
}

impl Pipeline {
    /// Build a pipeline from a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the config fails validation.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            normalizer: config.normalizer()?,
            budget: config.budget()?,
        })
    }

    /// Build a pipeline from already-validated parts.
    #[must_use]
    pub fn from_parts(normalizer: Normalizer, budget: ChunkBudget) -> Self {
        Self { normalizer, budget }
    }

    /// The chunk budget in use.
    #[must_use]
    pub fn budget(&self) -> ChunkBudget {
        self.budget
    }

    /// Run every stage over one document.
    ///
    /// Never fails: an external sectioner error falls back to the heuristic
    /// and is reported through `sectioned_by` and a warning.
    #[must_use]
    pub fn run(&self, pages: &[Page], sectioning: Sectioning<'_>) -> PipelineOutput {
        let normalized = self.normalizer.normalize(pages);
        debug!(pages = normalized.len(), "normalized pages");

        let (blocks, sectioned_by) = match sectioning {
            Sectioning::Heuristic => (detect_sections(&normalized), SectionSource::Heuristic),
            Sectioning::External(_) => match sectioning.section(&normalized) {
                Ok(blocks) => (blocks, SectionSource::External),
                Err(err) => {
                    warn!(error = %err, "external sectioner failed, falling back to heuristic");
                    (detect_sections(&normalized), SectionSource::Heuristic)
                }
            },
        };
        debug!(blocks = blocks.len(), sectioner = ?sectioned_by, "sectioned pages");

        let chunks = chunk_with_budget(&blocks, self.budget);
        let report = build_report(&normalized, &chunks);
        info!(
            pages = report.pages,
            chunks = report.chunks,
            coverage = report.coverage_ratio,
            "pipeline complete"
        );

        PipelineOutput {
            pages: normalized,
            blocks,
            chunks,
            report,
            sectioned_by,
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::from_parts(Normalizer::default(), ChunkBudget::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Paragraph, ParagraphSectioner};

    struct Failing;

    impl ParagraphSectioner for Failing {
        fn sectionize(&self, _: &[Paragraph]) -> Result<Vec<SectionBlock>> {
            Err(Error::Sectioner("backend unavailable".to_string()))
        }
    }

    struct FlatRoot;

    impl ParagraphSectioner for FlatRoot {
        fn sectionize(&self, paragraphs: &[Paragraph]) -> Result<Vec<SectionBlock>> {
            Ok(paragraphs
                .iter()
                .map(|p| SectionBlock::new("Root / Body", p.page, p.text.clone()))
                .collect())
        }
    }

    fn pages() -> Vec<Page> {
        vec![
            Page::new(1, "SCOPE\n\nApplies to everyone."),
            Page::new(2, "Second page text."),
        ]
    }

    #[test]
    fn test_heuristic_run() {
        let output = Pipeline::default().run(&pages(), Sectioning::Heuristic);
        assert_eq!(output.sectioned_by, SectionSource::Heuristic);
        assert_eq!(output.blocks.len(), 2);
        assert_eq!(output.chunks.len(), 1);
        assert_eq!(output.chunks[0].pages(), 1..=2);
        assert_eq!(output.report.pages, 2);
    }

    #[test]
    fn test_external_run() {
        let output = Pipeline::default().run(&pages(), Sectioning::External(&FlatRoot));
        assert_eq!(output.sectioned_by, SectionSource::External);
        // The external sectioner keeps the heading paragraph as text.
        assert_eq!(output.blocks.len(), 3);
        assert_eq!(output.chunks[0].section.to_string(), "Root / Body");
    }

    #[test]
    fn test_external_failure_falls_back() {
        let output = Pipeline::default().run(&pages(), Sectioning::External(&Failing));
        assert_eq!(output.sectioned_by, SectionSource::Heuristic);
        assert_eq!(output.blocks[0].section_path.to_string(), "Root / SCOPE");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.chunking.overlap = config.chunking.target_chars;
        assert!(Pipeline::new(config).is_err());
    }

    #[test]
    fn test_empty_document() {
        let output = Pipeline::default().run(&[], Sectioning::Heuristic);
        assert!(output.chunks.is_empty());
        assert_eq!(output.report.coverage_ratio, 0.0);
    }
}
