//! Pipeline configuration.
//!
//! Loaded from JSON; every field has a default, so `{}` is a valid config:
//!
//! ```json
//! {
//!   "normalize":  { "header_footer_threshold": 0.6 },
//!   "chunking":   { "target_chars": 1200, "overlap": 120 },
//!   "sectioning": { "batch_size": 40 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::batched::DEFAULT_BATCH_SIZE;
use crate::capacity::{DEFAULT_OVERLAP, DEFAULT_TARGET_CHARS};
use crate::normalize::DEFAULT_THRESHOLD;
use crate::{BatchedSectioner, ChunkBudget, Error, Normalizer, Result, SectionBackend};

/// Normalizer settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    /// Header/footer frequency threshold, relative to the most common line.
    pub header_footer_threshold: f64,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            header_footer_threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Chunker settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingConfig {
    /// Size a chunk grows toward before it is flushed, in characters.
    pub target_chars: usize,
    /// Characters carried from one chunk into the next.
    pub overlap: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            target_chars: DEFAULT_TARGET_CHARS,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

/// External sectioner settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectioningConfig {
    /// Paragraphs per external sectioner call.
    pub batch_size: usize,
}

impl Default for SectioningConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

/// Complete pipeline configuration.
///
/// ```rust
/// use folios::PipelineConfig;
///
/// let config = PipelineConfig::from_json_str(r#"{"chunking": {"target_chars": 800}}"#).unwrap();
/// assert_eq!(config.chunking.target_chars, 800);
/// assert_eq!(config.chunking.overlap, 120);
///
/// assert!(PipelineConfig::from_json_str(r#"{"chunking": {"target_chars": 100, "overlap": 100}}"#).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Normalizer settings.
    pub normalize: NormalizeConfig,
    /// Chunker settings.
    pub chunking: ChunkingConfig,
    /// External sectioner settings.
    pub sectioning: SectioningConfig,
}

impl PipelineConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is out of range.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a JSON config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or see [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Check every value.
    ///
    /// # Errors
    ///
    /// Returns the first out-of-range value found.
    pub fn validate(&self) -> Result<()> {
        self.normalizer()?;
        self.budget()?;
        if self.sectioning.batch_size == 0 {
            return Err(Error::InvalidBatchSize(0));
        }
        Ok(())
    }

    /// The configured normalizer.
    ///
    /// # Errors
    ///
    /// Returns an error if the threshold is out of range.
    pub fn normalizer(&self) -> Result<Normalizer> {
        Normalizer::new(self.normalize.header_footer_threshold)
    }

    /// A batched external sectioner over `backend`, using the configured
    /// batch size.
    ///
    /// # Errors
    ///
    /// Returns an error if the batch size is zero.
    pub fn sectioner<B: SectionBackend>(&self, backend: B) -> Result<BatchedSectioner<B>> {
        BatchedSectioner::from_config(backend, &self.sectioning)
    }

    /// The configured chunk budget.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is zero or the overlap too large.
    pub fn budget(&self) -> Result<ChunkBudget> {
        ChunkBudget::new(self.chunking.target_chars, self.chunking.overlap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = PipelineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.budget().unwrap(), ChunkBudget::default());
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "normalize": {"header_footer_threshold": 0.8},
            "chunking": {"target_chars": 500, "overlap": 0},
            "sectioning": {"batch_size": 10}
        }"#;
        let config = PipelineConfig::from_json_str(json).unwrap();
        assert!((config.normalizer().unwrap().threshold() - 0.8).abs() < f64::EPSILON);
        assert_eq!(config.budget().unwrap().target_chars(), 500);
        assert_eq!(config.sectioning.batch_size, 10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"normalize": {"header_footer_threshold": -1.0}}"#),
            Err(Error::InvalidThreshold(_))
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"chunking": {"target_chars": 0}}"#),
            Err(Error::InvalidTargetChars(0))
        ));
        assert!(matches!(
            PipelineConfig::from_json_str(r#"{"sectioning": {"batch_size": 0}}"#),
            Err(Error::InvalidBatchSize(0))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            PipelineConfig::from_json_str("{"),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"chunking": {"target_chars": 300, "overlap": 30}}"#).unwrap();
        let config = PipelineConfig::from_path(&path).unwrap();
        assert_eq!(config.chunking.overlap, 30);

        assert!(matches!(
            PipelineConfig::from_path(dir.path().join("missing.json")),
            Err(Error::Io(_))
        ));
    }
}
