//! Error types for folios.

/// Errors that can occur while configuring or orchestrating the pipeline.
///
/// The pipeline stages themselves never fail; these errors come from
/// validated configuration, external sectioners, and the on-disk cache.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid chunk target (must be > 0).
    #[error("invalid chunk target: {0} chars (must be > 0)")]
    InvalidTargetChars(usize),

    /// Overlap is not smaller than the chunk target.
    #[error("overlap {overlap} must be smaller than chunk target {target_chars}")]
    OverlapExceedsTarget {
        /// The chunk target.
        target_chars: usize,
        /// The overlap that was too large.
        overlap: usize,
    },

    /// Header/footer threshold outside `0.0..=1.0` or not finite.
    #[error("invalid header/footer threshold: {0} (must be within 0.0..=1.0)")]
    InvalidThreshold(f64),

    /// External sectioner batch size of zero.
    #[error("invalid sectioner batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    /// The external sectioner failed.
    #[error("external sectioner failed: {0}")]
    Sectioner(String),

    /// The QA backend failed.
    #[error("qa backend failed: {0}")]
    Qa(String),

    /// The external sectioner dropped, invented, or reordered paragraph text.
    #[error("sectioner output is incomplete: expected {expected} chars of paragraph text, got {actual}")]
    IncompleteSectioning {
        /// Non-whitespace chars in the input paragraphs.
        expected: usize,
        /// Non-whitespace chars in the returned blocks.
        actual: usize,
    },

    /// Filesystem error (cache, config file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for folios operations.
pub type Result<T> = std::result::Result<T, Error>;
