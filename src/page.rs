//! Page records: the pipeline's input and the Normalizer's output.

use serde::{Deserialize, Serialize};

/// Physical page dimensions reported by the extractor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMeta {
    /// Page width in points.
    pub width: f64,
    /// Page height in points.
    pub height: f64,
}

/// Raw text of one page, as produced by a PDF/OCR extractor.
///
/// `page_num` is 1-based and ascending across a document. Gaps are tolerated.
///
/// ```rust
/// use folios::Page;
///
/// let page: Page = serde_json::from_str(r#"{"page_num": 3}"#).unwrap();
/// assert_eq!(page.page_num, 3);
/// assert!(page.text.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// 1-based page number.
    pub page_num: u32,
    /// Extracted text. Missing text is treated as empty.
    #[serde(default)]
    pub text: String,
    /// Page dimensions.
    #[serde(default)]
    pub meta: PageMeta,
}

impl Page {
    /// Create a page with zeroed dimensions.
    #[must_use]
    pub fn new(page_num: u32, text: impl Into<String>) -> Self {
        Self {
            page_num,
            text: text.into(),
            meta: PageMeta::default(),
        }
    }

    /// Set the page dimensions.
    #[must_use]
    pub fn with_meta(mut self, width: f64, height: f64) -> Self {
        self.meta = PageMeta { width, height };
        self
    }
}

/// A page after normalization. One-to-one with the source [`Page`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPage {
    /// Page number, copied from the source page.
    pub page_num: u32,
    /// Cleaned text.
    pub text: String,
    /// Page dimensions, copied from the source page.
    pub meta: PageMeta,
}

/// Anything that carries page text.
///
/// Lets the report run over either raw or normalized pages.
pub trait PageText {
    /// The page's text.
    fn text(&self) -> &str;
}

impl PageText for Page {
    fn text(&self) -> &str {
        &self.text
    }
}

impl PageText for NormalizedPage {
    fn text(&self) -> &str {
        &self.text
    }
}
