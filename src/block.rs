//! Section paths, section blocks, and the paragraph stream.
//!
//! A [`SectionBlock`] is the unit the chunker consumes: one trimmed paragraph,
//! the page it came from, and the heading hierarchy it falls under.
//!
//! ```text
//! Page 4:  "2.1 Retention\n\nRecords are kept for seven years."
//!                 |                        |
//!            heading line              paragraph
//!                 v                        v
//! SectionBlock { section_path: "Root / 2.1 Retention", page: 4,
//!                text: "Records are kept for seven years." }
//! ```

use serde::{Deserialize, Serialize};

/// Label of the top level of every section path.
pub const ROOT_LABEL: &str = "Root";

/// Separator used when rendering and parsing section paths.
pub const PATH_SEPARATOR: &str = " / ";

/// Hierarchical section label, always rooted at [`ROOT_LABEL`].
///
/// Serialized as its rendered form, `"Root / Chapter 1 / 1.1 Overview"`.
///
/// ```rust
/// use folios::SectionPath;
///
/// let path = SectionPath::root().child("1.1 Overview");
/// assert_eq!(path.to_string(), "Root / 1.1 Overview");
/// assert_eq!(SectionPath::parse("Root / 1.1 Overview"), path);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct SectionPath(Vec<String>);

impl SectionPath {
    /// The root path, `"Root"`.
    #[must_use]
    pub fn root() -> Self {
        Self(vec![ROOT_LABEL.to_string()])
    }

    /// Extend this path by one level.
    #[must_use]
    pub fn child(mut self, label: impl Into<String>) -> Self {
        self.0.push(label.into());
        self
    }

    /// Parse a rendered path.
    ///
    /// Segments are split on `" / "`, so a bare `/` inside a label survives.
    /// Segments are trimmed and empty segments dropped. A path that does not
    /// start at the root is re-rooted, so `"Chapter 1"` becomes
    /// `"Root / Chapter 1"`.
    #[must_use]
    pub fn parse(rendered: &str) -> Self {
        let mut segments: Vec<String> = rendered
            .split(PATH_SEPARATOR)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if segments.first().map(String::as_str) != Some(ROOT_LABEL) {
            segments.insert(0, ROOT_LABEL.to_string());
        }
        Self(segments)
    }

    /// The labels from the root down.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of levels, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// The innermost label.
    #[must_use]
    pub fn leaf(&self) -> &str {
        self.0.last().map_or(ROOT_LABEL, String::as_str)
    }
}

impl Default for SectionPath {
    fn default() -> Self {
        Self::root()
    }
}

impl std::fmt::Display for SectionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(PATH_SEPARATOR))
    }
}

impl From<String> for SectionPath {
    fn from(rendered: String) -> Self {
        Self::parse(&rendered)
    }
}

impl From<&str> for SectionPath {
    fn from(rendered: &str) -> Self {
        Self::parse(rendered)
    }
}

impl From<SectionPath> for String {
    fn from(path: SectionPath) -> Self {
        path.to_string()
    }
}

/// One paragraph tagged with its section path and page of origin.
///
/// Blocks never span pages, and `text` is non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlock {
    /// Heading hierarchy this paragraph falls under.
    pub section_path: SectionPath,
    /// Page the paragraph was found on.
    pub page: u32,
    /// Paragraph text.
    pub text: String,
}

impl SectionBlock {
    /// Create a block.
    #[must_use]
    pub fn new(section_path: impl Into<SectionPath>, page: u32, text: impl Into<String>) -> Self {
        Self {
            section_path: section_path.into(),
            page,
            text: text.into(),
        }
    }
}

/// A page-numbered paragraph, the input an external sectioner receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    /// Page the paragraph was found on.
    pub page: u32,
    /// Trimmed paragraph text.
    pub text: String,
}

impl Paragraph {
    /// Create a paragraph.
    #[must_use]
    pub fn new(page: u32, text: impl Into<String>) -> Self {
        Self {
            page,
            text: text.into(),
        }
    }
}
