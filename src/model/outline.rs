//! Heading outline types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Text used for the synthetic entry of a page without headings.
pub const NO_HEADING: &str = "No heading";

/// Relative heading rank inferred from font size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    /// Placeholder level for pages without any heading
    None,
}

impl HeadingLevel {
    /// Whether headings of this level name a topic (H1 or H2).
    pub fn is_topic(self) -> bool {
        matches!(self, HeadingLevel::H1 | HeadingLevel::H2)
    }

    /// Level label as it appears in the report.
    pub fn as_str(self) -> &'static str {
        match self {
            HeadingLevel::H1 => "H1",
            HeadingLevel::H2 => "H2",
            HeadingLevel::H3 => "H3",
            HeadingLevel::None => "None",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry in a document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingEntry {
    /// Heading level
    pub level: HeadingLevel,
    /// Heading text (trimmed)
    pub text: String,
    /// Page number (1-indexed)
    pub page: u32,
}

impl HeadingEntry {
    /// Create a heading entry.
    pub fn new(level: HeadingLevel, text: impl Into<String>, page: u32) -> Self {
        Self {
            level,
            text: text.into(),
            page,
        }
    }

    /// Synthetic entry for a page that has no heading.
    pub fn placeholder(page: u32) -> Self {
        Self::new(HeadingLevel::None, NO_HEADING, page)
    }

    /// Whether this is the synthetic "No heading" entry.
    pub fn is_placeholder(&self) -> bool {
        self.level == HeadingLevel::None
    }
}
