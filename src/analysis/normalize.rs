//! Text normalization for extracted lines.

use regex::Regex;
use std::sync::OnceLock;

/// Private-use glyph some extractors emit for Symbol-font bullets.
pub const EXTRACTOR_ARTIFACT: char = '\u{F06E}';

/// Strips extraction noise and collapses whitespace.
pub struct TextNormalizer {
    disallowed: Regex,
    whitespace: Regex,
}

impl TextNormalizer {
    /// Create a normalizer.
    pub fn new() -> Self {
        Self {
            disallowed: Regex::new(r"[^A-Za-z0-9 .\-()/:]").unwrap(),
            whitespace: Regex::new(r"\s+").unwrap(),
        }
    }

    /// Normalize one piece of raw text.
    ///
    /// Keeps ASCII letters, digits, space and `. - ( ) / :`; everything else
    /// (including tabs and newlines) is deleted, then runs of spaces collapse
    /// to one and the result is trimmed.
    pub fn normalize(&self, raw: &str) -> String {
        let text = raw.replace(EXTRACTOR_ARTIFACT, "");
        let text = self.disallowed.replace_all(&text, "");
        let text = self.whitespace.replace_all(&text, " ");
        text.trim().to_string()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize text with a shared [`TextNormalizer`].
pub fn normalize(raw: &str) -> String {
    static NORMALIZER: OnceLock<TextNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(TextNormalizer::new).normalize(raw)
}
