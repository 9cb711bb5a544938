//! Font-size based heading classification.
//!
//! Classification runs in two passes over a document: the first collects
//! every distinct font size into [`HeadingThresholds`], the second maps each
//! span to a [`HeadingLevel`] against those thresholds.

use std::collections::HashSet;

use crate::model::{HeadingEntry, HeadingLevel, Page};

/// Minimum trimmed length (in characters) for a span to become a heading.
const MIN_HEADING_CHARS: usize = 2;

/// Size cut-offs derived from a document's own font sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    pub h1: f32,
    pub h2: f32,
    pub h3: f32,
}

impl HeadingThresholds {
    /// Derive thresholds from observed font sizes.
    ///
    /// Each level sits 1pt below the matching distinct size (largest first);
    /// missing levels fall 2pt below the previous one. Returns `None` when no
    /// sizes were observed.
    pub fn from_sizes<I>(sizes: I) -> Option<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut distinct: Vec<f32> = sizes.into_iter().filter(|s| !s.is_nan()).collect();
        distinct.sort_by(|a, b| b.total_cmp(a));
        distinct.dedup();

        let h1 = distinct.first()? - 1.0;
        let h2 = distinct.get(1).map_or(h1 - 2.0, |s| s - 1.0);
        let h3 = distinct.get(2).map_or(h2 - 2.0, |s| s - 1.0);
        Some(Self { h1, h2, h3 })
    }

    /// Collect thresholds from every span on the given pages.
    pub fn from_pages(pages: &[Page]) -> Option<Self> {
        Self::from_sizes(pages.iter().flat_map(|p| p.spans().map(|s| s.size)))
    }

    /// Heading level for a font size, or `None` when below every threshold.
    pub fn level_for(&self, size: f32) -> Option<HeadingLevel> {
        if size >= self.h1 {
            Some(HeadingLevel::H1)
        } else if size >= self.h2 {
            Some(HeadingLevel::H2)
        } else if size >= self.h3 {
            Some(HeadingLevel::H3)
        } else {
            None
        }
    }
}

/// Build a document outline from its pages.
///
/// `page_count` is the total page count reported by the collaborator; every
/// page in `1..=page_count` without a heading gets a "No heading" entry.
/// Returns an empty outline (and logs a warning) when the document has no
/// font sizes at all.
pub fn classify_headings(document: &str, pages: &[Page], page_count: u32) -> Vec<HeadingEntry> {
    let Some(thresholds) = HeadingThresholds::from_pages(pages) else {
        log::warn!(
            "No font sizes found in {}. Skipping outline generation.",
            document
        );
        return Vec::new();
    };
    log::debug!("{}: heading thresholds {:?}", document, thresholds);

    let mut entries = Vec::new();
    let mut seen: HashSet<(String, HeadingLevel)> = HashSet::new();
    let mut pages_with_headings: HashSet<u32> = HashSet::new();

    for page in pages {
        for span in page.spans() {
            let text = span.text.trim();
            if text.chars().count() < MIN_HEADING_CHARS {
                continue;
            }
            let Some(level) = thresholds.level_for(span.size) else {
                continue;
            };
            if !seen.insert((text.to_lowercase(), level)) {
                continue;
            }
            pages_with_headings.insert(page.number);
            entries.push(HeadingEntry::new(level, text, page.number));
        }
    }

    for number in 1..=page_count {
        if !pages_with_headings.contains(&number) {
            entries.push(HeadingEntry::placeholder(number));
        }
    }

    entries.sort_by_key(|e| e.page);
    entries
}
