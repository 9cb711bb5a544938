//! Layout source abstraction.
//!
//! Analysis never touches a PDF library directly: it consumes pages through
//! [`LayoutSource`], so tests and callers with pre-extracted layout can
//! supply pages from memory.

use crate::error::{Error, Result};
use crate::model::Page;

/// Anything that can yield a document's pages as blocks, lines and spans.
pub trait LayoutSource {
    /// Total number of pages in the document.
    fn page_count(&self) -> u32;

    /// Lay out one page (1-indexed).
    fn page(&self, number: u32) -> Result<Page>;

    /// Lay out every page in order.
    fn pages(&self) -> Result<Vec<Page>> {
        (1..=self.page_count()).map(|n| self.page(n)).collect()
    }
}

/// In-memory [`LayoutSource`] over already laid-out pages.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Page>,
}

impl MemorySource {
    /// Create a source; pages are renumbered 1..=n in the given order.
    pub fn new(pages: Vec<Page>) -> Self {
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, mut page)| {
                page.number = i as u32 + 1;
                page
            })
            .collect();
        Self { pages }
    }
}

impl LayoutSource for MemorySource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page(&self, number: u32) -> Result<Page> {
        number
            .checked_sub(1)
            .and_then(|i| self.pages.get(i as usize))
            .cloned()
            .ok_or(Error::PageOutOfRange(number, self.page_count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Block, Line, Span};

    #[test]
    fn test_memory_source_renumbers_pages() {
        let source = MemorySource::new(vec![Page::new(7), Page::new(9)]);
        assert_eq!(source.page_count(), 2);
        assert_eq!(source.page(1).unwrap().number, 1);
        assert_eq!(source.page(2).unwrap().number, 2);
    }

    #[test]
    fn test_memory_source_out_of_range() {
        let source = MemorySource::new(vec![Page::new(1)]);
        assert!(matches!(source.page(0), Err(Error::PageOutOfRange(0, 1))));
        assert!(matches!(source.page(2), Err(Error::PageOutOfRange(2, 1))));
    }

    #[test]
    fn test_pages_in_order() {
        let page = Page::new(1).with_block(Block::new(vec![Line::new(vec![Span::new("x", 9.0)])]));
        let source = MemorySource::new(vec![page, Page::new(2)]);
        let pages = source.pages().unwrap();
        assert_eq!(pages.len(), 2);
        assert!(!pages[0].is_empty());
        assert!(pages[1].is_empty());
    }
}
