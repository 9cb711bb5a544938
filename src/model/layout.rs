//! Page layout hierarchy: pages own blocks, blocks own lines, lines own spans.

use serde::{Deserialize, Serialize};

/// A contiguous run of text drawn with one font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// The text content
    pub text: String,
    /// Font size in points
    pub size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, size: f32) -> Self {
        Self {
            text: text.into(),
            size,
        }
    }
}

/// A line of spans sharing a baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// Spans in reading order
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Join the non-blank spans with a single space.
    pub fn text(&self) -> String {
        self.spans
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A group of consecutive lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Lines in reading order
    pub lines: Vec<Line>,
}

impl Block {
    /// Create a block from lines.
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

/// A single page of laid-out text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Content blocks in reading order
    pub blocks: Vec<Block>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            blocks: Vec::new(),
        }
    }

    /// Add a block to the page.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder-style block append.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Iterate over every line on the page.
    pub fn lines(&self) -> impl Iterator<Item = &Line> {
        self.blocks.iter().flat_map(|b| b.lines.iter())
    }

    /// Iterate over every span on the page.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.lines().flat_map(|l| l.spans.iter())
    }

    /// Check if the page has no text at all.
    pub fn is_empty(&self) -> bool {
        self.spans().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_text_skips_blank_spans() {
        let line = Line::new(vec![
            Span::new("Example", 12.0),
            Span::new("   ", 12.0),
            Span::new("2.1", 12.0),
        ]);
        assert_eq!(line.text(), "Example 2.1");
    }

    #[test]
    fn test_page_iterators() {
        let page = Page::new(3)
            .with_block(Block::new(vec![
                Line::new(vec![Span::new("A", 10.0), Span::new("B", 11.0)]),
                Line::new(vec![Span::new("C", 12.0)]),
            ]))
            .with_block(Block::new(vec![Line::new(vec![Span::new("D", 9.0)])]));

        assert_eq!(page.lines().count(), 3);
        let texts: Vec<_> = page.spans().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["A", "B", "C", "D"]);
        assert!(!page.is_empty());
        assert!(Page::new(1).is_empty());
    }
}
