//! Reading-order reconstruction from positioned text spans.
//!
//! Content streams draw text in arbitrary order. Spans are grouped into
//! lines by baseline (top to bottom, then left to right) and lines into
//! blocks on paragraph-like breaks.

use std::cmp::Ordering;

use crate::model::{Block, Line, Page, Span};

/// Fraction of the font size two baselines may differ by on one line.
const BASELINE_TOLERANCE: f32 = 0.3;

/// Gap (relative to the average line spacing) that starts a new block.
const BLOCK_GAP_FACTOR: f32 = 1.5;

/// Font size change (points) that starts a new block.
const BLOCK_SIZE_JUMP: f32 = 1.0;

/// Left-margin shift (points) that starts a new block.
const BLOCK_INDENT_SHIFT: f32 = 20.0;

/// Line spacing assumed when it cannot be measured.
const DEFAULT_LINE_SPACING: f32 = 12.0;

/// Gap (relative to the average character width) above which two spans on a
/// line are separate words.
const WORD_GAP_FACTOR: f32 = 0.2;

/// Character width (relative to font size) assumed when a span has no width.
const FALLBACK_CHAR_WIDTH: f32 = 0.5;

/// Sizes closer than this are the same size for span merging.
const SAME_SIZE_EPSILON: f32 = 0.01;

/// A span as drawn on the page, in PDF user space (Y grows upward).
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSpan {
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Effective font size in points
    pub size: f32,
    /// Horizontal advance of the shown text (0 when unknown)
    pub width: f32,
}

impl PositionedSpan {
    /// Create a positioned span with unknown width.
    pub fn new(text: impl Into<String>, x: f32, y: f32, size: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size,
            width: 0.0,
        }
    }

    /// Set the horizontal advance.
    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    fn end_x(&self) -> f32 {
        self.x + self.width
    }

    fn avg_char_width(&self) -> f32 {
        let chars = self.text.chars().count();
        if chars > 0 && self.width > 0.0 {
            self.width / chars as f32
        } else {
            self.size * FALLBACK_CHAR_WIDTH
        }
    }

    /// Whether `next` continues this span's word run: same size and no gap
    /// wider than a fraction of a character.
    fn continues_with(&self, next: &PositionedSpan) -> bool {
        let gap = next.x - self.end_x();
        (self.size - next.size).abs() < SAME_SIZE_EPSILON
            && gap <= self.avg_char_width() * WORD_GAP_FACTOR
    }

    fn absorb(&mut self, next: PositionedSpan) {
        self.width = (next.end_x() - self.x).max(self.width);
        self.text.push_str(&next.text);
    }
}

/// A line of spans that share a baseline.
#[derive(Debug, Clone)]
struct PositionedLine {
    spans: Vec<PositionedSpan>,
    /// Baseline of the first span
    y: f32,
    /// Leftmost X
    x: f32,
    /// Character-weighted average font size
    size: f32,
}

impl PositionedLine {
    fn from_spans(mut spans: Vec<PositionedSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal));
        let spans = merge_adjacent(spans);

        let total_chars: usize = spans.iter().map(|s| s.text.chars().count()).sum();
        let weighted: f32 = spans
            .iter()
            .map(|s| s.size * s.text.chars().count() as f32)
            .sum();
        let size = match (total_chars, spans.first()) {
            (0, Some(first)) => first.size,
            (0, None) => 0.0,
            _ => weighted / total_chars as f32,
        };
        let y = spans.first().map_or(0.0, |s| s.y);
        let x = spans.first().map_or(0.0, |s| s.x);

        Self { spans, y, x, size }
    }

    fn into_line(self) -> Line {
        Line::new(
            self.spans
                .into_iter()
                .map(|s| Span::new(s.text, s.size))
                .collect(),
        )
    }
}

/// Merge x-sorted spans that touch and share a size into single spans, so a
/// word drawn by several show operators stays one word.
fn merge_adjacent(spans: Vec<PositionedSpan>) -> Vec<PositionedSpan> {
    let mut merged: Vec<PositionedSpan> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(prev) if prev.continues_with(&span) => prev.absorb(span),
            _ => merged.push(span),
        }
    }
    merged
}

/// Build a page in reading order from positioned spans.
pub fn build_page(number: u32, spans: Vec<PositionedSpan>) -> Page {
    let lines = group_into_lines(spans);
    let mut page = Page::new(number);
    for block in group_into_blocks(lines) {
        page.add_block(block);
    }
    page
}

/// Group spans into lines by baseline, top to bottom.
fn group_into_lines(mut spans: Vec<PositionedSpan>) -> Vec<PositionedLine> {
    spans.sort_by(|a, b| match b.y.partial_cmp(&a.y).unwrap_or(Ordering::Equal) {
        Ordering::Equal => a.x.partial_cmp(&b.x).unwrap_or(Ordering::Equal),
        other => other,
    });

    let mut lines = Vec::new();
    let mut current: Vec<PositionedSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.size * BASELINE_TOLERANCE;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(PositionedLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }
    if !current.is_empty() {
        lines.push(PositionedLine::from_spans(current));
    }

    lines
}

/// Group consecutive lines into blocks.
fn group_into_blocks(lines: Vec<PositionedLine>) -> Vec<Block> {
    let avg_spacing = average_line_spacing(&lines);

    let mut blocks = Vec::new();
    let mut current: Vec<PositionedLine> = Vec::new();

    for line in lines {
        if let Some(prev) = current.last() {
            if starts_new_block(prev, &line, avg_spacing) {
                blocks.push(finish_block(std::mem::take(&mut current)));
            }
        }
        current.push(line);
    }
    if !current.is_empty() {
        blocks.push(finish_block(current));
    }

    blocks
}

fn finish_block(lines: Vec<PositionedLine>) -> Block {
    Block::new(lines.into_iter().map(PositionedLine::into_line).collect())
}

fn average_line_spacing(lines: &[PositionedLine]) -> f32 {
    let spacings: Vec<f32> = lines
        .windows(2)
        .map(|w| (w[0].y - w[1].y).abs())
        .filter(|s| *s > 0.1)
        .collect();

    if spacings.is_empty() {
        return DEFAULT_LINE_SPACING;
    }
    spacings.iter().sum::<f32>() / spacings.len() as f32
}

fn starts_new_block(prev: &PositionedLine, curr: &PositionedLine, avg_spacing: f32) -> bool {
    (prev.y - curr.y).abs() > avg_spacing * BLOCK_GAP_FACTOR
        || (prev.size - curr.size).abs() > BLOCK_SIZE_JUMP
        || (prev.x - curr.x).abs() > BLOCK_INDENT_SHIFT
}
