//! Lexical relevance scoring of normalized lines.

use regex::Regex;
use std::sync::OnceLock;

use crate::model::SectionType;

/// Relevance vocabulary; each entry counts at most once per line.
pub const KEYWORDS: [&str; 16] = [
    "example",
    "problem",
    "q.",
    "find",
    "result",
    "question",
    "derivation",
    "formula",
    "application",
    "calculation",
    "numerical",
    "solve",
    "determine",
    "derive",
    "equation",
    "method",
];

/// Lines with fewer words are discarded as fragments.
pub const MIN_WORDS: usize = 4;

/// Lines matching fewer keywords are not candidates.
pub const MIN_KEYWORD_SCORE: u32 = 2;

/// Weight of the keyword score relative to complexity.
pub const KEYWORD_WEIGHT: u32 = 2;

/// Word limit for summaries of lines without a period.
pub const SUMMARY_WORDS: usize = 25;

/// Scores for a line that qualified as a section candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreResult {
    /// Number of distinct keywords found
    pub keyword_score: u32,
    /// Digits plus math symbols
    pub complexity: u32,
    /// `KEYWORD_WEIGHT * keyword_score + complexity`
    pub weighted_score: u32,
    pub section_type: SectionType,
    /// First sentence, or the leading words with an ellipsis
    pub summary: String,
}

/// Score a normalized line.
///
/// Returns `None` when the line has fewer than [`MIN_WORDS`] words or
/// matches fewer than [`MIN_KEYWORD_SCORE`] keywords.
pub fn score_line(normalized: &str) -> Option<ScoreResult> {
    if normalized.split_whitespace().count() < MIN_WORDS {
        return None;
    }

    let keyword_score = keyword_score(normalized);
    if keyword_score < MIN_KEYWORD_SCORE {
        return None;
    }

    let complexity = complexity(normalized);
    Some(ScoreResult {
        keyword_score,
        complexity,
        weighted_score: KEYWORD_WEIGHT * keyword_score + complexity,
        section_type: classify_section(normalized),
        summary: summarize(normalized),
    })
}

/// Count distinct keywords occurring as case-insensitive substrings.
pub fn keyword_score(text: &str) -> u32 {
    let lower = text.to_lowercase();
    KEYWORDS.iter().filter(|k| lower.contains(*k)).count() as u32
}

/// Count digits plus characters in `= + - * / ^ √ ∑ ∫ ( )`.
pub fn complexity(text: &str) -> u32 {
    static MATH_OPS: OnceLock<Regex> = OnceLock::new();
    let math_ops = MATH_OPS.get_or_init(|| Regex::new(r"[=+\-*/^√∑∫()]").unwrap());

    let digits = text.chars().filter(char::is_ascii_digit).count();
    (digits + math_ops.find_iter(text).count()) as u32
}

/// Classify a line by the first matching vocabulary rule.
pub fn classify_section(text: &str) -> SectionType {
    let lower = text.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| lower.contains(w));

    if has(&["example", "problem"]) {
        SectionType::Example
    } else if has(&["derive", "derivation"]) {
        SectionType::Derivation
    } else if has(&["formula", "equation"]) {
        SectionType::Formula
    } else {
        SectionType::Other
    }
}

/// Text up to and including the first `.`, or the first
/// [`SUMMARY_WORDS`] words followed by `...`.
pub fn summarize(text: &str) -> String {
    match text.find('.') {
        Some(idx) => text[..=idx].to_string(),
        None => {
            let words: Vec<&str> = text.split_whitespace().take(SUMMARY_WORDS).collect();
            format!("{}...", words.join(" "))
        }
    }
}
