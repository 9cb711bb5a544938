//! Text analysis: normalization, heading outlines, topics, scoring, ranking.

mod headings;
mod normalize;
mod ranking;
mod scoring;
mod topic;

pub use headings::{classify_headings, HeadingThresholds};
pub use normalize::{normalize, TextNormalizer, EXTRACTOR_ARTIFACT};
pub use ranking::rank;
pub use scoring::{
    classify_section, complexity, keyword_score, score_line, summarize, ScoreResult, KEYWORDS,
    KEYWORD_WEIGHT, MIN_KEYWORD_SCORE, MIN_WORDS, SUMMARY_WORDS,
};
pub use topic::{topic_for_page, topic_map, TopicMap};
