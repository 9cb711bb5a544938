//! Section candidates, ranked sections and subsection summaries.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Topic used when no H1/H2 heading precedes a page.
pub const NO_TOPIC: &str = "No topic";

/// Kind of content a relevant line appears to hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionType {
    Example,
    Derivation,
    Formula,
    Other,
}

impl SectionType {
    /// Lowercase name as written to the report.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionType::Example => "example",
            SectionType::Derivation => "derivation",
            SectionType::Formula => "formula",
            SectionType::Other => "other",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A relevant line found while scanning a document, before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionCandidate {
    /// Source document file name
    pub document: String,
    /// Page number (1-indexed)
    pub page_number: u32,
    /// Normalized line text
    pub section_title: String,
    /// Nearest preceding H1/H2 heading, or [`NO_TOPIC`]
    pub topic: String,
    /// Section classification
    pub section_type: SectionType,
    /// Ranking score; never serialized
    pub weighted_score: u32,
}

impl SectionCandidate {
    /// Drop the score and attach the final rank.
    pub fn into_ranked(self, importance_rank: usize) -> RankedSection {
        RankedSection {
            document: self.document,
            page_number: self.page_number,
            section_title: self.section_title,
            topic: self.topic,
            section_type: self.section_type,
            importance_rank,
        }
    }
}

/// A section after global ranking, as written to the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    pub document: String,
    pub page_number: u32,
    pub section_title: String,
    pub topic: String,
    #[serde(rename = "type")]
    pub section_type: SectionType,
    /// 1-based global rank
    pub importance_rank: usize,
}

/// Short summary of the line behind a section candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionSummary {
    pub document: String,
    pub refined_text: String,
    pub page_number: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranked_section_has_no_score() {
        let candidate = SectionCandidate {
            document: "a.pdf".to_string(),
            page_number: 2,
            section_title: "Solve the example problem".to_string(),
            topic: NO_TOPIC.to_string(),
            section_type: SectionType::Example,
            weighted_score: 7,
        };
        let ranked = candidate.into_ranked(1);
        let json = serde_json::to_value(&ranked).unwrap();

        assert_eq!(json["type"], "example");
        assert_eq!(json["importance_rank"], 1);
        assert!(json.get("weighted_score").is_none());
        assert!(json.get("section_type").is_none());
    }
}
