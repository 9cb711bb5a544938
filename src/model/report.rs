//! Final report types.

use super::{HeadingEntry, RankedSection, SubsectionSummary};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// File names of every document that was analysed
    pub input_documents: Vec<String>,
    /// Persona, passed through verbatim from the configuration
    pub persona: Value,
    /// Job to be done, passed through verbatim from the configuration
    pub job_to_be_done: Value,
    /// UTC ISO-8601 timestamp with a trailing `Z`
    pub processing_timestamp: String,
}

/// The complete analysis of a corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    /// Sections in rank order
    pub extracted_sections: Vec<RankedSection>,
    /// Summaries in generation order
    pub subsection_analysis: Vec<SubsectionSummary>,
    /// Outline per document file name
    pub document_outlines: BTreeMap<String, Vec<HeadingEntry>>,
}

impl Report {
    /// Number of ranked sections.
    pub fn section_count(&self) -> usize {
        self.extracted_sections.len()
    }

    /// Outline of one document, if it was analysed.
    pub fn outline(&self, document: &str) -> Option<&[HeadingEntry]> {
        self.document_outlines.get(document).map(Vec::as_slice)
    }
}
