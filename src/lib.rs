//! # sectionrank
//!
//! Persona-driven section ranking for PDF corpora.
//!
//! This library reads a directory of PDF documents, infers each document's
//! heading outline from font sizes, scores every text line for technical
//! relevance and ranks the relevant lines across the whole corpus into a
//! single JSON report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use sectionrank::{analyze_corpus, render, AnalyzeOptions, PersonaConfig};
//!
//! fn main() -> sectionrank::Result<()> {
//!     let config = PersonaConfig::from_file("input/persona_input.json")?;
//!     let report = analyze_corpus("input", &config, &AnalyzeOptions::default())?;
//!
//!     render::write_report(&report, "output/report.json", render::JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Heading outlines**: H1/H2/H3 inferred from the largest font sizes
//! - **Relevance scoring**: keyword and formula density per line
//! - **Corpus ranking**: one stable ranking across every document
//! - **Parallel processing**: Uses Rayon to analyse documents concurrently
//! - **Pluggable layout**: any [`LayoutSource`] can feed the analysis

pub mod analysis;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod render;

// Re-export commonly used types
pub use config::{PersonaConfig, PERSONA_CONFIG_FILE};
pub use error::{Error, Result};
pub use model::{
    Block, HeadingEntry, HeadingLevel, Line, Page, RankedSection, Report, ReportMetadata,
    SectionCandidate, SectionType, Span, SubsectionSummary,
};
pub use parser::{ErrorMode, LayoutSource, MemorySource, ParseOptions, PdfLayoutSource};
pub use pipeline::{
    analyze_corpus, analyze_document, analyze_paths, AnalyzeOptions, DocumentAnalysis, RunContext,
};
pub use render::JsonFormat;

use std::path::Path;

/// Analyse a single PDF file.
///
/// # Example
///
/// ```no_run
/// use sectionrank::analyze_file;
///
/// let analysis = analyze_file("notes.pdf").unwrap();
/// println!("{} relevant lines", analysis.candidates.len());
/// ```
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<DocumentAnalysis> {
    pipeline::analyze_pdf(path.as_ref(), &ParseOptions::default())
}

/// Build the heading outline of a single PDF file.
///
/// Every page gets at least one entry; pages without a heading get a
/// placeholder.
///
/// # Example
///
/// ```no_run
/// use sectionrank::outline_file;
///
/// for entry in outline_file("notes.pdf").unwrap() {
///     println!("{} p{}: {}", entry.level, entry.page, entry.text);
/// }
/// ```
pub fn outline_file<P: AsRef<Path>>(path: P) -> Result<Vec<HeadingEntry>> {
    Ok(analyze_file(path)?.outline)
}

/// Builder for ranking sections across a PDF corpus.
///
/// # Example
///
/// ```no_run
/// use sectionrank::{PersonaConfig, SectionRank};
///
/// let config = PersonaConfig::new("Physics student", "Revise kinematics");
/// let json = SectionRank::new()
///     .strict()
///     .sequential()
///     .run("input", &config)?
///     .to_json(sectionrank::JsonFormat::Compact)?;
/// # Ok::<(), sectionrank::Error>(())
/// ```
pub struct SectionRank {
    options: AnalyzeOptions,
}

impl SectionRank {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            options: AnalyzeOptions::default(),
        }
    }

    /// Skip documents that fail to open.
    pub fn lenient(mut self) -> Self {
        self.options = self.options.lenient();
        self
    }

    /// Abort on the first document that fails to open.
    pub fn strict(mut self) -> Self {
        self.options = self.options.strict();
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.options = self.options.sequential();
        self
    }

    /// Set options for the PDF layout source.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.options = self.options.with_parse_options(parse);
        self
    }

    /// Analyse every PDF in `dir`.
    pub fn run<P: AsRef<Path>>(self, dir: P, config: &PersonaConfig) -> Result<SectionRankResult> {
        let report = analyze_corpus(dir, config, &self.options)?;
        Ok(SectionRankResult { report })
    }

    /// Analyse explicit PDF paths, in the given order.
    pub fn run_paths(
        self,
        paths: &[std::path::PathBuf],
        config: &PersonaConfig,
    ) -> Result<SectionRankResult> {
        let report = analyze_paths(paths, config, &self.options)?;
        Ok(SectionRankResult { report })
    }
}

impl Default for SectionRank {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of a ranking run.
pub struct SectionRankResult {
    /// The finished report
    pub report: Report,
}

impl SectionRankResult {
    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.report, format)
    }

    /// Write the report to a file.
    pub fn write<P: AsRef<Path>>(&self, path: P, format: JsonFormat) -> Result<()> {
        render::write_report(&self.report, path, format)
    }

    /// Get the report.
    pub fn report(&self) -> &Report {
        &self.report
    }
}
