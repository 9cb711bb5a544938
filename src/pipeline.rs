//! Document and corpus analysis driver.
//!
//! Each document is analysed independently into a [`DocumentAnalysis`];
//! a [`RunContext`] then absorbs the analyses in corpus order and produces
//! the final [`Report`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use rayon::prelude::*;

use crate::analysis::{classify_headings, normalize, rank, score_line, topic_for_page, topic_map};
use crate::config::PersonaConfig;
use crate::error::Result;
use crate::model::{HeadingEntry, Report, ReportMetadata, SectionCandidate, SubsectionSummary};
use crate::parser::{ErrorMode, LayoutSource, ParseOptions, PdfLayoutSource};

/// Options for analysing a corpus.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// What to do when a whole document fails to open or parse
    pub error_mode: ErrorMode,

    /// Analyse documents on the rayon thread pool
    pub parallel: bool,

    /// Options for the PDF layout source
    pub parse: ParseOptions,
}

impl AnalyzeOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip failing documents with a warning.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Abort the run on the first failing document.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Enable or disable parallel processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Set PDF parse options.
    pub fn with_parse_options(mut self, parse: ParseOptions) -> Self {
        self.parse = parse;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Lenient,
            parallel: true,
            parse: ParseOptions::default(),
        }
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentAnalysis {
    /// Document file name
    pub name: String,
    /// Heading outline, sorted by page
    pub outline: Vec<HeadingEntry>,
    /// Relevant lines in page/block/line order
    pub candidates: Vec<SectionCandidate>,
    /// One summary per candidate, same order
    pub summaries: Vec<SubsectionSummary>,
}

/// Analyse one document.
///
/// Pages are laid out once; the outline is built from all of them before any
/// line is scored, so every topic lookup sees the whole document.
pub fn analyze_document(name: &str, source: &dyn LayoutSource) -> Result<DocumentAnalysis> {
    let page_count = source.page_count();
    let pages = source.pages()?;

    let outline = classify_headings(name, &pages, page_count);
    let topics = topic_map(&outline);

    let mut candidates = Vec::new();
    let mut summaries = Vec::new();

    for page in &pages {
        for line in page.lines() {
            let cleaned = normalize(&line.text());
            let Some(score) = score_line(&cleaned) else {
                continue;
            };

            summaries.push(SubsectionSummary {
                document: name.to_string(),
                refined_text: score.summary,
                page_number: page.number,
            });
            candidates.push(SectionCandidate {
                document: name.to_string(),
                page_number: page.number,
                topic: topic_for_page(page.number, &topics).to_string(),
                section_title: cleaned,
                section_type: score.section_type,
                weighted_score: score.weighted_score,
            });
        }
    }

    log::debug!(
        "{}: {} outline entries, {} candidate sections",
        name,
        outline.len(),
        candidates.len()
    );

    Ok(DocumentAnalysis {
        name: name.to_string(),
        outline,
        candidates,
        summaries,
    })
}

/// Open and analyse one PDF file.
pub fn analyze_pdf(path: &Path, options: &ParseOptions) -> Result<DocumentAnalysis> {
    let name = document_name(path);
    log::info!("Processing: {}", name);
    let source = PdfLayoutSource::open_with_options(path, options.clone())?;
    analyze_document(&name, &source)
}

/// Accumulated state of one run across documents.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    documents: Vec<String>,
    candidates: Vec<SectionCandidate>,
    summaries: Vec<SubsectionSummary>,
    outlines: BTreeMap<String, Vec<HeadingEntry>>,
}

impl RunContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one document's results.
    pub fn absorb(&mut self, analysis: DocumentAnalysis) {
        self.documents.push(analysis.name.clone());
        self.candidates.extend(analysis.candidates);
        self.summaries.extend(analysis.summaries);
        self.outlines.insert(analysis.name, analysis.outline);
    }

    /// Names of the documents absorbed so far.
    pub fn documents(&self) -> &[String] {
        &self.documents
    }

    /// Candidates absorbed so far, in encounter order.
    pub fn candidates(&self) -> &[SectionCandidate] {
        &self.candidates
    }

    /// Rank all candidates and build the report.
    pub fn finish(self, config: &PersonaConfig) -> Report {
        Report {
            metadata: ReportMetadata {
                input_documents: self.documents,
                persona: config.persona.clone(),
                job_to_be_done: config.job_to_be_done.clone(),
                processing_timestamp: timestamp(),
            },
            extracted_sections: rank(self.candidates),
            subsection_analysis: self.summaries,
            document_outlines: self.outlines,
        }
    }
}

/// Current UTC time as ISO-8601 with microseconds and a trailing `Z`.
pub fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// File name used to identify a document in the report.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// List every `.pdf` file in a directory, sorted by file name.
///
/// The extension match is case-sensitive; subdirectories are not searched.
pub fn collect_pdf_paths<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "pdf") {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Analyse a list of PDF files into a report.
pub fn analyze_paths(
    paths: &[PathBuf],
    config: &PersonaConfig,
    options: &AnalyzeOptions,
) -> Result<Report> {
    analyze_paths_with(paths, config, options, |_| {})
}

/// Like [`analyze_paths`], calling `on_document` as each file finishes.
///
/// With parallel analysis the callback runs on worker threads in completion
/// order; the report itself is always assembled in `paths` order.
pub fn analyze_paths_with<F>(
    paths: &[PathBuf],
    config: &PersonaConfig,
    options: &AnalyzeOptions,
    on_document: F,
) -> Result<Report>
where
    F: Fn(&Path) + Sync,
{
    let analyze = |path: &PathBuf| {
        let result = analyze_pdf(path, &options.parse);
        on_document(path);
        result
    };

    let results: Vec<Result<DocumentAnalysis>> = if options.parallel {
        paths.par_iter().map(analyze).collect()
    } else {
        paths.iter().map(analyze).collect()
    };

    let mut context = RunContext::new();
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(analysis) => context.absorb(analysis),
            Err(e) => {
                let name = document_name(path);
                if options.error_mode == ErrorMode::Strict {
                    return Err(e.in_document(name));
                }
                log::warn!("Skipping {}: {}", name, e);
            }
        }
    }

    Ok(context.finish(config))
}

/// Analyse every PDF in a directory.
///
/// The configuration is taken as already loaded, so a bad configuration
/// fails the run before any document is opened.
pub fn analyze_corpus<P: AsRef<Path>>(
    dir: P,
    config: &PersonaConfig,
    options: &AnalyzeOptions,
) -> Result<Report> {
    let paths = collect_pdf_paths(dir)?;
    if paths.is_empty() {
        log::warn!("No PDF documents found");
    }
    analyze_paths(&paths, config, options)
}
