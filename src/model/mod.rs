//! Data model for layout input, outlines, ranked sections and reports.
//!
//! Layout types describe what the PDF collaborator yields; the remaining
//! types are produced by analysis and end up in the [`Report`].

mod layout;
mod outline;
mod report;
mod section;

pub use layout::{Block, Line, Page, Span};
pub use outline::{HeadingEntry, HeadingLevel, NO_HEADING};
pub use report::{Report, ReportMetadata};
pub use section::{RankedSection, SectionCandidate, SectionType, SubsectionSummary, NO_TOPIC};
