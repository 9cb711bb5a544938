//! PDF layout module.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{LayoutSource, MemorySource};
pub use layout::{build_page, PositionedSpan};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::{pdf_version, PdfLayoutSource};
