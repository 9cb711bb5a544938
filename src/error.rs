//! Error types for sectionrank.

use std::io;
use thiserror::Error;

/// Result type alias for sectionrank operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while analysing documents.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as PDF.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF version is not supported.
    #[error("Unsupported PDF version: {0}")]
    UnsupportedVersion(String),

    /// Error parsing PDF structure.
    #[error("PDF parsing error: {0}")]
    PdfParse(String),

    /// The PDF document is encrypted.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error decoding a page's text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Persona configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error while rendering the report.
    #[error("Rendering error: {0}")]
    Render(String),

    /// A document failed during a strict run.
    #[error("Failed to process {name}: {source}")]
    Document {
        /// File name of the failing document
        name: String,
        /// Underlying failure
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the document name to an error raised while processing it.
    pub fn in_document(self, name: impl Into<String>) -> Self {
        Error::Document {
            name: name.into(),
            source: Box::new(self),
        }
    }
}

impl From<lopdf::Error> for Error {
    fn from(err: lopdf::Error) -> Self {
        match err {
            lopdf::Error::IO(e) => Error::Io(e),
            lopdf::Error::Decryption(_) => Error::Encrypted,
            _ => Error::PdfParse(err.to_string()),
        }
    }
}
