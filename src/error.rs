//! Error types for pdfjson.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdfjson operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a PDF.
#[derive(Error, Debug)]
pub enum Error {
    /// The program was invoked with the wrong arguments.
    #[error("Usage: {0} <pdf_path>")]
    Usage(String),

    /// The input path does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// I/O error when reading the input.
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

    /// The PDF document is encrypted and could not be opened.
    #[error("Document is encrypted")]
    Encrypted,

    /// Error extracting text content.
    #[error("Text extraction error: {0}")]
    TextExtract(String),

    /// A page mapping key carries no page number and is not numeric.
    #[error("Invalid page key: {0:?}")]
    InvalidPageKey(String),

    /// Error serializing the result.
    #[error("Rendering error: {0}")]
    Render(String),
}

/// Coarse classification of failures at the program boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Wrong command-line arguments.
    Usage,
    /// The input path does not exist.
    NotFound,
    /// The conversion itself failed.
    Conversion,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Usage(_) => ErrorKind::Usage,
            Error::NotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Conversion,
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

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Render(format!("JSON serialization error: {}", err))
    }
}
