//! Conversion backends.
//!
//! A backend is the document-conversion library seen as a black box: it
//! takes a path and returns a [`SourceDocument`] whose attributes may or
//! may not be populated. Nothing downstream depends on which backend ran.

pub mod content;
mod lopdf_backend;

pub use lopdf_backend::LopdfBackend;

use crate::error::Result;
use crate::source::SourceDocument;
use std::path::Path;

/// Abstract interface of a document-conversion library.
pub trait ConversionBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Parse the file at `path` into a source graph.
    fn convert(&self, path: &Path) -> Result<SourceDocument>;
}

/// How to handle recoverable errors inside a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorMode {
    /// Skip content that cannot be decoded and keep going.
    #[default]
    Lenient,
    /// Fail the conversion on the first undecodable page.
    Strict,
}

/// Options shared by backends.
#[derive(Debug, Clone, Default)]
pub struct BackendOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,
}

impl BackendOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Fail on undecodable pages.
    pub fn strict(mut self) -> Self {
        self.error_mode = ErrorMode::Strict;
        self
    }

    /// Skip undecodable pages.
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }
}
