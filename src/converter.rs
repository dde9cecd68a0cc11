//! The converter: precondition check, delegation to a backend, projection.

use std::path::Path;
use std::sync::Arc;

use crate::backend::{BackendOptions, ConversionBackend, LopdfBackend};
use crate::error::{Error, Result};
use crate::model::ConversionResult;
use crate::project::project_document;

/// Converts one PDF into a [`ConversionResult`].
///
/// # Example
///
/// ```no_run
/// use pdfjson::Converter;
///
/// let result = Converter::new().convert("report.pdf")?;
/// println!("{}", result.document.unwrap().texts.len());
/// # Ok::<(), pdfjson::Error>(())
/// ```
#[derive(Clone)]
pub struct Converter {
    backend: Arc<dyn ConversionBackend>,
}

impl Converter {
    /// A converter using [`LopdfBackend`] with default options.
    pub fn new() -> Self {
        Self::with_options(BackendOptions::default())
    }

    /// A converter using [`LopdfBackend`] with custom options.
    pub fn with_options(options: BackendOptions) -> Self {
        Self::with_backend(Arc::new(LopdfBackend::with_options(options)))
    }

    /// A converter using any backend.
    pub fn with_backend(backend: Arc<dyn ConversionBackend>) -> Self {
        Self { backend }
    }

    /// Name of the backend in use.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Convert the file at `path`.
    ///
    /// Returns `Err` for a missing file or any backend failure; the caller
    /// turns that into an error payload with
    /// [`ConversionResult::from_error`].
    pub fn convert<P: AsRef<Path>>(&self, path: P) -> Result<ConversionResult> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(Error::NotFound(path.to_path_buf()));
        }

        log::debug!(
            "Converting {} with the {} backend",
            path.display(),
            self.backend.name()
        );
        let source = self.backend.convert(path)?;

        let document = project_document(document_name(path), &source)?;
        log::info!(
            "Converted {}: {} texts, {} tables, {} pages",
            path.display(),
            document.texts.len(),
            document.tables.len(),
            document.page_count()
        );

        Ok(ConversionResult::success(document))
    }

    /// Convert the file at `path`, folding any failure into an error
    /// payload. Never fails.
    pub fn run<P: AsRef<Path>>(&self, path: P) -> ConversionResult {
        self.convert(path).unwrap_or_else(|e| {
            log::error!("{}", e);
            ConversionResult::from_error(&e)
        })
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Base name of the input without its extension.
pub fn document_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
