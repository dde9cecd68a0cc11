//! # pdfjson
//!
//! Converts a PDF into the structured JSON document consumed by document
//! pipelines: text items, tables and page metadata, each with provenance.
//!
//! The PDF work is done by a [`ConversionBackend`]; this crate maps the
//! backend's all-optional object graph onto a fixed output schema, filling
//! documented defaults for anything the backend did not report.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfjson::render::{to_json, JsonFormat};
//!
//! fn main() -> pdfjson::Result<()> {
//!     let result = pdfjson::convert_file("document.pdf")?;
//!     println!("{}", to_json(&result, JsonFormat::Compact)?);
//!     Ok(())
//! }
//! ```
//!
//! ## Output
//!
//! ```json
//! {"status":"success",
//!  "document":{"name":"document",
//!              "texts":[{"self_ref":"#/texts/0","label":"text","text":"Hello",
//!                        "prov":[{"page_no":1,"bbox":{"l":72.0,"t":729.6,"r":0.0,"b":717.6}}]}],
//!              "tables":[],
//!              "pages":{"1":{"page_no":1,"size":{"width":612.0,"height":792.0}}}},
//!  "errors":[]}
//! ```

pub mod backend;
pub mod converter;
pub mod detect;
pub mod error;
pub mod model;
pub mod project;
pub mod render;
pub mod source;

// Re-export commonly used types
pub use backend::{BackendOptions, ConversionBackend, ErrorMode, LopdfBackend};
pub use converter::Converter;
pub use error::{Error, ErrorKind, Result};
pub use model::{
    BoundingBox, ConversionResult, Document, ErrorRecord, PageInfo, PageSize, Provenance, Status,
    TableItem, TextItem,
};
pub use render::JsonFormat;
pub use source::{
    PageKey, SourceBoundingBox, SourceDocument, SourcePage, SourcePageSize, SourceProvenance,
    SourceTableItem, SourceTextItem,
};

use std::path::Path;

/// Convert a PDF file with the default backend.
///
/// # Example
///
/// ```no_run
/// let result = pdfjson::convert_file("document.pdf").unwrap();
/// assert!(result.is_success());
/// ```
pub fn convert_file<P: AsRef<Path>>(path: P) -> Result<ConversionResult> {
    Converter::new().convert(path)
}

/// Convert a PDF file with custom backend options.
pub fn convert_file_with_options<P: AsRef<Path>>(
    path: P,
    options: BackendOptions,
) -> Result<ConversionResult> {
    Converter::with_options(options).convert(path)
}
