//! Output model: the JSON document handed to the downstream pipeline.
//!
//! Field names and nesting here are a contract with the caller that parses
//! standard output. Every field has a fixed type; optional keys are
//! omitted rather than written as `null`.

mod document;
mod result;

pub use document::{BoundingBox, Document, PageInfo, PageSize, Provenance, TableItem, TextItem};
pub use result::{ConversionResult, ErrorRecord, Status};
