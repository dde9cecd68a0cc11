//! Document-level output types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label written for every table item.
pub const TABLE_LABEL: &str = "table";

/// The converted document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Base name of the input file without extension
    pub name: String,

    /// Text items in reading order
    pub texts: Vec<TextItem>,

    /// Tables in reading order
    pub tables: Vec<TableItem>,

    /// Page metadata keyed by page key
    pub pages: IndexMap<String, PageInfo>,
}

impl Document {
    /// Create an empty document with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Number of pages in the page mapping.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// A text element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub self_ref: String,
    pub label: String,
    pub text: String,
    pub prov: Vec<Provenance>,

    /// Heading level (heading-like items only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub level: Option<u32>,

    /// List marker (list items only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub marker: Option<String>,

    /// Whether the list is enumerated (list items only)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub enumerated: Option<bool>,
}

/// A table element. Only identity and location are carried.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableItem {
    pub self_ref: String,
    pub label: String,
    pub prov: Vec<Provenance>,
}

impl TableItem {
    /// Create a table item; the label is always `"table"`.
    pub fn new(self_ref: impl Into<String>, prov: Vec<Provenance>) -> Self {
        Self {
            self_ref: self_ref.into(),
            label: TABLE_LABEL.to_string(),
            prov,
        }
    }
}

/// Where an element was found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Page number (1-indexed)
    pub page_no: u32,

    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub bbox: Option<BoundingBox>,
}

/// Left/top/right/bottom rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub l: f64,
    pub t: f64,
    pub r: f64,
    pub b: f64,
}

/// Page-level metadata.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page_no: u32,
    pub size: PageSize,
}

/// Page dimensions in points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}
