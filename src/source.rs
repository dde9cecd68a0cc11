//! Object graph returned by a conversion backend.
//!
//! Every attribute a backend may or may not populate is an `Option`. The
//! types carry no defaults of their own; defaults are resolved once, when
//! the graph is projected onto the output model (see [`crate::project`]).

use indexmap::IndexMap;
use std::fmt;

/// A converted document as produced by a backend.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDocument {
    /// Text items in reading order.
    pub texts: Vec<SourceTextItem>,

    /// Tables in reading order.
    pub tables: Vec<SourceTableItem>,

    /// Page mapping, in the backend's own key order.
    pub pages: Option<IndexMap<PageKey, SourcePage>>,
}

impl SourceDocument {
    /// Create an empty document with no page mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, creating the page mapping on first use.
    pub fn insert_page(&mut self, key: impl Into<PageKey>, page: SourcePage) {
        self.pages
            .get_or_insert_with(IndexMap::new)
            .insert(key.into(), page);
    }
}

/// Key of the page mapping.
///
/// Backends key pages by number; names are accepted so that a graph
/// deserialized from elsewhere can be carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageKey {
    Number(u32),
    Name(String),
}

impl PageKey {
    /// The page number this key denotes, if it is numeric.
    pub fn as_page_no(&self) -> Option<u32> {
        match self {
            PageKey::Number(n) => Some(*n),
            PageKey::Name(name) => name.trim().parse().ok(),
        }
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKey::Number(n) => write!(f, "{}", n),
            PageKey::Name(name) => f.write_str(name),
        }
    }
}

impl From<u32> for PageKey {
    fn from(n: u32) -> Self {
        PageKey::Number(n)
    }
}

impl From<&str> for PageKey {
    fn from(name: &str) -> Self {
        PageKey::Name(name.to_string())
    }
}

impl From<String> for PageKey {
    fn from(name: String) -> Self {
        PageKey::Name(name)
    }
}

/// A text element (paragraph, heading, list item, ...).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTextItem {
    /// Backend-internal identifier, e.g. `#/texts/3`.
    pub self_ref: Option<String>,

    /// Classification such as `text`, `section_header`, `list_item`.
    pub label: Option<String>,

    /// Text content.
    pub text: Option<String>,

    /// Location metadata.
    pub prov: Option<Vec<SourceProvenance>>,

    /// Heading level, for heading-like items.
    pub level: Option<u32>,

    /// List marker, for list items.
    pub marker: Option<String>,

    /// Whether the list is enumerated, for list items.
    pub enumerated: Option<bool>,
}

impl SourceTextItem {
    /// Create a text item with only its content set.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }
}

/// Generic string form of a text item, used when it carries no text.
impl fmt::Display for SourceTextItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SourceTextItem(")?;
        let mut sep = "";
        if let Some(ref self_ref) = self.self_ref {
            write!(f, "self_ref={:?}", self_ref)?;
            sep = ", ";
        }
        if let Some(ref label) = self.label {
            write!(f, "{}label={:?}", sep, label)?;
            sep = ", ";
        }
        if let Some(level) = self.level {
            write!(f, "{}level={}", sep, level)?;
            sep = ", ";
        }
        if let Some(ref marker) = self.marker {
            write!(f, "{}marker={:?}", sep, marker)?;
        }
        write!(f, ")")
    }
}

/// A table element. Cell structure is not carried.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceTableItem {
    /// Backend-internal identifier, e.g. `#/tables/0`.
    pub self_ref: Option<String>,

    /// Location metadata.
    pub prov: Option<Vec<SourceProvenance>>,
}

/// Where an element was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceProvenance {
    /// Page number (1-indexed).
    pub page_no: Option<u32>,

    /// Bounding box on that page.
    pub bbox: Option<SourceBoundingBox>,
}

impl SourceProvenance {
    /// Provenance on a page, without a bounding box.
    pub fn on_page(page_no: u32) -> Self {
        Self {
            page_no: Some(page_no),
            bbox: None,
        }
    }
}

/// Rectangle locating an element; any side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceBoundingBox {
    pub l: Option<f64>,
    pub t: Option<f64>,
    pub r: Option<f64>,
    pub b: Option<f64>,
}

/// Page-level metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourcePage {
    /// Page number (1-indexed).
    pub page_no: Option<u32>,

    /// Page dimensions in points.
    pub size: Option<SourcePageSize>,
}

/// Page dimensions; either side may be unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourcePageSize {
    pub width: Option<f64>,
    pub height: Option<f64>,
}
