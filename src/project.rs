//! Projection of a backend's source graph onto the output model.
//!
//! All presence checks happen here, once. Each absent attribute resolves
//! to the default named below; the output shape never depends on which
//! attributes the backend populated.

use crate::error::{Error, Result};
use crate::model::{
    BoundingBox, Document, PageInfo, PageSize, Provenance, TableItem, TextItem,
};
use crate::source::{
    PageKey, SourceBoundingBox, SourceDocument, SourcePage, SourcePageSize, SourceProvenance,
    SourceTableItem, SourceTextItem,
};

/// Label of a text item that has none.
pub const DEFAULT_LABEL: &str = "paragraph";

/// Page number of a provenance entry that has none.
pub const DEFAULT_PAGE_NO: u32 = 1;

/// Coordinate or dimension that the backend did not report.
pub const DEFAULT_COORDINATE: f64 = 0.0;

/// Project a whole source document. `name` becomes `document.name`.
///
/// Fails only when a page key is neither numeric nor accompanied by a
/// page number of its own.
pub fn project_document(name: impl Into<String>, source: &SourceDocument) -> Result<Document> {
    let mut document = Document::new(name);

    document.texts = source.texts.iter().map(project_text).collect();
    document.tables = source.tables.iter().map(project_table).collect();

    if let Some(ref pages) = source.pages {
        for (key, page) in pages {
            let info = project_page(key, page)?;
            document.pages.insert(key.to_string(), info);
        }
    }

    Ok(document)
}

/// Project one text item.
pub fn project_text(item: &SourceTextItem) -> TextItem {
    TextItem {
        self_ref: item.self_ref.clone().unwrap_or_default(),
        label: item
            .label
            .clone()
            .unwrap_or_else(|| DEFAULT_LABEL.to_string()),
        text: match item.text {
            Some(ref text) => text.clone(),
            None => item.to_string(),
        },
        prov: project_provenance_list(item.prov.as_deref()),
        level: item.level,
        marker: item.marker.clone(),
        enumerated: item.enumerated,
    }
}

/// Project one table item. Cell content is not carried.
pub fn project_table(item: &SourceTableItem) -> TableItem {
    TableItem::new(
        item.self_ref.clone().unwrap_or_default(),
        project_provenance_list(item.prov.as_deref()),
    )
}

fn project_provenance_list(prov: Option<&[SourceProvenance]>) -> Vec<Provenance> {
    prov.unwrap_or_default()
        .iter()
        .map(project_provenance)
        .collect()
}

/// Project one provenance entry.
pub fn project_provenance(prov: &SourceProvenance) -> Provenance {
    Provenance {
        page_no: prov.page_no.unwrap_or(DEFAULT_PAGE_NO),
        bbox: prov.bbox.as_ref().map(project_bbox),
    }
}

/// Project a bounding box; unknown sides become zero.
pub fn project_bbox(bbox: &SourceBoundingBox) -> BoundingBox {
    BoundingBox {
        l: bbox.l.unwrap_or(DEFAULT_COORDINATE),
        t: bbox.t.unwrap_or(DEFAULT_COORDINATE),
        r: bbox.r.unwrap_or(DEFAULT_COORDINATE),
        b: bbox.b.unwrap_or(DEFAULT_COORDINATE),
    }
}

/// Project one page entry. The page number falls back to the key.
pub fn project_page(key: &PageKey, page: &SourcePage) -> Result<PageInfo> {
    let page_no = match page.page_no {
        Some(n) => n,
        None => key
            .as_page_no()
            .ok_or_else(|| Error::InvalidPageKey(key.to_string()))?,
    };

    Ok(PageInfo {
        page_no,
        size: project_size(page.size.as_ref()),
    })
}

fn project_size(size: Option<&SourcePageSize>) -> PageSize {
    size.map(|s| PageSize {
        width: s.width.unwrap_or(DEFAULT_COORDINATE),
        height: s.height.unwrap_or(DEFAULT_COORDINATE),
    })
    .unwrap_or_default()
}
