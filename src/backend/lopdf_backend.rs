//! Backend built on lopdf.
//!
//! Exposes what lopdf reads directly: the page tree, MediaBox sizes and
//! the strings shown by each text object. Headings, lists, reading order
//! and tables are not inferred, so the corresponding attributes of the
//! source graph stay unpopulated.

use std::collections::BTreeMap;
use std::path::Path;

use lopdf::content::Content;
use lopdf::{Document as LopdfDocument, Object, ObjectId};

use super::content::{collect_text_objects, decode_text_simple, TextObject};
use super::{BackendOptions, ConversionBackend, ErrorMode};
use crate::detect;
use crate::error::{Error, Result};
use crate::source::{SourceDocument, SourcePage, SourcePageSize, SourceProvenance, SourceTextItem};

/// Label given to every text item this backend produces.
const TEXT_LABEL: &str = "text";

/// Page-tree depth after which inherited attribute lookup gives up.
const MAX_TREE_DEPTH: usize = 32;

/// Concrete [`ConversionBackend`] backed by `lopdf::Document`.
#[derive(Debug, Clone, Default)]
pub struct LopdfBackend {
    options: BackendOptions,
}

impl LopdfBackend {
    /// Create a backend with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with custom options.
    pub fn with_options(options: BackendOptions) -> Self {
        Self { options }
    }

    /// Convert an in-memory PDF.
    pub fn convert_bytes(&self, data: &[u8]) -> Result<SourceDocument> {
        detect::sniff_bytes(data)?;
        let doc = LopdfDocument::load_mem(data)?;
        self.convert_document(&doc)
    }

    /// Convert an already loaded document.
    pub fn convert_document(&self, doc: &LopdfDocument) -> Result<SourceDocument> {
        let mut source = SourceDocument::new();

        for (page_no, page_id) in doc.get_pages() {
            source.insert_page(
                page_no,
                SourcePage {
                    page_no: Some(page_no),
                    size: page_size(doc, page_id),
                },
            );

            let objects = match page_text_objects(doc, page_id) {
                Ok(objects) => objects,
                Err(e) if self.options.error_mode == ErrorMode::Lenient => {
                    log::warn!("Skipping text of page {}: {}", page_no, e);
                    continue;
                }
                Err(e) => {
                    return Err(Error::TextExtract(format!("Page {}: {}", page_no, e)));
                }
            };

            log::debug!("Page {}: {} text objects", page_no, objects.len());

            for object in objects {
                let index = source.texts.len();
                source.texts.push(text_item(index, page_no, &object));
            }
        }

        Ok(source)
    }
}

impl ConversionBackend for LopdfBackend {
    fn name(&self) -> &str {
        "lopdf"
    }

    fn convert(&self, path: &Path) -> Result<SourceDocument> {
        let header = detect::sniff_path(path)?;
        log::debug!("Loading {} ({})", path.display(), header);

        let doc = LopdfDocument::load(path)?;
        self.convert_document(&doc)
    }
}

fn text_item(index: usize, page_no: u32, object: &TextObject) -> SourceTextItem {
    SourceTextItem {
        self_ref: Some(format!("#/texts/{}", index)),
        label: Some(TEXT_LABEL.to_string()),
        text: Some(object.text()),
        prov: Some(vec![SourceProvenance {
            page_no: Some(page_no),
            bbox: object.bbox(),
        }]),
        ..Default::default()
    }
}

/// Decode a page's content stream and collect its text objects.
fn page_text_objects(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<TextObject>> {
    let fonts = doc.get_page_fonts(page_id)?;
    let encodings: BTreeMap<_, _> = fonts
        .iter()
        .filter_map(|(name, font)| {
            font.get_font_encoding(doc)
                .ok()
                .map(|encoding| (name.clone(), encoding))
        })
        .collect();

    let data = page_content(doc, page_id)?;
    let content = Content::decode(&data)?;

    Ok(collect_text_objects(&content.operations, |font, bytes| {
        encodings
            .get(font)
            .and_then(|encoding| LopdfDocument::decode_text(encoding, bytes).ok())
            .unwrap_or_else(|| decode_text_simple(bytes))
    }))
}

/// Concatenated content streams of a page. A `Contents` entry that is not
/// a stream, or a stream whose filters cannot be applied, is an error.
fn page_content(doc: &LopdfDocument, page_id: ObjectId) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    for content_id in doc.get_page_contents(page_id) {
        let stream = doc.get_object(content_id).and_then(Object::as_stream)?;
        if stream.dict.has(b"Filter") {
            data.extend(stream.decompressed_content()?);
        } else {
            data.extend_from_slice(&stream.content);
        }
        data.push(b'\n');
    }
    Ok(data)
}

/// Page size from the (possibly inherited) MediaBox.
fn page_size(doc: &LopdfDocument, page_id: ObjectId) -> Option<SourcePageSize> {
    let media_box = resolve_inherited(doc, page_id, b"MediaBox")?;
    let values = doc.dereference(media_box).ok()?.1.as_array().ok()?;
    if values.len() != 4 {
        return None;
    }

    let coord = |i: usize| -> Option<f64> {
        let (_, obj) = doc.dereference(&values[i]).ok()?;
        obj.as_float().ok().map(f64::from)
    };

    let width = match (coord(0), coord(2)) {
        (Some(x0), Some(x1)) => Some((x1 - x0).abs()),
        _ => None,
    };
    let height = match (coord(1), coord(3)) {
        (Some(y0), Some(y1)) => Some((y1 - y0).abs()),
        _ => None,
    };

    Some(SourcePageSize { width, height })
}

/// Look up a page attribute, walking up the page tree via /Parent.
fn resolve_inherited<'a>(
    doc: &'a LopdfDocument,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = page_id;
    for _ in 0..MAX_TREE_DEPTH {
        let dict = doc.get_dictionary(current).ok()?;
        if let Ok(value) = dict.get(key) {
            return Some(value);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok()?;
    }
    None
}
