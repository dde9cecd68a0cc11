//! Integration tests for the converter and the projection of source graphs.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pdfjson::error::Result;
use pdfjson::render::{to_json, JsonFormat};
use pdfjson::{
    ConversionBackend, ConversionResult, Converter, Error, ErrorKind, PageKey, SourceBoundingBox,
    SourceDocument, SourcePage, SourcePageSize, SourceProvenance, SourceTableItem, SourceTextItem,
};
use serde_json::{json, Value};

/// Mock backend returning a fixed source graph.
struct MockBackend {
    source: SourceDocument,
}

impl MockBackend {
    fn new(source: SourceDocument) -> Arc<Self> {
        Arc::new(Self { source })
    }
}

impl ConversionBackend for MockBackend {
    fn name(&self) -> &str {
        "mock"
    }

    fn convert(&self, _path: &Path) -> Result<SourceDocument> {
        Ok(self.source.clone())
    }
}

/// Mock backend that always fails.
struct FailingBackend;

impl ConversionBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    fn convert(&self, _path: &Path) -> Result<SourceDocument> {
        Err(Error::PdfParse("unexpected end of xref".to_string()))
    }
}

/// An existing input file; the mock backends never read it.
fn input_file(dir: &tempfile::TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"%PDF-1.7\n").unwrap();
    path
}

fn convert_to_value(source: SourceDocument, name: &str) -> Value {
    let dir = tempfile::tempdir().unwrap();
    let path = input_file(&dir, name);
    let result = Converter::with_backend(MockBackend::new(source)).run(&path);
    serde_json::from_str(&to_json(&result, JsonFormat::Compact).unwrap()).unwrap()
}

fn text(self_ref: &str, label: &str, body: &str, page_no: u32) -> SourceTextItem {
    SourceTextItem {
        self_ref: Some(self_ref.to_string()),
        label: Some(label.to_string()),
        text: Some(body.to_string()),
        prov: Some(vec![SourceProvenance::on_page(page_no)]),
        ..Default::default()
    }
}

#[test]
fn test_counts_and_order_are_preserved() {
    let mut source = SourceDocument::new();
    source.texts = (0..5)
        .map(|i| text(&format!("#/texts/{}", i), "text", &format!("item {}", i), 1))
        .collect();
    source.tables = (0..2)
        .map(|i| SourceTableItem {
            self_ref: Some(format!("#/tables/{}", i)),
            prov: Some(vec![SourceProvenance::on_page(2)]),
        })
        .collect();

    let value = convert_to_value(source, "counts.pdf");
    let document = &value["document"];

    let texts = document["texts"].as_array().unwrap();
    assert_eq!(texts.len(), 5);
    for (i, item) in texts.iter().enumerate() {
        assert_eq!(item["self_ref"], format!("#/texts/{}", i));
        assert_eq!(item["text"], format!("item {}", i));
    }

    let tables = document["tables"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[1]["self_ref"], "#/tables/1");
    assert_eq!(tables[1]["label"], "table");
    assert_eq!(tables[1]["prov"][0]["page_no"], 2);
}

#[test]
fn test_heading_and_list_item_fields() {
    let mut source = SourceDocument::new();

    let mut heading = text("#/texts/0", "section_header", "Results", 1);
    heading.level = Some(2);

    let mut item = text("#/texts/1", "list_item", "First point", 1);
    item.marker = Some("-".to_string());
    item.enumerated = Some(false);

    source.texts = vec![heading, item];

    let value = convert_to_value(source, "lists.pdf");
    let texts = &value["document"]["texts"];

    assert_eq!(texts[0]["level"], 2);
    assert!(texts[0].get("marker").is_none());
    assert!(texts[0].get("enumerated").is_none());

    assert_eq!(texts[1]["marker"], "-");
    assert_eq!(texts[1]["enumerated"], false);
    assert!(texts[1].get("level").is_none());
}

#[test]
fn test_sparse_graph_gets_defaults() {
    let mut source = SourceDocument::new();
    source.texts.push(SourceTextItem {
        self_ref: Some("#/texts/0".to_string()),
        text: Some("Hello".to_string()),
        prov: Some(vec![
            SourceProvenance::default(),
            SourceProvenance {
                page_no: Some(3),
                bbox: Some(SourceBoundingBox {
                    l: Some(10.5),
                    t: Some(700.0),
                    r: None,
                    b: None,
                }),
            },
        ]),
        ..Default::default()
    });
    source.tables.push(SourceTableItem::default());
    source.insert_page(
        4,
        SourcePage {
            page_no: None,
            size: Some(SourcePageSize {
                width: Some(612.0),
                height: None,
            }),
        },
    );

    let value = convert_to_value(source, "sparse.pdf");
    let document = &value["document"];

    let item = &document["texts"][0];
    assert_eq!(item["label"], "paragraph");
    assert_eq!(item["prov"][0], json!({"page_no": 1}));
    assert_eq!(
        item["prov"][1]["bbox"],
        json!({"l": 10.5, "t": 700.0, "r": 0.0, "b": 0.0})
    );

    assert_eq!(document["tables"][0], json!({"self_ref": "", "label": "table", "prov": []}));

    assert_eq!(
        document["pages"]["4"],
        json!({"page_no": 4, "size": {"width": 612.0, "height": 0.0}})
    );
}

#[test]
fn test_missing_page_mapping_is_empty_object() {
    let value = convert_to_value(SourceDocument::new(), "empty.pdf");

    assert_eq!(value["status"], "success");
    assert_eq!(value["errors"], json!([]));
    assert_eq!(
        value["document"],
        json!({"name": "empty", "texts": [], "tables": [], "pages": {}})
    );
}

#[test]
fn test_page_order_follows_source() {
    let mut source = SourceDocument::new();
    for n in [3u32, 1, 2] {
        source.insert_page(
            n,
            SourcePage {
                page_no: Some(n),
                size: None,
            },
        );
    }

    let dir = tempfile::tempdir().unwrap();
    let path = input_file(&dir, "order.pdf");
    let result = Converter::with_backend(MockBackend::new(source))
        .convert(&path)
        .unwrap();

    let keys: Vec<_> = result.document.unwrap().pages.keys().cloned().collect();
    assert_eq!(keys, vec!["3", "1", "2"]);
}

#[test]
fn test_non_numeric_page_key_is_conversion_error() {
    let mut source = SourceDocument::new();
    source.insert_page(PageKey::from("cover"), SourcePage::default());

    let value = convert_to_value(source, "cover.pdf");

    assert_eq!(value["status"], "error");
    assert!(value.get("document").is_none());
    assert_eq!(
        value["errors"][0]["error_message"],
        "Invalid page key: \"cover\""
    );
}

#[test]
fn test_backend_failure_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = input_file(&dir, "broken.pdf");
    let converter = Converter::with_backend(Arc::new(FailingBackend));

    let err = converter.convert(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conversion);

    let result = converter.run(&path);
    assert!(!result.is_success());
    assert!(result.document.is_none());
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].error_message, err.to_string());
}

#[test]
fn test_missing_file_never_reaches_backend() {
    let converter = Converter::with_backend(Arc::new(FailingBackend));
    let result: ConversionResult = converter.run("/no/such.pdf");

    assert_eq!(
        to_json(&result, JsonFormat::Compact).unwrap(),
        r#"{"status":"error","errors":[{"error_message":"File not found: /no/such.pdf"}]}"#
    );
}

#[test]
fn test_backend_name() {
    let converter = Converter::with_backend(MockBackend::new(SourceDocument::new()));
    assert_eq!(converter.backend_name(), "mock");
}
