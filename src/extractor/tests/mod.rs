use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use crate::extractor::{ExtractError, TextExtractor, extract_text};

/// Build a PDF with one page per entry; `None` produces a page with no
/// content stream.
fn build_pdf(pages: &[Option<&str>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let mut page = dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Resources" => resources_id,
        };
        if let Some(text) = text {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 12.into()]),
                    Operation::new("Td", vec![72.into(), 720.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*text)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            page.set("Contents", content_id);
        }
        kids.push(doc.add_object(page).into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

fn staged_files(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir).unwrap().count()
}

#[test]
fn extracts_single_page() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = build_pdf(&[Some("Members receive an annual flu vaccine")]);

    let text = extract_text(dir.path(), &pdf).unwrap();
    assert!(text.contains("annual flu vaccine"));
    assert_eq!(staged_files(dir.path()), 0);
}

#[test]
fn keeps_page_order_and_tolerates_empty_pages() {
    let dir = tempfile::tempdir().unwrap();
    let pdf = build_pdf(&[Some("Alpha page"), None, Some("Omega page")]);

    let text = extract_text(dir.path(), &pdf).unwrap();
    let alpha = text.find("Alpha page").expect("first page text");
    let omega = text.find("Omega page").expect("last page text");
    assert!(alpha < omega);
}

#[test]
fn unparseable_document_fails_and_leaves_nothing_staged() {
    let dir = tempfile::tempdir().unwrap();

    let result = extract_text(dir.path(), b"%PDF-1.4\nthis is not really a pdf");
    assert!(matches!(result, Err(ExtractError::Parse(_))));
    assert_eq!(staged_files(dir.path()), 0);
}

#[test]
fn missing_staging_dir_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let result = extract_text(&dir.path().join("gone"), &build_pdf(&[Some("x")]));
    assert!(matches!(result, Err(ExtractError::Staging(_))));
}

#[tokio::test]
async fn async_extract_runs_on_blocking_pool() {
    let dir = tempfile::tempdir().unwrap();
    let extractor = TextExtractor::new(dir.path());
    let pdf = build_pdf(&[Some("prior authorization"), Some("pharmacy network")]);

    let text = extractor.extract(pdf.into()).await.unwrap();
    assert!(text.contains("prior authorization"));
    assert!(text.contains("pharmacy network"));
    assert_eq!(staged_files(dir.path()), 0);
}
