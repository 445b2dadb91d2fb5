#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use eoc_rating::{
    app_state::AppState,
    config::Config,
    normalizer::{TranslateError, Translator},
    pipeline::RatingPipeline,
    router::router,
    taxonomy::eoc_taxonomy,
};

/// Translator double that records every call.
#[derive(Default)]
pub struct StubTranslator {
    pub response: Option<String>,
    pub calls: Mutex<Vec<(String, String, String)>>,
}

impl StubTranslator {
    pub fn returning(text: &str) -> Self {
        Self {
            response: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslateError> {
        self.calls
            .lock()
            .unwrap()
            .push((text.to_string(), source.to_string(), target.to_string()));
        self.response
            .clone()
            .ok_or_else(|| TranslateError::Transport("translation service unreachable".to_string()))
    }
}

pub fn test_config(staging_dir: &Path) -> Config {
    Config::default()
        .with_retry_base_delay(Duration::ZERO)
        .with_staging_dir(staging_dir)
}

pub fn test_app(staging_dir: &Path, translator: Arc<StubTranslator>) -> Router {
    let taxonomy = Arc::new(eoc_taxonomy().expect("taxonomy"));
    let pipeline = RatingPipeline::from_config(&test_config(staging_dir), taxonomy, translator)
        .expect("pipeline");
    router(AppState::new(pipeline))
}

/// Minimal PDF with one text line per page.
pub fn build_pdf(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(page_id.into());
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
