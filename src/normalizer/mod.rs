pub mod language;
pub mod translator;

pub use language::{CANONICAL_LANGUAGE, detect_language};
pub use translator::{GoogleTranslator, TranslateError, Translator};

use serde::Serialize;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedText {
    /// Lower-cased English text.
    pub text: String,
    pub detected_language: String,
    pub was_translated: bool,
}

/// Brings extracted text into lower-cased English.
#[derive(Clone)]
pub struct LanguageNormalizer {
    translator: Arc<dyn Translator>,
}

impl LanguageNormalizer {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self { translator }
    }

    /// Undetectable text is treated as English. A failed translation is
    /// returned as an error; untranslated text is never passed on.
    #[instrument(skip_all, fields(chars = text.len()))]
    pub async fn normalize(&self, text: &str) -> Result<NormalizedText, TranslateError> {
        let detected_language =
            detect_language(text).unwrap_or_else(|| CANONICAL_LANGUAGE.to_string());

        if detected_language == CANONICAL_LANGUAGE {
            return Ok(NormalizedText {
                text: text.to_lowercase(),
                detected_language,
                was_translated: false,
            });
        }

        info!(language = %detected_language, "translating document");
        let translated = self
            .translator
            .translate(text, "auto", CANONICAL_LANGUAGE)
            .await?;

        Ok(NormalizedText {
            text: translated.to_lowercase(),
            detected_language,
            was_translated: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::translator::MockTranslator;

    const SPANISH: &str = "Los miembros reciben una vacuna anual contra la gripe y una colonoscopia de detección cada año.";

    #[tokio::test]
    async fn english_passes_through_lowercased() {
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);
        let normalizer = LanguageNormalizer::new(Arc::new(translator));

        let result = normalizer
            .normalize("Members receive an Annual Flu Vaccine and a colonoscopy screening every year.")
            .await
            .unwrap();

        assert_eq!(result.detected_language, "en");
        assert!(!result.was_translated);
        assert_eq!(
            result.text,
            "members receive an annual flu vaccine and a colonoscopy screening every year."
        );
    }

    #[tokio::test]
    async fn undetectable_text_falls_back_to_english() {
        let mut translator = MockTranslator::new();
        translator.expect_translate().times(0);
        let normalizer = LanguageNormalizer::new(Arc::new(translator));

        let result = normalizer.normalize("BMI / TTY").await.unwrap();
        assert_eq!(result.detected_language, "en");
        assert!(!result.was_translated);
        assert_eq!(result.text, "bmi / tty");
    }

    #[tokio::test]
    async fn foreign_text_is_translated_from_auto_to_english() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .withf(|text, source, target| {
                text.to_string() == SPANISH && source.to_string() == "auto" && target.to_string() == "en"
            })
            .times(1)
            .returning(|_, _, _| {
                Ok("Members receive an annual Flu Vaccine and a screening colonoscopy every year.".to_string())
            });
        let normalizer = LanguageNormalizer::new(Arc::new(translator));

        let result = normalizer.normalize(SPANISH).await.unwrap();
        assert_eq!(result.detected_language, "spa");
        assert!(result.was_translated);
        assert!(result.text.contains("annual flu vaccine"));
    }

    #[tokio::test]
    async fn translation_failure_is_fatal() {
        let mut translator = MockTranslator::new();
        translator
            .expect_translate()
            .returning(|_, _, _| Err(TranslateError::Transport("connection reset".to_string())));
        let normalizer = LanguageNormalizer::new(Arc::new(translator));

        let result = normalizer.normalize(SPANISH).await;
        assert!(matches!(result, Err(TranslateError::Transport(_))));
    }
}
