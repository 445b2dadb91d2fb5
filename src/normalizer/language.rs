use whatlang::Lang;

/// Canonical language every document is normalized to.
pub const CANONICAL_LANGUAGE: &str = "en";

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_LENGTH: usize = 50;

/// Language of `text`: `"en"` for English, whatlang's ISO 639-3 code for
/// anything else. `None` when the text is too short to judge or the
/// detector is unsure.
pub fn detect_language(text: &str) -> Option<String> {
    if text.trim().len() < MIN_TEXT_LENGTH {
        return None;
    }

    whatlang::detect(text)
        .filter(|info| info.confidence() >= MIN_CONFIDENCE)
        .map(|info| match info.lang() {
            Lang::Eng => CANONICAL_LANGUAGE.to_string(),
            other => other.code().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_coverage_text_is_canonical() {
        let text = "This Evidence of Coverage explains your benefits, including preventive care and prescription drugs.";
        assert_eq!(detect_language(text).as_deref(), Some(CANONICAL_LANGUAGE));
    }

    #[test]
    fn other_languages_keep_their_detector_code() {
        let text = "Esta Evidencia de Cobertura explica sus beneficios, incluidos los servicios preventivos y los medicamentos.";
        assert_eq!(detect_language(text).as_deref(), Some("spa"));
    }

    #[test]
    fn short_text_is_not_judged() {
        assert_eq!(detect_language("Member ID / TTY 711"), None);
        assert_eq!(detect_language("   "), None);
    }

    #[test]
    fn symbols_only_are_not_judged() {
        let text =
            "1 2 3 4 5 6 7 8 9 0 ! @ # $ % ^ & * ( ) - = + [ ] { } | \\ : ; \" ' < > , . ? /";
        assert_eq!(detect_language(text), None);
    }
}
