use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingResult {
    /// Distinct measures with at least one matching keyword, in taxonomy order.
    pub matched_measures: Vec<String>,
    pub matched_keywords: Vec<String>,
    pub matched_weight_sum: f64,
    pub total_possible_weight: f64,
    pub rating: f64,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("max rating must be a positive number, got {0}")]
    InvalidMaxRating(f64),
}

/// Scores normalized text against an injected taxonomy.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    taxonomy: Arc<Taxonomy>,
    max_rating: f64,
}

impl ScoringEngine {
    pub fn new(taxonomy: Arc<Taxonomy>, max_rating: f64) -> Result<Self, ScoringError> {
        if !max_rating.is_finite() || max_rating <= 0.0 {
            return Err(ScoringError::InvalidMaxRating(max_rating));
        }
        Ok(Self {
            taxonomy,
            max_rating,
        })
    }

    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    pub fn max_rating(&self) -> f64 {
        self.max_rating
    }

    #[instrument(skip_all, fields(text_len = text.len()))]
    pub fn score(&self, text: &str) -> RatingResult {
        score(text, &self.taxonomy, self.max_rating)
    }
}

/// Match `text` against `taxonomy` and map the matched weight onto
/// `[0, max_rating]`.
///
/// Weights are summed in measure declaration order, so the same text and
/// taxonomy always produce bit-identical output.
pub fn score(text: &str, taxonomy: &Taxonomy, max_rating: f64) -> RatingResult {
    let measures = taxonomy.measures();
    let mut matched = vec![false; measures.len()];
    let mut matched_keywords = Vec::new();

    for keyword_index in taxonomy.matching_keywords(text) {
        matched[taxonomy.measure_index_of(keyword_index)] = true;
        matched_keywords.push(taxonomy.keywords()[keyword_index].keyword.clone());
    }

    let mut matched_measures = Vec::new();
    let mut matched_weight_sum = 0.0;
    for (measure, _) in measures.iter().zip(&matched).filter(|(_, hit)| **hit) {
        matched_weight_sum += measure.weight;
        matched_measures.push(measure.name.clone());
    }

    let total_possible_weight = taxonomy.total_possible_weight();
    let rating = if matched_measures.is_empty() {
        0.0
    } else {
        round2(matched_weight_sum / total_possible_weight * max_rating).clamp(0.0, max_rating)
    };

    debug!(
        matched = matched_measures.len(),
        matched_weight_sum, rating, "scored document"
    );

    RatingResult {
        matched_measures,
        matched_keywords,
        matched_weight_sum,
        total_possible_weight,
        rating,
    }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::eoc_taxonomy;
    use proptest::prelude::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(Arc::new(eoc_taxonomy().unwrap()), 3.7).unwrap()
    }

    #[test]
    fn flu_vaccine_and_colonoscopy_scenario() {
        let engine = engine();
        let result =
            engine.score("Members receive an annual flu vaccine and a colonoscopy screening.");

        assert_eq!(
            result.matched_measures,
            vec!["Colorectal Cancer Screening", "Annual Flu Vaccine"]
        );
        assert_eq!(result.matched_weight_sum, 2.5);
        assert_eq!(result.total_possible_weight, 46.5);
        assert_eq!(result.rating, round2(2.5 / 46.5 * 3.7));
        assert_eq!(result.rating, 0.2);
    }

    #[test]
    fn whole_word_matching() {
        let engine = engine();
        let hit = engine.score("covers pneumonia shots");
        assert_eq!(hit.matched_measures, vec!["Pneumonia Vaccination"]);

        let miss = engine.score("a pneumoniac condition");
        assert!(miss.matched_measures.is_empty());
        assert_eq!(miss.rating, 0.0);
    }

    #[test]
    fn same_measure_counted_once() {
        let engine = engine();
        let result = engine.score("we track blood pressure and treat hypertension");

        assert_eq!(result.matched_measures, vec!["Controlling Blood Pressure"]);
        assert_eq!(result.matched_keywords, vec!["hypertension", "blood pressure"]);
        assert_eq!(result.matched_weight_sum, 3.0);
    }

    #[test]
    fn empty_text_scores_zero() {
        let result = engine().score("");
        assert_eq!(result.rating, 0.0);
        assert_eq!(result.matched_weight_sum, 0.0);
        assert_eq!(result.total_possible_weight, 46.5);
    }

    #[test]
    fn every_keyword_reaches_max_rating() {
        let engine = engine();
        let text = crate::taxonomy::eoc::KEYWORDS
            .iter()
            .map(|(k, _)| *k)
            .collect::<Vec<_>>()
            .join(". ");
        let result = engine.score(&text);
        // "Disenrollment Info" has no trigger
        assert_eq!(result.matched_weight_sum, 45.0);
        assert_eq!(result.rating, round2(45.0 / 46.5 * 3.7));
        assert!(result.rating <= 3.7);
    }

    #[test]
    fn full_weight_gives_max_rating() {
        let taxonomy = Taxonomy::builder()
            .measure("Care Coordination", 1.5)
            .keyword("care coordination", "Care Coordination")
            .build()
            .unwrap();
        let result = score("Care Coordination is included", &taxonomy, 3.7);
        assert_eq!(result.rating, 3.7);
    }

    #[test]
    fn rejects_invalid_max_rating() {
        let taxonomy = Arc::new(eoc_taxonomy().unwrap());
        assert!(ScoringEngine::new(taxonomy.clone(), 0.0).is_err());
        assert!(ScoringEngine::new(taxonomy.clone(), -1.0).is_err());
        assert!(ScoringEngine::new(taxonomy, f64::INFINITY).is_err());
    }

    #[test]
    fn total_weight_stable_across_calls() {
        let engine = engine();
        let first = engine.score("statin").total_possible_weight;
        let second = engine.score("formulary and tty").total_possible_weight;
        assert_eq!(first, second);
        assert_eq!(first, engine.taxonomy().total_possible_weight());
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.19892), 0.2);
        assert_eq!(round2(0.0), 0.0);
    }

    proptest! {
        #[test]
        fn rating_is_bounded(text in "[a-z ]{0,200}") {
            let result = engine().score(&text);
            prop_assert!(result.rating >= 0.0);
            prop_assert!(result.rating <= 3.7);
            prop_assert_eq!(result.rating == 0.0, result.matched_measures.is_empty());
        }

        #[test]
        fn scoring_is_idempotent(text in "\\PC{0,200}") {
            let engine = engine();
            let first = engine.score(&text);
            let second = engine.score(&text);
            prop_assert_eq!(first.rating.to_bits(), second.rating.to_bits());
            prop_assert_eq!(first, second);
        }
    }
}
