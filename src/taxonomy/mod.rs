//! Weighted quality measures and the keywords that trigger them.
//!
//! A [`Taxonomy`] is validated and compiled once, then shared read-only by
//! every request. Keyword patterns live in a single [`RegexSet`] so a document
//! is scanned in one pass regardless of taxonomy size.

pub mod eoc;

use regex::RegexSet;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

pub use eoc::eoc_taxonomy;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Measure {
    pub name: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordEntry {
    pub keyword: String,
    pub measure_name: String,
}

#[derive(Debug, Error)]
pub enum TaxonomyError {
    #[error("taxonomy has no measures")]
    Empty,

    #[error("measure name must not be empty")]
    EmptyMeasureName,

    #[error("duplicate measure '{0}'")]
    DuplicateMeasure(String),

    #[error("measure '{name}' has non-positive weight {weight}")]
    InvalidWeight { name: String, weight: f64 },

    #[error("keyword for measure '{0}' is empty")]
    EmptyKeyword(String),

    #[error("keyword '{0}' is declared more than once")]
    DuplicateKeyword(String),

    #[error("keyword '{keyword}' references unknown measure '{measure}'")]
    UnknownMeasure { keyword: String, measure: String },

    #[error("failed to compile keyword patterns: {0}")]
    Pattern(#[from] regex::Error),
}

#[derive(Debug, Default)]
pub struct TaxonomyBuilder {
    measures: Vec<Measure>,
    keywords: Vec<KeywordEntry>,
}

impl TaxonomyBuilder {
    pub fn measure(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.measures.push(Measure {
            name: name.into(),
            weight,
        });
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>, measure: impl Into<String>) -> Self {
        self.keywords.push(KeywordEntry {
            keyword: keyword.into(),
            measure_name: measure.into(),
        });
        self
    }

    pub fn build(self) -> Result<Taxonomy, TaxonomyError> {
        Taxonomy::new(self.measures, self.keywords)
    }
}

/// Immutable, validated measure set with compiled keyword matchers.
#[derive(Debug)]
pub struct Taxonomy {
    measures: Vec<Measure>,
    keywords: Vec<KeywordEntry>,
    // keyword index -> measure index
    keyword_measure: Vec<usize>,
    patterns: RegexSet,
    total_weight: f64,
}

impl Taxonomy {
    pub fn builder() -> TaxonomyBuilder {
        TaxonomyBuilder::default()
    }

    pub fn new(measures: Vec<Measure>, keywords: Vec<KeywordEntry>) -> Result<Self, TaxonomyError> {
        if measures.is_empty() {
            return Err(TaxonomyError::Empty);
        }

        validate_measures(&measures)?;

        let mut normalized = Vec::with_capacity(keywords.len());
        let mut keyword_measure = Vec::with_capacity(keywords.len());
        let mut seen_keywords = HashSet::new();
        for entry in keywords {
            let keyword = normalize_keyword(&entry.keyword);
            if keyword.is_empty() {
                return Err(TaxonomyError::EmptyKeyword(entry.measure_name));
            }
            let Some(index) = measures.iter().position(|m| m.name == entry.measure_name) else {
                return Err(TaxonomyError::UnknownMeasure {
                    keyword,
                    measure: entry.measure_name,
                });
            };
            if !seen_keywords.insert(keyword.clone()) {
                return Err(TaxonomyError::DuplicateKeyword(keyword));
            }
            keyword_measure.push(index);
            normalized.push(KeywordEntry {
                keyword,
                measure_name: entry.measure_name,
            });
        }

        let patterns = RegexSet::new(normalized.iter().map(|k| keyword_pattern(&k.keyword)))?;

        // Declaration order; scoring sums matched weights in the same order.
        let total_weight = measures.iter().map(|m| m.weight).sum();

        Ok(Self {
            measures,
            keywords: normalized,
            keyword_measure,
            patterns,
            total_weight,
        })
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn keywords(&self) -> &[KeywordEntry] {
        &self.keywords
    }

    pub fn total_possible_weight(&self) -> f64 {
        self.total_weight
    }

    /// Indices into [`Taxonomy::keywords`] of every keyword found in `text`,
    /// ascending.
    pub fn matching_keywords(&self, text: &str) -> Vec<usize> {
        self.patterns.matches(text).into_iter().collect()
    }

    /// Index into [`Taxonomy::measures`] for the keyword at `keyword_index`.
    pub fn measure_index_of(&self, keyword_index: usize) -> usize {
        self.keyword_measure[keyword_index]
    }
}

fn validate_measures(measures: &[Measure]) -> Result<(), TaxonomyError> {
    let mut seen = HashSet::new();
    for measure in measures {
        if measure.name.trim().is_empty() {
            return Err(TaxonomyError::EmptyMeasureName);
        }
        if !measure.weight.is_finite() || measure.weight <= 0.0 {
            return Err(TaxonomyError::InvalidWeight {
                name: measure.name.clone(),
                weight: measure.weight,
            });
        }
        if !seen.insert(measure.name.as_str()) {
            return Err(TaxonomyError::DuplicateMeasure(measure.name.clone()));
        }
    }
    Ok(())
}

/// Lower-case and collapse whitespace runs to a single space.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Whole-word, case-insensitive pattern; words of a phrase may be separated
/// by any whitespace run so line breaks inside a phrase still match.
fn keyword_pattern(keyword: &str) -> String {
    let body = keyword
        .split(' ')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"\s+");
    format!(r"(?i)\b{body}\b")
}
