//! The read-only word catalog.
//!
//! Words, language descriptors, and the quiz question bank ship as a
//! bundled JSON asset and never change for the lifetime of the process.

use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::models::{Language, QuizQuestion, WordEntry};

/// Bundled catalog: curated words for all supported languages.
const BUNDLED_CATALOG: &str = include_str!("../bundled_words/catalog.json");

/// Sentinel language selection meaning "no filtering".
pub const ALL_LANGUAGES: &str = "All";

#[derive(Debug, Deserialize)]
struct CatalogData {
    languages: Vec<Language>,
    words: HashMap<String, Vec<WordEntry>>,
    questions: Vec<QuizQuestion>,
}

/// Immutable word catalog, parsed once at startup.
pub struct Catalog {
    data: CatalogData,
}

impl Catalog {
    /// Parse the bundled asset. Fails only if the shipped JSON is broken,
    /// which is a packaging error rather than a runtime condition.
    pub fn load() -> Result<Self> {
        let data: CatalogData =
            serde_json::from_str(BUNDLED_CATALOG).context("Failed to parse bundled catalog")?;
        Ok(Self { data })
    }

    /// Words for a language, in authored order. Unknown languages yield
    /// an empty slice, never an error.
    pub fn words(&self, language: &str) -> &[WordEntry] {
        self.data
            .words
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Ordered language descriptors.
    pub fn languages(&self) -> &[Language] {
        &self.data.languages
    }

    /// Speech locale for a language name, if it is a known grouping.
    pub fn locale_for(&self, language: &str) -> Option<&str> {
        self.data
            .languages
            .iter()
            .find(|l| l.name == language)
            .map(|l| l.code.as_str())
    }

    /// The full authored quiz bank.
    pub fn question_bank(&self) -> &[QuizQuestion] {
        &self.data.questions
    }
}

/// Keep only entries matching `selection`; `"All"` passes everything through.
pub fn filter_by_language(entries: &[WordEntry], selection: &str) -> Vec<WordEntry> {
    if selection == ALL_LANGUAGES {
        return entries.to_vec();
    }
    entries
        .iter()
        .filter(|w| w.language == selection)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_catalog_parses() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.languages().len(), 12);
        assert!(!catalog.question_bank().is_empty());
    }

    #[test]
    fn test_unknown_language_is_empty_not_error() {
        let catalog = Catalog::load().unwrap();
        assert!(catalog.words("Klingon").is_empty());
        assert!(catalog.locale_for("Klingon").is_none());
    }

    #[test]
    fn test_words_grouped_under_their_language() {
        let catalog = Catalog::load().unwrap();
        for lang in catalog.languages() {
            let words = catalog.words(&lang.name);
            assert!(!words.is_empty(), "no words for {}", lang.name);
            assert!(words.iter().all(|w| w.language == lang.name));
        }
    }

    #[test]
    fn test_full_curated_set_per_language() {
        let catalog = Catalog::load().unwrap();
        for lang in catalog.languages() {
            assert_eq!(
                catalog.words(&lang.name).len(),
                20,
                "curated set for {}",
                lang.name
            );
        }
    }

    #[test]
    fn test_question_bank_has_four_options_with_one_correct() {
        let catalog = Catalog::load().unwrap();
        for q in catalog.question_bank() {
            assert_eq!(q.options.len(), 4, "bank entry for {}", q.word);
            let correct = q.options.iter().filter(|o| **o == q.correct_answer).count();
            assert_eq!(correct, 1, "bank entry for {}", q.word);
        }
    }

    #[test]
    fn test_filter_all_sentinel_passes_through() {
        let catalog = Catalog::load().unwrap();
        let mut mixed: Vec<WordEntry> = catalog.words("Arabic").to_vec();
        mixed.extend(catalog.words("Japanese").iter().cloned());

        let all = filter_by_language(&mixed, ALL_LANGUAGES);
        assert_eq!(all.len(), mixed.len());

        let arabic = filter_by_language(&mixed, "Arabic");
        assert!(arabic.iter().all(|w| w.language == "Arabic"));
        assert_eq!(arabic.len(), catalog.words("Arabic").len());
    }
}
