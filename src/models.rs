//! Data models for words, languages, and quiz records.

use serde::{Deserialize, Serialize};

/// A single curated word entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordEntry {
    pub id: String,
    pub word: String,
    pub language: String,
    pub meaning: String,
    pub story: String,
    pub pronunciation: String,
}

/// A language the catalog groups words under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub flag: String,
    /// BCP-47 locale tag handed to the speech synthesizer.
    pub code: String,
}

/// One multiple-choice question from the authored quiz bank.
///
/// Exactly one of `options` equals `correct_answer`; that is a
/// data-authoring contract on the bank, not checked at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word: String,
    pub correct_answer: String,
    pub options: Vec<String>,
    pub language: String,
}

/// A persisted quiz outcome, keyed by calendar date (one per day).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub score: usize,
    pub total: usize,
    pub date: String,
}
