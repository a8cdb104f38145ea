//! Quiz engine: a small state machine over a shuffled question bank.
//!
//! The engine is deliberately clock-free: the caller passes `Instant`s
//! into [`QuizEngine::confirm`] and [`QuizEngine::tick`], so the reveal
//! delay is deterministic under test.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::QuizQuestion;

/// How long a confirmed answer stays highlighted before the next question.
pub const REVEAL_DELAY: Duration = Duration::from_millis(1500);

/// Terminal result of a session, reported exactly once by [`QuizEngine::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizOutcome {
    pub score: usize,
    pub total: usize,
}

/// In-memory quiz session. Persisted history is the caller's concern.
pub struct QuizEngine {
    questions: Vec<QuizQuestion>,
    current: usize,
    selected: Option<String>,
    score: usize,
    completed: bool,
    reveal_until: Option<Instant>,
    reveal_delay: Duration,
}

impl QuizEngine {
    /// Start a session over a uniformly shuffled copy of the full bank.
    pub fn new<R: Rng + ?Sized>(bank: &[QuizQuestion], reveal_delay: Duration, rng: &mut R) -> Self {
        let mut questions = bank.to_vec();
        questions.shuffle(rng);
        Self {
            questions,
            current: 0,
            selected: None,
            score: 0,
            completed: false,
            reveal_until: None,
            reveal_delay,
        }
    }

    pub fn current_question(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.current)
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// True while a confirmed answer is being shown highlighted.
    pub fn revealing(&self) -> bool {
        self.reveal_until.is_some()
    }

    /// Choose (or re-choose) an answer for the current question. Ignored
    /// once completed or while the previous result is still on screen.
    pub fn select(&mut self, option: &str) {
        if self.completed || self.revealing() {
            return;
        }
        self.selected = Some(option.to_string());
    }

    /// Confirm the selected answer: score it and start the reveal window.
    /// A no-op without a selection, so an accidental confirm can never be
    /// scored, and re-entrant confirms during the window are ignored.
    pub fn confirm(&mut self, now: Instant) {
        if self.completed || self.revealing() {
            return;
        }
        let Some(selected) = self.selected.as_deref() else {
            return;
        };
        if let Some(question) = self.questions.get(self.current) {
            if selected == question.correct_answer {
                self.score += 1;
            }
            self.reveal_until = Some(now + self.reveal_delay);
        }
    }

    /// Advance past an elapsed reveal window. Returns the session outcome
    /// exactly once, on the transition to the completed state.
    pub fn tick(&mut self, now: Instant) -> Option<QuizOutcome> {
        let deadline = self.reveal_until?;
        if now < deadline {
            return None;
        }
        self.reveal_until = None;

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.selected = None;
            None
        } else {
            self.completed = true;
            Some(QuizOutcome {
                score: self.score,
                total: self.questions.len(),
            })
        }
    }

    /// Discard the session and start over with a fresh permutation. Any
    /// pending reveal is cancelled, so a stale transition cannot fire.
    pub fn reset<R: Rng + ?Sized>(&mut self, bank: &[QuizQuestion], rng: &mut R) {
        *self = Self::new(bank, self.reveal_delay, rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bank() -> Vec<QuizQuestion> {
        (1..=5)
            .map(|i| QuizQuestion {
                word: format!("word-{}", i),
                correct_answer: format!("right-{}", i),
                options: vec![
                    format!("right-{}", i),
                    "wrong-a".to_string(),
                    "wrong-b".to_string(),
                    "wrong-c".to_string(),
                ],
                language: "Arabic".to_string(),
            })
            .collect()
    }

    fn engine(seed: u64) -> QuizEngine {
        let mut rng = StdRng::seed_from_u64(seed);
        QuizEngine::new(&bank(), REVEAL_DELAY, &mut rng)
    }

    /// Answer the current question, elapse the reveal window, advance.
    fn answer(engine: &mut QuizEngine, option: String, t: &mut Instant) -> Option<QuizOutcome> {
        engine.select(&option);
        engine.confirm(*t);
        *t += REVEAL_DELAY;
        engine.tick(*t)
    }

    #[test]
    fn test_shuffle_is_full_permutation() {
        let engine = engine(7);
        assert_eq!(engine.len(), 5);
        let mut words: Vec<&str> = engine.questions.iter().map(|q| q.word.as_str()).collect();
        words.sort_unstable();
        assert_eq!(words, ["word-1", "word-2", "word-3", "word-4", "word-5"]);
    }

    #[test]
    fn test_all_correct_run_scores_full() {
        let mut engine = engine(1);
        let mut t = Instant::now();

        let mut outcome = None;
        for _ in 0..5 {
            let correct = engine.current_question().unwrap().correct_answer.clone();
            outcome = answer(&mut engine, correct, &mut t);
        }

        assert!(engine.completed());
        assert_eq!(engine.score(), 5);
        assert_eq!(outcome, Some(QuizOutcome { score: 5, total: 5 }));
    }

    #[test]
    fn test_two_of_five_correct_scores_two() {
        // Correct answers on the 2nd and 4th questions, wrong elsewhere.
        let mut engine = engine(2);
        let mut t = Instant::now();

        for i in 0..5 {
            let q = engine.current_question().unwrap();
            let choice = if i == 1 || i == 3 {
                q.correct_answer.clone()
            } else {
                q.options
                    .iter()
                    .find(|o| **o != q.correct_answer)
                    .unwrap()
                    .clone()
            };
            answer(&mut engine, choice, &mut t);
        }

        assert!(engine.completed());
        assert_eq!(engine.score(), 2);
    }

    #[test]
    fn test_confirm_without_selection_is_rejected() {
        let mut engine = engine(3);
        let t = Instant::now();

        engine.confirm(t);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(!engine.revealing());
    }

    #[test]
    fn test_reveal_window_blocks_reselection_and_reconfirm() {
        let mut engine = engine(4);
        let t = Instant::now();
        let correct = engine.current_question().unwrap().correct_answer.clone();

        engine.select(&correct);
        engine.confirm(t);
        assert!(engine.revealing());
        assert_eq!(engine.score(), 1);

        // Neither a new selection nor a second confirm may land mid-reveal.
        engine.select("wrong-a");
        engine.confirm(t);
        assert_eq!(engine.selected(), Some(correct.as_str()));
        assert_eq!(engine.score(), 1);

        // Window not yet elapsed: no transition.
        assert!(engine.tick(t).is_none());
        assert_eq!(engine.current_index(), 0);
    }

    #[test]
    fn test_reset_cancels_pending_reveal() {
        let mut engine = engine(5);
        let t = Instant::now();
        let correct = engine.current_question().unwrap().correct_answer.clone();

        engine.select(&correct);
        engine.confirm(t);
        assert!(engine.revealing());

        let mut rng = StdRng::seed_from_u64(55);
        engine.reset(&bank(), &mut rng);

        // The stale transition must not fire after the old deadline.
        assert!(engine.tick(t + REVEAL_DELAY).is_none());
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(!engine.completed());
    }

    #[test]
    fn test_reset_after_completion_starts_fresh() {
        let mut engine = engine(6);
        let mut t = Instant::now();
        for _ in 0..5 {
            let correct = engine.current_question().unwrap().correct_answer.clone();
            answer(&mut engine, correct, &mut t);
        }
        assert!(engine.completed());

        // Selection and confirm are frozen once completed.
        engine.select("wrong-a");
        engine.confirm(t);
        assert_eq!(engine.score(), 5);

        let mut rng = StdRng::seed_from_u64(66);
        engine.reset(&bank(), &mut rng);
        assert_eq!(engine.current_index(), 0);
        assert_eq!(engine.score(), 0);
        assert!(!engine.completed());
        assert_eq!(engine.len(), 5);
        assert!(engine.selected().is_none());
    }

    #[test]
    fn test_completed_run_persists_daily_record() {
        use crate::store::{today_stamp, MemoryStore, Profile};

        let mut engine = engine(8);
        let mut t = Instant::now();
        let mut outcome = None;
        for _ in 0..5 {
            let correct = engine.current_question().unwrap().correct_answer.clone();
            outcome = answer(&mut engine, correct, &mut t);
        }

        let profile = Profile::load(Box::new(MemoryStore::default()));
        let outcome = outcome.unwrap();
        profile
            .record_quiz_result(outcome.score, outcome.total)
            .unwrap();

        let results = profile.quiz_results();
        let today = results.get(&today_stamp()).unwrap();
        assert_eq!((today.score, today.total), (5, 5));
    }
}
