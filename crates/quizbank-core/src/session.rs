//! Quiz session state machine.
//!
//! A [`SessionState`] owns a shuffled copy of one bank section, a cursor to
//! the next unanswered question, and the running score. It is configured
//! from a [`BankIndex`], driven by `current` / `check_answer`, and can be
//! snapshotted at any question boundary by the save codec.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::{
    option_label, upper_char, BankIndex, Difficulty, GradeLevel, QuestionRecord,
};

/// The selection that produced the current pool.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMeta {
    #[serde(default)]
    pub grade_level: String,
    #[serde(default)]
    pub difficulty: String,
}

/// State of the active quiz session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pool: Vec<QuestionRecord>,
    cursor: usize,
    score: u32,
    meta: SessionMeta,
}

impl SessionState {
    /// An empty, unconfigured session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a session from restored parts. The cursor starts at 0.
    pub(crate) fn restored(pool: Vec<QuestionRecord>, score: u32, meta: SessionMeta) -> Self {
        Self {
            pool,
            cursor: 0,
            score,
            meta,
        }
    }

    /// Start a new session using the thread RNG. See [`Self::configure_with_rng`].
    pub fn configure(
        &mut self,
        bank: &BankIndex,
        grade_level: &str,
        difficulty: &str,
        limit: Option<i64>,
    ) -> Result<()> {
        self.configure_with_rng(bank, grade_level, difficulty, limit, &mut rand::rng())
    }

    /// Copy the matching bank section, shuffle it, and truncate to `limit`.
    ///
    /// Negative limits count as zero. Score and cursor reset to 0. On error
    /// the session is left untouched.
    pub fn configure_with_rng<R: Rng + ?Sized>(
        &mut self,
        bank: &BankIndex,
        grade_level: &str,
        difficulty: &str,
        limit: Option<i64>,
        rng: &mut R,
    ) -> Result<()> {
        let grade: GradeLevel = grade_level.parse()?;
        let diff: Difficulty = difficulty.parse()?;

        let mut pool = bank.questions(grade, diff).to_vec();
        if pool.is_empty() {
            return Err(QuizError::EmptyPool {
                grade_level: grade.to_string(),
                difficulty: diff.to_string(),
            });
        }

        pool.shuffle(rng);
        if let Some(limit) = limit {
            pool.truncate(usize::try_from(limit.max(0)).unwrap_or(usize::MAX));
        }

        tracing::debug!(
            grade = grade.tag(),
            difficulty = diff.tag(),
            questions = pool.len(),
            "session configured"
        );

        self.pool = pool;
        self.cursor = 0;
        self.score = 0;
        self.meta = SessionMeta {
            grade_level: grade.to_string(),
            difficulty: diff.to_string(),
        };
        Ok(())
    }

    /// The question at the cursor, or `None` once the session is exhausted.
    pub fn current(&self) -> Option<&QuestionRecord> {
        self.pool.get(self.cursor)
    }

    /// Score `user_input` against the current question and advance the cursor.
    ///
    /// A single letter is read as an option label; anything else is matched
    /// against the option texts. Both comparisons ignore case. The cursor
    /// advances whether or not the answer is correct. The score saturates at
    /// `u32::MAX`.
    pub fn check_answer(&mut self, user_input: &str) -> Result<bool> {
        let question = self
            .pool
            .get(self.cursor)
            .ok_or(QuizError::NoCurrentQuestion)?;

        let is_correct = resolve_letter(question, user_input)
            .is_some_and(|letter| letter == question.correct_option().to_ascii_uppercase());
        if is_correct {
            self.score = self.score.saturating_add(question.points());
        }
        tracing::debug!(cursor = self.cursor, is_correct, score = self.score, "answer checked");

        self.cursor += 1;
        Ok(is_correct)
    }

    /// Re-shuffle the whole pool with the thread RNG and rewind the cursor.
    pub fn shuffle_remaining(&mut self) {
        self.shuffle_remaining_with_rng(&mut rand::rng());
    }

    /// Re-shuffle the whole pool, answered questions included, and rewind the
    /// cursor to 0. The score is kept, so answered questions can score again.
    pub fn shuffle_remaining_with_rng<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.pool.shuffle(rng);
        self.cursor = 0;
    }

    /// Clear pool, score, cursor, and metadata.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Index of the next question to answer.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn meta(&self) -> &SessionMeta {
        &self.meta
    }

    /// The whole pool, answered questions included.
    pub fn pool(&self) -> &[QuestionRecord] {
        &self.pool
    }

    /// Questions not yet answered.
    pub fn remaining(&self) -> &[QuestionRecord] {
        &self.pool[self.cursor.min(self.pool.len())..]
    }

    pub fn is_complete(&self) -> bool {
        self.cursor >= self.pool.len()
    }
}

/// Map user input to an option letter.
fn resolve_letter(question: &QuestionRecord, user_input: &str) -> Option<char> {
    let input = user_input.trim();
    let mut chars = input.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_alphabetic() {
            return Some(upper_char(c));
        }
    }
    if input.is_empty() {
        return None;
    }

    let wanted = input.to_lowercase();
    question
        .options()
        .iter()
        .position(|option| option.to_lowercase() == wanted)
        .map(option_label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parser::parse_bank_str;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ONE_QUESTION: &str =
        "ELEMENTARY LEVEL\nEasy\n1. 2+2?\na) 3\nb) 4\nc) 5\nd) 6\nAnswer: B\n";

    fn five_question_bank() -> BankIndex {
        let mut text = String::from("HIGH SCHOOL LEVEL\nMedium\n");
        for n in 1..=5 {
            text.push_str(&format!(
                "{n}. Question {n}?\na) one\nb) two\nc) three\nd) four\nAnswer: C\n"
            ));
        }
        parse_bank_str(&text).unwrap()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn configured(bank: &BankIndex, grade: &str, difficulty: &str) -> SessionState {
        let mut session = SessionState::new();
        session
            .configure_with_rng(bank, grade, difficulty, None, &mut rng())
            .unwrap();
        session
    }

    #[test]
    fn letter_answer_scores_and_exhausts() {
        let bank = parse_bank_str(ONE_QUESTION).unwrap();
        let mut session = configured(&bank, "ELEMENTARY", "Easy");

        assert!(session.check_answer("b").unwrap());
        assert_eq!(session.score(), 1);
        assert_eq!(session.cursor(), 1);
        assert!(session.current().is_none());
        assert!(session.is_complete());
    }

    #[test]
    fn full_text_answer_matches() {
        let bank = parse_bank_str(ONE_QUESTION).unwrap();
        let mut session = configured(&bank, "ELEMENTARY", "Easy");
        assert!(session.check_answer("4").unwrap());
        assert_eq!(session.score(), 1);
    }

    #[test]
    fn text_match_ignores_case_and_whitespace() {
        let text = "ELEMENTARY LEVEL\nEasy\n1. Capital of France?\na) Rome\nb) Paris\nc) Oslo\nd) Bern\nAnswer: B\n";
        let bank = parse_bank_str(text).unwrap();
        let mut session = configured(&bank, "elementary", "Easy");
        assert!(session.check_answer("  pARIS ").unwrap());

        session
            .configure_with_rng(&bank, "ELEMENTARY", "Easy", None, &mut rng())
            .unwrap();
        assert!(session.check_answer(" B ").unwrap());
    }

    #[test]
    fn wrong_and_unresolvable_answers_still_advance() {
        let bank = five_question_bank();
        let mut session = configured(&bank, "HIGH SCHOOL", "Medium");

        assert!(!session.check_answer("a").unwrap());
        assert!(!session.check_answer("").unwrap());
        assert!(!session.check_answer("seven").unwrap());
        assert!(!session.check_answer("z").unwrap());
        assert_eq!(session.cursor(), 4);
        assert_eq!(session.score(), 0);

        assert!(session.check_answer("three").unwrap());
        assert_eq!(session.score(), 3);
    }

    #[test]
    fn answering_exhausted_session_fails() {
        let bank = parse_bank_str(ONE_QUESTION).unwrap();
        let mut session = configured(&bank, "ELEMENTARY", "Easy");
        session.check_answer("a").unwrap();

        let err = session.check_answer("a").unwrap_err();
        assert!(matches!(err, QuizError::NoCurrentQuestion));
        assert_eq!(err.kind(), ErrorKind::SessionLogic);
        assert_eq!(session.cursor(), 1);
    }

    #[test]
    fn exhausted_after_pool_len_answers() {
        let bank = five_question_bank();
        let mut session = configured(&bank, "HIGH SCHOOL", "Medium");
        for _ in 0..session.pool().len() {
            assert!(session.current().is_some());
            session.check_answer("c").unwrap();
        }
        assert!(session.current().is_none());
        assert_eq!(session.score(), 15);
    }

    #[test]
    fn limit_truncates_pool() {
        let bank = five_question_bank();
        let mut session = SessionState::new();
        for (limit, expected) in [(Some(3), 3), (Some(9), 5), (Some(0), 0), (Some(-2), 0), (None, 5)] {
            session
                .configure_with_rng(&bank, "HIGH SCHOOL", "Medium", limit, &mut rng())
                .unwrap();
            assert_eq!(session.pool().len(), expected, "limit {limit:?}");
        }
        assert!(session.current().is_some());
    }

    #[test]
    fn zero_limit_session_is_immediately_exhausted() {
        let bank = five_question_bank();
        let mut session = SessionState::new();
        session
            .configure_with_rng(&bank, "HIGH SCHOOL", "Medium", Some(0), &mut rng())
            .unwrap();
        assert!(session.current().is_none());
        assert_eq!(session.meta().difficulty, "Medium");
    }

    #[test]
    fn configure_shuffles_a_copy() {
        let bank = five_question_bank();
        let session = configured(&bank, "HIGH SCHOOL", "Medium");

        let mut shuffled: Vec<&str> = session.pool().iter().map(|q| q.text()).collect();
        let original: Vec<&str> = bank
            .questions(GradeLevel::HighSchool, Difficulty::Medium)
            .iter()
            .map(|q| q.text())
            .collect();
        shuffled.sort_unstable();
        let mut sorted_original = original.clone();
        sorted_original.sort_unstable();
        assert_eq!(shuffled, sorted_original);
        assert_eq!(original[0], "Question 1?");
    }

    #[test]
    fn configure_records_meta_and_resets_progress() {
        let bank = five_question_bank();
        let mut session = configured(&bank, "high school", "Medium");
        session.check_answer("c").unwrap();

        session
            .configure_with_rng(&bank, "HIGH SCHOOL", "Medium", Some(2), &mut rng())
            .unwrap();
        assert_eq!(session.score(), 0);
        assert_eq!(session.cursor(), 0);
        assert_eq!(
            session.meta(),
            &SessionMeta {
                grade_level: "HIGH SCHOOL".into(),
                difficulty: "Medium".into(),
            }
        );
    }

    #[test]
    fn invalid_selection() {
        let bank = five_question_bank();
        let mut session = SessionState::new();
        let err = session
            .configure(&bank, "COLLEGE", "Medium", None)
            .unwrap_err();
        assert!(matches!(err, QuizError::InvalidSelection(_)));
        let err = session
            .configure(&bank, "HIGH SCHOOL", "medium", None)
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[test]
    fn empty_pool() {
        let bank = parse_bank_str(ONE_QUESTION).unwrap();
        let mut session = SessionState::new();
        let err = session
            .configure(&bank, "HIGH SCHOOL", "Hard", None)
            .unwrap_err();
        assert!(matches!(err, QuizError::EmptyPool { .. }));
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(session.pool().is_empty());
    }

    // The full pool is reshuffled, so already-answered questions come back
    // while the score is kept.
    #[test]
    fn shuffle_remaining_rewinds_over_answered_questions() {
        let bank = five_question_bank();
        let mut session = configured(&bank, "HIGH SCHOOL", "Medium");
        session.check_answer("c").unwrap();
        session.check_answer("c").unwrap();

        session.shuffle_remaining_with_rng(&mut rng());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.pool().len(), 5);
        assert_eq!(session.remaining().len(), 5);
        assert_eq!(session.score(), 6);

        for _ in 0..5 {
            session.check_answer("c").unwrap();
        }
        assert_eq!(session.score(), 21);
    }

    #[test]
    fn reset_clears_everything() {
        let bank = five_question_bank();
        let mut session = configured(&bank, "HIGH SCHOOL", "Medium");
        session.check_answer("c").unwrap();
        session.reset();

        assert!(session.pool().is_empty());
        assert_eq!(session.score(), 0);
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.meta(), &SessionMeta::default());
        assert!(session.current().is_none());
    }
}
