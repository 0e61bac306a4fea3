//! Core data model types for quizbank.
//!
//! Grade levels, difficulty tiers, question records, and the read-only
//! bank index the parser produces.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QuizError;

/// Top-level bank grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum GradeLevel {
    #[serde(rename = "ELEMENTARY")]
    Elementary,
    #[serde(rename = "HIGH SCHOOL")]
    HighSchool,
}

impl GradeLevel {
    pub const ALL: [GradeLevel; 2] = [GradeLevel::Elementary, GradeLevel::HighSchool];

    /// The canonical tag, as stored in save files and the leaderboard.
    pub fn tag(self) -> &'static str {
        match self {
            GradeLevel::Elementary => "ELEMENTARY",
            GradeLevel::HighSchool => "HIGH SCHOOL",
        }
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for GradeLevel {
    type Err = QuizError;

    /// Case-insensitive: `"high school"` and `"HIGH SCHOOL"` both match.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ELEMENTARY" => Ok(GradeLevel::Elementary),
            "HIGH SCHOOL" => Ok(GradeLevel::HighSchool),
            _ => Err(QuizError::InvalidSelection(format!(
                "grade level must be one of [ELEMENTARY, HIGH SCHOOL], got {s:?}"
            ))),
        }
    }
}

/// Second-level bank grouping. Determines the points a question is worth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn tag(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Difficulty {
    type Err = QuizError;

    /// Exact, case-sensitive match on `Easy`, `Medium`, or `Hard`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Difficulty::ALL
            .into_iter()
            .find(|d| d.tag() == s)
            .ok_or_else(|| {
                QuizError::InvalidSelection(format!(
                    "difficulty must be one of [Easy, Medium, Hard], got {s:?}"
                ))
            })
    }
}

/// The scoring class baked into a question when it is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Easy,
    Medium,
    Hard,
    /// Restored from a save with a point value outside the known tiers.
    Untiered(u32),
}

impl Tier {
    pub fn points(self) -> u32 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 3,
            Tier::Hard => 5,
            Tier::Untiered(points) => points,
        }
    }

    /// Reverse lookup used when restoring saved questions.
    pub fn from_points(points: u32) -> Self {
        match points {
            1 => Tier::Easy,
            3 => Tier::Medium,
            5 => Tier::Hard,
            other => Tier::Untiered(other),
        }
    }
}

impl From<Difficulty> for Tier {
    fn from(difficulty: Difficulty) -> Self {
        match difficulty {
            Difficulty::Easy => Tier::Easy,
            Difficulty::Medium => Tier::Medium,
            Difficulty::Hard => Tier::Hard,
        }
    }
}

/// Number of answer options on every question.
pub const OPTION_COUNT: usize = 4;

/// Label for the option at `index` (0 → `A`).
pub fn option_label(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// Index of the option labelled `letter`, if it is one of `A`-`D` (any case).
pub fn option_index(letter: char) -> Option<usize> {
    let upper = letter.to_ascii_uppercase();
    ('A'..='D').contains(&upper).then(|| (upper as u8 - b'A') as usize)
}

/// Upper-case `c` when its upper-case form is a single character.
///
/// Characters such as `ß` upper-case to more than one character; those are
/// kept as-is rather than truncated, so they never collide with a plain
/// letter like `S`.
pub fn upper_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

/// A single multiple-choice question. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionRecord {
    text: String,
    options: [String; OPTION_COUNT],
    correct_option: char,
    tier: Tier,
}

impl QuestionRecord {
    pub fn new(
        text: impl Into<String>,
        options: [String; OPTION_COUNT],
        correct_option: char,
        tier: Tier,
    ) -> Self {
        Self {
            text: text.into(),
            options,
            correct_option: upper_char(correct_option),
            tier,
        }
    }

    /// The prompt.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Answer choices in `A`-`D` order.
    pub fn options(&self) -> &[String; OPTION_COUNT] {
        &self.options
    }

    /// Upper-case letter of the correct option.
    pub fn correct_option(&self) -> char {
        self.correct_option
    }

    /// Text of the correct option, or `None` if the stored letter is out of range.
    pub fn correct_text(&self) -> Option<&str> {
        option_index(self.correct_option).map(|i| self.options[i].as_str())
    }

    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn points(&self) -> u32 {
        self.tier.points()
    }
}

/// Parsed question bank: grade level → difficulty → questions in file order.
///
/// Every grade/difficulty combination is present, possibly empty. Only the
/// parser can add questions; everything else gets read access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BankIndex {
    grades: BTreeMap<GradeLevel, BTreeMap<Difficulty, Vec<QuestionRecord>>>,
}

impl Default for BankIndex {
    fn default() -> Self {
        let grades = GradeLevel::ALL
            .into_iter()
            .map(|grade| {
                let sections = Difficulty::ALL
                    .into_iter()
                    .map(|difficulty| (difficulty, Vec::new()))
                    .collect();
                (grade, sections)
            })
            .collect();
        Self { grades }
    }
}

impl BankIndex {
    pub(crate) fn push(
        &mut self,
        grade: GradeLevel,
        difficulty: Difficulty,
        question: QuestionRecord,
    ) {
        self.grades
            .entry(grade)
            .or_default()
            .entry(difficulty)
            .or_default()
            .push(question);
    }

    /// Questions for one section, in the order they appear in the bank.
    pub fn questions(&self, grade: GradeLevel, difficulty: Difficulty) -> &[QuestionRecord] {
        self.grades
            .get(&grade)
            .and_then(|sections| sections.get(&difficulty))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Iterate every section, including empty ones.
    pub fn sections(&self) -> impl Iterator<Item = (GradeLevel, Difficulty, &[QuestionRecord])> {
        self.grades.iter().flat_map(|(grade, sections)| {
            sections
                .iter()
                .map(move |(difficulty, qs)| (*grade, *difficulty, qs.as_slice()))
        })
    }

    /// Total number of questions across all sections.
    pub fn len(&self) -> usize {
        self.sections().map(|(_, _, qs)| qs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
