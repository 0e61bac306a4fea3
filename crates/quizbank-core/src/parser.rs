//! Plain-text question bank parser.
//!
//! A bank file is split into grade sections (`ELEMENTARY LEVEL`,
//! `HIGH SCHOOL LEVEL`) and difficulty sub-sections (`Easy`, `Medium`,
//! `Hard`). Inside a sub-section, a numbered line starts a question block:
//!
//! ```text
//! 1. What is 2+2?
//!    a) 3
//!    b) 4
//!    c) 5
//!    d) 6
//!    Answer: B
//! ```
//!
//! Headers are recognized by shape, not grammar. A truncated block is a hard
//! error; nothing is recovered or skipped.

use std::path::Path;

use crate::error::{QuizError, Result};
use crate::model::{
    upper_char, BankIndex, Difficulty, GradeLevel, QuestionRecord, Tier, OPTION_COUNT,
};

/// Read and parse a bank file.
pub fn load_bank(path: &Path) -> Result<BankIndex> {
    if !path.exists() {
        return Err(QuizError::BankNotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    let bank = parse_bank_str(&content)?;
    tracing::info!(
        "loaded {} questions from {}",
        bank.len(),
        path.display()
    );
    Ok(bank)
}

/// Parse bank text (useful for testing).
pub fn parse_bank_str(content: &str) -> Result<BankIndex> {
    let lines: Vec<&str> = content.lines().collect();
    parse_bank(&lines)
}

/// Parse bank lines into a grade → difficulty → questions index.
pub fn parse_bank<S: AsRef<str>>(lines: &[S]) -> Result<BankIndex> {
    let lines: Vec<&str> = lines.iter().map(AsRef::<str>::as_ref).collect();
    let mut bank = BankIndex::default();
    let mut grade: Option<GradeLevel> = None;
    let mut difficulty: Option<Difficulty> = None;

    let mut i = 0;
    while i < lines.len() {
        let line = lines[i].trim();

        if line.is_empty() {
            i += 1;
            continue;
        }

        if let Some(g) = grade_header(line) {
            tracing::debug!(line = i + 1, "entering {g} section");
            grade = Some(g);
            difficulty = None;
            i += 1;
            continue;
        }

        if grade.is_some() {
            if let Some(d) = difficulty_header(line) {
                tracing::debug!(line = i + 1, "entering {d} sub-section");
                difficulty = Some(d);
                i += 1;
                continue;
            }
        }

        if let (Some(g), Some(d)) = (grade, difficulty) {
            if looks_like_question_number(line) {
                let block = parse_question_block(&lines, i)?;
                bank.push(
                    g,
                    d,
                    QuestionRecord::new(block.text, block.options, block.correct, Tier::from(d)),
                );
                i = block.next_line;
                continue;
            }
        }

        i += 1;
    }

    Ok(bank)
}

fn grade_header(line: &str) -> Option<GradeLevel> {
    let upper = line.to_uppercase();
    if upper.starts_with("ELEMENTARY LEVEL") {
        Some(GradeLevel::Elementary)
    } else if upper.starts_with("HIGH SCHOOL LEVEL") {
        Some(GradeLevel::HighSchool)
    } else {
        None
    }
}

fn difficulty_header(line: &str) -> Option<Difficulty> {
    Difficulty::ALL
        .into_iter()
        .find(|d| line.starts_with(d.tag()))
}

/// `"1. What is ..."` or `"12.\tWhat is ..."`: more than two characters, with
/// only digits before the first period.
///
/// A bare number such as `"123"` also matches; the block parser then rejects it.
fn looks_like_question_number(line: &str) -> bool {
    if line.chars().count() <= 2 {
        return false;
    }
    let head = line.split('.').next().unwrap_or_default().trim();
    !head.is_empty() && head.chars().all(|c| c.is_ascii_digit())
}

struct QuestionBlock {
    text: String,
    options: [String; OPTION_COUNT],
    correct: char,
    next_line: usize,
}

fn parse_question_block(lines: &[&str], start: usize) -> Result<QuestionBlock> {
    let malformed = |line: usize, reason: &str| QuizError::MalformedBank {
        line: line + 1,
        reason: reason.to_string(),
    };

    let header = lines[start];
    let text = header
        .split_once('.')
        .map(|(_, rest)| rest.trim().to_string())
        .ok_or_else(|| malformed(start, "question header has no '.'"))?;

    let mut options: [String; OPTION_COUNT] = Default::default();
    let mut idx = start + 1;
    for option in options.iter_mut() {
        let line = lines
            .get(idx)
            .ok_or_else(|| malformed(start, "question block ends before four options"))?
            .trim();
        *option = match line.split_once(')') {
            Some((_, after)) => after.trim().to_string(),
            None => line.to_string(),
        };
        idx += 1;
    }

    let answer_line = lines
        .get(idx)
        .ok_or_else(|| malformed(start, "question block has no answer line"))?
        .trim();
    let answer = match answer_line.split_once(':') {
        Some((_, after)) => after.trim(),
        None => answer_line,
    };
    // Only the first character counts: "Answer: B)" and "Answer: Bb" are both B.
    // A character with a multi-character upper-case form (`ß`) is kept as-is.
    let first = answer
        .chars()
        .next()
        .ok_or_else(|| malformed(idx, "answer line is empty"))?;
    let correct = upper_char(first);

    Ok(QuestionBlock {
        text,
        options,
        correct,
        next_line: idx + 1,
    })
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The section the warning applies to.
    pub section: (GradeLevel, Difficulty),
    /// Warning message.
    pub message: String,
}

/// Check a parsed bank for problems the parser lets through.
pub fn validate_bank(bank: &BankIndex) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    for (grade, difficulty, questions) in bank.sections() {
        let mut warn = |message: String| {
            warnings.push(ValidationWarning {
                section: (grade, difficulty),
                message,
            })
        };

        if questions.is_empty() {
            warn("section has no questions".into());
            continue;
        }

        let mut seen = std::collections::HashSet::new();
        for (i, q) in questions.iter().enumerate() {
            let n = i + 1;
            if q.correct_text().is_none() {
                warn(format!(
                    "question {n}: answer {:?} is not one of A-D",
                    q.correct_option()
                ));
            }
            if q.text().is_empty() {
                warn(format!("question {n}: prompt is empty"));
            }
            if q.options().iter().any(|o| o.is_empty()) {
                warn(format!("question {n}: has an empty option"));
            }
            if !seen.insert(q.text()) {
                warn(format!("question {n}: duplicate prompt {:?}", q.text()));
            }
        }
    }

    warnings
}
