//! Quiz error types.
//!
//! One enum covers bank ingestion, session configuration, answering, and
//! the save store. [`QuizError::kind`] groups the variants into the classes
//! the driving loop cares about when deciding whether to re-prompt or abort.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the quiz core.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The requested grade level or difficulty is not one of the fixed tags.
    #[error("invalid selection: {0}")]
    InvalidSelection(String),

    /// The bank holds no questions for the selected grade and difficulty.
    #[error("no questions found for {grade_level} / {difficulty}")]
    EmptyPool {
        grade_level: String,
        difficulty: String,
    },

    /// `check_answer` was called on an exhausted session.
    #[error("no current question to answer")]
    NoCurrentQuestion,

    /// A question block was truncated or its answer line was empty.
    #[error("malformed question bank at line {line}: {reason}")]
    MalformedBank { line: usize, reason: String },

    /// No question bank file exists at the given path.
    #[error("cannot find question bank at {}", .0.display())]
    BankNotFound(PathBuf),

    /// No save file exists at the given path.
    #[error("no saved game found at {}", .0.display())]
    SaveNotFound(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to encode or decode save data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of a [`QuizError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad grade/difficulty tag or empty pool. The caller should re-prompt.
    Configuration,
    /// Caller misuse of the session, such as answering past the end.
    SessionLogic,
    /// The bank could not be parsed. Fatal at startup.
    MalformedBank,
    /// A backing file does not exist.
    StoreNotFound,
    /// Filesystem or encoding failure.
    Storage,
}

impl QuizError {
    /// Returns the class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            QuizError::InvalidSelection(_) | QuizError::EmptyPool { .. } => {
                ErrorKind::Configuration
            }
            QuizError::NoCurrentQuestion => ErrorKind::SessionLogic,
            QuizError::MalformedBank { .. } => ErrorKind::MalformedBank,
            QuizError::BankNotFound(_) | QuizError::SaveNotFound(_) => ErrorKind::StoreNotFound,
            QuizError::Io(_) | QuizError::Json(_) => ErrorKind::Storage,
        }
    }

    /// Returns `true` if asking the user again can resolve this error.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Configuration)
    }
}

/// Convenience alias used throughout the core crate.
pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(
            QuizError::InvalidSelection("x".into()).kind(),
            ErrorKind::Configuration
        );
        assert!(QuizError::EmptyPool {
            grade_level: "HIGH SCHOOL".into(),
            difficulty: "Hard".into(),
        }
        .is_recoverable());
        assert!(!QuizError::NoCurrentQuestion.is_recoverable());
        assert_eq!(
            QuizError::SaveNotFound(PathBuf::from("x.json")).kind(),
            ErrorKind::StoreNotFound
        );
    }

    #[test]
    fn malformed_bank_message_names_line() {
        let err = QuizError::MalformedBank {
            line: 7,
            reason: "missing answer line".into(),
        };
        assert_eq!(
            err.to_string(),
            "malformed question bank at line 7: missing answer line"
        );
    }
}
