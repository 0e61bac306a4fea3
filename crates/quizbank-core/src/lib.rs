//! quizbank-core — Question-bank parsing and quiz session state.
//!
//! This crate turns a plain-text question bank into an in-memory index,
//! runs the per-session question pool and scoring, and snapshots sessions
//! to a JSON save file.

pub mod error;
pub mod model;
pub mod parser;
pub mod save;
pub mod session;

pub use error::{ErrorKind, QuizError};
pub use model::{BankIndex, Difficulty, GradeLevel, QuestionRecord, Tier};
pub use session::{SessionMeta, SessionState};
