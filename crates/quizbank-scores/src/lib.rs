//! quizbank-scores — Player scores and the leaderboard file.
//!
//! The leaderboard is an append-only text file with one
//! `name, grade_level, score` line per finished session.

pub mod leaderboard;
pub mod player;

pub use leaderboard::{append_score, load_scores, ranked, LeaderboardError, ScoreEntry};
pub use player::Player;
