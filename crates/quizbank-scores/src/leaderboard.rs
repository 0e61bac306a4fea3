//! Leaderboard flat-file store.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::player::Player;

/// Errors reading or writing the leaderboard file.
#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A line did not split into `name, grade_level, score`.
    #[error("malformed leaderboard entry at line {line}: {content:?}")]
    MalformedEntry { line: usize, content: String },
}

/// One finished session on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub name: String,
    pub grade_level: String,
    pub score: u32,
}

impl From<&Player> for ScoreEntry {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name().to_string(),
            grade_level: player.grade_level().to_string(),
            score: player.score(),
        }
    }
}

impl ScoreEntry {
    fn to_line(&self) -> String {
        format!("{}, {}, {}\n", self.name, self.grade_level, self.score)
    }

    fn parse_line(line: &str, line_no: usize) -> Result<Self, LeaderboardError> {
        let malformed = || LeaderboardError::MalformedEntry {
            line: line_no,
            content: line.to_string(),
        };

        let fields: Vec<&str> = line.split(", ").collect();
        let [name, grade_level, score] = fields.as_slice() else {
            return Err(malformed());
        };
        let score = score.trim().parse().map_err(|_| malformed())?;
        Ok(Self {
            name: name.to_string(),
            grade_level: grade_level.to_string(),
            score,
        })
    }
}

/// Append the player's score to the leaderboard, creating the file if needed.
pub fn append_score(path: &Path, player: &Player) -> Result<(), LeaderboardError> {
    let entry = ScoreEntry::from(player);
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(entry.to_line().as_bytes())?;
    tracing::info!(
        name = %entry.name,
        score = entry.score,
        "score saved to {}",
        path.display()
    );
    Ok(())
}

/// Read every entry in file order. A missing file is an empty leaderboard.
pub fn load_scores(path: &Path) -> Result<Vec<ScoreEntry>, LeaderboardError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::warn!("no scores file found at {}", path.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| ScoreEntry::parse_line(line.trim(), i + 1))
        .collect()
}

/// Sort highest score first. Ties keep file order.
pub fn ranked(mut entries: Vec<ScoreEntry>) -> Vec<ScoreEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}
