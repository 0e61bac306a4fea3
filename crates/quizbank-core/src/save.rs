//! Save/resume codec with JSON persistence.
//!
//! Only the unanswered tail of the pool is written. The score already
//! accounts for answered questions, so a restored session starts with the
//! cursor at 0 over exactly the remaining work.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{QuizError, Result};
use crate::model::{QuestionRecord, Tier, OPTION_COUNT};
use crate::session::{SessionMeta, SessionState};

/// On-disk save record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(default)]
    pub meta: SessionMeta,
    #[serde(default)]
    pub score: u32,
    /// Cursor at save time. Ignored on load.
    #[serde(default)]
    pub current_index: usize,
    #[serde(default)]
    pub remaining: Vec<SavedQuestion>,
}

/// A question flattened to its raw fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuestion {
    pub question_text: String,
    pub answers: [String; OPTION_COUNT],
    pub correct: char,
    #[serde(default = "default_points")]
    pub points: u32,
}

fn default_points() -> u32 {
    1
}

impl From<&QuestionRecord> for SavedQuestion {
    fn from(q: &QuestionRecord) -> Self {
        Self {
            question_text: q.text().to_string(),
            answers: q.options().clone(),
            correct: q.correct_option(),
            points: q.points(),
        }
    }
}

impl From<SavedQuestion> for QuestionRecord {
    fn from(saved: SavedQuestion) -> Self {
        QuestionRecord::new(
            saved.question_text,
            saved.answers,
            saved.correct,
            Tier::from_points(saved.points),
        )
    }
}

impl SaveGame {
    /// Snapshot the session: metadata, score, and `pool[cursor..]`.
    pub fn capture(state: &SessionState) -> Self {
        Self {
            meta: state.meta().clone(),
            score: state.score(),
            current_index: state.cursor(),
            remaining: state.remaining().iter().map(SavedQuestion::from).collect(),
        }
    }

    /// Rebuild a session whose pool is the saved remainder, cursor at 0.
    pub fn restore(self) -> SessionState {
        let pool = self.remaining.into_iter().map(QuestionRecord::from).collect();
        SessionState::restored(pool, self.score, self.meta)
    }

    /// Save as pretty-printed JSON.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(QuizError::SaveNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Write the session's remaining work to `path`.
pub fn save_game(state: &SessionState, path: &Path) -> Result<()> {
    let save = SaveGame::capture(state);
    save.save_json(path)?;
    tracing::info!(
        remaining = save.remaining.len(),
        score = save.score,
        "game saved to {}",
        path.display()
    );
    Ok(())
}

/// Restore a session from `path`.
pub fn load_game(path: &Path) -> Result<SessionState> {
    let state = SaveGame::load_json(path)?.restore();
    tracing::info!(
        remaining = state.pool().len(),
        score = state.score(),
        "game loaded from {}",
        path.display()
    );
    Ok(state)
}
