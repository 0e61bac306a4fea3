//! quizbank configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level quizbank configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizbankConfig {
    /// Question bank text file.
    #[serde(default = "default_bank_path")]
    pub bank_path: PathBuf,
    /// Where `S` at the answer prompt writes the session.
    #[serde(default = "default_save_path")]
    pub save_path: PathBuf,
    /// Leaderboard file.
    #[serde(default = "default_scores_path")]
    pub scores_path: PathBuf,
    /// Questions per session when none is given (None = whole section).
    #[serde(default)]
    pub default_limit: Option<i64>,
}

fn default_bank_path() -> PathBuf {
    PathBuf::from("Question_Bank.txt")
}
fn default_save_path() -> PathBuf {
    PathBuf::from("savegame.json")
}
fn default_scores_path() -> PathBuf {
    PathBuf::from("scores.txt")
}

impl Default for QuizbankConfig {
    fn default() -> Self {
        Self {
            bank_path: default_bank_path(),
            save_path: default_save_path(),
            scores_path: default_scores_path(),
            default_limit: None,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `quizbank.toml` in the current directory
/// 2. `~/.config/quizbank/config.toml`
///
/// Environment variable overrides: `QUIZBANK_BANK`, `QUIZBANK_SAVE`, `QUIZBANK_SCORES`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizbankConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizbank.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = toml::from_str::<QuizbankConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("using config {}", path.display());
            config
        }
        None => QuizbankConfig::default(),
    };

    // Apply env var overrides
    if let Ok(bank) = std::env::var("QUIZBANK_BANK") {
        config.bank_path = PathBuf::from(bank);
    }
    if let Ok(save) = std::env::var("QUIZBANK_SAVE") {
        config.save_path = PathBuf::from(save);
    }
    if let Ok(scores) = std::env::var("QUIZBANK_SCORES") {
        config.scores_path = PathBuf::from(scores);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizbank"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QuizbankConfig::default();
        assert_eq!(config.bank_path, PathBuf::from("Question_Bank.txt"));
        assert_eq!(config.save_path, PathBuf::from("savegame.json"));
        assert_eq!(config.scores_path, PathBuf::from("scores.txt"));
        assert!(config.default_limit.is_none());
    }

    #[test]
    fn parse_partial_config() {
        let config: QuizbankConfig = toml::from_str(
            r#"
bank_path = "banks/trivia.txt"
default_limit = 5
"#,
        )
        .unwrap();
        assert_eq!(config.bank_path, PathBuf::from("banks/trivia.txt"));
        assert_eq!(config.default_limit, Some(5));
        assert_eq!(config.scores_path, PathBuf::from("scores.txt"));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let err = load_config_from(Some(Path::new("/nonexistent/quizbank.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn explicit_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "save_path = \"saves/slot1.json\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.save_path, PathBuf::from("saves/slot1.json"));
    }

    #[test]
    fn paths_are_taken_literally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "scores_path = \"${HOME}/scores.txt\"\n").unwrap();
        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.scores_path, PathBuf::from("${HOME}/scores.txt"));
    }
}
