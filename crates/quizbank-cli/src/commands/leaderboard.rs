//! The `quizbank leaderboard` command.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::Table;

use quizbank_scores::{load_scores, ranked};

pub fn execute(scores_path: &Path, format: &str) -> Result<()> {
    let stdout = std::io::stdout();
    write_leaderboard(&mut stdout.lock(), scores_path, format)
}

/// Render the ranked leaderboard as a table (`text`) or JSON (`json`).
pub fn write_leaderboard(out: &mut impl Write, scores_path: &Path, format: &str) -> Result<()> {
    let scores = load_scores(scores_path)
        .with_context(|| format!("failed to read scores from {}", scores_path.display()))?;
    let scores = ranked(scores);

    if format == "json" {
        writeln!(out, "{}", serde_json::to_string_pretty(&scores)?)?;
        return Ok(());
    }

    writeln!(out, "\n--- Leaderboard ---")?;
    if scores.is_empty() {
        writeln!(out, "No scores recorded yet.")?;
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Rank", "Name", "Grade Level", "Score"]);
    for (rank, entry) in scores.iter().enumerate() {
        table.add_row(vec![
            (rank + 1).to_string(),
            entry.name.clone(),
            entry.grade_level.clone(),
            entry.score.to_string(),
        ]);
    }
    writeln!(out, "{table}")?;
    Ok(())
}
