//! The `quizbank validate` command.

use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::parser::{load_bank, validate_bank};

pub fn execute(bank_path: &Path) -> Result<()> {
    let bank = load_bank(bank_path)
        .with_context(|| format!("failed to load question bank {}", bank_path.display()))?;

    println!(
        "Question bank: {} ({} questions)",
        bank_path.display(),
        bank.len()
    );
    for (grade, difficulty, questions) in bank.sections() {
        println!("  {grade} / {difficulty}: {}", questions.len());
    }

    let warnings = validate_bank(&bank);
    for w in &warnings {
        let (grade, difficulty) = w.section;
        println!("  [{grade} / {difficulty}] WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Question bank valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
