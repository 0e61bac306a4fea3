//! The `quizbank init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizbank.toml
    if std::path::Path::new("quizbank.toml").exists() {
        println!("quizbank.toml already exists, skipping.");
    } else {
        std::fs::write("quizbank.toml", SAMPLE_CONFIG)?;
        println!("Created quizbank.toml");
    }

    // Create sample question bank
    let bank_path = std::path::Path::new("Question_Bank.txt");
    if bank_path.exists() {
        println!("Question_Bank.txt already exists, skipping.");
    } else {
        std::fs::write(bank_path, SAMPLE_BANK)?;
        println!("Created Question_Bank.txt");
    }

    println!("\nNext steps:");
    println!("  1. Add your own questions to Question_Bank.txt");
    println!("  2. Run: quizbank validate");
    println!("  3. Run: quizbank");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizbank configuration

bank_path = "Question_Bank.txt"
save_path = "savegame.json"
scores_path = "scores.txt"

# Questions per session when none is given; remove for the whole section.
# default_limit = 5
"#;

const SAMPLE_BANK: &str = include_str!("../../../../banks/sample_bank.txt");
