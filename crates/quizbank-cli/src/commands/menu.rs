//! The interactive main menu (`quizbank` with no subcommand, or `quizbank menu`).

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use quizbank_core::parser::load_bank;
use quizbank_core::{BankIndex, QuizError, SessionState};
use quizbank_scores::Player;

use crate::commands::leaderboard::write_leaderboard;
use crate::commands::play::{choose_difficulty, choose_grade, play_configured};
use crate::commands::resume;
use crate::config::QuizbankConfig;
use crate::console::Console;

pub fn execute(config: &QuizbankConfig) -> Result<()> {
    let bank = load_bank(&config.bank_path).with_context(|| {
        format!("failed to load question bank {}", config.bank_path.display())
    })?;
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    run(&mut console, &bank, config)
}

/// Loop over the menu until the player exits or input ends.
pub fn run<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: &BankIndex,
    config: &QuizbankConfig,
) -> Result<()> {
    loop {
        console.say("\n==== QUIZ/TRIVIA GAME ====")?;
        console.say("1) New Session")?;
        console.say("2) Resume Saved Game")?;
        console.say("3) Show Leaderboard")?;
        console.say("4) Exit")?;

        let Some(choice) = console.read_line("Enter choice: ")? else {
            console.say("\nGoodbye!")?;
            return Ok(());
        };

        match choice.as_str() {
            "1" => new_session(console, bank, config)?,
            "2" => resume_session(console, config)?,
            "3" => {
                if let Err(e) = write_leaderboard(console.writer(), &config.scores_path, "text") {
                    console.say(format!("Error: {e:#}"))?;
                }
            }
            "4" => {
                console.say("Goodbye!")?;
                return Ok(());
            }
            _ => console.say("Invalid choice.")?,
        }
    }
}

fn new_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: &BankIndex,
    config: &QuizbankConfig,
) -> Result<()> {
    let name = console.player_name()?;
    let grade = choose_grade(console)?;
    let difficulty = choose_difficulty(console)?;
    let limit = match console
        .require_line("How many questions? (blank = all): ")?
        .as_str()
    {
        "" => config.default_limit,
        n => n.parse::<i64>().ok(),
    };

    let mut session = SessionState::new();
    if let Err(e) = session.configure(bank, grade, difficulty, limit) {
        if e.is_recoverable() {
            console.say(format!("Error: {e}"))?;
            return Ok(());
        }
        return Err(e.into());
    }

    let mut player = Player::new(name, grade);
    play_configured(console, &mut session, &mut player, config)
}

fn resume_session<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &QuizbankConfig,
) -> Result<()> {
    match resume::resume(console, config, None) {
        // A missing or unreadable save sends the player back to the menu.
        Err(e) => match e.downcast_ref::<QuizError>() {
            Some(quiz_error) => console.say(format!("Error: {quiz_error}")),
            None => Err(e),
        },
        Ok(()) => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizbank_core::parser::parse_bank_str;
    use std::io::Cursor;

    const BANK: &str = "ELEMENTARY LEVEL\nEasy\n1. 2+2?\na) 3\nb) 4\nc) 5\nd) 6\nAnswer: B\n";

    fn run_script(input: &str, config: &QuizbankConfig) -> String {
        let bank = parse_bank_str(BANK).unwrap();
        let mut out = Vec::new();
        let mut console = Console::new(Cursor::new(input.as_bytes().to_vec()), &mut out);
        run(&mut console, &bank, config).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn config_in(dir: &std::path::Path) -> QuizbankConfig {
        QuizbankConfig {
            save_path: dir.join("savegame.json"),
            scores_path: dir.join("scores.txt"),
            ..Default::default()
        }
    }

    #[test]
    fn exit_and_end_of_input() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        assert!(run_script("4\n", &config).contains("Goodbye!"));
        assert!(run_script("9\n", &config).contains("Invalid choice."));
        assert!(run_script("", &config).contains("Goodbye!"));
    }

    #[test]
    fn new_session_plays_and_records_score() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = run_script("1\nAna\n1\n1\n\nb\n3\n4\n", &config);

        assert!(out.contains("Correct!"));
        assert!(out.contains("Session complete! Ana scored 1 points."));
        assert!(out.contains("--- Leaderboard ---"));
        assert_eq!(
            std::fs::read_to_string(&config.scores_path).unwrap(),
            "Ana, ELEMENTARY, 1\n"
        );
    }

    #[test]
    fn empty_section_is_reported_and_menu_continues() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = run_script("1\nAna\n2\n3\n\n4\n", &config);
        assert!(out.contains("Error: no questions found for HIGH SCHOOL / Hard"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn save_then_resume() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());

        let out = run_script("1\nAna\n1\n1\n\ns\n4\n", &config);
        assert!(out.contains("Game saved to"));
        assert!(!config.scores_path.exists());

        let out = run_script("2\nAna\n4\n4\n", &config);
        assert!(out.contains("Saved game loaded."));
        assert!(out.contains("Correct!"));
        assert_eq!(
            std::fs::read_to_string(&config.scores_path).unwrap(),
            "Ana, ELEMENTARY, 1\n"
        );
    }

    #[test]
    fn resume_with_corrupt_save_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.save_path, "{ not json").unwrap();
        let out = run_script("2\n4\n", &config);
        assert!(out.contains("Error: failed to encode or decode save data"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn resume_without_save_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let out = run_script("2\n4\n", &config);
        assert!(out.contains("Error: no saved game found"));
    }
}
