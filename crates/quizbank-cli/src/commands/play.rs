//! The `quizbank play` command.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use quizbank_core::parser::load_bank;
use quizbank_core::{BankIndex, Difficulty, GradeLevel, SessionState};
use quizbank_scores::Player;

use crate::config::QuizbankConfig;
use crate::console::{Console, SessionOutcome};

/// Session selection taken from the command line. Missing values are prompted for.
#[derive(Debug, Clone, Default)]
pub struct PlayArgs {
    pub grade: Option<String>,
    pub difficulty: Option<String>,
    pub limit: Option<i64>,
    pub name: Option<String>,
}

pub fn execute(config: &QuizbankConfig, args: PlayArgs) -> Result<()> {
    let bank = load_bank(&config.bank_path).with_context(|| {
        format!("failed to load question bank {}", config.bank_path.display())
    })?;
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    play(&mut console, &bank, config, args)
}

pub fn play<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    bank: &BankIndex,
    config: &QuizbankConfig,
    args: PlayArgs,
) -> Result<()> {
    let name = match args.name {
        Some(name) => name,
        None => console.player_name()?,
    };
    let grade = match args.grade {
        Some(grade) => grade,
        None => choose_grade(console)?.to_string(),
    };
    let difficulty = match args.difficulty {
        Some(difficulty) => difficulty,
        None => choose_difficulty(console)?.to_string(),
    };

    let mut session = SessionState::new();
    session.configure(bank, &grade, &difficulty, args.limit.or(config.default_limit))?;

    let mut player = Player::new(name, session.meta().grade_level.clone());
    play_configured(console, &mut session, &mut player, config)
}

/// Run a ready session and record the score if it finishes.
pub fn play_configured<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut SessionState,
    player: &mut Player,
    config: &QuizbankConfig,
) -> Result<()> {
    match console.run_session(session, &config.save_path)? {
        SessionOutcome::Completed(score) => {
            console.finish_session(player, score, &config.scores_path)
        }
        SessionOutcome::Saved => Ok(()),
    }
}

pub fn choose_grade<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<&'static str> {
    console.choose("Choose grade level:", &GradeLevel::ALL.map(GradeLevel::tag))
}

pub fn choose_difficulty<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
) -> Result<&'static str> {
    console.choose("Choose difficulty:", &Difficulty::ALL.map(Difficulty::tag))
}
