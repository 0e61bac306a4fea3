//! The `quizbank resume` command.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use quizbank_core::save::load_game;
use quizbank_scores::Player;

use crate::commands::play::play_configured;
use crate::config::QuizbankConfig;
use crate::console::Console;

pub fn execute(config: &QuizbankConfig, name: Option<String>) -> Result<()> {
    let stdin = std::io::stdin();
    let mut console = Console::new(stdin.lock(), std::io::stdout());
    resume(&mut console, config, name)
}

/// Load the save file and continue where the player left off.
pub fn resume<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    config: &QuizbankConfig,
    name: Option<String>,
) -> Result<()> {
    let mut session = load_game(&config.save_path)
        .with_context(|| format!("failed to resume from {}", config.save_path.display()))?;
    console.say("Saved game loaded.")?;

    let name = match name {
        Some(name) => name,
        None => console.player_name()?,
    };
    let grade = match session.meta().grade_level.as_str() {
        "" => "ELEMENTARY".to_string(),
        grade => grade.to_string(),
    };
    let mut player = Player::new(name, grade);

    play_configured(console, &mut session, &mut player, config)
}
