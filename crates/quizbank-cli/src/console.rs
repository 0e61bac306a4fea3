//! Interactive prompts and the question/answer loop.
//!
//! Everything reads from a `BufRead` and writes to a `Write` so the loop can
//! be driven by scripted input in tests.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use quizbank_core::model::option_label;
use quizbank_core::save::save_game;
use quizbank_core::SessionState;
use quizbank_scores::{append_score, Player};

/// What the player typed at the answer prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// `S`: save and return to the menu.
    Save,
    /// A letter (upper-cased) or free text.
    Text(String),
}

/// How a session loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Every question was answered. Carries the final score.
    Completed(u32),
    /// The player saved mid-session.
    Saved,
}

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Write `text` followed by a newline.
    pub fn say(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Direct access to the output, for callers that render their own blocks.
    pub fn writer(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Self::read_line`], but end of input is an error.
    pub fn require_line(&mut self, prompt: &str) -> Result<String> {
        self.read_line(prompt)?
            .context("input closed while waiting for an answer")
    }

    /// Numbered menu; loops until a valid number is entered.
    pub fn choose<'a>(&mut self, prompt: &str, options: &[&'a str]) -> Result<&'a str> {
        self.say(format!("\n{prompt}"))?;
        for (i, option) in options.iter().enumerate() {
            self.say(format!(" {}) {option}", i + 1))?;
        }
        loop {
            let selection = self.require_line("Select number: ")?;
            match selection.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(options[n - 1]),
                _ => self.say("Invalid selection. Try again.")?,
            }
        }
    }

    /// Player name, defaulting to `Player` when left blank.
    pub fn player_name(&mut self) -> Result<String> {
        let name = self.require_line("Enter player name: ")?;
        Ok(if name.is_empty() {
            "Player".to_string()
        } else {
            name
        })
    }

    /// Read an answer, re-prompting on empty input.
    pub fn prompt_answer(&mut self) -> Result<Answer> {
        loop {
            let input =
                self.require_line("Your answer (A/B/C/D or full text, or 'S' to save & quit): ")?;
            if input.is_empty() {
                self.say("Please enter a choice.")?;
                continue;
            }
            if input.eq_ignore_ascii_case("s") {
                return Ok(Answer::Save);
            }
            let upper = input.to_uppercase();
            if matches!(upper.as_str(), "A" | "B" | "C" | "D") {
                return Ok(Answer::Text(upper));
            }
            return Ok(Answer::Text(input));
        }
    }

    /// Present questions until the pool is exhausted or the player saves.
    pub fn run_session(
        &mut self,
        session: &mut SessionState,
        save_path: &Path,
    ) -> Result<SessionOutcome> {
        while let Some(question) = session.current() {
            self.say(format!("\nQuestion {}", session.cursor() + 1))?;
            self.say(question.text())?;
            for (i, option) in question.options().iter().enumerate() {
                self.say(format!(" {}) {option}", option_label(i)))?;
            }
            let correct = question.correct_option();
            let correct_text = question.correct_text().unwrap_or_default().to_string();

            match self.prompt_answer()? {
                Answer::Save => {
                    save_game(session, save_path).with_context(|| {
                        format!("failed to save game to {}", save_path.display())
                    })?;
                    self.say(format!("Game saved to {}.", save_path.display()))?;
                    self.say("Returning to main menu...")?;
                    return Ok(SessionOutcome::Saved);
                }
                Answer::Text(text) => {
                    if session.check_answer(&text)? {
                        self.say("Correct!")?;
                    } else {
                        self.say(format!(
                            "Wrong. The correct answer is {correct}) {correct_text}"
                        ))?;
                    }
                }
            }
        }

        self.say("\nNo more questions in this session.")?;
        Ok(SessionOutcome::Completed(session.score()))
    }

    /// Copy the session score into the player and record it on the leaderboard.
    pub fn finish_session(
        &mut self,
        player: &mut Player,
        score: u32,
        scores_path: &Path,
    ) -> Result<()> {
        player.reset_score();
        player.add_score(score);
        self.say(format!(
            "\nSession complete! {} scored {} points.",
            player.name(),
            player.score()
        ))?;
        match append_score(scores_path, player) {
            Ok(()) => self.say("Score saved.")?,
            Err(e) => self.say(format!("Could not save score: {e}"))?,
        }
        Ok(())
    }

    #[cfg(test)]
    fn into_output(self) -> W {
        self.output
    }
}
