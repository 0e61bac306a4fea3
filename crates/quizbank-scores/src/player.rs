//! Player score accumulator.

/// A named player and the score of their latest session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    grade_level: String,
    score: u32,
}

impl Player {
    pub fn new(name: impl Into<String>, grade_level: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            grade_level: grade_level.into(),
            score: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// `ELEMENTARY` or `HIGH SCHOOL`.
    pub fn grade_level(&self) -> &str {
        &self.grade_level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add `points`, saturating at `u32::MAX`.
    pub fn add_score(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accumulate_and_reset() {
        let mut player = Player::new("Ana", "ELEMENTARY");
        assert_eq!(player.score(), 0);
        player.add_score(3);
        player.add_score(5);
        assert_eq!(player.score(), 8);
        player.reset_score();
        assert_eq!(player.score(), 0);
        assert_eq!(player.name(), "Ana");
        assert_eq!(player.grade_level(), "ELEMENTARY");
    }

    #[test]
    fn score_saturates() {
        let mut player = Player::new("Ana", "ELEMENTARY");
        player.add_score(u32::MAX - 1);
        player.add_score(5);
        assert_eq!(player.score(), u32::MAX);
    }
}
