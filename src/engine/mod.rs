//! Game engines: pure, synchronous simulations with no rendering or I/O.
//!
//! Every engine owns its state and is mutated through `&mut self`, one tick
//! or one input at a time. Hosts read state through borrowed snapshots.

pub mod minesweeper;
pub mod snake;
pub mod tetris;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Run state shared by the tick-driven engines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Active,
    Paused,
    Over,
}

impl Phase {
    pub const fn is_active(self) -> bool {
        matches!(self, Phase::Active)
    }

    pub const fn is_paused(self) -> bool {
        matches!(self, Phase::Paused)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Phase::Over)
    }

    /// Flip between active and paused. Over stays over.
    pub fn toggle_pause(&mut self) {
        *self = match *self {
            Phase::Active => Phase::Paused,
            Phase::Paused => Phase::Active,
            Phase::Over => Phase::Over,
        };
    }
}

/// Running score plus the best score seen this session.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Score {
    current: u32,
    high: u32,
}

impl Score {
    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn high(&self) -> u32 {
        self.high
    }

    pub fn add(&mut self, points: u32) {
        self.current = self.current.saturating_add(points);
    }

    /// Raise the high score to the current score if it is better.
    /// Returns true when a new high score was recorded.
    pub fn commit_high(&mut self) -> bool {
        if self.current > self.high {
            self.high = self.current;
            true
        } else {
            false
        }
    }

    /// Zero the running score; the high score is kept.
    pub fn reset(&mut self) {
        self.current = 0;
    }
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_toggles_only_while_not_over() {
        let mut phase = Phase::Active;
        phase.toggle_pause();
        assert_eq!(phase, Phase::Paused);
        phase.toggle_pause();
        assert_eq!(phase, Phase::Active);

        let mut over = Phase::Over;
        over.toggle_pause();
        assert_eq!(over, Phase::Over);
    }

    #[test]
    fn high_score_survives_reset() {
        let mut score = Score::default();
        score.add(7);
        assert!(score.commit_high());
        score.reset();
        score.add(3);
        assert!(!score.commit_high());
        assert_eq!(score.current(), 3);
        assert_eq!(score.high(), 7);
    }
}
