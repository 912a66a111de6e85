//! Read-only summaries of agent outcome histories

use serde::{Deserialize, Serialize};

use crate::ports::Outcome;

/// Win/draw/loss tally over an agent's game history.
///
/// This is the query surface for whatever renders statistics; the core never
/// formats output itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OutcomeTally {
    pub games: usize,
    pub wins: usize,
    pub losses: usize,
    pub draws: usize,
}

impl OutcomeTally {
    /// Tally an ordered outcome history.
    pub fn from_history(history: &[Outcome]) -> Self {
        let mut tally = OutcomeTally::default();
        for outcome in history {
            tally.games += 1;
            match outcome {
                Outcome::Win => tally.wins += 1,
                Outcome::Loss => tally.losses += 1,
                Outcome::Draw => tally.draws += 1,
            }
        }
        tally
    }

    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    fn rate(&self, count: usize) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            count as f64 / self.games as f64
        }
    }

    /// Wins minus losses; positive means the agent is ahead.
    pub fn margin(&self) -> isize {
        self.wins as isize - self.losses as isize
    }
}
