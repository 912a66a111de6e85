//! Scripted opponents: uniform random and one-ply greedy random

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    board::Board,
    error::Result,
    grid::Mark,
    ports::{Agent, MoveChoice, Outcome},
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Plays uniformly at random among the available moves.
#[derive(Debug)]
pub struct RandomAgent {
    mark: Mark,
    name: String,
    history: Vec<Outcome>,
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            name: format!("Random {mark}"),
            history: Vec::new(),
            rng: build_rng(None),
        }
    }

    /// Seed the agent's random number generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Agent for RandomAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice> {
        let current = board.current().clone();
        let chosen = board.graph().random_child(&current, &mut self.rng)?;
        Ok(MoveChoice::Play(chosen))
    }

    fn on_game_end(&mut self, _board: &mut Board, outcome: Outcome) -> Result<()> {
        self.history.push(outcome);
        Ok(())
    }

    fn history(&self) -> &[Outcome] {
        &self.history
    }
}

/// Takes an immediately winning move when one exists, otherwise plays
/// uniformly at random. One ply only: it does not block opponent wins.
#[derive(Debug)]
pub struct SmartRandomAgent {
    mark: Mark,
    name: String,
    history: Vec<Outcome>,
    rng: StdRng,
}

impl SmartRandomAgent {
    pub fn new(mark: Mark) -> Self {
        Self {
            mark,
            name: format!("SmartRandom {mark}"),
            history: Vec::new(),
            rng: build_rng(None),
        }
    }

    /// Seed the agent's random number generator for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Agent for SmartRandomAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice> {
        let current = board.current().clone();

        for candidate in board.graph().moves(&current)? {
            let position = board
                .graph()
                .position(candidate)
                .expect("linked positions are always registered");
            if position.grid().winner() == Some(self.mark) {
                return Ok(MoveChoice::Play(candidate.clone()));
            }
        }

        let chosen = board.graph().random_child(&current, &mut self.rng)?;
        Ok(MoveChoice::Play(chosen))
    }

    fn on_game_end(&mut self, _board: &mut Board, outcome: Outcome) -> Result<()> {
        self.history.push(outcome);
        Ok(())
    }

    fn history(&self) -> &[Outcome] {
        &self.history
    }
}
