//! Game driver: alternates agents over a board until terminal

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    error::{Error, Result},
    grid::Mark,
    ports::{Agent, MatchObserver, MoveChoice, Outcome},
};

/// Result of a single game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    Won(Mark),
    Draw,
    /// A player aborted before the game reached a terminal position.
    Aborted,
}

impl GameResult {
    /// This result from the perspective of one mark. Aborted games carry no
    /// outcome.
    pub fn outcome_for(&self, mark: Mark) -> Option<Outcome> {
        match self {
            GameResult::Won(winner) if *winner == mark => Some(Outcome::Win),
            GameResult::Won(_) => Some(Outcome::Loss),
            GameResult::Draw => Some(Outcome::Draw),
            GameResult::Aborted => None,
        }
    }
}

/// Aggregate result of a batch of games.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSummary {
    /// Games attempted, including aborted and faulted ones
    pub games: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub draws: usize,
    /// Games ended early through the abort sentinel
    pub aborted: usize,
    /// Games abandoned after a consistency fault
    pub faults: usize,
}

impl MatchSummary {
    /// Wins for the given mark.
    pub fn wins_for(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    /// Games that produced an outcome (completed, neither aborted nor
    /// faulted).
    pub fn completed(&self) -> usize {
        self.x_wins + self.o_wins + self.draws
    }

    /// Win rate for the given mark over completed games.
    pub fn win_rate(&self, mark: Mark) -> f64 {
        if self.completed() == 0 {
            0.0
        } else {
            self.wins_for(mark) as f64 / self.completed() as f64
        }
    }

    /// Draw rate over completed games.
    pub fn draw_rate(&self) -> f64 {
        if self.completed() == 0 {
            0.0
        } else {
            self.draws as f64 / self.completed() as f64
        }
    }

    /// Save the summary to a JSON file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load a summary from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let summary = serde_json::from_reader(file)?;
        Ok(summary)
    }
}

/// Runs games between two agents on a board.
///
/// Turn order is the order of the agents slice: the first agent opens every
/// game. The driver talks to players exclusively through the [`Agent`] port
/// and reports progress through [`MatchObserver`] hooks.
#[derive(Default)]
pub struct GameDriver {
    observers: Vec<Box<dyn MatchObserver>>,
}

impl GameDriver {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Add an observer.
    pub fn with_observer(mut self, observer: Box<dyn MatchObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    fn validate_agents(&self, agents: &[&mut dyn Agent]) -> Result<()> {
        if agents.len() != 2 {
            return Err(Error::AgentCount { got: agents.len() });
        }

        if agents[0].mark() == agents[1].mark() {
            return Err(Error::TurnOrder {
                message: format!("both agents place '{}'", agents[0].mark()),
            });
        }

        let opener = Mark::ALL[0];
        if agents[0].mark() != opener {
            return Err(Error::TurnOrder {
                message: format!(
                    "the graph places '{opener}' first, but the opening agent holds '{}'",
                    agents[0].mark()
                ),
            });
        }

        Ok(())
    }

    /// Play a single game from the board's root position.
    ///
    /// # Errors
    ///
    /// Returns the consistency fault of a misbehaving agent (a move outside
    /// the current position's links, or a move requested from a terminal
    /// position). The game is abandoned; the board and agents stay usable.
    pub fn play(&mut self, board: &mut Board, agents: &mut [&mut dyn Agent]) -> Result<GameResult> {
        self.validate_agents(agents)?;
        self.play_game(0, board, agents)
    }

    /// Play a batch of games back to back.
    ///
    /// Learned values and outcome histories accumulate across the batch;
    /// that accumulation is the whole point of training runs. A game that
    /// faults is counted and the batch continues; each game is an
    /// independent unit of work.
    pub fn play_many(
        &mut self,
        board: &mut Board,
        agents: &mut [&mut dyn Agent],
        games: usize,
    ) -> Result<MatchSummary> {
        self.validate_agents(agents)?;

        for observer in &mut self.observers {
            observer.on_match_start(games)?;
        }

        let mut summary = MatchSummary::default();
        for game_num in 0..games {
            summary.games += 1;
            match self.play_game(game_num, board, agents) {
                Ok(GameResult::Won(Mark::X)) => summary.x_wins += 1,
                Ok(GameResult::Won(Mark::O)) => summary.o_wins += 1,
                Ok(GameResult::Draw) => summary.draws += 1,
                Ok(GameResult::Aborted) => summary.aborted += 1,
                Err(err) if err.is_game_fault() => summary.faults += 1,
                Err(err) => return Err(err),
            }
        }

        for observer in &mut self.observers {
            observer.on_match_end()?;
        }

        Ok(summary)
    }

    fn play_game(
        &mut self,
        game_num: usize,
        board: &mut Board,
        agents: &mut [&mut dyn Agent],
    ) -> Result<GameResult> {
        board.reset_game();
        for agent in agents.iter_mut() {
            agent.on_game_start();
        }
        for observer in &mut self.observers {
            observer.on_game_start(game_num)?;
        }

        let mut step = 0;
        loop {
            if board.no_moves_left() {
                let result = match board.winner() {
                    Some(winner) => GameResult::Won(winner),
                    None => GameResult::Draw,
                };

                for agent in agents.iter_mut() {
                    if let Some(outcome) = result.outcome_for(agent.mark()) {
                        agent.on_game_end(board, outcome)?;
                    }
                }
                for observer in &mut self.observers {
                    observer.on_game_end(game_num, &result)?;
                }
                return Ok(result);
            }

            let agent = &mut agents[step % agents.len()];
            match agent.choose_move(board)? {
                MoveChoice::Abort => {
                    let result = GameResult::Aborted;
                    for observer in &mut self.observers {
                        observer.on_game_end(game_num, &result)?;
                    }
                    return Ok(result);
                }
                MoveChoice::Play(key) => {
                    board.apply(&key)?;
                    for observer in &mut self.observers {
                        observer.on_move(game_num, step, board, &key)?;
                    }
                }
            }
            step += 1;
        }
    }
}
