//! Agent port - the capability interface every player variant implements
//!
//! The driver never branches on a concrete player type; it calls through
//! this interface only. Learning players fold their value updates into the
//! board's graph during these calls, which is why the board is passed
//! mutably.

use serde::{Deserialize, Serialize};

use crate::{board::Board, error::Result, grid::Mark, types::LayoutKey};

/// Result of a completed game from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// What an agent answers when asked for a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveChoice {
    /// Advance the game to this child of the current position.
    Play(LayoutKey),
    /// End the current game early (human "exit"); no outcome is recorded.
    Abort,
}

/// Unified interface for all player variants.
///
/// # Lifecycle
///
/// For every game the driver calls, in order:
/// 1. [`Agent::on_game_start`] once, before the first move
/// 2. [`Agent::choose_move`] on each of the agent's turns
/// 3. [`Agent::on_game_end`] once, unless the game was aborted
pub trait Agent {
    /// The mark this agent places.
    fn mark(&self) -> Mark;

    /// Display name for reporting.
    fn name(&self) -> &str;

    /// Called at the start of every game.
    ///
    /// Adaptive agents reset per-game state here; the default does nothing.
    fn on_game_start(&mut self) {}

    /// Choose a move from the board's current position.
    ///
    /// The returned key must be one of the current position's links. Agents
    /// that learn during play may mutate the board's graph values here.
    ///
    /// # Errors
    ///
    /// Returns an error if the current position has no moves available;
    /// the driver never asks for a move from a terminal position.
    fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice>;

    /// Called once at the end of every completed game with this agent's
    /// relative outcome. Implementations append the outcome to their game
    /// history; learning agents may also fold the result into the board's
    /// graph.
    fn on_game_end(&mut self, board: &mut Board, outcome: Outcome) -> Result<()>;

    /// Ordered outcomes of every completed game this agent played.
    fn history(&self) -> &[Outcome];
}
