//! Observer port - abstraction for match observation
//!
//! Observers receive batch and game events without coupling the driver to
//! any particular output. The driver calls, in order:
//! 1. `on_match_start(total_games)` - once per batch
//! 2. per game: `on_game_start`, `on_move` for each move, `on_game_end`
//! 3. `on_match_end()` - once per batch

use crate::{board::Board, driver::GameResult, error::Result, types::LayoutKey};

/// Observer trait for monitoring games and batches.
///
/// All hooks default to no-ops so implementations override only what they
/// need.
pub trait MatchObserver {
    /// Called once when a batch begins.
    fn on_match_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called when a game starts.
    fn on_game_start(&mut self, _game_num: usize) -> Result<()> {
        Ok(())
    }

    /// Called after a move has been applied to the board.
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &Board,
        _chosen: &LayoutKey,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches its result (aborted games included).
    fn on_game_end(&mut self, _game_num: usize, _result: &GameResult) -> Result<()> {
        Ok(())
    }

    /// Called once when the batch completes.
    fn on_match_end(&mut self) -> Result<()> {
        Ok(())
    }
}
