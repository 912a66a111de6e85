//! Board: a position graph plus the live game state

use std::fmt;

use crate::{
    config::GameConfig,
    error::{Error, Result},
    graph::{Position, PositionGraph},
    grid::{Grid, Mark},
    types::LayoutKey,
};

/// A fully expanded position graph together with the current position of a
/// game in progress.
///
/// All values stored in the board's graph are oriented toward its winning
/// mark. A second board for the opposite perspective is derived with
/// [`Board::mirrored`] instead of being re-expanded from scratch.
#[derive(Debug, Clone)]
pub struct Board {
    graph: PositionGraph,
    current: LayoutKey,
}

impl Board {
    /// Build a board, expanding the complete position graph eagerly.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration fails
    /// validation.
    pub fn new(config: GameConfig, winning_mark: Mark) -> Result<Self> {
        config.validate()?;
        let graph = PositionGraph::build(config, winning_mark);
        let current = graph.root().clone();
        Ok(Board { graph, current })
    }

    /// The board's configuration.
    pub fn config(&self) -> &GameConfig {
        self.graph.config()
    }

    /// The mark the graph's values are oriented toward.
    pub fn winning_mark(&self) -> Mark {
        self.graph.winning_mark()
    }

    /// The underlying position graph.
    pub fn graph(&self) -> &PositionGraph {
        &self.graph
    }

    /// Mutable access to the graph, used by learning agents to fold value
    /// updates into shared positions.
    pub fn graph_mut(&mut self) -> &mut PositionGraph {
        &mut self.graph
    }

    /// Key of the empty-board root.
    pub fn root(&self) -> &LayoutKey {
        self.graph.root()
    }

    /// Key of the live position.
    pub fn current(&self) -> &LayoutKey {
        &self.current
    }

    /// The live position node.
    pub fn current_position(&self) -> &Position {
        self.graph
            .position(&self.current)
            .expect("current position is always registered")
    }

    /// The live layout.
    pub fn current_grid(&self) -> &Grid {
        self.current_position().grid()
    }

    /// The mark that places next, derived from piece-count parity.
    pub fn mark_to_place(&self) -> Mark {
        if self.current_grid().occupied_count().is_multiple_of(2) {
            Mark::ALL[0]
        } else {
            Mark::ALL[1]
        }
    }

    /// Moves available from the live position (empty when terminal).
    pub fn moves(&self) -> Result<&[LayoutKey]> {
        self.graph.moves(&self.current)
    }

    /// Whether the live position is terminal.
    pub fn no_moves_left(&self) -> bool {
        self.current_position().is_terminal()
    }

    /// Winner at the live position, if any.
    pub fn winner(&self) -> Option<Mark> {
        self.current_grid().winner()
    }

    /// Advance the live position to a child.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MoveNotInPosition`] if the candidate is not linked
    /// from the live position. This is the consistency fault of a misbehaving
    /// agent and aborts the current game.
    pub fn apply(&mut self, candidate: &LayoutKey) -> Result<()> {
        if !self.moves()?.contains(candidate) {
            return Err(Error::MoveNotInPosition {
                from: self.current.to_string(),
                candidate: candidate.to_string(),
            });
        }
        self.current = candidate.clone();
        Ok(())
    }

    /// Return the live position to the root for a fresh game. Learned
    /// values are kept.
    pub fn reset_game(&mut self) {
        self.current = self.graph.root().clone();
    }

    /// Rebuild the graph from scratch, discarding every learned value.
    pub fn reset_learning(&mut self) {
        self.graph = PositionGraph::build(*self.graph.config(), self.graph.winning_mark());
        self.current = self.graph.root().clone();
    }

    /// Derive the opposite-perspective board: same layouts, decided values
    /// swapped, winning mark flipped, live position back at the root.
    pub fn mirrored(&self) -> Board {
        let mut graph = self.graph.clone();
        graph.reverse_outcomes();
        let current = graph.root().clone();
        Board { graph, current }
    }

    /// Render the live layout with the configured display glyphs.
    pub fn render(&self) -> String {
        self.current_grid().render(self.config().glyphs)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_starts_at_root() {
        let board = Board::new(GameConfig::default(), Mark::X).unwrap();
        assert_eq!(board.current(), board.root());
        assert_eq!(board.mark_to_place(), Mark::X);
        assert!(!board.no_moves_left());
    }

    #[test]
    fn apply_validates_against_links() {
        let mut board = Board::new(GameConfig::default(), Mark::X).unwrap();
        let first = board.moves().unwrap()[0].clone();
        board.apply(&first).unwrap();
        assert_eq!(board.current(), &first);
        assert_eq!(board.mark_to_place(), Mark::O);

        let stale = LayoutKey::from("........x");
        let err = board.apply(&stale).unwrap_err();
        assert!(matches!(err, Error::MoveNotInPosition { .. }));
        assert_eq!(board.current(), &first);
    }

    #[test]
    fn reset_game_keeps_learned_values() {
        let mut board = Board::new(GameConfig::default(), Mark::X).unwrap();
        let first = board.moves().unwrap()[0].clone();
        board.graph_mut().set_value(&first, 0.9).unwrap();
        board.apply(&first).unwrap();

        board.reset_game();
        assert_eq!(board.current(), board.root());
        assert_eq!(board.graph().value_of(&first).unwrap(), 0.9);
    }

    #[test]
    fn reset_learning_discards_values() {
        let mut board = Board::new(GameConfig::default(), Mark::X).unwrap();
        let first = board.moves().unwrap()[0].clone();
        board.graph_mut().set_value(&first, 0.9).unwrap();

        board.reset_learning();
        assert_eq!(board.graph().value_of(&first).unwrap(), 0.5);
    }

    #[test]
    fn mirrored_board_swaps_perspective() {
        let board = Board::new(GameConfig::default(), Mark::X).unwrap();
        let mirror = board.mirrored();

        assert_eq!(mirror.winning_mark(), Mark::O);
        assert_eq!(mirror.graph().len(), board.graph().len());

        let x_win = LayoutKey::from("xxxoo....");
        assert_eq!(board.graph().value_of(&x_win).unwrap(), 1.0);
        assert_eq!(mirror.graph().value_of(&x_win).unwrap(), 0.0);
    }

    #[test]
    fn rejects_invalid_configuration() {
        assert!(Board::new(GameConfig::new(1), Mark::X).is_err());
    }

    #[test]
    fn render_uses_configured_glyphs() {
        let config = GameConfig::default().with_glyphs(['X', 'O']);
        let mut board = Board::new(config, Mark::X).unwrap();
        let first = board.moves().unwrap()[0].clone();
        board.apply(&first).unwrap();
        assert!(board.render().contains('X'));
    }
}
