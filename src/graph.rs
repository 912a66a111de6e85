//! Position graph: the deduplicating arena of board layouts
//!
//! The graph maps every serialized layout reachable from the empty board to
//! a single [`Position`] node. Transpositions (different move orders that
//! produce the same layout) share one node, so a learning update on a shared
//! node is visible along every path that reaches it. Ownership of all nodes
//! stays with the arena; parents refer to children by [`LayoutKey`] only.

use std::collections::HashMap;

use rand::{Rng, seq::IndexedRandom};

use crate::{
    config::GameConfig,
    error::{Error, Result},
    grid::{Grid, Mark},
    types::LayoutKey,
};

/// One board layout, its cached value, and its outgoing links.
///
/// `links` distinguishes the two kinds of terminal position:
/// - `None`: a winner exists, the game stopped here;
/// - `Some([])`: the board is full with no winner (draw).
///
/// Both mean "no moves available" to callers. After graph construction the
/// only field that ever changes is `value`.
#[derive(Debug, Clone)]
pub struct Position {
    grid: Grid,
    value: Option<f64>,
    links: Option<Vec<LayoutKey>>,
}

impl Position {
    fn new(grid: Grid) -> Self {
        Position {
            grid,
            value: None,
            links: None,
        }
    }

    /// The layout this node represents.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The cached value, if expansion has computed it.
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Outgoing links: `None` for a decided position, otherwise one child
    /// key per vacant cell (empty when the board is full).
    pub fn links(&self) -> Option<&[LayoutKey]> {
        self.links.as_deref()
    }

    /// Whether no moves remain (winner found or board full).
    pub fn is_terminal(&self) -> bool {
        match &self.links {
            None => true,
            Some(links) => links.is_empty(),
        }
    }
}

/// Arena of every position reachable from the empty board.
///
/// Built once, eagerly and exhaustively, by [`PositionGraph::build`]. All
/// stored values are oriented toward `winning_mark`: positions won by it are
/// seeded with the configured win value, positions won by the opponent with
/// the lose value, everything else with the default value.
#[derive(Debug, Clone)]
pub struct PositionGraph {
    config: GameConfig,
    winning_mark: Mark,
    root: LayoutKey,
    positions: HashMap<LayoutKey, Position>,
}

impl PositionGraph {
    /// Build the complete reachable-position graph from the empty board.
    ///
    /// Expansion is depth-first and recursive; every recursive step strictly
    /// reduces the vacancy count, so it terminates. The first mark of
    /// [`Mark::ALL`] is placed first and placement alternates strictly by
    /// turn thereafter.
    pub fn build(config: GameConfig, winning_mark: Mark) -> Self {
        let root_grid = Grid::empty(config.size);
        let root = root_grid.key();

        let mut graph = PositionGraph {
            config,
            winning_mark,
            root: root.clone(),
            positions: HashMap::new(),
        };
        graph.positions.insert(root.clone(), Position::new(root_grid));
        graph.expand(&root, Mark::ALL[0]);
        graph
    }

    fn expand(&mut self, key: &LayoutKey, to_place: Mark) {
        let grid = self
            .positions
            .get(key)
            .expect("expansion visits only registered positions")
            .grid
            .clone();

        if let Some(winner) = grid.winner() {
            let value = if winner == self.winning_mark {
                self.config.win_value
            } else {
                self.config.lose_value
            };
            let position = self
                .positions
                .get_mut(key)
                .expect("expansion visits only registered positions");
            position.value = Some(value);
            position.links = None;
            return;
        }

        let mut links = Vec::new();
        let mut fresh = Vec::new();
        for index in grid.vacant_cells() {
            let child = grid
                .place(index, to_place)
                .expect("vacant cells are always placeable");
            let child_key = child.key();
            if !self.positions.contains_key(&child_key) {
                self.positions
                    .insert(child_key.clone(), Position::new(child));
                fresh.push(child_key.clone());
            }
            links.push(child_key);
        }

        let position = self
            .positions
            .get_mut(key)
            .expect("expansion visits only registered positions");
        position.value = Some(self.config.default_value);
        position.links = Some(links);

        for child_key in fresh {
            self.expand(&child_key, to_place.opponent());
        }
    }

    /// The configuration the graph was built with.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The mark all stored values are oriented toward.
    pub fn winning_mark(&self) -> Mark {
        self.winning_mark
    }

    /// Key of the empty-board root.
    pub fn root(&self) -> &LayoutKey {
        &self.root
    }

    /// Number of registered positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether the graph holds no positions (never true after `build`).
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Look up a position by key.
    pub fn position(&self, key: &LayoutKey) -> Option<&Position> {
        self.positions.get(key)
    }

    fn require(&self, key: &LayoutKey) -> Result<&Position> {
        self.positions.get(key).ok_or_else(|| Error::UnknownPosition {
            key: key.to_string(),
        })
    }

    /// Current value of a position.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownPosition`] for an unregistered key and
    /// [`Error::UnexpandedPosition`] if expansion never reached it (cannot
    /// happen for a graph returned by [`PositionGraph::build`]).
    pub fn value_of(&self, key: &LayoutKey) -> Result<f64> {
        self.require(key)?
            .value
            .ok_or_else(|| Error::UnexpandedPosition {
                key: key.to_string(),
            })
    }

    /// Overwrite the value of a position.
    pub fn set_value(&mut self, key: &LayoutKey, value: f64) -> Result<()> {
        let position = self
            .positions
            .get_mut(key)
            .ok_or_else(|| Error::UnknownPosition {
                key: key.to_string(),
            })?;
        position.value = Some(value);
        Ok(())
    }

    /// Available moves from a position.
    ///
    /// Returns an empty slice for both kinds of terminal position; callers
    /// treat "no links" and "empty links" identically.
    pub fn moves(&self, key: &LayoutKey) -> Result<&[LayoutKey]> {
        Ok(self.require(key)?.links().unwrap_or(&[]))
    }

    /// Whether a position has no moves available.
    pub fn is_terminal(&self, key: &LayoutKey) -> Result<bool> {
        Ok(self.require(key)?.is_terminal())
    }

    /// Highest-valued move from a position, ties broken uniformly at random.
    ///
    /// # Errors
    ///
    /// [`Error::NoMovesAvailable`] when called on a terminal position; this
    /// is a programming error in the caller, not a recoverable state.
    pub fn best_child<R: Rng>(&self, key: &LayoutKey, rng: &mut R) -> Result<LayoutKey> {
        let moves = self.moves(key)?;
        let mut best = f64::NEG_INFINITY;
        for child in moves {
            best = best.max(self.value_of(child)?);
        }

        let mut ties = Vec::new();
        for child in moves {
            if self.value_of(child)? == best {
                ties.push(child);
            }
        }

        ties.choose(rng)
            .map(|&child| child.clone())
            .ok_or_else(|| Error::NoMovesAvailable {
                key: key.to_string(),
            })
    }

    /// Uniformly random move from a position.
    ///
    /// # Errors
    ///
    /// [`Error::NoMovesAvailable`] when called on a terminal position.
    pub fn random_child<R: Rng>(&self, key: &LayoutKey, rng: &mut R) -> Result<LayoutKey> {
        self.moves(key)?
            .choose(rng)
            .cloned()
            .ok_or_else(|| Error::NoMovesAvailable {
                key: key.to_string(),
            })
    }

    /// Flip every decided outcome to the opposite perspective.
    ///
    /// Positions holding the win value take the lose value and vice versa;
    /// all other values are untouched. Together with flipping the winning
    /// mark this derives the opposite-perspective graph without re-expanding.
    pub fn reverse_outcomes(&mut self) {
        let win = self.config.win_value;
        let lose = self.config.lose_value;
        for position in self.positions.values_mut() {
            if let Some(value) = position.value {
                if value == win {
                    position.value = Some(lose);
                } else if value == lose {
                    position.value = Some(win);
                }
            }
        }
        self.winning_mark = self.winning_mark.opponent();
    }

    /// Number of terminal positions (decided or drawn).
    pub fn terminal_count(&self) -> usize {
        self.positions.values().filter(|p| p.is_terminal()).count()
    }

    /// Number of positions where a winner was found.
    pub fn decided_count(&self) -> usize {
        self.positions
            .values()
            .filter(|p| p.links.is_none())
            .count()
    }

    /// Number of full-board draws.
    pub fn drawn_count(&self) -> usize {
        self.positions
            .values()
            .filter(|p| matches!(&p.links, Some(links) if links.is_empty()))
            .count()
    }

    /// Iterate over all registered positions.
    pub fn iter(&self) -> impl Iterator<Item = (&LayoutKey, &Position)> {
        self.positions.iter()
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn two_by_two_graph_is_exhaustive() {
        // On a 2x2 board every pair of cells forms a line, so the opener
        // always wins with its second placement: 1 root + 4 + 12 + 12.
        let graph = PositionGraph::build(GameConfig::new(2), Mark::X);
        assert_eq!(graph.len(), 29);
        assert_eq!(graph.decided_count(), 12);
        assert_eq!(graph.drawn_count(), 0);

        for (_, position) in graph.iter() {
            assert!(position.value().is_some(), "no position left unvalued");
        }
    }

    #[test]
    fn root_links_cover_every_vacant_cell() {
        let graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let root_moves = graph.moves(graph.root()).unwrap();
        assert_eq!(root_moves.len(), 9);
        assert_eq!(graph.value_of(graph.root()).unwrap(), 0.5);
    }

    #[test]
    fn decided_positions_have_no_links_and_oriented_values() {
        let graph = PositionGraph::build(GameConfig::default(), Mark::X);

        let x_win = LayoutKey::from("xxxoo....");
        let position = graph.position(&x_win).expect("x win is reachable");
        assert!(position.links().is_none());
        assert_eq!(position.value(), Some(1.0));

        // O completing the left column after X opened; an O win scores 0
        // on an X-oriented graph.
        let o_win = LayoutKey::from("ox.ox.o.x");
        let position = graph.position(&o_win).expect("o win is reachable");
        assert!(position.links().is_none());
        assert_eq!(position.value(), Some(0.0));
    }

    #[test]
    fn full_draw_keeps_empty_links_and_default_value() {
        let graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let draw = LayoutKey::from("xoxxxooxo");
        let position = graph.position(&draw).expect("draw layout is reachable");
        assert_eq!(position.links().map(<[LayoutKey]>::len), Some(0));
        assert!(position.is_terminal());
        assert_eq!(position.value(), Some(0.5));
    }

    #[test]
    fn best_child_prefers_higher_value_and_breaks_ties_uniformly() {
        let mut graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let mut rng = StdRng::seed_from_u64(7);

        let root = graph.root().clone();
        let favored = graph.moves(&root).unwrap()[3].clone();
        graph.set_value(&favored, 0.9).unwrap();

        for _ in 0..16 {
            assert_eq!(graph.best_child(&root, &mut rng).unwrap(), favored);
        }
    }

    #[test]
    fn child_selection_fails_loudly_on_terminal_positions() {
        let graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let mut rng = StdRng::seed_from_u64(7);
        let x_win = LayoutKey::from("xxxoo....");

        assert!(matches!(
            graph.best_child(&x_win, &mut rng),
            Err(Error::NoMovesAvailable { .. })
        ));
        assert!(matches!(
            graph.random_child(&x_win, &mut rng),
            Err(Error::NoMovesAvailable { .. })
        ));
    }

    #[test]
    fn reverse_outcomes_swaps_only_decided_values() {
        let mut graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let x_win = LayoutKey::from("xxxoo....");
        let root = graph.root().clone();

        graph.reverse_outcomes();
        assert_eq!(graph.winning_mark(), Mark::O);
        assert_eq!(graph.value_of(&x_win).unwrap(), 0.0);
        assert_eq!(graph.value_of(&root).unwrap(), 0.5);
    }

    #[test]
    fn unknown_key_is_reported() {
        let graph = PositionGraph::build(GameConfig::default(), Mark::X);
        let bogus = LayoutKey::from("zzzzzzzzz");
        assert!(matches!(
            graph.value_of(&bogus),
            Err(Error::UnknownPosition { .. })
        ));
    }
}
