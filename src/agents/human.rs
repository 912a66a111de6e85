//! Human player: a thin adapter over the move-source boundary

use crate::{
    board::Board,
    error::Result,
    grid::Mark,
    ports::{Agent, MoveChoice, MoveSource, Outcome},
};

/// Player controlled through a [`MoveSource`].
///
/// The core never parses input; whatever sits behind the source resolves
/// keystrokes (or a queue, in tests) into a child of the current position.
/// A `None` from the source aborts the current game.
pub struct HumanAgent {
    mark: Mark,
    name: String,
    history: Vec<Outcome>,
    source: Box<dyn MoveSource>,
}

impl HumanAgent {
    pub fn new(mark: Mark, source: Box<dyn MoveSource>) -> Self {
        Self {
            mark,
            name: format!("Human {mark}"),
            history: Vec::new(),
            source,
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Rename the player.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl Agent for HumanAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice> {
        match self.source.next_move(board)? {
            Some(key) => Ok(MoveChoice::Play(key)),
            None => Ok(MoveChoice::Abort),
        }
    }

    fn on_game_end(&mut self, _board: &mut Board, outcome: Outcome) -> Result<()> {
        self.history.push(outcome);
        Ok(())
    }

    fn history(&self) -> &[Outcome] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameConfig, ports::QueuedSource, types::LayoutKey};

    #[test]
    fn plays_queued_moves_then_aborts() {
        let mut board = Board::new(GameConfig::default(), Mark::X).unwrap();
        let queued = QueuedSource::new([LayoutKey::from("....x....")]);
        let mut agent = HumanAgent::new(Mark::X, Box::new(queued)).with_name("Tester");

        assert_eq!(agent.name(), "Tester");
        assert_eq!(
            agent.choose_move(&mut board).unwrap(),
            MoveChoice::Play(LayoutKey::from("....x...."))
        );
        assert_eq!(agent.choose_move(&mut board).unwrap(), MoveChoice::Abort);
    }
}
