//! The learning agent: epsilon-greedy play over shared position values

use rand::{Rng, SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    error::Result,
    grid::Mark,
    ports::{Agent, MoveChoice, Outcome},
    types::LayoutKey,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// How a [`ValueAgent`] folds game results into position values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateRule {
    /// One-step temporal-difference update applied during move selection:
    /// the previously chosen position moves toward the value of the newly
    /// chosen one.
    Td0,
    /// Whole-trajectory update applied at game end: every position the
    /// agent chose moves toward the terminal target (win/lose/draw value).
    MonteCarloBackfill,
}

impl UpdateRule {
    /// Short label for CLI output.
    pub fn label(&self) -> &'static str {
        match self {
            UpdateRule::Td0 => "td0",
            UpdateRule::MonteCarloBackfill => "backfill",
        }
    }
}

/// Tabular value learner over the board's position graph.
///
/// Values live in the shared graph, not in the agent: an update to a
/// transposition node is seen along every path that reaches it. The agent
/// itself only carries its exploration state and per-game trajectory.
#[derive(Debug)]
pub struct ValueAgent {
    mark: Mark,
    name: String,
    epsilon: f64,
    alpha: f64,
    rule: UpdateRule,
    last_choice: Option<LayoutKey>,
    trajectory: Vec<LayoutKey>,
    history: Vec<Outcome>,
    rng: StdRng,
}

impl ValueAgent {
    /// Create a learning agent with the given exploration probability and
    /// learning rate, using the default TD(0) rule.
    pub fn new(mark: Mark, epsilon: f64, alpha: f64) -> Self {
        Self {
            mark,
            name: format!("Bot {mark}"),
            epsilon,
            alpha,
            rule: UpdateRule::Td0,
            last_choice: None,
            trajectory: Vec::new(),
            history: Vec::new(),
            rng: build_rng(None),
        }
    }

    /// Select the update rule.
    pub fn with_rule(mut self, rule: UpdateRule) -> Self {
        self.rule = rule;
        self
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

    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn rule(&self) -> UpdateRule {
        self.rule
    }

    /// Change the exploration probability between games.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        self.epsilon = epsilon;
    }

    /// Change the learning rate between games.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }

    /// Rename the agent.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Keys the agent has chosen so far in the current game.
    pub fn trajectory(&self) -> &[LayoutKey] {
        &self.trajectory
    }
}

impl Agent for ValueAgent {
    fn mark(&self) -> Mark {
        self.mark
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn on_game_start(&mut self) {
        self.last_choice = None;
        self.trajectory.clear();
    }

    fn choose_move(&mut self, board: &mut Board) -> Result<MoveChoice> {
        let current = board.current().clone();
        let explore = self.rng.random::<f64>() < self.epsilon;
        let chosen = if explore {
            board.graph().random_child(&current, &mut self.rng)?
        } else {
            board.graph().best_child(&current, &mut self.rng)?
        };

        if self.rule == UpdateRule::Td0
            && let Some(last) = &self.last_choice
        {
            let target = board.graph().value_of(&chosen)?;
            let previous = board.graph().value_of(last)?;
            board
                .graph_mut()
                .set_value(last, previous + self.alpha * (target - previous))?;
        }

        self.trajectory.push(chosen.clone());
        self.last_choice = Some(chosen.clone());
        Ok(MoveChoice::Play(chosen))
    }

    fn on_game_end(&mut self, board: &mut Board, outcome: Outcome) -> Result<()> {
        self.history.push(outcome);

        if self.rule == UpdateRule::MonteCarloBackfill {
            let config = *board.config();
            let target = match outcome {
                Outcome::Win => config.win_value,
                Outcome::Loss => config.lose_value,
                Outcome::Draw => config.draw_value,
            };
            for key in &self.trajectory {
                let value = board.graph().value_of(key)?;
                board
                    .graph_mut()
                    .set_value(key, value + self.alpha * (target - value))?;
            }
        }

        Ok(())
    }

    fn history(&self) -> &[Outcome] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn board() -> Board {
        Board::new(GameConfig::default(), Mark::X).unwrap()
    }

    #[test]
    fn greedy_agent_picks_highest_valued_child() {
        let mut board = board();
        let favored = board.moves().unwrap()[5].clone();
        board.graph_mut().set_value(&favored, 0.95).unwrap();

        let mut agent = ValueAgent::new(Mark::X, 0.0, 0.1).with_seed(11);
        agent.on_game_start();
        let choice = agent.choose_move(&mut board).unwrap();
        assert_eq!(choice, MoveChoice::Play(favored));
    }

    #[test]
    fn td0_updates_previous_choice_toward_new_one() {
        let mut board = board();
        let mut agent = ValueAgent::new(Mark::X, 0.0, 0.5).with_seed(3);
        agent.on_game_start();

        // First choice: all root children share the default, so the pick is
        // an arbitrary tie-break; no update yet (no previous choice).
        let MoveChoice::Play(first) = agent.choose_move(&mut board).unwrap() else {
            panic!("learning agent never aborts");
        };
        board.apply(&first).unwrap();
        assert_eq!(board.graph().value_of(&first).unwrap(), 0.5);

        // Opponent reply, then raise one grandchild so the next greedy
        // choice has a known target value.
        let reply = board.moves().unwrap()[0].clone();
        board.apply(&reply).unwrap();
        let favored = board.moves().unwrap()[0].clone();
        board.graph_mut().set_value(&favored, 0.9).unwrap();

        let MoveChoice::Play(second) = agent.choose_move(&mut board).unwrap() else {
            panic!("learning agent never aborts");
        };
        assert_eq!(second, favored);

        // v[first] += 0.5 * (0.9 - 0.5)
        let updated = board.graph().value_of(&first).unwrap();
        assert!((updated - 0.7).abs() < 1e-12);
    }

    #[test]
    fn zero_alpha_never_changes_values() {
        let mut board = board();
        let mut agent = ValueAgent::new(Mark::X, 0.0, 0.0).with_seed(21);

        let keys: Vec<LayoutKey> = board.moves().unwrap().to_vec();
        let before: Vec<f64> = keys
            .iter()
            .map(|k| board.graph().value_of(k).unwrap())
            .collect();

        agent.on_game_start();
        while !board.no_moves_left() {
            let MoveChoice::Play(key) = agent.choose_move(&mut board).unwrap() else {
                panic!("learning agent never aborts");
            };
            board.apply(&key).unwrap();
            if board.no_moves_left() {
                break;
            }
            let reply = board.moves().unwrap()[0].clone();
            board.apply(&reply).unwrap();
        }

        board.reset_game();
        let after: Vec<f64> = keys
            .iter()
            .map(|k| board.graph().value_of(k).unwrap())
            .collect();
        assert_eq!(before, after);
    }

    #[test]
    fn backfill_moves_whole_trajectory_toward_target() {
        let mut board = board();
        let mut agent = ValueAgent::new(Mark::X, 0.0, 0.5)
            .with_rule(UpdateRule::MonteCarloBackfill)
            .with_seed(5);

        agent.on_game_start();
        let MoveChoice::Play(first) = agent.choose_move(&mut board).unwrap() else {
            panic!("learning agent never aborts");
        };
        board.apply(&first).unwrap();

        agent.on_game_end(&mut board, Outcome::Win).unwrap();
        assert_eq!(agent.history(), &[Outcome::Win]);

        // v[first] += 0.5 * (1.0 - 0.5)
        assert!((board.graph().value_of(&first).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn game_start_clears_per_game_state() {
        let mut board = board();
        let mut agent = ValueAgent::new(Mark::X, 0.0, 0.1).with_seed(9);

        agent.on_game_start();
        agent.choose_move(&mut board).unwrap();
        assert_eq!(agent.trajectory().len(), 1);

        agent.on_game_start();
        assert!(agent.trajectory().is_empty());
    }
}
