//! Match observers: progress bars and metric tallies

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    driver::GameResult,
    error::Result,
    grid::Mark,
    ports::MatchObserver,
};

/// Progress bar observer for training batches.
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
        }
    }

    fn message(&self) -> String {
        format!("x:{} o:{} d:{}", self.x_wins, self.o_wins, self.draws)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchObserver for ProgressObserver {
    fn on_match_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, result: &GameResult) -> Result<()> {
        match result {
            GameResult::Won(Mark::X) => self.x_wins += 1,
            GameResult::Won(Mark::O) => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Aborted => {}
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_match_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Counts results without any output.
#[derive(Debug, Default)]
pub struct MetricsObserver {
    games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
    aborted: usize,
    move_count: usize,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> usize {
        self.games
    }

    pub fn wins_for(&self, mark: Mark) -> usize {
        match mark {
            Mark::X => self.x_wins,
            Mark::O => self.o_wins,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn aborted(&self) -> usize {
        self.aborted
    }

    /// Average moves per observed game.
    pub fn average_game_length(&self) -> f64 {
        if self.games == 0 {
            0.0
        } else {
            self.move_count as f64 / self.games as f64
        }
    }
}

impl MatchObserver for MetricsObserver {
    fn on_move(
        &mut self,
        _game_num: usize,
        _step_num: usize,
        _board: &crate::board::Board,
        _chosen: &crate::types::LayoutKey,
    ) -> Result<()> {
        self.move_count += 1;
        Ok(())
    }

    fn on_game_end(&mut self, _game_num: usize, result: &GameResult) -> Result<()> {
        self.games += 1;
        match result {
            GameResult::Won(Mark::X) => self.x_wins += 1,
            GameResult::Won(Mark::O) => self.o_wins += 1,
            GameResult::Draw => self.draws += 1,
            GameResult::Aborted => self.aborted += 1,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_observer_tallies_results() {
        let mut metrics = MetricsObserver::new();
        metrics.on_game_end(0, &GameResult::Won(Mark::X)).unwrap();
        metrics.on_game_end(1, &GameResult::Draw).unwrap();
        metrics.on_game_end(2, &GameResult::Aborted).unwrap();

        assert_eq!(metrics.games(), 3);
        assert_eq!(metrics.wins_for(Mark::X), 1);
        assert_eq!(metrics.wins_for(Mark::O), 0);
        assert_eq!(metrics.draws(), 1);
        assert_eq!(metrics.aborted(), 1);
    }

    #[test]
    fn metrics_observer_averages_game_length() {
        let mut metrics = MetricsObserver::new();
        let board = crate::board::Board::new(
            crate::config::GameConfig::default(),
            Mark::X,
        )
        .unwrap();
        let key = board.root().clone();

        for step in 0..6 {
            metrics.on_move(0, step, &board, &key).unwrap();
        }
        metrics.on_game_end(0, &GameResult::Draw).unwrap();

        assert!((metrics.average_game_length() - 6.0).abs() < 1e-12);
    }
}
