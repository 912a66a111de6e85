//! Command-line interface for training and inspecting agents

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;

use crate::{
    agents::{RandomAgent, SmartRandomAgent, UpdateRule, ValueAgent},
    board::Board,
    config::GameConfig,
    driver::{GameDriver, MatchSummary},
    grid::Mark,
    observers::ProgressObserver,
    ports::Agent,
    stats::OutcomeTally,
};

pub(crate) fn parse_mark_token(value: &str, flag: &str) -> Result<Mark> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" => Ok(Mark::X),
        "o" | "second" => Ok(Mark::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

fn parse_rule_token(value: &str) -> Result<UpdateRule> {
    match value.trim().to_ascii_lowercase().as_str() {
        "td0" => Ok(UpdateRule::Td0),
        "backfill" | "monte-carlo" => Ok(UpdateRule::MonteCarloBackfill),
        other => Err(anyhow!(
            "Invalid value '{other}' for --rule (expected 'td0' or 'backfill')"
        )),
    }
}

fn parse_unit_interval(value: f64, flag: &str) -> Result<f64> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(anyhow!("{flag} must lie in [0, 1], got {value}"))
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train a learning agent against a scripted opponent")]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = 1000)]
    pub games: usize,

    /// Exploration probability
    #[arg(long, default_value_t = 0.05)]
    pub epsilon: f64,

    /// Learning rate
    #[arg(long, default_value_t = 0.1)]
    pub alpha: f64,

    /// Value update rule (td0 or backfill)
    #[arg(long, default_value = "td0")]
    pub rule: String,

    /// Which mark the agent places (x or o)
    #[arg(long, default_value = "x")]
    pub agent_mark: String,

    /// Scripted opponent: random or smart
    #[arg(long, short = 'o', default_value = "random")]
    pub opponent: String,

    /// Learning target for drawn games
    #[arg(long, default_value_t = 0.5)]
    pub draw_value: f64,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Show progress bar
    #[arg(long, default_value_t = true)]
    pub progress: bool,
}

#[derive(Parser, Debug)]
#[command(about = "Train, then evaluate greedily over held-out games")]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub train: TrainArgs,

    /// Number of held-out evaluation games
    #[arg(long, default_value_t = 500)]
    pub holdout: usize,
}

#[derive(Parser, Debug)]
#[command(about = "Print structure counts for the position graph")]
pub struct InspectArgs {
    /// Board edge length
    #[arg(long, default_value_t = 3)]
    pub size: usize,
}

struct TrainSetup {
    board: Board,
    bot: ValueAgent,
    opponent: Box<dyn Agent>,
    agent_mark: Mark,
}

fn build_setup(args: &TrainArgs) -> Result<TrainSetup> {
    let agent_mark = parse_mark_token(&args.agent_mark, "--agent-mark")?;
    let rule = parse_rule_token(&args.rule)?;
    let epsilon = parse_unit_interval(args.epsilon, "--epsilon")?;
    let alpha = parse_unit_interval(args.alpha, "--alpha")?;

    let config = GameConfig::default().with_draw_value(args.draw_value);
    let base = Board::new(config, Mark::X)?;
    let board = if agent_mark == Mark::O {
        base.mirrored()
    } else {
        base
    };

    let mut bot = ValueAgent::new(agent_mark, epsilon, alpha).with_rule(rule);
    if let Some(seed) = args.seed {
        bot = bot.with_seed(seed);
    }

    let opponent_mark = agent_mark.opponent();
    let opponent: Box<dyn Agent> = match args.opponent.trim().to_ascii_lowercase().as_str() {
        "random" => {
            let mut agent = RandomAgent::new(opponent_mark);
            if let Some(seed) = args.seed {
                agent = agent.with_seed(seed.wrapping_add(1));
            }
            Box::new(agent)
        }
        "smart" => {
            let mut agent = SmartRandomAgent::new(opponent_mark);
            if let Some(seed) = args.seed {
                agent = agent.with_seed(seed.wrapping_add(1));
            }
            Box::new(agent)
        }
        other => {
            return Err(anyhow!(
                "Invalid value '{other}' for --opponent (expected 'random' or 'smart')"
            ));
        }
    };

    Ok(TrainSetup {
        board,
        bot,
        opponent,
        agent_mark,
    })
}

fn run_batch(
    board: &mut Board,
    bot: &mut ValueAgent,
    opponent: &mut dyn Agent,
    games: usize,
    progress: bool,
) -> Result<MatchSummary> {
    let mut driver = GameDriver::new();
    if progress {
        driver = driver.with_observer(Box::new(ProgressObserver::new()));
    }

    // The opener always holds the first declared mark.
    let summary = if bot.mark() == Mark::X {
        driver.play_many(board, &mut [bot, opponent], games)?
    } else {
        driver.play_many(board, &mut [opponent, bot], games)?
    };
    Ok(summary)
}

fn print_summary(label: &str, summary: &MatchSummary, agent_mark: Mark) {
    println!(
        "{label}: {} games | agent ({agent_mark}) won {} | lost {} | drew {} | aborted {} | faults {}",
        summary.games,
        summary.wins_for(agent_mark),
        summary.wins_for(agent_mark.opponent()),
        summary.draws,
        summary.aborted,
        summary.faults,
    );
}

/// Run the `train` subcommand.
pub fn execute_train(args: TrainArgs) -> Result<()> {
    let TrainSetup {
        mut board,
        mut bot,
        mut opponent,
        agent_mark,
    } = build_setup(&args)?;

    let summary = run_batch(
        &mut board,
        &mut bot,
        opponent.as_mut(),
        args.games,
        args.progress,
    )?;

    print_summary("training", &summary, agent_mark);
    let tally = OutcomeTally::from_history(bot.history());
    println!(
        "agent history: win rate {:.3}, draw rate {:.3}, loss rate {:.3}",
        tally.win_rate(),
        tally.draw_rate(),
        tally.loss_rate()
    );

    if let Some(path) = &args.summary {
        summary.save(path)?;
        println!("summary written to {}", path.display());
    }

    Ok(())
}

/// Run the `evaluate` subcommand: train, then play greedily.
pub fn execute_evaluate(args: EvaluateArgs) -> Result<()> {
    let TrainSetup {
        mut board,
        mut bot,
        mut opponent,
        agent_mark,
    } = build_setup(&args.train)?;

    let training = run_batch(
        &mut board,
        &mut bot,
        opponent.as_mut(),
        args.train.games,
        args.train.progress,
    )?;
    print_summary("training", &training, agent_mark);

    // Held-out games: fully greedy, against a fresh opponent stream.
    bot.set_epsilon(0.0);
    let mut holdout_opponent = RandomAgent::new(agent_mark.opponent());
    if let Some(seed) = args.train.seed {
        holdout_opponent = holdout_opponent.with_seed(seed.wrapping_add(1_000));
    }

    let evaluation = run_batch(
        &mut board,
        &mut bot,
        &mut holdout_opponent,
        args.holdout,
        args.train.progress,
    )?;
    print_summary("evaluation", &evaluation, agent_mark);

    if let Some(path) = &args.train.summary {
        evaluation.save(path)?;
        println!("summary written to {}", path.display());
    }

    Ok(())
}

/// Run the `inspect` subcommand.
pub fn execute_inspect(args: InspectArgs) -> Result<()> {
    if args.size > 3 {
        return Err(anyhow!(
            "exhaustive expansion beyond 3x3 is intractable; --size must be 2 or 3"
        ));
    }

    let board = Board::new(GameConfig::new(args.size), Mark::X)?;
    let graph = board.graph();

    println!("positions registered : {}", graph.len());
    println!("terminal positions   : {}", graph.terminal_count());
    println!("  decided (winner)   : {}", graph.decided_count());
    println!("  drawn (full board) : {}", graph.drawn_count());
    println!("root value           : {:.2}", graph.value_of(graph.root())?);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_tokens_parse_case_insensitively() {
        assert_eq!(parse_mark_token("X", "--agent-mark").unwrap(), Mark::X);
        assert_eq!(parse_mark_token(" o ", "--agent-mark").unwrap(), Mark::O);
        assert!(parse_mark_token("z", "--agent-mark").is_err());
    }

    #[test]
    fn rule_tokens_parse() {
        assert_eq!(parse_rule_token("td0").unwrap(), UpdateRule::Td0);
        assert_eq!(
            parse_rule_token("backfill").unwrap(),
            UpdateRule::MonteCarloBackfill
        );
        assert!(parse_rule_token("sarsa").is_err());
    }

    #[test]
    fn unit_interval_is_enforced() {
        assert!(parse_unit_interval(0.3, "--epsilon").is_ok());
        assert!(parse_unit_interval(-0.1, "--epsilon").is_err());
        assert!(parse_unit_interval(f64::NAN, "--alpha").is_err());
    }

    #[test]
    fn setup_orients_the_board_toward_the_agent() {
        let args = TrainArgs {
            games: 1,
            epsilon: 0.05,
            alpha: 0.1,
            rule: "td0".to_string(),
            agent_mark: "o".to_string(),
            opponent: "random".to_string(),
            draw_value: 0.5,
            seed: Some(1),
            summary: None,
            progress: false,
        };

        let setup = build_setup(&args).unwrap();
        assert_eq!(setup.agent_mark, Mark::O);
        assert_eq!(setup.board.winning_mark(), Mark::O);
    }
}
