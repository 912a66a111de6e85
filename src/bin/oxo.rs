//! oxo CLI - train, evaluate, and inspect tic-tac-toe value learners

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "oxo")]
#[command(version, about = "Tic-tac-toe position-graph value learning", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learning agent against a scripted opponent
    Train(oxo::cli::TrainArgs),

    /// Train, then evaluate greedily over held-out games
    Evaluate(oxo::cli::EvaluateArgs),

    /// Print structure counts for the position graph
    Inspect(oxo::cli::InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => oxo::cli::execute_train(args),
        Commands::Evaluate(args) => oxo::cli::execute_evaluate(args),
        Commands::Inspect(args) => oxo::cli::execute_inspect(args),
    }
}
