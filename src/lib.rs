//! Tic-tac-toe position-graph engine with tabular value learning
//!
//! This crate provides:
//! - Exhaustive construction of the reachable-position graph, with
//!   transposition sharing through a layout-keyed arena
//! - Terminal-outcome seeding and incremental value learning (TD(0) or
//!   whole-trajectory backfill) over shared position values
//! - A game driver that alternates pluggable agents (learning bot, random
//!   and one-ply greedy baselines, human boundary) over a board
//! - Observer hooks and read-only statistics for external presentation

pub mod agents;
pub mod board;
pub mod cli;
pub mod config;
pub mod driver;
pub mod error;
pub mod graph;
pub mod grid;
pub mod observers;
pub mod ports;
pub mod stats;
pub mod types;

pub use agents::{HumanAgent, RandomAgent, SmartRandomAgent, UpdateRule, ValueAgent};
pub use board::Board;
pub use config::GameConfig;
pub use driver::{GameDriver, GameResult, MatchSummary};
pub use error::{Error, Result};
pub use graph::{Position, PositionGraph};
pub use grid::{Cell, Grid, Mark};
pub use ports::{Agent, MatchObserver, MoveChoice, MoveSource, Outcome, QueuedSource};
pub use stats::OutcomeTally;
pub use types::LayoutKey;
