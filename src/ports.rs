//! Capability interfaces between the core engine and its collaborators
//!
//! Each port is a boundary: the game driver talks to players only through
//! [`Agent`], human input reaches the core only through [`MoveSource`], and
//! batch progress leaves the core only through [`MatchObserver`]. Concrete
//! implementations live in `agents` and `observers`.

pub mod agent;
pub mod input;
pub mod observer;

pub use agent::{Agent, MoveChoice, Outcome};
pub use input::{MoveSource, QueuedSource};
pub use observer::MatchObserver;
