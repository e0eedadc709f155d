//! AI strategy module - automated seats making bid/play decisions.
//!
//! Strategies receive the same per-seat view a human client would and go
//! through the same validated engine entry points; an illegal decision is
//! a strategy bug, never a way to corrupt state.

mod greedy;
mod random;
pub mod registry;
mod trait_def;

pub use greedy::GreedyStrategy;
pub use random::RandomStrategy;
pub use trait_def::{Strategy, StrategyError};
