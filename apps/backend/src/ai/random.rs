//! Random strategy - makes uniformly random legal moves.
//!
//! Reference implementation of the [`Strategy`](super::Strategy) trait:
//! interior-mutable RNG behind a `Mutex`, optional seeding for
//! determinism, and no panics.

use std::sync::Mutex;

use rand::prelude::*;

use super::trait_def::{Strategy, StrategyError};
use crate::domain::bidding::Bid;
use crate::domain::cards::Card;
use crate::domain::view::SeatView;

/// Strategy that picks uniformly from the legal options.
pub struct RandomStrategy {
    /// `Strategy` methods take `&self`, so the RNG sits behind a mutex.
    rng: Mutex<StdRng>,
}

impl RandomStrategy {
    pub const NAME: &'static str = "random";

    /// `Some(seed)` gives reproducible behavior for tests; `None` uses
    /// OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        };
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl Strategy for RandomStrategy {
    fn choose_bid(&self, view: &SeatView) -> Result<Bid, StrategyError> {
        let legal_bids = view.legal_bids();
        if legal_bids.is_empty() {
            return Err(StrategyError::NoLegalMove("no legal bids available".into()));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| StrategyError::Internal(format!("RNG lock poisoned: {e}")))?;
        legal_bids
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| StrategyError::Internal("failed to choose random bid".into()))
    }

    fn choose_play(&self, view: &SeatView) -> Result<Card, StrategyError> {
        let legal_plays = view.legal_plays();
        if legal_plays.is_empty() {
            return Err(StrategyError::NoLegalMove(
                "no legal plays available".into(),
            ));
        }
        let mut rng = self
            .rng
            .lock()
            .map_err(|e| StrategyError::Internal(format!("RNG lock poisoned: {e}")))?;
        legal_plays
            .choose(&mut *rng)
            .copied()
            .ok_or_else(|| StrategyError::Internal("failed to choose random card".into()))
    }
}
