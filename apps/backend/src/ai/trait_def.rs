//! Strategy trait definition.

use std::fmt;

use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Suit};
use crate::domain::view::SeatView;
use crate::error::AppError;

/// Errors that can occur during strategy decision-making.
#[derive(Debug)]
pub enum StrategyError {
    /// Strategy encountered an internal error
    Internal(String),
    /// Strategy had no legal option to choose from
    NoLegalMove(String),
}

impl fmt::Display for StrategyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyError::Internal(msg) => write!(f, "strategy internal error: {msg}"),
            StrategyError::NoLegalMove(msg) => write!(f, "strategy has no legal move: {msg}"),
        }
    }
}

impl std::error::Error for StrategyError {}

impl From<StrategyError> for AppError {
    fn from(err: StrategyError) -> Self {
        AppError::internal(format!("AI error: {err}"))
    }
}

/// Trait for automated seats.
///
/// Implementations receive the state visible to their seat and must
/// choose a legal action, querying `view.legal_bids()` /
/// `view.legal_plays()` rather than re-deriving the rules.
pub trait Strategy: Send + Sync {
    /// Choose a bid value.
    fn choose_bid(&self, view: &SeatView) -> Result<Bid, StrategyError>;

    /// Choose a card to play.
    fn choose_play(&self, view: &SeatView) -> Result<Card, StrategyError>;

    /// Choose trump under the declared-trump rule. Defaults to the suit
    /// this seat holds most of.
    fn choose_trump(&self, view: &SeatView) -> Result<Suit, StrategyError> {
        Suit::ALL
            .into_iter()
            .max_by_key(|&suit| view.hand.iter().filter(|c| c.suit == suit).count())
            .ok_or_else(|| StrategyError::Internal("no suits to choose from".into()))
    }
}
