//! Domain-level error type used across the engine and services.
//!
//! This error type is HTTP-agnostic. Handlers return
//! `Result<T, crate::error::AppError>` and convert from `DomainError`
//! using the provided `From<DomainError> for AppError` implementation.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Kinds of rejected player/router input. All are local and recoverable:
/// the caller gets the rejection, the game state is untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// Wrong phase, wrong turn, out-of-range value, insufficient bid,
    /// or stuck-dealer violation.
    IllegalBid,
    /// Wrong phase, wrong turn, card not in hand, or suit-following
    /// violation.
    IllegalPlay,
    /// Seat outside 0..=3, or already occupied.
    InvalidSeat,
    /// All four seats are taken (or the game already started).
    RoomFull,
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Rejected input; no state was mutated.
    Validation(ValidationKind, String),
    /// Defensive invariant failure. Fatal to the game: the room is
    /// aborted rather than risking an incorrectly scored game.
    Corruption(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::Validation(kind, d) => write!(f, "rejected {kind:?}: {d}"),
            DomainError::Corruption(d) => write!(f, "state corruption: {d}"),
        }
    }
}

impl Error for DomainError {}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation(kind, detail.into())
    }

    pub fn illegal_bid(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::IllegalBid, detail.into())
    }

    pub fn illegal_play(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::IllegalPlay, detail.into())
    }

    pub fn invalid_seat(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::InvalidSeat, detail.into())
    }

    pub fn room_full(detail: impl Into<String>) -> Self {
        Self::Validation(ValidationKind::RoomFull, detail.into())
    }

    pub fn corruption(detail: impl Into<String>) -> Self {
        Self::Corruption(detail.into())
    }

    /// True for rejections that leave the game playable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DomainError::Validation(..))
    }
}
