//! Bid legality, placement, and bid-round resolution.

use serde::{Deserialize, Serialize};

use crate::domain::history::LogAction;
use crate::domain::rules::PLAYERS;
use crate::domain::state::{next_seat, GameState, Phase, Seat};
use crate::errors::domain::DomainError;

/// A declared trick target: 0 = pass, 5 = cinch.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bid(pub u8);

impl Bid {
    pub const PASS: Bid = Bid(0);
    pub const CINCH: Bid = Bid(5);

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn is_pass(self) -> bool {
        self == Bid::PASS
    }
}

impl std::fmt::Display for Bid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Bid::PASS => write!(f, "pass"),
            Bid::CINCH => write!(f, "cinch"),
            Bid(v) => write!(f, "{v}"),
        }
    }
}

/// How a legal bid relates to the bidding so far.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum BidKind {
    Pass,
    /// Strictly above the current high bid.
    High,
    /// Dealer matching an existing cinch.
    CounterCinch,
}

/// Classify a proposed bid against the hand so far, or reject it.
///
/// The stuck-dealer rule: when the first three seats all passed, the
/// dealer may not pass. The counter-cinch rule: the dealer may bid 5 over
/// an existing 5; every other non-pass bid must strictly exceed the high.
pub fn bid_kind(seat: Seat, bid: Bid, dealer: Seat, high_bid: u8) -> Result<BidKind, DomainError> {
    if bid > Bid::CINCH {
        return Err(DomainError::illegal_bid(format!(
            "bid {} is above cinch",
            bid.value()
        )));
    }
    if bid.is_pass() {
        if seat == dealer && high_bid == 0 {
            return Err(DomainError::illegal_bid("dealer is stuck and must bid"));
        }
        return Ok(BidKind::Pass);
    }
    if bid.value() > high_bid {
        return Ok(BidKind::High);
    }
    if bid == Bid::CINCH && seat == dealer {
        return Ok(BidKind::CounterCinch);
    }
    Err(DomainError::illegal_bid(format!(
        "bid {} does not beat the high bid of {high_bid}",
        bid.value()
    )))
}

/// All bids `seat` could legally make right now.
pub fn legal_bids(seat: Seat, dealer: Seat, high_bid: u8) -> Vec<Bid> {
    (Bid::PASS.value()..=Bid::CINCH.value())
        .map(Bid)
        .filter(|&b| bid_kind(seat, b, dealer, high_bid).is_ok())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidResolution {
    pub declarer: Seat,
    pub high_bid: Bid,
}

/// Outcome of an accepted bid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidOutcome {
    /// Present when this was the 4th bid and the round resolved.
    pub resolution: Option<BidResolution>,
}

/// Resolve a completed bidding round: the unique holder of the maximum
/// wins; a shared maximum (only reachable through a counter-cinch) always
/// resolves to the dealer.
pub fn resolve_bidding(
    bids: &[Option<Bid>; PLAYERS],
    dealer: Seat,
) -> Result<BidResolution, DomainError> {
    let mut best: Option<(Seat, Bid)> = None;
    let mut shared = false;
    for (seat, bid) in bids.iter().enumerate() {
        let bid = bid.ok_or_else(|| {
            DomainError::corruption(format!("bid round resolved with seat {seat} missing"))
        })?;
        match best {
            None => best = Some((seat as Seat, bid)),
            Some((_, b)) if bid > b => {
                best = Some((seat as Seat, bid));
                shared = false;
            }
            Some((_, b)) if bid == b => shared = true,
            _ => {}
        }
    }
    let (seat, high_bid) = best.ok_or_else(|| DomainError::corruption("empty bid round"))?;
    if high_bid.is_pass() {
        // The stuck-dealer rule guarantees at least one live bid.
        return Err(DomainError::corruption("bid round resolved with all passes"));
    }
    Ok(BidResolution {
        declarer: if shared { dealer } else { seat },
        high_bid,
    })
}

/// Validate and apply one bid. Rejections leave the state untouched.
pub fn place_bid(state: &mut GameState, seat: Seat, bid: Bid) -> Result<BidOutcome, DomainError> {
    if state.phase != Phase::Bid {
        return Err(DomainError::illegal_bid("not in the bidding phase"));
    }
    if seat != state.active_player {
        return Err(DomainError::illegal_bid(format!(
            "seat {seat} bid out of turn (expected {})",
            state.active_player
        )));
    }
    bid_kind(seat, bid, state.dealer, state.current_hand.high_bid())?;

    if state.current_hand.bids[seat as usize].is_some() {
        return Err(DomainError::corruption(format!(
            "seat {seat} is active but already bid this hand"
        )));
    }
    state.current_hand.bids[seat as usize] = Some(bid);
    state
        .log
        .record(state.hand_no, state.trick, seat, LogAction::Bid { value: bid });

    if state.current_hand.bid_count() == PLAYERS {
        let resolution = resolve_bidding(&state.current_hand.bids, state.dealer)?;
        state.current_hand.declarer = Some(resolution.declarer);
        state.phase = Phase::Play;
        state.active_player = resolution.declarer;
        return Ok(BidOutcome {
            resolution: Some(resolution),
        });
    }
    state.active_player = next_seat(seat);
    Ok(BidOutcome { resolution: None })
}
