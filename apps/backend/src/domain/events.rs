//! State-delta events emitted by the engine for the router to broadcast.

use serde::Serialize;

use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Suit};
use crate::domain::rules::NUM_TEAMS;
use crate::domain::scoring::HandOutcome;
use crate::domain::state::{Seat, Team};

/// Who may see an event. Dealt hands are private to their seat;
/// everything else is table-public.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Broadcast,
    Seat(Seat),
}

/// One state delta. Serialized with an `event` tag so clients can
/// reconstruct trick/hand UI from the stream alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    SeatJoined {
        seat: Seat,
    },
    /// A new hand begins: fresh deal, cleared bids and trump.
    HandStarted {
        hand_no: u32,
        dealer: Seat,
        active_player: Seat,
    },
    /// Private: the 9 cards dealt to one seat.
    HandDealt {
        seat: Seat,
        hand_no: u32,
        cards: Vec<Card>,
    },
    Bid {
        actor: Seat,
        trick: u32,
        value: Bid,
        active_player: Seat,
    },
    /// The bidding round resolved; play begins.
    BidWon {
        declarer: Seat,
        high_bid: Bid,
        active_player: Seat,
    },
    TrumpSet {
        suit: Suit,
        by: Seat,
    },
    Play {
        actor: Seat,
        trick: u32,
        card: Card,
        active_player: Seat,
    },
    TrickWon {
        trick: u32,
        winner: Seat,
    },
    HandScored {
        outcome: HandOutcome,
        scores: [i16; NUM_TEAMS],
    },
    GameOver {
        winner: Option<Team>,
        scores: [i16; NUM_TEAMS],
    },
}

impl GameEvent {
    pub fn scope(&self) -> Scope {
        match self {
            GameEvent::HandDealt { seat, .. } => Scope::Seat(*seat),
            _ => Scope::Broadcast,
        }
    }
}
