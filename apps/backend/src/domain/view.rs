//! Per-seat visible state: what one player (human or AI) may know.

use serde::Serialize;

use crate::domain::bidding::{self, Bid};
use crate::domain::cards::{Card, Suit};
use crate::domain::rules::{TrumpRule, NUM_TEAMS, PLAYERS};
use crate::domain::state::{Phase, Seat};
use crate::domain::tricks;

/// Snapshot of the game from one seat's perspective. Carries the seat's
/// own hand and only table-public information otherwise. AI strategies
/// and the join-time resume payload are both built from this.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeatView {
    pub seat: Seat,
    pub phase: Phase,
    pub hand_no: u32,
    pub trick: u32,
    pub dealer: Seat,
    pub active_player: Seat,
    pub hand: Vec<Card>,
    pub bids: [Option<Bid>; PLAYERS],
    pub high_bid: u8,
    pub declarer: Option<Seat>,
    pub trump: Option<Suit>,
    pub cards_in_play: Vec<(Seat, Card)>,
    pub scores: [i16; NUM_TEAMS],
    pub trump_rule: TrumpRule,
}

impl SeatView {
    /// Bids this seat could make right now; empty when it is not this
    /// seat's turn to bid.
    pub fn legal_bids(&self) -> Vec<Bid> {
        if self.phase != Phase::Bid || self.active_player != self.seat {
            return Vec::new();
        }
        bidding::legal_bids(self.seat, self.dealer, self.high_bid)
    }

    /// Cards this seat could play right now; empty when it is not this
    /// seat's turn, or trump still needs declaring.
    pub fn legal_plays(&self) -> Vec<Card> {
        if self.phase != Phase::Play || self.active_player != self.seat {
            return Vec::new();
        }
        if self.must_declare_trump() {
            return Vec::new();
        }
        let lead = self.cards_in_play.first().map(|(_, c)| c.suit);
        tricks::legal_plays(&self.hand, lead, self.trump)
    }

    /// True when this seat won the bid under the declared-trump rule and
    /// has to name trump before anyone can play.
    pub fn must_declare_trump(&self) -> bool {
        self.trump_rule == TrumpRule::Declared
            && self.phase == Phase::Play
            && self.trump.is_none()
            && self.declarer == Some(self.seat)
    }
}
