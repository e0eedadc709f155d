//! Greedy heuristic strategy: bids from counted suit strength and plays
//! the cheapest card that wins the trick.

use super::trait_def::{Strategy, StrategyError};
use crate::domain::bidding::Bid;
use crate::domain::cards::{card_beats, Card, Rank, Suit};
use crate::domain::state::nth_from;
use crate::domain::view::SeatView;

/// Deterministic rule-based strategy. A step up from random: it counts
/// high-card strength to bid, leads its strong suit, ducks when its
/// partner already holds the trick, and otherwise wins as cheaply as it
/// can.
pub struct GreedyStrategy;

impl GreedyStrategy {
    pub const NAME: &'static str = "greedy";

    pub fn new() -> Self {
        Self
    }

    /// Strength of a suit for bidding: card count plus weight for the
    /// cards that tend to take the category points (Ace, King, Jack,
    /// Two).
    fn suit_strength(hand: &[Card], suit: Suit) -> u32 {
        hand.iter()
            .filter(|c| c.suit == suit)
            .map(|c| match c.rank {
                Rank::Ace => 3,
                Rank::King => 2,
                Rank::Jack | Rank::Two => 2,
                _ => 1,
            })
            .sum()
    }

    fn desired_bid(hand: &[Card]) -> u8 {
        let best = Suit::ALL
            .into_iter()
            .map(|s| Self::suit_strength(hand, s))
            .max()
            .unwrap_or(0);
        match best {
            0..=4 => 0,
            5..=6 => 1,
            7..=8 => 2,
            9..=10 => 3,
            _ => 4,
        }
    }
}

impl Default for GreedyStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for GreedyStrategy {
    fn choose_bid(&self, view: &SeatView) -> Result<Bid, StrategyError> {
        let legal = view.legal_bids();
        if legal.is_empty() {
            return Err(StrategyError::NoLegalMove("no legal bids available".into()));
        }
        let desired = Self::desired_bid(&view.hand);
        // Largest live bid we are still willing to make; pass when the
        // bidding has gone past our hand (unless stuck).
        if let Some(&bid) = legal
            .iter()
            .filter(|b| !b.is_pass() && b.value() <= desired)
            .max()
        {
            return Ok(bid);
        }
        if legal.contains(&Bid::PASS) {
            return Ok(Bid::PASS);
        }
        legal
            .iter()
            .min()
            .copied()
            .ok_or_else(|| StrategyError::NoLegalMove("no fallback bid".into()))
    }

    fn choose_play(&self, view: &SeatView) -> Result<Card, StrategyError> {
        let legal = view.legal_plays();
        if legal.is_empty() {
            return Err(StrategyError::NoLegalMove(
                "no legal plays available".into(),
            ));
        }

        let Some(&(_, lead_card)) = view.cards_in_play.first() else {
            // Leading: open with the strongest card of the strongest suit.
            return legal
                .iter()
                .max_by_key(|c| (Self::suit_strength(&view.hand, c.suit), c.rank))
                .copied()
                .ok_or_else(|| StrategyError::Internal("empty legal play set".into()));
        };

        let lead = lead_card.suit;
        let trump = view.trump.unwrap_or(lead);
        let holder = view
            .cards_in_play
            .iter()
            .copied()
            .reduce(|best, play| {
                if card_beats(play.1, best.1, lead, trump) {
                    play
                } else {
                    best
                }
            });

        let dump = |cards: &[Card]| {
            cards
                .iter()
                .min_by_key(|c| (Some(c.suit) == view.trump, c.rank))
                .copied()
        };

        if let Some((holding_seat, holding_card)) = holder {
            // Partner already has it: throw the cheapest card.
            if holding_seat == nth_from(view.seat, 2) {
                return dump(&legal)
                    .ok_or_else(|| StrategyError::Internal("empty legal play set".into()));
            }
            // Win as cheaply as possible, else dump.
            let cheapest_winner = legal
                .iter()
                .filter(|c| card_beats(**c, holding_card, lead, trump))
                .min_by_key(|c| (Some(c.suit) == view.trump, c.rank))
                .copied();
            if let Some(card) = cheapest_winner {
                return Ok(card);
            }
        }
        dump(&legal).ok_or_else(|| StrategyError::Internal("empty legal play set".into()))
    }
}
