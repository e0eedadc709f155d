//! Deck construction, shuffling, and dealing.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha20Rng;

use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::errors::domain::DomainError;

/// An ordered, shuffled pile of the 52 distinct cards. One deal may draw
/// at most 36 cards (9 per seat); the remainder is never touched.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Full deck shuffled with the given seed, or OS entropy when `None`.
    /// Seeding makes deals reproducible for tests and replays.
    pub fn shuffled(seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => ChaCha20Rng::seed_from_u64(s),
            None => ChaCha20Rng::from_os_rng(),
        };
        let mut cards = full_deck();
        cards.shuffle(&mut rng);
        Self { cards }
    }

    /// Remove and return the top card.
    pub fn deal_one(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    /// Deal 9 cards to each of the 4 seats. Hands come back sorted for
    /// stable display. Drawing past 36 cards in one deal cannot happen
    /// from a full deck; a short deck is a corruption error.
    pub fn deal_hands(&mut self) -> Result<[Vec<Card>; PLAYERS], DomainError> {
        if self.remaining() < HAND_SIZE * PLAYERS {
            return Err(DomainError::corruption(format!(
                "deck has {} cards, need {} to deal",
                self.remaining(),
                HAND_SIZE * PLAYERS
            )));
        }
        let mut hands: [Vec<Card>; PLAYERS] = Default::default();
        for hand in hands.iter_mut() {
            for _ in 0..HAND_SIZE {
                let card = self
                    .deal_one()
                    .ok_or_else(|| DomainError::corruption("deck exhausted mid-deal"))?;
                hand.push(card);
            }
            hand.sort();
        }
        Ok(hands)
    }
}

fn full_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            deck.push(Card::new(rank, suit));
        }
    }
    deck
}
