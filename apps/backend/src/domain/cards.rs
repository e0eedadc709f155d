//! Core card types and the 1..=52 wire encoding.
//!
//! Clients address cards by integer code; `Card` (de)serializes as that
//! code so protocol types can embed cards directly.

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

pub const NUM_RANKS: u8 = 13;
pub const NUM_SUITS: u8 = 4;
pub const DECK_SIZE: u8 = NUM_RANKS * NUM_SUITS;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Wire index: Clubs=0, Diamonds=1, Hearts=2, Spades=3.
    pub fn index(self) -> u8 {
        match self {
            Suit::Clubs => 0,
            Suit::Diamonds => 1,
            Suit::Hearts => 2,
            Suit::Spades => 3,
        }
    }

    pub fn from_index(index: u8) -> Option<Suit> {
        Suit::ALL.get(index as usize).copied()
    }

    fn short(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        }
    }
}

impl Serialize for Suit {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index())
    }
}

impl<'de> Deserialize<'de> for Suit {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let index = u8::deserialize(deserializer)?;
        Suit::from_index(index)
            .ok_or_else(|| serde::de::Error::custom(format!("suit index out of range: {index}")))
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Numeric rank: Two=2 .. Ten=10, Jack=11, Queen=12, King=13, Ace=14.
    pub fn value(self) -> u8 {
        self as u8 + 2
    }

    pub fn from_value(value: u8) -> Option<Rank> {
        value
            .checked_sub(2)
            .and_then(|i| Rank::ALL.get(i as usize).copied())
    }

    /// Game-point worth when counting the Game category: face cards and
    /// the Ace score rank-10, the Ten scores 10, everything else 0.
    pub fn game_points(self) -> i16 {
        match self {
            Rank::Ten => 10,
            Rank::Jack | Rank::Queen | Rank::King | Rank::Ace => i16::from(self.value()) - 10,
            _ => 0,
        }
    }

    fn short(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            other => (b'0' + other.value()) as char,
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Integer code in 1..=52: `(rank-2) + suit*13 + 1`.
    pub fn code(self) -> u8 {
        (self.rank.value() - 2) + self.suit.index() * NUM_RANKS + 1
    }

    pub fn from_code(code: u8) -> Result<Card, DomainError> {
        if !(1..=DECK_SIZE).contains(&code) {
            return Err(DomainError::illegal_play(format!(
                "card code out of range: {code}"
            )));
        }
        let suit = Suit::from_index((code - 1) / NUM_RANKS)
            .ok_or_else(|| DomainError::corruption(format!("unreachable suit for code {code}")))?;
        let rank = Rank::from_value((code - 1) % NUM_RANKS + 2)
            .ok_or_else(|| DomainError::corruption(format!("unreachable rank for code {code}")))?;
        Ok(Card { rank, suit })
    }
}

impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        card.code()
    }
}

impl TryFrom<u8> for Card {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Card::from_code(code).map_err(|e| e.to_string())
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.rank.short(), self.suit.short())
    }
}

// Note: Ord/Eq on Card is only for stable hand sorting: suit order C<D<H<S
// then rank order. Never use it for trick resolution, which depends on
// trump and lead.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

pub fn hand_has_suit(hand: &[Card], suit: Suit) -> bool {
    hand.iter().any(|c| c.suit == suit)
}

/// Whether `a` beats `b` given the led suit and trump. Trump beats
/// everything; within trump (or, failing trump, within the led suit) the
/// higher rank wins; off-suit non-trump cards never win.
pub fn card_beats(a: Card, b: Card, lead: Suit, trump: Suit) -> bool {
    let a_trump = a.suit == trump;
    let b_trump = b.suit == trump;
    if a_trump != b_trump {
        return a_trump;
    }
    if a_trump && b_trump {
        return a.rank > b.rank;
    }
    let a_follows = a.suit == lead;
    let b_follows = b.suit == lead;
    if a_follows != b_follows {
        return a_follows;
    }
    a_follows && a.rank > b.rank
}
