use std::collections::BTreeSet;

use crate::domain::cards::{card_beats, hand_has_suit, Card, Rank, Suit, DECK_SIZE};
use crate::domain::deck::Deck;
use crate::domain::rules::{HAND_SIZE, PLAYERS};
use crate::domain::test_state_helpers::{card, cards};
use crate::errors::domain::DomainError;

#[test]
fn every_code_round_trips() {
    for code in 1..=DECK_SIZE {
        let decoded = Card::from_code(code).expect("codes 1..=52 decode");
        assert_eq!(decoded.code(), code);
    }
}

#[test]
fn known_codes_match_the_wire_scheme() {
    assert_eq!(card("2C").code(), 1);
    assert_eq!(card("AC").code(), 13);
    assert_eq!(card("2D").code(), 14);
    assert_eq!(card("JH").code(), 36);
    assert_eq!(card("AS").code(), 52);
}

#[test]
fn out_of_range_codes_are_rejected() {
    assert!(Card::from_code(0).is_err());
    assert!(Card::from_code(53).is_err());
    assert!(Card::from_code(u8::MAX).is_err());
}

#[test]
fn cards_serialize_as_their_code() {
    let jack = card("JH");
    assert_eq!(serde_json::to_string(&jack).unwrap(), "36");
    let back: Card = serde_json::from_str("36").unwrap();
    assert_eq!(back, jack);
    assert!(serde_json::from_str::<Card>("53").is_err());
}

#[test]
fn game_point_values() {
    assert_eq!(Rank::Ace.game_points(), 4);
    assert_eq!(Rank::King.game_points(), 3);
    assert_eq!(Rank::Queen.game_points(), 2);
    assert_eq!(Rank::Jack.game_points(), 1);
    assert_eq!(Rank::Ten.game_points(), 10);
    assert_eq!(Rank::Nine.game_points(), 0);
    assert_eq!(Rank::Two.game_points(), 0);
}

#[test]
fn low_trump_beats_off_suit_ace() {
    assert!(card_beats(card("2H"), card("AS"), Suit::Spades, Suit::Hearts));
    assert!(!card_beats(card("AS"), card("2H"), Suit::Spades, Suit::Hearts));
}

#[test]
fn off_suit_cards_never_win() {
    // Neither card follows spades nor is trump; neither beats the other.
    assert!(!card_beats(card("AD"), card("KC"), Suit::Spades, Suit::Hearts));
    assert!(!card_beats(card("KC"), card("AD"), Suit::Spades, Suit::Hearts));
    // Following the led suit beats any off-suit card.
    assert!(card_beats(card("3S"), card("AD"), Suit::Spades, Suit::Hearts));
}

#[test]
fn hand_has_suit_scans_the_hand() {
    let hand = cards(&["2C", "9D", "AS"]);
    assert!(hand_has_suit(&hand, Suit::Diamonds));
    assert!(!hand_has_suit(&hand, Suit::Hearts));
}

#[test]
fn shuffled_deck_holds_each_card_once() {
    let mut deck = Deck::shuffled(Some(17));
    let mut codes = BTreeSet::new();
    while let Some(card) = deck.deal_one() {
        assert!(codes.insert(card.code()), "duplicate card in deck");
    }
    assert_eq!(codes.len(), usize::from(DECK_SIZE));
}

#[test]
fn dealt_hands_partition_36_distinct_cards() {
    let mut deck = Deck::shuffled(Some(7));
    let hands = deck.deal_hands().expect("full deck deals");
    assert_eq!(deck.remaining(), 52 - HAND_SIZE * PLAYERS);

    let mut seen = BTreeSet::new();
    for hand in &hands {
        assert_eq!(hand.len(), HAND_SIZE);
        assert!(hand.windows(2).all(|w| w[0] < w[1]), "hands come back sorted");
        for card in hand {
            assert!(seen.insert(card.code()), "card dealt twice");
        }
    }
    assert_eq!(seen.len(), HAND_SIZE * PLAYERS);
}

#[test]
fn same_seed_deals_identically() {
    let hands_a = Deck::shuffled(Some(11)).deal_hands().unwrap();
    let hands_b = Deck::shuffled(Some(11)).deal_hands().unwrap();
    assert_eq!(hands_a, hands_b);
}

#[test]
fn short_deck_is_a_corruption() {
    let mut deck = Deck::shuffled(Some(3));
    deck.deal_hands().expect("first deal succeeds");
    assert!(matches!(
        deck.deal_hands(),
        Err(DomainError::Corruption(_))
    ));
}
