//! Property tests for the card encoding and comparison primitives.

use proptest::prelude::*;

use crate::domain::cards::{card_beats, Card, Rank, Suit, DECK_SIZE};

fn arb_card() -> impl Strategy<Value = Card> {
    (1..=DECK_SIZE).prop_map(|code| Card::from_code(code).expect("codes 1..=52 decode"))
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    (0u8..4).prop_map(|i| Suit::from_index(i).expect("suit indexes 0..=3 decode"))
}

proptest! {
    #[test]
    fn code_round_trips(code in 1..=DECK_SIZE) {
        let card = Card::from_code(code).unwrap();
        prop_assert_eq!(card.code(), code);
    }

    #[test]
    fn rank_suit_round_trips(rank in 2u8..=14, suit in 0u8..4) {
        let card = Card::new(
            Rank::from_value(rank).unwrap(),
            Suit::from_index(suit).unwrap(),
        );
        let back = Card::from_code(card.code()).unwrap();
        prop_assert_eq!(back.rank.value(), rank);
        prop_assert_eq!(back.suit.index(), suit);
    }

    #[test]
    fn beats_is_antisymmetric(a in arb_card(), b in arb_card(), lead in arb_suit(), trump in arb_suit()) {
        prop_assume!(a != b);
        prop_assert!(!(card_beats(a, b, lead, trump) && card_beats(b, a, lead, trump)));
    }

    /// Two distinct cards that both matter to the trick (trump or led
    /// suit) are always strictly ordered.
    #[test]
    fn relevant_cards_are_totally_ordered(a in arb_card(), b in arb_card(), lead in arb_suit(), trump in arb_suit()) {
        prop_assume!(a != b);
        let relevant = |c: Card| c.suit == trump || c.suit == lead;
        if relevant(a) && relevant(b) {
            prop_assert!(card_beats(a, b, lead, trump) ^ card_beats(b, a, lead, trump));
        }
    }

    #[test]
    fn off_suit_non_trump_never_beats(a in arb_card(), b in arb_card(), lead in arb_suit(), trump in arb_suit()) {
        prop_assume!(a.suit != trump && a.suit != lead);
        prop_assert!(!card_beats(a, b, lead, trump));
    }
}
