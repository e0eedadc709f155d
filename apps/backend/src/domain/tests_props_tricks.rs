//! Property tests for play legality and trick resolution.

use proptest::prelude::*;

use crate::domain::cards::{card_beats, hand_has_suit, Card, Suit, DECK_SIZE};
use crate::domain::history::Trick;
use crate::domain::rules::PLAYERS;
use crate::domain::state::Seat;
use crate::domain::tricks::{legal_plays, winning_play};

fn distinct_cards(count: usize) -> impl Strategy<Value = Vec<Card>> {
    prop::sample::subsequence((1..=DECK_SIZE).collect::<Vec<u8>>(), count)
        .prop_shuffle()
        .prop_map(|codes| {
            codes
                .into_iter()
                .map(|code| Card::from_code(code).expect("codes 1..=52 decode"))
                .collect()
        })
}

fn arb_hand() -> impl Strategy<Value = Vec<Card>> {
    (1..=9usize).prop_flat_map(distinct_cards)
}

fn arb_suit() -> impl Strategy<Value = Suit> {
    (0u8..4).prop_map(|i| Suit::from_index(i).expect("suit indexes 0..=3 decode"))
}

proptest! {
    /// A non-empty hand always has at least one legal play, and every
    /// legal play comes from the hand.
    #[test]
    fn legal_plays_nonempty_and_from_hand(
        hand in arb_hand(),
        lead in proptest::option::of(arb_suit()),
        trump in proptest::option::of(arb_suit()),
    ) {
        let legal = legal_plays(&hand, lead, trump);
        prop_assert!(!legal.is_empty());
        for card in &legal {
            prop_assert!(hand.contains(card));
        }
    }

    /// Holding the led suit restricts plays to the led suit or trump;
    /// void hands may play anything.
    #[test]
    fn follow_suit_is_enforced(
        hand in arb_hand(),
        lead in arb_suit(),
        trump in proptest::option::of(arb_suit()),
    ) {
        let legal = legal_plays(&hand, Some(lead), trump);
        if hand_has_suit(&hand, lead) {
            for card in &legal {
                prop_assert!(card.suit == lead || Some(card.suit) == trump);
            }
            prop_assert!(legal.iter().any(|c| c.suit == lead));
        } else {
            prop_assert_eq!(legal.len(), hand.len());
        }
    }

    /// The trick winner is one of the four plays and beats every other
    /// play under the lead/trump comparison.
    #[test]
    fn trick_winner_beats_the_table(
        cards in distinct_cards(PLAYERS),
        leader in 0..PLAYERS as Seat,
        trump in arb_suit(),
    ) {
        let mut trick = Trick::new(1, leader);
        for (i, card) in cards.iter().enumerate() {
            trick.plays.push(((leader + i as Seat) % PLAYERS as Seat, *card));
        }
        let lead = trick.lead_suit().unwrap();

        let (winner, winning) = winning_play(&trick, trump).unwrap();
        prop_assert!(trick.plays.contains(&(winner, winning)));
        for &(seat, card) in &trick.plays {
            if seat != winner {
                prop_assert!(!card_beats(card, winning, lead, trump));
            }
        }
    }
}
