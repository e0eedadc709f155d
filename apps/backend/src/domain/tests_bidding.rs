use crate::domain::bidding::{bid_kind, legal_bids, place_bid, Bid, BidKind};
use crate::domain::cards::Card;
use crate::domain::rules::PLAYERS;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::bidding_state;
use crate::errors::domain::{DomainError, ValidationKind};

fn empty_hands() -> [Vec<Card>; PLAYERS] {
    Default::default()
}

fn assert_illegal_bid(result: Result<impl std::fmt::Debug, DomainError>) {
    match result {
        Err(DomainError::Validation(ValidationKind::IllegalBid, _)) => {}
        other => panic!("expected IllegalBid rejection, got {other:?}"),
    }
}

#[test]
fn opening_seat_may_bid_anything() {
    let bids = legal_bids(1, 0, 0);
    assert_eq!(bids, (0..=5).map(Bid).collect::<Vec<_>>());
}

#[test]
fn bid_kind_classification() {
    assert_eq!(bid_kind(1, Bid::PASS, 0, 3).unwrap(), BidKind::Pass);
    assert_eq!(bid_kind(1, Bid(4), 0, 3).unwrap(), BidKind::High);
    assert_eq!(bid_kind(0, Bid::CINCH, 0, 5).unwrap(), BidKind::CounterCinch);
    assert_illegal_bid(bid_kind(1, Bid(3), 0, 3));
    assert_illegal_bid(bid_kind(1, Bid(6), 0, 0));
}

#[test]
fn insufficient_bid_is_rejected_without_mutation() {
    let mut state = bidding_state(0, empty_hands());
    place_bid(&mut state, 1, Bid(3)).unwrap();

    assert_illegal_bid(place_bid(&mut state, 2, Bid(3)));
    assert_illegal_bid(place_bid(&mut state, 2, Bid(2)));
    assert_eq!(state.active_player, 2);
    assert_eq!(state.current_hand.bid_count(), 1);
    assert_eq!(state.log.len(), 1);

    place_bid(&mut state, 2, Bid(4)).unwrap();
    assert_eq!(state.current_hand.high_bid(), 4);
}

#[test]
fn out_of_turn_and_wrong_phase_bids_are_rejected() {
    let mut state = bidding_state(0, empty_hands());
    assert_illegal_bid(place_bid(&mut state, 2, Bid(1)));

    state.phase = Phase::Play;
    assert_illegal_bid(place_bid(&mut state, 1, Bid(1)));
}

#[test]
fn stuck_dealer_must_bid() {
    let mut state = bidding_state(3, empty_hands());
    for seat in [0, 1, 2] {
        place_bid(&mut state, seat, Bid::PASS).unwrap();
    }

    assert!(!legal_bids(3, 3, 0).contains(&Bid::PASS));
    assert_illegal_bid(place_bid(&mut state, 3, Bid::PASS));

    place_bid(&mut state, 3, Bid(1)).unwrap();
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.current_hand.declarer, Some(3));
    assert_eq!(state.active_player, 3);
}

#[test]
fn counter_cinch_resolves_to_the_dealer() {
    let mut state = bidding_state(3, empty_hands());
    place_bid(&mut state, 0, Bid::PASS).unwrap();
    place_bid(&mut state, 1, Bid::CINCH).unwrap();
    place_bid(&mut state, 2, Bid::PASS).unwrap();
    place_bid(&mut state, 3, Bid::CINCH).unwrap();

    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.current_hand.declarer, Some(3));
    assert_eq!(state.current_hand.high_bid(), 5);
    assert_eq!(state.active_player, 3);
}

#[test]
fn only_the_dealer_may_match_a_cinch() {
    let mut state = bidding_state(3, empty_hands());
    place_bid(&mut state, 0, Bid::CINCH).unwrap();
    assert_illegal_bid(place_bid(&mut state, 1, Bid::CINCH));

    // Passing over a cinch stays legal for everyone but a stuck dealer.
    place_bid(&mut state, 1, Bid::PASS).unwrap();
    place_bid(&mut state, 2, Bid::PASS).unwrap();
    place_bid(&mut state, 3, Bid::PASS).unwrap();
    assert_eq!(state.current_hand.declarer, Some(0));
}

#[test]
fn highest_unique_bid_wins_the_round() {
    let mut state = bidding_state(0, empty_hands());
    place_bid(&mut state, 1, Bid(1)).unwrap();
    place_bid(&mut state, 2, Bid(3)).unwrap();
    place_bid(&mut state, 3, Bid::PASS).unwrap();
    place_bid(&mut state, 0, Bid::PASS).unwrap();

    assert_eq!(state.current_hand.declarer, Some(2));
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.active_player, 2);
    assert_eq!(state.log.len(), PLAYERS);
}
