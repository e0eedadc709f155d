use crate::domain::bidding::Bid;
use crate::domain::cards::Suit;
use crate::domain::history::Trick;
use crate::domain::rules::TrumpRule;
use crate::domain::state::Phase;
use crate::domain::test_state_helpers::{card, cards, play_state};
use crate::domain::tricks::{legal_plays, play_card, winning_play};
use crate::errors::domain::{DomainError, ValidationKind};

fn assert_illegal_play(result: Result<impl std::fmt::Debug, DomainError>) {
    match result {
        Err(DomainError::Validation(ValidationKind::IllegalPlay, _)) => {}
        other => panic!("expected IllegalPlay rejection, got {other:?}"),
    }
}

/// Dealer 3, declarer 0 leads. Spade-heavy first trick, hearts second.
fn two_trick_state() -> crate::domain::state::GameState {
    play_state(
        3,
        0,
        Bid(2),
        [
            cards(&["KS", "AH", "2C"]),
            cards(&["QS", "9S", "3H", "5D"]),
            cards(&["2S", "7H", "9D"]),
            cards(&["TS", "4H", "6C"]),
        ],
    )
}

#[test]
fn first_lead_fixes_trump_for_the_hand() {
    let mut state = two_trick_state();
    assert_eq!(state.current_hand.trump, None);

    let outcome = play_card(&mut state, 0, card("KS")).unwrap();
    assert_eq!(outcome.trump_set, Some(Suit::Spades));
    assert_eq!(state.current_hand.trump, Some(Suit::Spades));
    assert_eq!(state.active_player, 1);
    assert_eq!(state.log.len(), 5); // 4 bids + 1 play
}

#[test]
fn following_seats_must_follow_suit() {
    let mut state = two_trick_state();
    play_card(&mut state, 0, card("KS")).unwrap();

    // Seat 1 holds spades; an off-suit card is rejected untouched.
    assert_illegal_play(play_card(&mut state, 1, card("5D")));
    assert_eq!(state.hands[1].len(), 4);
    assert_eq!(state.active_player, 1);

    play_card(&mut state, 1, card("QS")).unwrap();
    assert_eq!(state.active_player, 2);
}

#[test]
fn trump_stays_legal_while_holding_the_led_suit() {
    let mut state = two_trick_state();
    // Trick 1: all spades, KS takes it and trump is spades.
    play_card(&mut state, 0, card("KS")).unwrap();
    play_card(&mut state, 1, card("QS")).unwrap();
    play_card(&mut state, 2, card("2S")).unwrap();
    let outcome = play_card(&mut state, 3, card("TS")).unwrap();
    let result = outcome.completed.expect("trick completed");
    assert_eq!(result.winner, 0);
    assert!(!result.hand_complete);
    assert_eq!(state.active_player, 0);
    assert_eq!(state.trick, 2);
    assert!(state.current_hand.open_trick().is_none());

    // Trick 2: hearts led. Seat 1 still holds a heart, yet trumping with
    // the 9 of spades is legal; the diamond throw-off is not.
    play_card(&mut state, 0, card("AH")).unwrap();
    assert_illegal_play(play_card(&mut state, 1, card("5D")));
    play_card(&mut state, 1, card("9S")).unwrap();
    play_card(&mut state, 2, card("7H")).unwrap();
    let outcome = play_card(&mut state, 3, card("4H")).unwrap();
    assert_eq!(outcome.completed.unwrap().winner, 1);
    assert_eq!(state.active_player, 1);
}

#[test]
fn void_seats_may_throw_off() {
    let mut state = play_state(
        3,
        0,
        Bid(1),
        [
            cards(&["KH", "2C"]),
            cards(&["5D", "9C"]), // no hearts
            cards(&["7H", "2D"]),
            cards(&["4H", "6C"]),
        ],
    );
    play_card(&mut state, 0, card("KH")).unwrap();
    play_card(&mut state, 1, card("9C")).unwrap();
    play_card(&mut state, 2, card("7H")).unwrap();
    let outcome = play_card(&mut state, 3, card("4H")).unwrap();
    assert_eq!(outcome.completed.unwrap().winner, 0);
}

#[test]
fn unheld_cards_and_turn_order_are_enforced() {
    let mut state = two_trick_state();
    assert_illegal_play(play_card(&mut state, 1, card("3H"))); // out of turn
    assert_illegal_play(play_card(&mut state, 0, card("AD"))); // not in hand
}

#[test]
fn plays_are_rejected_outside_the_play_phase() {
    let mut state = two_trick_state();
    state.phase = Phase::Bid;
    assert_illegal_play(play_card(&mut state, 0, card("KS")));
}

#[test]
fn declared_rule_blocks_play_until_trump_is_named() {
    let mut state = two_trick_state();
    state.rules.trump_rule = TrumpRule::Declared;
    assert_illegal_play(play_card(&mut state, 0, card("KS")));

    state.current_hand.trump = Some(Suit::Hearts);
    let outcome = play_card(&mut state, 0, card("KS")).unwrap();
    // The first card led no longer moves trump.
    assert_eq!(outcome.trump_set, None);
    assert_eq!(state.current_hand.trump, Some(Suit::Hearts));
}

#[test]
fn legal_plays_follow_the_lead() {
    let hand = cards(&["2H", "9H", "5D", "AS"]);

    // Holding the led suit: led cards plus trump only.
    let plays = legal_plays(&hand, Some(Suit::Hearts), Some(Suit::Spades));
    assert_eq!(plays, cards(&["2H", "9H", "AS"]));

    // Void in the led suit: anything goes.
    let plays = legal_plays(&hand, Some(Suit::Clubs), Some(Suit::Spades));
    assert_eq!(plays.len(), hand.len());

    // Leading: unrestricted.
    let plays = legal_plays(&hand, None, None);
    assert_eq!(plays.len(), hand.len());
}

#[test]
fn trick_winner_prefers_trump_then_lead_rank() {
    let mut trick = Trick::new(1, 0);
    for (seat, token) in [(0, "AS"), (1, "2H"), (2, "KS"), (3, "QS")] {
        trick.plays.push((seat, card(token)));
    }
    // The lone 2 of trump takes the led-suit ace.
    let (winner, winning) = winning_play(&trick, Suit::Hearts).unwrap();
    assert_eq!(winner, 1);
    assert_eq!(winning, card("2H"));

    // With no trump out, the highest card of the led suit wins.
    let mut trick = Trick::new(1, 0);
    for (seat, token) in [(0, "9D"), (1, "AC"), (2, "KD"), (3, "2D")] {
        trick.plays.push((seat, card(token)));
    }
    let (winner, winning) = winning_play(&trick, Suit::Hearts).unwrap();
    assert_eq!(winner, 2);
    assert_eq!(winning, card("KD"));
}

#[test]
fn resolving_a_short_trick_is_a_corruption() {
    let mut trick = Trick::new(1, 0);
    trick.plays.push((0, card("AS")));
    assert!(matches!(
        winning_play(&trick, Suit::Hearts),
        Err(DomainError::Corruption(_))
    ));
}
