use std::collections::BTreeSet;

use uuid::Uuid;

use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Suit};
use crate::domain::engine::GameEngine;
use crate::domain::events::GameEvent;
use crate::domain::rules::{GameRules, TrumpRule, HAND_SIZE, MAX_HANDS, PLAYERS, WINNING_SCORE};
use crate::domain::state::{Phase, Seat};
use crate::domain::test_state_helpers::{play_first_legal, play_scripted_hand};
use crate::errors::domain::{DomainError, ValidationKind};

fn client(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

fn joined_engine(seed: u64) -> GameEngine {
    let mut engine = GameEngine::with_seed(GameRules::default(), Some(seed));
    for seat in 0..PLAYERS as Seat {
        engine
            .join(seat, client(u128::from(seat) + 1))
            .expect("seat is free");
    }
    engine
}

#[test]
fn fourth_join_deals_and_opens_bidding() {
    let mut engine = GameEngine::with_seed(GameRules::default(), Some(5));
    for seat in 0..3 {
        engine.join(seat, client(u128::from(seat) + 1)).unwrap();
        assert_eq!(engine.state().phase, Phase::Pregame);
    }
    let events = engine.join(3, client(4)).unwrap();

    let state = engine.state();
    assert_eq!(state.phase, Phase::Bid);
    assert_eq!(state.hand_no, 1);
    assert_eq!(state.dealer, 0);
    assert_eq!(state.active_player, 1);

    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::HandStarted { hand_no: 1, dealer: 0, active_player: 1 }
    )));
    let dealt = events
        .iter()
        .filter(|e| matches!(e, GameEvent::HandDealt { .. }))
        .count();
    assert_eq!(dealt, PLAYERS);

    // The four hands partition 36 distinct cards.
    let mut seen = BTreeSet::new();
    for hand in &state.hands {
        assert_eq!(hand.len(), HAND_SIZE);
        for card in hand {
            assert!(seen.insert(card.code()));
        }
    }
    assert_eq!(seen.len(), HAND_SIZE * PLAYERS);
}

#[test]
fn join_rejections() {
    let mut engine = GameEngine::with_seed(GameRules::default(), Some(5));
    engine.join(0, client(1)).unwrap();

    match engine.join(0, client(2)) {
        Err(DomainError::Validation(ValidationKind::InvalidSeat, _)) => {}
        other => panic!("expected InvalidSeat, got {other:?}"),
    }
    match engine.join(4, client(2)) {
        Err(DomainError::Validation(ValidationKind::InvalidSeat, _)) => {}
        other => panic!("expected InvalidSeat, got {other:?}"),
    }

    for seat in 1..PLAYERS as Seat {
        engine.join(seat, client(u128::from(seat) + 1)).unwrap();
    }
    match engine.join(2, client(9)) {
        Err(DomainError::Validation(ValidationKind::RoomFull, _)) => {}
        other => panic!("expected RoomFull, got {other:?}"),
    }
}

#[test]
fn stuck_dealer_bid_round_through_the_engine() {
    let mut engine = joined_engine(5);
    for seat in [1, 2, 3] {
        engine.submit_bid(seat, Bid::PASS).unwrap();
    }
    assert!(engine.submit_bid(0, Bid::PASS).is_err());

    let events = engine.submit_bid(0, Bid(1)).unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::BidWon { declarer: 0, high_bid: Bid(1), .. }
    )));
    assert_eq!(engine.state().phase, Phase::Play);
    assert_eq!(engine.state().active_player, 0);
}

#[test]
fn first_lead_emits_trump_and_hand_rolls_over() {
    let mut engine = joined_engine(5);
    for seat in [1, 2, 3] {
        engine.submit_bid(seat, Bid::PASS).unwrap();
    }
    engine.submit_bid(0, Bid(1)).unwrap();

    let events = play_first_legal(&mut engine);
    let led = engine.state().current_hand.trump.expect("trump fixed");
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TrumpSet { suit, by: 0 } if *suit == led)));

    // Finish the hand: 35 more first-legal plays.
    let mut scored = Vec::new();
    while engine.state().hand_no == 1 && engine.state().phase == Phase::Play {
        scored.extend(play_first_legal(&mut engine));
    }
    assert!(scored.iter().any(|e| matches!(e, GameEvent::HandScored { .. })));

    // One hand cannot end the game; it rolls over with the next dealer.
    let state = engine.state();
    assert_eq!(state.phase, Phase::Bid);
    assert_eq!(state.hand_no, 2);
    assert_eq!(state.dealer, 1);
    assert_eq!(state.active_player, 2);
    assert_eq!(state.current_hand.bids, [None; PLAYERS]);
    assert_eq!(state.current_hand.trump, None);
    assert!(state.hands.iter().all(|h| h.len() == HAND_SIZE));
    assert_eq!(state.trick, u32::try_from(HAND_SIZE).unwrap() + 1);
    assert_eq!(state.hand_trick_no(), 1, "the counter never resets, the position does");
}

#[test]
fn scripted_game_reaches_postgame_and_locks() {
    let mut engine = joined_engine(41);
    for _ in 0..MAX_HANDS {
        if engine.is_over() {
            break;
        }
        play_scripted_hand(&mut engine);
    }

    let state = engine.state();
    assert_eq!(state.phase, Phase::Postgame);
    match state.winner {
        Some(team) => assert!(state.score_of(team) >= WINNING_SCORE),
        None => assert_eq!(state.hand_no, MAX_HANDS),
    }

    // Terminal: every further action is rejected.
    let active_player = state.active_player;
    assert!(engine.submit_bid(active_player, Bid(1)).is_err());
    let any_card = Card::from_code(1).unwrap();
    assert!(engine.submit_play(active_player, any_card).is_err());
    assert!(engine.join(0, client(99)).is_err());
}

#[test]
fn declared_rule_gates_play_on_the_declarer() {
    let rules = GameRules {
        trump_rule: TrumpRule::Declared,
    };
    let mut engine = GameEngine::with_seed(rules, Some(5));
    for seat in 0..PLAYERS as Seat {
        engine.join(seat, client(u128::from(seat) + 1)).unwrap();
    }
    engine.submit_bid(1, Bid(2)).unwrap();
    for seat in [2, 3, 0] {
        engine.submit_bid(seat, Bid::PASS).unwrap();
    }
    assert_eq!(engine.state().current_hand.declarer, Some(1));

    // No play, and no trump from anyone but the declarer.
    let lead = engine.seat_view(1).hand[0];
    assert!(engine.submit_play(1, lead).is_err());
    assert!(engine.declare_trump(0, Suit::Hearts).is_err());

    let events = engine.declare_trump(1, Suit::Hearts).unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::TrumpSet { suit: Suit::Hearts, by: 1 }
    )));
    assert!(engine.declare_trump(1, Suit::Clubs).is_err());

    // The first card led no longer moves trump.
    play_first_legal(&mut engine);
    assert_eq!(engine.state().current_hand.trump, Some(Suit::Hearts));
}

#[test]
fn seat_view_hides_other_hands() {
    let engine = joined_engine(5);
    let view = engine.seat_view(2);
    assert_eq!(view.seat, 2);
    assert_eq!(view.hand, engine.state().hands[2]);
    assert_eq!(view.phase, Phase::Bid);
    assert!(view.legal_bids().is_empty(), "not seat 2's turn");
    assert!(!engine.seat_view(1).legal_bids().is_empty());
}
