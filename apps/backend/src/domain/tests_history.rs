use crate::domain::bidding::Bid;
use crate::domain::engine::GameEngine;
use crate::domain::history::{summarize, ActionLog, HandRecord, Trick};
use crate::domain::rules::{GameRules, HAND_SIZE, PLAYERS};
use crate::domain::state::Seat;
use crate::domain::test_state_helpers::{card, play_first_legal, play_scripted_hand};
use uuid::Uuid;

fn engine_after_hands(seed: u64, hands: usize) -> GameEngine {
    let mut engine = GameEngine::with_seed(GameRules::default(), Some(seed));
    for seat in 0..PLAYERS as Seat {
        engine
            .join(seat, Uuid::from_u128(u128::from(seat) + 1))
            .unwrap();
    }
    for _ in 0..hands {
        play_scripted_hand(&mut engine);
    }
    engine
}

#[test]
fn empty_log_summarizes_to_nothing() {
    assert_eq!(summarize(&ActionLog::new()).unwrap(), Vec::new());
}

#[test]
fn partial_hands_are_skipped() {
    let mut engine = engine_after_hands(23, 0);
    for seat in [1, 2, 3] {
        engine.submit_bid(seat, Bid::PASS).unwrap();
    }
    engine.submit_bid(0, Bid(1)).unwrap();
    for _ in 0..6 {
        play_first_legal(&mut engine);
    }
    assert_eq!(engine.state().log.len(), 10);
    assert!(summarize(&engine.state().log).unwrap().is_empty());
}

#[test]
fn summaries_replay_the_live_scoring() {
    let engine = engine_after_hands(23, 2);
    let state = engine.state();
    // 4 bids and 36 plays per hand.
    assert_eq!(state.log.len(), 2 * (PLAYERS + HAND_SIZE * PLAYERS));

    let summaries = summarize(&state.log).unwrap();
    assert_eq!(summaries.len(), state.completed_hands.len());

    let mut scores = [0i16; 2];
    for (summary, scored) in summaries.iter().zip(&state.completed_hands) {
        assert_eq!(summary.hand_no, scored.record.hand_no);
        assert_eq!(summary.dealer, scored.record.dealer);
        assert_eq!(summary.declarer, scored.outcome.declarer);
        assert_eq!(summary.high_bid, scored.outcome.high_bid);
        assert_eq!(Some(summary.trump), scored.record.trump);
        assert_eq!(summary.bids, scored.record.bids);
        assert_eq!(summary.net, scored.outcome.net);

        let winners: Vec<Seat> = scored
            .record
            .tricks
            .iter()
            .map(|t| t.winner.unwrap())
            .collect();
        assert_eq!(summary.trick_winners, winners);

        scores[0] += summary.net[0];
        scores[1] += summary.net[1];
        assert_eq!(summary.scores_after, scores);
    }
    assert_eq!(scores, state.scores);
}

#[test]
fn open_trick_bookkeeping() {
    let mut trick = Trick::new(1, 2);
    assert_eq!(trick.lead_suit(), None);
    trick.plays.push((2, card("9D")));
    assert_eq!(trick.lead_suit(), Some(crate::domain::cards::Suit::Diamonds));
    assert!(!trick.is_complete());

    let mut record = HandRecord::new(1, 1);
    assert!(record.no_plays_yet());
    assert!(record.open_trick().is_none());
    record.tricks.push(trick);
    assert!(!record.no_plays_yet());
    assert_eq!(record.open_trick().unwrap().trick_no, 1);
    assert_eq!(record.cards_in_play(), &[(2, card("9D"))]);

    for (seat, token) in [(3, "AD"), (0, "2D"), (1, "3D")] {
        record.open_trick_mut().unwrap().plays.push((seat, card(token)));
    }
    assert!(record.open_trick().is_none(), "complete tricks are closed");
    assert_eq!(record.cards_in_play(), &[]);
    assert_eq!(record.completed_trick_count(), 1);
}

#[test]
fn high_bid_tracks_the_maximum() {
    let mut record = HandRecord::new(1, 0);
    assert_eq!(record.high_bid(), 0);
    record.bids[1] = Some(Bid(2));
    record.bids[2] = Some(Bid::PASS);
    assert_eq!(record.high_bid(), 2);
    record.bids[3] = Some(Bid::CINCH);
    assert_eq!(record.high_bid(), 5);
}
