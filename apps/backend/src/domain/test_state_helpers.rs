//! Test-only builders for states partway through a hand.

use uuid::Uuid;

use crate::domain::bidding::{place_bid, Bid};
use crate::domain::cards::{Card, Rank, Suit};
use crate::domain::engine::GameEngine;
use crate::domain::events::GameEvent;
use crate::domain::history::{HandRecord, Trick};
use crate::domain::rules::{GameRules, PLAYERS};
use crate::domain::state::{hand_start_seat, nth_from, GameState, Phase, Seat};

/// Parse a "QH"/"TC"/"2S" fixture token.
pub fn card(token: &str) -> Card {
    let bytes = token.as_bytes();
    assert_eq!(bytes.len(), 2, "bad card token {token}");
    let rank = match bytes[0] {
        b'T' => Rank::Ten,
        b'J' => Rank::Jack,
        b'Q' => Rank::Queen,
        b'K' => Rank::King,
        b'A' => Rank::Ace,
        digit @ b'2'..=b'9' => Rank::from_value(digit - b'0').expect("digit ranks are in range"),
        other => panic!("bad rank char {} in {token}", other as char),
    };
    let suit = match bytes[1] {
        b'C' => Suit::Clubs,
        b'D' => Suit::Diamonds,
        b'H' => Suit::Hearts,
        b'S' => Suit::Spades,
        other => panic!("bad suit char {} in {token}", other as char),
    };
    Card::new(rank, suit)
}

pub fn cards(tokens: &[&str]) -> Vec<Card> {
    tokens.iter().map(|t| card(t)).collect()
}

/// A four-seat game in the Bid phase of hand 1 with the given dealer and
/// hands. Bidding opens left of the dealer.
pub fn bidding_state(dealer: Seat, hands: [Vec<Card>; PLAYERS]) -> GameState {
    let mut state = GameState::new(GameRules::default());
    for (i, seat) in state.seats.iter_mut().enumerate() {
        *seat = Some(Uuid::from_u128(i as u128 + 1));
    }
    state.phase = Phase::Bid;
    state.hand_no = 1;
    state.dealer = dealer;
    state.active_player = hand_start_seat(dealer);
    state.current_hand = HandRecord::new(1, dealer);
    state.hands = hands;
    state
}

/// Run the bid round: `declarer` bids `bid`, everyone else passes.
/// Leaves the state in the Play phase with `declarer` set to lead.
pub fn play_state(
    dealer: Seat,
    declarer: Seat,
    bid: Bid,
    hands: [Vec<Card>; PLAYERS],
) -> GameState {
    let mut state = bidding_state(dealer, hands);
    for _ in 0..PLAYERS {
        let seat = state.active_player;
        let value = if seat == declarer { bid } else { Bid::PASS };
        place_bid(&mut state, seat, value).expect("scripted bid is legal");
    }
    assert_eq!(state.phase, Phase::Play);
    assert_eq!(state.current_hand.declarer, Some(declarer));
    state
}

/// A fully played hand assembled directly, for scoring tests. Each entry
/// pairs a trick's winner with its four cards, in play order from the
/// trick's leader (the previous winner).
pub fn finished_hand(
    dealer: Seat,
    declarer: Seat,
    bid: Bid,
    trump: Suit,
    tricks: &[(Seat, [&str; 4])],
) -> HandRecord {
    let mut record = HandRecord::new(1, dealer);
    for seat in 0..PLAYERS as Seat {
        record.bids[seat as usize] = Some(if seat == declarer { bid } else { Bid::PASS });
    }
    record.declarer = Some(declarer);
    record.trump = Some(trump);
    let mut leader = hand_start_seat(dealer);
    for (i, (winner, tokens)) in tricks.iter().enumerate() {
        let mut trick = Trick::new(i as u32 + 1, leader);
        for (offset, token) in tokens.iter().enumerate() {
            trick.plays.push((nth_from(leader, offset as u8), card(token)));
        }
        trick.winner = Some(*winner);
        record.tricks.push(trick);
        leader = *winner;
    }
    record
}

/// Drive the engine through one full hand: every seat passes except the
/// dealer, who bids 1, then every seat plays its first legal card until
/// the hand scores. Panics if the scripted actions stop being legal.
pub fn play_scripted_hand(engine: &mut GameEngine) {
    let dealer = engine.state().dealer;
    for _ in 0..PLAYERS {
        let seat = engine.state().active_player;
        let bid = if seat == dealer { Bid(1) } else { Bid::PASS };
        engine.submit_bid(seat, bid).expect("scripted bid accepted");
    }
    let hand_no = engine.state().hand_no;
    while engine.state().phase == Phase::Play && engine.state().hand_no == hand_no {
        play_first_legal(engine);
    }
}

/// Submit the active seat's first legal card.
pub fn play_first_legal(engine: &mut GameEngine) -> Vec<GameEvent> {
    let seat = engine.state().active_player;
    let card = engine.seat_view(seat).legal_plays()[0];
    engine.submit_play(seat, card).expect("legal play accepted")
}
