//! Play legality, trick bookkeeping, and trick resolution.

use crate::domain::cards::{card_beats, hand_has_suit, Card, Suit};
use crate::domain::history::{LogAction, Trick};
use crate::domain::rules::{HAND_SIZE, PLAYERS, TrumpRule};
use crate::domain::state::{next_seat, GameState, Phase, Seat};
use crate::errors::domain::DomainError;

/// Result of an accepted play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayOutcome {
    /// Set when this play fixed trump for the hand (first lead under the
    /// historical rule).
    pub trump_set: Option<Suit>,
    /// Present when this play completed a trick.
    pub completed: Option<TrickResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrickResult {
    /// Global number of the trick that just completed.
    pub trick_no: u32,
    pub winner: Seat,
    /// True when this was the hand's 9th trick.
    pub hand_complete: bool,
}

/// The cards `hand` may legally play given the led suit and trump.
/// Leading is unrestricted. Following: trump is always legal, the led
/// suit is legal, and off-suit cards are legal only for a hand holding
/// none of the led suit.
pub fn legal_plays(hand: &[Card], lead: Option<Suit>, trump: Option<Suit>) -> Vec<Card> {
    let mut cards: Vec<Card> = match lead {
        Some(lead) if hand_has_suit(hand, lead) => hand
            .iter()
            .copied()
            .filter(|c| c.suit == lead || Some(c.suit) == trump)
            .collect(),
        _ => hand.to_vec(),
    };
    cards.sort();
    cards
}

/// Validate and apply one card play. Rejections leave the state
/// untouched; invariant failures surface as corruption.
pub fn play_card(state: &mut GameState, seat: Seat, card: Card) -> Result<PlayOutcome, DomainError> {
    if state.phase != Phase::Play {
        return Err(DomainError::illegal_play("not in the play phase"));
    }
    if seat != state.active_player {
        return Err(DomainError::illegal_play(format!(
            "seat {seat} played out of turn (expected {})",
            state.active_player
        )));
    }
    if state.rules.trump_rule == TrumpRule::Declared && state.current_hand.trump.is_none() {
        return Err(DomainError::illegal_play(
            "trump has not been declared for this hand",
        ));
    }
    let Some(pos) = state.hands[seat as usize].iter().position(|&c| c == card) else {
        return Err(DomainError::illegal_play(format!("{card} is not in hand")));
    };

    let lead = state.current_hand.open_trick().and_then(Trick::lead_suit);
    let legal = legal_plays(&state.hands[seat as usize], lead, state.current_hand.trump);
    if !legal.contains(&card) {
        return Err(DomainError::illegal_play(format!(
            "{card} does not follow suit"
        )));
    }

    // First play of the hand fixes trump under the historical rule.
    let mut trump_set = None;
    if state.current_hand.no_plays_yet()
        && state.rules.trump_rule == TrumpRule::FirstLead
        && state.current_hand.trump.is_none()
    {
        state.current_hand.trump = Some(card.suit);
        trump_set = Some(card.suit);
    }

    if state.current_hand.open_trick().is_none() {
        let trick = Trick::new(state.trick, seat);
        state.current_hand.tricks.push(trick);
    }

    let played = state.hands[seat as usize].remove(pos);
    state
        .current_hand
        .open_trick_mut()
        .ok_or_else(|| DomainError::corruption("no open trick to receive play"))?
        .plays
        .push((seat, played));
    state
        .log
        .record(state.hand_no, state.trick, seat, LogAction::Play { card: played });

    let trick_full = state
        .current_hand
        .tricks
        .last()
        .map(Trick::is_complete)
        .unwrap_or(false);
    if !trick_full {
        state.active_player = next_seat(seat);
        return Ok(PlayOutcome {
            trump_set,
            completed: None,
        });
    }

    // Resolve the completed trick: winner takes the cards and leads next.
    let trump = state
        .current_hand
        .trump
        .ok_or_else(|| DomainError::corruption("trick resolving without trump"))?;
    let trick_no = state.trick;
    let winner = {
        let trick = state
            .current_hand
            .tricks
            .last_mut()
            .ok_or_else(|| DomainError::corruption("trick resolving without a trick"))?;
        let (winner, _) = winning_play(trick, trump)?;
        trick.winner = Some(winner);
        winner
    };
    state.trick += 1;
    state.active_player = winner;

    let hand_complete = state.current_hand.completed_trick_count() == HAND_SIZE;
    if hand_complete && state.hands.iter().any(|h| !h.is_empty()) {
        return Err(DomainError::corruption(
            "hand ended with cards still in a player's hand",
        ));
    }
    if !hand_complete && state.hands.iter().all(|h| h.is_empty()) {
        return Err(DomainError::corruption(
            "hands exhausted before the 9th trick",
        ));
    }

    Ok(PlayOutcome {
        trump_set,
        completed: Some(TrickResult {
            trick_no,
            winner,
            hand_complete,
        }),
    })
}

/// Winner of a completed trick: the highest trump if any trump was
/// played, else the highest card of the led suit. Rank ties cannot occur
/// in a 52-unique-card deck.
pub fn winning_play(trick: &Trick, trump: Suit) -> Result<(Seat, Card), DomainError> {
    if trick.plays.len() != PLAYERS {
        return Err(DomainError::corruption(format!(
            "trick resolving with {} plays",
            trick.plays.len()
        )));
    }
    let lead = trick
        .lead_suit()
        .ok_or_else(|| DomainError::corruption("trick has no lead"))?;
    let mut best = trick.plays[0];
    for &(seat, card) in &trick.plays[1..] {
        if card_beats(card, best.1, lead, trump) {
            best = (seat, card);
        }
    }
    Ok(best)
}
