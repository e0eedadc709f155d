//! Explicit trick/hand history and the append-only action log.
//!
//! Tricks and hands are built incrementally as actions are accepted, so
//! invariants are checked on the objects themselves instead of being
//! reconstructed by scanning a flat log. The `ActionLog` remains the
//! canonical record for the persistence boundary; `summarize` shows it is
//! sufficient by re-deriving every per-hand summary from the flat stream
//! alone.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::bidding::{self, Bid};
use crate::domain::cards::{Card, Suit};
use crate::domain::rules::{HAND_SIZE, NUM_TEAMS, PLAYERS};
use crate::domain::state::Seat;
use crate::errors::domain::DomainError;

/// One round of four plays. `winner` is set when the trick resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trick {
    /// Global trick number this trick was played under.
    pub trick_no: u32,
    pub leader: Seat,
    pub plays: Vec<(Seat, Card)>,
    pub winner: Option<Seat>,
}

impl Trick {
    pub fn new(trick_no: u32, leader: Seat) -> Self {
        Self {
            trick_no,
            leader,
            plays: Vec::with_capacity(PLAYERS),
            winner: None,
        }
    }

    pub fn lead_suit(&self) -> Option<Suit> {
        self.plays.first().map(|(_, c)| c.suit)
    }

    pub fn is_complete(&self) -> bool {
        self.plays.len() == PLAYERS
    }
}

/// One full deal: dealer, bids, declarer, trump, and the tricks played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandRecord {
    pub hand_no: u32,
    pub dealer: Seat,
    pub bids: [Option<Bid>; PLAYERS],
    /// Winner of the bidding round, once resolved.
    pub declarer: Option<Seat>,
    pub trump: Option<Suit>,
    /// Completed tricks plus, during play, the trick in progress last.
    pub tricks: Vec<Trick>,
}

impl HandRecord {
    pub fn new(hand_no: u32, dealer: Seat) -> Self {
        Self {
            hand_no,
            dealer,
            bids: [None; PLAYERS],
            declarer: None,
            trump: None,
            tricks: Vec::with_capacity(HAND_SIZE),
        }
    }

    pub fn bid_count(&self) -> usize {
        self.bids.iter().filter(|b| b.is_some()).count()
    }

    /// Highest bid recorded so far this hand (0 before anyone bids).
    pub fn high_bid(&self) -> u8 {
        self.bids
            .iter()
            .flatten()
            .map(|b| b.value())
            .max()
            .unwrap_or(0)
    }

    /// The trick currently being played, if one is open.
    pub fn open_trick(&self) -> Option<&Trick> {
        self.tricks.last().filter(|t| !t.is_complete())
    }

    pub fn open_trick_mut(&mut self) -> Option<&mut Trick> {
        self.tricks.last_mut().filter(|t| !t.is_complete())
    }

    pub fn completed_trick_count(&self) -> usize {
        self.tricks.iter().filter(|t| t.is_complete()).count()
    }

    /// True before any card has been played this hand.
    pub fn no_plays_yet(&self) -> bool {
        self.tricks.is_empty()
    }

    /// Cards on the table in the open trick, in play order.
    pub fn cards_in_play(&self) -> &[(Seat, Card)] {
        self.open_trick().map(|t| t.plays.as_slice()).unwrap_or(&[])
    }
}

/// Payload of one accepted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogAction {
    Bid { value: Bid },
    Play { card: Card },
    DeclareTrump { suit: Suit },
}

/// One accepted action, tagged with where in the game it happened.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub hand_no: u32,
    pub trick: u32,
    pub actor: Seat,
    #[serde(flatten)]
    pub action: LogAction,
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
}

/// Append-only, ordered record of every accepted bid/play action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, hand_no: u32, trick: u32, actor: Seat, action: LogAction) {
        self.entries.push(LogEntry {
            hand_no,
            trick,
            actor,
            action,
            at: OffsetDateTime::now_utc(),
        });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Per-hand digest rebuilt from the flat action stream.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandSummary {
    pub hand_no: u32,
    pub dealer: Seat,
    pub declarer: Seat,
    pub high_bid: Bid,
    pub trump: Suit,
    pub bids: [Option<Bid>; PLAYERS],
    pub trick_winners: Vec<Seat>,
    pub net: [i16; NUM_TEAMS],
    pub scores_after: [i16; NUM_TEAMS],
}

/// Fold the flat log into per-hand summaries. Only fully played hands are
/// summarized; a trailing partial hand (game aborted or still running) is
/// skipped. The dealer is recovered from the log itself: the first bidder
/// of a hand sits left of the dealer.
pub fn summarize(log: &ActionLog) -> Result<Vec<HandSummary>, DomainError> {
    let mut summaries = Vec::new();
    let mut scores = [0i16; NUM_TEAMS];

    let mut hand_nos: Vec<u32> = log.entries().iter().map(|e| e.hand_no).collect();
    hand_nos.dedup();

    for hand_no in hand_nos {
        let Some(record) = rebuild_hand(log, hand_no)? else {
            continue;
        };
        let outcome = crate::domain::scoring::score_hand(&record, scores)?;
        for team in crate::domain::state::Team::ALL {
            scores[team.index()] += outcome.net[team.index()];
        }
        summaries.push(HandSummary {
            hand_no,
            dealer: record.dealer,
            declarer: outcome.declarer,
            high_bid: outcome.high_bid,
            trump: record
                .trump
                .ok_or_else(|| DomainError::corruption("summarized hand without trump"))?,
            bids: record.bids,
            trick_winners: record
                .tricks
                .iter()
                .map(|t| {
                    t.winner
                        .ok_or_else(|| DomainError::corruption("unresolved trick in summary"))
                })
                .collect::<Result<_, _>>()?,
            net: outcome.net,
            scores_after: scores,
        });
    }
    Ok(summaries)
}

/// Reconstruct a completed hand's record from its log entries. Returns
/// `Ok(None)` for a hand with fewer than 9 completed tricks.
fn rebuild_hand(log: &ActionLog, hand_no: u32) -> Result<Option<HandRecord>, DomainError> {
    let entries: Vec<&LogEntry> = log
        .entries()
        .iter()
        .filter(|e| e.hand_no == hand_no)
        .collect();

    let first_bidder = match entries.iter().find_map(|e| match e.action {
        LogAction::Bid { .. } => Some(e.actor),
        _ => None,
    }) {
        Some(seat) => seat,
        None => return Ok(None),
    };
    // Bidding starts left of the dealer.
    let dealer = (first_bidder + PLAYERS as u8 - 1) % PLAYERS as u8;
    let mut record = HandRecord::new(hand_no, dealer);

    for entry in &entries {
        match entry.action {
            LogAction::Bid { value } => {
                record.bids[entry.actor as usize] = Some(value);
            }
            LogAction::DeclareTrump { suit } => {
                record.trump = Some(suit);
            }
            LogAction::Play { card } => {
                if record.trump.is_none() {
                    record.trump = Some(card.suit);
                }
                match record.open_trick_mut() {
                    Some(trick) => trick.plays.push((entry.actor, card)),
                    None => {
                        let mut trick = Trick::new(entry.trick, entry.actor);
                        trick.plays.push((entry.actor, card));
                        record.tricks.push(trick);
                    }
                }
                let trump = record.trump;
                if let Some(trick) = record.tricks.last_mut() {
                    if trick.is_complete() {
                        let trump = trump
                            .ok_or_else(|| DomainError::corruption("complete trick, no trump"))?;
                        let (winner, _) = crate::domain::tricks::winning_play(trick, trump)?;
                        trick.winner = Some(winner);
                    }
                }
            }
        }
    }

    if record.completed_trick_count() < HAND_SIZE || record.open_trick().is_some() {
        return Ok(None);
    }
    if record.bid_count() != PLAYERS {
        return Err(DomainError::corruption(format!(
            "hand {hand_no} played out with {} bids",
            record.bid_count()
        )));
    }
    let resolution = bidding::resolve_bidding(&record.bids, dealer)?;
    record.declarer = Some(resolution.declarer);
    Ok(Some(record))
}
