//! The authoritative per-room game state and seat/turn arithmetic.

use uuid::Uuid;

use crate::domain::cards::Card;
use crate::domain::history::{ActionLog, HandRecord};
use crate::domain::rules::{GameRules, NUM_TEAMS, PLAYERS, TEAM_SIZE};
use crate::domain::scoring::ScoredHand;

pub type Seat = u8; // 0..=3
pub type ClientId = Uuid;

/// Overall game progression.
#[derive(Debug, Clone, Copy, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Room created, seats still filling.
    Pregame,
    /// Players bid in fixed turn order, dealer last.
    Bid,
    /// Tricks are being played.
    Play,
    /// Terminal. No further mutation.
    Postgame,
}

/// Fixed partnership by seat parity: seats 0&2 vs seats 1&3.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Team {
    Even,
    Odd,
}

impl Team {
    pub const ALL: [Team; NUM_TEAMS] = [Team::Even, Team::Odd];

    pub fn of(seat: Seat) -> Team {
        if seat as usize % TEAM_SIZE == 0 {
            Team::Even
        } else {
            Team::Odd
        }
    }

    pub fn index(self) -> usize {
        match self {
            Team::Even => 0,
            Team::Odd => 1,
        }
    }

    pub fn other(self) -> Team {
        match self {
            Team::Even => Team::Odd,
            Team::Odd => Team::Even,
        }
    }
}

impl serde::Serialize for Team {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.index() as u8)
    }
}

impl<'de> serde::Deserialize<'de> for Team {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Team::Even),
            1 => Ok(Team::Odd),
            other => Err(serde::de::Error::custom(format!(
                "team index out of range: {other}"
            ))),
        }
    }
}

/// Next seat clockwise (0 -> 1 -> 2 -> 3 -> 0).
#[inline]
pub fn next_seat(seat: Seat) -> Seat {
    (seat + 1) % PLAYERS as u8
}

/// Seat `n` steps clockwise from `start`.
#[inline]
pub fn nth_from(start: Seat, n: u8) -> Seat {
    (start + n) % PLAYERS as u8
}

/// First actor of a hand: the seat left of the dealer.
#[inline]
pub fn hand_start_seat(dealer: Seat) -> Seat {
    next_seat(dealer)
}

/// The single mutable source of truth for one game room. Mutated only
/// through the engine's validated entry points.
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: Phase,
    /// Seat -> opaque client identity; the router owns what an identity
    /// means. Game starts when the 4th seat fills.
    pub seats: [Option<ClientId>; PLAYERS],
    pub dealer: Seat,
    /// Seat whose action is expected next. Meaningful in Bid and Play.
    pub active_player: Seat,
    /// Current hand number, 1-based once the game starts.
    pub hand_no: u32,
    /// Current trick number, 1-based, incremented once per completed
    /// trick; never reset between hands.
    pub trick: u32,
    pub hands: [Vec<Card>; PLAYERS],
    /// Cumulative team scores: index 0 = even team, 1 = odd team.
    pub scores: [i16; NUM_TEAMS],
    pub rules: GameRules,
    /// The hand in progress, built incrementally as actions land.
    pub current_hand: HandRecord,
    pub completed_hands: Vec<ScoredHand>,
    /// Append-only record of every accepted action.
    pub log: ActionLog,
    /// Winning team once the game is over; `None` in a draw (MAX_HANDS).
    pub winner: Option<Team>,
}

impl GameState {
    pub fn new(rules: GameRules) -> Self {
        Self {
            phase: Phase::Pregame,
            seats: [None; PLAYERS],
            dealer: 0,
            active_player: 0,
            hand_no: 0,
            trick: 1,
            hands: Default::default(),
            scores: [0; NUM_TEAMS],
            rules,
            current_hand: HandRecord::new(0, 0),
            completed_hands: Vec::new(),
            log: ActionLog::new(),
            winner: None,
        }
    }

    /// Position of the current trick within the hand, 1..=9.
    pub fn hand_trick_no(&self) -> u32 {
        (self.trick - 1) % crate::domain::rules::HAND_SIZE as u32 + 1
    }

    pub fn occupied_seats(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn score_of(&self, team: Team) -> i16 {
        self.scores[team.index()]
    }
}
