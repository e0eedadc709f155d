//! Fixed game parameters and the per-room rule knobs.

pub const PLAYERS: usize = 4;
pub const NUM_TEAMS: usize = 2;
pub const TEAM_SIZE: usize = 2;

/// Cards dealt to each seat at hand start; also the tricks per hand.
pub const HAND_SIZE: usize = 9;

/// A team wins once its cumulative score reaches this.
pub const WINNING_SCORE: i16 = 11;

/// Safety valve against runaway (AI) games, not part of the rules proper.
/// A game reaching this many hands without a winner ends as a draw.
pub const MAX_HANDS: u32 = 16;

/// How trump is fixed for a hand.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrumpRule {
    /// Historical behavior: the suit of the first card led in the hand
    /// becomes trump. Bidding never names a suit.
    #[default]
    FirstLead,
    /// Standard Cinch: the bid winner must declare trump before the
    /// first card is played.
    Declared,
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GameRules {
    #[serde(default)]
    pub trump_rule: TrumpRule,
}
