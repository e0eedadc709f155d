//! Hand scoring: the four category points and the bid adjustment.

use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Rank};
use crate::domain::history::HandRecord;
use crate::domain::rules::{HAND_SIZE, NUM_TEAMS, WINNING_SCORE};
use crate::domain::state::{Seat, Team};
use crate::errors::domain::DomainError;

/// Who took each of the four contested points, plus the raw game-point
/// totals behind the Game category.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct CategoryPoints {
    /// Team that captured the highest trump played; `None` only if no
    /// trump was ever played (cannot happen under the first-lead rule).
    pub high: Option<Team>,
    /// Team that captured the lowest trump played.
    pub low: Option<Team>,
    /// Team that won the trick containing the trump Jack, if it was out.
    pub jack: Option<Team>,
    /// Team with the greater game-point total; an exact tie awards no one.
    pub game: Option<Team>,
    pub game_points: [i16; NUM_TEAMS],
}

impl CategoryPoints {
    /// Category points won by `team` this hand, 0..=4.
    pub fn count_for(&self, team: Team) -> i16 {
        [self.high, self.low, self.jack, self.game]
            .into_iter()
            .filter(|holder| *holder == Some(team))
            .count() as i16
    }
}

/// A fully scored hand: categories, bid adjustment, and net deltas.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct HandOutcome {
    pub hand_no: u32,
    pub declarer: Seat,
    pub high_bid: Bid,
    pub categories: CategoryPoints,
    /// Per-team score change applied to the cumulative scores.
    pub net: [i16; NUM_TEAMS],
    /// The bidding team failed its bid and took the set penalty.
    pub set: bool,
    /// A made cinch from a cumulative score of 0 ended the game outright.
    pub auto_win: bool,
}

/// Record + outcome pair kept for each finished hand.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredHand {
    pub record: HandRecord,
    pub outcome: HandOutcome,
}

/// Tally the four category points over a hand's nine resolved tricks.
pub fn category_points(hand: &HandRecord) -> Result<CategoryPoints, DomainError> {
    let trump = hand
        .trump
        .ok_or_else(|| DomainError::corruption("scoring a hand with no trump"))?;
    if hand.completed_trick_count() != HAND_SIZE {
        return Err(DomainError::corruption(format!(
            "scoring a hand with {} completed tricks",
            hand.completed_trick_count()
        )));
    }

    let mut high: Option<(Card, Team)> = None;
    let mut low: Option<(Card, Team)> = None;
    let mut jack = None;
    let mut game_points = [0i16; NUM_TEAMS];

    for trick in &hand.tricks {
        let winner = trick
            .winner
            .ok_or_else(|| DomainError::corruption("scoring an unresolved trick"))?;
        let captors = Team::of(winner);
        for &(_, card) in &trick.plays {
            game_points[captors.index()] += card.rank.game_points();
            if card.suit != trump {
                continue;
            }
            if high.is_none_or(|(c, _)| card.rank > c.rank) {
                high = Some((card, captors));
            }
            if low.is_none_or(|(c, _)| card.rank < c.rank) {
                low = Some((card, captors));
            }
            if card.rank == Rank::Jack {
                jack = Some(captors);
            }
        }
    }

    let game = match game_points[0].cmp(&game_points[1]) {
        std::cmp::Ordering::Greater => Some(Team::Even),
        std::cmp::Ordering::Less => Some(Team::Odd),
        std::cmp::Ordering::Equal => None,
    };

    Ok(CategoryPoints {
        high: high.map(|(_, t)| t),
        low: low.map(|(_, t)| t),
        jack,
        game,
        game_points,
    })
}

/// Score a completed hand against the bid. `scores_before` are the
/// cumulative team scores entering the hand; the cinch auto-win rule
/// depends on them.
pub fn score_hand(
    hand: &HandRecord,
    scores_before: [i16; NUM_TEAMS],
) -> Result<HandOutcome, DomainError> {
    let declarer = hand
        .declarer
        .ok_or_else(|| DomainError::corruption("scoring a hand with no declarer"))?;
    let high_bid = Bid(hand.high_bid());
    if high_bid.is_pass() {
        return Err(DomainError::corruption("scoring a hand with no live bid"));
    }

    let categories = category_points(hand)?;
    let bidders = Team::of(declarer);
    let defenders = bidders.other();

    let made = categories.count_for(bidders);
    let mut net = [0i16; NUM_TEAMS];
    net[defenders.index()] = categories.count_for(defenders);

    // A cinch is made by sweeping all four category points; failing one
    // sets the team for 10, not the nominal bid of 5.
    let (target, penalty) = if high_bid == Bid::CINCH {
        (4, 10)
    } else {
        (i16::from(high_bid.value()), i16::from(high_bid.value()))
    };

    let mut set = false;
    let mut auto_win = false;
    if made < target {
        set = true;
        net[bidders.index()] = -penalty;
    } else if high_bid == Bid::CINCH {
        if scores_before[bidders.index()] == 0 {
            auto_win = true;
            net[bidders.index()] = WINNING_SCORE - scores_before[bidders.index()];
        } else {
            net[bidders.index()] = made + 10;
        }
    } else {
        net[bidders.index()] = made;
    }

    Ok(HandOutcome {
        hand_no: hand.hand_no,
        declarer,
        high_bid,
        categories,
        net,
        set,
        auto_win,
    })
}
