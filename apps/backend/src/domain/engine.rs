//! The engine facade: owns a `GameState`, validates every action, and
//! emits the state-delta events the router broadcasts.
//!
//! Every entry point re-validates phase, turn, and hand legality; the
//! seat-to-identity binding is the router's problem. Rejections never
//! mutate; corruption errors abort the game rather than guess.

use crate::domain::bidding::{self, Bid};
use crate::domain::cards::{Card, Suit};
use crate::domain::deck::Deck;
use crate::domain::events::GameEvent;
use crate::domain::history::{HandRecord, LogAction};
use crate::domain::rules::{GameRules, TrumpRule, MAX_HANDS, PLAYERS, WINNING_SCORE};
use crate::domain::scoring::{self, ScoredHand};
use crate::domain::state::{hand_start_seat, next_seat, ClientId, GameState, Phase, Seat, Team};
use crate::domain::tricks;
use crate::domain::view::SeatView;
use crate::errors::domain::DomainError;

pub struct GameEngine {
    state: GameState,
    /// Base seed for dealing; each hand derives its own offset so full
    /// games replay deterministically. `None` uses OS entropy.
    deck_seed: Option<u64>,
}

impl GameEngine {
    pub fn new(rules: GameRules) -> Self {
        Self::with_seed(rules, None)
    }

    pub fn with_seed(rules: GameRules, deck_seed: Option<u64>) -> Self {
        Self {
            state: GameState::new(rules),
            deck_seed,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == Phase::Postgame
    }

    /// Seat a client. The 4th join starts the game: first deal, bidding
    /// opens left of the dealer.
    pub fn join(&mut self, seat: Seat, client: ClientId) -> Result<Vec<GameEvent>, DomainError> {
        if self.state.phase != Phase::Pregame {
            return Err(DomainError::room_full("the game has already started"));
        }
        if seat as usize >= PLAYERS {
            return Err(DomainError::invalid_seat(format!(
                "seat {seat} does not exist"
            )));
        }
        if self.state.seats[seat as usize].is_some() {
            return Err(DomainError::invalid_seat(format!(
                "seat {seat} is already taken"
            )));
        }
        self.state.seats[seat as usize] = Some(client);
        let mut events = vec![GameEvent::SeatJoined { seat }];

        if self.state.occupied_seats() == PLAYERS {
            self.state.hand_no = 1;
            self.state.dealer = 0;
            self.start_hand(&mut events)?;
        }
        Ok(events)
    }

    /// Validate and apply one bid.
    pub fn submit_bid(&mut self, seat: Seat, bid: Bid) -> Result<Vec<GameEvent>, DomainError> {
        let trick = self.state.trick;
        let outcome = bidding::place_bid(&mut self.state, seat, bid)?;
        let mut events = vec![GameEvent::Bid {
            actor: seat,
            trick,
            value: bid,
            active_player: self.state.active_player,
        }];
        if let Some(resolution) = outcome.resolution {
            events.push(GameEvent::BidWon {
                declarer: resolution.declarer,
                high_bid: resolution.high_bid,
                active_player: self.state.active_player,
            });
        }
        Ok(events)
    }

    /// Under the declared-trump rule, the bid winner names trump before
    /// the first card of the hand.
    pub fn declare_trump(
        &mut self,
        seat: Seat,
        suit: Suit,
    ) -> Result<Vec<GameEvent>, DomainError> {
        if self.state.rules.trump_rule != TrumpRule::Declared {
            return Err(DomainError::illegal_play(
                "trump is fixed by the first card led, not declared",
            ));
        }
        if self.state.phase != Phase::Play {
            return Err(DomainError::illegal_play("not in the play phase"));
        }
        if self.state.current_hand.trump.is_some() {
            return Err(DomainError::illegal_play("trump is already set"));
        }
        if self.state.current_hand.declarer != Some(seat) {
            return Err(DomainError::illegal_play(
                "only the bid winner declares trump",
            ));
        }
        self.state.current_hand.trump = Some(suit);
        self.state.log.record(
            self.state.hand_no,
            self.state.trick,
            seat,
            LogAction::DeclareTrump { suit },
        );
        Ok(vec![GameEvent::TrumpSet { suit, by: seat }])
    }

    /// Validate and apply one card play, cascading through trick
    /// resolution, hand scoring, and hand/game rollover as they trigger.
    pub fn submit_play(&mut self, seat: Seat, card: Card) -> Result<Vec<GameEvent>, DomainError> {
        let trick = self.state.trick;
        let outcome = tricks::play_card(&mut self.state, seat, card)?;

        let mut events = vec![GameEvent::Play {
            actor: seat,
            trick,
            card,
            active_player: self.state.active_player,
        }];
        if let Some(suit) = outcome.trump_set {
            events.push(GameEvent::TrumpSet { suit, by: seat });
        }
        let Some(result) = outcome.completed else {
            return Ok(events);
        };
        events.push(GameEvent::TrickWon {
            trick: result.trick_no,
            winner: result.winner,
        });
        if result.hand_complete {
            self.finish_hand(&mut events)?;
        }
        Ok(events)
    }

    /// Score the completed hand, then end the game or roll into the next
    /// hand.
    fn finish_hand(&mut self, events: &mut Vec<GameEvent>) -> Result<(), DomainError> {
        let outcome = scoring::score_hand(&self.state.current_hand, self.state.scores)?;
        for team in Team::ALL {
            self.state.scores[team.index()] += outcome.net[team.index()];
        }
        events.push(GameEvent::HandScored {
            outcome: outcome.clone(),
            scores: self.state.scores,
        });

        let record = std::mem::replace(&mut self.state.current_hand, HandRecord::new(0, 0));
        let declarer = outcome.declarer;
        self.state.completed_hands.push(ScoredHand { record, outcome });

        // The bidding team claims victory first when both sides are over
        // the line after the same hand.
        let bidders = Team::of(declarer);
        let winner = [bidders, bidders.other()]
            .into_iter()
            .find(|team| self.state.score_of(*team) >= WINNING_SCORE);

        if winner.is_some() || self.state.hand_no >= MAX_HANDS {
            self.state.phase = Phase::Postgame;
            self.state.winner = winner;
            events.push(GameEvent::GameOver {
                winner,
                scores: self.state.scores,
            });
            return Ok(());
        }

        self.state.hand_no += 1;
        self.state.dealer = next_seat(self.state.dealer);
        self.start_hand(events)
    }

    /// Deal a fresh hand and open bidding left of the dealer.
    fn start_hand(&mut self, events: &mut Vec<GameEvent>) -> Result<(), DomainError> {
        let seed = self.deck_seed.map(|s| s.wrapping_add(u64::from(self.state.hand_no)));
        let mut deck = Deck::shuffled(seed);
        self.state.hands = deck.deal_hands()?;
        self.state.current_hand = HandRecord::new(self.state.hand_no, self.state.dealer);
        self.state.phase = Phase::Bid;
        self.state.active_player = hand_start_seat(self.state.dealer);

        events.push(GameEvent::HandStarted {
            hand_no: self.state.hand_no,
            dealer: self.state.dealer,
            active_player: self.state.active_player,
        });
        for seat in 0..PLAYERS as Seat {
            events.push(GameEvent::HandDealt {
                seat,
                hand_no: self.state.hand_no,
                cards: self.state.hands[seat as usize].clone(),
            });
        }
        Ok(())
    }

    /// Snapshot of the game from one seat's perspective.
    pub fn seat_view(&self, seat: Seat) -> SeatView {
        let state = &self.state;
        SeatView {
            seat,
            phase: state.phase,
            hand_no: state.hand_no,
            trick: state.trick,
            dealer: state.dealer,
            active_player: state.active_player,
            hand: state
                .hands
                .get(seat as usize)
                .cloned()
                .unwrap_or_default(),
            bids: state.current_hand.bids,
            high_bid: state.current_hand.high_bid(),
            declarer: state.current_hand.declarer,
            trump: state.current_hand.trump,
            cards_in_play: state.current_hand.cards_in_play().to_vec(),
            scores: state.scores,
            trump_rule: state.rules.trump_rule,
        }
    }
}
