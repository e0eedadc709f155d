//! Room registry and the per-room action entry points.
//!
//! Every room's engine sits behind one mutex: all mutation for a game is
//! serialized, and separate rooms are fully independent. After any
//! accepted action the room drives AI-held seats through the same
//! validated engine entry points a human would use.

use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::ai::registry as strategies;
use crate::ai::Strategy;
use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Suit};
use crate::domain::engine::GameEngine;
use crate::domain::events::GameEvent;
use crate::domain::history::{self, HandSummary};
use crate::domain::rules::{GameRules, NUM_TEAMS, PLAYERS};
use crate::domain::state::{ClientId, Phase, Seat};
use crate::domain::view::SeatView;
use crate::error::AppError;
use crate::errors::domain::DomainError;

/// Hard cap on consecutive AI actions in one drive loop. A full game is
/// bounded well below this; hitting it means a strategy/engine bug.
const AI_ACTION_LIMIT: usize = 1024;

#[derive(Debug, Clone, Deserialize)]
pub struct AiSeat {
    pub seat: Seat,
    pub strategy: String,
}

/// Room creation parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoomOptions {
    #[serde(default)]
    pub rules: GameRules,
    /// Deal seed for reproducible games (tests, replays).
    #[serde(default)]
    pub seed: Option<u64>,
    /// Seats to fill with AI at creation time.
    #[serde(default)]
    pub ai: Vec<AiSeat>,
}

/// Public summary of a room for the lobby.
#[derive(Debug, Clone, Serialize)]
pub struct RoomInfo {
    pub id: Uuid,
    pub phase: Phase,
    pub seats_taken: [bool; PLAYERS],
    pub hand_no: u32,
    pub scores: [i16; NUM_TEAMS],
}

struct Room {
    id: Uuid,
    engine: GameEngine,
    strategies: [Option<Box<dyn Strategy>>; PLAYERS],
    /// Set after a corruption error; the room refuses further actions.
    aborted: bool,
}

impl Room {
    fn new(id: Uuid, rules: GameRules, seed: Option<u64>) -> Self {
        Self {
            id,
            engine: GameEngine::with_seed(rules, seed),
            strategies: Default::default(),
            aborted: false,
        }
    }

    fn info(&self) -> RoomInfo {
        let state = self.engine.state();
        let mut seats_taken = [false; PLAYERS];
        for (i, seat) in state.seats.iter().enumerate() {
            seats_taken[i] = seat.is_some();
        }
        RoomInfo {
            id: self.id,
            phase: state.phase,
            seats_taken,
            hand_no: state.hand_no,
            scores: state.scores,
        }
    }

    fn ensure_live(&self) -> Result<(), AppError> {
        if self.aborted {
            return Err(AppError::GameAborted {
                detail: "this game was aborted after an invariant failure".into(),
            });
        }
        Ok(())
    }

    /// Run an engine mutation, translating corruption into a room abort.
    fn apply<T>(
        &mut self,
        op: impl FnOnce(&mut GameEngine) -> Result<T, DomainError>,
    ) -> Result<T, AppError> {
        match op(&mut self.engine) {
            Ok(value) => Ok(value),
            Err(err @ DomainError::Validation(..)) => Err(err.into()),
            Err(err @ DomainError::Corruption(..)) => {
                warn!(room_id = %self.id, error = %err, "aborting room after invariant failure");
                self.aborted = true;
                Err(err.into())
            }
        }
    }

    /// While the active seat is AI-held and the game is running, ask the
    /// strategy for a decision and apply it. An illegal AI decision is a
    /// bug surfaced as an internal error, never silently retried.
    fn drive_ai(&mut self, events: &mut Vec<GameEvent>) -> Result<(), AppError> {
        for _ in 0..AI_ACTION_LIMIT {
            let phase = self.engine.state().phase;
            if phase != Phase::Bid && phase != Phase::Play {
                return Ok(());
            }
            let seat = self.engine.state().active_player;
            let Some(strategy) = self.strategies[seat as usize].as_ref() else {
                return Ok(());
            };
            let view = self.engine.seat_view(seat);

            if view.must_declare_trump() {
                let suit = strategy.choose_trump(&view)?;
                events.extend(self.apply(|engine| engine.declare_trump(seat, suit))?);
                continue;
            }
            match phase {
                Phase::Bid => {
                    let bid = strategy.choose_bid(&view)?;
                    debug!(room_id = %self.id, seat, bid = %bid, "AI bidding");
                    events.extend(self.apply(|engine| engine.submit_bid(seat, bid))?);
                }
                Phase::Play => {
                    let card = strategy.choose_play(&view)?;
                    debug!(room_id = %self.id, seat, card = %card, "AI playing");
                    events.extend(self.apply(|engine| engine.submit_play(seat, card))?);
                }
                _ => return Ok(()),
            }
        }
        self.aborted = true;
        Err(AppError::GameAborted {
            detail: "AI drive loop exceeded the action limit".into(),
        })
    }
}

/// All live rooms. Cross-room operations run in parallel; a single
/// room's operations serialize on its mutex.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<Uuid, Arc<Mutex<Room>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a room, seat any requested AI players, and let them play.
    /// A room created with four AI seats runs to completion here.
    pub fn create(&self, options: RoomOptions) -> Result<RoomInfo, AppError> {
        let id = Uuid::new_v4();
        let mut room = Room::new(id, options.rules, options.seed);

        let mut events = Vec::new();
        for ai in &options.ai {
            let factory = strategies::by_name(&ai.strategy).ok_or_else(|| {
                AppError::invalid(
                    "UNKNOWN_STRATEGY",
                    format!("no strategy named '{}'", ai.strategy),
                )
            })?;
            if ai.seat as usize >= PLAYERS {
                return Err(AppError::invalid(
                    "INVALID_SEAT",
                    format!("seat {} does not exist", ai.seat),
                ));
            }
            room.strategies[ai.seat as usize] = Some((factory.make)(options.seed));
            events.extend(room.apply(|engine| engine.join(ai.seat, Uuid::new_v4()))?);
        }
        room.drive_ai(&mut events)?;

        let info = room.info();
        info!(room_id = %id, ai_seats = options.ai.len(), "room created");
        self.rooms.insert(id, Arc::new(Mutex::new(room)));
        Ok(info)
    }

    pub fn list(&self) -> Vec<RoomInfo> {
        self.rooms.iter().map(|r| r.value().lock().info()).collect()
    }

    pub fn info(&self, id: Uuid) -> Result<RoomInfo, AppError> {
        Ok(self.require(id)?.lock().info())
    }

    /// Per-hand summaries folded from the room's action log.
    pub fn summary(&self, id: Uuid) -> Result<Vec<HandSummary>, AppError> {
        let room = self.require(id)?;
        let room = room.lock();
        Ok(history::summarize(&room.engine.state().log)?)
    }

    /// Seat a client; returns the joiner's view and the events to
    /// broadcast.
    pub fn join(
        &self,
        id: Uuid,
        seat: Seat,
        client: ClientId,
    ) -> Result<(SeatView, Vec<GameEvent>), AppError> {
        let room = self.require(id)?;
        let mut room = room.lock();
        room.ensure_live()?;
        let mut events = room.apply(|engine| engine.join(seat, client))?;
        room.drive_ai(&mut events)?;
        Ok((room.engine.seat_view(seat), events))
    }

    pub fn submit_bid(&self, id: Uuid, seat: Seat, bid: Bid) -> Result<Vec<GameEvent>, AppError> {
        self.act(id, |room| {
            let mut events = room.apply(|engine| engine.submit_bid(seat, bid))?;
            room.drive_ai(&mut events)?;
            Ok(events)
        })
    }

    pub fn submit_play(&self, id: Uuid, seat: Seat, card: Card) -> Result<Vec<GameEvent>, AppError> {
        self.act(id, |room| {
            let mut events = room.apply(|engine| engine.submit_play(seat, card))?;
            room.drive_ai(&mut events)?;
            Ok(events)
        })
    }

    pub fn declare_trump(
        &self,
        id: Uuid,
        seat: Seat,
        suit: Suit,
    ) -> Result<Vec<GameEvent>, AppError> {
        self.act(id, |room| {
            let mut events = room.apply(|engine| engine.declare_trump(seat, suit))?;
            room.drive_ai(&mut events)?;
            Ok(events)
        })
    }

    /// A seat's current view, for resync after reconnect-free refreshes.
    pub fn seat_view(&self, id: Uuid, seat: Seat) -> Result<SeatView, AppError> {
        let room = self.require(id)?;
        let room = room.lock();
        Ok(room.engine.seat_view(seat))
    }

    fn act(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut Room) -> Result<Vec<GameEvent>, AppError>,
    ) -> Result<Vec<GameEvent>, AppError> {
        let room = self.require(id)?;
        let mut room = room.lock();
        room.ensure_live()?;
        f(&mut room)
    }

    fn require(&self, id: Uuid) -> Result<Arc<Mutex<Room>>, AppError> {
        self.rooms
            .get(&id)
            .map(|r| r.value().clone())
            .ok_or_else(|| AppError::not_found("ROOM_NOT_FOUND", format!("no room {id}")))
    }
}
