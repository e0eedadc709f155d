use actix::prelude::*;
use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use crate::domain::events::{GameEvent, Scope};
use crate::domain::state::Seat;
use crate::ws::protocol::ServerMsg;

/// A serialized server message pushed to one session.
#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Outbound {
    pub payload: String,
}

struct Subscriber {
    seat: Seat,
    recipient: Recipient<Outbound>,
}

/// In-process fan-out registry: room id -> connection id -> subscriber.
/// Seat-scoped events (dealt hands) go only to their seat's sessions.
#[derive(Default)]
pub struct WsRegistry {
    rooms: DashMap<Uuid, DashMap<Uuid, Subscriber>>,
}

impl WsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, room: Uuid, conn: Uuid, seat: Seat, recipient: Recipient<Outbound>) {
        let entry = self.rooms.entry(room).or_default();
        entry.insert(conn, Subscriber { seat, recipient });
    }

    pub fn unsubscribe(&self, room: Uuid, conn: Uuid) {
        if let Some(entry) = self.rooms.get(&room) {
            entry.remove(&conn);
            if entry.is_empty() {
                drop(entry);
                self.rooms.remove_if(&room, |_, conns| conns.is_empty());
            }
        }
    }

    /// Fan a batch of engine events out to a room's sessions, in order.
    pub fn broadcast(&self, room: Uuid, events: &[GameEvent]) {
        let Some(entry) = self.rooms.get(&room) else {
            return;
        };
        for event in events {
            let scope = event.scope();
            let msg = ServerMsg::Event {
                event: event.clone(),
            };
            let payload = match serde_json::to_string(&msg) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!(error = %err, "failed to serialize broadcast event");
                    continue;
                }
            };
            for subscriber in entry.iter() {
                let deliver = match scope {
                    Scope::Broadcast => true,
                    Scope::Seat(seat) => subscriber.value().seat == seat,
                };
                if deliver {
                    let _ = subscriber.value().recipient.do_send(Outbound {
                        payload: payload.clone(),
                    });
                }
            }
        }
    }
}
