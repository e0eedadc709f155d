use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::events::GameEvent;
use crate::domain::state::{ClientId, Seat};
use crate::domain::view::SeatView;
use crate::error::AppError;

pub const PROTOCOL_VERSION: i32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    Hello { protocol: i32 },
    /// Claim a seat in a room. One seat per connection.
    Join { room: Uuid, seat: Seat },
    Bid { value: u8 },
    /// Card by its 1..=52 wire code.
    Play { card: u8 },
    /// Only meaningful under the declared-trump rule.
    DeclareTrump { suit: u8 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    HelloAck {
        protocol: i32,
        client_id: ClientId,
    },

    /// Join succeeded; `view` is the seat's full resume snapshot.
    Joined {
        room: Uuid,
        seat: Seat,
        view: SeatView,
    },

    /// One engine state delta.
    Event {
        event: GameEvent,
    },

    Error {
        code: ErrorCode,
        message: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadProtocol,
    BadRequest,
    NotJoined,
    AlreadyJoined,
    NotFound,
    Rejected,
    Internal,
}

impl ServerMsg {
    /// Map a service-layer failure onto the wire. Rejections keep the
    /// engine's stable code in the message so clients can branch on it.
    pub fn from_app_error(err: &AppError) -> ServerMsg {
        let code = match err {
            AppError::Validation { .. } => ErrorCode::Rejected,
            AppError::NotFound { .. } => ErrorCode::NotFound,
            AppError::Conflict { .. } => ErrorCode::Rejected,
            _ => ErrorCode::Internal,
        };
        ServerMsg::Error {
            code,
            message: err.to_string(),
        }
    }
}
