//! Service layer: room lifecycle and per-room action serialization.

pub mod rooms;

pub use rooms::{RoomInfo, RoomOptions, RoomRegistry};
