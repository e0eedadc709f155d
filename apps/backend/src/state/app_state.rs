use std::sync::Arc;

use crate::services::RoomRegistry;
use crate::ws::hub::WsRegistry;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// All live game rooms.
    pub rooms: Arc<RoomRegistry>,
    /// WebSocket fan-out registry.
    pub ws: Arc<WsRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            rooms: Arc::new(RoomRegistry::new()),
            ws: Arc::new(WsRegistry::new()),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
