use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::bidding::Bid;
use crate::domain::cards::{Card, Suit};
use crate::domain::state::Seat;
use crate::state::app_state::AppState;
use crate::ws::hub::Outbound;
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg, PROTOCOL_VERSION};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let session = WsSession::new(app_state);
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    /// Opaque identity handed to the engine at join time.
    client_id: Uuid,
    app_state: web::Data<AppState>,
    /// Set after a successful join; every action uses this binding.
    seat_binding: Option<(Uuid, Seat)>,
    last_heartbeat: Instant,
    hello_done: bool,
}

impl WsSession {
    fn new(app_state: web::Data<AppState>) -> Self {
        Self {
            conn_id: Uuid::new_v4(),
            client_id: Uuid::new_v4(),
            app_state,
            seat_binding: None,
            last_heartbeat: Instant::now(),
            hello_done: false,
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "[WS SESSION] failed to serialize outbound message"),
        }
    }

    fn send_error(
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_json(
            ctx,
            &ServerMsg::Error {
                code,
                message: message.into(),
            },
        );
    }

    fn send_error_and_close(
        &self,
        ctx: &mut ws::WebsocketContext<Self>,
        code: ErrorCode,
        message: impl Into<String>,
    ) {
        Self::send_error(ctx, code, message);
        ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
        ctx.stop();
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "[WS SESSION] heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }

    fn handle_join(&mut self, ctx: &mut ws::WebsocketContext<Self>, room: Uuid, seat: Seat) {
        if self.seat_binding.is_some() {
            Self::send_error(ctx, ErrorCode::AlreadyJoined, "already seated in a room");
            return;
        }
        match self.app_state.rooms.join(room, seat, self.client_id) {
            Ok((view, events)) => {
                self.seat_binding = Some((room, seat));
                self.app_state.ws.subscribe(
                    room,
                    self.conn_id,
                    seat,
                    ctx.address().recipient::<Outbound>(),
                );
                Self::send_json(ctx, &ServerMsg::Joined { room, seat, view });
                self.app_state.ws.broadcast(room, &events);
            }
            Err(err) => Self::send_json(ctx, &ServerMsg::from_app_error(&err)),
        }
    }

    /// Run one seat action against the room and fan out whatever state
    /// deltas it produced. Rejections go back on this socket only.
    fn handle_action(
        &mut self,
        ctx: &mut ws::WebsocketContext<Self>,
        act: impl FnOnce(
            &crate::services::RoomRegistry,
            Uuid,
            Seat,
        ) -> Result<Vec<crate::domain::events::GameEvent>, crate::error::AppError>,
    ) {
        let Some((room, seat)) = self.seat_binding else {
            Self::send_error(ctx, ErrorCode::NotJoined, "join a room first");
            return;
        };
        match act(&self.app_state.rooms, room, seat) {
            Ok(events) => self.app_state.ws.broadcast(room, &events),
            Err(err) => Self::send_json(ctx, &ServerMsg::from_app_error(&err)),
        }
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "[WS SESSION] started");
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        if let Some((room, _)) = self.seat_binding {
            self.app_state.ws.unsubscribe(room, self.conn_id);
        }
        info!(conn_id = %self.conn_id, "[WS SESSION] stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();

                let parsed: Result<ClientMsg, _> = serde_json::from_str(&text);
                let Ok(cmd) = parsed else {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Malformed JSON");
                    return;
                };

                if !self.hello_done && !matches!(cmd, ClientMsg::Hello { .. }) {
                    self.send_error_and_close(ctx, ErrorCode::BadRequest, "Must send hello first");
                    return;
                }

                match cmd {
                    ClientMsg::Hello { protocol } => {
                        if protocol != PROTOCOL_VERSION {
                            self.send_error_and_close(
                                ctx,
                                ErrorCode::BadProtocol,
                                "Unsupported protocol version",
                            );
                            return;
                        }
                        self.hello_done = true;
                        Self::send_json(
                            ctx,
                            &ServerMsg::HelloAck {
                                protocol: PROTOCOL_VERSION,
                                client_id: self.client_id,
                            },
                        );
                    }

                    ClientMsg::Join { room, seat } => self.handle_join(ctx, room, seat),

                    ClientMsg::Bid { value } => {
                        self.handle_action(ctx, |rooms, room, seat| {
                            rooms.submit_bid(room, seat, Bid(value))
                        });
                    }

                    ClientMsg::Play { card } => {
                        let card = match Card::from_code(card) {
                            Ok(card) => card,
                            Err(err) => {
                                Self::send_error(ctx, ErrorCode::Rejected, err.to_string());
                                return;
                            }
                        };
                        self.handle_action(ctx, |rooms, room, seat| {
                            rooms.submit_play(room, seat, card)
                        });
                    }

                    ClientMsg::DeclareTrump { suit } => {
                        let Some(suit) = Suit::from_index(suit) else {
                            Self::send_error(ctx, ErrorCode::BadRequest, "suit index out of range");
                            return;
                        };
                        self.handle_action(ctx, |rooms, room, seat| {
                            rooms.declare_trump(room, seat, suit)
                        });
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                self.send_error_and_close(ctx, ErrorCode::BadRequest, "Binary not supported");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "[WS SESSION] protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Outbound> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Outbound, ctx: &mut Self::Context) -> Self::Result {
        ctx.text(msg.payload);
    }
}
