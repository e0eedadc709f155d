use actix_web::web;

pub mod health;
pub mod realtime;
pub mod rooms;

/// Configure application routes for tests and non-HttpServer contexts.
/// `main.rs` wires these the same way under the production server.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check routes: /health
    cfg.service(web::scope("/health").configure(health::configure_routes));

    // Room lifecycle routes: /api/rooms/**
    cfg.service(web::scope("/api/rooms").configure(rooms::configure_routes));

    // Realtime routes: /api/ws
    cfg.service(web::scope("/api/ws").configure(realtime::configure_routes));
}
