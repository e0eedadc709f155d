//! Room lifecycle HTTP surface: create, list, inspect, summarize.

use actix_web::{web, HttpResponse};
use uuid::Uuid;

use crate::services::RoomOptions;
use crate::state::app_state::AppState;
use crate::AppError;

async fn create_room(
    app_state: web::Data<AppState>,
    options: Option<web::Json<RoomOptions>>,
) -> Result<HttpResponse, AppError> {
    let options = options.map(|o| o.into_inner()).unwrap_or_default();
    let info = app_state.rooms.create(options)?;
    Ok(HttpResponse::Created().json(info))
}

async fn list_rooms(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.rooms.list()))
}

async fn room_info(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.rooms.info(path.into_inner())?))
}

/// Per-hand summaries folded from the room's action log; the shape the
/// persistence side stores and the UI renders as hand history.
async fn room_summary(
    app_state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok().json(app_state.rooms.summary(path.into_inner())?))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_room))
        .route("", web::get().to(list_rooms))
        .route("/{room_id}", web::get().to(room_info))
        .route("/{room_id}/summary", web::get().to(room_summary));
}
