use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};

use crate::services::board_service::BoardServiceTrait;
use crate::types::errors::BoardError;
use crate::types::link::Link;
use crate::web::models::{Ack, UpdateLinkRequest};
use crate::web::extract::{AppJson, AppPath};
use crate::web::{blocking, AppState};

async fn get_link_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(link_id): AppPath<i64>,
) -> Result<Json<Link>, BoardError> {
    let link = blocking(&app_state, move |board| board.get_link(link_id)).await?;
    Ok(Json(link))
}

async fn update_link_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(link_id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateLinkRequest>,
) -> Result<Json<Ack>, BoardError> {
    blocking(&app_state, move |board| {
        board.update_link(
            link_id,
            payload.title.as_deref(),
            payload.url.as_deref(),
            payload.notes.as_deref(),
        )
    })
    .await?;
    Ok(Json(Ack::ok()))
}

async fn delete_link_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(link_id): AppPath<i64>,
) -> Result<Json<Ack>, BoardError> {
    blocking(&app_state, move |board| board.delete_link(link_id)).await?;
    Ok(Json(Ack::ok()))
}

pub fn create_links_router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/links/{link_id}",
        get(get_link_handler)
            .put(update_link_handler)
            .delete(delete_link_handler),
    )
}
