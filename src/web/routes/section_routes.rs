use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};

use crate::services::board_service::BoardServiceTrait;
use crate::types::errors::BoardError;
use crate::types::link::Link;
use crate::types::section::{Section, SectionView};
use crate::web::models::{
    Ack, CreateLinkRequest, CreateSectionRequest, ReorderRequest, ReorderResponse,
    UpdateSectionRequest,
};
use crate::web::extract::{AppJson, AppPath};
use crate::web::{blocking, AppState};

// --- Route Handlers ---

async fn list_sections_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Vec<SectionView>>, BoardError> {
    let sections = blocking(&app_state, |board| board.list_sections()).await?;
    Ok(Json(sections))
}

async fn get_section_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(section_id): AppPath<i64>,
) -> Result<Json<SectionView>, BoardError> {
    let section = blocking(&app_state, move |board| board.get_section(section_id)).await?;
    Ok(Json(section))
}

async fn create_section_handler(
    State(app_state): State<Arc<AppState>>,
    AppJson(payload): AppJson<CreateSectionRequest>,
) -> Result<(StatusCode, Json<Section>), BoardError> {
    let section = blocking(&app_state, move |board| {
        board.create_section(&payload.name, payload.color.as_deref())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(section)))
}

async fn update_section_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(section_id): AppPath<i64>,
    AppJson(payload): AppJson<UpdateSectionRequest>,
) -> Result<Json<Ack>, BoardError> {
    blocking(&app_state, move |board| {
        board.update_section(section_id, payload.name.as_deref(), payload.color.as_deref())
    })
    .await?;
    Ok(Json(Ack::ok()))
}

async fn delete_section_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(section_id): AppPath<i64>,
) -> Result<Json<Ack>, BoardError> {
    blocking(&app_state, move |board| board.delete_section(section_id)).await?;
    Ok(Json(Ack::ok()))
}

async fn reorder_sections_handler(
    State(app_state): State<Arc<AppState>>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<Json<ReorderResponse>, BoardError> {
    let count = blocking(&app_state, move |board| {
        board.reorder_sections(&payload.ordered_ids)
    })
    .await?;
    Ok(Json(ReorderResponse { ok: true, count }))
}

async fn add_link_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(section_id): AppPath<i64>,
    AppJson(payload): AppJson<CreateLinkRequest>,
) -> Result<(StatusCode, Json<Link>), BoardError> {
    let link = blocking(&app_state, move |board| {
        board.add_link(section_id, &payload.title, &payload.url, payload.notes.as_deref())
    })
    .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn reorder_links_handler(
    State(app_state): State<Arc<AppState>>,
    AppPath(section_id): AppPath<i64>,
    AppJson(payload): AppJson<ReorderRequest>,
) -> Result<Json<ReorderResponse>, BoardError> {
    let count = blocking(&app_state, move |board| {
        board.reorder_links(section_id, &payload.ordered_ids)
    })
    .await?;
    Ok(Json(ReorderResponse { ok: true, count }))
}

// --- Router ---

pub fn create_sections_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sections", get(list_sections_handler).post(create_section_handler))
        .route("/sections/reorder", put(reorder_sections_handler))
        .route(
            "/sections/{section_id}",
            get(get_section_handler)
                .put(update_section_handler)
                .delete(delete_section_handler),
        )
        .route("/sections/{section_id}/links", post(add_link_handler))
        .route("/sections/{section_id}/links/reorder", put(reorder_links_handler))
}
