//! HTTP transport for Linkboard.
//!
//! Axum router over the board service. Store work is synchronous, so each
//! handler hands it to the blocking pool.

use std::path::Path;
use std::sync::Arc;

use axum::{http::Method, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::services::board_service::BoardService;
use crate::types::errors::BoardError;

pub mod error;
pub mod extract;
pub mod models;
pub mod routes;

#[derive(Clone)]
pub struct AppState {
    pub board: Arc<BoardService>,
}

/// Runs `f` against the board service on the blocking thread pool.
pub(crate) async fn blocking<T, F>(state: &AppState, f: F) -> Result<T, BoardError>
where
    F: FnOnce(&BoardService) -> Result<T, BoardError> + Send + 'static,
    T: Send + 'static,
{
    let board = state.board.clone();
    tokio::task::spawn_blocking(move || f(&board))
        .await
        .map_err(|e| BoardError::Internal(format!("blocking task failed: {}", e)))?
}

async fn health_check_handler() -> &'static str {
    "OK"
}

/// Builds the full router. When `static_dir` is given, unmatched paths are
/// served from it (the frontend).
pub fn create_router(board: Arc<BoardService>, static_dir: Option<&Path>) -> Router {
    let app_state = Arc::new(AppState { board });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(vec![Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    let router = Router::new()
        .route("/health", get(health_check_handler))
        .merge(routes::section_routes::create_sections_router())
        .merge(routes::link_routes::create_links_router())
        .with_state(app_state);

    let router = match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).layer(cors)
}
