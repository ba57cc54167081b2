use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

use crate::types::errors::{BoardError, ErrorKind};

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::InvalidInput | ErrorKind::InvalidColor => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for BoardError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let message = self.to_string();
        if kind == ErrorKind::Internal {
            error!(error = %message, "request failed");
        } else {
            warn!(kind = kind.as_str(), error = %message, "request rejected");
        }
        (
            kind.status_code(),
            Json(serde_json::json!({ "error": message, "kind": kind })),
        )
            .into_response()
    }
}
