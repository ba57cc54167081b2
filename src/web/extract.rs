//! Extractors that reject malformed requests with the board's error body
//! instead of axum's plain-text rejections.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts};

use crate::types::errors::BoardError;

/// JSON request body. Decoding failures become [`BoardError::InvalidInput`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(BoardError))]
pub struct AppJson<T>(pub T);

/// Path parameters. Parse failures become [`BoardError::InvalidInput`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(BoardError))]
pub struct AppPath<T>(pub T);

impl From<JsonRejection> for BoardError {
    fn from(rejection: JsonRejection) -> Self {
        BoardError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for BoardError {
    fn from(rejection: PathRejection) -> Self {
        BoardError::InvalidInput(rejection.body_text())
    }
}
