use serde::Serialize;
use thiserror::Error;

// === ErrorKind ===

/// Coarse classification of a [`BoardError`], used by the transports to pick
/// a status code or RPC error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    InvalidColor,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::InvalidColor => "invalid_color",
            ErrorKind::Internal => "internal",
        }
    }
}

// === BoardError ===

/// Errors raised by section, link and ordering operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Section name was empty after trimming.
    #[error("Section name cannot be empty")]
    EmptyName,
    /// Another section already uses this name.
    #[error("Section name already exists: {0}")]
    DuplicateName(String),
    /// Color is not part of the palette.
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    /// Section with the given ID was not found.
    #[error("Section not found: {0}")]
    SectionNotFound(i64),
    /// Link with the given ID was not found.
    #[error("Link not found: {0}")]
    LinkNotFound(i64),
    /// Link title was empty after trimming.
    #[error("Title cannot be empty")]
    EmptyTitle,
    /// URL did not parse as an absolute URL.
    #[error("Invalid url: {0}")]
    InvalidUrl(String),
    /// The section already holds a link with this URL.
    #[error("Link url already exists in section: {0}")]
    DuplicateUrl(String),
    /// Request payload was unusable (e.g. an empty reorder list).
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Store operation failed.
    #[error("Database error: {0}")]
    Database(String),
    /// Anything else that is not the caller's fault.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::EmptyName
            | BoardError::EmptyTitle
            | BoardError::InvalidUrl(_)
            | BoardError::InvalidInput(_) => ErrorKind::InvalidInput,
            BoardError::SectionNotFound(_) | BoardError::LinkNotFound(_) => ErrorKind::NotFound,
            BoardError::DuplicateName(_) | BoardError::DuplicateUrl(_) => ErrorKind::Conflict,
            BoardError::InvalidColor(_) => ErrorKind::InvalidColor,
            BoardError::Database(_) | BoardError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl From<rusqlite::Error> for BoardError {
    fn from(err: rusqlite::Error) -> Self {
        BoardError::Database(err.to_string())
    }
}

/// Returns true when `err` is a UNIQUE constraint failure.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

// === SettingsError ===

/// Errors related to loading or saving configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File system I/O error.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// JSON (de)serialization error.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// A value could not be applied.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}
