//! App Core for Linkboard.
//!
//! Central struct holding the loaded settings and the board service,
//! shared by both transports.

use std::sync::Arc;

use crate::database::connection::Database;
use crate::services::board_service::BoardService;
use crate::types::settings::BoardSettings;

/// Central application struct.
pub struct App {
    pub settings: BoardSettings,
    pub board: Arc<BoardService>,
}

impl App {
    /// Opens the configured database and builds the board service on top of it.
    pub fn new(settings: BoardSettings) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let db = Database::open(&settings.database_path)?;
        Self::with_database(Arc::new(db), settings)
    }

    /// Builds the app around an already opened database.
    pub fn with_database(
        db: Arc<Database>,
        settings: BoardSettings,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let board = BoardService::new(db, settings.board_options())
            .map_err(|e| format!("BoardService init failed: {}", e))?;

        Ok(Self {
            settings,
            board: Arc::new(board),
        })
    }
}
