//! Linkboard database layer.
//!
//! Provides SQLite connection management and schema migrations.
//!
//! # Usage
//!
//! ```no_run
//! use linkboard::database::Database;
//!
//! let db = Database::open("linkboard.db").expect("failed to open database");
//!
//! let count: i64 = db
//!     .transaction(|tx| tx.query_row("SELECT COUNT(*) FROM sections", [], |row| row.get(0)))
//!     .expect("query failed");
//! ```

pub mod connection;
pub mod migrations;

pub use connection::Database;
