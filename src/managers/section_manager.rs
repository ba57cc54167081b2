//! Section Manager for Linkboard.
//!
//! Implements `SectionManagerTrait`: row-level reads and writes on the
//! `sections` table. Business rules live in the board service; this layer
//! only translates store failures.

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};

use crate::services::ordering_engine::SECTION_ORDER;
use crate::types::errors::{is_unique_violation, BoardError};
use crate::types::section::{Section, SectionColor};

/// Trait defining section storage operations.
pub trait SectionManagerTrait {
    fn insert_section(&mut self, name: &str, color: SectionColor, sort_order: i64) -> Result<Section, BoardError>;
    fn get_section(&self, id: i64) -> Result<Option<Section>, BoardError>;
    /// True if another section (other than `exclude`) already uses `name`.
    fn name_taken(&self, name: &str, exclude: Option<i64>) -> Result<bool, BoardError>;
    fn update_section(&mut self, id: i64, name: Option<&str>, color: Option<SectionColor>) -> Result<(), BoardError>;
    fn delete_section(&mut self, id: i64) -> Result<(), BoardError>;
    /// All sections in display order.
    fn list_sections(&self) -> Result<Vec<Section>, BoardError>;
}

/// Section manager backed by a SQLite connection.
pub struct SectionManager<'a> {
    conn: &'a Connection,
}

impl<'a> SectionManager<'a> {
    /// Creates a new `SectionManager` using the provided connection or transaction.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns the current UNIX timestamp in seconds.
    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single `Section` row into a struct.
    fn row_to_section(row: &rusqlite::Row) -> rusqlite::Result<Section> {
        let color: String = row.get(2)?;
        Ok(Section {
            id: row.get(0)?,
            name: row.get(1)?,
            // Rows written outside this crate may carry colors we no longer offer.
            color: color.parse().unwrap_or_default(),
            sort_order: row.get(3)?,
            created_at: row.get(4)?,
        })
    }

    fn translate(name: &str, err: rusqlite::Error) -> BoardError {
        if is_unique_violation(&err) {
            BoardError::DuplicateName(name.to_string())
        } else {
            err.into()
        }
    }
}

impl<'a> SectionManagerTrait for SectionManager<'a> {
    fn insert_section(
        &mut self,
        name: &str,
        color: SectionColor,
        sort_order: i64,
    ) -> Result<Section, BoardError> {
        let now = Self::now();
        self.conn
            .execute(
                "INSERT INTO sections (name, color, sort_order, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![name, color.as_str(), sort_order, now],
            )
            .map_err(|e| Self::translate(name, e))?;

        Ok(Section {
            id: self.conn.last_insert_rowid(),
            name: name.to_string(),
            color,
            sort_order,
            created_at: now,
        })
    }

    fn get_section(&self, id: i64) -> Result<Option<Section>, BoardError> {
        let section = self
            .conn
            .query_row(
                "SELECT id, name, color, sort_order, created_at FROM sections WHERE id = ?1",
                params![id],
                Self::row_to_section,
            )
            .optional()?;
        Ok(section)
    }

    fn name_taken(&self, name: &str, exclude: Option<i64>) -> Result<bool, BoardError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM sections WHERE name = ?1 AND id IS NOT ?2",
            params![name, exclude],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn update_section(
        &mut self,
        id: i64,
        name: Option<&str>,
        color: Option<SectionColor>,
    ) -> Result<(), BoardError> {
        let affected = self
            .conn
            .execute(
                "UPDATE sections SET name = COALESCE(?1, name), color = COALESCE(?2, color) WHERE id = ?3",
                params![name, color.map(|c| c.as_str()), id],
            )
            .map_err(|e| Self::translate(name.unwrap_or_default(), e))?;

        if affected == 0 {
            return Err(BoardError::SectionNotFound(id));
        }
        Ok(())
    }

    /// Deletes a section. Its links go with it through `ON DELETE CASCADE`.
    fn delete_section(&mut self, id: i64) -> Result<(), BoardError> {
        let affected = self
            .conn
            .execute("DELETE FROM sections WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(BoardError::SectionNotFound(id));
        }
        Ok(())
    }

    fn list_sections(&self) -> Result<Vec<Section>, BoardError> {
        let sql = format!(
            "SELECT id, name, color, sort_order, created_at FROM sections ORDER BY {}",
            SECTION_ORDER
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::row_to_section)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
