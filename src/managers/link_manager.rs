//! Link Manager for Linkboard.
//!
//! Implements `LinkManagerTrait`: row-level reads and writes on the
//! `links` table, backed by SQLite via `rusqlite`.

use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection, OptionalExtension};

use crate::services::ordering_engine::LINK_ORDER;
use crate::types::errors::{is_unique_violation, BoardError};
use crate::types::link::Link;

/// Field changes for an existing link. `None` leaves a field as it is.
#[derive(Debug, Default, Clone)]
pub struct LinkChanges<'s> {
    pub title: Option<&'s str>,
    pub url: Option<&'s str>,
    /// `Some(None)` clears the notes.
    pub notes: Option<Option<&'s str>>,
}

/// Trait defining link storage operations.
pub trait LinkManagerTrait {
    fn insert_link(
        &mut self,
        section_id: i64,
        title: &str,
        url: &str,
        notes: Option<&str>,
        sort_order: i64,
    ) -> Result<Link, BoardError>;
    fn get_link(&self, id: i64) -> Result<Option<Link>, BoardError>;
    fn update_link(&mut self, id: i64, changes: &LinkChanges<'_>) -> Result<(), BoardError>;
    fn delete_link(&mut self, id: i64) -> Result<(), BoardError>;
    /// Links of one section in display order.
    fn list_links(&self, section_id: i64) -> Result<Vec<Link>, BoardError>;
}

/// Link manager backed by a SQLite connection.
pub struct LinkManager<'a> {
    conn: &'a Connection,
}

impl<'a> LinkManager<'a> {
    /// Creates a new `LinkManager` using the provided connection or transaction.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn now() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64
    }

    /// Reads a single `Link` row into a struct.
    fn row_to_link(row: &rusqlite::Row) -> rusqlite::Result<Link> {
        Ok(Link {
            id: row.get(0)?,
            section_id: row.get(1)?,
            title: row.get(2)?,
            url: row.get(3)?,
            notes: row.get(4)?,
            sort_order: row.get(5)?,
            created_at: row.get(6)?,
        })
    }

    fn translate(url: &str, err: rusqlite::Error) -> BoardError {
        if is_unique_violation(&err) {
            BoardError::DuplicateUrl(url.to_string())
        } else {
            err.into()
        }
    }
}

impl<'a> LinkManagerTrait for LinkManager<'a> {
    fn insert_link(
        &mut self,
        section_id: i64,
        title: &str,
        url: &str,
        notes: Option<&str>,
        sort_order: i64,
    ) -> Result<Link, BoardError> {
        let now = Self::now();
        self.conn
            .execute(
                "INSERT INTO links (section_id, title, url, notes, sort_order, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![section_id, title, url, notes, sort_order, now],
            )
            .map_err(|e| Self::translate(url, e))?;

        Ok(Link {
            id: self.conn.last_insert_rowid(),
            section_id,
            title: title.to_string(),
            url: url.to_string(),
            notes: notes.map(str::to_string),
            sort_order,
            created_at: now,
        })
    }

    fn get_link(&self, id: i64) -> Result<Option<Link>, BoardError> {
        let link = self
            .conn
            .query_row(
                "SELECT id, section_id, title, url, notes, sort_order, created_at \
                 FROM links WHERE id = ?1",
                params![id],
                Self::row_to_link,
            )
            .optional()?;
        Ok(link)
    }

    fn update_link(&mut self, id: i64, changes: &LinkChanges<'_>) -> Result<(), BoardError> {
        let affected = self
            .conn
            .execute(
                "UPDATE links SET \
                 title = COALESCE(?1, title), \
                 url = COALESCE(?2, url), \
                 notes = CASE WHEN ?3 THEN ?4 ELSE notes END \
                 WHERE id = ?5",
                params![
                    changes.title,
                    changes.url,
                    changes.notes.is_some(),
                    changes.notes.flatten(),
                    id
                ],
            )
            .map_err(|e| Self::translate(changes.url.unwrap_or_default(), e))?;

        if affected == 0 {
            return Err(BoardError::LinkNotFound(id));
        }
        Ok(())
    }

    fn delete_link(&mut self, id: i64) -> Result<(), BoardError> {
        let affected = self
            .conn
            .execute("DELETE FROM links WHERE id = ?1", params![id])?;

        if affected == 0 {
            return Err(BoardError::LinkNotFound(id));
        }
        Ok(())
    }

    fn list_links(&self, section_id: i64) -> Result<Vec<Link>, BoardError> {
        let sql = format!(
            "SELECT id, section_id, title, url, notes, sort_order, created_at \
             FROM links WHERE section_id = ?1 ORDER BY {}",
            LINK_ORDER
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![section_id], Self::row_to_link)?;

        let mut results = Vec::new();
        for row in rows {
            results.push(row?);
        }
        Ok(results)
    }
}
