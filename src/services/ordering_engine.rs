//! Ordering Engine for Linkboard.
//!
//! Assigns and repairs `sort_order` values for a set of sibling rows: all
//! sections, or the links of one section. The engine borrows a connection
//! (normally an open transaction) and never commits on its own, so a
//! reorder is exactly as atomic as the transaction it runs in.

use std::collections::HashSet;

use rusqlite::{params, params_from_iter, Connection};
use serde_json::Value;
use tracing::debug;

use crate::types::errors::BoardError;
use crate::types::settings::ReorderPolicy;

/// Display order of sections. Name breaks ties between equal positions.
pub const SECTION_ORDER: &str = "sort_order ASC, name ASC, id ASC";
/// Display order of links. Newest first among equal positions.
pub const LINK_ORDER: &str = "sort_order ASC, created_at DESC, id DESC";

/// One ordering scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiblingSet {
    Sections,
    Links(i64),
}

impl SiblingSet {
    fn table(&self) -> &'static str {
        match self {
            SiblingSet::Sections => "sections",
            SiblingSet::Links(_) => "links",
        }
    }

    fn filter(&self) -> &'static str {
        match self {
            SiblingSet::Sections => "",
            SiblingSet::Links(_) => " WHERE section_id = ?1",
        }
    }

    fn scope_params(&self) -> Vec<i64> {
        match self {
            SiblingSet::Sections => Vec::new(),
            SiblingSet::Links(section_id) => vec![*section_id],
        }
    }

    /// The `ORDER BY` body used whenever this set is read.
    pub fn order_by(&self) -> &'static str {
        match self {
            SiblingSet::Sections => SECTION_ORDER,
            SiblingSet::Links(_) => LINK_ORDER,
        }
    }
}

/// Trait defining ordering operations over a sibling set.
pub trait OrderingEngineTrait {
    /// Position for a row appended at the end: `max + 1`, or `0` for an empty set.
    fn append_position(&self, set: SiblingSet) -> Result<i64, BoardError>;
    /// Applies a client-supplied order. Returns how many rows were repositioned.
    fn reorder(&mut self, set: SiblingSet, ordered_ids: &[Value]) -> Result<usize, BoardError>;
    /// Rewrites positions to `0..n-1` following the current display order.
    /// Returns how many rows changed.
    fn repair(&mut self, set: SiblingSet) -> Result<usize, BoardError>;
}

/// Ordering engine bound to a borrowed connection.
pub struct OrderingEngine<'a> {
    conn: &'a Connection,
    policy: ReorderPolicy,
}

impl<'a> OrderingEngine<'a> {
    pub fn new(conn: &'a Connection, policy: ReorderPolicy) -> Self {
        Self { conn, policy }
    }

    /// `(id, sort_order)` of every member, in display order.
    fn members(&self, set: SiblingSet) -> Result<Vec<(i64, i64)>, BoardError> {
        let sql = format!(
            "SELECT id, sort_order FROM {}{} ORDER BY {}",
            set.table(),
            set.filter(),
            set.order_by()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(set.scope_params()), |row| {
            Ok((row.get(0)?, row.get(1)?))
        })?;
        let members = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(members)
    }

    fn write_positions(
        &self,
        set: SiblingSet,
        positions: impl IntoIterator<Item = (i64, i64)>,
    ) -> Result<usize, BoardError> {
        let sql = format!("UPDATE {} SET sort_order = ?1 WHERE id = ?2", set.table());
        let mut stmt = self.conn.prepare(&sql)?;
        let mut written = 0;
        for (id, position) in positions {
            written += stmt.execute(params![position, id])?;
        }
        Ok(written)
    }
}

impl<'a> OrderingEngineTrait for OrderingEngine<'a> {
    fn append_position(&self, set: SiblingSet) -> Result<i64, BoardError> {
        let sql = format!(
            "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM {}{}",
            set.table(),
            set.filter()
        );
        let position = self
            .conn
            .query_row(&sql, params_from_iter(set.scope_params()), |row| row.get(0))?;
        Ok(position)
    }

    fn reorder(&mut self, set: SiblingSet, ordered_ids: &[Value]) -> Result<usize, BoardError> {
        let requested = sanitize_ids(ordered_ids);
        if requested.is_empty() {
            return Err(BoardError::InvalidInput(
                "ordered_ids contains no usable ids".to_string(),
            ));
        }

        let members: HashSet<i64> = self.members(set)?.into_iter().map(|(id, _)| id).collect();
        let ordered: Vec<i64> = match self.policy {
            ReorderPolicy::Lenient => requested
                .into_iter()
                .filter(|id| members.contains(id))
                .collect(),
            ReorderPolicy::Strict => {
                if requested.len() != members.len()
                    || !requested.iter().all(|id| members.contains(id))
                {
                    return Err(BoardError::InvalidInput(format!(
                        "ordered_ids must list each of the {} {} exactly once",
                        members.len(),
                        set.table()
                    )));
                }
                requested
            }
        };

        let count = self.write_positions(
            set,
            ordered.iter().enumerate().map(|(index, id)| (*id, index as i64)),
        )?;
        debug!(?set, requested = ordered_ids.len(), count, "reordered siblings");
        Ok(count)
    }

    fn repair(&mut self, set: SiblingSet) -> Result<usize, BoardError> {
        let changed: Vec<(i64, i64)> = self
            .members(set)?
            .into_iter()
            .enumerate()
            .filter(|(index, (_, position))| *position != *index as i64)
            .map(|(index, (id, _))| (id, index as i64))
            .collect();
        let count = self.write_positions(set, changed)?;
        if count > 0 {
            debug!(?set, count, "repaired sibling positions");
        }
        Ok(count)
    }
}

/// Keeps the usable ids of a client-supplied list, in order.
///
/// Positive JSON integers and strings holding a positive integer survive;
/// anything else is dropped. A repeated id keeps its first position.
pub fn sanitize_ids(raw: &[Value]) -> Vec<i64> {
    let mut seen = HashSet::new();
    raw.iter()
        .filter_map(parse_id)
        .filter(|id| seen.insert(*id))
        .collect()
}

fn parse_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    (id > 0).then_some(id)
}
