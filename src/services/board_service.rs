//! Board Service for Linkboard.
//!
//! Implements `BoardServiceTrait`: the section and link operations exposed
//! to the transports. Every call validates its input, then runs as a single
//! store transaction: existence and uniqueness checks, position assignment
//! through the [`OrderingEngine`] and the write itself commit together or
//! not at all.

use std::sync::Arc;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, info};

use crate::database::{migrations, Database};
use crate::managers::link_manager::{LinkChanges, LinkManager, LinkManagerTrait};
use crate::managers::section_manager::{SectionManager, SectionManagerTrait};
use crate::services::ordering_engine::{OrderingEngine, OrderingEngineTrait, SiblingSet};
use crate::types::errors::BoardError;
use crate::types::link::{Link, LinkView};
use crate::types::section::{Section, SectionColor, SectionView};
use crate::types::settings::BoardOptions;

/// Trait defining the board operations.
pub trait BoardServiceTrait {
    /// All sections in display order, each with its links in display order.
    fn list_sections(&self) -> Result<Vec<SectionView>, BoardError>;
    fn get_section(&self, id: i64) -> Result<SectionView, BoardError>;
    fn create_section(&self, name: &str, color: Option<&str>) -> Result<Section, BoardError>;
    fn update_section(&self, id: i64, name: Option<&str>, color: Option<&str>) -> Result<(), BoardError>;
    fn delete_section(&self, id: i64) -> Result<(), BoardError>;
    fn add_link(&self, section_id: i64, title: &str, url: &str, notes: Option<&str>) -> Result<Link, BoardError>;
    fn get_link(&self, id: i64) -> Result<Link, BoardError>;
    /// `notes = Some("")` clears the notes.
    fn update_link(&self, id: i64, title: Option<&str>, url: Option<&str>, notes: Option<&str>) -> Result<(), BoardError>;
    fn delete_link(&self, id: i64) -> Result<(), BoardError>;
    fn reorder_sections(&self, ordered_ids: &[Value]) -> Result<usize, BoardError>;
    fn reorder_links(&self, section_id: i64, ordered_ids: &[Value]) -> Result<usize, BoardError>;
    /// Rewrites every sibling set to dense `0..n-1` positions.
    fn repair_order(&self) -> Result<usize, BoardError>;
}

/// Board service over a shared database.
pub struct BoardService {
    db: Arc<Database>,
    options: BoardOptions,
}

impl BoardService {
    /// Creates the service and brings the store in line with `options`.
    ///
    /// # Errors
    /// Fails if `unique_urls` is enabled while duplicate links are already stored.
    pub fn new(db: Arc<Database>, options: BoardOptions) -> Result<Self, BoardError> {
        db.transaction(|tx| migrations::set_unique_link_urls(tx, options.unique_urls))?;
        Ok(Self { db, options })
    }

    fn section_view(tx: &rusqlite::Connection, section: Section) -> Result<SectionView, BoardError> {
        let links = LinkManager::new(tx)
            .list_links(section.id)?
            .into_iter()
            .map(LinkView::from)
            .collect();
        Ok(SectionView::new(section, links))
    }

    fn require_section(tx: &rusqlite::Connection, id: i64) -> Result<Section, BoardError> {
        SectionManager::new(tx)
            .get_section(id)?
            .ok_or(BoardError::SectionNotFound(id))
    }
}

/// Trims `value`, failing with `empty` when nothing is left.
fn required<'s>(value: &'s str, empty: BoardError) -> Result<&'s str, BoardError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(empty)
    } else {
        Ok(trimmed)
    }
}

/// Parses and normalizes a link URL.
fn normalize_url(url: &str) -> Result<String, BoardError> {
    let trimmed = url.trim();
    Url::parse(trimmed)
        .map(String::from)
        .map_err(|e| BoardError::InvalidUrl(format!("{}: {}", trimmed, e)))
}

/// Trimmed notes, `None` when blank.
fn normalize_notes(notes: &str) -> Option<&str> {
    let trimmed = notes.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

impl BoardServiceTrait for BoardService {
    fn list_sections(&self) -> Result<Vec<SectionView>, BoardError> {
        let views = self.db.transaction(|tx| {
            SectionManager::new(tx)
                .list_sections()?
                .into_iter()
                .map(|section| Self::section_view(tx, section))
                .collect::<Result<Vec<_>, _>>()
        })?;
        debug!(sections = views.len(), "listed sections");
        Ok(views)
    }

    fn get_section(&self, id: i64) -> Result<SectionView, BoardError> {
        self.db.transaction(|tx| {
            let section = Self::require_section(tx, id)?;
            Self::section_view(tx, section)
        })
    }

    fn create_section(&self, name: &str, color: Option<&str>) -> Result<Section, BoardError> {
        let name = required(name, BoardError::EmptyName)?;
        let color = color
            .map(|c| c.parse::<SectionColor>())
            .transpose()?
            .unwrap_or_default();
        let policy = self.options.reorder_policy;

        let section = self.db.transaction(|tx| {
            let mut sections = SectionManager::new(tx);
            if sections.name_taken(name, None)? {
                return Err(BoardError::DuplicateName(name.to_string()));
            }
            let position = OrderingEngine::new(tx, policy).append_position(SiblingSet::Sections)?;
            sections.insert_section(name, color, position)
        })?;

        info!(section_id = section.id, name = %section.name, sort_order = section.sort_order, "created section");
        Ok(section)
    }

    fn update_section(&self, id: i64, name: Option<&str>, color: Option<&str>) -> Result<(), BoardError> {
        self.db.transaction(|tx| {
            Self::require_section(tx, id)?;
            let mut sections = SectionManager::new(tx);

            let name = name.map(|n| required(n, BoardError::EmptyName)).transpose()?;
            if let Some(new_name) = name {
                if sections.name_taken(new_name, Some(id))? {
                    return Err(BoardError::DuplicateName(new_name.to_string()));
                }
            }
            let color = color.map(|c| c.parse::<SectionColor>()).transpose()?;

            sections.update_section(id, name, color)
        })?;

        info!(section_id = id, "updated section");
        Ok(())
    }

    fn delete_section(&self, id: i64) -> Result<(), BoardError> {
        self.db
            .transaction(|tx| SectionManager::new(tx).delete_section(id))?;
        info!(section_id = id, "deleted section and its links");
        Ok(())
    }

    fn add_link(&self, section_id: i64, title: &str, url: &str, notes: Option<&str>) -> Result<Link, BoardError> {
        let title = required(title, BoardError::EmptyTitle)?;
        let url = normalize_url(url)?;
        let notes = notes.and_then(normalize_notes);
        let policy = self.options.reorder_policy;

        let link = self.db.transaction(|tx| {
            Self::require_section(tx, section_id)?;
            let position =
                OrderingEngine::new(tx, policy).append_position(SiblingSet::Links(section_id))?;
            LinkManager::new(tx).insert_link(section_id, title, &url, notes, position)
        })?;

        info!(link_id = link.id, section_id, sort_order = link.sort_order, "added link");
        Ok(link)
    }

    fn get_link(&self, id: i64) -> Result<Link, BoardError> {
        self.db.transaction(|tx| {
            LinkManager::new(tx)
                .get_link(id)?
                .ok_or(BoardError::LinkNotFound(id))
        })
    }

    fn update_link(&self, id: i64, title: Option<&str>, url: Option<&str>, notes: Option<&str>) -> Result<(), BoardError> {
        self.db.transaction(|tx| {
            let mut links = LinkManager::new(tx);
            if links.get_link(id)?.is_none() {
                return Err(BoardError::LinkNotFound(id));
            }

            let title = title.map(|t| required(t, BoardError::EmptyTitle)).transpose()?;
            let url = url.map(normalize_url).transpose()?;
            let changes = LinkChanges {
                title,
                url: url.as_deref(),
                notes: notes.map(normalize_notes),
            };
            links.update_link(id, &changes)
        })?;
        info!(link_id = id, "updated link");
        Ok(())
    }

    fn delete_link(&self, id: i64) -> Result<(), BoardError> {
        self.db
            .transaction(|tx| LinkManager::new(tx).delete_link(id))?;
        info!(link_id = id, "deleted link");
        Ok(())
    }

    fn reorder_sections(&self, ordered_ids: &[Value]) -> Result<usize, BoardError> {
        let policy = self.options.reorder_policy;
        let count = self.db.transaction(|tx| {
            OrderingEngine::new(tx, policy).reorder(SiblingSet::Sections, ordered_ids)
        })?;
        info!(count, "reordered sections");
        Ok(count)
    }

    fn reorder_links(&self, section_id: i64, ordered_ids: &[Value]) -> Result<usize, BoardError> {
        let policy = self.options.reorder_policy;
        let count = self.db.transaction(|tx| {
            Self::require_section(tx, section_id)?;
            OrderingEngine::new(tx, policy).reorder(SiblingSet::Links(section_id), ordered_ids)
        })?;
        info!(section_id, count, "reordered links");
        Ok(count)
    }

    fn repair_order(&self) -> Result<usize, BoardError> {
        let policy = self.options.reorder_policy;
        let count = self.db.transaction(|tx| {
            let mut engine = OrderingEngine::new(tx, policy);
            let mut changed = engine.repair(SiblingSet::Sections)?;
            for section in SectionManager::new(tx).list_sections()? {
                changed += engine.repair(SiblingSet::Links(section.id))?;
            }
            Ok::<_, BoardError>(changed)
        })?;
        info!(count, "repaired sort positions");
        Ok(count)
    }
}
