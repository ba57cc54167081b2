use serde::{Deserialize, Serialize};

/// A stored link row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub id: i64,
    pub section_id: i64,
    pub title: String,
    pub url: String,
    pub notes: Option<String>,
    pub sort_order: i64,
    pub created_at: i64,
}

/// The client-facing shape of a link inside a section listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkView {
    pub id: i64,
    pub title: String,
    pub url: String,
    pub notes: Option<String>,
}

impl From<Link> for LinkView {
    fn from(link: Link) -> Self {
        Self {
            id: link.id,
            title: link.title,
            url: link.url,
            notes: link.notes,
        }
    }
}
