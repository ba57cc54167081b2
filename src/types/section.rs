use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::BoardError;
use super::link::LinkView;

/// Palette a section can be tinted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionColor {
    #[default]
    Slate,
    Gray,
    Blue,
    Navy,
    Indigo,
    Sky,
    Cyan,
    Teal,
    Mint,
    Green,
    Lime,
    Amber,
    Gold,
    Orange,
    Red,
    Pink,
    Purple,
    Coffee,
}

impl SectionColor {
    pub const ALL: [SectionColor; 18] = [
        SectionColor::Slate,
        SectionColor::Gray,
        SectionColor::Blue,
        SectionColor::Navy,
        SectionColor::Indigo,
        SectionColor::Sky,
        SectionColor::Cyan,
        SectionColor::Teal,
        SectionColor::Mint,
        SectionColor::Green,
        SectionColor::Lime,
        SectionColor::Amber,
        SectionColor::Gold,
        SectionColor::Orange,
        SectionColor::Red,
        SectionColor::Pink,
        SectionColor::Purple,
        SectionColor::Coffee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionColor::Slate => "slate",
            SectionColor::Gray => "gray",
            SectionColor::Blue => "blue",
            SectionColor::Navy => "navy",
            SectionColor::Indigo => "indigo",
            SectionColor::Sky => "sky",
            SectionColor::Cyan => "cyan",
            SectionColor::Teal => "teal",
            SectionColor::Mint => "mint",
            SectionColor::Green => "green",
            SectionColor::Lime => "lime",
            SectionColor::Amber => "amber",
            SectionColor::Gold => "gold",
            SectionColor::Orange => "orange",
            SectionColor::Red => "red",
            SectionColor::Pink => "pink",
            SectionColor::Purple => "purple",
            SectionColor::Coffee => "coffee",
        }
    }
}

/// Parses a color name, ignoring surrounding whitespace and case.
impl FromStr for SectionColor {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        SectionColor::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| BoardError::InvalidColor(s.trim().to_string()))
    }
}

/// A stored section row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: i64,
    pub name: String,
    pub color: SectionColor,
    pub sort_order: i64,
    pub created_at: i64,
}

/// A section as shown to clients, with its links in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    pub id: i64,
    pub name: String,
    pub color: SectionColor,
    pub links: Vec<LinkView>,
}

impl SectionView {
    pub fn new(section: Section, links: Vec<LinkView>) -> Self {
        Self {
            id: section.id,
            name: section.name,
            color: section.color,
            links,
        }
    }
}
