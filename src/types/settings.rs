use serde::{Deserialize, Serialize};

/// How a reorder request treats an id list that does not cover the whole sibling set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReorderPolicy {
    /// Drop unknown ids, leave unlisted siblings where they are.
    #[default]
    Lenient,
    /// Reject unless the list names every sibling exactly once.
    Strict,
}

/// Top-level service settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoardSettings {
    pub database_path: String,
    pub bind_address: String,
    pub static_dir: String,
    /// Enforce one link per `(section, url)` pair.
    pub unique_urls: bool,
    pub reorder_policy: ReorderPolicy,
    /// Directory for daily-rotated JSON logs. Stdout only when unset.
    pub log_dir: Option<String>,
    pub log_filter: String,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            database_path: "linkboard.db".to_string(),
            bind_address: "127.0.0.1:8000".to_string(),
            static_dir: "static".to_string(),
            unique_urls: true,
            reorder_policy: ReorderPolicy::Lenient,
            log_dir: None,
            log_filter: "info".to_string(),
        }
    }
}

impl BoardSettings {
    /// Options the board service cares about.
    pub fn board_options(&self) -> BoardOptions {
        BoardOptions {
            unique_urls: self.unique_urls,
            reorder_policy: self.reorder_policy,
        }
    }
}

/// Feature switches for the board service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardOptions {
    pub unique_urls: bool,
    pub reorder_policy: ReorderPolicy,
}

impl Default for BoardOptions {
    fn default() -> Self {
        BoardSettings::default().board_options()
    }
}
