// Linkboard store adapters
// Managers handle row-level reads and writes for sections and links.

pub mod link_manager;
pub mod section_manager;
