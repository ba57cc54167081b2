// Linkboard services
// Services orchestrate business rules, ordering and configuration.

pub mod board_service;
pub mod ordering_engine;
pub mod settings_engine;
