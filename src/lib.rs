//! Linkboard, a bookmark organizer: named sections, each holding an ordered
//! list of titled links, served over HTTP with a static frontend.
//!
//! This library crate exposes all modules for use by the binaries and integration tests.

pub mod app;
pub mod database;
pub mod managers;
pub mod rpc_handler;
pub mod services;
pub mod types;
pub mod web;
