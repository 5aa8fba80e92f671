//! Bookmarks REST service
//!
//! - REST API endpoints in `endpoints/`
//! - PostgreSQL models and queries in `db/`
//! - Storage collaborator trait and implementations in `service/`
//! - Reads DATABASE_URL from the environment (or `.env`); without it the
//!   service keeps bookmarks in memory

pub mod config;
pub mod db;
pub mod endpoints;
pub mod service;
pub mod utils;
