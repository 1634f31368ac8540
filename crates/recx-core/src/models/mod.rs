//! Data models for receipt extraction.

pub mod config;
pub mod row;
pub mod schema;
