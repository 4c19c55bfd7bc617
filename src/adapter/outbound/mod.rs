//! Outbound adapters (driven side).

pub mod github;
pub mod sqlite;
