//! SQLite persistence adapter.
//!
//! Stores release snapshots in an embedded SQLite file using Diesel ORM.

pub mod database;
pub mod store;

pub use store::SqliteSnapshotStore;
