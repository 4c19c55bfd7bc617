//! Infrastructure layer.
//!
//! Technical concerns that support the commands without containing
//! domain logic.
//!
//! - [`config`] - Settings loading, validation, and logging initialization

pub mod config;
