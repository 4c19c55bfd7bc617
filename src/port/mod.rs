//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the seams between the command layer and the outside world:
//!
//! ```text
//!                 ┌─────────────────────────┐
//!                 │      CLI commands       │
//!                 │                         │
//!     ┌───────────┤     Domain + Port       ├───────────┐
//!     │           └─────────────────────────┘           │
//!     ▼                                                 ▼
//! ┌─────────────┐                               ┌─────────────┐
//! │   GitHub    │                               │   SQLite    │
//! │   Fetcher   │                               │    Store    │
//! └─────────────┘                               └─────────────┘
//! ```
//!
//! - [`ReleaseFetcher`] - Remote release listing
//! - [`SnapshotStore`] - Append-only snapshot persistence and queries

pub mod outbound;

pub use outbound::fetcher::{FetchRequest, ReleaseFetcher};
pub use outbound::store::{SnapshotStore, DEFAULT_HISTORY_LIMIT};
