//! Domain types: release snapshots and their comparison.

pub mod compare;
pub mod release;

pub use compare::{Comparison, Growth, ReleaseGrowth, TOP_GROWTH_RELEASES};
pub use release::{Asset, Release, ReleaseStats};
