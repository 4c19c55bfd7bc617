//! Release statistics commands: fetch, show, history, compare.

mod format;
mod json;
mod range;

pub mod handler;
