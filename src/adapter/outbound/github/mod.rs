//! GitHub release listing integration.

pub mod client;
pub mod dto;
pub mod settings;

pub use client::GithubClient;
pub use settings::GithubConfig;
