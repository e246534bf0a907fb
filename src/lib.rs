pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod analysis;
pub mod ui;
pub mod export;

pub use config::Config;
pub use error::{Error, FetchErrorKind, FetchFailure, Result};
pub use github::{DemoSource, GitHubClient, ProfileSource};
pub use analysis::{ProfilePipeline, RankingStrategy};
