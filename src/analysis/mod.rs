pub mod activity;
pub mod languages;
pub mod pipeline;
pub mod ranking_engine;
pub mod stats;

pub use activity::calculate_activity;
pub use languages::aggregate_languages;
pub use pipeline::ProfilePipeline;
pub use ranking_engine::{RankingEngine, RankingInput, RankingStrategy};
pub use stats::StatsAggregator;
