use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::analysis::activity::calculate_activity;
use crate::analysis::languages::aggregate_languages;
use crate::analysis::ranking_engine::{RankingEngine, RankingInput, RankingStrategy};
use crate::analysis::stats::StatsAggregator;
use crate::error::Result;
use crate::github::ProfileSource;
use crate::models::{RawProfile, UserProfile};

/// Fetch, aggregate and rank: the one side-effecting operation the UI invokes.
pub struct ProfilePipeline {
    source: Arc<dyn ProfileSource>,
    aggregator: StatsAggregator,
    ranking_engine: RankingEngine,
}

impl ProfilePipeline {
    pub fn new(source: impl ProfileSource + 'static, strategy: RankingStrategy) -> Self {
        Self {
            source: Arc::new(source),
            aggregator: StatsAggregator::new(),
            ranking_engine: RankingEngine::new(strategy),
        }
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub async fn analyze_user(&self, username: &str) -> Result<UserProfile> {
        tracing::info!("Fetching profile for {} via {}", username, self.source.name());
        let raw = self.source.fetch_profile(username).await?;
        Ok(self.compose(raw, Utc::now()))
    }

    /// Derives every statistic from an already-fetched profile. Never fails.
    pub fn compose(&self, raw: RawProfile, now: DateTime<Utc>) -> UserProfile {
        let RawProfile {
            user,
            repositories,
            repo_languages,
        } = raw;

        let stats = self.aggregator.aggregate(&repositories, now);
        let languages = aggregate_languages(&repositories, &repo_languages);
        let activity = calculate_activity(&repositories);
        let ranking = self.ranking_engine.rank(&RankingInput {
            user: &user,
            repositories: &repositories,
            stats: &stats,
            activity: &activity,
            now,
        });

        tracing::info!(
            "Ranked {}: {:.1}/100 ({})",
            user.login,
            ranking.total_score,
            ranking.overall_rank
        );

        UserProfile {
            user,
            repositories,
            languages,
            stats,
            activity,
            ranking,
            fetched_at: now,
        }
    }
}
