use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ranking::RankingInfo;
use super::stats::{ActivityStats, LanguageStats, ProfileStats};
use super::user::{GitHubUser, Repository};

/// The composed result of one successful fetch: raw data plus every derived figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub user: GitHubUser,
    pub repositories: Vec<Repository>,
    pub languages: LanguageStats,
    pub stats: ProfileStats,
    pub activity: ActivityStats,
    pub ranking: RankingInfo,
    pub fetched_at: DateTime<Utc>,
}

impl UserProfile {
    /// Public, non-fork repositories in source order.
    pub fn showcase_repositories(&self, limit: usize) -> Vec<&Repository> {
        self.repositories
            .iter()
            .filter(|r| !r.private && !r.fork)
            .take(limit)
            .collect()
    }
}
