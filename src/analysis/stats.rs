use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Utc};

use crate::models::{
    ProfileStats, RecencyCounts, RepoType, RepoTypeCounts, Repository, TimelineEntry,
    UpdateRecency,
};

/// Reduces a repository list into totals, type counts, recency buckets and
/// a creation timeline. Forks only ever count towards `RepoType::Forks`.
#[derive(Debug, Default)]
pub struct StatsAggregator;

impl StatsAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(repo: &Repository) -> RepoType {
        if repo.fork {
            RepoType::Forks
        } else if repo.private {
            RepoType::Private
        } else {
            RepoType::Public
        }
    }

    /// `now` is the aggregation instant used for recency bucketing.
    pub fn aggregate(&self, repos: &[Repository], now: DateTime<Utc>) -> ProfileStats {
        let mut repo_types = RepoTypeCounts::default();
        let mut update_frequency = RecencyCounts::default();
        let mut year_counts: BTreeMap<i32, u32> = BTreeMap::new();
        let mut total_stars = 0u64;
        let mut total_forks = 0u64;
        let mut total_size_kb = 0u64;
        let mut owned_repos = 0u32;

        for repo in repos {
            let repo_type = Self::classify(repo);
            repo_types.increment(repo_type);
            if repo_type == RepoType::Forks {
                continue;
            }

            owned_repos += 1;
            total_stars += u64::from(repo.stargazers_count);
            total_forks += u64::from(repo.forks_count);
            total_size_kb += repo.size;

            if let Some(created) = repo.created_at {
                *year_counts.entry(created.year()).or_insert(0) += 1;
            }

            if let Some(updated) = repo.updated_at {
                let days = (now - updated).num_days();
                update_frequency.increment(UpdateRecency::from_days(days));
            }
        }

        let avg_stars_per_repo = if owned_repos > 0 {
            total_stars as f64 / f64::from(owned_repos)
        } else {
            0.0
        };

        tracing::debug!(
            "Aggregated {} repositories ({} owned, {} forks)",
            repos.len(),
            owned_repos,
            repo_types.forks
        );

        ProfileStats {
            total_stars,
            total_forks,
            total_size_kb,
            avg_stars_per_repo,
            repo_types,
            update_frequency,
            creation_timeline: year_counts
                .into_iter()
                .map(|(year, count)| TimelineEntry { year, count })
                .collect(),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    pub(crate) fn repo(name: &str, stars: u32, private: bool, fork: bool) -> Repository {
        Repository {
            id: 0,
            name: name.to_string(),
            full_name: format!("octo/{}", name),
            description: None,
            language: Some("Rust".to_string()),
            stargazers_count: stars,
            forks_count: 1,
            watchers_count: stars,
            size: 100,
            private,
            fork,
            created_at: Some(Utc.with_ymd_and_hms(2021, 6, 1, 0, 0, 0).unwrap()),
            updated_at: None,
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_repo_type_counts_sum_to_repo_count() {
        let mut repos = Vec::new();
        for i in 0..3 {
            repos.push(repo(&format!("fork{}", i), 100, false, true));
        }
        for i in 0..2 {
            repos.push(repo(&format!("private{}", i), 5, true, false));
        }
        for i in 0..5 {
            repos.push(repo(&format!("public{}", i), 10, false, false));
        }

        let stats = StatsAggregator::new().aggregate(&repos, now());
        assert_eq!(
            stats.repo_types,
            RepoTypeCounts {
                public: 5,
                private: 2,
                forks: 3
            }
        );
        assert_eq!(stats.repo_types.total() as usize, repos.len());
        // Forks contribute nothing to the totals.
        assert_eq!(stats.total_stars, 2 * 5 + 5 * 10);
        assert_eq!(stats.total_forks, 7);
        assert_eq!(stats.total_size_kb, 700);
        assert!((stats.avg_stars_per_repo - 60.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_has_zero_average() {
        let stats = StatsAggregator::new().aggregate(&[], now());
        assert_eq!(stats.avg_stars_per_repo, 0.0);
        assert!(stats.creation_timeline.is_empty());
        assert_eq!(stats.repo_types.total(), 0);
    }

    #[test]
    fn test_only_forks_has_zero_average() {
        let repos = vec![repo("a", 50, false, true), repo("b", 50, false, true)];
        let stats = StatsAggregator::new().aggregate(&repos, now());
        assert_eq!(stats.avg_stars_per_repo, 0.0);
        assert_eq!(stats.update_frequency.total(), 0);
    }

    #[test]
    fn test_recency_buckets() {
        let ages = [0, 7, 8, 30, 31, 90, 200, 365, 366, 2000];
        let mut repos: Vec<Repository> = ages
            .iter()
            .map(|days| {
                let mut r = repo(&format!("r{}", days), 0, false, false);
                r.updated_at = Some(now() - Duration::days(*days));
                r
            })
            .collect();
        // Unknown update time and forks are not bucketed.
        repos.push(repo("unknown", 0, false, false));
        let mut fork = repo("fork", 0, false, true);
        fork.updated_at = Some(now());
        repos.push(fork);

        let stats = StatsAggregator::new().aggregate(&repos, now());
        let freq = stats.update_frequency;
        assert_eq!(freq.weekly, 2);
        assert_eq!(freq.monthly, 2);
        assert_eq!(freq.quarterly, 2);
        assert_eq!(freq.yearly, 2);
        assert_eq!(freq.stale, 2);
        assert_eq!(freq.total(), 10);
        assert!(freq.total() <= stats.repo_types.owned());
    }

    #[test]
    fn test_timeline_is_sparse_and_ascending() {
        let mut repos = Vec::new();
        for year in [2023, 2019, 2023, 2021] {
            let mut r = repo(&format!("r{}", year), 0, false, false);
            r.created_at = Some(Utc.with_ymd_and_hms(year, 3, 1, 0, 0, 0).unwrap());
            repos.push(r);
        }
        let mut fork = repo("fork", 0, false, true);
        fork.created_at = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
        repos.push(fork);

        let stats = StatsAggregator::new().aggregate(&repos, now());
        assert_eq!(
            stats.creation_timeline,
            vec![
                TimelineEntry { year: 2019, count: 1 },
                TimelineEntry { year: 2021, count: 1 },
                TimelineEntry { year: 2023, count: 2 },
            ]
        );
    }
}
