use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::models::ranking::{RankTable, RankingInfo, DEVELOPER_TIERS, LEGACY_TIERS};
use crate::models::{non_empty, ActivityStats, GitHubUser, ProfileStats, Repository};

pub const SOCIAL_CAP: f64 = 25.0;
pub const CODE_CAP: f64 = 30.0;
pub const ACTIVITY_CAP: f64 = 25.0;
pub const INNOVATION_CAP: f64 = 20.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RankingStrategy {
    /// Capped linear formulas over stars, repositories and contributions
    #[default]
    Continuous,
    /// Coarse step tables with profile-completeness bonuses
    Legacy,
}

/// Everything a ranking strategy may look at.
#[derive(Debug, Clone, Copy)]
pub struct RankingInput<'a> {
    pub user: &'a GitHubUser,
    pub repositories: &'a [Repository],
    pub stats: &'a ProfileStats,
    pub activity: &'a ActivityStats,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct SubScores {
    social: f64,
    code: f64,
    activity: f64,
    innovation: f64,
}

impl SubScores {
    fn total(&self) -> f64 {
        self.social + self.code + self.activity + self.innovation
    }
}

pub struct RankingEngine {
    strategy: RankingStrategy,
}

impl RankingEngine {
    pub fn new(strategy: RankingStrategy) -> Self {
        Self { strategy }
    }

    pub fn tier_table(&self) -> &'static RankTable {
        match self.strategy {
            RankingStrategy::Continuous => &DEVELOPER_TIERS,
            RankingStrategy::Legacy => &LEGACY_TIERS,
        }
    }

    pub fn rank(&self, input: &RankingInput<'_>) -> RankingInfo {
        let scores = match self.strategy {
            RankingStrategy::Continuous => {
                continuous_scores(input.user, input.stats, input.activity)
            }
            RankingStrategy::Legacy => legacy_scores(input),
        };

        let total_score = scores.total();
        let percentile = match self.strategy {
            RankingStrategy::Continuous => total_score,
            RankingStrategy::Legacy => legacy_percentile(total_score),
        };
        let tier = self.tier_table().lookup(total_score);

        tracing::debug!(
            "Ranked {} at {:.1} ({}) using {:?} scoring",
            input.user.login,
            total_score,
            tier.badge,
            self.strategy
        );

        RankingInfo {
            overall_rank: tier.name.to_string(),
            badge: tier.badge.to_string(),
            total_score,
            percentile,
            social_score: scores.social,
            code_score: scores.code,
            activity_score: scores.activity,
            innovation_score: scores.innovation,
        }
    }
}

impl Default for RankingEngine {
    fn default() -> Self {
        Self::new(RankingStrategy::default())
    }
}

pub fn continuous_social_score(followers: u32) -> f64 {
    match followers {
        f if f >= 10_000 => 25.0,
        f if f >= 1_000 => 20.0,
        f if f >= 500 => 15.0,
        f if f >= 100 => 10.0,
        f if f >= 50 => 7.5,
        f if f >= 10 => 5.0,
        _ => 2.5,
    }
}

pub fn continuous_code_score(public_repos: u32, total_stars: u64) -> f64 {
    (f64::from(public_repos) * 0.5).min(15.0) + (total_stars as f64 * 0.1).min(15.0)
}

fn continuous_scores(
    user: &GitHubUser,
    stats: &ProfileStats,
    activity: &ActivityStats,
) -> SubScores {
    SubScores {
        social: continuous_social_score(user.followers),
        code: continuous_code_score(stats.repo_types.public, stats.total_stars),
        activity: (activity.contribution_score * 0.01).min(ACTIVITY_CAP),
        innovation: (stats.avg_stars_per_repo * 0.5).min(INNOVATION_CAP),
    }
}

fn legacy_social_score(followers: u32) -> f64 {
    match followers {
        f if f >= 50_000 => 25.0,
        f if f >= 10_000 => 22.0,
        f if f >= 5_000 => 20.0,
        f if f >= 1_000 => 18.0,
        f if f >= 500 => 15.0,
        f if f >= 100 => 12.0,
        f if f >= 50 => 8.0,
        f if f >= 10 => 5.0,
        f => f64::from(f) * 0.5,
    }
}

fn legacy_code_score(stats: &ProfileStats) -> f64 {
    let public = stats.repo_types.public;
    let repo_part = if public > 50 {
        10.0
    } else {
        f64::from(public) * 0.2
    };

    let star_part = match stats.total_stars {
        s if s >= 10_000 => 15.0,
        s if s >= 1_000 => 12.0,
        s if s >= 100 => 8.0,
        s => s as f64 * 0.08,
    };

    let avg_part = if stats.avg_stars_per_repo >= 50.0 {
        5.0
    } else {
        stats.avg_stars_per_repo * 0.1
    };

    (repo_part + star_part + avg_part).min(CODE_CAP)
}

fn legacy_activity_score(stats: &ProfileStats, activity: &ActivityStats) -> f64 {
    let commit_part = if activity.recent_commits >= 100 {
        15.0
    } else {
        f64::from(activity.recent_commits) * 0.15
    };

    let owned = stats.repo_types.owned();
    let freshness_part = if owned > 0 {
        let fresh = stats.update_frequency.weekly + stats.update_frequency.monthly;
        f64::from(fresh) / f64::from(owned) * 10.0
    } else {
        0.0
    };

    (commit_part + freshness_part).min(ACTIVITY_CAP)
}

fn legacy_innovation_score(input: &RankingInput<'_>) -> f64 {
    let user = input.user;
    let mut score = 0.0;

    if let Some(created) = user.created_at {
        let years = (input.now - created).num_hours() as f64 / (24.0 * 365.0);
        score += years.clamp(0.0, 5.0);
    }

    let languages: HashSet<&str> = input
        .repositories
        .iter()
        .filter(|r| !r.fork)
        .filter_map(|r| non_empty(&r.language))
        .collect();
    score += (languages.len() as f64).min(8.0);

    for (field, bonus) in [
        (&user.bio, 2.0),
        (&user.company, 1.0),
        (&user.location, 1.0),
        (&user.blog, 2.0),
        (&user.email, 1.0),
    ] {
        if non_empty(field).is_some() {
            score += bonus;
        }
    }

    score.min(INNOVATION_CAP)
}

fn legacy_scores(input: &RankingInput<'_>) -> SubScores {
    SubScores {
        social: legacy_social_score(input.user.followers),
        code: legacy_code_score(input.stats),
        activity: legacy_activity_score(input.stats, input.activity),
        innovation: legacy_innovation_score(input),
    }
}

fn legacy_percentile(score: f64) -> f64 {
    match score {
        s if s >= 95.0 => 99.5,
        s if s >= 90.0 => 95.0,
        s if s >= 80.0 => 85.0,
        s if s >= 70.0 => 70.0,
        s if s >= 60.0 => 55.0,
        s if s >= 50.0 => 40.0,
        s if s >= 40.0 => 25.0,
        s if s >= 30.0 => 15.0,
        s => s * 0.5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RepoTypeCounts;
    use chrono::TimeZone;
    use rand::Rng;

    fn user(followers: u32) -> GitHubUser {
        GitHubUser {
            login: "octo".to_string(),
            id: 1,
            name: None,
            email: None,
            avatar_url: String::new(),
            bio: None,
            company: None,
            location: None,
            blog: None,
            twitter_username: None,
            public_repos: 0,
            followers,
            following: 0,
            created_at: None,
        }
    }

    fn stats(public: u32, total_stars: u64, avg: f64) -> ProfileStats {
        ProfileStats {
            total_stars,
            avg_stars_per_repo: avg,
            repo_types: RepoTypeCounts {
                public,
                private: 0,
                forks: 0,
            },
            ..ProfileStats::default()
        }
    }

    fn rank(
        strategy: RankingStrategy,
        user: &GitHubUser,
        stats: &ProfileStats,
        activity: &ActivityStats,
    ) -> RankingInfo {
        RankingEngine::new(strategy).rank(&RankingInput {
            user,
            repositories: &[],
            stats,
            activity,
            now: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        })
    }

    #[test]
    fn test_social_breakpoints() {
        assert_eq!(continuous_social_score(0), 2.5);
        assert_eq!(continuous_social_score(9), 2.5);
        assert_eq!(continuous_social_score(10), 5.0);
        assert_eq!(continuous_social_score(50), 7.5);
        assert_eq!(continuous_social_score(100), 10.0);
        assert_eq!(continuous_social_score(500), 15.0);
        assert_eq!(continuous_social_score(1_000), 20.0);
        assert_eq!(continuous_social_score(1_250), 20.0);
        assert_eq!(continuous_social_score(10_000), 25.0);
    }

    #[test]
    fn test_zero_followers_gets_lowest_band() {
        let info = rank(
            RankingStrategy::Continuous,
            &user(0),
            &ProfileStats::default(),
            &ActivityStats::default(),
        );
        assert_eq!(info.social_score, 2.5);
        assert_eq!(info.total_score, 2.5);
        assert_eq!(info.badge, "BEGINNER");
    }

    #[test]
    fn test_code_score_caps_each_half() {
        assert_eq!(continuous_code_score(40, 50), 20.0);
        assert_eq!(continuous_code_score(1000, 1_000_000), 30.0);
        assert_eq!(continuous_code_score(0, 0), 0.0);
    }

    #[test]
    fn test_percentile_equals_total() {
        let activity = ActivityStats {
            contribution_score: 730.6,
            recent_commits: 0,
        };
        let info = rank(
            RankingStrategy::Continuous,
            &user(1250),
            &stats(8, 946, 118.25),
            &activity,
        );
        assert_eq!(info.percentile, info.total_score);
        assert_eq!(info.innovation_score, 20.0);
        assert!((info.activity_score - 7.306).abs() < 1e-9);
    }

    #[test]
    fn test_random_inputs_respect_caps() {
        let mut rng = rand::thread_rng();
        for strategy in [RankingStrategy::Continuous, RankingStrategy::Legacy] {
            for _ in 0..2_000 {
                let activity = ActivityStats {
                    contribution_score: rng.gen_range(0.0..100_000.0),
                    recent_commits: rng.gen_range(0..500),
                };
                let mut s = stats(
                    rng.gen_range(0..300),
                    rng.gen_range(0..200_000),
                    rng.gen_range(0.0..5_000.0),
                );
                s.update_frequency.weekly = rng.gen_range(0..=s.repo_types.public);
                let info = rank(strategy, &user(rng.gen_range(0..200_000)), &s, &activity);

                assert!(info.social_score >= 0.0 && info.social_score <= SOCIAL_CAP);
                assert!(info.code_score >= 0.0 && info.code_score <= CODE_CAP);
                assert!(info.activity_score >= 0.0 && info.activity_score <= ACTIVITY_CAP);
                assert!(info.innovation_score >= 0.0 && info.innovation_score <= INNOVATION_CAP);
                assert_eq!(
                    info.total_score,
                    info.social_score
                        + info.code_score
                        + info.activity_score
                        + info.innovation_score
                );
                assert!(info.total_score <= 100.0);
            }
        }
    }

    #[test]
    fn test_legacy_rewards_profile_completeness() {
        let mut complete = user(0);
        complete.bio = Some("Rustacean".to_string());
        complete.blog = Some("https://example.dev".to_string());
        complete.email = Some("octo@example.dev".to_string());
        complete.company = Some(String::new());

        let info = rank(
            RankingStrategy::Legacy,
            &complete,
            &ProfileStats::default(),
            &ActivityStats::default(),
        );
        assert_eq!(info.innovation_score, 5.0);
        assert_eq!(info.social_score, 0.0);
    }

    #[test]
    fn test_legacy_percentile_steps() {
        assert_eq!(legacy_percentile(96.0), 99.5);
        assert_eq!(legacy_percentile(72.0), 70.0);
        assert_eq!(legacy_percentile(10.0), 5.0);
    }
}
