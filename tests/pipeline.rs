use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use ghprofiler::error::{Error, FetchErrorKind, FetchFailure, Result};
use ghprofiler::github::{DemoSource, ProfileSource};
use ghprofiler::models::{GitHubUser, RawProfile, Repository, DEVELOPER_TIERS, LEGACY_TIERS};
use ghprofiler::{ProfilePipeline, RankingStrategy};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
}

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
        created_at: Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()),
    }
}

fn repo(name: &str, stars: u32, private: bool, fork: bool) -> Repository {
    Repository {
        id: 0,
        name: name.to_string(),
        full_name: format!("octo/{}", name),
        description: None,
        language: Some("Go".to_string()),
        stargazers_count: stars,
        forks_count: 0,
        watchers_count: 0,
        size: 10,
        private,
        fork,
        created_at: Some(Utc.with_ymd_and_hms(2022, 3, 1, 0, 0, 0).unwrap()),
        updated_at: Some(now() - Duration::days(3)),
    }
}

fn raw(followers: u32, repositories: Vec<Repository>) -> RawProfile {
    RawProfile {
        user: user(followers),
        repositories,
        repo_languages: HashMap::new(),
    }
}

struct StubSource(RawProfile);

#[async_trait]
impl ProfileSource for StubSource {
    async fn fetch_profile(&self, _username: &str) -> Result<RawProfile> {
        Ok(self.0.clone())
    }

    fn name(&self) -> &str {
        "stub"
    }
}

struct FailingSource;

#[async_trait]
impl ProfileSource for FailingSource {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfile> {
        Err(Error::UserNotFound(username.to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

fn continuous(raw_profile: RawProfile) -> ghprofiler::models::UserProfile {
    ProfilePipeline::new(DemoSource::new(), RankingStrategy::Continuous).compose(raw_profile, now())
}

#[tokio::test]
async fn mixed_visibility_repo_type_counts() {
    let mut repos = Vec::new();
    for i in 0..3 {
        repos.push(repo(&format!("fork-{}", i), 100, false, true));
    }
    for i in 0..2 {
        repos.push(repo(&format!("private-{}", i), 4, true, false));
    }
    for i in 0..5 {
        repos.push(repo(&format!("public-{}", i), 2, false, false));
    }

    let pipeline = ProfilePipeline::new(StubSource(raw(3, repos)), RankingStrategy::Continuous);
    let profile = pipeline.analyze_user("octo").await.unwrap();
    let types = profile.stats.repo_types;

    assert_eq!(types.forks, 3);
    assert_eq!(types.private, 2);
    assert_eq!(types.public, 5);
    assert_eq!(types.total() as usize, profile.repositories.len());
    assert_eq!(profile.stats.total_stars, 18);
    assert_eq!(profile.stats.update_frequency.total(), 7);
}

#[test]
fn zero_followers_scores_lowest_social_band() {
    let profile = continuous(raw(0, vec![repo("solo", 0, false, false)]));
    assert_eq!(profile.ranking.social_score, 2.5);
}

#[test]
fn code_score_from_repo_count_and_stars() {
    let mut repos: Vec<Repository> = (0..40)
        .map(|i| repo(&format!("r{}", i), 0, false, false))
        .collect();
    repos[0].stargazers_count = 50;

    let profile = continuous(raw(0, repos));
    assert_eq!(profile.stats.repo_types.public, 40);
    assert_eq!(profile.stats.total_stars, 50);
    assert_eq!(profile.ranking.code_score, 20.0);
}

#[test]
fn demo_profile_reference_bands() {
    let demo = DemoSource::at(now());
    let pipeline = ProfilePipeline::new(DemoSource::at(now()), RankingStrategy::Continuous);
    let profile = pipeline.compose(demo.profile(), now());
    let r = &profile.ranking;

    assert_eq!(profile.repositories.len(), 8);
    assert_eq!(profile.user.followers, 1250);
    assert_eq!(r.social_score, 20.0);
    assert_eq!(r.code_score, 19.0);
    assert!((r.activity_score - 7.306).abs() < 1e-9);
    assert_eq!(r.innovation_score, 20.0);
    assert_eq!(
        r.total_score,
        r.social_score + r.code_score + r.activity_score + r.innovation_score
    );
    assert_eq!(r.percentile, r.total_score);
    assert_eq!(r.badge, "ACTIVE");
    assert_eq!(DEVELOPER_TIERS.lookup(r.total_score).name, r.overall_rank);
}

#[test]
fn demo_profile_under_legacy_scoring() {
    let demo = DemoSource::at(now());
    let pipeline = ProfilePipeline::new(DemoSource::at(now()), RankingStrategy::Legacy);
    let profile = pipeline.compose(demo.profile(), now());
    let r = &profile.ranking;

    assert_eq!(r.social_score, 18.0);
    assert!(r.code_score <= 30.0 && r.activity_score <= 25.0 && r.innovation_score <= 20.0);
    assert!(LEGACY_TIERS.tiers().iter().any(|t| t.name == r.overall_rank));
}

#[test]
fn language_percentages_sum_to_hundred() {
    let demo = DemoSource::at(now());
    let profile = continuous(demo.profile());
    let sum: f64 = profile
        .languages
        .languages
        .values()
        .map(|l| l.percentage)
        .sum();

    assert!(profile.languages.total_bytes > 0);
    assert!((sum - 100.0).abs() < 0.1);
}

#[test]
fn no_language_data_means_empty_mapping() {
    let profile = continuous(raw(5, vec![repo("bare", 1, false, false)]));
    assert_eq!(profile.languages.total_bytes, 0);
    assert!(profile.languages.languages.is_empty());
}

#[tokio::test]
async fn source_errors_pass_through_unchanged() {
    let pipeline = ProfilePipeline::new(FailingSource, RankingStrategy::Continuous);
    let err = pipeline.analyze_user("nobody").await.unwrap_err();

    assert_eq!(err.kind(), FetchErrorKind::UserNotFound);
    let failure = FetchFailure::from(&err);
    assert_eq!(failure.message, err.to_string());
}
