use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::collections::HashMap;

use crate::error::Result;
use crate::github::source::ProfileSource;
use crate::models::{GitHubUser, LanguageBytes, RawProfile, Repository};

pub const DEMO_LOGIN: &str = "demo-user";

struct DemoRepo {
    name: &'static str,
    description: &'static str,
    language: &'static str,
    stars: u32,
    forks: u32,
    size: u64,
    created_year: i32,
    updated_days_ago: i64,
    languages: &'static [(&'static str, u64)],
}

const DEMO_REPOS: [DemoRepo; 8] = [
    DemoRepo {
        name: "awesome-web-app",
        description: "A modern web application built with React and Node.js",
        language: "JavaScript",
        stars: 324,
        forks: 89,
        size: 4264,
        created_year: 2019,
        updated_days_ago: 2,
        languages: &[("JavaScript", 32000), ("HTML", 4100), ("CSS", 2900)],
    },
    DemoRepo {
        name: "ml-algorithms",
        description: "Collection of machine learning algorithms implemented in Python",
        language: "Python",
        stars: 189,
        forks: 45,
        size: 2914,
        created_year: 2019,
        updated_days_ago: 12,
        languages: &[("Python", 30750)],
    },
    DemoRepo {
        name: "go-microservice",
        description: "High-performance microservice written in Go",
        language: "Go",
        stars: 156,
        forks: 32,
        size: 2584,
        created_year: 2020,
        updated_days_ago: 25,
        languages: &[("Go", 15600), ("Dockerfile", 400)],
    },
    DemoRepo {
        name: "rust-cli-tool",
        description: "Fast command-line tool built with Rust",
        language: "Rust",
        stars: 98,
        forks: 21,
        size: 2004,
        created_year: 2021,
        updated_days_ago: 40,
        languages: &[("Rust", 11550)],
    },
    DemoRepo {
        name: "typescript-lib",
        description: "Type-safe utility library for TypeScript projects",
        language: "TypeScript",
        stars: 67,
        forks: 15,
        size: 1694,
        created_year: 2021,
        updated_days_ago: 75,
        languages: &[("TypeScript", 19200)],
    },
    DemoRepo {
        name: "data-visualization",
        description: "Interactive data visualization dashboard",
        language: "JavaScript",
        stars: 45,
        forks: 12,
        size: 1474,
        created_year: 2022,
        updated_days_ago: 120,
        languages: &[("JavaScript", 14200), ("HTML", 1800)],
    },
    DemoRepo {
        name: "api-gateway",
        description: "Scalable API gateway service",
        language: "Go",
        stars: 38,
        forks: 8,
        size: 1404,
        created_year: 2023,
        updated_days_ago: 200,
        languages: &[("Go", 7500), ("Shell", 600)],
    },
    DemoRepo {
        name: "mobile-app",
        description: "Cross-platform mobile app built with Flutter",
        language: "Dart",
        stars: 29,
        forks: 6,
        size: 1314,
        created_year: 2023,
        updated_days_ago: 400,
        languages: &[("Dart", 7650)],
    },
];

/// Offline source returning a fixed synthetic profile regardless of username.
#[derive(Debug, Clone, Default)]
pub struct DemoSource {
    now: Option<DateTime<Utc>>,
}

impl DemoSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins the instant update timestamps are measured back from.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    pub fn profile(&self) -> RawProfile {
        let now = self.now.unwrap_or_else(Utc::now);

        let user = GitHubUser {
            login: DEMO_LOGIN.to_string(),
            id: 0,
            name: Some("Demo Developer".to_string()),
            email: None,
            avatar_url: String::new(),
            bio: Some(
                "Full-stack developer passionate about open source and clean code".to_string(),
            ),
            company: Some("TechCorp Solutions".to_string()),
            location: Some("San Francisco, CA".to_string()),
            blog: Some("https://demo-developer.dev".to_string()),
            twitter_username: Some("demo_dev".to_string()),
            public_repos: 45,
            followers: 1250,
            following: 180,
            created_at: Utc.with_ymd_and_hms(2018, 3, 15, 0, 0, 0).single(),
        };

        let mut repositories = Vec::with_capacity(DEMO_REPOS.len());
        let mut repo_languages: HashMap<String, LanguageBytes> = HashMap::new();

        for (idx, demo) in DEMO_REPOS.iter().enumerate() {
            repositories.push(Repository {
                id: idx as u64 + 1,
                name: demo.name.to_string(),
                full_name: format!("{}/{}", DEMO_LOGIN, demo.name),
                description: Some(demo.description.to_string()),
                language: Some(demo.language.to_string()),
                stargazers_count: demo.stars,
                forks_count: demo.forks,
                watchers_count: demo.stars,
                size: demo.size,
                private: false,
                fork: false,
                created_at: Utc.with_ymd_and_hms(demo.created_year, 1, 1, 0, 0, 0).single(),
                updated_at: Some(now - Duration::days(demo.updated_days_ago)),
            });
            repo_languages.insert(
                demo.name.to_string(),
                demo.languages
                    .iter()
                    .map(|(lang, bytes)| (lang.to_string(), *bytes))
                    .collect(),
            );
        }

        RawProfile {
            user,
            repositories,
            repo_languages,
        }
    }
}

#[async_trait]
impl ProfileSource for DemoSource {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfile> {
        tracing::info!("Serving demo profile (requested: {})", username);
        Ok(self.profile())
    }

    fn name(&self) -> &str {
        "demo"
    }
}
