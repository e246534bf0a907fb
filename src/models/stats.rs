use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoType {
    Public,
    Private,
    Forks,
}

impl RepoType {
    pub const ALL: [RepoType; 3] = [RepoType::Public, RepoType::Private, RepoType::Forks];
}

/// Fixed-size count per `RepoType`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoTypeCounts {
    pub public: u32,
    pub private: u32,
    pub forks: u32,
}

impl RepoTypeCounts {
    pub fn get(&self, repo_type: RepoType) -> u32 {
        match repo_type {
            RepoType::Public => self.public,
            RepoType::Private => self.private,
            RepoType::Forks => self.forks,
        }
    }

    pub fn increment(&mut self, repo_type: RepoType) {
        match repo_type {
            RepoType::Public => self.public += 1,
            RepoType::Private => self.private += 1,
            RepoType::Forks => self.forks += 1,
        }
    }

    pub fn total(&self) -> u32 {
        RepoType::ALL.iter().map(|t| self.get(*t)).sum()
    }

    /// Public plus private, i.e. every repository that is not a fork.
    pub fn owned(&self) -> u32 {
        self.public + self.private
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UpdateRecency {
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
    Stale,
}

impl UpdateRecency {
    pub const ALL: [UpdateRecency; 5] = [
        UpdateRecency::Weekly,
        UpdateRecency::Monthly,
        UpdateRecency::Quarterly,
        UpdateRecency::Yearly,
        UpdateRecency::Stale,
    ];

    /// Inclusive upper bounds: 7, 30, 90, 365 days.
    pub fn from_days(days: i64) -> Self {
        match days {
            d if d <= 7 => UpdateRecency::Weekly,
            d if d <= 30 => UpdateRecency::Monthly,
            d if d <= 90 => UpdateRecency::Quarterly,
            d if d <= 365 => UpdateRecency::Yearly,
            _ => UpdateRecency::Stale,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UpdateRecency::Weekly => "Weekly",
            UpdateRecency::Monthly => "Monthly",
            UpdateRecency::Quarterly => "Quarterly",
            UpdateRecency::Yearly => "Yearly",
            UpdateRecency::Stale => "Stale (>1 year)",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecencyCounts {
    pub weekly: u32,
    pub monthly: u32,
    pub quarterly: u32,
    pub yearly: u32,
    pub stale: u32,
}

impl RecencyCounts {
    pub fn get(&self, recency: UpdateRecency) -> u32 {
        match recency {
            UpdateRecency::Weekly => self.weekly,
            UpdateRecency::Monthly => self.monthly,
            UpdateRecency::Quarterly => self.quarterly,
            UpdateRecency::Yearly => self.yearly,
            UpdateRecency::Stale => self.stale,
        }
    }

    pub fn increment(&mut self, recency: UpdateRecency) {
        match recency {
            UpdateRecency::Weekly => self.weekly += 1,
            UpdateRecency::Monthly => self.monthly += 1,
            UpdateRecency::Quarterly => self.quarterly += 1,
            UpdateRecency::Yearly => self.yearly += 1,
            UpdateRecency::Stale => self.stale += 1,
        }
    }

    pub fn total(&self) -> u32 {
        UpdateRecency::ALL.iter().map(|r| self.get(*r)).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub year: i32,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileStats {
    pub total_stars: u64,
    pub total_forks: u64,
    pub total_size_kb: u64,
    pub avg_stars_per_repo: f64,
    pub repo_types: RepoTypeCounts,
    pub update_frequency: RecencyCounts,
    pub creation_timeline: Vec<TimelineEntry>,
}

impl ProfileStats {
    pub fn total_size_mb(&self) -> f64 {
        self.total_size_kb as f64 / 1024.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageInfo {
    pub name: String,
    pub bytes: u64,
    pub percentage: f64,
    pub repo_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageStats {
    pub total_bytes: u64,
    pub languages: HashMap<String, LanguageInfo>,
}

impl LanguageStats {
    /// Languages by descending percentage; ties broken by name.
    pub fn sorted(&self) -> Vec<&LanguageInfo> {
        let mut langs: Vec<&LanguageInfo> = self.languages.values().collect();
        langs.sort_by(|a, b| {
            b.percentage
                .total_cmp(&a.percentage)
                .then_with(|| a.name.cmp(&b.name))
        });
        langs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivityStats {
    pub contribution_score: f64,
    pub recent_commits: u32,
}
