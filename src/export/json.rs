use serde::Serialize;

use crate::error::Result;
use crate::export::JSON_TOP_REPOSITORIES;
use crate::models::{
    ActivityStats, GitHubUser, LanguageInfo, ProfileStats, RankingInfo, Repository,
    TimelineEntry, UserProfile,
};

/// Borrowed view of a profile shaped for machine consumption.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    pub user: &'a GitHubUser,
    pub stats: &'a ProfileStats,
    pub languages: Vec<&'a LanguageInfo>,
    pub activity: &'a ActivityStats,
    pub ranking: &'a RankingInfo,
    pub top_repositories: Vec<&'a Repository>,
    pub creation_timeline: &'a [TimelineEntry],
}

impl<'a> JsonReport<'a> {
    pub fn new(profile: &'a UserProfile) -> Self {
        Self {
            user: &profile.user,
            stats: &profile.stats,
            languages: profile.languages.sorted(),
            activity: &profile.activity,
            ranking: &profile.ranking,
            top_repositories: profile.showcase_repositories(JSON_TOP_REPOSITORIES),
            creation_timeline: &profile.stats.creation_timeline,
        }
    }
}

pub fn render_json(profile: &UserProfile) -> Result<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::new(profile))?)
}
