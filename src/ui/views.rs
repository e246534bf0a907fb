//! Plain-text layouts for every screen. Nothing here touches the terminal.

use crate::models::{non_empty, UpdateRecency, UserProfile};
use crate::ui::app::ActiveView;

pub const BAR_WIDTH: usize = 20;
pub const REPOSITORY_SLICE: usize = 8;
pub const SPINNER_FRAMES: [&str; 10] = [
    "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
];

const NO_PROFILE: &str = "No profile data available";
const NOT_SPECIFIED: &str = "Not specified";

pub fn render_view(view: ActiveView, profile: Option<&UserProfile>) -> String {
    let Some(profile) = profile else {
        return NO_PROFILE.to_string();
    };

    match view {
        ActiveView::Overview => overview(profile),
        ActiveView::Repositories => repositories(profile),
        ActiveView::Languages => languages(profile),
        ActiveView::Activity => activity(profile),
        ActiveView::Ranking => ranking(profile),
    }
}

fn or_unspecified(value: &Option<String>) -> &str {
    non_empty(value).unwrap_or(NOT_SPECIFIED)
}

pub fn display_name(profile: &UserProfile) -> String {
    format!(
        "{} ({})",
        or_unspecified(&profile.user.name),
        profile.user.login
    )
}

pub fn overview(profile: &UserProfile) -> String {
    let user = &profile.user;
    let stats = &profile.stats;

    let joined = user
        .created_at
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());
    let twitter = non_empty(&user.twitter_username)
        .map(|handle| format!("@{}", handle))
        .unwrap_or_else(|| NOT_SPECIFIED.to_string());

    format!(
        "User: {}\n\
         Bio: {}\n\
         Company: {}\n\
         Location: {}\n\
         Website: {}\n\
         Twitter: {}\n\
         Joined: {}\n\
         Stats: Public Repos: {} | Followers: {} | Following: {}\n\
         \n\
         Total Stars: {}\n\
         Total Forks: {}\n\
         Repository Size: {:.1} MB\n\
         Avg Stars/Repo: {:.1}",
        display_name(profile),
        or_unspecified(&user.bio),
        or_unspecified(&user.company),
        or_unspecified(&user.location),
        or_unspecified(&user.blog),
        twitter,
        joined,
        user.public_repos,
        user.followers,
        user.following,
        stats.total_stars,
        stats.total_forks,
        stats.total_size_mb(),
        stats.avg_stars_per_repo,
    )
}

/// The slice of eight is taken before forks are skipped, so fewer than
/// eight entries appear when forks sit among the first eight.
pub fn repositories(profile: &UserProfile) -> String {
    if profile.repositories.is_empty() {
        return "No repositories found".to_string();
    }

    let entries: Vec<String> = profile
        .repositories
        .iter()
        .take(REPOSITORY_SLICE)
        .enumerate()
        .filter(|(_, repo)| !repo.fork)
        .map(|(i, repo)| {
            let updated = repo
                .updated_at
                .map(|d| d.format("%b %Y").to_string())
                .unwrap_or_else(|| "unknown".to_string());
            format!(
                "{}. {}\n   {}\n   Stars: {}  Forks: {}  Language: {}\n   Updated: {}",
                i + 1,
                repo.name,
                or_unspecified(&repo.description),
                repo.stargazers_count,
                repo.forks_count,
                or_unspecified(&repo.language),
                updated
            )
        })
        .collect();

    entries.join("\n")
}

pub fn language_bar(percentage: f64) -> String {
    let fill = ((percentage / 100.0) * BAR_WIDTH as f64).clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("{}{}", "█".repeat(fill), "░".repeat(BAR_WIDTH - fill))
}

pub fn languages(profile: &UserProfile) -> String {
    let lines: Vec<String> = profile
        .languages
        .sorted()
        .into_iter()
        .filter(|lang| lang.percentage >= 1.0)
        .map(|lang| {
            format!(
                "{:<12} {} {:.1}% ({} repos)",
                lang.name,
                language_bar(lang.percentage),
                lang.percentage,
                lang.repo_count
            )
        })
        .collect();

    if lines.is_empty() {
        return "No language data available".to_string();
    }
    lines.join("\n")
}

pub fn activity(profile: &UserProfile) -> String {
    let freq = &profile.stats.update_frequency;
    let mut out = format!(
        "Contribution Score: {:.1}\nRecent Commits: {}\n\nRepository Update Frequency:\n",
        profile.activity.contribution_score, profile.activity.recent_commits
    );

    for recency in UpdateRecency::ALL {
        out.push_str(&format!(
            "   {}: {} repositories\n",
            recency.label(),
            freq.get(recency)
        ));
    }

    out.push_str("\nRepository Timeline:");
    for entry in &profile.stats.creation_timeline {
        out.push_str(&format!("\n   {}: {} repositories", entry.year, entry.count));
    }
    out
}

fn share(value: f64, cap: f64) -> f64 {
    value / cap * 100.0
}

pub fn ranking(profile: &UserProfile) -> String {
    use crate::analysis::ranking_engine::{ACTIVITY_CAP, CODE_CAP, INNOVATION_CAP, SOCIAL_CAP};

    let r = &profile.ranking;
    format!(
        "BADGE: {}\n\
         \n\
         Overall Rank: {}\n\
         Total Score: {:.1}/100 ({:.1}% percentile)\n\
         \n\
         Score Breakdown:\n\
         Social Score:     {:.1}/25  ({:.1}%)\n\
         Code Score:       {:.1}/30  ({:.1}%)\n\
         Activity Score:   {:.1}/25  ({:.1}%)\n\
         Innovation Score: {:.1}/20  ({:.1}%)",
        r.badge,
        r.overall_rank,
        r.total_score,
        r.percentile,
        r.social_score,
        share(r.social_score, SOCIAL_CAP),
        r.code_score,
        share(r.code_score, CODE_CAP),
        r.activity_score,
        share(r.activity_score, ACTIVITY_CAP),
        r.innovation_score,
        share(r.innovation_score, INNOVATION_CAP),
    )
}

pub fn input_screen(username: &str) -> String {
    format!(
        "Enter GitHub username:\n\n> {}|\n\nPress Enter to analyze - Ctrl+C to quit",
        username
    )
}

pub fn loading_screen(username: &str, frame: usize) -> String {
    format!(
        "{} Fetching GitHub data for {}...",
        SPINNER_FRAMES[frame % SPINNER_FRAMES.len()],
        username
    )
}

pub fn error_screen(message: &str) -> String {
    format!("ERROR\n\n{}\n\nPress 'r' to retry - Ctrl+C to quit", message)
}

pub fn footer() -> &'static str {
    "← → Navigate • r Refresh • q Quit"
}
