use crate::models::{ActivityStats, Repository};

const STAR_WEIGHT: f64 = 0.5;
const FORK_WEIGHT: f64 = 0.3;
const WATCHER_WEIGHT: f64 = 0.2;

/// Activity derived from repository metadata. Commit history is not mined,
/// so `recent_commits` stays at zero.
pub fn calculate_activity(repos: &[Repository]) -> ActivityStats {
    let contribution_score = repos
        .iter()
        .filter(|r| !r.fork)
        .map(|r| {
            f64::from(r.stargazers_count) * STAR_WEIGHT
                + f64::from(r.forks_count) * FORK_WEIGHT
                + f64::from(r.watchers_count) * WATCHER_WEIGHT
        })
        .sum();

    ActivityStats {
        contribution_score,
        recent_commits: 0,
    }
}
