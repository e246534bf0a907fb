use std::collections::HashMap;

use crate::models::{LanguageBytes, LanguageInfo, LanguageStats, Repository};

/// Merges per-repository language byte maps into profile-wide totals.
///
/// Only public, non-fork repositories are counted. Repositories without an
/// entry in `repo_languages` contribute nothing.
pub fn aggregate_languages(
    repos: &[Repository],
    repo_languages: &HashMap<String, LanguageBytes>,
) -> LanguageStats {
    let mut bytes_by_language: HashMap<String, u64> = HashMap::new();
    let mut repos_by_language: HashMap<String, u32> = HashMap::new();
    let mut total_bytes = 0u64;

    for repo in repos.iter().filter(|r| !r.fork && !r.private) {
        let Some(languages) = repo_languages.get(&repo.name) else {
            continue;
        };
        for (language, bytes) in languages {
            *bytes_by_language.entry(language.clone()).or_insert(0) += bytes;
            *repos_by_language.entry(language.clone()).or_insert(0) += 1;
            total_bytes += bytes;
        }
    }

    let languages = bytes_by_language
        .into_iter()
        .map(|(name, bytes)| {
            let percentage = if total_bytes > 0 {
                bytes as f64 / total_bytes as f64 * 100.0
            } else {
                0.0
            };
            let repo_count = repos_by_language.get(&name).copied().unwrap_or(0);
            (
                name.clone(),
                LanguageInfo {
                    name,
                    bytes,
                    percentage,
                    repo_count,
                },
            )
        })
        .collect();

    LanguageStats {
        total_bytes,
        languages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::tests::repo;

    fn bytes(entries: &[(&str, u64)]) -> LanguageBytes {
        entries.iter().map(|(l, b)| (l.to_string(), *b)).collect()
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let repos = vec![
            repo("a", 0, false, false),
            repo("b", 0, false, false),
            repo("c", 0, false, false),
        ];
        let mut langs = HashMap::new();
        langs.insert("a".to_string(), bytes(&[("Rust", 7000), ("Shell", 333)]));
        langs.insert("b".to_string(), bytes(&[("Rust", 1), ("Go", 2999)]));
        langs.insert("c".to_string(), bytes(&[("Python", 12345)]));

        let stats = aggregate_languages(&repos, &langs);
        assert_eq!(stats.total_bytes, 7000 + 333 + 1 + 2999 + 12345);
        let sum: f64 = stats.languages.values().map(|l| l.percentage).sum();
        assert!((sum - 100.0).abs() <= 0.1, "sum was {}", sum);

        let rust = &stats.languages["Rust"];
        assert_eq!(rust.bytes, 7001);
        assert_eq!(rust.repo_count, 2);
    }

    #[test]
    fn test_forks_and_private_repos_are_skipped() {
        let repos = vec![
            repo("fork", 0, false, true),
            repo("secret", 0, true, false),
            repo("open", 0, false, false),
        ];
        let mut langs = HashMap::new();
        langs.insert("fork".to_string(), bytes(&[("C", 1000)]));
        langs.insert("secret".to_string(), bytes(&[("Java", 1000)]));
        langs.insert("open".to_string(), bytes(&[("Rust", 10)]));

        let stats = aggregate_languages(&repos, &langs);
        assert_eq!(stats.languages.len(), 1);
        assert_eq!(stats.total_bytes, 10);
        assert_eq!(stats.languages["Rust"].percentage, 100.0);
    }

    #[test]
    fn test_no_bytes_means_empty_mapping() {
        let repos = vec![repo("a", 0, false, false)];
        let stats = aggregate_languages(&repos, &HashMap::new());
        assert_eq!(stats.total_bytes, 0);
        assert!(stats.languages.is_empty());
    }
}
