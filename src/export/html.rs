use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analysis::ranking_engine::{ACTIVITY_CAP, CODE_CAP, INNOVATION_CAP, SOCIAL_CAP};
use crate::error::Result;
use crate::export::{HTML_TOP_LANGUAGES, HTML_TOP_REPOSITORIES};
use crate::models::{non_empty, UserProfile};

const STYLE: &str = concat!(
    "body{font-family:-apple-system,BlinkMacSystemFont,'Segoe UI',Helvetica,Arial,sans-serif;",
    "background:#0d1117;color:#c9d1d9;margin:0;padding:2rem}",
    "main{max-width:960px;margin:0 auto}",
    "header{display:flex;gap:1.5rem;align-items:center;margin-bottom:2rem}",
    "header img{width:96px;height:96px;border-radius:50%}",
    "h1{margin:0;color:#58a6ff}.login{color:#8b949e}",
    ".badge{display:inline-block;padding:.25rem .75rem;border-radius:1rem;",
    "background:#238636;color:#fff;font-weight:600}",
    ".grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));",
    "gap:1rem;margin-bottom:2rem}",
    ".card{background:#161b22;border:1px solid #30363d;border-radius:6px;padding:1rem}",
    ".card .value{font-size:1.5rem;font-weight:600;color:#f0f6fc}",
    ".bar{background:#30363d;border-radius:3px;height:8px}",
    ".bar span{display:block;height:8px;border-radius:3px;background:#58a6ff}",
    "table{width:100%;border-collapse:collapse}",
    "td,th{padding:.4rem;text-align:left;border-bottom:1px solid #30363d}",
);

/// Escapes the five HTML-significant characters.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_html(profile: &UserProfile) -> String {
    let user = &profile.user;
    let stats = &profile.stats;
    let ranking = &profile.ranking;
    let login = escape(&user.login);
    let display = escape(non_empty(&user.name).unwrap_or(&user.login));

    let mut html = String::new();
    let _ = write!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} - GitHub Profile</title>\n<style>{}</style>\n</head>\n<body>\n<main>\n",
        display, STYLE
    );

    let _ = write!(
        html,
        "<header>\n<img src=\"{}\" alt=\"{}\">\n<div>\n<h1>{}</h1>\n\
         <div class=\"login\">@{}</div>\n",
        escape(&user.avatar_url),
        login,
        display,
        login
    );
    if let Some(bio) = non_empty(&user.bio) {
        let _ = writeln!(html, "<p>{}</p>", escape(bio));
    }
    let _ = write!(
        html,
        "<span class=\"badge\">{} &middot; {}</span>\n</div>\n</header>\n",
        escape(&ranking.badge),
        escape(&ranking.overall_rank)
    );

    html.push_str("<section class=\"grid\">\n");
    for (label, value) in [
        ("Total Stars", stats.total_stars.to_string()),
        ("Total Forks", stats.total_forks.to_string()),
        ("Followers", user.followers.to_string()),
        ("Public Repos", user.public_repos.to_string()),
        ("Repository Size", format!("{:.1} MB", stats.total_size_mb())),
        ("Total Score", format!("{:.1}/100", ranking.total_score)),
    ] {
        let _ = writeln!(
            html,
            "<div class=\"card\"><div>{}</div><div class=\"value\">{}</div></div>",
            label, value
        );
    }
    html.push_str("</section>\n");

    html.push_str("<h2>Score Breakdown</h2>\n<table>\n");
    for (label, value, cap) in [
        ("Social", ranking.social_score, SOCIAL_CAP),
        ("Code", ranking.code_score, CODE_CAP),
        ("Activity", ranking.activity_score, ACTIVITY_CAP),
        ("Innovation", ranking.innovation_score, INNOVATION_CAP),
    ] {
        let _ = writeln!(
            html,
            "<tr><th>{}</th><td>{:.1}/{:.0}</td></tr>",
            label, value, cap
        );
    }
    let _ = writeln!(
        html,
        "<tr><th>Percentile</th><td>{:.1}%</td></tr>\n</table>",
        ranking.percentile
    );

    html.push_str("<h2>Top Repositories</h2>\n<section class=\"grid\">\n");
    for repo in profile.showcase_repositories(HTML_TOP_REPOSITORIES) {
        let _ = writeln!(
            html,
            "<div class=\"card\"><strong>{}</strong><p>{}</p>\
             <div>&#9733; {} &middot; forks {} &middot; {}</div></div>",
            escape(&repo.name),
            escape(non_empty(&repo.description).unwrap_or("")),
            repo.stargazers_count,
            repo.forks_count,
            escape(non_empty(&repo.language).unwrap_or("Unknown"))
        );
    }
    html.push_str("</section>\n");

    html.push_str("<h2>Languages</h2>\n<table>\n");
    for lang in profile
        .languages
        .sorted()
        .into_iter()
        .take(HTML_TOP_LANGUAGES)
    {
        let _ = writeln!(
            html,
            "<tr><th>{}</th><td style=\"width:60%\"><div class=\"bar\">\
             <span style=\"width:{:.1}%\"></span></div></td><td>{:.1}%</td></tr>",
            escape(&lang.name),
            lang.percentage,
            lang.percentage
        );
    }
    html.push_str("</table>\n");

    let _ = write!(
        html,
        "<footer><p class=\"login\">Generated {}</p></footer>\n</main>\n</body>\n</html>\n",
        profile.fetched_at.format("%Y-%m-%d %H:%M UTC")
    );
    html
}

/// Writes `<dir>/<login>-profile.html` and returns its absolute path.
pub fn write_html(profile: &UserProfile, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}-profile.html", profile.user.login));
    fs::write(&path, render_html(profile))?;
    tracing::info!("HTML report written to {}", path.display());
    Ok(fs::canonicalize(&path)?)
}
