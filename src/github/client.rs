use async_trait::async_trait;
use reqwest::{header, Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::github::paginator::Paginator;
use crate::github::rate_limiter::{rate_limit_error, RateLimiter};
use crate::github::source::ProfileSource;
use crate::models::{GitHubUser, LanguageBytes, RawProfile, Repository};

pub struct GitHubClient {
    client: Client,
    rate_limiter: RateLimiter,
    base_url: String,
}

impl GitHubClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = &config.github_token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            header::HeaderValue::from_static("2022-11-28"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_str(&config.user_agent)?,
        );

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            rate_limiter: RateLimiter::new(config.language_delay),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Joins `segments` onto the API base, percent-encoding each one so a
    /// login or repository name can never reach another endpoint.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| Error::Config(format!("Invalid API URL {}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| Error::Config(format!("API URL {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn get_user(&self, username: &str) -> Result<GitHubUser> {
        let url = self.endpoint(&["users", username])?;
        self.rate_limiter.wait().await;
        tracing::info!("Fetching user: {}", username);

        let response = self.client.get(url).send().await?;
        self.rate_limiter.record_response(response.headers()).await;
        let response = check_response(response, username).await?;

        decode(response, username).await
    }

    pub async fn get_user_repos(&self, username: &str) -> Result<Vec<Repository>> {
        let mut url = self.endpoint(&["users", username, "repos"])?;
        url.set_query(Some("type=owner&sort=updated&direction=desc"));
        let paginator = Paginator::new(&self.client, &self.rate_limiter);
        tracing::info!("Fetching repositories for: {}", username);
        paginator.fetch_all(url.as_str(), 100, username).await
    }

    pub async fn get_repo_languages(&self, owner: &str, repo: &str) -> Result<LanguageBytes> {
        let url = self.endpoint(&["repos", owner, repo, "languages"])?;
        let subject = format!("{}/{}", owner, repo);
        self.rate_limiter.wait().await;
        tracing::debug!("Fetching languages for: {}", subject);

        let response = self.client.get(url).send().await?;
        self.rate_limiter.record_response(response.headers()).await;
        let response = check_response(response, &subject).await?;

        decode(response, &subject).await
    }

    /// Language lookups run one at a time, each followed by the configured
    /// pause. A failed lookup is logged and skipped.
    async fn scan_languages(
        &self,
        username: &str,
        repos: &[Repository],
    ) -> HashMap<String, LanguageBytes> {
        let mut repo_languages = HashMap::new();

        for repo in repos.iter().filter(|r| !r.fork && !r.private) {
            match self.get_repo_languages(username, &repo.name).await {
                Ok(languages) => {
                    repo_languages.insert(repo.name.clone(), languages);
                }
                Err(e) => {
                    tracing::warn!("Skipping languages for {}: {}", repo.name, e);
                }
            }
        }

        repo_languages
    }
}

#[async_trait]
impl ProfileSource for GitHubClient {
    async fn fetch_profile(&self, username: &str) -> Result<RawProfile> {
        let username = username.trim();
        let user = self.get_user(username).await?;
        let repositories = self.get_user_repos(username).await?;
        tracing::info!("Found {} repositories for {}", repositories.len(), username);

        let repo_languages = self.scan_languages(username, &repositories).await;

        if let Some(remaining) = self.rate_limiter.remaining().await {
            tracing::debug!(
                "Rate limit remaining: {} (resets in {:?}s)",
                remaining,
                self.rate_limiter.reset_in().await
            );
        }

        Ok(RawProfile {
            user,
            repositories,
            repo_languages,
        })
    }

    fn name(&self) -> &str {
        "github"
    }
}

/// Maps non-success statuses onto the crate error taxonomy.
pub(crate) async fn check_response(response: Response, subject: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        return Err(Error::UserNotFound(subject.to_string()));
    }

    if let Some(err) = rate_limit_error(status, response.headers()) {
        return Err(err);
    }

    let body = response.text().await.unwrap_or_default();
    Err(Error::GitHubApi(format!(
        "Request for {} failed: {} - {}",
        subject, status, body
    )))
}

/// Reads the body and parses it, reporting malformed payloads as
/// `ParseError` rather than as transport failures.
pub(crate) async fn decode<T: DeserializeOwned>(response: Response, subject: &str) -> Result<T> {
    let body = response.text().await?;
    serde_json::from_str(&body)
        .map_err(|e| Error::ParseError(format!("Unexpected response for {}: {}", subject, e)))
}
