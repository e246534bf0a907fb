use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_LANGUAGE_DELAY_MS: u64 = 50;

#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub api_base_url: String,
    pub language_delay: Duration,
    pub user_agent: String,
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            api_base_url: DEFAULT_API_URL.to_string(),
            language_delay: Duration::from_millis(DEFAULT_LANGUAGE_DELAY_MS),
            user_agent: default_user_agent(),
            output_dir: PathBuf::from("."),
        }
    }
}

fn default_user_agent() -> String {
    format!("ghprofiler/{}", env!("CARGO_PKG_VERSION"))
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let github_token = env::var("GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let api_base_url = env::var("GITHUB_API_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let language_delay = match env::var("PROFILER_LANGUAGE_DELAY_MS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|_| {
                Error::Config(format!(
                    "PROFILER_LANGUAGE_DELAY_MS must be a whole number of milliseconds, got {:?}",
                    raw
                ))
            })?,
            Err(_) => Duration::from_millis(DEFAULT_LANGUAGE_DELAY_MS),
        };

        let user_agent = env::var("PROFILER_USER_AGENT").unwrap_or_else(|_| default_user_agent());

        let output_dir = env::var("PROFILER_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("."));

        Ok(Self {
            github_token,
            api_base_url,
            language_delay,
            user_agent,
            output_dir,
        })
    }

    /// A token given on the command line wins over the environment.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.github_token = Some(token);
        }
        self
    }
}
