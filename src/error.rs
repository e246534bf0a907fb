use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("GitHub API error: {0}")]
    GitHubApi(String),

    #[error("Rate limit exceeded, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
}

pub type Result<T> = std::result::Result<T, Error>;

/// The four failure classes a profile fetch can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FetchErrorKind {
    UserNotFound,
    RateLimited,
    NetworkFailure,
    Unknown,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchErrorKind::UserNotFound => write!(f, "User not found"),
            FetchErrorKind::RateLimited => write!(f, "Rate limited"),
            FetchErrorKind::NetworkFailure => write!(f, "Network failure"),
            FetchErrorKind::Unknown => write!(f, "Unknown error"),
        }
    }
}

impl Error {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Error::UserNotFound(_) => FetchErrorKind::UserNotFound,
            Error::RateLimited(_) => FetchErrorKind::RateLimited,
            Error::Network(_) | Error::Io(_) => FetchErrorKind::NetworkFailure,
            _ => FetchErrorKind::Unknown,
        }
    }
}

/// Display-ready copy of a fetch error, held by the UI after the
/// originating `Error` has been consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub kind: FetchErrorKind,
    pub message: String,
}

impl From<&Error> for FetchFailure {
    fn from(err: &Error) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl From<Error> for FetchFailure {
    fn from(err: Error) -> Self {
        Self::from(&err)
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::UserNotFound("ghost".into()).kind(),
            FetchErrorKind::UserNotFound
        );
        assert_eq!(Error::RateLimited(30).kind(), FetchErrorKind::RateLimited);
        assert_eq!(
            Error::GitHubApi("500".into()).kind(),
            FetchErrorKind::Unknown
        );
        assert_eq!(
            Error::Io(std::io::Error::other("reset")).kind(),
            FetchErrorKind::NetworkFailure
        );
    }

    #[test]
    fn test_failure_keeps_message_verbatim() {
        let failure = FetchFailure::from(Error::UserNotFound("ghost".into()));
        assert_eq!(failure.kind, FetchErrorKind::UserNotFound);
        assert_eq!(failure.message, "User not found: ghost");
        assert_eq!(failure.to_string(), "User not found: ghost");
    }
}
