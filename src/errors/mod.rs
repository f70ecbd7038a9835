use thiserror::Error;

use crate::domain::UrlError;

#[derive(Error, Debug)]
pub enum TweetCheckError {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    // URL errors
    #[error("Invalid tweet URL: {0}")]
    InvalidUrl(UrlError),

    // Network errors
    #[error("Could not fetch tweet: {0}")]
    Fetch(#[from] FetchError),

    // Task errors
    #[error("Task check failed: {0}")]
    Evaluation(#[from] EvaluationError),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<UrlError> for TweetCheckError {
    fn from(err: UrlError) -> Self {
        TweetCheckError::InvalidUrl(err)
    }
}

/// Failures while talking to the Twitter API.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Account suspended: {0}")]
    Suspended(String),

    #[error("Rate limit exceeded")]
    RateLimited {
        /// Unix timestamp at which the limit window resets, when the API sent one
        reset_at: Option<i64>,
    },

    #[error("HTTP request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected API response: {0}")]
    Decode(String),
}

/// A task could not be evaluated at all, as opposed to evaluating to "incomplete".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Tweet record is missing field `{0}`")]
    MissingField(&'static str),
}

pub type TweetCheckResult<T> = Result<T, TweetCheckError>;
