use std::time::Duration;

use crate::errors::{TweetCheckError, TweetCheckResult};

pub const DEFAULT_API_BASE_URL: &str = "https://api.twitter.com/1.1";

/// OAuth 1.0a user-context credentials for the checking account.
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_key_secret: String,
    pub access_token: String,
    pub access_token_secret: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_key_secret", &"<redacted>")
            .field("access_token", &self.access_token)
            .field("access_token_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub credentials: Credentials,
    pub api_base_url: String,
    pub wait_on_rate_limit: bool,
    pub timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> TweetCheckResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup (the process environment in `from_env`)
    pub fn from_lookup<F>(lookup: F) -> TweetCheckResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| TweetCheckError::MissingEnvVar(key.to_string()))
        };

        let credentials = Credentials {
            api_key: required("TWITTER_API_KEY")?,
            api_key_secret: required("TWITTER_API_KEY_SECRET")?,
            access_token: required("TWITTER_ACCESS_TOKEN")?,
            access_token_secret: required("TWITTER_ACCESS_TOKEN_SECRET")?,
        };

        let api_base_url = lookup("TWITTER_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let wait_on_rate_limit = match lookup("TWITTER_WAIT_ON_RATE_LIMIT") {
            Some(v) => parse_bool(&v).ok_or_else(|| {
                TweetCheckError::Config(format!(
                    "TWITTER_WAIT_ON_RATE_LIMIT must be true or false, got '{}'",
                    v
                ))
            })?,
            None => true,
        };

        let timeout_secs = match lookup("TWITTER_TIMEOUT_SECS") {
            Some(v) => v.parse::<u64>().map_err(|_| {
                TweetCheckError::Config(format!(
                    "TWITTER_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                    v
                ))
            })?,
            None => 30,
        };

        Ok(Self {
            credentials,
            api_base_url,
            wait_on_rate_limit,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
