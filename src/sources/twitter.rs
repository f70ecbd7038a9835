use std::thread;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::{AccountStatus, PostRecord, TweetMode};
use crate::errors::{FetchError, TweetCheckResult};
use crate::sources::oauth::OAuthSigner;
use crate::sources::payload::{ErrorPayload, StatusPayload, UserPayload};
use crate::sources::traits::PostSource;

/// One rate limit window on the v1.1 API
const MAX_RATE_LIMIT_WAIT: Duration = Duration::from_secs(15 * 60);

// v1.1 API error codes
const CODE_PAGE_NOT_FOUND: i64 = 34;
const CODE_USER_NOT_FOUND: i64 = 50;
const CODE_USER_SUSPENDED: i64 = 63;
const CODE_RATE_LIMITED: i64 = 88;
const CODE_STATUS_NOT_FOUND: i64 = 144;

/// Twitter v1.1 REST client acting as the authenticated account.
pub struct TwitterClient {
    client: Client,
    signer: OAuthSigner,
    base_url: String,
    wait_on_rate_limit: bool,
    max_rate_limit_wait: Duration,
}

impl TwitterClient {
    pub fn new(config: &Config) -> TweetCheckResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FetchError::from)?;

        Ok(Self {
            client,
            signer: OAuthSigner::new(config.credentials.clone()),
            base_url: config.api_base_url.clone(),
            wait_on_rate_limit: config.wait_on_rate_limit,
            max_rate_limit_wait: MAX_RATE_LIMIT_WAIT,
        })
    }

    pub fn with_max_rate_limit_wait(mut self, max: Duration) -> Self {
        self.max_rate_limit_wait = max;
        self
    }

    /// Signed GET; on a rate limit, waits for the reset and retries once when enabled
    fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
        subject: &str,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        let mut waited = false;

        loop {
            let auth = self.signer.authorization_header("GET", &url, params);
            let response = self
                .client
                .get(&url)
                .query(params)
                .header(AUTHORIZATION, auth)
                .send()?;

            let status = response.status().as_u16();
            let reset_at = response
                .headers()
                .get("x-rate-limit-reset")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<i64>().ok());
            let body = response.text()?;

            if (200..300).contains(&status) {
                return serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()));
            }

            match classify_error(status, &body, reset_at, subject) {
                FetchError::RateLimited { reset_at } if self.wait_on_rate_limit && !waited => {
                    let now = chrono::Utc::now().timestamp();
                    let wait = rate_limit_wait(reset_at, now, self.max_rate_limit_wait);
                    warn!(path, wait_secs = wait.as_secs(), "rate limited, waiting for reset");
                    thread::sleep(wait);
                    waited = true;
                }
                err => return Err(err),
            }
        }
    }
}

impl PostSource for TwitterClient {
    fn fetch_post(&self, id: &str, mode: TweetMode) -> Result<PostRecord, FetchError> {
        debug!(id, mode = %mode, "fetching tweet");

        let payload: StatusPayload = self.get(
            "statuses/show.json",
            &[("id", id), ("tweet_mode", mode.as_str())],
            id,
        )?;

        Ok(payload.into())
    }

    fn account_status(&self, handle: &str) -> Result<AccountStatus, FetchError> {
        debug!(handle, "looking up account");

        match self.get::<UserPayload>("users/show.json", &[("screen_name", handle)], handle) {
            Ok(user) if user.suspended == Some(true) => Ok(AccountStatus::Suspended),
            Ok(_) => Ok(AccountStatus::Active),
            Err(FetchError::Suspended(_)) => Ok(AccountStatus::Suspended),
            Err(FetchError::NotFound(_)) => Ok(AccountStatus::NotFound),
            Err(e) => Err(e),
        }
    }
}

/// Map a non-2xx response to a fetch error, preferring the API's own error code
fn classify_error(status: u16, body: &str, reset_at: Option<i64>, subject: &str) -> FetchError {
    let payload: ErrorPayload = serde_json::from_str(body).unwrap_or_default();
    let first = payload.errors.first();

    if let Some(entry) = first {
        match entry.code {
            CODE_STATUS_NOT_FOUND | CODE_PAGE_NOT_FOUND | CODE_USER_NOT_FOUND => {
                return FetchError::NotFound(subject.to_string())
            }
            CODE_USER_SUSPENDED => return FetchError::Suspended(subject.to_string()),
            CODE_RATE_LIMITED => return FetchError::RateLimited { reset_at },
            _ => {}
        }
    }

    match status {
        404 => FetchError::NotFound(subject.to_string()),
        429 => FetchError::RateLimited { reset_at },
        _ => FetchError::Api {
            status,
            message: first
                .map(|e| e.message.clone())
                .unwrap_or_else(|| body.chars().take(200).collect()),
        },
    }
}

/// Time to sleep before retrying; one second of slack past the reset
fn rate_limit_wait(reset_at: Option<i64>, now: i64, max: Duration) -> Duration {
    let wait = match reset_at {
        Some(reset) => Duration::from_secs((reset - now).max(0) as u64 + 1),
        None => Duration::from_secs(60),
    };
    wait.min(max)
}
