use crate::domain::{AccountStatus, PostRecord, TweetMode};
use crate::errors::FetchError;

/// Read access to tweets and accounts, as seen by the authenticated account.
#[cfg_attr(test, mockall::automock)]
pub trait PostSource {
    /// Fetch a single tweet by id
    fn fetch_post(&self, id: &str, mode: TweetMode) -> Result<PostRecord, FetchError>;

    /// Look up whether an account is active, suspended or gone
    fn account_status(&self, handle: &str) -> Result<AccountStatus, FetchError>;
}
