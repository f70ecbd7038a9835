use serde::Serialize;
use thiserror::Error;

/// Why a status URL cannot be used.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlError {
    #[error("the link is not a twitter.com URL")]
    DomainMismatch,

    #[error("the link should look like https://twitter.com/<user>/status/<id>")]
    MalformedPath,

    #[error("the link does not point to a tweet status")]
    UnexpectedPathKeyword,
}

/// Result of validating a status URL.
///
/// `author_handle` and `post_id` are only non-empty when the domain was
/// recognized and the path had four segments. `error` is `None` exactly when
/// the URL is fully usable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedUrl {
    pub is_recognized_domain: bool,
    pub author_handle: String,
    pub post_id: String,
    pub error: Option<UrlError>,
}

impl ParsedUrl {
    pub fn unrecognized() -> Self {
        Self {
            is_recognized_domain: false,
            author_handle: String::new(),
            post_id: String::new(),
            error: Some(UrlError::DomainMismatch),
        }
    }

    pub fn rejected(error: UrlError) -> Self {
        Self {
            is_recognized_domain: true,
            author_handle: String::new(),
            post_id: String::new(),
            error: Some(error),
        }
    }

    pub fn is_usable(&self) -> bool {
        self.error.is_none()
    }

    /// Consume into `(handle, post_id)`, or the reason the URL is unusable
    pub fn into_target(self) -> Result<(String, String), UrlError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok((self.author_handle, self.post_id)),
        }
    }
}
