use url::Url;

use crate::domain::{ParsedUrl, UrlError};

pub const TWITTER_DOMAIN: &str = "twitter.com";

/// Path keyword that marks a tweet permalink
const STATUS_SEGMENT: &str = "status";

/// What to do with a `/` at the end of an otherwise valid status path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingSeparator {
    /// Keep it; the extra empty segment makes the path malformed
    #[default]
    Reject,
    /// Drop a single trailing separator before splitting
    Strip,
}

/// Validates status URLs of the form `https://twitter.com/<handle>/status/<id>`.
#[derive(Debug, Clone)]
pub struct UrlValidator {
    domain: String,
    trailing_separator: TrailingSeparator,
}

impl UrlValidator {
    pub fn new() -> Self {
        Self {
            domain: TWITTER_DOMAIN.to_string(),
            trailing_separator: TrailingSeparator::default(),
        }
    }

    pub fn domain(mut self, domain: &str) -> Self {
        self.domain = domain.to_string();
        self
    }

    pub fn trailing_separator(mut self, trailing_separator: TrailingSeparator) -> Self {
        self.trailing_separator = trailing_separator;
        self
    }

    pub fn parse(&self, input: &str) -> ParsedUrl {
        // Anything that isn't an absolute URL has no host to match
        let url = match Url::parse(input) {
            Ok(url) => url,
            Err(_) => return ParsedUrl::unrecognized(),
        };

        // The authority must be the bare domain: no port, no user info
        if url.host_str() != Some(self.domain.as_str())
            || url.port().is_some()
            || !url.username().is_empty()
            || url.password().is_some()
        {
            return ParsedUrl::unrecognized();
        }

        let mut path = url.path();
        if self.trailing_separator == TrailingSeparator::Strip {
            path = path.strip_suffix('/').unwrap_or(path);
        }

        let segments: Vec<&str> = path.split('/').collect();
        let [_, handle, keyword, post_id] = segments.as_slice() else {
            return ParsedUrl::rejected(UrlError::MalformedPath);
        };

        if handle.is_empty() || post_id.is_empty() {
            return ParsedUrl::rejected(UrlError::MalformedPath);
        }

        let error = if *keyword == STATUS_SEGMENT {
            None
        } else {
            Some(UrlError::UnexpectedPathKeyword)
        };

        ParsedUrl {
            is_recognized_domain: true,
            author_handle: handle.to_string(),
            post_id: post_id.to_string(),
            error,
        }
    }
}

impl Default for UrlValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a status URL with the default rules (twitter.com, trailing `/` rejected)
pub fn parse(url: &str) -> ParsedUrl {
    UrlValidator::new().parse(url)
}
