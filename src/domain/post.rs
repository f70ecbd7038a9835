use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How much of the tweet text the API should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TweetMode {
    /// Full text, untruncated
    Extended,
    /// Legacy 140-character view
    Compat,
}

impl TweetMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TweetMode::Extended => "extended",
            TweetMode::Compat => "compat",
        }
    }
}

impl std::fmt::Display for TweetMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub handle: String,
    /// Whether this author follows the authenticated account
    pub following: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedPost {
    pub id: String,
    pub author_handle: String,
    /// Id of the tweet that the quoted tweet itself quotes
    pub quoted_post_id: Option<String>,
}

/// A fetched tweet, read-only for the rest of a check session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub text: String,
    pub created_at: Option<DateTime<Utc>>,
    pub author: Author,
    pub mentions: Vec<String>,
    pub hashtags: Vec<String>,
    pub quoted: Option<QuotedPost>,
}

impl PostRecord {
    pub fn new(id: String, author: Author) -> Self {
        Self {
            id,
            text: String::new(),
            created_at: None,
            author,
            mentions: Vec::new(),
            hashtags: Vec::new(),
            quoted: None,
        }
    }

    pub fn with_text(mut self, text: String) -> Self {
        self.text = text;
        self
    }

    pub fn with_created_at(mut self, created_at: Option<DateTime<Utc>>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn with_mentions(mut self, mentions: Vec<String>) -> Self {
        self.mentions = mentions;
        self
    }

    pub fn with_hashtags(mut self, hashtags: Vec<String>) -> Self {
        self.hashtags = hashtags;
        self
    }

    pub fn with_quoted(mut self, quoted: Option<QuotedPost>) -> Self {
        self.quoted = quoted;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    NotFound,
}
