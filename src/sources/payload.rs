//! Wire shapes of the v1.1 REST API responses we read.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::{Author, PostRecord, QuotedPost};

const CREATED_AT_FORMAT: &str = "%a %b %d %H:%M:%S %z %Y";

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub id_str: String,
    #[serde(default)]
    pub full_text: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub user: UserPayload,
    #[serde(default)]
    pub entities: EntitiesPayload,
    #[serde(default)]
    pub quoted_status: Option<Box<QuotedStatusPayload>>,
}

#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub screen_name: String,
    /// `null` when the request was not made in a user context
    #[serde(default)]
    pub following: Option<bool>,
    #[serde(default)]
    pub suspended: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntitiesPayload {
    #[serde(default)]
    pub hashtags: Vec<HashtagEntity>,
    #[serde(default)]
    pub user_mentions: Vec<MentionEntity>,
}

#[derive(Debug, Deserialize)]
pub struct HashtagEntity {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct MentionEntity {
    pub screen_name: String,
}

#[derive(Debug, Deserialize)]
pub struct QuotedStatusPayload {
    pub id_str: String,
    pub user: UserPayload,
    #[serde(default)]
    pub quoted_status_id_str: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub errors: Vec<ApiErrorEntry>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorEntry {
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

fn parse_created_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(value, CREATED_AT_FORMAT)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

impl From<StatusPayload> for PostRecord {
    fn from(payload: StatusPayload) -> Self {
        let text = payload.full_text.or(payload.text).unwrap_or_default();
        let created_at = payload.created_at.as_deref().and_then(parse_created_at);

        let author = Author {
            handle: payload.user.screen_name,
            following: payload.user.following.unwrap_or(false),
        };

        let mentions = payload
            .entities
            .user_mentions
            .into_iter()
            .map(|m| m.screen_name)
            .collect();

        let hashtags = payload
            .entities
            .hashtags
            .into_iter()
            .map(|h| h.text)
            .collect();

        let quoted = payload.quoted_status.map(|q| QuotedPost {
            id: q.id_str,
            author_handle: q.user.screen_name,
            quoted_post_id: q.quoted_status_id_str,
        });

        PostRecord::new(payload.id_str, author)
            .with_text(text)
            .with_created_at(created_at)
            .with_mentions(mentions)
            .with_hashtags(hashtags)
            .with_quoted(quoted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const EXTENDED_STATUS: &str = r#"{
        "created_at": "Wed Oct 10 20:19:24 +0000 2018",
        "id": 1050118621198921728,
        "id_str": "1050118621198921728",
        "full_text": "Giveaway time @alice @bob #NFT #Art",
        "truncated": false,
        "entities": {
            "hashtags": [
                {"text": "NFT", "indices": [26, 30]},
                {"text": "Art", "indices": [31, 35]}
            ],
            "user_mentions": [
                {"screen_name": "alice", "id_str": "1", "indices": [14, 20]},
                {"screen_name": "bob", "id_str": "2", "indices": [21, 25]}
            ]
        },
        "user": {"id_str": "99", "screen_name": "poster", "following": true},
        "is_quote_status": true,
        "quoted_status_id_str": "1049000000000000000",
        "quoted_status": {
            "id_str": "1049000000000000000",
            "user": {"screen_name": "mainaccount", "following": false},
            "quoted_status_id_str": "1048000000000000000"
        }
    }"#;

    #[test]
    fn test_extended_status_to_record() {
        let payload: StatusPayload = serde_json::from_str(EXTENDED_STATUS).unwrap();
        let record = PostRecord::from(payload);

        assert_eq!(record.id, "1050118621198921728");
        assert_eq!(record.text, "Giveaway time @alice @bob #NFT #Art");
        assert_eq!(record.author.handle, "poster");
        assert!(record.author.following);
        assert_eq!(record.mentions, vec!["alice", "bob"]);
        assert_eq!(record.hashtags, vec!["NFT", "Art"]);
        assert_eq!(
            record.created_at,
            Some(Utc.with_ymd_and_hms(2018, 10, 10, 20, 19, 24).unwrap())
        );

        let quoted = record.quoted.unwrap();
        assert_eq!(quoted.id, "1049000000000000000");
        assert_eq!(quoted.author_handle, "mainaccount");
        assert_eq!(quoted.quoted_post_id.as_deref(), Some("1048000000000000000"));
    }

    #[test]
    fn test_minimal_compat_status() {
        let json = r#"{
            "id_str": "5",
            "text": "short",
            "user": {"screen_name": "someone", "following": null}
        }"#;

        let record = PostRecord::from(serde_json::from_str::<StatusPayload>(json).unwrap());
        assert_eq!(record.text, "short");
        assert!(!record.author.following);
        assert!(record.mentions.is_empty());
        assert!(record.hashtags.is_empty());
        assert!(record.quoted.is_none());
        assert!(record.created_at.is_none());
    }

    #[test]
    fn test_unparseable_created_at_is_dropped() {
        assert!(parse_created_at("yesterday").is_none());
    }

    #[test]
    fn test_error_payload() {
        let json = r#"{"errors":[{"code":144,"message":"No status found with that ID."}]}"#;
        let payload: ErrorPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.errors[0].code, 144);
    }
}
