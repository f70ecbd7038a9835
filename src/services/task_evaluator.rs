use std::collections::HashSet;

use tracing::{debug, info};

use crate::domain::{AccountStatus, PostRecord, TaskData, TaskError, TaskResult, TweetMode};
use crate::errors::{EvaluationError, FetchError};
use crate::sources::PostSource;

/// Which id of the quoted tweet a quote check compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteMatch {
    /// The id the quoted tweet itself quotes (`quoted_status.quoted_status_id_str`)
    #[default]
    NestedQuotedId,
    /// The quoted tweet's own id
    QuotedPostId,
}

/// Runs task checks against one tweet, fetched once at construction.
#[derive(Debug, Clone)]
pub struct TaskEvaluator {
    handle: String,
    post: PostRecord,
    quote_match: QuoteMatch,
}

impl TaskEvaluator {
    /// Fetch the tweet (full text) and build an evaluator around it
    pub fn create<S: PostSource + ?Sized>(
        source: &S,
        handle: &str,
        post_id: &str,
    ) -> Result<Self, FetchError> {
        let post = source.fetch_post(post_id, TweetMode::Extended)?;
        info!(handle, post_id, author = %post.author.handle, "fetched tweet for task checks");

        Ok(Self::from_record(handle, post))
    }

    pub fn from_record(handle: &str, post: PostRecord) -> Self {
        Self {
            handle: handle.to_string(),
            post,
            quote_match: QuoteMatch::default(),
        }
    }

    pub fn with_quote_match(mut self, quote_match: QuoteMatch) -> Self {
        self.quote_match = quote_match;
        self
    }

    /// Handle taken from the status URL
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn post(&self) -> &PostRecord {
        &self.post
    }

    /// Passes when the tweet mentions at least `min_count` accounts.
    ///
    /// Counts every mention the API reports, suspended accounts included.
    pub fn check_mention_count(&self, min_count: usize) -> TaskResult {
        let mentions = self.post.mentions.clone();
        let passed = mentions.len() >= min_count;

        TaskResult::from_check(
            passed,
            TaskError::InsufficientMentions,
            TaskData::Mentions { handles: mentions },
        )
    }

    /// Like [`check_mention_count`](Self::check_mention_count) but only counts
    /// distinct accounts that are still active. Makes one lookup per account.
    pub fn check_active_mention_count<S: PostSource + ?Sized>(
        &self,
        source: &S,
        min_count: usize,
    ) -> Result<TaskResult, FetchError> {
        let mut seen = HashSet::new();
        let mut active = Vec::new();

        for handle in &self.post.mentions {
            if !seen.insert(handle.to_lowercase()) {
                continue;
            }

            let status = source.account_status(handle)?;
            debug!(handle = %handle, ?status, "mentioned account status");
            if status == AccountStatus::Active {
                active.push(handle.clone());
            }
        }

        let passed = active.len() >= min_count;
        Ok(TaskResult::from_check(
            passed,
            TaskError::InsufficientMentions,
            TaskData::Mentions { handles: active },
        ))
    }

    /// Passes when the tweet carries `hashtag`, ignoring case.
    pub fn check_hashtag(&self, hashtag: &str) -> TaskResult {
        let tags: Vec<String> = self.post.hashtags.iter().map(|t| t.to_lowercase()).collect();
        let passed = tags.contains(&hashtag.to_lowercase());

        TaskResult::from_check(passed, TaskError::HashtagNotFound, TaskData::Hashtags { tags })
    }

    /// Passes when the tweet quotes a tweet by `expected_author` whose compared id
    /// (see [`QuoteMatch`]) equals `expected_quoted_post_id`.
    pub fn check_quote_target(
        &self,
        expected_author: &str,
        expected_quoted_post_id: &str,
    ) -> Result<TaskResult, EvaluationError> {
        let Some(quoted) = &self.post.quoted else {
            return Ok(TaskResult::incomplete(
                TaskError::NoQuotedPost,
                TaskData::Quote {
                    quoted_author: None,
                    quoted_id: None,
                },
            ));
        };

        let quoted_id = match self.quote_match {
            QuoteMatch::NestedQuotedId => quoted
                .quoted_post_id
                .clone()
                .ok_or(EvaluationError::MissingField("quoted_status.quoted_status_id_str"))?,
            QuoteMatch::QuotedPostId => quoted.id.clone(),
        };

        let passed = quoted.author_handle == expected_author && quoted_id == expected_quoted_post_id;

        Ok(TaskResult::from_check(
            passed,
            TaskError::QuoteMismatch,
            TaskData::Quote {
                quoted_author: Some(quoted.author_handle.clone()),
                quoted_id: Some(quoted_id),
            },
        ))
    }

    /// Passes when the tweet's author follows the authenticated account.
    pub fn check_follow_back(&self) -> TaskResult {
        TaskResult::from_check(self.post.author.following, TaskError::NotFollowing, TaskData::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Author, QuotedPost};
    use crate::sources::MockPostSource;
    use mockall::predicate::eq;

    fn record() -> PostRecord {
        PostRecord::new(
            "100".to_string(),
            Author {
                handle: "poster".to_string(),
                following: false,
            },
        )
    }

    fn mentions(handles: &[&str]) -> Vec<String> {
        handles.iter().map(|h| h.to_string()).collect()
    }

    fn quoted(author: &str, id: &str, nested: Option<&str>) -> Option<QuotedPost> {
        Some(QuotedPost {
            id: id.to_string(),
            author_handle: author.to_string(),
            quoted_post_id: nested.map(|n| n.to_string()),
        })
    }

    #[test]
    fn test_create_fetches_extended_tweet() {
        let mut source = MockPostSource::new();
        source
            .expect_fetch_post()
            .with(eq("100"), eq(TweetMode::Extended))
            .times(1)
            .returning(|_, _| Ok(record()));

        let evaluator = TaskEvaluator::create(&source, "poster", "100").unwrap();
        assert_eq!(evaluator.handle(), "poster");
        assert_eq!(evaluator.post().id, "100");
    }

    #[test]
    fn test_create_propagates_fetch_error() {
        let mut source = MockPostSource::new();
        source
            .expect_fetch_post()
            .returning(|id, _| Err(FetchError::NotFound(id.to_string())));

        let err = TaskEvaluator::create(&source, "poster", "404").unwrap_err();
        assert!(matches!(err, FetchError::NotFound(ref id) if id == "404"));
    }

    #[test]
    fn test_create_propagates_suspended_author() {
        let mut source = MockPostSource::new();
        source
            .expect_fetch_post()
            .returning(|id, _| Err(FetchError::Suspended(id.to_string())));

        assert!(matches!(
            TaskEvaluator::create(&source, "poster", "1"),
            Err(FetchError::Suspended(_))
        ));
    }

    #[test]
    fn test_mention_count_met() {
        let post = record().with_mentions(mentions(&["alice", "bob"]));
        let result = TaskEvaluator::from_record("poster", post).check_mention_count(2);

        assert!(result.task_complete);
        assert_eq!(result.error, None);
        assert_eq!(
            result.data,
            TaskData::Mentions {
                handles: mentions(&["alice", "bob"])
            }
        );
    }

    #[test]
    fn test_mention_count_short() {
        let post = record().with_mentions(mentions(&["alice"]));
        let result = TaskEvaluator::from_record("poster", post).check_mention_count(2);

        assert!(!result.task_complete);
        assert_eq!(result.error, Some(TaskError::InsufficientMentions));
    }

    #[test]
    fn test_mention_count_zero_always_passes() {
        let result = TaskEvaluator::from_record("poster", record()).check_mention_count(0);
        assert!(result.task_complete);
    }

    #[test]
    fn test_mention_count_counts_repeats() {
        let post = record().with_mentions(mentions(&["alice", "alice"]));
        let result = TaskEvaluator::from_record("poster", post).check_mention_count(2);
        assert!(result.task_complete);
    }

    #[test]
    fn test_active_mentions_skip_suspended_and_repeats() {
        let post = record().with_mentions(mentions(&["alice", "spammer", "Alice", "bob"]));
        let evaluator = TaskEvaluator::from_record("poster", post);

        let mut source = MockPostSource::new();
        source
            .expect_account_status()
            .with(eq("alice"))
            .times(1)
            .returning(|_| Ok(AccountStatus::Active));
        source
            .expect_account_status()
            .with(eq("spammer"))
            .times(1)
            .returning(|_| Ok(AccountStatus::Suspended));
        source
            .expect_account_status()
            .with(eq("bob"))
            .times(1)
            .returning(|_| Ok(AccountStatus::NotFound));

        let result = evaluator.check_active_mention_count(&source, 2).unwrap();
        assert!(!result.task_complete);
        assert_eq!(result.error, Some(TaskError::InsufficientMentions));
        assert_eq!(
            result.data,
            TaskData::Mentions {
                handles: mentions(&["alice"])
            }
        );
    }

    #[test]
    fn test_active_mentions_lookup_error() {
        let post = record().with_mentions(mentions(&["alice"]));
        let evaluator = TaskEvaluator::from_record("poster", post);

        let mut source = MockPostSource::new();
        source
            .expect_account_status()
            .returning(|_| Err(FetchError::RateLimited { reset_at: None }));

        assert!(matches!(
            evaluator.check_active_mention_count(&source, 1),
            Err(FetchError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_hashtag_case_insensitive() {
        let post = record().with_hashtags(vec!["nft".to_string(), "Art".to_string()]);
        let evaluator = TaskEvaluator::from_record("poster", post);

        let result = evaluator.check_hashtag("NFT");
        assert!(result.task_complete);
        assert_eq!(
            result.data,
            TaskData::Hashtags {
                tags: vec!["nft".to_string(), "art".to_string()]
            }
        );

        assert!(evaluator.check_hashtag("art").task_complete);
    }

    #[test]
    fn test_hashtag_missing() {
        let post = record().with_hashtags(vec!["crypto".to_string()]);
        let result = TaskEvaluator::from_record("poster", post).check_hashtag("NFT");

        assert!(!result.task_complete);
        assert_eq!(result.error, Some(TaskError::HashtagNotFound));
    }

    #[test]
    fn test_no_quoted_post_is_stable() {
        let evaluator = TaskEvaluator::from_record("poster", record());

        let first = evaluator.check_quote_target("main", "1").unwrap();
        let second = evaluator.check_quote_target("main", "1").unwrap();

        assert!(!first.task_complete);
        assert_eq!(first.error, Some(TaskError::NoQuotedPost));
        assert_eq!(first, second);
    }

    #[test]
    fn test_quote_matches_nested_id() {
        let post = record().with_quoted(quoted("main", "200", Some("150")));
        let evaluator = TaskEvaluator::from_record("poster", post);

        let result = evaluator.check_quote_target("main", "150").unwrap();
        assert!(result.task_complete);
        assert_eq!(
            result.data,
            TaskData::Quote {
                quoted_author: Some("main".to_string()),
                quoted_id: Some("150".to_string()),
            }
        );

        // The quoted tweet's own id is not what gets compared by default
        let own_id = evaluator.check_quote_target("main", "200").unwrap();
        assert_eq!(own_id.error, Some(TaskError::QuoteMismatch));
    }

    #[test]
    fn test_quote_wrong_author() {
        let post = record().with_quoted(quoted("someone_else", "200", Some("150")));
        let result = TaskEvaluator::from_record("poster", post)
            .check_quote_target("main", "150")
            .unwrap();

        assert!(!result.task_complete);
        assert_eq!(result.error, Some(TaskError::QuoteMismatch));
    }

    #[test]
    fn test_quote_missing_nested_id() {
        let post = record().with_quoted(quoted("main", "200", None));
        let err = TaskEvaluator::from_record("poster", post)
            .check_quote_target("main", "150")
            .unwrap_err();

        assert_eq!(
            err,
            EvaluationError::MissingField("quoted_status.quoted_status_id_str")
        );
    }

    #[test]
    fn test_quote_matches_own_id_when_configured() {
        let post = record().with_quoted(quoted("main", "200", None));
        let evaluator =
            TaskEvaluator::from_record("poster", post).with_quote_match(QuoteMatch::QuotedPostId);

        assert!(evaluator.check_quote_target("main", "200").unwrap().task_complete);
        assert_eq!(
            evaluator.check_quote_target("main", "150").unwrap().error,
            Some(TaskError::QuoteMismatch)
        );
    }

    #[test]
    fn test_follow_back_mirrors_flag() {
        let not_following = TaskEvaluator::from_record("poster", record()).check_follow_back();
        assert!(!not_following.task_complete);
        assert_eq!(not_following.error, Some(TaskError::NotFollowing));
        assert_eq!(not_following.data, TaskData::None);

        let mut post = record();
        post.author.following = true;
        let following = TaskEvaluator::from_record("poster", post).check_follow_back();
        assert!(following.task_complete);
        assert_eq!(following.error, None);
    }
}
