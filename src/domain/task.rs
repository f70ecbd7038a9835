use serde::Serialize;
use thiserror::Error;

/// Why a task evaluated to incomplete.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskError {
    #[error("not enough accounts were mentioned")]
    InsufficientMentions,

    #[error("the required hashtag was not found")]
    HashtagNotFound,

    #[error("the tweet does not quote another tweet")]
    NoQuotedPost,

    #[error("the tweet quotes the wrong tweet")]
    QuoteMismatch,

    #[error("the author does not follow the account")]
    NotFollowing,
}

/// Diagnostic data carried alongside a task result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskData {
    Mentions {
        handles: Vec<String>,
    },
    Hashtags {
        tags: Vec<String>,
    },
    Quote {
        quoted_author: Option<String>,
        quoted_id: Option<String>,
    },
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResult {
    pub task_complete: bool,
    pub error: Option<TaskError>,
    pub data: TaskData,
}

impl TaskResult {
    pub fn complete(data: TaskData) -> Self {
        Self {
            task_complete: true,
            error: None,
            data,
        }
    }

    pub fn incomplete(error: TaskError, data: TaskData) -> Self {
        Self {
            task_complete: false,
            error: Some(error),
            data,
        }
    }

    /// Complete when `passed`, otherwise incomplete with `error`
    pub fn from_check(passed: bool, error: TaskError, data: TaskData) -> Self {
        if passed {
            Self::complete(data)
        } else {
            Self::incomplete(error, data)
        }
    }
}
