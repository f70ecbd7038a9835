pub mod post;
pub mod status_url;
pub mod task;

pub use post::{AccountStatus, Author, PostRecord, QuotedPost, TweetMode};
pub use status_url::{ParsedUrl, UrlError};
pub use task::{TaskData, TaskError, TaskResult};
