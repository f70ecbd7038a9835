use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::services::{QuoteMatch, Task};

/// Mentions required when no task flags are given
const DEFAULT_MIN_MENTIONS: usize = 2;

#[derive(Parser)]
#[command(name = "tweetcheck")]
#[command(about = "Validate tweet links and check promotional tasks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a tweet URL and show the handle and tweet id
    Parse {
        /// Tweet URL, e.g. https://twitter.com/user/status/123
        url: String,

        /// Accept a single trailing '/' after the tweet id
        #[arg(long)]
        strip_trailing_slash: bool,

        /// Print the parse result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch a tweet and check it against the requested tasks
    Check {
        /// Tweet URL, e.g. https://twitter.com/user/status/123
        url: String,

        #[command(flatten)]
        tasks: TaskArgs,

        /// Accept a single trailing '/' after the tweet id
        #[arg(long)]
        strip_trailing_slash: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct TaskArgs {
    /// Require at least this many mentioned accounts
    #[arg(long, value_name = "N")]
    pub min_mentions: Option<usize>,

    /// Only count mentioned accounts that are not suspended (one lookup per account)
    #[arg(long, requires = "min_mentions")]
    pub active_mentions: bool,

    /// Require this hashtag (case-insensitive, without '#')
    #[arg(long, value_name = "TAG")]
    pub hashtag: Option<String>,

    /// Require a quote of a tweet by this account
    #[arg(long, value_name = "HANDLE", requires = "quote_id")]
    pub quote_author: Option<String>,

    /// Tweet id the quote must reference
    #[arg(long, value_name = "ID", requires = "quote_author")]
    pub quote_id: Option<String>,

    /// Which id of the quoted tweet is compared with --quote-id
    #[arg(long, value_enum, default_value_t = QuoteMatchArg::Nested)]
    pub quote_match: QuoteMatchArg,

    /// Require the author to follow the checking account
    #[arg(long)]
    pub follow: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum QuoteMatchArg {
    /// Id the quoted tweet itself quotes
    #[default]
    Nested,
    /// The quoted tweet's own id
    Direct,
}

impl From<QuoteMatchArg> for QuoteMatch {
    fn from(arg: QuoteMatchArg) -> Self {
        match arg {
            QuoteMatchArg::Nested => QuoteMatch::NestedQuotedId,
            QuoteMatchArg::Direct => QuoteMatch::QuotedPostId,
        }
    }
}

impl TaskArgs {
    /// Requested tasks in a fixed order; mentions and follow-back when none are given
    pub fn tasks(&self) -> Vec<Task> {
        let mut tasks = Vec::new();

        if let Some(min) = self.min_mentions {
            if self.active_mentions {
                tasks.push(Task::ActiveMentions { min });
            } else {
                tasks.push(Task::Mentions { min });
            }
        }

        if let Some(tag) = &self.hashtag {
            tasks.push(Task::Hashtag { tag: tag.clone() });
        }

        if let (Some(author), Some(post_id)) = (&self.quote_author, &self.quote_id) {
            tasks.push(Task::QuoteTarget {
                author: author.clone(),
                post_id: post_id.clone(),
            });
        }

        if self.follow {
            tasks.push(Task::FollowBack);
        }

        if tasks.is_empty() {
            tasks.push(Task::Mentions {
                min: DEFAULT_MIN_MENTIONS,
            });
            tasks.push(Task::FollowBack);
        }

        tasks
    }
}
