use serde::Serialize;
use tracing::{info, warn};

use crate::domain::TaskResult;
use crate::errors::{TweetCheckError, TweetCheckResult};
use crate::services::task_evaluator::{QuoteMatch, TaskEvaluator};
use crate::services::url_validator::UrlValidator;
use crate::sources::PostSource;

/// A task a tweet can be checked against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "task", rename_all = "snake_case")]
pub enum Task {
    Mentions { min: usize },
    ActiveMentions { min: usize },
    Hashtag { tag: String },
    QuoteTarget { author: String, post_id: String },
    FollowBack,
}

impl Task {
    pub fn describe(&self) -> String {
        match self {
            Task::Mentions { min } => format!("mention at least {} accounts", min),
            Task::ActiveMentions { min } => format!("mention at least {} active accounts", min),
            Task::Hashtag { tag } => format!("use hashtag #{}", tag),
            Task::QuoteTarget { author, post_id } => {
                format!("quote @{}'s tweet referencing {}", author, post_id)
            }
            Task::FollowBack => "follow the account".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TaskOutcome {
    pub task: Task,
    /// `Err` holds why the task could not be evaluated at all
    #[serde(with = "outcome_result")]
    pub result: Result<TaskResult, String>,
}

impl TaskOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(&self.result, Ok(r) if r.task_complete)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VerificationReport {
    pub handle: String,
    pub post_id: String,
    pub outcomes: Vec<TaskOutcome>,
}

impl VerificationReport {
    pub fn all_complete(&self) -> bool {
        self.outcomes.iter().all(TaskOutcome::is_complete)
    }

    pub fn completed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_complete()).count()
    }
}

pub struct VerificationService<S: PostSource> {
    source: S,
    validator: UrlValidator,
    quote_match: QuoteMatch,
}

impl<S: PostSource> VerificationService<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            validator: UrlValidator::new(),
            quote_match: QuoteMatch::default(),
        }
    }

    pub fn with_validator(mut self, validator: UrlValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_quote_match(mut self, quote_match: QuoteMatch) -> Self {
        self.quote_match = quote_match;
        self
    }

    /// Validate the URL, fetch the tweet once and run every task against it
    pub fn verify_url(&self, url: &str, tasks: &[Task]) -> TweetCheckResult<VerificationReport> {
        let (handle, post_id) = self.validator.parse(url).into_target()?;

        let evaluator = TaskEvaluator::create(&self.source, &handle, &post_id)
            .map_err(TweetCheckError::from)?
            .with_quote_match(self.quote_match);

        Ok(self.run(&evaluator, tasks))
    }

    /// Run each task independently; one failing task never stops the rest
    pub fn run(&self, evaluator: &TaskEvaluator, tasks: &[Task]) -> VerificationReport {
        let outcomes: Vec<TaskOutcome> = tasks
            .iter()
            .map(|task| {
                let result = self.run_task(evaluator, task);
                if let Err(e) = &result {
                    warn!(task = ?task, error = %e, "task could not be evaluated");
                }
                TaskOutcome {
                    task: task.clone(),
                    result,
                }
            })
            .collect();

        let report = VerificationReport {
            handle: evaluator.handle().to_string(),
            post_id: evaluator.post().id.clone(),
            outcomes,
        };

        info!(
            post_id = %report.post_id,
            completed = report.completed(),
            total = report.outcomes.len(),
            "tasks checked"
        );

        report
    }

    fn run_task(&self, evaluator: &TaskEvaluator, task: &Task) -> Result<TaskResult, String> {
        match task {
            Task::Mentions { min } => Ok(evaluator.check_mention_count(*min)),
            Task::ActiveMentions { min } => evaluator
                .check_active_mention_count(&self.source, *min)
                .map_err(|e| e.to_string()),
            Task::Hashtag { tag } => Ok(evaluator.check_hashtag(tag)),
            Task::QuoteTarget { author, post_id } => evaluator
                .check_quote_target(author, post_id)
                .map_err(|e| e.to_string()),
            Task::FollowBack => Ok(evaluator.check_follow_back()),
        }
    }
}

mod outcome_result {
    use serde::ser::SerializeMap;
    use serde::Serializer;

    use crate::domain::TaskResult;

    pub fn serialize<S: Serializer>(
        result: &Result<TaskResult, String>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match result {
            Ok(r) => map.serialize_entry("ok", r)?,
            Err(e) => map.serialize_entry("error", e)?,
        }
        map.end()
    }
}
