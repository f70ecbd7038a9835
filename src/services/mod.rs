pub mod task_evaluator;
pub mod url_validator;
pub mod verification_service;

pub use task_evaluator::{QuoteMatch, TaskEvaluator};
pub use url_validator::{parse, TrailingSeparator, UrlValidator};
pub use verification_service::{Task, TaskOutcome, VerificationReport, VerificationService};
