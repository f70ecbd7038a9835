use clap::Parser;
use tracing_subscriber::EnvFilter;

use tweetcheck::cli::{Cli, Commands, TaskArgs};
use tweetcheck::config::Config;
use tweetcheck::domain::TaskData;
use tweetcheck::errors::TweetCheckResult;
use tweetcheck::services::{
    TaskOutcome, TrailingSeparator, UrlValidator, VerificationReport, VerificationService,
};
use tweetcheck::sources::TwitterClient;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    match run() {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether the command succeeded; failures already explained on stdout
fn run() -> TweetCheckResult<bool> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            url,
            strip_trailing_slash,
            json,
        } => cmd_parse(&url, validator(strip_trailing_slash), json),
        Commands::Check {
            url,
            tasks,
            strip_trailing_slash,
            json,
        } => cmd_check(&url, &tasks, validator(strip_trailing_slash), json),
    }
}

fn validator(strip_trailing_slash: bool) -> UrlValidator {
    let trailing = if strip_trailing_slash {
        TrailingSeparator::Strip
    } else {
        TrailingSeparator::Reject
    };
    UrlValidator::new().trailing_separator(trailing)
}

fn cmd_parse(url: &str, validator: UrlValidator, json: bool) -> TweetCheckResult<bool> {
    let parsed = validator.parse(url);

    if json {
        println!("{}", serde_json::to_string_pretty(&parsed)?);
        return Ok(parsed.is_usable());
    }

    match &parsed.error {
        None => {
            println!("Valid tweet URL");
            println!("  Handle: {}", parsed.author_handle);
            println!("  Tweet: {}", parsed.post_id);
        }
        Some(e) => {
            println!("Invalid tweet URL: {}", e);
        }
    }

    Ok(parsed.is_usable())
}

fn cmd_check(
    url: &str,
    task_args: &TaskArgs,
    validator: UrlValidator,
    json: bool,
) -> TweetCheckResult<bool> {
    // Reject bad links before touching credentials or the network
    validator.parse(url).into_target()?;

    let config = Config::from_env()?;
    let client = TwitterClient::new(&config)?;
    let service = VerificationService::new(client)
        .with_validator(validator)
        .with_quote_match(task_args.quote_match.into());

    let tasks = task_args.tasks();
    let report = service.verify_url(url, &tasks)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(report.all_complete())
}

fn print_report(report: &VerificationReport) {
    println!("Tweet {} by @{}:\n", report.post_id, report.handle);

    for outcome in &report.outcomes {
        println!("  {}", format_outcome(outcome));
    }

    println!(
        "\n{}/{} tasks complete",
        report.completed(),
        report.outcomes.len()
    );
}

fn format_outcome(outcome: &TaskOutcome) -> String {
    let description = outcome.task.describe();

    match &outcome.result {
        Ok(result) => {
            let mark = if result.task_complete { "[x]" } else { "[ ]" };
            let mut line = format!("{} {}", mark, description);

            if let Some(reason) = &result.error {
                line.push_str(&format!(": {}", reason));
            }

            match &result.data {
                TaskData::Mentions { handles } if !handles.is_empty() => {
                    let handles: Vec<String> = handles.iter().map(|h| format!("@{}", h)).collect();
                    line.push_str(&format!(" ({})", handles.join(", ")));
                }
                TaskData::Hashtags { tags } if !tags.is_empty() => {
                    let tags: Vec<String> = tags.iter().map(|t| format!("#{}", t)).collect();
                    line.push_str(&format!(" ({})", tags.join(", ")));
                }
                TaskData::Quote {
                    quoted_author: Some(author),
                    quoted_id: Some(id),
                } if !result.task_complete => {
                    line.push_str(&format!(" (found @{} / {})", author, id));
                }
                _ => {}
            }

            line
        }
        Err(e) => format!("[!] {}: {}", description, e),
    }
}
