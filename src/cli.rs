use crate::engine::PredictEngine;
use crate::model::{ParsedFeatures, ServiceConfig, SubmitRequest};
use crate::{normalize, validate};
use anyhow::Result;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "authcheck",
    version,
    about = "Account authenticity check against a classification service, with optional TUI"
)]
pub struct Cli {
    /// Base URL for the classification service
    #[arg(long, default_value = "http://127.0.0.1:8000")]
    pub base_url: String,

    /// Print the JSON result and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Print a text summary and exit (no TUI)
    #[arg(long)]
    pub text: bool,

    /// Account handle to check (one-shot; mutually exclusive with the feature flags)
    #[arg(long)]
    pub username: Option<String>,

    /// Follower count (one-shot feature mode; all five feature flags go together)
    #[arg(long)]
    pub followers: Option<i64>,

    /// Following count
    #[arg(long)]
    pub following: Option<i64>,

    /// Post count
    #[arg(long)]
    pub posts: Option<i64>,

    /// Number of digits in the username
    #[arg(long)]
    pub username_digits: Option<i64>,

    /// Username length
    #[arg(long)]
    pub username_length: Option<i64>,

    /// Request timeout
    #[arg(long, default_value = "30s")]
    pub timeout: humantime::Duration,
}

/// Build the service config from CLI arguments.
pub fn build_config(args: &Cli) -> ServiceConfig {
    ServiceConfig {
        base_url: args.base_url.clone(),
        timeout: Duration::from(args.timeout),
        user_agent: format!("authcheck/{}", env!("CARGO_PKG_VERSION")),
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if let Some(request) = one_shot_request(&args)? {
        return run_one_shot(&args, request).await;
    }

    if args.json || args.text {
        return Err(anyhow::anyhow!(
            "--json/--text need --username or all of --followers --following --posts \
             --username-digits --username-length"
        ));
    }

    #[cfg(feature = "tui")]
    {
        crate::tui::run(args).await
    }
    #[cfg(not(feature = "tui"))]
    {
        Err(anyhow::anyhow!(
            "built without TUI support; pass --username or the feature flags"
        ))
    }
}

/// Map one-shot flags to a validated request, if any were given.
/// Validation failures surface here directly; no request is attempted.
fn one_shot_request(args: &Cli) -> Result<Option<SubmitRequest>> {
    let feature_flags = [
        args.followers,
        args.following,
        args.posts,
        args.username_digits,
        args.username_length,
    ];
    let any_features = feature_flags.iter().any(|f| f.is_some());

    match (args.username.as_deref(), any_features) {
        (None, false) => Ok(None),
        (Some(_), true) => Err(anyhow::anyhow!(
            "--username and the feature flags are mutually exclusive"
        )),
        (Some(raw), false) => {
            let handle = validate::validate_handle(raw)?;
            Ok(Some(SubmitRequest::Handle(handle)))
        }
        (None, true) => {
            if !feature_flags.iter().all(|f| f.is_some()) {
                return Err(anyhow::anyhow!(
                    "feature mode needs all of --followers --following --posts \
                     --username-digits --username-length"
                ));
            }
            let parsed = ParsedFeatures {
                follower_count: args.followers.unwrap_or(0),
                following_count: args.following.unwrap_or(0),
                media_count: args.posts.unwrap_or(0),
                username_digit_count: args.username_digits.unwrap_or(0),
                username_length: args.username_length.unwrap_or(0),
            };
            validate::ensure_non_negative(&parsed)?;
            Ok(Some(SubmitRequest::Features(parsed)))
        }
    }
}

/// Perform a single submission and print it as JSON or text.
async fn run_one_shot(args: &Cli, request: SubmitRequest) -> Result<()> {
    let cfg = build_config(args);
    let engine = PredictEngine::new(&cfg)?;
    let mode = request.mode();

    let prediction = match engine.run(&request).await {
        Ok(p) => p,
        Err(e) => return Err(anyhow::anyhow!(normalize::error_message(mode, &e))),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&prediction)?);
    } else {
        for line in crate::text_summary::build_text_summary(mode, &prediction).lines {
            println!("{}", line);
        }
    }
    Ok(())
}
