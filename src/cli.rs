//! Command-line surface: argument parsing and the generate → print/save flow.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use clap::Parser;
use crate::config::Config;
use crate::error::Result;
use crate::generator::{generate_thread, render_thread, save_thread, ThreadRequest, DEFAULT_TWEETS};
use crate::scraper::HttpContentSource;
use crate::summarizer::LlmSummarizer;

#[derive(Parser, Debug)]
#[command(name = "thread-writer", version, about = "Generate a Twitter thread from a URL.")]
pub struct Cli {
    /// URL of the blog post or video page to summarise
    pub url: String,

    /// Path to write the thread to. Prints to stdout when omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Override for the thread title (used in the hook)
    #[arg(long)]
    pub title: Option<String>,

    /// OpenAI API key for summarisation (optional)
    #[arg(long = "openai-api-key", env = "OPENAI_API_KEY", hide_env_values = true)]
    pub openai_api_key: Option<String>,

    /// Number of tweets to generate
    #[arg(long = "max-tweets", default_value_t = DEFAULT_TWEETS)]
    pub max_tweets: usize,
}

async fn build_thread(cli: &Cli) -> Result<Vec<String>> {
    let config = Config::load()?;
    let source = HttpContentSource::from_config(&config)?;
    let summarizer = LlmSummarizer::from_config(&config)?;

    let request = ThreadRequest {
        url: cli.url.clone(),
        title: cli.title.clone(),
        credential: cli.openai_api_key.clone(),
        max_tweets: cli.max_tweets,
    };
    generate_thread(&source, &summarizer, &request).await
}

/// Generates the thread and prints it to `out` or saves it to `--output`.
/// Failures go to `err` and yield exit status 1.
pub async fn run<O: Write, E: Write>(cli: &Cli, out: &mut O, err: &mut E) -> ExitCode {
    let tweets = match build_thread(cli).await {
        Ok(tweets) => tweets,
        Err(e) => {
            let _ = writeln!(err, "Error generating thread: {e}");
            return ExitCode::FAILURE;
        }
    };

    let written = match &cli.output {
        Some(path) => match save_thread(path, &tweets) {
            Ok(()) => writeln!(out, "Thread saved to {}", path.display()),
            Err(e) => {
                let _ = writeln!(err, "Error writing file: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => writeln!(out, "{}", render_thread(&tweets)),
    };

    match written {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(err, "Error writing output: {e}");
            ExitCode::FAILURE
        }
    }
}
