use std::path::Path;
use tracing::info;
use crate::error::{AppError, Result};
use crate::scraper::ContentSource;
use crate::summarizer::{Summarizer, TARGET_WORDS};
use crate::thread::{assemble, format_thread};

pub const MIN_TWEETS: usize = 3;
pub const MAX_TWEETS: usize = 20;
pub const DEFAULT_TWEETS: usize = 10;

#[derive(Debug, Clone)]
pub struct ThreadRequest {
    pub url: String,
    /// Overrides the page title in the hook line.
    pub title: Option<String>,
    pub credential: Option<String>,
    pub max_tweets: usize,
}

impl ThreadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: None,
            credential: None,
            max_tweets: DEFAULT_TWEETS,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_TWEETS..=MAX_TWEETS).contains(&self.max_tweets) {
            return Err(AppError::InvalidArgument(format!(
                "max_tweets must be between {} and {}",
                MIN_TWEETS, MAX_TWEETS
            )));
        }
        Ok(())
    }
}

/// Override, then page title, then the URL itself. Empty values are skipped.
fn choose_title<'a>(override_title: Option<&'a str>, page_title: &'a str, url: &'a str) -> &'a str {
    override_title
        .filter(|title| !title.is_empty())
        .or_else(|| Some(page_title).filter(|title| !title.is_empty()))
        .unwrap_or(url)
}

/// Fetches the page, summarizes it and returns exactly `max_tweets` messages.
pub async fn generate_thread<C, S>(
    source: &C,
    summarizer: &S,
    request: &ThreadRequest,
) -> Result<Vec<String>>
where
    C: ContentSource + ?Sized,
    S: Summarizer + ?Sized,
{
    request.validate()?;

    let content = source.fetch(&request.url).await?;
    let title = choose_title(request.title.as_deref(), &content.title, &request.url);

    let summary = summarizer
        .summarize(content.base_text(), TARGET_WORDS, request.credential.as_deref())
        .await;

    let parts = assemble(&summary, request.max_tweets);
    let tweets = format_thread(&parts, title, request.max_tweets);
    info!(url = %request.url, tweets = tweets.len(), "Generated thread");
    Ok(tweets)
}

/// Messages separated by a blank line.
pub fn render_thread(tweets: &[String]) -> String {
    tweets.join("\n\n")
}

pub fn save_thread(path: &Path, tweets: &[String]) -> Result<()> {
    std::fs::write(path, render_thread(tweets))?;
    Ok(())
}
