use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use once_cell::sync::Lazy;
use tracing::{debug, info};
use crate::config::Config;
use crate::error::{AppError, Result};

// Create static selectors to avoid recompiling them each time
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to parse description selector")
});

static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("p").expect("Failed to parse paragraph selector")
});

/// Text pulled from a fetched page. Empty strings stand for missing parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub title: String,
    pub description: String,
    pub body_text: String,
}

impl PageContent {
    /// Body text when there is any, otherwise the meta description.
    pub fn base_text(&self) -> &str {
        if self.body_text.is_empty() {
            &self.description
        } else {
            &self.body_text
        }
    }
}

/// Where page content comes from.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<PageContent>;
}

/// Fetches pages over HTTP and extracts their text.
#[derive(Clone)]
pub struct HttpContentSource {
    client: Client,
}

impl HttpContentSource {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .pool_max_idle_per_host(10)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.fetch_timeout)
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn fetch(&self, url: &str) -> Result<PageContent> {
        let html = fetch_html(&self.client, url).await?;
        let content = extract_content(&html);
        info!(
            url,
            title = %content.title,
            body_chars = content.body_text.len(),
            "Extracted page content"
        );
        Ok(content)
    }
}

pub async fn fetch_html(client: &Client, url: &str) -> Result<String> {
    debug!(url, "Fetching URL");
    let response = client.get(url).send().await?.error_for_status()?;
    let html = response.text().await?;
    Ok(html)
}

pub fn extract_content(html: &str) -> PageContent {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let description = document
        .select(&DESCRIPTION_SELECTOR)
        .find_map(|element| element.value().attr("content"))
        .map(|content| content.trim().to_string())
        .unwrap_or_default();

    let body_text = document
        .select(&PARAGRAPH_SELECTOR)
        .map(paragraph_text)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    PageContent {
        title,
        description,
        body_text,
    }
}

/// Text nodes of a paragraph, each trimmed, joined with single spaces.
fn paragraph_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
