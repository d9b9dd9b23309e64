use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::llm::call_chat_completion;

/// Word budget handed to the summarizer when generating a thread.
pub const TARGET_WORDS: usize = 300;

#[async_trait]
pub trait Summarizer: Send + Sync {
    /// Shortens `text` to roughly `target_words` words. Never fails; provider
    /// problems fall back to [`naive_summary`].
    async fn summarize(&self, text: &str, target_words: usize, credential: Option<&str>) -> String;
}

/// First `target_words` whitespace-delimited words, joined by single spaces.
pub fn naive_summary(text: &str, target_words: usize) -> String {
    text.split_whitespace()
        .take(target_words)
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn build_prompt(text: &str, target_words: usize) -> String {
    let mut result = String::with_capacity(text.len() + 200);
    result.push_str("Summarise the following text into a concise overview. Focus on the key ideas and eliminate unnecessary detail. Limit the summary to around ");
    result.push_str(&target_words.to_string());
    result.push_str(" words.\n\n");
    result.push_str(text);
    result.push_str("\n\nSummary:");
    result
}

/// Truncation only, no provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveSummarizer;

#[async_trait]
impl Summarizer for NaiveSummarizer {
    async fn summarize(&self, text: &str, target_words: usize, _credential: Option<&str>) -> String {
        naive_summary(text, target_words)
    }
}

/// Summarizes through a chat-completion provider when a credential is given.
#[derive(Clone)]
pub struct LlmSummarizer {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmSummarizer {
    /// `timeout` bounds each provider call so a stalled provider still
    /// ends in the naive fallback.
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to build LLM client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.llm_base_url.clone(), config.llm_model.clone(), config.llm_timeout)
    }

    async fn summarize_with_provider(
        &self,
        text: &str,
        target_words: usize,
        api_key: &str,
    ) -> Result<String> {
        let prompt = build_prompt(text, target_words);
        let reply = call_chat_completion(&self.client, &self.base_url, &self.model, api_key, &prompt).await?;
        Ok(reply.trim().to_string())
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    async fn summarize(&self, text: &str, target_words: usize, credential: Option<&str>) -> String {
        if text.split_whitespace().next().is_none() {
            return String::new();
        }

        let Some(api_key) = credential.filter(|key| !key.is_empty()) else {
            debug!("No summarizer credential, using naive summary");
            return naive_summary(text, target_words);
        };

        match self.summarize_with_provider(text, target_words, api_key).await {
            Ok(summary) => summary,
            Err(err) => {
                warn!(error = %err, model = %self.model, "Summarization failed, falling back to naive summary");
                naive_summary(text, target_words)
            }
        }
    }
}
