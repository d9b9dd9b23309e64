pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod llm;
pub mod scraper;
pub mod summarizer;
pub mod thread;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Utc};
use crate::config::Config;
use crate::error::Result;
use crate::scraper::HttpContentSource;
use crate::summarizer::LlmSummarizer;

/// A generated thread kept for repeat requests.
#[derive(Clone, Debug)]
pub struct CachedThread {
    pub tweets: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

/// Application state that will be shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub source: Arc<HttpContentSource>,
    pub summarizer: Arc<LlmSummarizer>,
    pub cache: Arc<Mutex<HashMap<String, CachedThread>>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let source = HttpContentSource::from_config(&config)?;
        let summarizer = LlmSummarizer::from_config(&config)?;
        Ok(AppState {
            config: Arc::new(config),
            source: Arc::new(source),
            summarizer: Arc::new(summarizer),
            cache: Arc::new(Mutex::new(HashMap::new())),
        })
    }
}

/// Installs a stderr fmt subscriber filtered by `RUST_LOG`, or by
/// `default_directive` when it is unset. Later calls are no-ops.
pub fn init_tracing(default_directive: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
