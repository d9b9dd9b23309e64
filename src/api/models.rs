use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use crate::generator::DEFAULT_TWEETS;

fn default_max_tweets() -> usize {
    DEFAULT_TWEETS
}

#[derive(Deserialize)]
pub struct ThreadApiRequest {
    pub url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default = "default_max_tweets")]
    pub max_tweets: usize,
}

#[derive(Serialize)]
pub struct ThreadApiResponse {
    pub url: String,
    pub tweets: Vec<String>,
    pub generated_at: DateTime<Utc>,
    pub status: String,
}
