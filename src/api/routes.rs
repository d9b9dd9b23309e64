use axum::{
    routing::post,
    Router,
    extract::{Json, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_http::cors::{CorsLayer, Any};
use chrono::{DateTime, Utc};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::api::models::{ThreadApiRequest, ThreadApiResponse};
use crate::api::response;
use crate::generator::{generate_thread, ThreadRequest};
use crate::{AppState, CachedThread};

const HANDLER_TIMEOUT: Duration = Duration::from_secs(90);
const CACHE_TTL_HOURS: i64 = 24;
/// Upper bound on cached threads; the oldest entry is evicted past it.
pub const MAX_CACHED_THREADS: usize = 512;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/thread", post(thread_handler))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn thread_handler(
    State(state): State<AppState>,
    Json(req): Json<ThreadApiRequest>,
) -> impl IntoResponse {
    info!(url = %req.url, max_tweets = req.max_tweets, "Processing thread request");
    let start_time = Instant::now();

    let result = tokio::time::timeout(HANDLER_TIMEOUT, process_thread_request(&state, &req)).await;

    let elapsed = start_time.elapsed();
    info!(url = %req.url, ?elapsed, "Request processing finished");

    match result {
        Ok(Ok(response_data)) => response::success(response_data),
        Ok(Err(err)) => {
            warn!(url = %req.url, error = %err, "Thread generation failed");
            response::error(err.status_code(), err.to_string())
        }
        Err(_) => {
            warn!(url = %req.url, ?elapsed, "Request timed out");
            response::error(
                StatusCode::REQUEST_TIMEOUT,
                "Request processing timed out".to_string(),
            )
        }
    }
}

fn cache_key(state: &AppState, req: &ThreadApiRequest) -> String {
    format!(
        "{}|{}|{}|{}",
        req.url,
        req.title.as_deref().unwrap_or_default(),
        req.max_tweets,
        state.config.openai_api_key.is_some()
    )
}

fn is_fresh(entry: &CachedThread, now: DateTime<Utc>) -> bool {
    now - entry.timestamp < chrono::Duration::hours(CACHE_TTL_HOURS)
}

/// Drops expired entries, then returns the entry for `key` if one is left.
/// The lock is never held across an await.
fn cached_thread(state: &AppState, key: &str) -> Option<CachedThread> {
    let now = Utc::now();
    let mut cache = state.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let before = cache.len();
    cache.retain(|_, entry| is_fresh(entry, now));
    if cache.len() < before {
        debug!(evicted = before - cache.len(), "Evicted expired threads");
    }
    cache.get(key).cloned()
}

fn store_thread(state: &AppState, key: String, entry: CachedThread) {
    let mut cache = state.cache.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    while cache.len() >= MAX_CACHED_THREADS && !cache.contains_key(&key) {
        let oldest = cache
            .iter()
            .min_by_key(|(_, cached)| cached.timestamp)
            .map(|(oldest_key, _)| oldest_key.clone());
        match oldest {
            Some(oldest) => {
                cache.remove(&oldest);
            }
            None => break,
        }
    }
    cache.insert(key, entry);
}

async fn process_thread_request(state: &AppState, req: &ThreadApiRequest) -> Result<ThreadApiResponse> {
    let request = ThreadRequest {
        url: req.url.clone(),
        title: req.title.clone(),
        credential: state.config.openai_api_key.clone(),
        max_tweets: req.max_tweets,
    };
    request.validate()?;

    let key = cache_key(state, req);

    if let Some(cached) = cached_thread(state, &key) {
        info!(url = %req.url, "Cache hit");
        return Ok(ThreadApiResponse {
            url: req.url.clone(),
            tweets: cached.tweets,
            generated_at: cached.timestamp,
            status: "success (cached)".to_string(),
        });
    }

    let tweets = generate_thread(state.source.as_ref(), state.summarizer.as_ref(), &request).await?;
    let generated_at = Utc::now();
    store_thread(state, key, CachedThread {
        tweets: tweets.clone(),
        timestamp: generated_at,
    });

    Ok(ThreadApiResponse {
        url: req.url.clone(),
        tweets,
        generated_at,
        status: "success".to_string(),
    })
}
