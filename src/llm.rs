use serde::Serialize;
use reqwest::Client;
use crate::error::{Result, AppError};

pub const MAX_TOKENS: u32 = 400;
pub const TEMPERATURE: f32 = 0.3;

#[derive(Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

/// Sends a single-message chat completion to an OpenAI-compatible endpoint
/// and returns the first choice's content.
///
/// Every failure, including transport errors, is reported as `LlmError`.
pub async fn call_chat_completion(
    client: &Client,
    base_url: &str,
    model: &str,
    api_key: &str,
    prompt: &str,
) -> Result<String> {
    let body = ChatRequest {
        model: model.into(),
        messages: vec![
            Message {
                role: "user".into(),
                content: prompt.into(),
            }
        ],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    };

    let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let res = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| AppError::LlmError(e.to_string()))?;

    let json: serde_json::Value = res
        .json()
        .await
        .map_err(|e| AppError::LlmError(format!("Invalid JSON from LLM: {}", e)))?;
    let reply = json["choices"][0]["message"]["content"]
        .as_str()
        .ok_or_else(|| AppError::LlmError("Invalid response format from LLM".to_string()))?
        .to_string();

    Ok(reply)
}
