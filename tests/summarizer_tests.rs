use std::time::Duration;
use mockito::Matcher;
use serde_json::json;
use thread_writer::summarizer::{
    build_prompt, naive_summary, LlmSummarizer, NaiveSummarizer, Summarizer, TARGET_WORDS,
};

fn summarizer_at(base_url: impl Into<String>) -> LlmSummarizer {
    LlmSummarizer::new(base_url, "gpt-3.5-turbo", Duration::from_secs(10)).unwrap()
}

fn words(count: usize) -> String {
    (0..count).map(|i| format!("word{i}")).collect::<Vec<_>>().join(" ")
}

fn completion_body(content: &str) -> String {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
    .to_string()
}

#[test]
fn test_naive_summary_takes_leading_words() {
    let text = words(1000);
    let summary = naive_summary(&text, TARGET_WORDS);
    assert_eq!(summary, words(300));
}

#[test]
fn test_naive_summary_collapses_whitespace() {
    assert_eq!(naive_summary("  one\n\ttwo   three  ", 10), "one two three");
    assert_eq!(naive_summary("", 10), "");
}

#[test]
fn test_prompt_mentions_word_budget_and_text() {
    let prompt = build_prompt("Body text.", 300);
    assert!(prompt.contains("around 300 words"));
    assert!(prompt.contains("\n\nBody text.\n\nSummary:"));
}

#[tokio::test]
async fn test_without_credential_falls_back_to_naive() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let summarizer = summarizer_at(server.url());
    let text = words(1000);

    assert_eq!(summarizer.summarize(&text, 300, None).await, words(300));
    assert_eq!(summarizer.summarize(&text, 300, Some("")).await, words(300));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_output_is_trimmed() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 400
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion_body("\n  A concise overview.  \n"))
        .create_async()
        .await;

    let summarizer = summarizer_at(server.url());
    let summary = summarizer.summarize(&words(50), 300, Some("sk-test")).await;

    assert_eq!(summary, "A concise overview.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_provider_error_status_falls_back() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(500)
        .with_body("upstream exploded")
        .create_async()
        .await;

    let summarizer = summarizer_at(server.url());
    let text = words(400);
    let summary = summarizer.summarize(&text, 300, Some("sk-test")).await;

    assert_eq!(summary, words(300));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_malformed_provider_body_falls_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices": []}"#)
        .create_async()
        .await;

    let summarizer = summarizer_at(server.url());
    let summary = summarizer.summarize("just a few words", 2, Some("sk-test")).await;

    assert_eq!(summary, "just a");
}

#[tokio::test]
async fn test_unreachable_provider_falls_back() {
    let summarizer = summarizer_at("http://127.0.0.1:1");
    let summary = summarizer.summarize("alpha beta gamma", 300, Some("sk-test")).await;
    assert_eq!(summary, "alpha beta gamma");
}

#[tokio::test]
async fn test_stalled_provider_times_out_and_falls_back() {
    // Accepts connections but never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let summarizer =
        LlmSummarizer::new(format!("http://{addr}"), "gpt-3.5-turbo", Duration::from_millis(300)).unwrap();
    let summary = tokio::time::timeout(
        Duration::from_secs(10),
        summarizer.summarize("alpha beta gamma", 2, Some("sk-test")),
    )
    .await
    .expect("summarize should not hang on a stalled provider");

    assert_eq!(summary, "alpha beta");
}

#[tokio::test]
async fn test_empty_text_skips_provider() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let summarizer = summarizer_at(server.url());
    assert_eq!(summarizer.summarize("   \n ", 300, Some("sk-test")).await, "");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_naive_summarizer_ignores_credential() {
    let summary = NaiveSummarizer.summarize(&words(10), 3, Some("sk-test")).await;
    assert_eq!(summary, "word0 word1 word2");
}
