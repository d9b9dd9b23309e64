use std::process::ExitCode;
use clap::Parser;
use thread_writer::cli::{run, Cli};
use thread_writer::generator::render_thread;
use thread_writer::thread::{HOOK_SUFFIX, MARKERS};

const PAGE: &str = "<html><head><title>CLI Post</title></head><body><p>Alpha. Beta. Gamma.</p></body></html>";

fn parse(args: &[&str]) -> Cli {
    // An empty key keeps any OPENAI_API_KEY in the environment out of the run.
    let mut argv = vec!["thread-writer", "--openai-api-key="];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap()
}

async fn run_cli(cli: &Cli) -> (ExitCode, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = run(cli, &mut out, &mut err).await;
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

async fn serve_page(server: &mut mockito::ServerGuard) -> mockito::Mock {
    server
        .mock("GET", "/post")
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(PAGE)
        .create_async()
        .await
}

#[test]
fn test_defaults_to_ten_tweets() {
    let cli = parse(&["https://example.com"]);
    assert_eq!(cli.max_tweets, 10);
    assert!(cli.output.is_none());
    assert_eq!(cli.openai_api_key.as_deref(), Some(""));
}

#[tokio::test]
async fn test_out_of_range_count_exits_with_failure() {
    let cli = parse(&["https://example.com", "--max-tweets", "25"]);
    let (code, out, err) = run_cli(&cli).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.is_empty());
    assert!(err.starts_with("Error generating thread: "));
    assert!(err.contains("max_tweets must be between 3 and 20"));
}

#[tokio::test]
async fn test_prints_thread_to_stdout() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(&mut server).await;
    let url = format!("{}/post", server.url());

    let cli = parse(&[url.as_str(), "--max-tweets", "3"]);
    let (code, out, err) = run_cli(&cli).await;

    assert_eq!(code, ExitCode::SUCCESS, "stderr: {err}");
    assert!(out.starts_with(&format!("{} 1/3 CLI Post{HOOK_SUFFIX}\n", MARKERS[0])));
    assert_eq!(out.matches("\n\n").count(), 2);
}

#[tokio::test]
async fn test_writes_thread_to_output_file() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(&mut server).await;
    let url = format!("{}/post", server.url());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("thread.txt");
    let path_arg = path.to_str().unwrap();

    let cli = parse(&[url.as_str(), "--max-tweets", "4", "--title", "Override", "--output", path_arg]);
    let (code, out, err) = run_cli(&cli).await;

    assert_eq!(code, ExitCode::SUCCESS, "stderr: {err}");
    assert_eq!(out, format!("Thread saved to {}\n", path.display()));

    let written = std::fs::read_to_string(&path).unwrap();
    let tweets: Vec<String> = written.split("\n\n").map(str::to_string).collect();
    assert_eq!(tweets.len(), 4);
    assert_eq!(render_thread(&tweets), written);
    assert!(tweets[0].starts_with(&format!("{} 1/4 Override{HOOK_SUFFIX}", MARKERS[0])));
}

#[tokio::test]
async fn test_unwritable_output_exits_with_failure() {
    let mut server = mockito::Server::new_async().await;
    let _page = serve_page(&mut server).await;
    let url = format!("{}/post", server.url());
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("thread.txt");

    let cli = parse(&[url.as_str(), "--max-tweets", "3", "--output", path.to_str().unwrap()]);
    let (code, out, err) = run_cli(&cli).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert!(out.is_empty());
    assert!(err.starts_with("Error writing file: "));
    assert!(!path.exists());
}

#[tokio::test]
async fn test_unreachable_page_exits_with_failure() {
    let cli = parse(&["http://127.0.0.1:1/post", "--max-tweets", "3"]);
    let (code, _, err) = run_cli(&cli).await;

    assert_eq!(code, ExitCode::FAILURE);
    assert!(err.starts_with("Error generating thread: Failed to fetch page"));
}
