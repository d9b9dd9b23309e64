use std::process::ExitCode;
use clap::Parser;
use thread_writer::cli::{run, Cli};
use thread_writer::init_tracing;

#[tokio::main]
async fn main() -> ExitCode {
    // .env must be loaded before clap reads OPENAI_API_KEY
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_tracing("warn");

    run(&cli, &mut std::io::stdout(), &mut std::io::stderr()).await
}
