use tokio::net::TcpListener;
use tracing::info;
use thread_writer::{
    config::Config,
    api::routes::create_router,
    init_tracing,
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let server_addr = Config::server_addr()?;
    init_tracing("info");

    if config.openai_api_key.is_none() {
        info!("OPENAI_API_KEY not set, threads will use naive summaries");
    }

    let app_state = AppState::new(config)?;
    let app = create_router(app_state);

    let listener = TcpListener::bind(server_addr).await?;
    info!(%server_addr, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
