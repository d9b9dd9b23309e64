use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use crate::error::{AppError, Result};

pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_PORT: u16 = 3000;

/// Settings shared by the CLI and the server. Server-only settings are read
/// separately by [`Config::server_addr`].
#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the summarization provider. `None` means naive summaries only.
    pub openai_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_timeout: Duration,
    pub fetch_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            openai_api_key: None,
            llm_base_url: DEFAULT_LLM_BASE_URL.to_string(),
            llm_model: DEFAULT_LLM_MODEL.to_string(),
            llm_timeout: Duration::from_secs(DEFAULT_LLM_TIMEOUT_SECS),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
        }
    }
}

fn secs_var(name: &str, default: Duration) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| AppError::ConfigError(format!("Invalid {}: {}", name, e))),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        // Load environment variables from .env file if it exists
        dotenv::dotenv().ok();

        let defaults = Config::default();

        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        let llm_base_url = env::var("OPENAI_BASE_URL").unwrap_or(defaults.llm_base_url);
        let llm_model = env::var("OPENAI_MODEL").unwrap_or(defaults.llm_model);

        Ok(Config {
            openai_api_key,
            llm_base_url: llm_base_url.trim_end_matches('/').to_string(),
            llm_model,
            llm_timeout: secs_var("LLM_TIMEOUT_SECS", defaults.llm_timeout)?,
            fetch_timeout: secs_var("FETCH_TIMEOUT_SECS", defaults.fetch_timeout)?,
        })
    }

    /// Listen address from `HOST` / `PORT`, defaulting to `127.0.0.1:3000`.
    pub fn server_addr() -> Result<SocketAddr> {
        dotenv::dotenv().ok();

        let ip = match env::var("HOST") {
            Ok(host) => IpAddr::from_str(&host)
                .map_err(|e| AppError::ConfigError(format!("Invalid host address: {}", e)))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };
        let port = match env::var("PORT") {
            Ok(port) => port
                .parse::<u16>()
                .map_err(|e| AppError::ConfigError(format!("Invalid port: {}", e)))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(SocketAddr::new(ip, port))
    }
}
