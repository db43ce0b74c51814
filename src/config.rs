use anyhow::{Context, bail};
use dotenvy::dotenv;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub server_addr: String,
    /// Root of the remote HRMS REST service.
    pub api_base_url: String,

    // Logging
    pub log_dir: String,
    pub log_level: tracing::Level,

    pub workers: usize,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source, applying defaults for
    /// missing entries.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let workers: usize = var("WORKERS")
            .unwrap_or_else(|| "1".to_string())
            .parse()
            .context("WORKERS must be a positive integer")?;
        if workers == 0 {
            bail!("WORKERS must be a positive integer");
        }

        Ok(Self {
            server_addr: var("SERVER_ADDR").unwrap_or_else(|| "127.0.0.1:3000".to_string()),
            api_base_url: var("API_BASE_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            log_dir: var("LOG_DIR").unwrap_or_else(|| "logs".to_string()),
            log_level: var("LOG_LEVEL")
                .unwrap_or_else(|| "debug".to_string())
                .parse()
                .context("LOG_LEVEL must be one of trace, debug, info, warn, error")?,
            workers,
        })
    }
}
