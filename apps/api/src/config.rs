use anyhow::{Context, Result};

/// Document-import endpoint of the external LaTeX editor.
const DEFAULT_EXPORT_ENDPOINT: &str = "https://www.overleaf.com/docs";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Where export actions point; overridable for staging or tests.
    pub export_endpoint: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            export_endpoint: std::env::var("EXPORT_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EXPORT_ENDPOINT.to_string()),
        })
    }
}
