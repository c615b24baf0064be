//! Client configuration module

use clap::Parser;

/// Kasir API client configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "kasir", about = "Kasir POS API client", long_about = None)]
pub struct ApiConfig {
    /// Base URL of the remote POS API, e.g. `"https://pos.example.com"`
    #[arg(long, env = "KASIR_API_URL")]
    pub base_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl ApiConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Create a configuration pointing at the given base URL.
    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            log_level: "info".to_owned(),
        }
    }
}
