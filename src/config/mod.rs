use crate::core::{AppError, Result};
use serde::Deserialize;
use std::env;

pub mod installments;
pub mod provider;
pub mod server;

pub use installments::{BasisMode, InstallmentSettings};
pub use provider::{ForwardMode, ProviderConfig};
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub installments: InstallmentSettings,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
    /// `json` switches the log output to JSON lines
    pub log_format: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            server: ServerConfig::from_env()?,
            installments: InstallmentSettings::from_env()?,
            provider: ProviderConfig::from_env()?,
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.installments.validate()?;

        if self.server.workers == 0 {
            return Err(AppError::configuration(
                "Server workers must be greater than 0",
            ));
        }

        if self.provider.forwarding_enabled() && self.provider.api_key.is_empty() {
            return Err(AppError::configuration(
                "PROVIDER_API_KEY is required when forwarding is enabled",
            ));
        }

        Ok(())
    }
}
