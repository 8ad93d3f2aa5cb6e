use serde::Deserialize;
use std::env;

use crate::core::{AppError, Result};

/// Whether committed plans are handed over to an external provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForwardMode {
    /// Store the selection only
    Off,
    /// Build a signed payload for an auto-submitted POST form
    Post,
}

/// External installment provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    pub forward_mode: ForwardMode,
    pub provider_url: String,
    pub api_key: String,
    /// HMAC secret; payloads are unsigned when empty
    pub api_secret: String,
    pub send_customer: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            forward_mode: ForwardMode::Off,
            provider_url: String::new(),
            api_key: String::new(),
            api_secret: String::new(),
            send_customer: true,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Result<Self> {
        let forward_mode = match env::var("PROVIDER_FORWARD")
            .unwrap_or_else(|_| "off".to_string())
            .trim()
            .to_lowercase()
            .as_str()
        {
            "off" | "" => ForwardMode::Off,
            "post" => ForwardMode::Post,
            other => {
                return Err(AppError::configuration(format!(
                    "Invalid PROVIDER_FORWARD: {}",
                    other
                )))
            }
        };

        Ok(Self {
            forward_mode,
            provider_url: env::var("PROVIDER_URL")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_string(),
            api_key: env::var("PROVIDER_API_KEY").unwrap_or_default(),
            api_secret: env::var("PROVIDER_API_SECRET").unwrap_or_default(),
            send_customer: env::var("PROVIDER_SEND_CUSTOMER")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| AppError::configuration("Invalid PROVIDER_SEND_CUSTOMER"))?,
        })
    }

    /// Forwarding needs both the mode and a target URL
    pub fn forwarding_enabled(&self) -> bool {
        self.forward_mode == ForwardMode::Post && !self.provider_url.is_empty()
    }
}
