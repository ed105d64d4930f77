//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the bot
//! starts polling.
//!
//! ## Required Variables
//!
//! - `BOT_TOKEN` - Telegram bot API token
//!
//! ## Optional Variables
//!
//! - `STORE_PATH` - Path of the JSON account store (default: `accounts.json`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `TRANSFER_DELAY_MS` - Pause between share transfers in milliseconds (default: 100)
//! - `REQUEST_TIMEOUT_SECS` - HTTP timeout for storage API calls (default: 30)

use anyhow::{Context, Result};
use std::env;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub store_path: String,
    pub log_level: String,
    pub log_format: String,
    /// Pause inserted after each successful share transfer, in milliseconds.
    pub transfer_delay_ms: u64,
    /// Timeout for every storage-service HTTP request, in seconds.
    pub request_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `BOT_TOKEN` is missing.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?;

        let store_path = env::var("STORE_PATH").unwrap_or_else(|_| "accounts.json".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let transfer_delay_ms = env::var("TRANSFER_DELAY_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(100);

        let request_timeout_secs = env::var("REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            bot_token,
            store_path,
            log_level,
            log_format,
            transfer_delay_ms,
            request_timeout_secs,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `bot_token` is empty or has no `:` separator
    /// - `log_format` is not `text` or `json`
    /// - `store_path` is empty
    /// - `request_timeout_secs` is zero or implausibly large
    pub fn validate(&self) -> Result<()> {
        // Telegram tokens look like "<numeric id>:<secret>"
        if self.bot_token.is_empty() || !self.bot_token.contains(':') {
            anyhow::bail!("BOT_TOKEN must be in format 'id:secret'");
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.store_path.is_empty() {
            anyhow::bail!("STORE_PATH must not be empty");
        }

        if self.request_timeout_secs == 0 || self.request_timeout_secs > 600 {
            anyhow::bail!(
                "REQUEST_TIMEOUT_SECS must be between 1 and 600, got {}",
                self.request_timeout_secs
            );
        }

        if self.transfer_delay_ms > 60_000 {
            anyhow::bail!(
                "TRANSFER_DELAY_MS is too large (max: 60000), got {}",
                self.transfer_delay_ms
            );
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Bot token: {}", mask_token(&self.bot_token));
        tracing::info!("  Store path: {}", self.store_path);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!("  Transfer delay: {}ms", self.transfer_delay_ms);
        tracing::info!("  Request timeout: {}s", self.request_timeout_secs);
    }
}

/// Masks the secret half of a bot token for logging.
///
/// `123456:AbCdEfGh` becomes `123456:***`.
fn mask_token(token: &str) -> String {
    match token.split_once(':') {
        Some((id, _)) => format!("{id}:***"),
        None => "***".to_string(),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
