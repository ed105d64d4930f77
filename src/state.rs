use std::sync::Arc;
use std::time::Duration;

use crate::application::sessions::SessionStore;
use crate::config::Config;
use crate::domain::entities::AccountBook;
use crate::domain::repositories::AccountStore;
use crate::error::AppError;
use crate::infrastructure::persistence::JsonAccountStore;
use crate::infrastructure::storage::WebStorageClient;

/// Shared state handed to every handler through the dispatcher.
pub struct AppState {
    pub store: Arc<JsonAccountStore>,
    pub sessions: SessionStore,
    /// Pause between consecutive share transfers.
    pub transfer_delay: Duration,
    /// Timeout applied to every storage API request.
    pub request_timeout: Duration,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            store: Arc::new(JsonAccountStore::new(&config.store_path)),
            sessions: SessionStore::new(),
            transfer_delay: Duration::from_millis(config.transfer_delay_ms),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    /// Loads the current account configuration.
    pub async fn store_book(&self) -> Result<AccountBook, AppError> {
        self.store.load().await
    }

    /// Builds a storage client for one account cookie, with the configured
    /// request timeout.
    pub fn storage_client(&self, cookie: &str) -> Result<WebStorageClient, AppError> {
        WebStorageClient::new(cookie, self.request_timeout)
    }
}
