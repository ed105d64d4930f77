//! JSON-file implementation of [`AccountStore`].

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::json;

use crate::domain::entities::AccountBook;
use crate::domain::repositories::AccountStore;
use crate::error::AppError;

/// Account store backed by a single JSON file.
///
/// The whole book is rewritten on every save; there is no locking or journal,
/// just last-write-wins. A missing file reads as the empty book so first
/// startup needs no provisioning step.
pub struct JsonAccountStore {
    path: PathBuf,
}

impl JsonAccountStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl AccountStore for JsonAccountStore {
    async fn load(&self) -> Result<AccountBook, AppError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(AccountBook::default());
            }
            Err(e) => {
                return Err(AppError::store(
                    "failed to read account store",
                    json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
                ));
            }
        };

        let book = serde_json::from_slice(&raw).map_err(|e| {
            AppError::store(
                "account store file is not valid JSON",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })?;
        Ok(book)
    }

    async fn save(&self, book: &AccountBook) -> Result<(), AppError> {
        let raw = serde_json::to_vec_pretty(book)?;
        tokio::fs::write(&self.path, raw).await.map_err(|e| {
            AppError::store(
                "failed to write account store",
                json!({ "path": self.path.display().to_string(), "reason": e.to_string() }),
            )
        })?;
        Ok(())
    }
}
