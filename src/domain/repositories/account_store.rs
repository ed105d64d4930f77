//! Persistence trait for the account configuration.

use crate::domain::entities::AccountBook;
use crate::error::AppError;
use async_trait::async_trait;

/// Read/write access to the persisted [`AccountBook`].
///
/// The dispatch pipeline only ever reads; mutation happens in the binding
/// gate and the settings wizard. Durability is last-write-wins: every save
/// replaces the whole book.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonAccountStore`] - JSON file on disk
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Loads the current book. A missing backing file yields the default
    /// (empty) book rather than an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the backing store exists but cannot
    /// be read or parsed.
    async fn load(&self) -> Result<AccountBook, AppError>;

    /// Replaces the persisted book.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] when the book cannot be written.
    async fn save(&self, book: &AccountBook) -> Result<(), AppError>;
}
