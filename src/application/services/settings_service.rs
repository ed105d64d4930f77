//! Account and folder configuration management.
//!
//! Backs the interactive settings wizard: every mutation re-loads the book,
//! validates against duplicates, and saves it back (last write wins).

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{Account, AccountBook};
use crate::domain::repositories::AccountStore;
use crate::error::AppError;

/// CRUD over stored accounts and their destination folders.
///
/// Duplicate checks return [`AppError::Validation`]; the wizard re-prompts on
/// those instead of aborting.
pub struct SettingsService<A: AccountStore> {
    store: Arc<A>,
}

impl<A: AccountStore> SettingsService<A> {
    pub fn new(store: Arc<A>) -> Self {
        Self { store }
    }

    /// Current configuration snapshot.
    pub async fn book(&self) -> Result<AccountBook, AppError> {
        self.store.load().await
    }

    /// Adds a new account with its first folder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the account name is taken or the
    /// cookie is already stored under another account.
    pub async fn add_account(
        &self,
        name: &str,
        cookie: &str,
        folder_label: &str,
        folder_id: &str,
    ) -> Result<(), AppError> {
        let mut book = self.store.load().await?;

        if book.accounts.contains_key(name) {
            return Err(AppError::validation(
                "account name already exists",
                json!({ "name": name }),
            ));
        }
        if book.accounts.values().any(|a| a.cookie == cookie) {
            return Err(AppError::validation(
                "cookie already stored under another account",
                json!({}),
            ));
        }

        let mut account = Account::new(cookie);
        account
            .folders
            .insert(folder_label.to_string(), folder_id.to_string());
        book.accounts.insert(name.to_string(), account);

        self.store.save(&book).await?;
        tracing::info!(name, "account added");
        Ok(())
    }

    /// Removes an account and all of its folders.
    ///
    /// Returns `Ok(false)` when no such account exists.
    pub async fn delete_account(&self, name: &str) -> Result<bool, AppError> {
        let mut book = self.store.load().await?;
        if book.accounts.remove(name).is_none() {
            return Ok(false);
        }
        self.store.save(&book).await?;
        tracing::info!(name, "account deleted");
        Ok(true)
    }

    /// Replaces an account's cookie.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the account does not exist.
    pub async fn update_cookie(&self, name: &str, cookie: &str) -> Result<(), AppError> {
        let mut book = self.store.load().await?;
        let Some(account) = book.accounts.get_mut(name) else {
            return Err(AppError::validation(
                "no such account",
                json!({ "name": name }),
            ));
        };
        account.cookie = cookie.to_string();
        self.store.save(&book).await?;
        Ok(())
    }

    /// Adds a folder to an existing account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] when the account does not exist, the
    /// label is taken, or the folder id is already registered on the account.
    pub async fn add_folder(
        &self,
        account_name: &str,
        label: &str,
        folder_id: &str,
    ) -> Result<(), AppError> {
        let mut book = self.store.load().await?;
        let Some(account) = book.accounts.get_mut(account_name) else {
            return Err(AppError::validation(
                "no such account",
                json!({ "name": account_name }),
            ));
        };

        if account.folders.contains_key(label) {
            return Err(AppError::validation(
                "folder label already exists",
                json!({ "label": label }),
            ));
        }
        if account.folders.values().any(|cid| cid == folder_id) {
            return Err(AppError::validation(
                "folder id already registered",
                json!({ "folder_id": folder_id }),
            ));
        }

        account
            .folders
            .insert(label.to_string(), folder_id.to_string());
        self.store.save(&book).await?;
        Ok(())
    }

    /// Removes a folder from an account.
    ///
    /// Returns `Ok(false)` when the account or label does not exist.
    pub async fn delete_folder(&self, account_name: &str, label: &str) -> Result<bool, AppError> {
        let mut book = self.store.load().await?;
        let Some(account) = book.accounts.get_mut(account_name) else {
            return Ok(false);
        };
        if account.folders.remove(label).is_none() {
            return Ok(false);
        }
        self.store.save(&book).await?;
        Ok(true)
    }
}
