//! Stored account configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One stored cloud-storage account: an opaque cookie credential plus named
/// destination folders.
///
/// Folder labels are unique per account and map to opaque folder identifiers
/// ("cid" in the storage service's terms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub cookie: String,
    #[serde(default)]
    pub folders: BTreeMap<String, String>,
}

impl Account {
    pub fn new(cookie: impl Into<String>) -> Self {
        Self {
            cookie: cookie.into(),
            folders: BTreeMap::new(),
        }
    }

    /// Returns the folder id when the account has exactly one folder.
    pub fn sole_folder(&self) -> Option<&str> {
        if self.folders.len() == 1 {
            self.folders.values().next().map(String::as_str)
        } else {
            None
        }
    }
}

/// Root of the persisted configuration: the single bound user (authorization
/// gate) plus all stored accounts keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBook {
    #[serde(default)]
    pub bound_user: Option<i64>,
    #[serde(default)]
    pub accounts: BTreeMap<String, Account>,
}

impl AccountBook {
    /// Returns the account when exactly one is configured.
    pub fn sole_account(&self) -> Option<(&str, &Account)> {
        if self.accounts.len() == 1 {
            self.accounts
                .iter()
                .next()
                .map(|(name, account)| (name.as_str(), account))
        } else {
            None
        }
    }

    /// True when `user_id` may operate the bot: either no user is bound yet,
    /// or the caller is the bound user.
    pub fn permits(&self, user_id: i64) -> bool {
        match self.bound_user {
            None => true,
            Some(bound) => bound == user_id,
        }
    }

    /// True when `user_id` is the currently bound user.
    pub fn is_bound_to(&self, user_id: i64) -> bool {
        self.bound_user == Some(user_id)
    }
}
