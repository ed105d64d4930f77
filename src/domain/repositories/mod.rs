//! Trait definitions for the domain layer's external collaborators.
//!
//! # Architecture
//!
//! - Traits define the contract for persistence and remote-storage access
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Traits
//!
//! - [`AccountStore`] - Account/folder configuration persistence
//! - [`StorageClient`] - Remote cloud-storage capability set

pub mod account_store;
pub mod storage_client;

pub use account_store::AccountStore;
pub use storage_client::{OfflineAddReceipt, ShareReceipt, StorageClient, UserInfo};

#[cfg(test)]
pub use account_store::MockAccountStore;
#[cfg(test)]
pub use storage_client::MockStorageClient;
