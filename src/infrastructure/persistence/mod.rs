//! Persistence implementations.

pub mod json_account_store;

pub use json_account_store::JsonAccountStore;
