//! Remote storage-service implementations.

pub mod web_storage_client;

pub use web_storage_client::WebStorageClient;
