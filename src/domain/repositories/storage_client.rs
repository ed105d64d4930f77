//! Client trait for the remote cloud-storage account.

use crate::error::AppError;
use async_trait::async_trait;

/// Response envelope of the share-receive endpoint.
#[derive(Debug, Clone, Default)]
pub struct ShareReceipt {
    /// Remote status flag; `false` means the share was not saved.
    pub state: bool,
    /// Remote-supplied error message when `state` is `false`.
    pub error: Option<String>,
}

/// Response envelope of the offline-add endpoints.
#[derive(Debug, Clone, Default)]
pub struct OfflineAddReceipt {
    pub state: bool,
    pub error_msg: Option<String>,
}

/// Account information, used to verify a cookie when storing it.
#[derive(Debug, Clone)]
pub struct UserInfo {
    pub user_name: String,
}

/// Capability set the dispatch pipeline consumes from a storage account.
///
/// A client is bound to one account credential at construction time. Every
/// method may fail at the transport level; callers in the dispatch pipeline
/// convert such faults into failure outcomes instead of propagating them.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::WebStorageClient`] - 115 web API over HTTPS
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Redeems another user's share into the bound account.
    ///
    /// Issues exactly one remote call with `{share_code, receive_code, cid}`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on transport or protocol faults.
    async fn receive_share(
        &self,
        share_code: &str,
        receive_code: &str,
        folder_id: &str,
    ) -> Result<ShareReceipt, AppError>;

    /// Submits one URL/magnet/ed2k offline-download task.
    ///
    /// The destination folder is included in the payload only when supplied.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on transport or protocol faults.
    async fn add_offline_url<'a>(
        &self,
        url: &str,
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError>;

    /// Submits several URLs as one indexed batch (`url[0]`, `url[1]`, …).
    ///
    /// The remote endpoint reports one envelope for the whole batch; per-item
    /// attribution is not available on this path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on transport or protocol faults.
    async fn add_offline_urls<'a>(
        &self,
        urls: &[String],
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError>;

    /// Fetches account information for the bound credential.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] when the cookie is invalid or the
    /// endpoint is unreachable.
    async fn user_info(&self) -> Result<UserInfo, AppError>;
}
