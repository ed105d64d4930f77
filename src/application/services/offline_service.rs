//! Offline-add operation: submitting download tasks to the account's queue.

use std::sync::Arc;

use crate::domain::entities::{CategoryReport, OperationOutcome};
use crate::domain::repositories::StorageClient;

const UNKNOWN_ERROR: &str = "unknown error";

/// Service for queueing offline-download tasks via the storage client.
///
/// Plain URLs travel as one batch (the remote exposes a multi-add endpoint
/// with a single result envelope); magnet and ed2k links are always
/// submitted one at a time. As with transfers, remote faults are converted
/// into failure outcomes here and never propagated.
pub struct OfflineService<S: StorageClient> {
    client: Arc<S>,
}

impl<S: StorageClient> OfflineService<S> {
    pub fn new(client: Arc<S>) -> Self {
        Self { client }
    }

    /// Submits all generic URLs as one batch.
    ///
    /// A single URL goes through the single-add endpoint, several through the
    /// indexed multi-add endpoint. The whole batch is credited as succeeded
    /// or failed together; on failure one aggregated reason covers the batch,
    /// since the remote cannot attribute failure to a specific URL.
    pub async fn add_url_batch(
        &self,
        urls: &[String],
        folder_id: Option<&str>,
    ) -> CategoryReport {
        let mut report = CategoryReport::default();
        if urls.is_empty() {
            return report;
        }

        let result = if urls.len() == 1 {
            self.client.add_offline_url(&urls[0], folder_id).await
        } else {
            self.client.add_offline_urls(urls, folder_id).await
        };

        let outcome = match result {
            Ok(receipt) if receipt.state => OperationOutcome::ok(),
            Ok(receipt) => OperationOutcome::fail(format!(
                "failed to add URL batch: {}",
                receipt.error_msg.unwrap_or_else(|| UNKNOWN_ERROR.to_string())
            )),
            Err(e) => OperationOutcome::fail(format!("failed to add URL batch: {e}")),
        };

        tracing::debug!(count = urls.len(), success = outcome.success, "offline URL batch");
        report.record_batch(urls.len(), outcome);
        report
    }

    /// Submits one magnet or ed2k link as its own offline task.
    pub async fn add_single(&self, url: &str, folder_id: Option<&str>) -> OperationOutcome {
        match self.client.add_offline_url(url, folder_id).await {
            Ok(receipt) if receipt.state => OperationOutcome::ok(),
            Ok(receipt) => OperationOutcome::fail(
                receipt.error_msg.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ),
            Err(e) => OperationOutcome::fail(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::storage_client::OfflineAddReceipt;
    use crate::domain::repositories::MockStorageClient;
    use crate::error::AppError;
    use serde_json::json;

    fn service(mock: MockStorageClient) -> OfflineService<MockStorageClient> {
        OfflineService::new(Arc::new(mock))
    }

    fn ok_receipt() -> OfflineAddReceipt {
        OfflineAddReceipt {
            state: true,
            error_msg: None,
        }
    }

    #[tokio::test]
    async fn test_empty_batch_is_a_noop() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url().times(0);
        mock.expect_add_offline_urls().times(0);

        let report = service(mock).add_url_batch(&[], Some("0")).await;
        assert_eq!(report.attempted(), 0);
    }

    #[tokio::test]
    async fn test_single_url_uses_single_add() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url()
            .withf(|url, folder| url == "http://example.com/a.zip" && folder == &Some("99"))
            .times(1)
            .returning(|_, _| Ok(ok_receipt()));
        mock.expect_add_offline_urls().times(0);

        let urls = vec!["http://example.com/a.zip".to_string()];
        let report = service(mock).add_url_batch(&urls, Some("99")).await;
        assert_eq!(report.success, 1);
        assert_eq!(report.failure, 0);
    }

    #[tokio::test]
    async fn test_multiple_urls_use_multi_add() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url().times(0);
        mock.expect_add_offline_urls()
            .withf(|urls, _| urls.len() == 3)
            .times(1)
            .returning(|_, _| Ok(ok_receipt()));

        let urls: Vec<String> = (0..3).map(|i| format!("http://example.com/{i}")).collect();
        let report = service(mock).add_url_batch(&urls, None).await;
        assert_eq!(report.success, 3);
    }

    #[tokio::test]
    async fn test_failed_batch_counts_every_url_with_one_reason() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_urls().times(1).returning(|_, _| {
            Ok(OfflineAddReceipt {
                state: false,
                error_msg: Some("daily quota reached".to_string()),
            })
        });

        let urls: Vec<String> = (0..3).map(|i| format!("http://example.com/{i}")).collect();
        let report = service(mock).add_url_batch(&urls, Some("0")).await;

        assert_eq!(report.success, 0);
        assert_eq!(report.failure, 3);
        assert_eq!(report.reasons.len(), 1);
        assert!(report.reasons[0].contains("daily quota reached"));
    }

    #[tokio::test]
    async fn test_batch_transport_fault_is_contained() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_urls()
            .times(1)
            .returning(|_, _| Err(AppError::storage("timeout", json!({}))));

        let urls: Vec<String> = (0..2).map(|i| format!("http://example.com/{i}")).collect();
        let report = service(mock).add_url_batch(&urls, None).await;
        assert_eq!(report.failure, 2);
        assert_eq!(report.reasons.len(), 1);
    }

    #[tokio::test]
    async fn test_add_single_success_and_failure() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url()
            .times(2)
            .returning(|url, _| {
                Ok(OfflineAddReceipt {
                    state: url.contains("good"),
                    error_msg: (!url.contains("good")).then(|| "task exists".to_string()),
                })
            });

        let service = service(mock);
        let ok = service.add_single("magnet:?xt=good", Some("0")).await;
        let bad = service.add_single("magnet:?xt=bad", Some("0")).await;

        assert!(ok.success);
        assert!(!bad.success);
        assert_eq!(bad.reason.as_deref(), Some("task exists"));
    }
}
