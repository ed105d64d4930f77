//! Mixed dispatcher: classification plus multi-target fan-out.

use std::sync::Arc;
use std::time::Duration;

use crate::application::services::{OfflineService, TransferService};
use crate::domain::classifier::classify;
use crate::domain::entities::{MessageEntity, MixedReport};
use crate::domain::repositories::StorageClient;

/// Sentinel reason attached when a message yields no link at all, so the
/// renderer always has something to show. It lives on the offline category
/// even though no offline attempt occurred.
pub const NO_LINKS_FOUND: &str = "no valid link found";

/// Orchestrates one inbound message against one destination folder.
///
/// Classifies the message, drives share links through the transfer service
/// and the other three families through the offline service, and folds every
/// per-item outcome into a [`MixedReport`]. This method never fails: all
/// remote trouble is carried inside the report.
pub struct DispatchService<S: StorageClient> {
    transfer: TransferService<S>,
    offline: OfflineService<S>,
}

impl<S: StorageClient> DispatchService<S> {
    pub fn new(client: Arc<S>, courtesy_delay: Duration) -> Self {
        Self {
            transfer: TransferService::new(client.clone(), courtesy_delay),
            offline: OfflineService::new(client),
        }
    }

    /// Runs the full pipeline for one message.
    pub async fn dispatch(
        &self,
        text: &str,
        folder_id: &str,
        entities: &[MessageEntity],
    ) -> MixedReport {
        let links = classify(text, entities);
        tracing::info!(
            share = links.share.len(),
            generic = links.generic.len(),
            magnet = links.magnet.len(),
            ed2k = links.ed2k.len(),
            "dispatching classified links"
        );

        let mut report = MixedReport::default();

        report.share = self.transfer.transfer_all(&links.share, folder_id).await;

        if !links.generic.is_empty() {
            report
                .offline
                .merge(self.offline.add_url_batch(&links.generic, Some(folder_id)).await);
        }

        for ed2k in &links.ed2k {
            let outcome = self.offline.add_single(ed2k, Some(folder_id)).await;
            report.offline.record_item(ed2k, outcome);
        }

        for magnet in &links.magnet {
            let outcome = self.offline.add_single(magnet, Some(folder_id)).await;
            report.offline.record_item(magnet, outcome);
        }

        if links.is_empty() {
            report.offline.reasons.push(NO_LINKS_FOUND.to_string());
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::storage_client::{OfflineAddReceipt, ShareReceipt};
    use crate::domain::repositories::MockStorageClient;

    fn service(mock: MockStorageClient) -> DispatchService<MockStorageClient> {
        DispatchService::new(Arc::new(mock), Duration::ZERO)
    }

    #[tokio::test]
    async fn test_dispatch_share_and_magnet() {
        let mut mock = MockStorageClient::new();
        mock.expect_receive_share()
            .withf(|share, receive, cid| share == "abc123" && receive == "xyz9" && cid == "7")
            .times(1)
            .returning(|_, _, _| {
                Ok(ShareReceipt {
                    state: true,
                    error: None,
                })
            });
        mock.expect_add_offline_url()
            .withf(|url, folder| url == "magnet:?xt=urn:btih:ABCDEF" && folder == &Some("7"))
            .times(1)
            .returning(|_, _| {
                Ok(OfflineAddReceipt {
                    state: true,
                    error_msg: None,
                })
            });

        let text = "看看这个 https://115.com/s/abc123?password=xyz9 还有 magnet:?xt=urn:btih:ABCDEF";
        let report = service(mock).dispatch(text, "7", &[]).await;

        assert_eq!(report.share.success, 1);
        assert_eq!(report.share.failure, 0);
        assert_eq!(report.offline.success, 1);
        assert_eq!(report.offline.failure, 0);
        assert!(report.offline.reasons.is_empty());
    }

    #[tokio::test]
    async fn test_dispatch_without_links_reports_sentinel() {
        let mock = MockStorageClient::new();
        let report = service(mock).dispatch("just chatting", "0", &[]).await;

        assert_eq!(report.share.success, 0);
        assert_eq!(report.share.failure, 0);
        assert_eq!(report.offline.success, 0);
        assert_eq!(report.offline.failure, 0);
        assert_eq!(report.offline.reasons, vec![NO_LINKS_FOUND]);
    }

    #[tokio::test]
    async fn test_dispatch_failed_url_batch() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_urls().times(1).returning(|_, _| {
            Ok(OfflineAddReceipt {
                state: false,
                error_msg: Some("service unavailable".to_string()),
            })
        });

        let text = "http://a.example/x http://b.example/y http://c.example/z";
        let report = service(mock).dispatch(text, "0", &[]).await;

        assert_eq!(report.offline.success, 0);
        assert_eq!(report.offline.failure, 3);
        assert_eq!(report.offline.reasons.len(), 1);
    }

    #[tokio::test]
    async fn test_dispatch_ed2k_per_item_accounting() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url()
            .times(3)
            .returning(|url, _| {
                Ok(OfflineAddReceipt {
                    state: !url.contains("bad"),
                    error_msg: url.contains("bad").then(|| "rejected".to_string()),
                })
            });

        let text = "ed2k://|file|good1|1|AAAA|/\ned2k://|file|bad|2|BBBB|/\ned2k://|file|good2|3|CCCC|/";
        let report = service(mock).dispatch(text, "0", &[]).await;

        assert_eq!(report.offline.success, 2);
        assert_eq!(report.offline.failure, 1);
        assert_eq!(report.offline.reasons.len(), 1);
        assert!(report.offline.reasons[0].contains("rejected"));
    }

    #[tokio::test]
    async fn test_dispatch_uses_entities() {
        let mut mock = MockStorageClient::new();
        mock.expect_add_offline_url()
            .withf(|url, _| url == "magnet:?xt=urn:btih:FEED")
            .times(1)
            .returning(|_, _| {
                Ok(OfflineAddReceipt {
                    state: true,
                    error_msg: None,
                })
            });

        let entities = vec![MessageEntity::TextLink(
            "magnet:?xt=urn:btih:FEED".to_string(),
        )];
        let report = service(mock).dispatch("click here", "0", &entities).await;
        assert_eq!(report.offline.success, 1);
    }
}
