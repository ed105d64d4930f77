//! Share-transfer operation: redeeming shared folders into the bound account.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::classifier::extract_share_info;
use crate::domain::entities::{CategoryReport, OperationOutcome};
use crate::domain::repositories::StorageClient;

/// Fallback reason when the remote flags a failure without a message.
const UNKNOWN_ERROR: &str = "unknown error";

/// Service for redeeming share links via the storage client.
///
/// Each link costs exactly one remote call. Remote faults are converted into
/// failure outcomes at this boundary; nothing here ever returns `Err`.
pub struct TransferService<S: StorageClient> {
    client: Arc<S>,
    /// Courtesy pause after each successful transfer, so bursts of links do
    /// not hammer the remote endpoint.
    courtesy_delay: Duration,
}

impl<S: StorageClient> TransferService<S> {
    pub fn new(client: Arc<S>, courtesy_delay: Duration) -> Self {
        Self {
            client,
            courtesy_delay,
        }
    }

    /// Redeems one share into `folder_id`.
    ///
    /// Success mirrors the remote's boolean status flag; a falsy flag or a
    /// transport fault becomes a failure outcome with a readable reason.
    pub async fn transfer_share(
        &self,
        share_code: &str,
        receive_code: &str,
        folder_id: &str,
    ) -> OperationOutcome {
        match self
            .client
            .receive_share(share_code, receive_code, folder_id)
            .await
        {
            Ok(receipt) if receipt.state => OperationOutcome::ok(),
            Ok(receipt) => {
                OperationOutcome::fail(receipt.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()))
            }
            Err(e) => OperationOutcome::fail(e.to_string()),
        }
    }

    /// Redeems every classified share link sequentially into `folder_id`.
    ///
    /// Links whose `(share_code, receive_code)` pair cannot be re-extracted
    /// are skipped silently; classification already filtered them, so this is
    /// a re-check, not an error path. Successful transfers are followed by
    /// the courtesy delay before the next one is issued.
    pub async fn transfer_all(&self, links: &[String], folder_id: &str) -> CategoryReport {
        let mut report = CategoryReport::default();

        for link in links {
            let Some((share_code, receive_code)) = extract_share_info(link) else {
                continue;
            };

            let outcome = self
                .transfer_share(&share_code, &receive_code, folder_id)
                .await;

            if outcome.success {
                tracing::debug!(link, "share transfer succeeded");
                report.record_item(link, outcome);
                tokio::time::sleep(self.courtesy_delay).await;
            } else {
                tracing::debug!(link, reason = ?outcome.reason, "share transfer failed");
                report.record_item(link, outcome);
            }
        }

        report
    }
}
