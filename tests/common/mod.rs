//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;

use pansaver::domain::repositories::{OfflineAddReceipt, ShareReceipt, StorageClient, UserInfo};
use pansaver::error::AppError;

/// One recorded storage-client invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ReceiveShare {
        share_code: String,
        receive_code: String,
        folder_id: String,
    },
    AddUrl {
        url: String,
        folder_id: Option<String>,
    },
    AddUrls {
        urls: Vec<String>,
        folder_id: Option<String>,
    },
}

/// Scripted [`StorageClient`] that records every call and fails items whose
/// identifier contains `fail_matching`.
#[derive(Default)]
pub struct ScriptedStorage {
    pub calls: Mutex<Vec<Call>>,
    pub fail_matching: Option<String>,
}

impl ScriptedStorage {
    pub fn failing(substring: &str) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_matching: Some(substring.to_string()),
        }
    }

    pub fn recorded(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn should_fail(&self, subject: &str) -> bool {
        self.fail_matching
            .as_deref()
            .is_some_and(|needle| subject.contains(needle))
    }
}

#[async_trait]
impl StorageClient for ScriptedStorage {
    async fn receive_share(
        &self,
        share_code: &str,
        receive_code: &str,
        folder_id: &str,
    ) -> Result<ShareReceipt, AppError> {
        self.calls.lock().unwrap().push(Call::ReceiveShare {
            share_code: share_code.to_string(),
            receive_code: receive_code.to_string(),
            folder_id: folder_id.to_string(),
        });

        let failed = self.should_fail(share_code);
        Ok(ShareReceipt {
            state: !failed,
            error: failed.then(|| "share expired".to_string()),
        })
    }

    async fn add_offline_url<'a>(
        &self,
        url: &str,
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError> {
        self.calls.lock().unwrap().push(Call::AddUrl {
            url: url.to_string(),
            folder_id: folder_id.map(str::to_string),
        });

        let failed = self.should_fail(url);
        Ok(OfflineAddReceipt {
            state: !failed,
            error_msg: failed.then(|| "task rejected".to_string()),
        })
    }

    async fn add_offline_urls<'a>(
        &self,
        urls: &[String],
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError> {
        self.calls.lock().unwrap().push(Call::AddUrls {
            urls: urls.to_vec(),
            folder_id: folder_id.map(str::to_string),
        });

        let failed = urls.iter().any(|url| self.should_fail(url));
        Ok(OfflineAddReceipt {
            state: !failed,
            error_msg: failed.then(|| "task rejected".to_string()),
        })
    }

    async fn user_info(&self) -> Result<UserInfo, AppError> {
        Ok(UserInfo {
            user_name: "tester".to_string(),
        })
    }
}
