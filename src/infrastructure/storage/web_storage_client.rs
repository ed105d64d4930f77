//! 115 web-API implementation of [`StorageClient`].
//!
//! Speaks the cookie-authenticated form endpoints of the 115 web interface:
//! share receive, offline-task add (single and indexed batch), and the nav
//! endpoint used to verify a cookie. Endpoint semantics: every response is a
//! JSON envelope carrying a boolean `state` flag plus an optional error
//! string; a falsy flag is a *domain* failure and is surfaced in the receipt,
//! while transport and decode problems become [`AppError::Storage`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::domain::repositories::{OfflineAddReceipt, ShareReceipt, StorageClient, UserInfo};
use crate::error::AppError;

const SHARE_RECEIVE_URL: &str = "https://webapi.115.com/share/receive";
const OFFLINE_ADD_URL: &str = "https://115.com/web/lixian/?ct=lixian&ac=add_task_url";
const OFFLINE_ADD_URLS_URL: &str = "https://115.com/web/lixian/?ct=lixian&ac=add_task_urls";
const USER_NAV_URL: &str = "https://my.115.com/?ct=ajax&ac=nav";

const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko)";

#[derive(Debug, Deserialize)]
struct ShareEnvelope {
    #[serde(default)]
    state: bool,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OfflineEnvelope {
    #[serde(default)]
    state: bool,
    #[serde(default)]
    error_msg: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct NavData {
    #[serde(default)]
    user_name: String,
}

#[derive(Debug, Deserialize)]
struct NavEnvelope {
    #[serde(default)]
    state: bool,
    #[serde(default)]
    data: Option<NavData>,
}

/// HTTPS client bound to one account cookie.
pub struct WebStorageClient {
    http: reqwest::Client,
    cookie: String,
}

impl WebStorageClient {
    /// Builds a client for the given cookie credential.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] when the underlying HTTP client cannot
    /// be constructed.
    pub fn new(cookie: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| {
                AppError::storage(
                    "failed to build HTTP client",
                    json!({ "reason": e.to_string() }),
                )
            })?;

        Ok(Self {
            http,
            cookie: cookie.into(),
        })
    }

    async fn post_form<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        form: &[(String, String)],
    ) -> Result<T, AppError> {
        let response = self
            .http
            .post(url)
            .header(reqwest::header::COOKIE, &self.cookie)
            .form(form)
            .send()
            .await?
            .error_for_status()?;

        let envelope = response.json::<T>().await.map_err(|e| {
            AppError::storage(
                "undecodable response envelope",
                json!({ "url": url, "reason": e.to_string() }),
            )
        })?;
        Ok(envelope)
    }
}

/// Builds the indexed form payload for the multi-add endpoint
/// (`url[0]`, `url[1]`, …).
fn indexed_url_params(urls: &[String]) -> Vec<(String, String)> {
    urls.iter()
        .enumerate()
        .map(|(i, url)| (format!("url[{i}]"), url.clone()))
        .collect()
}

#[async_trait]
impl StorageClient for WebStorageClient {
    async fn receive_share(
        &self,
        share_code: &str,
        receive_code: &str,
        folder_id: &str,
    ) -> Result<ShareReceipt, AppError> {
        let form = vec![
            ("share_code".to_string(), share_code.to_string()),
            ("receive_code".to_string(), receive_code.to_string()),
            ("cid".to_string(), folder_id.to_string()),
        ];

        let envelope: ShareEnvelope = self.post_form(SHARE_RECEIVE_URL, &form).await?;
        Ok(ShareReceipt {
            state: envelope.state,
            error: envelope.error,
        })
    }

    async fn add_offline_url<'a>(
        &self,
        url: &str,
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError> {
        let mut form = vec![("url".to_string(), url.to_string())];
        if let Some(folder_id) = folder_id {
            form.push(("wp_path_id".to_string(), folder_id.to_string()));
        }

        let envelope: OfflineEnvelope = self.post_form(OFFLINE_ADD_URL, &form).await?;
        Ok(OfflineAddReceipt {
            state: envelope.state,
            error_msg: envelope.error_msg,
        })
    }

    async fn add_offline_urls<'a>(
        &self,
        urls: &[String],
        folder_id: Option<&'a str>,
    ) -> Result<OfflineAddReceipt, AppError> {
        let mut form = indexed_url_params(urls);
        if let Some(folder_id) = folder_id {
            form.push(("wp_path_id".to_string(), folder_id.to_string()));
        }

        let envelope: OfflineEnvelope = self.post_form(OFFLINE_ADD_URLS_URL, &form).await?;
        Ok(OfflineAddReceipt {
            state: envelope.state,
            error_msg: envelope.error_msg,
        })
    }

    async fn user_info(&self) -> Result<UserInfo, AppError> {
        let response = self
            .http
            .get(USER_NAV_URL)
            .header(reqwest::header::COOKIE, &self.cookie)
            .send()
            .await?
            .error_for_status()?;

        let envelope = response.json::<NavEnvelope>().await.map_err(|e| {
            AppError::storage(
                "undecodable response envelope",
                json!({ "url": USER_NAV_URL, "reason": e.to_string() }),
            )
        })?;

        if !envelope.state {
            return Err(AppError::storage(
                "cookie rejected by storage service",
                json!({}),
            ));
        }

        Ok(UserInfo {
            user_name: envelope.data.unwrap_or_default().user_name,
        })
    }
}
