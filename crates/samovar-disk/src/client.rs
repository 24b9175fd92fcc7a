//! Yandex Disk API client.

use std::time::Duration;

use tracing::instrument;

use crate::error::DiskError;
use crate::types::*;

const DISK_API_BASE: &str = "https://cloud-api.yandex.net/v1/disk";
const REQUEST_TIMEOUT_SECS: u64 = 10;

pub struct DiskClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
}

impl DiskClient {
    pub fn new(access_token: &str) -> Result<Self, DiskError> {
        Self::with_base_url(access_token, DISK_API_BASE)
    }

    /// Client against a non-default endpoint (tests, mirrors).
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self, DiskError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            access_token: access_token.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn auth_header(&self) -> String {
        format!("OAuth {}", self.access_token)
    }

    /// List resources under a path, at most `limit` entries.
    #[instrument(skip(self), level = "info")]
    pub async fn list_files(&self, path: &str, limit: u32) -> Result<Vec<Resource>, DiskError> {
        let url = format!(
            "{}/resources?path={}&limit={}",
            self.base_url,
            urlencoding::encode(path),
            limit,
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        let resp: ResourceListResponse = self.handle_response(response).await?;
        Ok(resp.embedded.unwrap_or_default().items)
    }

    /// Quota and usage information for the disk.
    #[instrument(skip(self), level = "info")]
    pub async fn disk_info(&self) -> Result<DiskInfo, DiskError> {
        let response = self
            .client
            .get(&self.base_url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Helper to handle API responses and errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, DiskError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| DiskError::InvalidResponse(e.to_string()))
        } else if status.as_u16() == 401 {
            Err(DiskError::Unauthorized)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(DiskError::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
