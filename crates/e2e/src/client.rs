//! Thin HTTP layer over the platform API
//!
//! The client owns the base URL and the shared `reqwest` connection pool;
//! factories clone it freely. It maps transport failures to
//! [`HarnessError::Http`] and hands non-success responses back to the
//! caller, because which error variant a status code becomes depends on
//! the operation being performed.

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use serde::Serialize;

/// Client wrapper for platform API communication
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client from harness configuration
    pub fn new(config: &HarnessConfig) -> HarnessResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL the client is pointed at
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> HarnessResult<reqwest::Response> {
        Ok(self.http.post(self.url(path)).json(body).send().await?)
    }

    pub async fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> HarnessResult<reqwest::Response> {
        Ok(self.http.patch(self.url(path)).json(body).send().await?)
    }

    /// PATCH without a body, for bare transition endpoints
    pub async fn patch_empty(&self, path: &str) -> HarnessResult<reqwest::Response> {
        Ok(self.http.patch(self.url(path)).send().await?)
    }

    pub async fn get(&self, path: &str) -> HarnessResult<reqwest::Response> {
        Ok(self.http.get(self.url(path)).send().await?)
    }

    pub async fn get_with_bearer(
        &self,
        path: &str,
        token: &str,
    ) -> HarnessResult<reqwest::Response> {
        Ok(self
            .http
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str) -> HarnessResult<reqwest::Response> {
        Ok(self.http.delete(self.url(path)).send().await?)
    }
}

/// Read the body of a failed response for error context
pub(crate) async fn error_body(resp: reqwest::Response) -> String {
    resp.text().await.unwrap_or_default()
}
