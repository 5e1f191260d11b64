//! Shared HTTP plumbing for the resource services.

use crate::{ClientError, ClientResult};
use clinident_core::ApiConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;

/// One configured HTTP client shared by every resource service.
///
/// Cloning is cheap (the underlying `reqwest::Client` is an `Arc` pool),
/// so each service holds its own clone.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ApiConfig>,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> ClientResult<T> {
        tracing::debug!(url, "GET");
        let response = self.http.get(url).send().await?;
        Self::decode(Self::check(url, response).await?).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(url, "POST");
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(Self::check(url, response).await?).await
    }

    pub(crate) async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        url: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(url, "PUT");
        let response = self.http.put(url).json(body).send().await?;
        Self::decode(Self::check(url, response).await?).await
    }

    pub(crate) async fn delete(&self, url: &str) -> ClientResult<()> {
        tracing::debug!(url, "DELETE");
        let response = self.http.delete(url).send().await?;
        Self::check(url, response).await?;
        Ok(())
    }

    /// Turn a non-2xx answer into a structured error carrying the body,
    /// which is where this API reports its reasons.
    async fn check(url: &str, response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        tracing::error!(url, status = status.as_u16(), "request failed");
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        response.json::<T>().await.map_err(ClientError::Decode)
    }
}
