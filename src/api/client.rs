//! HTTP client for the inspection API
//!
//! All requests are JSON. Non-2xx responses are turned into
//! [`SpyError::Api`] carrying the backend's `detail` string, or
//! `HTTP {status}` when the body has none.

use super::SpyApi;
use crate::config::Config;
use crate::models::{AggregateResponse, CollectionInfo, Collections, HealthResponse, SearchResponse};
use crate::search::request::{class_path, AggregateRequest, GenerateRequest, SearchRequest};
use crate::types::{SpyError, SpyResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    detail: Option<Value>,
}

#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
}

impl HttpClient {
    /// Create a client for `base_url`. No timeout beyond reqwest's defaults unless given.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> SpyResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| SpyError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> SpyResult<Self> {
        Self::new(
            &config.api_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> SpyResult<T> {
        debug!(path = %path, "GET");
        let response = self.client.get(self.url(path)).send().await?;
        read_json(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> SpyResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        debug!(path = %path, "POST");
        let response = self.client.post(self.url(path)).json(body).send().await?;
        read_json(response).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> SpyResult<T> {
    let status = response.status();
    let bytes = response.bytes().await?;

    if !status.is_success() {
        return Err(api_error(status, &bytes));
    }

    serde_json::from_slice(&bytes).map_err(|e| SpyError::Decode(e.to_string()))
}

/// Build an API error from a failed response body
fn api_error(status: StatusCode, body: &[u8]) -> SpyError {
    let detail = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| match detail {
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(s),
            Value::Null => None,
            // FastAPI validation errors carry a list of objects
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    SpyError::Api {
        status: status.as_u16(),
        detail,
    }
}

#[async_trait]
impl SpyApi for HttpClient {
    async fn health(&self) -> SpyResult<HealthResponse> {
        // The backend answers 503 with a regular health body when the database is down
        let response = self.client.get(self.url("/health")).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        match serde_json::from_slice::<HealthResponse>(&bytes) {
            Ok(health) => Ok(health),
            Err(_) if !status.is_success() => Err(api_error(status, &bytes)),
            Err(e) => Err(SpyError::Decode(e.to_string())),
        }
    }

    async fn schema(&self) -> SpyResult<Collections> {
        self.get_json("/schema").await
    }

    async fn collection_info(&self, name: &str) -> SpyResult<CollectionInfo> {
        self.get_json(&format!("/collection/{}", urlencoding::encode(name)))
            .await
    }

    async fn search(&self, request: &SearchRequest) -> SpyResult<SearchResponse> {
        debug!(
            endpoint = %request.path(),
            mode = %request.mode,
            offset = request.body.offset,
            limit = request.body.limit,
            "Search request"
        );
        self.post_json(&request.path(), &request.body).await
    }

    async fn generate(
        &self,
        collection: &str,
        request: &GenerateRequest,
    ) -> SpyResult<SearchResponse> {
        self.post_json(&class_path(collection, Some("generate")), request)
            .await
    }

    async fn aggregate(
        &self,
        collection: &str,
        request: &AggregateRequest,
    ) -> SpyResult<AggregateResponse> {
        self.post_json(&class_path(collection, Some("aggregate")), request)
            .await
    }
}
