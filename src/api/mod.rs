//! Inspection API
//!
//! Typed access to the small REST facade that sits in front of the vector
//! database. [`SpyApi`] is the seam the rest of the crate depends on;
//! [`HttpClient`] is the reqwest-backed implementation.

pub mod client;

pub use client::HttpClient;

use crate::models::{AggregateResponse, CollectionInfo, Collections, HealthResponse, SearchResponse};
use crate::search::request::{AggregateRequest, GenerateRequest, SearchRequest};
use crate::types::SpyResult;
use async_trait::async_trait;

#[async_trait]
pub trait SpyApi: Send + Sync {
    /// `GET /health`
    async fn health(&self) -> SpyResult<HealthResponse>;

    /// `GET /schema`
    async fn schema(&self) -> SpyResult<Collections>;

    /// `GET /collection/{name}`
    async fn collection_info(&self, name: &str) -> SpyResult<CollectionInfo>;

    /// Plain fetch, semantic, keyword or hybrid search depending on the request's endpoint
    async fn search(&self, request: &SearchRequest) -> SpyResult<SearchResponse>;

    /// `POST /class/{collection}/generate`
    async fn generate(&self, collection: &str, request: &GenerateRequest)
        -> SpyResult<SearchResponse>;

    /// `POST /class/{collection}/aggregate`
    async fn aggregate(
        &self,
        collection: &str,
        request: &AggregateRequest,
    ) -> SpyResult<AggregateResponse>;
}
