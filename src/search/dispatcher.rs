//! Query Dispatch
//!
//! Sends a [`SearchRequest`] and folds every failure into an empty page.
//! Ordering between overlapping requests is decided with request epochs:
//! each dispatch takes a fresh epoch, and a response is only applied while
//! its epoch is still the latest one issued.

use super::request::SearchRequest;
use crate::api::SpyApi;
use crate::models::{ResultRow, SearchType};
use tracing::{debug, error};

/// Monotonic identifier of an issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    pub fn value(&self) -> u64 {
        self.0
    }
}

/// Issues epochs and answers whether one is still current
#[derive(Debug, Default)]
pub struct EpochCounter {
    latest: u64,
}

impl EpochCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next epoch; every earlier epoch becomes stale
    pub fn advance(&mut self) -> Epoch {
        self.latest += 1;
        Epoch(self.latest)
    }

    pub fn is_current(&self, epoch: Epoch) -> bool {
        epoch.0 == self.latest
    }

    pub fn latest(&self) -> Option<Epoch> {
        (self.latest > 0).then_some(Epoch(self.latest))
    }
}

/// Outcome of one dispatch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageResult {
    pub rows: Vec<ResultRow>,
    pub total: u64,
    pub search_type: Option<SearchType>,
    /// Failure message when the request did not succeed
    pub error: Option<String>,
}

impl PageResult {
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Default::default()
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Send `request` and return its page; never fails
pub async fn dispatch(api: &dyn SpyApi, request: &SearchRequest) -> PageResult {
    debug!(
        collection = %request.collection,
        endpoint = %request.path(),
        mode = %request.mode,
        offset = request.body.offset,
        limit = request.body.limit,
        "Fetching data"
    );

    match api.search(request).await {
        Ok(response) => {
            debug!(
                collection = %request.collection,
                rows = response.data.len(),
                count = response.count,
                "Response received"
            );
            PageResult {
                rows: response.data,
                total: response.count,
                search_type: response.search_type,
                error: None,
            }
        }
        Err(e) => {
            error!(
                collection = %request.collection,
                endpoint = %request.path(),
                error = %e,
                "Failed to fetch data"
            );
            PageResult::failed(e.to_string())
        }
    }
}
