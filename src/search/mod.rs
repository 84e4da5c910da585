//! Search Module
//!
//! Query dispatch for collection views:
//! - Request building: picks the fetch, semantic, BM25 or hybrid endpoint and its body
//! - Pagination: page / page size / total bookkeeping
//! - Dispatch: sends requests, folds failures into empty pages, orders them by epoch
//! - Session: the search controls of one collection view

pub mod dispatcher;
pub mod page;
pub mod request;
pub mod session;

pub use dispatcher::{dispatch, Epoch, EpochCounter, PageResult};
pub use page::{PageState, DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};
pub use request::{
    AggregateRequest, Endpoint, GenerateRequest, SearchParams, SearchRequest, DEFAULT_ALPHA,
    DEFAULT_CERTAINTY,
};
pub use session::SearchSession;
