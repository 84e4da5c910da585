//! Search Session
//!
//! Holds the search controls and the currently displayed page for one
//! collection view. Any parameter change resets the page to 1. Responses are
//! only accepted for the latest issued epoch.

use super::dispatcher::{Epoch, EpochCounter, PageResult};
use super::page::PageState;
use super::request::{SearchParams, SearchRequest};
use crate::models::{Collection, Property, ResultRow, SearchMode};
use crate::presenter::{self, ResultTable};
use tracing::debug;

/// Slider step for the certainty threshold
pub const CERTAINTY_STEP: f64 = 0.05;

/// Slider step for the hybrid alpha
pub const ALPHA_STEP: f64 = 0.1;

pub struct SearchSession {
    collection: Option<String>,
    /// Snapshot used for both the projection list and the table columns
    properties: Vec<Property>,
    mode: SearchMode,
    query: String,
    params: SearchParams,
    page: PageState,
    rows: Vec<ResultRow>,
    /// Mode of the request that produced `rows`
    shown_mode: SearchMode,
    epochs: EpochCounter,
    loading: bool,
    last_error: Option<String>,
}

impl SearchSession {
    pub fn new(page_size: usize, params: SearchParams) -> Self {
        Self {
            collection: None,
            properties: Vec::new(),
            mode: SearchMode::default(),
            query: String::new(),
            params,
            page: PageState::new(page_size),
            rows: Vec::new(),
            shown_mode: SearchMode::default(),
            epochs: EpochCounter::new(),
            loading: false,
            last_error: None,
        }
    }

    /// Switch to a collection. Clears the query and results, keeps mode and parameters.
    pub fn open(&mut self, collection: &Collection) {
        self.collection = Some(collection.name.clone());
        self.properties = collection.properties.clone();
        self.query.clear();
        self.rows.clear();
        self.page.reset();
        self.page.total = 0;
        self.last_error = None;
        self.loading = false;
        // Anything still in flight belongs to the previous collection
        self.epochs.advance();
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn params(&self) -> SearchParams {
        self.params
    }

    pub fn page(&self) -> &PageState {
        &self.page
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn shown_mode(&self) -> SearchMode {
        self.shown_mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Returns true when the mode changed (and the page was reset)
    pub fn set_mode(&mut self, mode: SearchMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        self.page.reset();
        true
    }

    pub fn cycle_mode(&mut self) -> bool {
        self.set_mode(self.mode.next())
    }

    pub fn set_query(&mut self, query: &str) -> bool {
        if self.query == query {
            return false;
        }
        self.query = query.to_string();
        self.page.reset();
        true
    }

    pub fn set_certainty(&mut self, certainty: f64) -> bool {
        let certainty = clamp_unit(certainty);
        if self.params.certainty == certainty {
            return false;
        }
        self.params.certainty = certainty;
        self.page.reset();
        true
    }

    pub fn set_alpha(&mut self, alpha: f64) -> bool {
        let alpha = clamp_unit(alpha);
        if self.params.alpha == alpha {
            return false;
        }
        self.params.alpha = alpha;
        self.page.reset();
        true
    }

    /// Nudge whichever parameter the current mode uses. Keyword mode has none.
    pub fn adjust_parameter(&mut self, steps: i32) -> bool {
        match self.mode {
            SearchMode::Semantic => {
                self.set_certainty(self.params.certainty + CERTAINTY_STEP * f64::from(steps))
            }
            SearchMode::Hybrid => self.set_alpha(self.params.alpha + ALPHA_STEP * f64::from(steps)),
            SearchMode::Keyword => false,
        }
    }

    pub fn set_page(&mut self, page: usize) -> bool {
        self.page.set_page(page)
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next_page()
    }

    pub fn prev_page(&mut self) -> bool {
        self.page.prev_page()
    }

    pub fn set_page_size(&mut self, size: usize) -> bool {
        if self.page.page_size == size {
            return false;
        }
        self.page.set_page_size(size);
        true
    }

    pub fn cycle_page_size(&mut self) -> bool {
        self.page.cycle_page_size();
        true
    }

    /// Build the next request and take a new epoch for it.
    ///
    /// Returns `None` when there is no collection or its properties are not known yet.
    pub fn begin_request(&mut self) -> Option<(Epoch, SearchRequest)> {
        let collection = self.collection.as_deref()?;
        if self.properties.is_empty() {
            return None;
        }

        let request = SearchRequest::build(
            collection,
            &self.query,
            self.mode,
            self.params,
            self.page.current,
            self.page.page_size,
            self.properties.iter().map(|p| p.name.clone()).collect(),
        );
        let epoch = self.epochs.advance();
        self.loading = true;
        Some((epoch, request))
    }

    /// Apply a finished dispatch. Returns false (and changes nothing) for stale epochs.
    pub fn apply(&mut self, epoch: Epoch, mode: SearchMode, result: PageResult) -> bool {
        if !self.epochs.is_current(epoch) {
            debug!(
                epoch = epoch.value(),
                "Discarding response for superseded request"
            );
            return false;
        }

        self.rows = result.rows;
        self.page.total = result.total;
        self.shown_mode = mode;
        self.last_error = result.error;
        self.loading = false;
        true
    }

    /// Present the current page as a table
    pub fn table(&self) -> ResultTable {
        presenter::present(&self.properties, &self.rows, self.shown_mode)
    }
}

fn clamp_unit(value: f64) -> f64 {
    ((value * 100.0).round() / 100.0).clamp(0.0, 1.0)
}
