//! Search Request Building
//!
//! Decides which backend endpoint a query goes to and what its JSON body
//! carries. Selection order:
//!
//! 1. Empty query → plain fetch on `/class/{c}`, whatever the mode
//! 2. Keyword → `/class/{c}/bm25`, no certainty or alpha
//! 3. Hybrid → `/class/{c}/hybrid` with `alpha`
//! 4. Semantic → `/class/{c}` with `certainty`

use crate::models::SearchMode;
use serde::Serialize;

/// Default certainty threshold for semantic search
pub const DEFAULT_CERTAINTY: f64 = 0.65;

/// Default hybrid blend (0 = pure BM25, 1 = pure vector)
pub const DEFAULT_ALPHA: f64 = 0.5;

/// Default result count for generative search
pub const DEFAULT_GENERATE_LIMIT: usize = 10;

/// Tunable ranking parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchParams {
    pub certainty: f64,
    pub alpha: f64,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            certainty: DEFAULT_CERTAINTY,
            alpha: DEFAULT_ALPHA,
        }
    }
}

/// Backend endpoint a search is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Fetch,
    Semantic,
    Keyword,
    Hybrid,
}

impl Endpoint {
    pub fn select(query: &str, mode: SearchMode) -> Self {
        if query.is_empty() {
            return Endpoint::Fetch;
        }
        match mode {
            SearchMode::Keyword => Endpoint::Keyword,
            SearchMode::Hybrid => Endpoint::Hybrid,
            SearchMode::Semantic => Endpoint::Semantic,
        }
    }

    pub fn path(&self, collection: &str) -> String {
        match self {
            Endpoint::Fetch | Endpoint::Semantic => class_path(collection, None),
            Endpoint::Keyword => class_path(collection, Some("bm25")),
            Endpoint::Hybrid => class_path(collection, Some("hybrid")),
        }
    }
}

/// `/class/{collection}[/{action}]` with the collection name as one encoded segment
pub fn class_path(collection: &str, action: Option<&str>) -> String {
    let name = urlencoding::encode(collection);
    match action {
        Some(action) => format!("/class/{}/{}", name, action),
        None => format!("/class/{}", name),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchBody {
    pub offset: usize,
    pub limit: usize,
    pub properties: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Semantic endpoint reads `keyword` before `query`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certainty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

/// A fully-built search, ready to send. Never modified after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub collection: String,
    pub mode: SearchMode,
    pub endpoint: Endpoint,
    pub body: SearchBody,
}

impl SearchRequest {
    /// Build the request for `page` (1-based) of `page_size` rows
    pub fn build(
        collection: &str,
        query: &str,
        mode: SearchMode,
        params: SearchParams,
        page: usize,
        page_size: usize,
        properties: Vec<String>,
    ) -> Self {
        let endpoint = Endpoint::select(query, mode);
        let mut body = SearchBody {
            offset: page.saturating_sub(1) * page_size,
            limit: page_size,
            properties,
            query: None,
            keyword: None,
            certainty: None,
            alpha: None,
        };

        match endpoint {
            Endpoint::Fetch => {}
            Endpoint::Keyword => {
                body.query = Some(query.to_string());
            }
            Endpoint::Hybrid => {
                body.query = Some(query.to_string());
                body.alpha = Some(params.alpha);
            }
            Endpoint::Semantic => {
                body.query = Some(query.to_string());
                body.keyword = Some(query.to_string());
                body.certainty = Some(params.certainty);
            }
        }

        Self {
            collection: collection.to_string(),
            mode,
            endpoint,
            body,
        }
    }

    pub fn path(&self) -> String {
        self.endpoint.path(&self.collection)
    }
}

/// Body for `POST /class/{c}/generate`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub limit: usize,
    pub certainty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Vec<String>>,
}

impl GenerateRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            limit: DEFAULT_GENERATE_LIMIT,
            certainty: DEFAULT_CERTAINTY,
            query: None,
            properties: None,
        }
    }

    /// Attach a semantic query; empty strings are dropped
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }
}

/// Body for `POST /class/{c}/aggregate`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AggregateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn props() -> Vec<String> {
        vec!["title".to_string(), "body".to_string()]
    }

    fn body_json(request: &SearchRequest) -> Value {
        serde_json::to_value(&request.body).unwrap()
    }

    #[test]
    fn test_empty_query_uses_fetch_for_every_mode() {
        for mode in SearchMode::ALL {
            let request =
                SearchRequest::build("Article", "", mode, SearchParams::default(), 1, 20, props());
            assert_eq!(request.endpoint, Endpoint::Fetch);
            assert_eq!(request.path(), "/class/Article");

            let body = body_json(&request);
            assert!(body.get("query").is_none());
            assert!(body.get("certainty").is_none());
            assert!(body.get("alpha").is_none());
        }
    }

    #[test]
    fn test_collection_name_is_one_path_segment() {
        let request =
            SearchRequest::build("a/b c", "q", SearchMode::Hybrid, SearchParams::default(), 1, 20, props());
        assert_eq!(request.path(), "/class/a%2Fb%20c/hybrid");
        assert_eq!(class_path("Article", Some("generate")), "/class/Article/generate");
    }

    #[test]
    fn test_keyword_never_sends_certainty_or_alpha() {
        let params = SearchParams {
            certainty: 0.9,
            alpha: 0.3,
        };
        let request =
            SearchRequest::build("Article", "rust", SearchMode::Keyword, params, 1, 20, props());
        assert_eq!(request.path(), "/class/Article/bm25");
        assert_eq!(
            body_json(&request),
            json!({
                "offset": 0,
                "limit": 20,
                "properties": ["title", "body"],
                "query": "rust"
            })
        );
    }

    #[test]
    fn test_hybrid_echoes_alpha() {
        let params = SearchParams {
            certainty: 0.65,
            alpha: 0.7,
        };
        let request =
            SearchRequest::build("Article", "rust", SearchMode::Hybrid, params, 1, 20, props());
        assert_eq!(request.path(), "/class/Article/hybrid");

        let body = body_json(&request);
        assert_eq!(body["alpha"], json!(0.7));
        assert!(body.get("certainty").is_none());
    }

    #[test]
    fn test_semantic_echoes_certainty() {
        let params = SearchParams {
            certainty: 0.8,
            alpha: 0.5,
        };
        let request =
            SearchRequest::build("Article", "rust", SearchMode::Semantic, params, 1, 20, props());
        assert_eq!(request.path(), "/class/Article");

        let body = body_json(&request);
        assert_eq!(body["certainty"], json!(0.8));
        assert_eq!(body["keyword"], json!("rust"));
        assert_eq!(body["query"], json!("rust"));
        assert!(body.get("alpha").is_none());
    }

    #[test]
    fn test_offset_from_page() {
        let request = SearchRequest::build(
            "Article",
            "",
            SearchMode::Semantic,
            SearchParams::default(),
            3,
            20,
            props(),
        );
        assert_eq!(request.body.offset, 40);
        assert_eq!(request.body.limit, 20);
    }

    #[test]
    fn test_generate_request_body() {
        let request = GenerateRequest::new("Summarize").with_query("");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            json!({ "prompt": "Summarize", "limit": 10, "certainty": 0.65 })
        );

        let request = GenerateRequest::new("Summarize").with_query("rust");
        assert_eq!(request.query.as_deref(), Some("rust"));
    }

    #[test]
    fn test_aggregate_request_body() {
        let body = serde_json::to_value(AggregateRequest::default()).unwrap();
        assert_eq!(body, json!({}));

        let body = serde_json::to_value(AggregateRequest {
            group_by: Some("category".to_string()),
        })
        .unwrap();
        assert_eq!(body, json!({ "group_by": "category" }));
    }
}
