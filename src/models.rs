// Wire models for the inspection API (schema, objects, search responses)

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Schema catalog as returned by `GET /schema`, keyed by collection name
pub type Collections = BTreeMap<String, Collection>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Legacy single-vector module, a name or an object like a named vector's
    #[serde(default)]
    pub vectorizer: Option<Value>,
    /// Named vectors. Weaviate v4 always reports at least `default` when vectorized.
    #[serde(default)]
    pub vector_config: Option<BTreeMap<String, NamedVectorConfig>>,
}

impl Collection {
    pub fn vectorizer_name(&self) -> Option<&str> {
        vectorizer_from_value(self.vectorizer.as_ref()?)
    }

    /// Property names in declared order
    pub fn property_names(&self) -> Vec<String> {
        self.properties.iter().map(|p| p.name.clone()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(default, deserialize_with = "data_type_from_wire")]
    pub data_type: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub tokenization: Option<String>,
    #[serde(default)]
    pub index_filterable: Option<bool>,
    #[serde(default)]
    pub index_searchable: Option<bool>,
    #[serde(default)]
    pub nested_properties: Option<Vec<Property>>,
}

impl Property {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            description: None,
            tokenization: None,
            index_filterable: None,
            index_searchable: None,
            nested_properties: None,
        }
    }
}

/// `data_type` arrives either as `"text"` or as `["text"]` depending on the endpoint
fn data_type_from_wire<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Wire {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Wire>::deserialize(deserializer)? {
        Some(Wire::One(s)) => s,
        Some(Wire::Many(types)) => types.join(", "),
        None => String::new(),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedVectorConfig {
    /// Either a bare module name or `{ "vectorizer": "text2vec-..." , ... }`
    #[serde(default)]
    pub vectorizer: Option<Value>,
    #[serde(default)]
    pub vector_index_config: Option<VectorIndexConfig>,
}

impl NamedVectorConfig {
    pub fn vectorizer_name(&self) -> Option<&str> {
        vectorizer_from_value(self.vectorizer.as_ref()?)
    }
}

fn vectorizer_from_value(value: &Value) -> Option<&str> {
    match value {
        Value::String(name) => Some(name.as_str()),
        Value::Object(obj) => obj.get("vectorizer").and_then(Value::as_str),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorIndexConfig {
    #[serde(default)]
    pub distance_metric: Option<String>,
    #[serde(default)]
    pub max_connections: Option<i64>,
    #[serde(default)]
    pub flat_search_cutoff: Option<i64>,
    #[serde(default)]
    pub ef: Option<i64>,
    #[serde(default)]
    pub ef_construction: Option<i64>,
}

/// Search mode selected by the user
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    #[default]
    Semantic,
    Keyword,
    Hybrid,
}

impl SearchMode {
    pub const ALL: [SearchMode; 3] = [SearchMode::Semantic, SearchMode::Keyword, SearchMode::Hybrid];

    /// Cycle to the next mode (semantic → keyword → hybrid → semantic)
    pub fn next(self) -> Self {
        match self {
            SearchMode::Semantic => SearchMode::Keyword,
            SearchMode::Keyword => SearchMode::Hybrid,
            SearchMode::Hybrid => SearchMode::Semantic,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SearchMode::Semantic => "Semantic",
            SearchMode::Keyword => "Keyword",
            SearchMode::Hybrid => "Hybrid",
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchMode::Semantic => write!(f, "semantic"),
            SearchMode::Keyword => write!(f, "keyword"),
            SearchMode::Hybrid => write!(f, "hybrid"),
        }
    }
}

/// How the backend actually ranked a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Semantic,
    #[serde(alias = "bm25")]
    Keyword,
    Hybrid,
    Fetch,
    Generative,
    #[serde(other)]
    Other,
}

/// A single object returned by any of the search endpoints.
///
/// The backend flattens object properties into the top level of the row,
/// next to the identifier and the metadata fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    #[serde(default)]
    pub uuid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub certainty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explain_score: Option<String>,
    #[serde(flatten)]
    pub properties: Map<String, Value>,
}

impl ResultRow {
    /// Look up a property value, falling back to a nested `properties` object
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).or_else(|| {
            self.properties
                .get("properties")
                .and_then(Value::as_object)
                .and_then(|nested| nested.get(name))
        })
    }

    /// Text produced by the generate endpoint.
    ///
    /// Kept among the flattened properties so a collection property of the
    /// same name still decodes; only a string counts as generated text.
    pub fn generated(&self) -> Option<&str> {
        self.properties.get("generated").and_then(Value::as_str)
    }

    /// Unified relevance: first present of score, certainty, distance
    pub fn relevance(&self) -> Option<f64> {
        self.score.or(self.certainty).or(self.distance)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub data: Vec<ResultRow>,
    /// Weaviate may report an unknown total as `null`
    #[serde(default, deserialize_with = "count_or_zero")]
    pub count: u64,
    #[serde(default)]
    pub search_type: Option<SearchType>,
    #[serde(default)]
    pub alpha: Option<f64>,
}

fn count_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u64>::deserialize(deserializer)?.unwrap_or(0))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    #[serde(default)]
    pub weaviate: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<PropertyInfo>,
    #[serde(default)]
    pub vectorizer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyInfo {
    pub name: String,
    #[serde(default, deserialize_with = "data_type_from_wire")]
    pub data_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregateResponse {
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(default, alias = "group_by")]
    pub grouped_by: Option<String>,
    #[serde(default)]
    pub groups: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_property_data_type_accepts_string_or_list() {
        let single: Property = serde_json::from_value(json!({
            "name": "title",
            "data_type": "text",
            "tokenization": "word"
        }))
        .unwrap();
        assert_eq!(single.data_type, "text");
        assert_eq!(single.tokenization.as_deref(), Some("word"));

        let list: PropertyInfo = serde_json::from_value(json!({
            "name": "tags",
            "data_type": ["text[]"]
        }))
        .unwrap();
        assert_eq!(list.data_type, "text[]");
    }

    #[test]
    fn test_result_row_flattened_properties() {
        let row: ResultRow = serde_json::from_value(json!({
            "uuid": "6f1c...",
            "key": "6f1c...",
            "title": "Hello",
            "wordCount": 42,
            "score": 1.5,
            "explain_score": "bm25f"
        }))
        .unwrap();

        assert_eq!(row.value("title"), Some(&json!("Hello")));
        assert_eq!(row.value("wordCount"), Some(&json!(42)));
        assert_eq!(row.relevance(), Some(1.5));
        assert_eq!(row.explain_score.as_deref(), Some("bm25f"));
        assert!(row.value("missing").is_none());
    }

    #[test]
    fn test_result_row_nested_properties_fallback() {
        let row: ResultRow = serde_json::from_value(json!({
            "uuid": "a",
            "properties": { "title": "Nested" },
            "certainty": 0.7
        }))
        .unwrap();
        assert_eq!(row.value("title"), Some(&json!("Nested")));
        assert_eq!(row.relevance(), Some(0.7));
    }

    #[test]
    fn test_relevance_prefers_score_then_certainty_then_distance() {
        let row = ResultRow {
            certainty: Some(0.9),
            distance: Some(0.1),
            ..Default::default()
        };
        assert_eq!(row.relevance(), Some(0.9));

        let row = ResultRow {
            distance: Some(0.2),
            ..Default::default()
        };
        assert_eq!(row.relevance(), Some(0.2));
        assert_eq!(ResultRow::default().relevance(), None);
    }

    #[test]
    fn test_non_string_generated_property_stays_a_property() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "data": [{ "uuid": "u1", "title": "A", "generated": true, "certainty": 0.8 }],
            "count": 1
        }))
        .unwrap();

        let row = &resp.data[0];
        assert_eq!(row.value("generated"), Some(&json!(true)));
        assert_eq!(row.generated(), None);
        assert_eq!(row.value("title"), Some(&json!("A")));

        let row: ResultRow =
            serde_json::from_value(json!({ "uuid": "u2", "generated": "A summary" })).unwrap();
        assert_eq!(row.generated(), Some("A summary"));
    }

    #[test]
    fn test_null_count_keeps_rows() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "data": [{ "uuid": "u1" }],
            "count": null
        }))
        .unwrap();
        assert_eq!(resp.count, 0);
        assert_eq!(resp.data.len(), 1);

        let resp: SearchResponse = serde_json::from_value(json!({ "data": [] })).unwrap();
        assert_eq!(resp.count, 0);
    }

    #[test]
    fn test_search_type_aliases() {
        let resp: SearchResponse = serde_json::from_value(json!({
            "data": [],
            "count": 0,
            "search_type": "bm25"
        }))
        .unwrap();
        assert_eq!(resp.search_type, Some(SearchType::Keyword));

        let resp: SearchResponse = serde_json::from_value(json!({
            "data": [],
            "count": 3,
            "search_type": "near_vector"
        }))
        .unwrap();
        assert_eq!(resp.search_type, Some(SearchType::Other));
        assert_eq!(resp.count, 3);
    }

    #[test]
    fn test_vectorizer_name_from_string_or_object() {
        let bare: NamedVectorConfig =
            serde_json::from_value(json!({ "vectorizer": "text2vec-openai" })).unwrap();
        assert_eq!(bare.vectorizer_name(), Some("text2vec-openai"));

        let nested: NamedVectorConfig = serde_json::from_value(json!({
            "vectorizer": { "vectorizer": "text2vec-transformers", "model": {} },
            "vector_index_config": { "distance_metric": "cosine", "max_connections": 32 }
        }))
        .unwrap();
        assert_eq!(nested.vectorizer_name(), Some("text2vec-transformers"));
        assert_eq!(
            nested.vector_index_config.unwrap().max_connections,
            Some(32)
        );
    }

    #[test]
    fn test_search_mode_cycle_and_display() {
        assert_eq!(SearchMode::default(), SearchMode::Semantic);
        assert_eq!(SearchMode::Semantic.next(), SearchMode::Keyword);
        assert_eq!(SearchMode::Keyword.next(), SearchMode::Hybrid);
        assert_eq!(SearchMode::Hybrid.next(), SearchMode::Semantic);
        assert_eq!(SearchMode::Keyword.to_string(), "keyword");
    }
}
