//! Schema Loader
//!
//! Fetches the collection catalog and the backend health once, and derives
//! the navigation list, the name → properties lookup and the schema
//! overview rows from it. Failures leave an empty catalog; nothing is retried.

use crate::api::SpyApi;
use crate::models::{Collection, Collections, Property};
use std::collections::HashMap;
use tracing::{error, info, warn};

/// Backend connectivity as shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Health {
    #[default]
    Unknown,
    Connected,
    Disconnected,
}

impl Health {
    pub fn label(&self) -> &'static str {
        match self {
            Health::Unknown => "Checking...",
            Health::Connected => "Connected",
            Health::Disconnected => "Disconnected",
        }
    }
}

/// Loaded schema snapshot
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    /// Navigation order (by name)
    collections: Vec<Collection>,
    properties: HashMap<String, Vec<Property>>,
    pub health: Health,
    /// Message of the failed schema request, if any
    pub error: Option<String>,
}

impl SchemaCatalog {
    pub fn from_collections(collections: Collections) -> Self {
        let collections: Vec<Collection> = collections.into_values().collect();
        let properties = collections
            .iter()
            .map(|c| (c.name.clone(), c.properties.clone()))
            .collect();

        Self {
            collections,
            properties,
            health: Health::Unknown,
            error: None,
        }
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    pub fn properties_of(&self, name: &str) -> Option<&[Property]> {
        self.properties.get(name).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// Overview rows whose text fields contain `filter` (case-insensitive)
    pub fn summaries(&self, filter: &str) -> Vec<CollectionSummary> {
        let needle = filter.trim().to_lowercase();
        self.collections
            .iter()
            .map(CollectionSummary::from)
            .filter(|s| needle.is_empty() || s.matches(&needle))
            .collect()
    }
}

/// One row of the schema overview
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSummary {
    pub name: String,
    pub description: String,
    pub property_count: usize,
    pub vectorizer: String,
    pub distance_metric: String,
    pub index_type: String,
}

impl CollectionSummary {
    fn matches(&self, needle: &str) -> bool {
        [
            &self.name,
            &self.description,
            &self.vectorizer,
            &self.distance_metric,
            &self.index_type,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        let vectors: Vec<_> = collection
            .vector_config
            .as_ref()
            .map(|configs| configs.values().collect())
            .unwrap_or_default();

        let vectorizer = if vectors.is_empty() {
            collection.vectorizer_name().unwrap_or("none").to_string()
        } else {
            vectors
                .iter()
                .map(|v| v.vectorizer_name().unwrap_or("none"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        // First named vector decides metric and index type
        let index = vectors.first().and_then(|v| v.vector_index_config.as_ref());
        let distance_metric = index
            .and_then(|i| i.distance_metric.clone())
            .unwrap_or_else(|| "cosine".to_string());
        let index_type = match index {
            Some(i) if i.max_connections.is_some() => "hnsw",
            Some(i) if i.flat_search_cutoff.is_some() => "flat",
            _ => "hnsw",
        };

        Self {
            name: collection.name.clone(),
            description: collection
                .description
                .clone()
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| "No description".to_string()),
            property_count: collection.properties.len(),
            vectorizer,
            distance_metric,
            index_type: index_type.to_string(),
        }
    }
}

pub struct SchemaLoader;

impl SchemaLoader {
    /// Issue the schema and health requests concurrently
    pub async fn load(api: &dyn SpyApi) -> SchemaCatalog {
        let (schema, health) = tokio::join!(api.schema(), api.health());

        let mut catalog = match schema {
            Ok(collections) => {
                info!(count = collections.len(), "Schema loaded");
                SchemaCatalog::from_collections(collections)
            }
            Err(e) => {
                error!(error = %e, "Failed to load schema");
                SchemaCatalog {
                    error: Some(e.to_string()),
                    ..Default::default()
                }
            }
        };

        catalog.health = match health {
            Ok(status) if status.is_healthy() => Health::Connected,
            Ok(status) => {
                warn!(weaviate = ?status.weaviate, error = ?status.error, "Backend reports unhealthy");
                Health::Disconnected
            }
            Err(e) => {
                warn!(error = %e, "Health check failed");
                Health::Disconnected
            }
        };

        catalog
    }
}
