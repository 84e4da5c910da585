//! Command line interface
//!
//! `tui` (the default) starts the interactive inspector; the other
//! subcommands run one request and print plain text to stdout.

use crate::api::SpyApi;
use crate::config::Config;
use crate::models::{AggregateResponse, CollectionInfo, HealthResponse, ResultRow, SearchMode};
use crate::presenter::{self, Column, ResultTable};
use crate::schema::{CollectionSummary, SchemaCatalog};
use crate::search::request::DEFAULT_GENERATE_LIMIT;
use crate::search::{dispatch, AggregateRequest, GenerateRequest, PageState, SearchParams, SearchRequest};
use crate::types::SpyResult;
use anyhow::{anyhow, bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "weaviate-spy")]
#[command(about = "Inspect vector database collections, objects and search results")]
#[command(version)]
pub struct Cli {
    /// Base URL of the inspection API (overrides config)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (defaults to ./spy.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Start the interactive inspector
    Tui,
    /// Check backend connectivity
    Health,
    /// List collections with their vector settings
    Schema {
        /// Case-insensitive filter over name, description, vectorizer and index settings
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Show one collection's properties and vectorizer
    Describe { collection: String },
    /// Fetch or search one page of objects
    Search {
        collection: String,
        #[arg(short, long, default_value = "")]
        query: String,
        #[arg(short, long, value_enum, default_value_t = SearchMode::Semantic)]
        mode: SearchMode,
        #[arg(long)]
        certainty: Option<f64>,
        #[arg(long)]
        alpha: Option<f64>,
        #[arg(short, long, default_value_t = 1)]
        page: usize,
        #[arg(long)]
        page_size: Option<usize>,
    },
    /// Retrieve objects and generate text from them
    Generate {
        collection: String,
        #[arg(long)]
        prompt: String,
        #[arg(short, long)]
        query: Option<String>,
        #[arg(short, long, default_value_t = DEFAULT_GENERATE_LIMIT)]
        limit: usize,
        #[arg(long)]
        certainty: Option<f64>,
    },
    /// Count objects, optionally grouped by a property
    Aggregate {
        collection: String,
        #[arg(long)]
        group_by: Option<String>,
    },
}

/// Run a one-shot command and print its output
pub async fn execute(command: Command, config: &Config, api: &dyn SpyApi) -> Result<()> {
    match command {
        Command::Tui => bail!("the interactive inspector is not a one-shot command"),
        Command::Health => {
            let health = api.health().await?;
            println!("{}", format_health(config, &health));
            if !health.is_healthy() {
                bail!("backend is unhealthy");
            }
        }
        Command::Schema { filter } => {
            let catalog = SchemaCatalog::from_collections(api.schema().await?);
            let summaries = catalog.summaries(filter.as_deref().unwrap_or_default());
            println!("{}", format_schema(&summaries));
        }
        Command::Describe { collection } => {
            let info = api.collection_info(&collection).await?;
            println!("{}", format_collection_info(&info));
        }
        Command::Search {
            collection,
            query,
            mode,
            certainty,
            alpha,
            page,
            page_size,
        } => {
            let catalog = SchemaCatalog::from_collections(api.schema().await?);
            let definition = catalog
                .collection(&collection)
                .ok_or_else(|| anyhow!("unknown collection: {}", collection))?;
            let properties = &definition.properties;
            if properties.is_empty() {
                bail!("collection {} has no properties", collection);
            }

            let settings = with_overrides(config, certainty, alpha, page_size)?;
            let params = SearchParams {
                certainty: settings.certainty,
                alpha: settings.alpha,
            };
            let mut page_state = PageState::new(settings.page_size);
            let request = SearchRequest::build(
                &collection,
                &query,
                mode,
                params,
                page.max(1),
                page_state.page_size,
                definition.property_names(),
            );

            let result = dispatch(api, &request).await;
            if let Some(error) = result.error {
                bail!(error);
            }
            page_state.total = result.total;
            page_state.current = page.max(1);

            let table = presenter::present(properties, &result.rows, mode);
            println!("{}", format_table(&table));
            println!("{}", format_footer(&page_state));
        }
        Command::Generate {
            collection,
            prompt,
            query,
            limit,
            certainty,
        } => {
            let mut request = GenerateRequest::new(prompt).with_query(query.unwrap_or_default());
            request.limit = limit;
            request.certainty = with_overrides(config, certainty, None, None)?.certainty;

            let response = api.generate(&collection, &request).await?;
            println!("{}", format_generated(&response.data));
        }
        Command::Aggregate {
            collection,
            group_by,
        } => {
            let response = api
                .aggregate(&collection, &AggregateRequest { group_by })
                .await?;
            println!("{}", format_aggregate(&collection, &response));
        }
    }

    Ok(())
}

/// Apply per-command flags over the loaded config, with the same checks
pub fn with_overrides(
    config: &Config,
    certainty: Option<f64>,
    alpha: Option<f64>,
    page_size: Option<usize>,
) -> SpyResult<Config> {
    let merged = Config {
        certainty: certainty.unwrap_or(config.certainty),
        alpha: alpha.unwrap_or(config.alpha),
        page_size: page_size.unwrap_or(config.page_size),
        ..config.clone()
    };
    merged.validate()?;
    Ok(merged)
}

pub fn format_health(config: &Config, health: &HealthResponse) -> String {
    let mut out = format!(
        "{}: {}",
        config.api_url,
        if health.is_healthy() {
            "healthy"
        } else {
            "unhealthy"
        }
    );
    if let Some(weaviate) = &health.weaviate {
        out.push_str(&format!(" (weaviate {})", weaviate));
    }
    if let Some(error) = &health.error {
        out.push_str(&format!("\nerror: {}", error));
    }
    out
}

pub fn format_collection_info(info: &CollectionInfo) -> String {
    let header = [info.name.clone(), "Type".to_string()];
    let rows: Vec<Vec<String>> = info
        .properties
        .iter()
        .map(|p| vec![p.name.clone(), p.data_type.clone()])
        .collect();
    format!(
        "Vectorizer: {}\n\n{}",
        info.vectorizer.as_deref().unwrap_or("none"),
        render_grid(&header, &rows)
    )
}

pub fn format_schema(summaries: &[CollectionSummary]) -> String {
    if summaries.is_empty() {
        return "No collections found".to_string();
    }
    let header = ["Name", "Properties", "Vectorizer", "Distance", "Index", "Description"];
    let rows: Vec<Vec<String>> = summaries
        .iter()
        .map(|s| {
            vec![
                s.name.clone(),
                s.property_count.to_string(),
                s.vectorizer.clone(),
                s.distance_metric.clone(),
                s.index_type.clone(),
                s.description.clone(),
            ]
        })
        .collect();
    render_grid(&header.map(String::from), &rows)
}

/// Plain-text rendering of a result page; the score column also carries its band
pub fn format_table(table: &ResultTable) -> String {
    if table.is_empty() {
        return "No results".to_string();
    }
    let header: Vec<String> = table.columns.iter().map(|c| c.title().to_string()).collect();
    let rows: Vec<Vec<String>> = (0..table.rows.len())
        .map(|r| {
            table
                .columns
                .iter()
                .enumerate()
                .map(|(c, column)| match (column, &table.rows[r].relevance) {
                    (Column::Relevance, Some(rel)) => {
                        format!("{} {}", rel.display_value(), rel.label())
                    }
                    _ => table.cell_text(r, c),
                })
                .collect()
        })
        .collect();
    render_grid(&header, &rows)
}

pub fn format_footer(page: &PageState) -> String {
    let (start, end) = page.range();
    format!(
        "Total: {} items | Page {}/{} | Showing {}-{} | {} per page",
        page.total,
        page.current,
        page.total_pages().max(1),
        start,
        end,
        page.page_size
    )
}

pub fn format_generated(rows: &[ResultRow]) -> String {
    if rows.is_empty() {
        return "No results".to_string();
    }
    rows.iter()
        .map(|row| {
            format!(
                "{}\n  {}",
                row.uuid,
                row.generated().unwrap_or(presenter::PLACEHOLDER)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn format_aggregate(collection: &str, response: &AggregateResponse) -> String {
    let mut out = format!(
        "{}: {} objects",
        collection,
        response
            .total_count
            .map(|c| c.to_string())
            .unwrap_or_else(|| presenter::PLACEHOLDER.to_string())
    );
    if let (Some(property), Some(groups)) = (&response.grouped_by, &response.groups) {
        out.push_str(&format!(
            "\ngrouped by {}:\n{}",
            property,
            serde_json::to_string_pretty(groups).unwrap_or_default()
        ));
    }
    out
}

fn render_grid(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let separator: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
    std::iter::once(line(header))
        .chain(std::iter::once(line(separator.as_slice())))
        .chain(rows.iter().map(|r| line(r.as_slice())))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HealthStatus, Property};
    use serde_json::json;

    #[test]
    fn test_parse_defaults_to_tui() {
        let cli = Cli::try_parse_from(["weaviate-spy"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.api_url.is_none());
    }

    #[test]
    fn test_parse_search() {
        let cli = Cli::try_parse_from([
            "weaviate-spy",
            "--api-url",
            "http://db:8000",
            "search",
            "Article",
            "--query",
            "rust",
            "--mode",
            "hybrid",
            "--alpha",
            "0.3",
        ])
        .unwrap();
        assert_eq!(cli.api_url.as_deref(), Some("http://db:8000"));
        assert_eq!(
            cli.command,
            Some(Command::Search {
                collection: "Article".to_string(),
                query: "rust".to_string(),
                mode: SearchMode::Hybrid,
                certainty: None,
                alpha: Some(0.3),
                page: 1,
                page_size: None,
            })
        );
    }

    #[test]
    fn test_flag_overrides_are_validated() {
        let config = Config::default();

        let err = with_overrides(&config, Some(5.0), None, None).unwrap_err();
        assert!(err.to_string().contains("certainty must be within [0, 1]"));
        let err = with_overrides(&config, None, Some(-0.5), None).unwrap_err();
        assert!(err.to_string().contains("alpha"));
        let err = with_overrides(&config, None, None, Some(15)).unwrap_err();
        assert!(err.to_string().contains("page_size"));

        let merged = with_overrides(&config, Some(0.8), None, Some(50)).unwrap();
        assert_eq!(merged.certainty, 0.8);
        assert_eq!(merged.alpha, config.alpha);
        assert_eq!(merged.page_size, 50);
    }

    #[test]
    fn test_parse_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["weaviate-spy", "search", "A", "--mode", "fuzzy"]).is_err());
    }

    #[test]
    fn test_format_table() {
        let properties = vec![Property::new("title", "text")];
        let rows: Vec<ResultRow> = vec![serde_json::from_value(json!({
            "uuid": "u1",
            "title": "Hello",
            "certainty": 0.91
        }))
        .unwrap()];
        let table = presenter::present(&properties, &rows, SearchMode::Semantic);

        let text = format_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID"));
        assert!(lines[0].contains("title"));
        assert!(lines[0].ends_with("Score"));
        assert!(lines[2].contains("Hello"));
        assert!(lines[2].ends_with("0.91 Excellent"));
    }

    #[test]
    fn test_format_empty_table() {
        let table = presenter::present(&[], &[], SearchMode::Semantic);
        assert_eq!(format_table(&table), "No results");
    }

    #[test]
    fn test_format_footer() {
        let mut page = PageState::new(20);
        page.total = 45;
        page.current = 3;
        assert_eq!(
            format_footer(&page),
            "Total: 45 items | Page 3/3 | Showing 41-45 | 20 per page"
        );
    }

    #[test]
    fn test_format_health() {
        let health = HealthResponse {
            status: HealthStatus::Unhealthy,
            weaviate: None,
            error: Some("connection refused".to_string()),
        };
        assert_eq!(
            format_health(&Config::default(), &health),
            "http://localhost:8000: unhealthy\nerror: connection refused"
        );
    }

    #[test]
    fn test_format_collection_info() {
        let info: CollectionInfo = serde_json::from_value(json!({
            "name": "Article",
            "vectorizer": "text2vec-openai",
            "properties": [
                { "name": "title", "data_type": ["text"] },
                { "name": "wordCount", "data_type": ["int"] }
            ]
        }))
        .unwrap();
        let text = format_collection_info(&info);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Vectorizer: text2vec-openai");
        assert_eq!(lines[2], "Article    Type");
        assert_eq!(lines[4], "title      text");
        assert_eq!(lines[5], "wordCount  int");
    }

    #[test]
    fn test_format_aggregate() {
        let response = AggregateResponse {
            total_count: Some(12),
            grouped_by: None,
            groups: None,
        };
        assert_eq!(format_aggregate("Article", &response), "Article: 12 objects");
    }
}
