//! Result Presenter
//!
//! Builds the result grid for a page of objects: one identifier column, one
//! column per declared property (in schema order) and a synthesized Score
//! column. Each cell carries inline text and an optional detail string.

pub mod cell;
pub mod relevance;

pub use cell::{format_cell, CellDisplay, CellValue, PLACEHOLDER};
pub use relevance::{page_max, Relevance, Tier};

use crate::models::{Property, ResultRow, SearchMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Id,
    Property(String),
    Relevance,
}

impl Column {
    pub fn title(&self) -> &str {
        match self {
            Column::Id => "ID",
            Column::Property(name) => name,
            Column::Relevance => "Score",
        }
    }
}

pub fn columns(properties: &[Property]) -> Vec<Column> {
    std::iter::once(Column::Id)
        .chain(properties.iter().map(|p| Column::Property(p.name.clone())))
        .chain(std::iter::once(Column::Relevance))
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct PresentedRow {
    pub id: String,
    /// One entry per property column
    pub cells: Vec<CellDisplay>,
    pub relevance: Option<Relevance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    pub columns: Vec<Column>,
    pub rows: Vec<PresentedRow>,
    pub max_relevance: f64,
}

pub fn present(properties: &[Property], rows: &[ResultRow], mode: SearchMode) -> ResultTable {
    let max_relevance = page_max(rows);
    let presented = rows
        .iter()
        .map(|row| PresentedRow {
            id: row.uuid.clone(),
            cells: properties
                .iter()
                .map(|p| format_cell(&CellValue::from(row.value(&p.name))))
                .collect(),
            relevance: Relevance::assess(row, max_relevance, mode),
        })
        .collect();

    ResultTable {
        columns: columns(properties),
        rows: presented,
        max_relevance,
    }
}

impl ResultTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Inline text of a cell
    pub fn cell_text(&self, row: usize, column: usize) -> String {
        let Some(presented) = self.rows.get(row) else {
            return String::new();
        };
        match self.columns.get(column) {
            Some(Column::Id) => presented.id.clone(),
            Some(Column::Property(_)) => presented
                .cells
                .get(column - 1)
                .map(CellDisplay::inline)
                .unwrap_or_default(),
            Some(Column::Relevance) => presented
                .relevance
                .as_ref()
                .map(Relevance::display_value)
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            None => String::new(),
        }
    }

    /// Detail text of a cell, falling back to the inline text
    pub fn cell_detail(&self, row: usize, column: usize) -> Option<String> {
        let presented = self.rows.get(row)?;
        match self.columns.get(column)? {
            Column::Id => Some(presented.id.clone()),
            Column::Property(_) => {
                let cell = presented.cells.get(column - 1)?;
                Some(
                    cell.detail()
                        .map(str::to_string)
                        .unwrap_or_else(|| cell.inline()),
                )
            }
            Column::Relevance => presented.relevance.as_ref().map(Relevance::detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn properties() -> Vec<Property> {
        vec![
            Property::new("title", "text"),
            Property::new("tags", "text[]"),
            Property::new("location", "object"),
        ]
    }

    fn rows() -> Vec<ResultRow> {
        vec![
            serde_json::from_value(json!({
                "uuid": "u1",
                "title": "Vector search in practice",
                "tags": ["a", "b", "c", "d", "e"],
                "location": { "city": "Berlin" },
                "score": 2.0
            }))
            .unwrap(),
            serde_json::from_value(json!({
                "uuid": "u2",
                "title": null,
                "tags": [],
                "score": 0.4
            }))
            .unwrap(),
        ]
    }

    #[test]
    fn test_columns_wrap_properties() {
        let titles: Vec<String> = columns(&properties())
            .iter()
            .map(|c| c.title().to_string())
            .collect();
        assert_eq!(titles, vec!["ID", "title", "tags", "location", "Score"]);
        assert_eq!(columns(&[]).len(), 2);
    }

    #[test]
    fn test_present_page() {
        let table = present(&properties(), &rows(), SearchMode::Keyword);
        assert_eq!(table.max_relevance, 2.0);
        assert_eq!(table.rows.len(), 2);

        assert_eq!(table.cell_text(0, 0), "u1");
        assert_eq!(table.cell_text(0, 1), "Vector search in practice");
        assert_eq!(table.cell_text(0, 2), "[a] [b] [+3]");
        assert_eq!(table.cell_text(0, 3), "Object");
        assert_eq!(table.cell_text(0, 4), "2.00");

        assert_eq!(table.cell_text(1, 1), "-");
        assert_eq!(table.cell_text(1, 2), "-");
        assert_eq!(table.cell_text(1, 3), "-");
        assert_eq!(table.rows[1].relevance.as_ref().unwrap().label(), "Weak Match");
    }

    #[test]
    fn test_cell_detail() {
        let table = present(&properties(), &rows(), SearchMode::Keyword);
        assert_eq!(table.cell_detail(0, 2).as_deref(), Some("a, b, c, d, e"));
        assert!(table.cell_detail(0, 3).unwrap().contains("Berlin"));
        assert!(table.cell_detail(0, 4).unwrap().starts_with("Score: 2.0000"));
        assert_eq!(table.cell_detail(5, 0), None);
    }
}
