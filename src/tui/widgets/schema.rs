//! Schema Overview
//!
//! Every collection with its property count and vector index settings,
//! filtered as you type and paginated locally.

use crate::tui::app::App;
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

pub fn render_schema(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Filter
            Constraint::Min(5),    // Overview
            Constraint::Length(1), // Pagination
        ])
        .split(area);

    let filter = Paragraph::new(Line::from(vec![
        Span::styled("/ ", Theme::text_dim()),
        if app.schema_filter.is_empty() {
            Span::styled("type to filter collections", Theme::text_dim())
        } else {
            Span::styled(app.schema_filter.clone(), Theme::text())
        },
    ]))
    .block(
        Block::default()
            .title(" Filter ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );
    frame.render_widget(filter, chunks[0]);

    let block = Block::default()
        .title(format!(" Schema ({} collections) ", app.catalog.len()))
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let summaries = app.schema_page_rows();
    if summaries.is_empty() {
        let message = match &app.catalog.error {
            Some(error) => Span::styled(error.clone(), Theme::error()),
            None => Span::styled("No collections found", Theme::text_dim()),
        };
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), chunks[1]);
    } else {
        let header = Row::new([
            "Name",
            "Props",
            "Vectorizer",
            "Distance",
            "Index",
            "Description",
        ])
        .style(Theme::table_header());

        let rows: Vec<Row> = summaries
            .iter()
            .map(|s| {
                Row::new(vec![
                    Cell::from(Span::styled(s.name.clone(), Theme::heading())),
                    Cell::from(s.property_count.to_string()),
                    Cell::from(s.vectorizer.clone()),
                    Cell::from(s.distance_metric.clone()),
                    Cell::from(s.index_type.clone()),
                    Cell::from(Span::styled(s.description.clone(), Theme::text_secondary())),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(24),
            Constraint::Length(6),
            Constraint::Length(24),
            Constraint::Length(12),
            Constraint::Length(6),
            Constraint::Min(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(Theme::selected())
            .highlight_symbol(Icons::SELECTED);

        let mut state = TableState::default().with_selected(Some(app.schema_index));
        frame.render_stateful_widget(table, chunks[1], &mut state);
    }

    let page = &app.schema_page;
    let (start, end) = page.range();
    let footer = Line::from(vec![
        Span::styled(
            format!(
                " Page {}/{} │ Showing {}-{} of {}",
                page.current,
                page.total_pages().max(1),
                start,
                end,
                page.total
            ),
            Theme::text_secondary(),
        ),
        Span::styled("  ←/→ page  Enter open  F3 properties  Esc back", Theme::text_dim()),
    ]);
    frame.render_widget(Paragraph::new(footer), chunks[2]);
}
