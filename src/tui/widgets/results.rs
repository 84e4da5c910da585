//! Results Pane
//!
//! Search controls, the object grid and the pagination footer of the
//! browse view.

use crate::models::SearchMode;
use crate::presenter::{CellDisplay, Column, Relevance, PLACEHOLDER};
use crate::tui::app::{App, Focus};
use crate::tui::theme::{Icons, Theme};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

/// Width of the text bar in the Score column
const BAR_WIDTH: usize = 8;

/// Characters of the identifier shown in the grid
const ID_WIDTH: u16 = 12;

pub fn render_search_bar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // Mode
            Constraint::Min(20),    // Query
            Constraint::Length(20), // Certainty / alpha
        ])
        .split(area);

    let session = &app.session;

    let mode = Paragraph::new(Line::from(Span::styled(
        format!(" {} ", session.mode().label()),
        Theme::badge_primary(),
    )))
    .block(
        Block::default()
            .title(" Mode ")
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    frame.render_widget(mode, chunks[0]);

    let query_block = Block::default()
        .title(" Query ")
        .borders(Borders::ALL)
        .border_style(Theme::border_for(app.focus == Focus::Query));
    let inner = query_block.inner(chunks[1]);
    frame.render_widget(query_block, chunks[1]);
    frame.render_widget(&app.query_input, inner);

    let params = session.params();
    let (title, value) = match session.mode() {
        SearchMode::Semantic => (" Certainty ", format!("{:.2}", params.certainty)),
        SearchMode::Hybrid => (" Alpha ", format!("{:.1}", params.alpha)),
        SearchMode::Keyword => (" BM25 ", PLACEHOLDER.to_string()),
    };
    let param = Paragraph::new(Line::from(vec![
        Span::styled(value, Theme::text()),
        Span::styled("  [+/-]", Theme::text_dim()),
    ]))
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Theme::border()),
    );
    frame.render_widget(param, chunks[2]);
}

pub fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let session = &app.session;
    let title = match session.collection() {
        Some(name) if !session.query().is_empty() => {
            format!(" {} · {} \"{}\" ", name, session.shown_mode(), session.query())
        }
        Some(name) => format!(" {} ", name),
        None => " Results ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Theme::border_for(app.focus == Focus::Table));

    if session.collection().is_none() {
        let hint = Paragraph::new(Line::from(Span::styled(
            "Select a collection and press Enter",
            Theme::text_dim(),
        )))
        .block(block);
        frame.render_widget(hint, area);
        return;
    }

    let table = session.table();
    if table.is_empty() {
        let message = if session.is_loading() {
            Span::styled("Loading...", Theme::text_dim())
        } else if let Some(error) = session.last_error() {
            Span::styled(error.to_string(), Theme::error())
        } else {
            Span::styled("No objects", Theme::text_dim())
        };
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    }

    let header = Row::new(
        table
            .columns
            .iter()
            .map(|c| Cell::from(c.title().to_string())),
    )
    .style(Theme::table_header());

    let widths: Vec<Constraint> = table
        .columns
        .iter()
        .map(|c| match c {
            Column::Id => Constraint::Length(ID_WIDTH),
            Column::Property(_) => Constraint::Min(10),
            Column::Relevance => Constraint::Length(BAR_WIDTH as u16 + 20),
        })
        .collect();

    let rows: Vec<Row> = table
        .rows
        .iter()
        .map(|row| {
            let mut cells = Vec::with_capacity(table.columns.len());
            cells.push(Cell::from(Span::styled(row.id.clone(), Theme::text_secondary())));
            cells.extend(row.cells.iter().map(|c| Cell::from(cell_line(c))));
            cells.push(Cell::from(relevance_line(row.relevance.as_ref())));
            Row::new(cells)
        })
        .collect();

    let grid = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol(Icons::SELECTED);

    let mut state = TableState::default().with_selected(Some(app.table_index));
    frame.render_stateful_widget(grid, area, &mut state);
}

fn cell_line(display: &CellDisplay) -> Line<'static> {
    match display {
        CellDisplay::Placeholder => Line::from(Span::styled(PLACEHOLDER, Theme::text_dim())),
        CellDisplay::Text { text, .. } => Line::from(Span::styled(text.clone(), Theme::text())),
        CellDisplay::Tags { tags, overflow, .. } => {
            let mut spans: Vec<Span> = Vec::new();
            for tag in tags {
                spans.push(Span::styled(format!("[{}]", tag), Theme::tag()));
                spans.push(Span::raw(" "));
            }
            if let Some(n) = overflow {
                spans.push(Span::styled(format!("[+{}]", n), Theme::text_dim()));
            }
            Line::from(spans)
        }
        CellDisplay::Object { .. } => Line::from(Span::styled("Object", Theme::text_secondary())),
    }
}

fn relevance_line(relevance: Option<&Relevance>) -> Line<'static> {
    let Some(rel) = relevance else {
        return Line::from(Span::styled(PLACEHOLDER, Theme::text_dim()));
    };
    let style = Theme::tier(rel.tier);
    Line::from(vec![
        Span::styled(rel.bar(BAR_WIDTH), style),
        Span::styled(format!(" {} ", rel.display_value()), Theme::text()),
        Span::styled(rel.label(), style),
    ])
}

/// "Total: N items", page position, visible range and page size
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let page = app.session.page();
    let (start, end) = page.range();
    let sep = || Span::styled(" │ ", Theme::text_dim());

    let line = Line::from(vec![
        Span::styled(format!(" Total: {} items", page.total), Theme::text()),
        sep(),
        Span::styled(
            format!("Page {}/{}", page.current, page.total_pages().max(1)),
            Theme::text_secondary(),
        ),
        sep(),
        Span::styled(format!("Showing {}-{}", start, end), Theme::text_secondary()),
        sep(),
        Span::styled(format!("{} per page", page.page_size), Theme::text_secondary()),
        Span::styled("  [ ] page  s size", Theme::text_dim()),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
