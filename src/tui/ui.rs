//! UI Rendering
//!
//! Main UI layout and rendering logic for the TUI.

use crate::tui::app::{App, Focus, View};
use crate::tui::theme::{Icons, Theme};
use crate::tui::widgets;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Render the main UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);

    let body_view = match app.view {
        View::Help | View::Detail => app.base_view,
        view => view,
    };
    match body_view {
        View::Schema => widgets::render_schema(frame, chunks[1], app),
        _ => render_browser(frame, chunks[1], app),
    }

    render_status_bar(frame, chunks[2], app);

    match app.view {
        View::Help => render_help(frame),
        View::Detail => widgets::render_detail(frame, app),
        View::Browse | View::Schema => {}
    }
}

/// Sidebar on the left, search bar, results and footer on the right
fn render_browser(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(30)])
        .split(area);

    render_sidebar(frame, columns[0], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search bar
            Constraint::Min(5),    // Results
            Constraint::Length(1), // Pagination footer
        ])
        .split(columns[1]);

    widgets::render_search_bar(frame, main[0], app);
    widgets::render_results(frame, main[1], app);
    widgets::render_footer(frame, main[2], app);
}

/// Header with backend address and health indicator
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let health = app.catalog.health;
    let mut spans = vec![
        Span::styled("Weaviate Spy", Theme::title()),
        Span::styled(format!("  {}  ", app.api_url()), Theme::text_secondary()),
        Span::styled(Icons::DOT, Theme::health(health)),
        Span::styled(format!(" {}", health.label()), Theme::text_secondary()),
    ];
    if let Some(updated) = app.last_updated {
        spans.push(Span::styled(
            format!("  updated {}", updated.format("%H:%M:%S")),
            Theme::text_dim(),
        ));
    }

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Theme::border()),
        );

    frame.render_widget(title, area);
}

/// Collection navigation list
fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(format!(" Collections ({}) ", app.catalog.len()))
        .borders(Borders::ALL)
        .border_style(Theme::border_for(app.focus == Focus::Sidebar));

    if app.catalog.is_empty() {
        let message = if app.schema_loading {
            Span::styled("Loading schema...", Theme::text_dim())
        } else if let Some(error) = &app.catalog.error {
            Span::styled(error.clone(), Theme::error())
        } else {
            Span::styled("No collections", Theme::text_dim())
        };
        frame.render_widget(Paragraph::new(Line::from(message)).block(block), area);
        return;
    }

    let open = app.session.collection();
    let items: Vec<ListItem> = app
        .catalog
        .collections()
        .iter()
        .map(|c| {
            let style = if Some(c.name.as_str()) == open {
                Theme::active()
            } else {
                Theme::text()
            };
            ListItem::new(Line::from(vec![
                Span::styled(c.name.clone(), style),
                Span::styled(format!(" ({})", c.properties.len()), Theme::text_dim()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::selected())
        .highlight_symbol(Icons::SELECTED);

    let mut state = ListState::default().with_selected(Some(app.sidebar_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.schema_loading || app.session.is_loading() {
        Span::styled(
            format!(
                "{} Loading...",
                Icons::SPINNER[app.tick % Icons::SPINNER.len()]
            ),
            Theme::active(),
        )
    } else if let Some(error) = app.session.last_error() {
        Span::styled(format!("Error: {}", error), Theme::error())
    } else {
        Span::styled("Ready", Theme::text_secondary())
    };

    let shortcuts = vec![
        Span::styled(" [Tab]", Theme::shortcut_key()),
        Span::styled(" Focus ", Theme::shortcut_desc()),
        Span::styled("[m]", Theme::shortcut_key()),
        Span::styled(" Mode ", Theme::shortcut_desc()),
        Span::styled("[F2]", Theme::shortcut_key()),
        Span::styled(" Schema ", Theme::shortcut_desc()),
        Span::styled("[Ctrl+Q]", Theme::shortcut_key()),
        Span::styled(" Quit ", Theme::shortcut_desc()),
        Span::styled("[F1]", Theme::shortcut_key()),
        Span::styled(" Help", Theme::shortcut_desc()),
    ];

    let line = Line::from(
        std::iter::once(status)
            .chain(std::iter::once(Span::raw(" │ ")))
            .chain(shortcuts)
            .collect::<Vec<_>>(),
    );

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the help modal
fn render_help(frame: &mut Frame) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let shortcuts = [
        ("Tab / S-Tab", "Cycle focus: collections, query, results"),
        ("Enter", "Open collection / run query / row detail"),
        ("↑/↓", "Move selection"),
        ("/", "Edit query"),
        ("m", "Cycle mode (semantic, keyword, hybrid)"),
        ("+ / -", "Adjust certainty or alpha"),
        ("[ ] ← →", "Previous / next page"),
        ("PgUp/PgDn", "Previous / next page"),
        ("s", "Cycle page size"),
        ("r", "Reload schema"),
        ("F2", "Schema overview (type to filter)"),
        ("F3", "Properties of the selected collection"),
        ("Esc", "Close popup / leave query"),
        ("Ctrl+Q", "Quit"),
    ];

    let mut help_lines = vec![
        Line::from(Span::styled("Keyboard Shortcuts", Theme::heading())),
        Line::from(""),
    ];
    help_lines.extend(shortcuts.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("{:<13}", key), Theme::shortcut_key()),
            Span::styled(*desc, Theme::text()),
        ])
    }));
    help_lines.push(Line::from(""));
    help_lines.push(Line::from(Span::styled(
        "Press any key to close",
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(help_lines).block(
        Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Theme::border_focused()),
    );

    frame.render_widget(paragraph, area);
}

/// Helper to create a centered rect
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 100);
        let popup = centered_rect(60, 50, area);
        assert_eq!(popup.width, 60);
        assert_eq!(popup.height, 50);
        assert_eq!((popup.x, popup.y), (20, 25));
    }
}
