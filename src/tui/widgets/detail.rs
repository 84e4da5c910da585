//! Detail Popup
//!
//! Full values of the selected row (untruncated text, every array item,
//! pretty-printed objects, the relevance breakdown), or the property list
//! of a collection.

use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::tui::ui::centered_rect;
use ratatui::{
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn render_detail(frame: &mut Frame, app: &App) {
    let Some(detail) = &app.detail else {
        return;
    };

    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let mut lines: Vec<Line> = Vec::new();
    for (title, value) in &detail.fields {
        lines.push(Line::from(Span::styled(title.clone(), Theme::heading())));
        for text in value.lines() {
            lines.push(Line::from(Span::styled(format!("  {}", text), Theme::text())));
        }
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Theme::text_dim(),
    )));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(format!(" {} ", detail.title))
                .borders(Borders::ALL)
                .border_style(Theme::border_focused()),
        );

    frame.render_widget(paragraph, area);
}
