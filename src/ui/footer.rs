use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![
        hint("←→", "release"),
        hint("↑↓", "task"),
        hint("r", "reload"),
        hint("q", "quit"),
    ];

    spans.push(Span::raw("  "));
    if app.loading {
        spans.push(Span::styled(
            " LOADING ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ));
    } else if let Some(updated) = app.board.as_ref().and_then(|b| b.last_updated.as_ref()) {
        spans.push(Span::styled(updated.as_str(), Style::default().fg(Color::DarkGray)));
    }

    spans.push(Span::raw("  "));
    spans.push(Span::styled(
        app.location.to_string(),
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(Line::from(spans));
    f.render_widget(paragraph, area);
}

fn hint(key: &str, desc: &str) -> Span<'static> {
    Span::styled(
        format!(" {key}:{desc} "),
        Style::default().fg(Color::DarkGray),
    )
}
