use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::theme::status_color;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Details ");

    let Some(card) = app.selected_card() else {
        f.render_widget(block, area);
        return;
    };

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(vec![
        Span::styled(if card.completed { "Done: " } else { "Open: " }, Style::default().fg(Color::Gray)),
        Span::raw(card.title.as_str()),
    ]));

    if let Some(status) = &card.status {
        lines.push(Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Gray)),
            Span::styled(status.as_str(), Style::default().fg(status_color(status))),
        ]));
    }

    if let Some(due) = &card.due {
        lines.push(Line::from(vec![
            Span::styled("Due: ", Style::default().fg(Color::Gray)),
            Span::raw(due.as_str()),
        ]));
    }

    if card.subtasks_total > 0 {
        lines.push(Line::from(vec![
            Span::styled("Subtasks: ", Style::default().fg(Color::Gray)),
            Span::raw(format!("{}/{}", card.subtasks_done, card.subtasks_total)),
        ]));
    }

    if let Some(url) = &card.url {
        lines.push(Line::from(vec![
            Span::styled("URL: ", Style::default().fg(Color::Gray)),
            Span::styled(url.as_str(), Style::default().fg(Color::Blue)),
        ]));
    }

    if let Some(notes) = &card.notes {
        let truncated: String = notes.chars().take(300).collect();
        lines.push(Line::raw(truncated));
    }

    let paragraph = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
