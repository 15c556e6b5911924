pub mod columns;
pub mod detail_panel;
pub mod footer;
pub mod theme;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::render::board::NO_RELEASES;

pub fn render(f: &mut Frame, app: &App) {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),    // columns
            Constraint::Length(8), // selected card
            Constraint::Length(1), // footer
        ])
        .split(f.area());

    match (&app.board, &app.error) {
        (_, Some(error)) => {
            let paragraph = Paragraph::new(format!("Error: {error}"))
                .style(Style::default().fg(Color::Red))
                .block(Block::default().borders(Borders::ALL).title(" Roadmap "))
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, vertical[0]);
        }
        (Some(board), None) if board.is_empty() => {
            let paragraph = Paragraph::new(NO_RELEASES)
                .block(Block::default().borders(Borders::ALL).title(" Roadmap "));
            f.render_widget(paragraph, vertical[0]);
        }
        (Some(board), None) => columns::render(f, vertical[0], app, board),
        (None, None) => {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Roadmap (loading...) ");
            f.render_widget(block, vertical[0]);
        }
    }

    detail_panel::render(f, vertical[1], app);
    footer::render(f, vertical[2], app);
}
