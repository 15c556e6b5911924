use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

use crate::app::App;
use crate::render::board::{Board, NO_TASKS};
use crate::ui::theme::status_color;

pub fn render(f: &mut Frame, area: Rect, app: &App, board: &Board) {
    let count = board.columns.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (i, (column, column_area)) in board.columns.iter().zip(areas.iter()).enumerate() {
        let focused = i == app.selected_column;

        let items: Vec<ListItem> = if column.cards.is_empty() {
            vec![ListItem::new(Span::styled(
                NO_TASKS,
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            column
                .cards
                .iter()
                .enumerate()
                .map(|(j, card)| {
                    let selected = focused && j == app.selected_card;

                    let marker = if card.completed {
                        Span::styled("✓ ", Style::default().fg(Color::Green))
                    } else {
                        Span::raw("  ")
                    };

                    // Truncate title to fit
                    let max_title = column_area.width.saturating_sub(6) as usize;
                    let title: String = card.title.chars().take(max_title).collect();
                    let mut title_style = Style::default();
                    if card.completed {
                        title_style = title_style
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT);
                    }
                    if selected {
                        title_style = title_style.fg(Color::Cyan).add_modifier(Modifier::BOLD);
                    }

                    let mut spans = vec![marker, Span::styled(title, title_style)];
                    if let Some(status) = &card.status {
                        spans.push(Span::styled(
                            format!(" [{status}]"),
                            Style::default().fg(status_color(status)),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect()
        };

        let border = if focused { Color::Cyan } else { Color::Gray };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(format!(" {} ({}) ", column.title, column.cards.len())),
        );

        // The state scrolls the focused column so the selected card stays visible.
        let mut state = ListState::default();
        if focused && !column.cards.is_empty() {
            state.select(Some(app.selected_card));
        }
        f.render_stateful_widget(list, *column_area, &mut state);
    }
}
