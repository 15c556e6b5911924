use ratatui::style::Color;

use crate::render::board::status_slug;

/// Same palette as the status dots on the HTML board.
pub fn status_color(status: &str) -> Color {
    match status_slug(status).as_str() {
        "in-progress" => Color::Rgb(0x00, 0x65, 0xFF),
        "done" | "complete" => Color::Rgb(0x36, 0xB3, 0x7E),
        "blocked" => Color::Rgb(0xFF, 0x56, 0x30),
        _ => Color::Gray,
    }
}
