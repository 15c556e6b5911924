use std::fmt::Write;

use super::board::{Board, Card, Column, NO_RELEASES, NO_TASKS};
use crate::error::RoadmapError;

const STYLE: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0; background: #f4f5f7; color: #172b4d; }
header { padding: 1rem 2rem; background: #fff; border-bottom: 1px solid #dfe1e6; }
#roadmap-container { display: flex; gap: 1rem; padding: 1rem 2rem; overflow-x: auto; align-items: flex-start; }
.release-column { flex: 0 0 18rem; background: #ebecf0; border-radius: 6px; padding: 0.75rem; }
.release-title { font-size: 1rem; margin: 0 0 0.75rem; }
.task-card { background: #fff; border-radius: 4px; padding: 0.6rem; margin-bottom: 0.5rem; box-shadow: 0 1px 1px rgba(9,30,66,.25); }
.task-card.completed .task-name { text-decoration: line-through; color: #5e6c84; }
.task-notes { font-size: 0.85rem; color: #5e6c84; margin-top: 0.4rem; white-space: pre-wrap; }
.task-status, .task-due, .task-subtasks { font-size: 0.8rem; margin-top: 0.4rem; }
.status-dot { display: inline-block; width: 0.5rem; height: 0.5rem; border-radius: 50%; background: #97a0af; margin-right: 0.3rem; }
.status-in-progress .status-dot { background: #0065ff; }
.status-done .status-dot, .status-complete .status-dot { background: #36b37e; }
.status-blocked .status-dot { background: #ff5630; }
.no-tasks { color: #5e6c84; font-style: italic; }
#error { margin: 1rem 2rem; padding: 0.75rem; background: #ffebe6; color: #bf2600; border-radius: 4px; }
footer { padding: 1rem 2rem; font-size: 0.8rem; color: #5e6c84; }
"#;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// A full static page. A failed load yields only the error banner, never
/// a partially drawn board.
pub fn render_page(result: &Result<Board, RoadmapError>) -> String {
    let mut body = String::new();
    let mut footer = String::new();

    match result {
        Ok(board) => {
            body.push_str(&render_board(board));
            if let Some(updated) = &board.last_updated {
                let _ = write!(footer, "<span id=\"last-updated\">{}</span>", escape(updated));
            }
        }
        Err(err) => {
            let _ = write!(
                body,
                "<div id=\"error\" role=\"alert\">Error: {}</div>",
                escape(&err.to_string())
            );
        }
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>Roadmap</title>\n<style>{STYLE}</style>\n</head>\n<body>\n\
         <header><h1>Roadmap</h1></header>\n{body}\n<footer>{footer}</footer>\n</body>\n</html>\n"
    )
}

/// Only absolute `https` links become anchors. Anything else, such as a
/// `javascript:` URL in a hand-edited document, leaves the title unlinked.
fn is_safe_link(url: &str) -> bool {
    url.get(..8)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("https://"))
}

pub fn render_board(board: &Board) -> String {
    let mut out = String::from("<main id=\"roadmap-container\">\n");
    if board.is_empty() {
        let _ = writeln!(out, "<p class=\"no-tasks\">{NO_RELEASES}</p>");
    } else {
        for column in &board.columns {
            out.push_str(&render_column(column));
        }
    }
    out.push_str("</main>");
    out
}

fn render_column(column: &Column) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<section class=\"release-column\">");
    let _ = writeln!(out, "<h2 class=\"release-title\">{}</h2>", escape(&column.title));
    let _ = writeln!(out, "<div class=\"tasks-container\">");
    if column.cards.is_empty() {
        let _ = writeln!(out, "<p class=\"no-tasks\">{NO_TASKS}</p>");
    } else {
        for card in &column.cards {
            out.push_str(&render_card(card));
        }
    }
    let _ = writeln!(out, "</div>\n</section>");
    out
}

fn render_card(card: &Card) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<article class=\"{}\">", escape(&card.classes().join(" ")));

    let title = escape(&card.title);
    match card.url.as_deref().filter(|url| is_safe_link(url)) {
        Some(url) => {
            let _ = writeln!(
                out,
                "<div class=\"task-name\"><a href=\"{}\" rel=\"noopener\">{title}</a></div>",
                escape(url)
            );
        }
        None => {
            let _ = writeln!(out, "<div class=\"task-name\">{title}</div>");
        }
    }

    if let Some(notes) = &card.notes {
        let _ = writeln!(out, "<div class=\"task-notes\">{}</div>", escape(notes));
    }
    if let Some(status) = &card.status {
        let _ = writeln!(
            out,
            "<div class=\"task-status\"><span class=\"status-dot\"></span><span class=\"status-label\">{}</span></div>",
            escape(status)
        );
    }
    if let Some(due) = &card.due {
        let _ = writeln!(out, "<div class=\"task-due\">Due {}</div>", escape(due));
    }
    if card.subtasks_total > 0 {
        let _ = writeln!(
            out,
            "<div class=\"task-subtasks\">{}/{} subtasks</div>",
            card.subtasks_done, card.subtasks_total
        );
    }

    out.push_str("</article>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::document::RoadmapDocument;
    use serde_json::json;

    fn board(value: serde_json::Value) -> Board {
        let doc: RoadmapDocument = serde_json::from_value(value).unwrap();
        Board::from_document(&doc)
    }

    #[test]
    fn empty_document_shows_placeholder() {
        let page = render_page(&Ok(board(json!({"lastUpdated": "x", "releases": {}}))));
        assert!(page.contains("No releases found."));
        assert!(!page.contains("<section"));
        assert!(!page.contains("id=\"error\""));
    }

    #[test]
    fn empty_release_shows_placeholder() {
        let page = render_page(&Ok(board(json!({"releases": {"v1": []}}))));
        assert!(page.contains("<h2 class=\"release-title\">v1</h2>"));
        assert!(page.contains("No tasks in this release."));
    }

    #[test]
    fn cards_render_only_present_fields() {
        let page = render_page(&Ok(board(json!({
            "lastUpdated": "2026-10-16T09:30:00.000Z",
            "releases": {"v1": [
                {"name": "Done thing", "completed": true, "status": "Done", "notes": "Shipped"},
                {"name": "", "completed": false}
            ]}
        }))));
        assert!(page.contains("class=\"task-card completed status-done\""));
        assert!(page.contains("<div class=\"task-notes\">Shipped</div>"));
        assert!(page.contains("<span class=\"status-label\">Done</span>"));
        assert!(page.contains("Unnamed Task"));
        assert_eq!(page.matches("task-notes\"").count(), 1);
        assert_eq!(page.matches("status-label").count(), 1);
        assert!(page.contains("Last updated: Oct 16, 2026 09:30 UTC"));
    }

    #[test]
    fn text_is_escaped() {
        let page = render_page(&Ok(board(json!({
            "releases": {"<v1>": [{"name": "a & <b>", "url": "https://app.asana.com/0/1/2?a=1&b=\"2\""}]}
        }))));
        assert!(page.contains("&lt;v1&gt;"));
        assert!(page.contains("a &amp; &lt;b&gt;"));
        assert!(page.contains("href=\"https://app.asana.com/0/1/2?a=1&amp;b=&quot;2&quot;\""));
        assert!(!page.contains("<b>"));
    }

    #[test]
    fn only_https_urls_become_links() {
        let page = render_page(&Ok(board(json!({
            "releases": {"v1": [
                {"name": "Script", "url": "javascript:alert(document.cookie)"},
                {"name": "Data", "url": "data:text/html,<b>x</b>"},
                {"name": "Plain", "url": "http://app.asana.com/0/1/2"},
                {"name": "Asana", "url": "https://app.asana.com/0/1/3"}
            ]}
        }))));
        assert!(!page.contains("javascript:"));
        assert!(!page.contains("href=\"data:"));
        assert!(!page.contains("href=\"http://"));
        assert!(page.contains("<div class=\"task-name\">Script</div>"));
        assert!(page.contains("<div class=\"task-name\">Plain</div>"));
        assert!(page.contains("<a href=\"https://app.asana.com/0/1/3\" rel=\"noopener\">Asana</a>"));
        assert_eq!(page.matches("<a href=").count(), 1);
        assert!(is_safe_link("HTTPS://app.asana.com/0/1/3"));
        assert!(!is_safe_link("https:"));
    }

    #[test]
    fn error_replaces_board() {
        let err = RoadmapError::Invalid(
            "Invalid roadmap data structure: \"releases\" object not found.".into(),
        );
        let page = render_page(&Err(err));
        assert_eq!(page.matches("id=\"error\"").count(), 1);
        assert!(page.contains("Error: Invalid roadmap data structure"));
        assert!(!page.contains("<main"));
        assert!(!page.contains("loading"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let value = json!({
            "lastUpdated": "2026-10-16T09:30:00.000Z",
            "releases": {"v2": [{"name": "B", "status": "In Progress"}], "v1": [{"name": "A"}]}
        });
        let first = render_page(&Ok(board(value.clone())));
        let second = render_page(&Ok(board(value)));
        assert_eq!(first, second);
        assert!(first.find("v2").unwrap() < first.find(">v1<").unwrap());
    }
}
