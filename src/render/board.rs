use chrono::{DateTime, NaiveDate};

use crate::model::document::{OutputTask, RoadmapDocument, UNNAMED_TASK};

pub const NO_RELEASES: &str = "No releases found.";
pub const NO_TASKS: &str = "No tasks in this release.";

/// Everything a front end needs to draw the roadmap, derived purely from
/// the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub last_updated: Option<String>,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub title: String,
    pub cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub title: String,
    pub completed: bool,
    pub notes: Option<String>,
    pub status: Option<String>,
    pub due: Option<String>,
    pub url: Option<String>,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
}

impl Board {
    pub fn from_document(doc: &RoadmapDocument) -> Self {
        let columns = doc
            .releases
            .iter()
            .map(|(release, tasks)| Column {
                title: release.clone(),
                cards: tasks.iter().map(Card::from_task).collect(),
            })
            .collect();

        Board {
            last_updated: format_last_updated(&doc.last_updated),
            columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Card {
    pub fn from_task(task: &OutputTask) -> Self {
        let title = match task.name.trim() {
            "" => UNNAMED_TASK.to_string(),
            name => name.to_string(),
        };
        Card {
            title,
            completed: task.completed,
            notes: task.text("notes").map(String::from),
            status: task.text("status").map(String::from),
            due: task.text("due_on").map(format_date),
            url: task.text("url").map(String::from),
            subtasks_done: task.subtasks.iter().filter(|s| s.completed).count(),
            subtasks_total: task.subtasks.len(),
        }
    }

    /// CSS classes: `task-card`, `completed` when done, `status-<slug>`
    /// when a status is set.
    pub fn classes(&self) -> Vec<String> {
        let mut classes = vec!["task-card".to_string()];
        if self.completed {
            classes.push("completed".into());
        }
        if let Some(status) = &self.status {
            classes.push(format!("status-{}", status_slug(status)));
        }
        classes
    }
}

/// `In Progress` → `in-progress`.
pub fn status_slug(status: &str) -> String {
    status
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// `2026-11-01` → `Nov 1, 2026`; anything unparseable is shown as is.
pub fn format_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

fn format_last_updated(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let shown = DateTime::parse_from_rfc3339(raw)
        .map(|t| t.format("%b %-d, %Y %H:%M UTC").to_string())
        .unwrap_or_else(|_| raw.to_string());
    Some(format!("Last updated: {shown}"))
}
