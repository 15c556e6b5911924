//! Loads the roadmap document and turns it into a board of cards.

pub mod board;
pub mod html;

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, RoadmapError};
use crate::model::document::RoadmapDocument;

pub use board::Board;

/// Where the document comes from: a local file or an `http(s)` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentLocation {
    File(PathBuf),
    Url(String),
}

impl DocumentLocation {
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            DocumentLocation::Url(raw.to_string())
        } else {
            DocumentLocation::File(PathBuf::from(raw))
        }
    }
}

impl std::fmt::Display for DocumentLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentLocation::File(path) => write!(f, "{}", path.display()),
            DocumentLocation::Url(url) => f.write_str(url),
        }
    }
}

async fn read_text(location: &DocumentLocation) -> Result<String> {
    match location {
        DocumentLocation::File(path) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RoadmapError::io(path.clone(), e)),
        DocumentLocation::Url(url) => {
            debug!(%url, "fetching roadmap document");
            let resp = reqwest::get(url).await.map_err(|source| RoadmapError::Fetch {
                url: url.clone(),
                source,
            })?;
            let status = resp.status();
            if !status.is_success() {
                return Err(RoadmapError::Invalid(format!(
                    "HTTP error! status: {}",
                    status.as_u16()
                )));
            }
            resp.text().await.map_err(|source| RoadmapError::Fetch {
                url: url.clone(),
                source,
            })
        }
    }
}

/// The minimal shape the board needs before rendering anything.
pub fn check_structure(value: &Value) -> Result<()> {
    match value.get("releases") {
        Some(Value::Object(_)) => Ok(()),
        _ => Err(RoadmapError::Invalid(
            "Invalid roadmap data structure: \"releases\" object not found.".into(),
        )),
    }
}

pub async fn fetch_document(location: &DocumentLocation) -> Result<RoadmapDocument> {
    let text = read_text(location).await?;
    let value: Value = serde_json::from_str(&text)
        .map_err(|e| RoadmapError::parse(location.to_string(), e))?;
    check_structure(&value)?;
    serde_json::from_value(value).map_err(|e| RoadmapError::parse(location.to_string(), e))
}

/// Fetches the document and builds the board, or the single error that
/// stopped it.
pub async fn load_board(location: &DocumentLocation) -> Result<Board> {
    let doc = fetch_document(location).await?;
    Ok(Board::from_document(&doc))
}
