use std::io::Write;
use std::path::Path;

use chrono::{DateTime, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::Serialize;

use super::group::resolve_group_key;
use super::mapper::map_fields;
use crate::config::DisplayConfig;
use crate::error::{Result, RoadmapError};
use crate::model::document::{OutputTask, RoadmapDocument};
use crate::model::remote_task::RemoteTask;

/// `2026-10-16T09:30:00.000Z`, the format browsers' `toISOString` produce.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Groups already filtered tasks into releases and maps their fields.
pub fn build_document(tasks: &[RemoteTask], config: &DisplayConfig, now: DateTime<Utc>) -> RoadmapDocument {
    let mut releases: IndexMap<String, Vec<OutputTask>> = IndexMap::new();
    for task in tasks {
        let key = resolve_group_key(task, &config.task_grouping_field);
        releases
            .entry(key)
            .or_default()
            .push(map_fields(task, &config.display_fields));
    }

    RoadmapDocument {
        last_updated: format_timestamp(now),
        releases,
    }
}

pub fn write_document(path: &Path, doc: &RoadmapDocument) -> Result<()> {
    write_json(path, doc)
}

/// Replaces `path` with pretty-printed JSON. The bytes go to a temporary
/// file in the same directory first, so readers see either the previous
/// document or the new one.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| RoadmapError::parse("document", e))?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(|e| RoadmapError::io(dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| RoadmapError::io(dir, e))?;
    let tmp_path = tmp.path().to_path_buf();
    writeln!(tmp, "{json}").map_err(|e| RoadmapError::io(&tmp_path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| RoadmapError::io(&tmp_path, e))?;
    tmp.persist(path)
        .map_err(|e| RoadmapError::io(path, e.error))?;
    Ok(())
}
