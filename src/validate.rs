//! Out-of-band contract check for `roadmap.json`. Stops at the first
//! violation.

use std::path::Path;

use serde_json::Value;

use crate::error::{Result, RoadmapError};

pub const ASANA_APP_URL: &str = "https://app.asana.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationSummary {
    pub releases: usize,
    pub tasks: usize,
}

fn fail<T>(msg: impl Into<String>) -> Result<T> {
    Err(RoadmapError::validation(msg))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Checks, in order: `lastUpdated`, the `releases` container, each
/// release's task array, and each task's `name`, `completed` and `url`.
pub fn validate(doc: &Value, url_prefix: &str) -> Result<ValidationSummary> {
    match doc.get("lastUpdated") {
        Some(Value::String(s)) if !s.is_empty() => {}
        _ => return fail("\"lastUpdated\" field is missing or invalid."),
    }

    let Some(Value::Object(releases)) = doc.get("releases") else {
        return fail("\"releases\" field must be a non-array object.");
    };

    let mut tasks_seen = 0;
    for (release, tasks) in releases {
        let Value::Array(tasks) = tasks else {
            return fail(format!("Release \"{release}\" must contain an array of tasks."));
        };

        for task in tasks {
            let Value::Object(task) = task else {
                return fail(format!("A task in \"{release}\" is not a valid object."));
            };

            let name = match task.get("name") {
                Some(Value::String(name)) if !name.is_empty() => name,
                _ => return fail(format!("A task in \"{release}\" is missing a \"name\".")),
            };

            match task.get("completed") {
                Some(Value::Bool(_)) => {}
                None => {
                    return fail(format!(
                        "Task \"{name}\" is missing a \"completed\" boolean flag."
                    ))
                }
                Some(other) => {
                    return fail(format!(
                        "Task \"{name}\" has a \"completed\" flag of type {}, expected boolean.",
                        type_name(other)
                    ))
                }
            }

            match task.get("url") {
                None | Some(Value::Null) => {}
                Some(Value::String(url)) if url.starts_with(url_prefix) => {}
                Some(_) => return fail(format!("Task \"{name}\" has an invalid Asana URL.")),
            }

            tasks_seen += 1;
        }
    }

    Ok(ValidationSummary {
        releases: releases.len(),
        tasks: tasks_seen,
    })
}

pub fn validate_file(path: &Path, url_prefix: &str) -> Result<ValidationSummary> {
    let contents = std::fs::read_to_string(path).map_err(|e| RoadmapError::io(path, e))?;
    let doc: Value = serde_json::from_str(&contents)
        .map_err(|e| RoadmapError::parse(path.display().to_string(), e))?;
    validate(&doc, url_prefix)
}
