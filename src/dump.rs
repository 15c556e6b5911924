//! Raw export of a project, for inspecting what the API actually returns
//! before writing a display config.

use futures::stream::{self, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use tracing::info;

use crate::error::{Result, RoadmapError};
use crate::source::asana::{AsanaSource, Relation};

pub const DUMP_PATH: &str = "asana_dump.json";

const RELATIONS: [Relation; 3] = [Relation::Subtasks, Relation::Dependencies, Relation::Dependents];

/// Every task with every expandable field, plus its subtasks, dependencies
/// and dependents. Tasks keep project order.
pub async fn collect_dump(
    source: &AsanaSource,
    project_id: &str,
    concurrency: usize,
    last_updated: String,
) -> Result<Value> {
    println!("Fetching all task data from Asana project...");
    let tasks = source.list_tasks_expanded(project_id).await?;
    info!(tasks = tasks.len(), "fetching task relations");

    let detailed: Vec<Value> = stream::iter(tasks)
        .map(|task| async move {
            let mut fields = match task {
                Value::Object(fields) => fields,
                other => return Ok::<_, RoadmapError>(other),
            };
            let Some(gid) = fields.get("gid").and_then(Value::as_str).map(String::from) else {
                return Ok(Value::Object(fields));
            };
            let name = fields.get("name").and_then(Value::as_str).unwrap_or_default();
            println!("Fetching details for task: \"{name}\"");

            let (subtasks, dependencies, dependents) = tokio::try_join!(
                source.list_related_expanded(&gid, RELATIONS[0]),
                source.list_related_expanded(&gid, RELATIONS[1]),
                source.list_related_expanded(&gid, RELATIONS[2]),
            )?;
            for (relation, values) in RELATIONS.iter().zip([subtasks, dependencies, dependents]) {
                fields.insert(relation.as_str().to_string(), Value::Array(values));
            }
            Ok(Value::Object(fields))
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await?;

    Ok(json!({
        "lastUpdated": last_updated,
        "project_id": project_id,
        "tasks": detailed,
    }))
}

pub fn task_count(dump: &Value) -> usize {
    dump.get("tasks")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}
