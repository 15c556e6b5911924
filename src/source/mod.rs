pub mod asana;

use async_trait::async_trait;
use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, warn};

use crate::error::{Result, RoadmapError};
use crate::model::remote_task::{Builtin, RemoteRef, RemoteTask};

/// Fields every task listing asks for, whatever the display config says.
pub const BASE_FIELDS: &[&str] = &[
    "name",
    "completed",
    "tags.name",
    "custom_fields.name",
    "custom_fields.display_value",
    "notes",
    "due_on",
    "permalink_url",
];

#[async_trait]
pub trait TaskSource: Send + Sync {
    fn name(&self) -> &str;
    /// All tasks of a project, in project order.
    async fn list_tasks(&self, project_id: &str, fields: &[String]) -> Result<Vec<RemoteTask>>;
    async fn list_subtasks(&self, task_gid: &str) -> Result<Vec<RemoteRef>>;
    async fn list_dependencies(&self, task_gid: &str) -> Result<Vec<RemoteRef>>;
}


/// `opt_fields` for a task listing: the base set plus the API field of
/// every built-in display field. Custom display fields are already covered
/// by `custom_fields.*`.
pub fn requested_fields(display_fields: &[String]) -> Vec<String> {
    let mut fields: Vec<String> = BASE_FIELDS.iter().map(|f| f.to_string()).collect();
    for name in display_fields {
        if let Some(builtin) = Builtin::from_field(&name.to_lowercase()) {
            let api = builtin.api_field();
            if !fields.iter().any(|f| f == api) {
                fields.push(api.to_string());
            }
        }
    }
    fields
}

/// Attaches subtasks and dependencies to each task.
///
/// At most `concurrency` tasks are in flight at once; results come back in
/// input order. The first failed request fails the whole call.
pub async fn enrich<S>(source: &S, tasks: Vec<RemoteTask>, concurrency: usize) -> Result<Vec<RemoteTask>>
where
    S: TaskSource + ?Sized,
{
    stream::iter(tasks)
        .map(|mut task| async move {
            if task.gid.is_empty() {
                warn!(name = ?task.name, "task has no gid, skipping subtasks and dependencies");
                return Ok::<_, RoadmapError>(task);
            }
            debug!(gid = %task.gid, "fetching subtasks and dependencies");
            let (subtasks, dependencies) = tokio::try_join!(
                source.list_subtasks(&task.gid),
                source.list_dependencies(&task.gid)
            )?;
            task.subtasks = subtasks;
            task.dependencies = dependencies;
            Ok::<_, RoadmapError>(task)
        })
        .buffered(concurrency.max(1))
        .try_collect()
        .await
}
