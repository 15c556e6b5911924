use crate::model::remote_task::RemoteTask;

/// Keeps the tasks tagged with `marker` (case-insensitive), in order.
pub fn filter_by_tag(tasks: Vec<RemoteTask>, marker: &str) -> Vec<RemoteTask> {
    tasks.into_iter().filter(|task| task.has_tag(marker)).collect()
}
