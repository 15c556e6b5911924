//! Pulls tasks from the remote source and turns them into the roadmap
//! document: list → filter by marker tag → attach subtasks/dependencies →
//! group by release → map display fields.

pub mod filter;
pub mod group;
pub mod mapper;
pub mod writer;

use chrono::Utc;
use tracing::info;

use crate::config::{DisplayConfig, SyncSettings};
use crate::error::Result;
use crate::model::document::RoadmapDocument;
use crate::source::{enrich, requested_fields, TaskSource};

/// Runs the whole pipeline in memory. Nothing touches the disk here, so a
/// failure anywhere leaves the previous document in place.
pub async fn run_sync(
    source: &dyn TaskSource,
    settings: &SyncSettings,
    config: &DisplayConfig,
) -> Result<RoadmapDocument> {
    println!("Fetching tasks from {} project...", source.name());
    let fields = requested_fields(&config.display_fields);
    let tasks = source.list_tasks(&settings.project_id, &fields).await?;

    println!("Processing {} tasks...", tasks.len());
    let tasks = filter::filter_by_tag(tasks, &settings.marker_tag);
    println!("Found {} {} tasks", tasks.len(), settings.marker_tag);

    info!(
        tasks = tasks.len(),
        concurrency = settings.concurrency,
        "fetching subtasks and dependencies"
    );
    let tasks = enrich(source, tasks, settings.concurrency).await?;

    Ok(writer::build_document(&tasks, config, Utc::now()))
}

/// `  <release>: <n> tasks` per release, in document order.
pub fn summary_lines(doc: &RoadmapDocument) -> Vec<String> {
    doc.releases
        .iter()
        .map(|(release, tasks)| format!("  {release}: {} tasks", tasks.len()))
        .collect()
}
