use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use tracing::info;

use crate::app;
use crate::config::{self, DisplayConfig, SyncSettings};
use crate::dump;
use crate::render::{self, html, DocumentLocation};
use crate::source::asana::AsanaSource;
use crate::sync::{self, writer};
use crate::validate;

const DEFAULT_DOCUMENT: &str = "roadmap.json";
const DEFAULT_PAGE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Sync,
    Validate,
    Render { source: String, output: PathBuf },
    View { source: String },
    Dump,
    Help,
}

impl Command {
    /// The terminal board owns the screen, so it starts with logging off.
    pub fn is_interactive(&self) -> bool {
        matches!(self, Command::View { .. })
    }
}

/// Parse the arguments after the program name.
///
/// Supported forms:
///   roadmap sync
///   roadmap validate
///   roadmap render [document] [output.html]
///   roadmap view [document]
///   roadmap dump
pub fn parse_args(args: &[String]) -> Result<Command> {
    let Some((name, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };

    let command = match name.as_str() {
        "sync" | "dump" | "validate" => {
            if !rest.is_empty() {
                bail!("`roadmap {name}` takes no arguments (configure it through environment variables)");
            }
            match name.as_str() {
                "sync" => Command::Sync,
                "dump" => Command::Dump,
                _ => Command::Validate,
            }
        }
        "render" => {
            if rest.len() > 2 {
                bail!("Usage: roadmap render [document] [output.html]");
            }
            Command::Render {
                source: rest.first().cloned().unwrap_or_else(|| DEFAULT_DOCUMENT.into()),
                output: rest
                    .get(1)
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_PAGE)),
            }
        }
        "view" => {
            if rest.len() > 1 {
                bail!("Usage: roadmap view [document]");
            }
            Command::View {
                source: rest.first().cloned().unwrap_or_else(|| DEFAULT_DOCUMENT.into()),
            }
        }
        "help" | "-h" | "--help" => Command::Help,
        other => bail!("Unknown command `{other}`. Run `roadmap help` for usage."),
    };
    Ok(command)
}

pub async fn run(command: Command) -> Result<()> {
    match command {
        Command::Sync => handle_sync().await,
        Command::Validate => handle_validate(),
        Command::Render { source, output } => handle_render(&source, &output).await,
        Command::View { source } => app::run(DocumentLocation::parse(&source)).await,
        Command::Dump => handle_dump().await,
        Command::Help => {
            print_help();
            Ok(())
        }
    }
}

async fn handle_sync() -> Result<()> {
    let settings = SyncSettings::from_env()?;
    let display_config = load_sync_display_config(&settings)?;

    println!("Starting Asana sync...");
    let source = AsanaSource::new(&settings.base_url, &settings.access_token, settings.timeout)?;
    let doc = sync::run_sync(&source, &settings, &display_config)
        .await
        .context("Error syncing Asana tasks")?;

    writer::write_document(&settings.output_path, &doc)
        .context("Error syncing Asana tasks")?;
    println!("Successfully wrote {}", settings.output_path.display());
    info!(
        releases = doc.releases.len(),
        tasks = doc.task_count(),
        path = %settings.output_path.display(),
        "roadmap document written"
    );

    println!("\nSummary:");
    for line in sync::summary_lines(&doc) {
        println!("{line}");
    }
    Ok(())
}

fn load_sync_display_config(settings: &SyncSettings) -> Result<DisplayConfig> {
    let config_path = config::resolve_display_config_path(settings.config_path.as_deref())?;
    let display_config = config::load_display_config(&config_path)?;
    info!(
        config = %config_path.display(),
        grouping = %display_config.task_grouping_field,
        "loaded display config"
    );
    Ok(display_config)
}

fn handle_validate() -> Result<()> {
    let path = PathBuf::from(DEFAULT_DOCUMENT);
    println!("Validating {}...", path.display());

    let summary = validate::validate_file(&path, validate::ASANA_APP_URL)
        .map_err(|e| anyhow::anyhow!("Validation failed: {e}"))?;

    println!(
        "Validation successful! The {} structure is correct ({} releases, {} tasks).",
        path.display(),
        summary.releases,
        summary.tasks
    );
    Ok(())
}

async fn handle_render(source: &str, output: &Path) -> Result<()> {
    let location = DocumentLocation::parse(source);
    let result = render::load_board(&location).await;
    if let Err(e) = &result {
        tracing::error!(%location, error = %e, "failed to load or render roadmap");
    }

    let page = html::render_page(&result);
    std::fs::write(output, page)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    match result {
        Ok(board) => {
            println!(
                "Rendered {} releases from {location} to {}",
                board.columns.len(),
                output.display()
            );
            Ok(())
        }
        Err(e) => bail!("Failed to load or render roadmap: {e} (error page written to {})", output.display()),
    }
}

async fn handle_dump() -> Result<()> {
    let settings = SyncSettings::from_env()?;

    println!("Starting Asana debug dump...");
    let source = AsanaSource::new(&settings.base_url, &settings.access_token, settings.timeout)?;
    let dump = dump::collect_dump(
        &source,
        &settings.project_id,
        settings.concurrency,
        writer::format_timestamp(Utc::now()),
    )
    .await
    .context("Error during Asana debug dump")?;

    let path = PathBuf::from(dump::DUMP_PATH);
    writer::write_json(&path, &dump).context("Error during Asana debug dump")?;
    println!("Successfully wrote {}", path.display());
    println!("Dumped data for {} tasks.", dump::task_count(&dump));
    Ok(())
}

pub fn print_help() {
    print!("{}", help_text());
}

fn help_text() -> String {
    [
        "roadmap: publish an Asana project as a static roadmap",
        "",
        "USAGE:",
        "  roadmap sync                     Fetch tagged tasks and write ROADMAP_OUTPUT",
        "  roadmap validate                 Check ./roadmap.json against the document schema",
        "                                   (fixed path; ROADMAP_OUTPUT is not consulted)",
        "  roadmap render [doc] [out.html]  Render the roadmap as a static HTML page",
        "  roadmap view [doc]               Browse the roadmap in the terminal",
        "  roadmap dump                     Write every task and relation to asana_dump.json",
        "",
        "ENVIRONMENT:",
        "  ASANA_ACCESS_TOKEN    Personal access token (required for sync/dump)",
        "  ASANA_PROJECT_ID      Project to read (required for sync/dump)",
        "  ROADMAP_CONFIG        Display config path (default: config.json)",
        "  ROADMAP_MARKER_TAG    Tag that marks public tasks (default: public)",
        "  ROADMAP_OUTPUT        Document written by sync (default: roadmap.json)",
        "  ROADMAP_CONCURRENCY   Parallel follow-up requests (default: 4)",
        "  ROADMAP_TIMEOUT_SECS  Per-request timeout (default: 30)",
        "  RUST_LOG              Log filter (default: roadmap=info)",
        "",
    ]
    .join("\n")
}
