use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RoadmapError};

pub const DEFAULT_BASE_URL: &str = "https://app.asana.com";
pub const DEFAULT_MARKER_TAG: &str = "public";
pub const DEFAULT_OUTPUT: &str = "roadmap.json";
pub const DEFAULT_CONCURRENCY: usize = 4;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for a sync or dump run, read from the environment.
#[derive(Debug, Clone)]
pub struct SyncSettings {
    pub access_token: String,
    pub project_id: String,
    pub base_url: String,
    pub marker_tag: String,
    pub output_path: PathBuf,
    pub config_path: Option<PathBuf>,
    pub concurrency: usize,
    pub timeout: Duration,
}

impl SyncSettings {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let (Some(access_token), Some(project_id)) =
            (get("ASANA_ACCESS_TOKEN"), get("ASANA_PROJECT_ID"))
        else {
            return Err(RoadmapError::config(
                "ASANA_ACCESS_TOKEN and ASANA_PROJECT_ID must be set",
            ));
        };

        let concurrency = match get("ROADMAP_CONCURRENCY") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n >= 1 => n,
                _ => {
                    return Err(RoadmapError::config(format!(
                        "ROADMAP_CONCURRENCY must be a positive integer, got {raw:?}"
                    )))
                }
            },
            None => DEFAULT_CONCURRENCY,
        };

        let timeout_secs = match get("ROADMAP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                RoadmapError::config(format!(
                    "ROADMAP_TIMEOUT_SECS must be a number of seconds, got {raw:?}"
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            access_token,
            project_id,
            base_url: get("ASANA_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            marker_tag: get("ROADMAP_MARKER_TAG").unwrap_or_else(|| DEFAULT_MARKER_TAG.into()),
            output_path: get("ROADMAP_OUTPUT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            config_path: get("ROADMAP_CONFIG").map(PathBuf::from),
            concurrency,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Which custom field groups tasks into releases, and which fields are
/// projected onto each output task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayConfig {
    pub task_grouping_field: String,
    pub display_fields: Vec<String>,
}

/// Candidate locations for the display config when none is given
/// explicitly, in lookup order.
pub fn display_config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from("config.json"), PathBuf::from("config.toml")];
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("roadmap").join("config.json"));
    }
    candidates
}

pub fn resolve_display_config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    let candidates = display_config_candidates();
    candidates
        .iter()
        .find(|p| p.exists())
        .cloned()
        .ok_or_else(|| {
            let tried: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
            RoadmapError::config(format!(
                "no display config found (tried {})",
                tried.join(", ")
            ))
        })
}

pub fn load_display_config(path: &Path) -> Result<DisplayConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        RoadmapError::config(format!("failed to read {}: {e}", path.display()))
    })?;
    parse_display_config(path, &contents)
}

fn parse_display_config(path: &Path, contents: &str) -> Result<DisplayConfig> {
    let is_toml = path.extension().and_then(|e| e.to_str()) == Some("toml");
    let config: DisplayConfig = if is_toml {
        toml::from_str(contents).map_err(|e| {
            RoadmapError::config(format!("malformed {}: {e}", path.display()))
        })?
    } else {
        serde_json::from_str(contents).map_err(|e| {
            RoadmapError::config(format!("malformed {}: {e}", path.display()))
        })?
    };

    if config.task_grouping_field.trim().is_empty() {
        return Err(RoadmapError::config(format!(
            "{}: taskGroupingField must not be empty",
            path.display()
        )));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn settings_require_credentials() {
        let err = SyncSettings::from_lookup(lookup(&[("ASANA_PROJECT_ID", "42")])).unwrap_err();
        assert!(matches!(err, RoadmapError::Config(_)));
        assert!(err.to_string().contains("ASANA_ACCESS_TOKEN"));

        let err = SyncSettings::from_lookup(lookup(&[
            ("ASANA_ACCESS_TOKEN", "secret"),
            ("ASANA_PROJECT_ID", "  "),
        ]))
        .unwrap_err();
        assert!(matches!(err, RoadmapError::Config(_)));
    }

    #[test]
    fn settings_defaults() {
        let settings = SyncSettings::from_lookup(lookup(&[
            ("ASANA_ACCESS_TOKEN", "secret"),
            ("ASANA_PROJECT_ID", "42"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.marker_tag, "public");
        assert_eq!(settings.output_path, PathBuf::from("roadmap.json"));
        assert_eq!(settings.config_path, None);
        assert_eq!(settings.concurrency, 4);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn settings_overrides() {
        let settings = SyncSettings::from_lookup(lookup(&[
            ("ASANA_ACCESS_TOKEN", "secret"),
            ("ASANA_PROJECT_ID", "42"),
            ("ASANA_BASE_URL", "http://127.0.0.1:9000/"),
            ("ROADMAP_MARKER_TAG", "roadmap"),
            ("ROADMAP_CONCURRENCY", "8"),
            ("ROADMAP_TIMEOUT_SECS", "5"),
            ("ROADMAP_CONFIG", "display.toml"),
        ]))
        .unwrap();
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.marker_tag, "roadmap");
        assert_eq!(settings.concurrency, 8);
        assert_eq!(settings.timeout, Duration::from_secs(5));
        assert_eq!(settings.config_path, Some(PathBuf::from("display.toml")));
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let err = SyncSettings::from_lookup(lookup(&[
            ("ASANA_ACCESS_TOKEN", "secret"),
            ("ASANA_PROJECT_ID", "42"),
            ("ROADMAP_CONCURRENCY", "0"),
        ]))
        .unwrap_err();
        assert!(err.to_string().contains("ROADMAP_CONCURRENCY"));
    }

    #[test]
    fn loads_json_and_toml_display_config() {
        let dir = tempfile::tempdir().unwrap();

        let json_path = dir.path().join("config.json");
        std::fs::write(
            &json_path,
            r#"{"taskGroupingField": "Release", "displayFields": ["Notes", "Status"]}"#,
        )
        .unwrap();
        let config = load_display_config(&json_path).unwrap();
        assert_eq!(config.task_grouping_field, "Release");
        assert_eq!(config.display_fields, vec!["Notes", "Status"]);

        let toml_path = dir.path().join("config.toml");
        std::fs::write(
            &toml_path,
            "taskGroupingField = \"Stage\"\ndisplayFields = [\"due_on\"]\n",
        )
        .unwrap();
        let config = load_display_config(&toml_path).unwrap();
        assert_eq!(config.task_grouping_field, "Stage");
        assert_eq!(config.display_fields, vec!["due_on"]);
    }

    #[test]
    fn malformed_display_config_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        std::fs::write(&path, r#"{"displayFields": []}"#).unwrap();
        assert!(matches!(load_display_config(&path), Err(RoadmapError::Config(_))));

        std::fs::write(&path, r#"{"taskGroupingField": "", "displayFields": []}"#).unwrap();
        assert!(matches!(load_display_config(&path), Err(RoadmapError::Config(_))));

        assert!(matches!(
            load_display_config(&dir.path().join("absent.json")),
            Err(RoadmapError::Config(_))
        ));
    }

    #[test]
    fn explicit_config_path_wins() {
        let path = resolve_display_config_path(Some(Path::new("custom.json"))).unwrap();
        assert_eq!(path, PathBuf::from("custom.json"));
    }
}
