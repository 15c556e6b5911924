use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::remote_task::null_as_default;

/// Group key for tasks without a usable grouping field value.
pub const UNSCHEDULED: &str = "Unscheduled";

/// Stand-in title for tasks without a name.
pub const UNNAMED_TASK: &str = "Unnamed Task";

/// The interchange document written by `sync` and read by `render`,
/// `view` and `validate`.
///
/// Releases keep the order in which their first task appeared, so the
/// board columns follow the project order rather than an alphabetical one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_updated: String,
    pub releases: IndexMap<String, Vec<OutputTask>>,
}

/// A display-ready task. `name`, `completed`, `subtasks` and
/// `dependencies` are always written; every configured display field is
/// flattened alongside them as a string or `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutputTask {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(flatten)]
    pub fields: IndexMap<String, Value>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<TaskRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<TaskRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRef {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
}

impl OutputTask {
    /// Non-empty string value of a display field.
    pub fn text(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

impl RoadmapDocument {
    pub fn task_count(&self) -> usize {
        self.releases.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoadmapDocument {
        let mut fields = IndexMap::new();
        fields.insert("notes".to_string(), Value::String("Ship it".into()));
        fields.insert("due_on".to_string(), Value::Null);

        let mut releases = IndexMap::new();
        releases.insert(
            "v2".to_string(),
            vec![OutputTask {
                name: "B".into(),
                completed: true,
                fields,
                subtasks: vec![TaskRef {
                    name: "B.1".into(),
                    completed: false,
                }],
                dependencies: vec![],
            }],
        );
        releases.insert("v1".to_string(), vec![]);

        RoadmapDocument {
            last_updated: "2026-10-16T09:30:00.000Z".into(),
            releases,
        }
    }

    #[test]
    fn serialized_keys_are_camel_case_and_flattened() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("lastUpdated").is_some());
        let task = &json["releases"]["v2"][0];
        assert_eq!(task["notes"], "Ship it");
        assert!(task["due_on"].is_null());
        assert!(task.get("fields").is_none());
        assert_eq!(task["subtasks"][0]["name"], "B.1");
    }

    #[test]
    fn parse_after_write_keeps_structure_and_order() {
        let doc = sample();
        let text = serde_json::to_string_pretty(&doc).unwrap();
        let back: RoadmapDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(back, doc);
        let keys: Vec<&String> = back.releases.keys().collect();
        assert_eq!(keys, ["v2", "v1"]);
    }

    #[test]
    fn null_structural_fields_read_as_defaults() {
        let doc: RoadmapDocument = serde_json::from_value(serde_json::json!({
            "lastUpdated": null,
            "releases": {"v1": [{
                "name": null,
                "completed": null,
                "subtasks": null,
                "dependencies": [{"name": null, "completed": true}]
            }]}
        }))
        .unwrap();
        assert_eq!(doc.last_updated, "");
        let task = &doc.releases["v1"][0];
        assert_eq!(task.name, "");
        assert!(!task.completed);
        assert!(task.subtasks.is_empty());
        assert_eq!(task.dependencies[0].name, "");
        assert!(task.fields.is_empty());
    }

    #[test]
    fn text_skips_null_and_blank_values() {
        let doc = sample();
        let task = &doc.releases["v2"][0];
        assert_eq!(task.text("notes"), Some("Ship it"));
        assert_eq!(task.text("due_on"), None);
        assert_eq!(task.text("status"), None);
        assert_eq!(doc.task_count(), 1);
    }
}
