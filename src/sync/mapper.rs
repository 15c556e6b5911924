use serde_json::Value;

use crate::model::document::{OutputTask, TaskRef, UNNAMED_TASK};
use crate::model::remote_task::{Builtin, RemoteRef, RemoteTask};

/// Keys every output task carries regardless of configuration.
const STRUCTURAL_KEYS: &[&str] = &["name", "completed", "subtasks", "dependencies"];

/// Projects a remote task onto the flat output record.
///
/// Each display field lands under its lower-cased name. Built-in properties
/// are copied (`notes` defaults to `""`, the rest to `null`); anything else
/// is looked up among the custom fields and becomes `null` when absent, so
/// a misspelt display field never fails a sync.
pub fn map_fields(task: &RemoteTask, display_fields: &[String]) -> OutputTask {
    let custom = task.custom_field_index();
    let mut output = OutputTask {
        name: task
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| UNNAMED_TASK.to_string()),
        completed: task.completed.unwrap_or(false),
        subtasks: flatten_refs(&task.subtasks),
        dependencies: flatten_refs(&task.dependencies),
        ..Default::default()
    };

    for field in display_fields {
        let key = field.to_lowercase();
        if STRUCTURAL_KEYS.contains(&key.as_str()) || output.fields.contains_key(&key) {
            continue;
        }

        let value = match Builtin::from_field(&key) {
            Some(builtin) => match builtin.value(task) {
                Some(v) => Value::String(v.to_string()),
                None if builtin == Builtin::Notes => Value::String(String::new()),
                None => Value::Null,
            },
            None => custom
                .get(field)
                .flatten()
                .map(|v| Value::String(v.to_string()))
                .unwrap_or(Value::Null),
        };
        output.fields.insert(key, value);
    }

    output
}

fn flatten_refs(refs: &[RemoteRef]) -> Vec<TaskRef> {
    refs.iter()
        .map(|r| TaskRef {
            name: r.name.clone().unwrap_or_default(),
            completed: r.completed.unwrap_or(false),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::remote_task::{CustomField, Named};

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn task() -> RemoteTask {
        RemoteTask {
            gid: "1".into(),
            name: Some("A".into()),
            completed: Some(true),
            notes: None,
            due_on: Some("2026-11-01".into()),
            permalink_url: Some("https://app.asana.com/0/42/1".into()),
            assignee: Some(Named {
                name: Some("Sam".into()),
            }),
            custom_fields: vec![
                CustomField {
                    name: Some("Status".into()),
                    display_value: Some("In Progress".into()),
                },
                CustomField {
                    name: Some("Release".into()),
                    display_value: Some("v1".into()),
                },
            ],
            subtasks: vec![RemoteRef {
                gid: Some("11".into()),
                name: Some("Child".into()),
                completed: None,
            }],
            ..Default::default()
        }
    }

    #[test]
    fn structural_fields_are_always_present() {
        let out = map_fields(&task(), &[]);
        assert_eq!(out.name, "A");
        assert!(out.completed);
        assert!(out.fields.is_empty());
        assert_eq!(
            out.subtasks,
            vec![TaskRef {
                name: "Child".into(),
                completed: false
            }]
        );
        assert!(out.dependencies.is_empty());
    }

    #[test]
    fn builtins_are_copied_with_defaults() {
        let out = map_fields(&task(), &fields(&["Notes", "due_on", "URL", "assignee", "start_on"]));
        assert_eq!(out.fields["notes"], Value::String(String::new()));
        assert_eq!(out.fields["due_on"], "2026-11-01");
        assert_eq!(out.fields["url"], "https://app.asana.com/0/42/1");
        assert_eq!(out.fields["assignee"], "Sam");
        assert_eq!(out.fields["start_on"], Value::Null);
    }

    #[test]
    fn custom_fields_match_case_insensitively() {
        let out = map_fields(&task(), &fields(&["STATUS", "release"]));
        assert_eq!(out.fields["status"], "In Progress");
        assert_eq!(out.fields["release"], "v1");
    }

    #[test]
    fn unknown_fields_become_null() {
        let out = map_fields(&task(), &fields(&["Sprint", "Effort"]));
        assert_eq!(out.fields["sprint"], Value::Null);
        assert_eq!(out.fields["effort"], Value::Null);
    }

    #[test]
    fn output_follows_configuration_order() {
        let out = map_fields(&task(), &fields(&["status", "notes", "sprint", "due_on"]));
        let keys: Vec<&String> = out.fields.keys().collect();
        assert_eq!(keys, ["status", "notes", "sprint", "due_on"]);
    }

    #[test]
    fn structural_names_are_not_overridden() {
        let out = map_fields(&task(), &fields(&["Name", "completed", "Status", "status"]));
        assert_eq!(out.name, "A");
        assert!(out.completed);
        assert_eq!(out.fields.len(), 1);
    }

    #[test]
    fn missing_name_and_completed_get_defaults() {
        let bare = RemoteTask {
            gid: "9".into(),
            ..Default::default()
        };
        let out = map_fields(&bare, &[]);
        assert_eq!(out.name, UNNAMED_TASK);
        assert!(!out.completed);
    }
}
