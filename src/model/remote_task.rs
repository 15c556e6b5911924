use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// A task record as returned by the Asana REST API. Every field except
/// `gid` may be missing or `null` depending on the requested `opt_fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteTask {
    #[serde(default)]
    pub gid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub custom_fields: Vec<CustomField>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub due_on: Option<String>,
    #[serde(default)]
    pub due_at: Option<String>,
    #[serde(default)]
    pub start_on: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub permalink_url: Option<String>,
    #[serde(default)]
    pub assignee: Option<Named>,
    /// Filled in by a follow-up request, not part of the task listing.
    #[serde(default, deserialize_with = "null_as_default")]
    pub subtasks: Vec<RemoteRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: Vec<RemoteRef>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Named {
    #[serde(default)]
    pub name: Option<String>,
}

/// Compact subtask/dependency reference.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteRef {
    #[serde(default)]
    pub gid: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Task properties the field mapper can copy directly, as opposed to
/// custom fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Notes,
    DueOn,
    DueAt,
    StartOn,
    CreatedAt,
    ModifiedAt,
    CompletedAt,
    Permalink,
    Assignee,
}

impl Builtin {
    /// Matches an already lower-cased display field name.
    pub fn from_field(name: &str) -> Option<Self> {
        let builtin = match name {
            "notes" => Builtin::Notes,
            "due_on" => Builtin::DueOn,
            "due_at" => Builtin::DueAt,
            "start_on" => Builtin::StartOn,
            "created_at" => Builtin::CreatedAt,
            "modified_at" => Builtin::ModifiedAt,
            "completed_at" => Builtin::CompletedAt,
            "permalink_url" | "url" => Builtin::Permalink,
            "assignee" => Builtin::Assignee,
            _ => return None,
        };
        Some(builtin)
    }

    /// `opt_fields` entry that makes the API return this property.
    pub fn api_field(&self) -> &'static str {
        match self {
            Builtin::Notes => "notes",
            Builtin::DueOn => "due_on",
            Builtin::DueAt => "due_at",
            Builtin::StartOn => "start_on",
            Builtin::CreatedAt => "created_at",
            Builtin::ModifiedAt => "modified_at",
            Builtin::CompletedAt => "completed_at",
            Builtin::Permalink => "permalink_url",
            Builtin::Assignee => "assignee.name",
        }
    }

    pub fn value<'a>(&self, task: &'a RemoteTask) -> Option<&'a str> {
        let value = match self {
            Builtin::Notes => &task.notes,
            Builtin::DueOn => &task.due_on,
            Builtin::DueAt => &task.due_at,
            Builtin::StartOn => &task.start_on,
            Builtin::CreatedAt => &task.created_at,
            Builtin::ModifiedAt => &task.modified_at,
            Builtin::CompletedAt => &task.completed_at,
            Builtin::Permalink => &task.permalink_url,
            Builtin::Assignee => return task.assignee.as_ref().and_then(|a| a.name.as_deref()),
        };
        value.as_deref()
    }
}

/// Custom fields keyed by lower-cased name. When two fields differ only
/// in case, the first one in the order the API returned them wins.
pub struct CustomFieldIndex<'a> {
    by_name: HashMap<String, Option<&'a str>>,
}

impl<'a> CustomFieldIndex<'a> {
    pub fn new(fields: &'a [CustomField]) -> Self {
        let mut by_name = HashMap::with_capacity(fields.len());
        for field in fields {
            if let Some(name) = &field.name {
                by_name
                    .entry(name.to_lowercase())
                    .or_insert(field.display_value.as_deref());
            }
        }
        Self { by_name }
    }

    /// `None` when no field has this name; `Some(None)` when the field
    /// exists but has no display value.
    pub fn get(&self, name: &str) -> Option<Option<&'a str>> {
        self.by_name.get(&name.to_lowercase()).copied()
    }
}

impl RemoteTask {
    pub fn has_tag(&self, marker: &str) -> bool {
        let marker = marker.to_lowercase();
        self.tags
            .iter()
            .filter_map(|t| t.name.as_deref())
            .any(|name| name.to_lowercase() == marker)
    }

    pub fn custom_field_index(&self) -> CustomFieldIndex<'_> {
        CustomFieldIndex::new(&self.custom_fields)
    }
}
