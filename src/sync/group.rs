use crate::model::document::UNSCHEDULED;
use crate::model::remote_task::RemoteTask;

/// Release a task belongs to: the display value of its custom field named
/// `grouping_field` (case-insensitive), or [`UNSCHEDULED`].
///
/// Asana does not stop two custom fields from differing only in case. The
/// first one in the order the API returned them is used.
pub fn resolve_group_key(task: &RemoteTask, grouping_field: &str) -> String {
    task.custom_field_index()
        .get(grouping_field)
        .flatten()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(UNSCHEDULED)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::remote_task::CustomField;

    fn with_fields(fields: &[(&str, Option<&str>)]) -> RemoteTask {
        RemoteTask {
            gid: "1".into(),
            name: Some("A".into()),
            custom_fields: fields
                .iter()
                .map(|(name, value)| CustomField {
                    name: Some(name.to_string()),
                    display_value: value.map(String::from),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn uses_display_value_of_matching_field() {
        let task = with_fields(&[("Priority", Some("High")), ("Release", Some("v1"))]);
        assert_eq!(resolve_group_key(&task, "Release"), "v1");
        assert_eq!(resolve_group_key(&task, "release"), "v1");
    }

    #[test]
    fn missing_field_is_unscheduled() {
        let task = with_fields(&[("Priority", Some("High"))]);
        assert_eq!(resolve_group_key(&task, "Release"), UNSCHEDULED);
        assert_eq!(resolve_group_key(&RemoteTask::default(), "Release"), UNSCHEDULED);
    }

    #[test]
    fn empty_or_null_value_is_unscheduled() {
        assert_eq!(
            resolve_group_key(&with_fields(&[("Release", None)]), "Release"),
            UNSCHEDULED
        );
        assert_eq!(
            resolve_group_key(&with_fields(&[("Release", Some("  "))]), "Release"),
            UNSCHEDULED
        );
    }

    #[test]
    fn duplicate_names_take_first_in_source_order() {
        let task = with_fields(&[("release", Some("v1")), ("RELEASE", Some("v2"))]);
        assert_eq!(resolve_group_key(&task, "Release"), "v1");
    }

    #[test]
    fn partial_name_does_not_match() {
        let task = with_fields(&[("Target Release", Some("v3"))]);
        assert_eq!(resolve_group_key(&task, "Release"), UNSCHEDULED);
    }
}
