//! Field-level conflict detection between an edit and concurrent writes.
//!
//! Three versions of the attributes meet here: the baseline snapshotted
//! when the edit opened, the user's validated edit, and the latest copy
//! confirmed by the server. A field is in conflict when the user changed
//! it and the server also moved it away from the baseline, to a value
//! other than the user's.

use serde::Serialize;
use serde_json::Value;

use crate::domain::{Asset, AssetAttributes, AssetField};

/// A field changed both locally and on the server since the edit opened.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConflict {
    /// The contested field.
    pub field: AssetField,
    /// Value when the edit was opened.
    pub original: Value,
    /// Value now confirmed on the server.
    pub server: Value,
    /// Value the user wants to submit.
    pub local: Value,
}

/// Write to send once no conflicts were found.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedEdit {
    /// Fields the user changed relative to the baseline.
    pub changed: Vec<AssetField>,
    /// Latest server attributes with the user's changed fields applied.
    pub attributes: AssetAttributes,
    /// Version of the server copy the write is based on.
    pub base_version: u64,
}

/// Fields the server changed since the baseline was taken.
#[must_use]
pub fn concurrent_changes(baseline: &AssetAttributes, latest: &AssetAttributes) -> Vec<AssetField> {
    baseline.changed_fields(latest)
}

/// Checks the user's edit against the latest server copy.
///
/// Concurrent changes to fields the user did not touch are kept; only the
/// user's changed fields are applied on top of `latest`.
///
/// # Errors
///
/// Returns every conflicting field when at least one field the user
/// changed was also changed, differently, on the server.
pub fn merge_edit(
    baseline: &AssetAttributes,
    local: &AssetAttributes,
    latest: &Asset,
) -> Result<MergedEdit, Vec<FieldConflict>> {
    let changed = baseline.changed_fields(local);

    let conflicts: Vec<FieldConflict> = changed
        .iter()
        .filter_map(|&field| {
            let original = baseline.value_of(field);
            let server = latest.attributes.value_of(field);
            let mine = local.value_of(field);
            (server != original && server != mine).then_some(FieldConflict {
                field,
                original,
                server,
                local: mine,
            })
        })
        .collect();

    if !conflicts.is_empty() {
        return Err(conflicts);
    }

    let mut attributes = latest.attributes.clone();
    for &field in &changed {
        attributes.copy_field(local, field);
    }

    Ok(MergedEdit {
        changed,
        attributes,
        base_version: latest.version,
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::asset::tests::sample_asset;
    use crate::domain::{AssetCondition, AssetStatus};

    #[test]
    fn no_concurrent_change_merges_cleanly() {
        let latest = sample_asset(7);
        let baseline = latest.attributes.clone();
        let mut local = baseline.clone();
        local.condition = AssetCondition::Poor;

        let Ok(merged) = merge_edit(&baseline, &local, &latest) else {
            panic!("no conflict expected");
        };
        assert_eq!(merged.changed, vec![AssetField::Condition]);
        assert_eq!(merged.attributes, local);
        assert_eq!(merged.base_version, 1);
    }

    #[test]
    fn same_field_changed_on_server_is_a_conflict() {
        let baseline = sample_asset(7).attributes;
        let mut local = baseline.clone();
        local.status = AssetStatus::Maintenance;

        let mut latest = sample_asset(7);
        latest.attributes.status = AssetStatus::Retired;
        latest.version = 2;

        let Err(conflicts) = merge_edit(&baseline, &local, &latest) else {
            panic!("conflict expected");
        };
        let Some(conflict) = conflicts.first() else {
            panic!("one conflict expected");
        };
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflict.field, AssetField::Status);
        assert_eq!(conflict.original, Value::from("active"));
        assert_eq!(conflict.server, Value::from("retired"));
        assert_eq!(conflict.local, Value::from("maintenance"));
    }

    #[test]
    fn untouched_concurrent_changes_are_preserved() {
        let baseline = sample_asset(7).attributes;
        let mut local = baseline.clone();
        local.condition = AssetCondition::Fair;

        let mut latest = sample_asset(7);
        latest.attributes.notes = Some("repainted".to_string());
        latest.version = 5;

        let Ok(merged) = merge_edit(&baseline, &local, &latest) else {
            panic!("disjoint edits must merge");
        };
        assert_eq!(merged.attributes.condition, AssetCondition::Fair);
        assert_eq!(merged.attributes.notes.as_deref(), Some("repainted"));
        assert_eq!(merged.base_version, 5);
        assert_eq!(
            concurrent_changes(&baseline, &latest.attributes),
            vec![AssetField::Notes]
        );
    }

    #[test]
    fn identical_concurrent_value_is_not_a_conflict() {
        let baseline = sample_asset(7).attributes;
        let mut local = baseline.clone();
        local.status = AssetStatus::Damaged;

        let mut latest = sample_asset(7);
        latest.attributes.status = AssetStatus::Damaged;

        assert!(merge_edit(&baseline, &local, &latest).is_ok());
    }
}
