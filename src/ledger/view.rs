//! Read-only display rows over an asset's history.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::classify::{ChangePresentation, classify_change_type};
use super::format::format_diff_value;
use crate::domain::{HistoryEntry, field_label};

/// Field-level diff of one history row, ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffLine {
    /// Raw field name as sent by the server.
    pub field_name: String,
    /// Human label, or the raw name when the field is unknown.
    pub field_label: String,
    /// Rendered previous value.
    pub previous: String,
    /// Rendered new value.
    pub new: String,
}

/// One row of the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerRow {
    /// Server id of the underlying entry.
    pub id: i64,
    /// Icon, label and color for the change type.
    pub presentation: ChangePresentation,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Who made the change, as `name (@username)`.
    pub actor: Option<String>,
    /// Summary text.
    pub description: String,
    /// Diff, for field-level entries.
    pub diff: Option<DiffLine>,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// Ledger view borrowing the entries of one history read.
///
/// Rows come out in the order the server returned them. There is no write
/// path: the view cannot add, reorder or edit entries.
#[derive(Debug, Clone, Copy)]
pub struct LedgerView<'a> {
    entries: &'a [HistoryEntry],
}

impl<'a> LedgerView<'a> {
    /// Wraps a history read.
    #[must_use]
    pub const fn new(entries: &'a [HistoryEntry]) -> Self {
        Self { entries }
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the asset has no history.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds the display rows.
    pub fn rows(self) -> impl Iterator<Item = LedgerRow> + 'a {
        self.entries.iter().map(row_for)
    }
}

fn row_for(entry: &HistoryEntry) -> LedgerRow {
    let diff = entry.field_name().map(|name| DiffLine {
        field_name: name.to_string(),
        field_label: field_label(name).unwrap_or(name).to_string(),
        previous: format_diff_value(entry.previous_value()),
        new: format_diff_value(entry.new_value()),
    });

    LedgerRow {
        id: entry.id(),
        presentation: classify_change_type(entry.change_type()),
        timestamp: entry.timestamp(),
        actor: actor_display(entry.user_name(), entry.user_username()),
        description: entry.description().to_string(),
        diff,
        notes: entry.notes().map(str::to_string),
    }
}

fn actor_display(name: Option<&str>, username: Option<&str>) -> Option<String> {
    let name = name.map(str::trim).filter(|s| !s.is_empty());
    let username = username.map(str::trim).filter(|s| !s.is_empty());
    match (name, username) {
        (Some(name), Some(username)) => Some(format!("{name} (@{username})")),
        (Some(name), None) => Some(name.to_string()),
        (None, Some(username)) => Some(format!("@{username}")),
        (None, None) => None,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::domain::history::tests::entries_from;

    fn sample() -> Vec<HistoryEntry> {
        entries_from(json!([
            {
                "id": 1,
                "changeType": "creation",
                "timestamp": "2024-01-01T09:00:00Z",
                "userName": "Ana Ruiz",
                "userUsername": "aruiz",
                "description": "Asset registered"
            },
            {
                "id": 2,
                "changeType": "modification",
                "timestamp": "2024-02-01T09:00:00Z",
                "userName": "Luis Gil",
                "fieldName": "acquisitionCost",
                "previousValue": 450.0,
                "newValue": null,
                "description": "Cost cleared",
                "notes": "Invoice lost"
            },
            {
                "id": 3,
                "changeType": "relocation",
                "timestamp": "2024-01-15T09:00:00Z",
                "fieldName": "legacyZone",
                "previousValue": {"b": 1, "a": 2},
                "newValue": "Z9"
            }
        ]))
    }

    #[test]
    fn preserves_server_order() {
        let entries = sample();
        let view = LedgerView::new(&entries);
        let ids: Vec<i64> = view.rows().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn renders_actor_and_summary() {
        let entries = sample();
        let rows: Vec<LedgerRow> = LedgerView::new(&entries).rows().collect();
        let Some(first) = rows.first() else {
            panic!("rows expected");
        };
        assert_eq!(first.actor.as_deref(), Some("Ana Ruiz (@aruiz)"));
        assert_eq!(first.presentation.label, "Created");
        assert!(first.diff.is_none());
    }

    #[test]
    fn renders_field_diff_with_labels() {
        let entries = sample();
        let rows: Vec<LedgerRow> = LedgerView::new(&entries).rows().collect();
        let Some(Some(diff)) = rows.get(1).map(|r| r.diff.clone()) else {
            panic!("diff expected on modification row");
        };
        assert_eq!(diff.field_label, "Acquisition cost");
        assert_eq!(diff.previous, "450.0");
        assert_eq!(diff.new, "N/A");
        assert_eq!(rows.get(1).and_then(|r| r.notes.as_deref()), Some("Invoice lost"));
    }

    #[test]
    fn unknown_field_and_type_fall_back() {
        let entries = sample();
        let rows: Vec<LedgerRow> = LedgerView::new(&entries).rows().collect();
        let Some(row) = rows.get(2) else {
            panic!("third row expected");
        };
        assert_eq!(row.presentation.label, "Other");
        assert!(row.actor.is_none());
        let Some(diff) = row.diff.as_ref() else {
            panic!("diff expected");
        };
        assert_eq!(diff.field_label, "legacyZone");
        assert_eq!(diff.previous, r#"{"a":2,"b":1}"#);
    }

    #[test]
    fn empty_history() {
        let view = LedgerView::new(&[]);
        assert!(view.is_empty());
        assert_eq!(view.rows().count(), 0);
    }
}
