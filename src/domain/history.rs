//! Server-authored audit history of an asset.
//!
//! [`HistoryEntry`] has no public constructor, no setters and no public
//! `Deserialize`: the only way to obtain one is the crate's History-read
//! path, which decodes the response body through [`HistoryEntry::from_response`].
//! Client code therefore cannot synthesize or edit audit records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Kind of change recorded by a history entry.
///
/// Unknown values sent by the server are preserved in [`ChangeType::Other`]
/// rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeType {
    /// Asset registered.
    Creation,
    /// Asset acquired.
    Acquisition,
    /// Asset attributes updated.
    Updated,
    /// A single field modified.
    Modification,
    /// Maintenance recorded.
    Maintenance,
    /// Asset retired.
    Retirement,
    /// Asset deleted.
    Deletion,
    /// Any change type this client does not know.
    Other(String),
}

impl ChangeType {
    /// Maps a wire value to a change type.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "creation" => Self::Creation,
            "acquisition" => Self::Acquisition,
            "updated" => Self::Updated,
            "modification" => Self::Modification,
            "maintenance" => Self::Maintenance,
            "retirement" => Self::Retirement,
            "deletion" => Self::Deletion,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Creation => "creation",
            Self::Acquisition => "acquisition",
            Self::Updated => "updated",
            Self::Modification => "modification",
            Self::Maintenance => "maintenance",
            Self::Retirement => "retirement",
            Self::Deletion => "deletion",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ChangeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ChangeType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw))
    }
}

/// One immutable audit record of a change to an asset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    id: i64,
    change_type: ChangeType,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user_username: Option<String>,
    #[serde(default)]
    field_name: Option<String>,
    #[serde(default)]
    previous_value: Option<Value>,
    #[serde(default)]
    new_value: Option<Value>,
    #[serde(default)]
    description: String,
    #[serde(default)]
    notes: Option<String>,
}

/// Wire shape of one entry in a History-read response.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireEntry {
    id: i64,
    change_type: ChangeType,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    user_name: Option<String>,
    #[serde(default)]
    user_username: Option<String>,
    #[serde(default)]
    field_name: Option<String>,
    #[serde(default)]
    previous_value: Option<Value>,
    #[serde(default)]
    new_value: Option<Value>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<WireEntry> for HistoryEntry {
    fn from(wire: WireEntry) -> Self {
        Self {
            id: wire.id,
            change_type: wire.change_type,
            timestamp: wire.timestamp,
            user_name: wire.user_name,
            user_username: wire.user_username,
            field_name: wire.field_name,
            previous_value: wire.previous_value,
            new_value: wire.new_value,
            description: wire.description.unwrap_or_default(),
            notes: wire.notes,
        }
    }
}

impl HistoryEntry {
    /// Decodes the JSON body of a History-read response.
    pub(crate) fn from_response(body: &[u8]) -> Result<Vec<Self>, serde_json::Error> {
        let wire: Vec<WireEntry> = serde_json::from_slice(body)?;
        Ok(wire.into_iter().map(Self::from).collect())
    }

    /// Server-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> i64 {
        self.id
    }

    /// Kind of change.
    #[must_use]
    pub const fn change_type(&self) -> &ChangeType {
        &self.change_type
    }

    /// When the change happened.
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Display name of the acting user.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.user_name.as_deref()
    }

    /// Username of the acting user.
    #[must_use]
    pub fn user_username(&self) -> Option<&str> {
        self.user_username.as_deref()
    }

    /// Field touched by the change, for field-level entries.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.field_name.as_deref()
    }

    /// Value before the change.
    #[must_use]
    pub const fn previous_value(&self) -> Option<&Value> {
        self.previous_value.as_ref()
    }

    /// Value after the change.
    #[must_use]
    pub const fn new_value(&self) -> Option<&Value> {
        self.new_value.as_ref()
    }

    /// Human-readable summary.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Free-text notes.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// Returns `true` if the entry carries a field-level diff.
    #[must_use]
    pub const fn has_diff(&self) -> bool {
        self.field_name.is_some()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    /// Builds entries the only way the crate allows: from a response body.
    pub(crate) fn entries_from(json: Value) -> Vec<HistoryEntry> {
        let Ok(entries) = HistoryEntry::from_response(json.to_string().as_bytes()) else {
            panic!("fixture should deserialize");
        };
        entries
    }

    #[test]
    fn deserializes_field_level_entry() {
        let entries = entries_from(serde_json::json!([{
            "id": 3,
            "changeType": "modification",
            "timestamp": "2024-06-01T10:00:00Z",
            "userName": "Ana Ruiz",
            "userUsername": "aruiz",
            "fieldName": "condition",
            "previousValue": "good",
            "newValue": "poor",
            "description": "Condition changed"
        }]));
        let Some(entry) = entries.first() else {
            panic!("one entry expected");
        };
        assert_eq!(entry.id(), 3);
        assert_eq!(entry.change_type(), &ChangeType::Modification);
        assert_eq!(entry.field_name(), Some("condition"));
        assert_eq!(entry.previous_value(), Some(&Value::from("good")));
        assert!(entry.has_diff());
        assert!(entry.notes().is_none());
    }

    #[test]
    fn unknown_change_type_is_preserved() {
        let entries = entries_from(serde_json::json!([{
            "id": 1,
            "changeType": "transfer",
            "timestamp": "2024-06-01T10:00:00Z"
        }]));
        let Some(entry) = entries.first() else {
            panic!("one entry expected");
        };
        assert_eq!(entry.change_type(), &ChangeType::Other("transfer".to_string()));
        assert_eq!(entry.change_type().to_string(), "transfer");
        assert_eq!(entry.description(), "");
    }

    #[test]
    fn malformed_body_is_an_error() {
        assert!(HistoryEntry::from_response(b"{\"id\": 1}").is_err());
        assert!(HistoryEntry::from_response(b"[{\"id\": 1}]").is_err());
        assert_eq!(HistoryEntry::from_response(b"[]").map(|e| e.len()).ok(), Some(0));
    }

    #[test]
    fn serialized_entry_reads_back_through_the_response_path() {
        let entries = entries_from(serde_json::json!([{
            "id": 4,
            "changeType": "maintenance",
            "timestamp": "2024-06-01T10:00:00Z",
            "description": "Maintenance recorded",
            "notes": "Oiled hinges"
        }]));
        let Ok(body) = serde_json::to_vec(&entries) else {
            panic!("entries should serialize");
        };
        assert_eq!(HistoryEntry::from_response(&body).ok(), Some(entries));
    }

    #[test]
    fn null_values_read_as_absent() {
        let entries = entries_from(serde_json::json!([{
            "id": 2,
            "changeType": "updated",
            "timestamp": "2024-06-01T10:00:00Z",
            "previousValue": null
        }]));
        let Some(entry) = entries.first() else {
            panic!("one entry expected");
        };
        assert!(entry.previous_value().is_none());
        assert!(entry.new_value().is_none());
    }
}
