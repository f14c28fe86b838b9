//! Server-side audit records.
//!
//! The backend is the only author of history. A [`HistoryRecord`]
//! serializes to exactly the shape clients read back as
//! [`crate::domain::HistoryEntry`].

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{AssetField, ChangeType};

/// Who performed a mutation, as reported by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// Display name.
    pub name: String,
    /// Login name.
    pub username: String,
}

impl Default for Actor {
    fn default() -> Self {
        Self {
            name: "System".to_string(),
            username: "system".to_string(),
        }
    }
}

/// One appended history record.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryRecord {
    /// Record identifier, unique across the store.
    pub id: i64,
    /// Kind of change.
    #[schema(value_type = String, example = "modification")]
    pub change_type: ChangeType,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Display name of the acting user.
    pub user_name: String,
    /// Username of the acting user.
    pub user_username: String,
    /// Field touched, for field-level records.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Value before the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub previous_value: Option<Value>,
    /// Value after the change.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub new_value: Option<Value>,
    /// Summary text.
    pub description: String,
    /// Free-text notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl HistoryRecord {
    /// A record without a field-level diff.
    #[must_use]
    pub fn summary(id: i64, change_type: ChangeType, actor: &Actor, description: String) -> Self {
        Self {
            id,
            change_type,
            timestamp: Utc::now(),
            user_name: actor.name.clone(),
            user_username: actor.username.clone(),
            field_name: None,
            previous_value: None,
            new_value: None,
            description,
            notes: None,
        }
    }

    /// A `modification` record for one changed field.
    #[must_use]
    pub fn modification(
        id: i64,
        actor: &Actor,
        field: AssetField,
        previous: Value,
        new: Value,
    ) -> Self {
        Self {
            field_name: Some(field.wire_name().to_string()),
            previous_value: Some(previous),
            new_value: Some(new),
            ..Self::summary(
                id,
                ChangeType::Modification,
                actor,
                format!("{} changed", field.label()),
            )
        }
    }

    /// Attaches notes.
    #[must_use]
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }
}
