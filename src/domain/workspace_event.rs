//! Events published to the UI after reads are invalidated or a mutation
//! finishes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::AssetId;
use crate::error::ErrorKind;

/// One of the three independent per-asset reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryKind {
    /// The asset record.
    AssetDetail,
    /// The asset's maintenance list.
    Maintenance,
    /// The asset's history ledger.
    History,
}

impl QueryKind {
    /// Every per-asset query. A successful write invalidates all of them.
    pub const ALL: [Self; 3] = [Self::AssetDetail, Self::Maintenance, Self::History];
}

/// Mutation that produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// New asset registered.
    RegisterAsset,
    /// Asset edit submitted.
    EditAsset,
    /// Maintenance record submitted.
    AddMaintenance,
    /// Asset deleted.
    DeleteAsset,
}

/// Result of a mutation as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The server accepted the mutation.
    Success,
    /// The mutation failed; `kind` tells invalid input, server rejection
    /// and unreachable server apart.
    Failure {
        /// Error category.
        kind: ErrorKind,
        /// Human-readable message.
        message: String,
        /// Whether retrying may help.
        retryable: bool,
    },
}

/// A non-blocking user notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Unique notification id.
    pub id: uuid::Uuid,
    /// Mutation that finished.
    pub operation: Operation,
    /// Asset concerned, if already known.
    pub asset_id: Option<AssetId>,
    /// Success or failure details.
    #[serde(flatten)]
    pub outcome: Outcome,
    /// When the mutation finished.
    pub timestamp: DateTime<Utc>,
}

impl Notification {
    /// Builds a success notification.
    #[must_use]
    pub fn success(operation: Operation, asset_id: Option<AssetId>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            operation,
            asset_id,
            outcome: Outcome::Success,
            timestamp: Utc::now(),
        }
    }

    /// Builds a failure notification.
    #[must_use]
    pub fn failure(
        operation: Operation,
        asset_id: Option<AssetId>,
        kind: ErrorKind,
        message: String,
        retryable: bool,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            operation,
            asset_id,
            outcome: Outcome::Failure {
                kind,
                message,
                retryable,
            },
            timestamp: Utc::now(),
        }
    }

    /// Returns `true` for success notifications.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Success)
    }
}

/// Event broadcast on the [`super::NotificationBus`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum WorkspaceEvent {
    /// A mutation finished.
    Notification(Notification),
    /// A cached read was dropped and must be re-fetched.
    QueryInvalidated {
        /// Asset whose query was invalidated.
        asset_id: AssetId,
        /// Which query.
        query: QueryKind,
        /// Invalidation time.
        timestamp: DateTime<Utc>,
    },
}

impl WorkspaceEvent {
    /// Returns the asset this event concerns, if any.
    #[must_use]
    pub const fn asset_id(&self) -> Option<AssetId> {
        match self {
            Self::Notification(n) => n.asset_id,
            Self::QueryInvalidated { asset_id, .. } => Some(*asset_id),
        }
    }

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::Notification(_) => "notification",
            Self::QueryInvalidated { .. } => "query_invalidated",
        }
    }
}
