//! Domain layer: asset model, maintenance derivation, server-authored
//! history and the workspace event system.
//!
//! Everything here is plain data plus pure functions, except the
//! [`NotificationBus`], which fans events out to UI subscribers.

pub mod asset;
pub mod asset_id;
pub mod derivation;
pub mod event_bus;
pub mod history;
pub mod labels;
pub mod maintenance;
pub mod workspace_event;

pub use asset::{
    Asset, AssetAttributes, AssetCondition, AssetField, AssetStatus, AssetUpdate, Coordinate,
};
pub use asset_id::AssetId;
pub use derivation::{DerivedMaintenance, ScheduleState, derive_maintenance_status};
pub use event_bus::{AssetEvents, NotificationBus};
pub use history::{ChangeType, HistoryEntry};
pub use labels::{Labeled, SelectOption, field_label};
pub use maintenance::{MaintenanceRecord, MaintenanceStatus, MaintenanceType, NewMaintenanceRecord};
pub use workspace_event::{Notification, Operation, Outcome, QueryKind, WorkspaceEvent};
