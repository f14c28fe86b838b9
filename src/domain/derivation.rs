//! Maintenance derivation engine.
//!
//! An asset's maintenance dates are never stored; they are recomputed from
//! its maintenance list on every refresh by [`derive_maintenance_status`],
//! a pure function of the list and the reference instant.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::maintenance::{MaintenanceRecord, MaintenanceStatus as RecordStatus};

/// Derived maintenance state of one asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMaintenance {
    /// Latest `date` among completed records.
    pub last_maintenance_date: Option<DateTime<Utc>>,
    /// Record that produced `last_maintenance_date`.
    pub last_maintenance_record_id: Option<i64>,
    /// Soonest `nextMaintenanceDate` across all records.
    pub next_maintenance_date: Option<DateTime<Utc>>,
    /// `true` iff `next_maintenance_date` is strictly before the reference instant.
    pub is_maintenance_due: bool,
}

/// Display state of the maintenance schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleState {
    /// No record carries a next maintenance date.
    Unscheduled,
    /// The next maintenance is now or in the future.
    Upcoming,
    /// The next maintenance date has passed.
    Overdue,
}

impl DerivedMaintenance {
    /// Classifies the schedule. Absence of a schedule is not "overdue".
    #[must_use]
    pub fn schedule(&self) -> ScheduleState {
        match (self.next_maintenance_date, self.is_maintenance_due) {
            (None, _) => ScheduleState::Unscheduled,
            (Some(_), true) => ScheduleState::Overdue,
            (Some(_), false) => ScheduleState::Upcoming,
        }
    }
}

/// Computes the derived maintenance state from a list of records.
///
/// - last: maximum `date` over `completed` records; ties go to the
///   highest record id.
/// - next: minimum `next_maintenance_date` over all records, whatever
///   their status.
/// - due: `next < now`, strictly.
///
/// Records with an absent date are skipped by the reduction that needs
/// that date. The input is only borrowed and the result depends on
/// nothing but the arguments.
#[must_use]
pub fn derive_maintenance_status(
    records: &[MaintenanceRecord],
    now: DateTime<Utc>,
) -> DerivedMaintenance {
    let last = records
        .iter()
        .filter(|r| r.status == RecordStatus::Completed)
        .filter_map(|r| r.date.map(|date| (date, r.id)))
        .max();

    let next = records
        .iter()
        .filter_map(|r| r.next_maintenance_date)
        .min();

    DerivedMaintenance {
        last_maintenance_date: last.map(|(date, _)| date),
        last_maintenance_record_id: last.map(|(_, id)| id),
        next_maintenance_date: next,
        is_maintenance_due: next.is_some_and(|n| n < now),
    }
}
