//! Maintenance records: one event describing work performed on an asset.
//!
//! Records are append-only from the client's perspective. Dates are parsed
//! leniently so that a malformed value marks the date as absent instead of
//! rejecting the whole maintenance list.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use super::AssetId;
use super::labels::Labeled;

/// Kind of maintenance performed.
///
/// Values this client does not know deserialize as [`MaintenanceType::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceType {
    /// Scheduled upkeep.
    Preventive,
    /// Repair after a failure.
    Corrective,
    /// Condition-based intervention.
    Predictive,
    /// Anything else.
    Other,
}

impl Labeled for MaintenanceType {
    const ALL: &'static [Self] = &[
        Self::Preventive,
        Self::Corrective,
        Self::Predictive,
        Self::Other,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Preventive => "preventive",
            Self::Corrective => "corrective",
            Self::Predictive => "predictive",
            Self::Other => "other",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Preventive => "Preventive",
            Self::Corrective => "Corrective",
            Self::Predictive => "Predictive",
            Self::Other => "Other",
        }
    }
}

impl<'de> Deserialize<'de> for MaintenanceType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw).unwrap_or(Self::Other))
    }
}

/// Progress of a maintenance record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    /// Planned, not started.
    Scheduled,
    /// Work under way.
    InProgress,
    /// Work finished. Only completed records count as "last maintenance".
    Completed,
    /// A status this client does not know. Never offered in forms and
    /// never counted as completed.
    Unknown,
}

impl<'de> Deserialize<'de> for MaintenanceStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_wire(&raw).unwrap_or(Self::Unknown))
    }
}

impl Labeled for MaintenanceStatus {
    const ALL: &'static [Self] = &[Self::Scheduled, Self::InProgress, Self::Completed];

    fn as_str(self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Unknown => "unknown",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Scheduled => "Scheduled",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Unknown => "Unknown",
        }
    }
}

/// A maintenance action recorded against an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRecord {
    /// Server-assigned record identifier.
    pub id: i64,
    /// Owning asset.
    pub asset_id: AssetId,
    /// When the work was performed; absent if missing or malformed.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub date: Option<DateTime<Utc>>,
    /// Kind of maintenance.
    pub maintenance_type: MaintenanceType,
    /// What was done.
    pub description: String,
    /// Cost of the work; non-negative when present.
    #[serde(default)]
    pub cost: Option<f64>,
    /// Free-text performer.
    #[serde(default)]
    pub performed_by: Option<String>,
    /// Weak reference to the performing user.
    #[serde(default)]
    pub performer_id: Option<i64>,
    /// Display name of `performer_id`, resolved by the backend.
    #[serde(default)]
    pub performer_name: Option<String>,
    /// Forward-looking schedule hint set by the performer.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    /// Progress of the work.
    pub status: MaintenanceStatus,
    /// Additional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl MaintenanceRecord {
    /// Who performed the work, for display.
    ///
    /// A referenced user takes precedence over the free-text performer.
    #[must_use]
    pub fn performer_display(&self) -> Option<String> {
        match (self.performer_id, &self.performer_name, &self.performed_by) {
            (Some(_), Some(name), _) => Some(name.clone()),
            (Some(id), None, _) => Some(format!("User #{id}")),
            (None, _, Some(text)) if !text.trim().is_empty() => Some(text.clone()),
            _ => None,
        }
    }
}

/// Validated payload of a maintenance-create request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewMaintenanceRecord {
    /// When the work was performed.
    pub date: DateTime<Utc>,
    /// Kind of maintenance.
    pub maintenance_type: MaintenanceType,
    /// What was done (non-empty).
    pub description: String,
    /// Cost of the work.
    #[serde(default)]
    pub cost: Option<f64>,
    /// Free-text performer.
    #[serde(default)]
    pub performed_by: Option<String>,
    /// Weak reference to the performing user.
    #[serde(default)]
    pub performer_id: Option<i64>,
    /// Next scheduled maintenance.
    #[serde(default)]
    pub next_maintenance_date: Option<DateTime<Utc>>,
    /// Progress of the work.
    pub status: MaintenanceStatus,
    /// Additional notes.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Parses a timestamp leniently.
///
/// Accepts RFC 3339, `YYYY-MM-DDTHH:MM:SS` (taken as UTC) and plain
/// `YYYY-MM-DD` (midnight UTC). Returns `None` for anything else.
#[must_use]
pub fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|v| v.as_str()).and_then(parse_datetime))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn parse_datetime_accepts_supported_shapes() {
        assert!(parse_datetime("2024-06-01T10:00:00Z").is_some());
        assert!(parse_datetime("2024-06-01T10:00:00+02:00").is_some());
        assert!(parse_datetime("2024-06-01T10:00:00").is_some());
        let Some(midnight) = parse_datetime("2024-06-01") else {
            panic!("calendar date should parse");
        };
        assert_eq!(midnight.to_rfc3339(), "2024-06-01T00:00:00+00:00");
    }

    #[test]
    fn parse_datetime_rejects_garbage() {
        assert!(parse_datetime("").is_none());
        assert!(parse_datetime("next tuesday").is_none());
        assert!(parse_datetime("2024-13-45").is_none());
    }

    #[test]
    fn malformed_dates_deserialize_as_absent() {
        let json = serde_json::json!({
            "id": 1,
            "assetId": 7,
            "date": "not-a-date",
            "maintenanceType": "preventive",
            "description": "Paint",
            "nextMaintenanceDate": 12345,
            "status": "completed"
        });
        let Ok(record) = serde_json::from_value::<MaintenanceRecord>(json) else {
            panic!("record should deserialize despite bad dates");
        };
        assert!(record.date.is_none());
        assert!(record.next_maintenance_date.is_none());
        assert_eq!(record.status, MaintenanceStatus::Completed);
    }

    #[test]
    fn unrecognized_type_and_status_do_not_fail_the_list() {
        let json = serde_json::json!([
            {
                "id": 1,
                "assetId": 7,
                "date": "2024-05-01",
                "maintenanceType": "inspection",
                "description": "Yearly check",
                "status": "completed"
            },
            {
                "id": 2,
                "assetId": 7,
                "date": "2024-06-01",
                "maintenanceType": "preventive",
                "description": "Repaint",
                "status": "cancelled"
            }
        ]);
        let Ok(records) = serde_json::from_value::<Vec<MaintenanceRecord>>(json) else {
            panic!("list should deserialize despite unknown values");
        };
        let types: Vec<MaintenanceType> = records.iter().map(|r| r.maintenance_type).collect();
        assert_eq!(types, vec![MaintenanceType::Other, MaintenanceType::Preventive]);
        let statuses: Vec<MaintenanceStatus> = records.iter().map(|r| r.status).collect();
        assert_eq!(statuses, vec![MaintenanceStatus::Completed, MaintenanceStatus::Unknown]);

        let derived = crate::domain::derive_maintenance_status(&records, Utc::now());
        assert_eq!(derived.last_maintenance_record_id, Some(1));
    }

    #[test]
    fn unknown_status_is_not_offered() {
        assert!(!MaintenanceStatus::ALL.contains(&MaintenanceStatus::Unknown));
        assert_eq!(MaintenanceStatus::from_wire("unknown"), None);
    }

    #[test]
    fn performer_reference_takes_precedence() {
        let json = serde_json::json!({
            "id": 1,
            "assetId": 7,
            "maintenanceType": "corrective",
            "description": "Fix",
            "performedBy": "ACME crew",
            "performerId": 12,
            "performerName": "Laura Gómez",
            "status": "completed"
        });
        let Ok(mut record) = serde_json::from_value::<MaintenanceRecord>(json) else {
            panic!("record should deserialize");
        };
        assert_eq!(record.performer_display().as_deref(), Some("Laura Gómez"));

        record.performer_name = None;
        assert_eq!(record.performer_display().as_deref(), Some("User #12"));

        record.performer_id = None;
        assert_eq!(record.performer_display().as_deref(), Some("ACME crew"));
    }
}
