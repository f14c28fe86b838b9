//! Maintenance submission form.
//!
//! Adding a maintenance record is additive and independent of asset
//! editing: it has its own schema and never touches an edit session.

use serde::{Deserialize, Serialize};

use super::form::{FieldErrors, optional_amount, optional_text, positive_id, required_choice};
use crate::domain::maintenance::parse_datetime;
use crate::domain::{Labeled, MaintenanceStatus, MaintenanceType, NewMaintenanceRecord};

/// Raw input of the maintenance form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceForm {
    /// Date performed, `YYYY-MM-DD` or RFC 3339.
    pub date: String,
    /// Maintenance type select value.
    pub maintenance_type: String,
    /// What was done.
    pub description: String,
    /// Cost as typed.
    pub cost: String,
    /// Free-text performer.
    pub performed_by: String,
    /// Performer user id as typed.
    pub performer_id: String,
    /// Next maintenance date as typed.
    pub next_maintenance_date: String,
    /// Status select value.
    pub status: String,
    /// Notes.
    pub notes: String,
}

impl Default for MaintenanceForm {
    fn default() -> Self {
        Self {
            date: String::new(),
            maintenance_type: MaintenanceType::Preventive.as_str().to_string(),
            description: String::new(),
            cost: String::new(),
            performed_by: String::new(),
            performer_id: String::new(),
            next_maintenance_date: String::new(),
            status: MaintenanceStatus::Completed.as_str().to_string(),
            notes: String::new(),
        }
    }
}

impl MaintenanceForm {
    /// Validates the form into a create payload.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<NewMaintenanceRecord, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = if self.date.trim().is_empty() {
            errors.add("date", "is required");
            None
        } else {
            let parsed = parse_datetime(&self.date);
            if parsed.is_none() {
                errors.add("date", "must be a valid date");
            }
            parsed
        };

        let maintenance_type: Option<MaintenanceType> =
            required_choice(&self.maintenance_type, "maintenanceType", &mut errors);
        let status: Option<MaintenanceStatus> =
            required_choice(&self.status, "status", &mut errors);

        let description = self.description.trim();
        if description.is_empty() {
            errors.add("description", "is required");
        }

        let cost = optional_amount(&self.cost, "cost", &mut errors);
        let performer_id = if self.performer_id.trim().is_empty() {
            None
        } else {
            positive_id(&self.performer_id, "performerId", &mut errors)
        };

        let next_maintenance_date = if self.next_maintenance_date.trim().is_empty() {
            None
        } else {
            let parsed = parse_datetime(&self.next_maintenance_date);
            if parsed.is_none() {
                errors.add("nextMaintenanceDate", "must be a valid date");
            }
            parsed
        };

        let (Some(date), Some(maintenance_type), Some(status)) = (date, maintenance_type, status)
        else {
            return Err(errors);
        };

        errors.into_result(NewMaintenanceRecord {
            date,
            maintenance_type,
            description: description.to_string(),
            cost,
            performed_by: optional_text(&self.performed_by),
            performer_id,
            next_maintenance_date,
            status,
            notes: optional_text(&self.notes),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn filled() -> MaintenanceForm {
        MaintenanceForm {
            date: "2024-06-01".to_string(),
            description: "Repainted frame".to_string(),
            cost: "120.50".to_string(),
            performed_by: "Parks crew 3".to_string(),
            next_maintenance_date: "2024-12-01".to_string(),
            ..MaintenanceForm::default()
        }
    }

    #[test]
    fn defaults_to_completed_preventive() {
        let Ok(record) = filled().validate() else {
            panic!("filled form is valid");
        };
        assert_eq!(record.maintenance_type, MaintenanceType::Preventive);
        assert_eq!(record.status, MaintenanceStatus::Completed);
        assert_eq!(record.cost, Some(120.5));
        assert!(record.next_maintenance_date.is_some());
    }

    #[test]
    fn description_and_date_are_required() {
        let form = MaintenanceForm::default();
        let Err(errors) = form.validate() else {
            panic!("empty form must fail");
        };
        assert_eq!(errors.get("date"), Some("is required"));
        assert_eq!(errors.get("description"), Some("is required"));
    }

    #[test]
    fn malformed_next_date_is_reported() {
        let mut form = filled();
        form.next_maintenance_date = "soon".to_string();
        let Err(errors) = form.validate() else {
            panic!("bad next date must fail");
        };
        assert!(errors.get("nextMaintenanceDate").is_some());
    }

    #[test]
    fn blank_cost_is_absent() {
        let mut form = filled();
        form.cost = " ".to_string();
        let Ok(record) = form.validate() else {
            panic!("blank cost is valid");
        };
        assert_eq!(record.cost, None);
    }
}
