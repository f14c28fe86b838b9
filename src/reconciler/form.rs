//! Asset edit form and its validation schema.
//!
//! [`AssetForm`] holds raw user input exactly as typed; nothing in this
//! module modifies it. [`AssetForm::validate`] turns it into typed
//! [`AssetAttributes`] or per-field [`FieldErrors`].

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AssetAttributes, AssetCondition, AssetField, AssetStatus, Coordinate, Labeled,
};

/// Per-field validation messages, keyed by wire field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Records an error for `field`. The first error per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    /// Returns the message for `field`, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Returns `true` when there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates `(field, message)` pairs in field-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// `Ok(value)` if no errors were recorded, `Err(self)` otherwise.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

/// Raw input of the asset edit form, one string per input element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetForm {
    /// Asset name.
    pub name: String,
    /// Description.
    pub description: String,
    /// Serial number.
    pub serial_number: String,
    /// Manufacturer.
    pub manufacturer: String,
    /// Model.
    pub model: String,
    /// Category id as typed.
    pub category_id: String,
    /// Subcategory id as typed.
    pub subcategory_id: String,
    /// Park id as typed.
    pub park_id: String,
    /// Amenity id as typed.
    pub amenity_id: String,
    /// Location description.
    pub location_description: String,
    /// Latitude as typed.
    pub latitude: String,
    /// Longitude as typed.
    pub longitude: String,
    /// Status select value.
    pub status: String,
    /// Condition select value.
    pub condition: String,
    /// Acquisition date, `YYYY-MM-DD`.
    pub acquisition_date: String,
    /// Acquisition cost as typed.
    pub acquisition_cost: String,
    /// Responsible person id as typed.
    pub responsible_person_id: String,
    /// Notes.
    pub notes: String,
}

impl AssetForm {
    /// Fills the form from server-confirmed attributes.
    #[must_use]
    pub fn from_attributes(attrs: &AssetAttributes) -> Self {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        let id = |v: Option<i64>| v.map(|n| n.to_string()).unwrap_or_default();
        Self {
            name: attrs.name.clone(),
            description: text(&attrs.description),
            serial_number: text(&attrs.serial_number),
            manufacturer: text(&attrs.manufacturer),
            model: text(&attrs.model),
            category_id: attrs.category_id.to_string(),
            subcategory_id: id(attrs.subcategory_id),
            park_id: attrs.park_id.to_string(),
            amenity_id: id(attrs.amenity_id),
            location_description: text(&attrs.location_description),
            latitude: attrs
                .coordinate
                .map(|c| c.latitude.to_string())
                .unwrap_or_default(),
            longitude: attrs
                .coordinate
                .map(|c| c.longitude.to_string())
                .unwrap_or_default(),
            status: attrs.status.as_str().to_string(),
            condition: attrs.condition.as_str().to_string(),
            acquisition_date: attrs
                .acquisition_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            acquisition_cost: attrs
                .acquisition_cost
                .map(|c| c.to_string())
                .unwrap_or_default(),
            responsible_person_id: id(attrs.responsible_person_id),
            notes: text(&attrs.notes),
        }
    }

    /// Validates the form against the asset schema.
    ///
    /// Blank or non-numeric acquisition cost normalizes to `None`.
    ///
    /// # Errors
    ///
    /// Returns every failing field at once.
    pub fn validate(&self) -> Result<AssetAttributes, FieldErrors> {
        let mut errors = FieldErrors::default();

        let name = self.name.trim();
        if name.is_empty() {
            errors.add(AssetField::Name.wire_name(), "is required");
        }

        let category_id = required_id(&self.category_id, AssetField::CategoryId, &mut errors);
        let park_id = required_id(&self.park_id, AssetField::ParkId, &mut errors);
        let subcategory_id =
            optional_id(&self.subcategory_id, AssetField::SubcategoryId, &mut errors);
        let amenity_id = optional_id(&self.amenity_id, AssetField::AmenityId, &mut errors);
        let responsible_person_id = optional_id(
            &self.responsible_person_id,
            AssetField::ResponsiblePersonId,
            &mut errors,
        );

        let status: Option<AssetStatus> =
            required_choice(&self.status, AssetField::Status.wire_name(), &mut errors);
        let condition: Option<AssetCondition> =
            required_choice(&self.condition, AssetField::Condition.wire_name(), &mut errors);

        let coordinate = self.coordinate(&mut errors);
        let acquisition_date = self.acquisition_date(&mut errors);
        let acquisition_cost = optional_amount(
            &self.acquisition_cost,
            AssetField::AcquisitionCost.wire_name(),
            &mut errors,
        );

        let (Some(category_id), Some(park_id), Some(status), Some(condition)) =
            (category_id, park_id, status, condition)
        else {
            return Err(errors);
        };

        errors.into_result(AssetAttributes {
            name: name.to_string(),
            description: optional_text(&self.description),
            serial_number: optional_text(&self.serial_number),
            manufacturer: optional_text(&self.manufacturer),
            model: optional_text(&self.model),
            category_id,
            subcategory_id,
            park_id,
            amenity_id,
            location_description: optional_text(&self.location_description),
            coordinate,
            status,
            condition,
            acquisition_date,
            acquisition_cost,
            responsible_person_id,
            notes: optional_text(&self.notes),
        })
    }

    fn coordinate(&self, errors: &mut FieldErrors) -> Option<Coordinate> {
        const FIELD: &str = "coordinate";
        let lat = self.latitude.trim();
        let lng = self.longitude.trim();
        match (lat.is_empty(), lng.is_empty()) {
            (true, true) => None,
            (false, true) | (true, false) => {
                errors.add(FIELD, "latitude and longitude must be provided together");
                None
            }
            (false, false) => {
                let parsed = lat.parse::<f64>().ok().zip(lng.parse::<f64>().ok());
                let coordinate = parsed.and_then(|(la, lo)| Coordinate::new(la, lo));
                if coordinate.is_none() {
                    errors.add(
                        FIELD,
                        "latitude must be within [-90, 90] and longitude within [-180, 180]",
                    );
                }
                coordinate
            }
        }
    }

    fn acquisition_date(&self, errors: &mut FieldErrors) -> Option<NaiveDate> {
        let raw = self.acquisition_date.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok();
        if parsed.is_none() {
            errors.add(AssetField::AcquisitionDate.wire_name(), "must be a YYYY-MM-DD date");
        }
        parsed
    }
}

/// Blank text is absent; anything else is kept exactly as typed.
pub(crate) fn optional_text(raw: &str) -> Option<String> {
    if raw.trim().is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}

fn required_id(raw: &str, field: AssetField, errors: &mut FieldErrors) -> Option<i64> {
    if raw.trim().is_empty() {
        errors.add(field.wire_name(), "is required");
        return None;
    }
    positive_id(raw, field.wire_name(), errors)
}

fn optional_id(raw: &str, field: AssetField, errors: &mut FieldErrors) -> Option<i64> {
    if raw.trim().is_empty() {
        return None;
    }
    positive_id(raw, field.wire_name(), errors)
}

pub(crate) fn positive_id(raw: &str, field: &'static str, errors: &mut FieldErrors) -> Option<i64> {
    match raw.trim().parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, "must be a positive integer");
            None
        }
    }
}

pub(crate) fn required_choice<T: Labeled>(
    raw: &str,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<T> {
    if raw.trim().is_empty() {
        errors.add(field, "is required");
        return None;
    }
    let parsed = T::from_wire(raw);
    if parsed.is_none() {
        let allowed: Vec<&str> = T::ALL.iter().map(|v| v.as_str()).collect();
        errors.add(field, format!("must be one of: {}", allowed.join(", ")));
    }
    parsed
}

/// Blank, non-numeric or NaN input normalizes to `None`; negative or
/// infinite amounts are errors.
pub(crate) fn optional_amount(
    raw: &str,
    field: &'static str,
    errors: &mut FieldErrors,
) -> Option<f64> {
    let amount = raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())?;
    if amount.is_infinite() {
        errors.add(field, "must be a finite number");
        return None;
    }
    if amount < 0.0 {
        errors.add(field, "must not be negative");
        return None;
    }
    Some(amount)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::asset::tests::sample_attributes;

    fn valid_form() -> AssetForm {
        AssetForm::from_attributes(&sample_attributes())
    }

    #[test]
    fn form_round_trips_server_attributes() {
        let attrs = sample_attributes();
        let Ok(validated) = AssetForm::from_attributes(&attrs).validate() else {
            panic!("sample attributes must validate");
        };
        assert_eq!(validated, attrs);
    }

    #[test]
    fn blank_cost_normalizes_to_none() {
        let mut form = valid_form();
        form.acquisition_cost = String::new();
        let Ok(attrs) = form.validate() else {
            panic!("blank cost is valid");
        };
        assert_eq!(attrs.acquisition_cost, None);

        form.acquisition_cost = "abc".to_string();
        let Ok(attrs) = form.validate() else {
            panic!("non-numeric cost is normalized, not rejected");
        };
        assert_eq!(attrs.acquisition_cost, None);
    }

    #[test]
    fn negative_or_infinite_cost_is_rejected() {
        let mut form = valid_form();
        form.acquisition_cost = "-5".to_string();
        let Err(errors) = form.validate() else {
            panic!("negative cost must fail");
        };
        assert_eq!(errors.get("acquisitionCost"), Some("must not be negative"));

        form.acquisition_cost = "inf".to_string();
        let Err(errors) = form.validate() else {
            panic!("infinite cost must fail");
        };
        assert!(errors.get("acquisitionCost").is_some());
    }

    #[test]
    fn required_fields_are_reported_together() {
        let form = AssetForm::default();
        let Err(errors) = form.validate() else {
            panic!("empty form must fail");
        };
        for field in ["name", "categoryId", "parkId", "status", "condition"] {
            assert_eq!(errors.get(field), Some("is required"), "field {field}");
        }
        assert_eq!(errors.len(), 5);
    }

    #[test]
    fn ids_must_be_positive_integers() {
        let mut form = valid_form();
        form.park_id = "0".to_string();
        form.category_id = "two".to_string();
        form.amenity_id = "-3".to_string();
        let Err(errors) = form.validate() else {
            panic!("bad ids must fail");
        };
        assert_eq!(errors.get("parkId"), Some("must be a positive integer"));
        assert_eq!(errors.get("categoryId"), Some("must be a positive integer"));
        assert_eq!(errors.get("amenityId"), Some("must be a positive integer"));
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        let mut form = valid_form();
        form.status = "broken".to_string();
        let Err(errors) = form.validate() else {
            panic!("unknown status must fail");
        };
        let Some(message) = errors.get("status") else {
            panic!("status error expected");
        };
        assert!(message.contains("active"));
    }

    #[test]
    fn coordinates_are_both_or_neither() {
        let mut form = valid_form();
        form.latitude = "40.41".to_string();
        let Err(errors) = form.validate() else {
            panic!("lone latitude must fail");
        };
        assert!(errors.get("coordinate").is_some());

        form.longitude = "-3.70".to_string();
        let Ok(attrs) = form.validate() else {
            panic!("full pair is valid");
        };
        assert_eq!(attrs.coordinate, Coordinate::new(40.41, -3.70));

        form.latitude = "120".to_string();
        assert!(form.validate().is_err());
    }

    #[test]
    fn free_text_is_kept_verbatim_and_blank_is_absent() {
        let mut form = valid_form();
        form.notes = "  check bolts ".to_string();
        form.description = "   ".to_string();
        let Ok(attrs) = form.validate() else {
            panic!("valid form");
        };
        assert_eq!(attrs.notes.as_deref(), Some("  check bolts "));
        assert_eq!(attrs.description, None);
    }

    #[test]
    fn validation_does_not_touch_the_form() {
        let mut form = valid_form();
        form.name = "   ".to_string();
        let before = form.clone();
        let _ = form.validate();
        assert_eq!(form, before);
    }

    #[test]
    fn malformed_acquisition_date_is_an_error() {
        let mut form = valid_form();
        form.acquisition_date = "15/03/2022".to_string();
        let Err(errors) = form.validate() else {
            panic!("bad date must fail");
        };
        assert!(errors.get("acquisitionDate").is_some());
    }

    #[test]
    fn field_errors_display_lists_every_field() {
        let mut errors = FieldErrors::default();
        errors.add("parkId", "is required");
        errors.add("name", "is required");
        errors.add("name", "ignored second message");
        assert_eq!(errors.to_string(), "name: is required; parkId: is required");
    }
}
