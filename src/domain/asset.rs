//! Asset aggregate: lifecycle enums, coordinates and the editable
//! attribute set shared by the edit form, the wire and the backend.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use super::AssetId;
use super::labels::Labeled;

/// Operational status of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// In service.
    Active,
    /// Temporarily out of service for maintenance.
    Maintenance,
    /// Permanently withdrawn.
    Retired,
    /// Damaged and awaiting assessment.
    Damaged,
    /// Kept in storage.
    Storage,
}

impl Labeled for AssetStatus {
    const ALL: &'static [Self] = &[
        Self::Active,
        Self::Maintenance,
        Self::Retired,
        Self::Damaged,
        Self::Storage,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Maintenance => "maintenance",
            Self::Retired => "retired",
            Self::Damaged => "damaged",
            Self::Storage => "storage",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Under maintenance",
            Self::Retired => "Retired",
            Self::Damaged => "Damaged",
            Self::Storage => "In storage",
        }
    }
}

/// Physical condition of an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssetCondition {
    /// Like new.
    Excellent,
    /// Normal wear.
    Good,
    /// Visible wear, still serviceable.
    Fair,
    /// Needs attention soon.
    Poor,
    /// Unsafe or unusable.
    Critical,
}

impl Labeled for AssetCondition {
    const ALL: &'static [Self] = &[
        Self::Excellent,
        Self::Good,
        Self::Fair,
        Self::Poor,
        Self::Critical,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
            Self::Critical => "critical",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Fair => "Fair",
            Self::Poor => "Poor",
            Self::Critical => "Critical",
        }
    }
}

/// A geographic position. Latitude and longitude only exist as a pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinate {
    /// Degrees north, in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east, in `[-180, 180]`.
    pub longitude: f64,
}

impl Coordinate {
    /// Builds a coordinate, returning `None` when either component is out
    /// of range or not finite.
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Option<Self> {
        let c = Self {
            latitude,
            longitude,
        };
        c.is_valid().then_some(c)
    }

    /// Returns `true` if both components are finite and in range.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Identifies one editable attribute of an asset.
///
/// Used for field-level diffs (conflict detection, server-side history)
/// and for per-field validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetField {
    /// Asset name.
    Name,
    /// Free-text description.
    Description,
    /// Manufacturer serial number.
    SerialNumber,
    /// Manufacturer name.
    Manufacturer,
    /// Model designation.
    Model,
    /// Category reference.
    CategoryId,
    /// Subcategory reference.
    SubcategoryId,
    /// Park reference.
    ParkId,
    /// Amenity reference.
    AmenityId,
    /// Free-text location.
    LocationDescription,
    /// Latitude/longitude pair.
    Coordinate,
    /// Operational status.
    Status,
    /// Physical condition.
    Condition,
    /// Acquisition date.
    AcquisitionDate,
    /// Acquisition cost.
    AcquisitionCost,
    /// Responsible user reference.
    ResponsiblePersonId,
    /// Internal notes.
    Notes,
}

impl AssetField {
    /// Every editable field, in form order.
    pub const ALL: [Self; 17] = [
        Self::Name,
        Self::Description,
        Self::SerialNumber,
        Self::Manufacturer,
        Self::Model,
        Self::CategoryId,
        Self::SubcategoryId,
        Self::ParkId,
        Self::AmenityId,
        Self::LocationDescription,
        Self::Coordinate,
        Self::Status,
        Self::Condition,
        Self::AcquisitionDate,
        Self::AcquisitionCost,
        Self::ResponsiblePersonId,
        Self::Notes,
    ];

    /// camelCase name used on the wire and in history `fieldName`.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
            Self::SerialNumber => "serialNumber",
            Self::Manufacturer => "manufacturer",
            Self::Model => "model",
            Self::CategoryId => "categoryId",
            Self::SubcategoryId => "subcategoryId",
            Self::ParkId => "parkId",
            Self::AmenityId => "amenityId",
            Self::LocationDescription => "locationDescription",
            Self::Coordinate => "coordinate",
            Self::Status => "status",
            Self::Condition => "condition",
            Self::AcquisitionDate => "acquisitionDate",
            Self::AcquisitionCost => "acquisitionCost",
            Self::ResponsiblePersonId => "responsiblePersonId",
            Self::Notes => "notes",
        }
    }

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Description => "Description",
            Self::SerialNumber => "Serial number",
            Self::Manufacturer => "Manufacturer",
            Self::Model => "Model",
            Self::CategoryId => "Category",
            Self::SubcategoryId => "Subcategory",
            Self::ParkId => "Park",
            Self::AmenityId => "Amenity",
            Self::LocationDescription => "Location",
            Self::Coordinate => "Coordinates",
            Self::Status => "Status",
            Self::Condition => "Condition",
            Self::AcquisitionDate => "Acquisition date",
            Self::AcquisitionCost => "Acquisition cost",
            Self::ResponsiblePersonId => "Responsible person",
            Self::Notes => "Notes",
        }
    }

    /// Looks a field up by its wire name.
    #[must_use]
    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.wire_name() == name)
    }
}

/// The editable attributes of an asset.
///
/// This is the payload of the register and update requests and the part
/// of [`Asset`] that an edit session snapshots and diffs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetAttributes {
    /// Asset name (required, non-empty).
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Manufacturer serial number.
    #[serde(default)]
    pub serial_number: Option<String>,
    /// Manufacturer name.
    #[serde(default)]
    pub manufacturer: Option<String>,
    /// Model designation.
    #[serde(default)]
    pub model: Option<String>,
    /// Category reference.
    pub category_id: i64,
    /// Optional subcategory reference.
    #[serde(default)]
    pub subcategory_id: Option<i64>,
    /// Park the asset belongs to.
    pub park_id: i64,
    /// Optional amenity within the park.
    #[serde(default)]
    pub amenity_id: Option<i64>,
    /// Free-text location within the park.
    #[serde(default)]
    pub location_description: Option<String>,
    /// Optional geographic position.
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    /// Operational status.
    pub status: AssetStatus,
    /// Physical condition.
    pub condition: AssetCondition,
    /// Date the asset was acquired.
    #[serde(default)]
    pub acquisition_date: Option<NaiveDate>,
    /// Acquisition cost; non-negative when present.
    #[serde(default)]
    pub acquisition_cost: Option<f64>,
    /// Weak reference to the responsible user.
    #[serde(default)]
    pub responsible_person_id: Option<i64>,
    /// Internal notes.
    #[serde(default)]
    pub notes: Option<String>,
}

impl AssetAttributes {
    /// Returns the value of one field as JSON, for diffing and history.
    #[must_use]
    pub fn value_of(&self, field: AssetField) -> Value {
        match field {
            AssetField::Name => Value::from(self.name.as_str()),
            AssetField::Description => Value::from(self.description.clone()),
            AssetField::SerialNumber => Value::from(self.serial_number.clone()),
            AssetField::Manufacturer => Value::from(self.manufacturer.clone()),
            AssetField::Model => Value::from(self.model.clone()),
            AssetField::CategoryId => Value::from(self.category_id),
            AssetField::SubcategoryId => Value::from(self.subcategory_id),
            AssetField::ParkId => Value::from(self.park_id),
            AssetField::AmenityId => Value::from(self.amenity_id),
            AssetField::LocationDescription => Value::from(self.location_description.clone()),
            AssetField::Coordinate => self
                .coordinate
                .and_then(|c| serde_json::to_value(c).ok())
                .unwrap_or(Value::Null),
            AssetField::Status => Value::from(self.status.as_str()),
            AssetField::Condition => Value::from(self.condition.as_str()),
            AssetField::AcquisitionDate => {
                Value::from(self.acquisition_date.map(|d| d.to_string()))
            }
            AssetField::AcquisitionCost => Value::from(self.acquisition_cost),
            AssetField::ResponsiblePersonId => Value::from(self.responsible_person_id),
            AssetField::Notes => Value::from(self.notes.clone()),
        }
    }

    /// Overwrites one field with the value held by `source`.
    pub fn copy_field(&mut self, source: &Self, field: AssetField) {
        match field {
            AssetField::Name => self.name.clone_from(&source.name),
            AssetField::Description => self.description.clone_from(&source.description),
            AssetField::SerialNumber => self.serial_number.clone_from(&source.serial_number),
            AssetField::Manufacturer => self.manufacturer.clone_from(&source.manufacturer),
            AssetField::Model => self.model.clone_from(&source.model),
            AssetField::CategoryId => self.category_id = source.category_id,
            AssetField::SubcategoryId => self.subcategory_id = source.subcategory_id,
            AssetField::ParkId => self.park_id = source.park_id,
            AssetField::AmenityId => self.amenity_id = source.amenity_id,
            AssetField::LocationDescription => {
                self.location_description
                    .clone_from(&source.location_description);
            }
            AssetField::Coordinate => self.coordinate = source.coordinate,
            AssetField::Status => self.status = source.status,
            AssetField::Condition => self.condition = source.condition,
            AssetField::AcquisitionDate => self.acquisition_date = source.acquisition_date,
            AssetField::AcquisitionCost => self.acquisition_cost = source.acquisition_cost,
            AssetField::ResponsiblePersonId => {
                self.responsible_person_id = source.responsible_person_id;
            }
            AssetField::Notes => self.notes.clone_from(&source.notes),
        }
    }

    /// Fields whose values differ between `self` and `other`, in form order.
    #[must_use]
    pub fn changed_fields(&self, other: &Self) -> Vec<AssetField> {
        AssetField::ALL
            .iter()
            .copied()
            .filter(|f| self.value_of(*f) != other.value_of(*f))
            .collect()
    }
}

/// A physical item inventoried at a park, as confirmed by the server.
///
/// Maintenance dates are not part of this record; they are derived from
/// the maintenance list (see [`super::derivation`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// Server-assigned identifier.
    pub id: AssetId,
    /// Editable attributes.
    #[serde(flatten)]
    pub attributes: AssetAttributes,
    /// Revision counter bumped by every successful write.
    pub version: u64,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last successful write.
    pub updated_at: DateTime<Utc>,
}

/// Body of an asset update request.
///
/// `expected_version` is the version the write was based on; the server
/// refuses the write with `409 Conflict` if the asset moved on since.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssetUpdate {
    /// Version of the server copy the edit was merged onto.
    pub expected_version: u64,
    /// Full replacement attributes.
    pub asset: AssetAttributes,
}

#[cfg(test)]
#[allow(clippy::panic)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_attributes() -> AssetAttributes {
        AssetAttributes {
            name: "Bench A".to_string(),
            description: None,
            serial_number: Some("SN-001".to_string()),
            manufacturer: None,
            model: None,
            category_id: 2,
            subcategory_id: None,
            park_id: 1,
            amenity_id: None,
            location_description: Some("North gate".to_string()),
            coordinate: None,
            status: AssetStatus::Active,
            condition: AssetCondition::Good,
            acquisition_date: NaiveDate::from_ymd_opt(2022, 3, 15),
            acquisition_cost: Some(450.0),
            responsible_person_id: None,
            notes: None,
        }
    }

    pub(crate) fn sample_asset(id: i64) -> Asset {
        let now = Utc::now();
        Asset {
            id: AssetId::new(id),
            attributes: sample_attributes(),
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn coordinate_rejects_out_of_range_values() {
        assert!(Coordinate::new(40.4, -3.7).is_some());
        assert!(Coordinate::new(91.0, 0.0).is_none());
        assert!(Coordinate::new(0.0, -180.5).is_none());
        assert!(Coordinate::new(f64::NAN, 0.0).is_none());
    }

    #[test]
    fn wire_names_match_serde_field_names() {
        let Ok(Value::Object(map)) = serde_json::to_value(sample_attributes()) else {
            panic!("attributes serialize to an object");
        };
        for field in AssetField::ALL {
            assert!(map.contains_key(field.wire_name()), "missing {}", field.wire_name());
        }
    }

    #[test]
    fn changed_fields_reports_only_differences() {
        let a = sample_attributes();
        let mut b = a.clone();
        b.condition = AssetCondition::Poor;
        b.coordinate = Coordinate::new(1.0, 2.0);
        assert_eq!(
            a.changed_fields(&b),
            vec![AssetField::Coordinate, AssetField::Condition]
        );
        assert!(a.changed_fields(&a).is_empty());
    }

    #[test]
    fn copy_field_moves_a_single_value() {
        let mut target = sample_attributes();
        let mut source = sample_attributes();
        source.name = "Bench B".to_string();
        source.status = AssetStatus::Retired;

        target.copy_field(&source, AssetField::Status);
        assert_eq!(target.status, AssetStatus::Retired);
        assert_eq!(target.name, "Bench A");
    }

    #[test]
    fn asset_flattens_attributes_on_the_wire() {
        let asset = sample_asset(7);
        let Ok(json) = serde_json::to_value(&asset) else {
            panic!("asset serializes");
        };
        assert_eq!(json.get("id"), Some(&Value::from(7)));
        assert_eq!(json.get("name"), Some(&Value::from("Bench A")));
        assert_eq!(json.get("status"), Some(&Value::from("active")));

        let Ok(back) = serde_json::from_value::<Asset>(json) else {
            panic!("asset deserializes");
        };
        assert_eq!(back, asset);
    }
}
