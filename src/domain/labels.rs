//! Shared enum-to-display-label table.
//!
//! Every enumerated asset or maintenance field implements [`Labeled`], so
//! the edit form, read-only displays and the history ledger all read the
//! same wire value and label pair. There is exactly one table per field.

use super::asset::AssetField;

/// An enumerated field value with a stable wire name and display label.
pub trait Labeled: Copy + Sized + 'static {
    /// Every value, in display order.
    const ALL: &'static [Self];

    /// The snake_case value used on the wire and in form selects.
    fn as_str(self) -> &'static str;

    /// The human-readable label.
    fn label(self) -> &'static str;

    /// Parses a wire value; surrounding whitespace is ignored.
    fn from_wire(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL.iter().copied().find(|v| v.as_str() == raw)
    }

    /// `(value, label)` pairs for populating a select input.
    fn options() -> Vec<SelectOption> {
        Self::ALL
            .iter()
            .map(|v| SelectOption {
                value: v.as_str(),
                label: v.label(),
            })
            .collect()
    }
}

/// One entry of a select input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectOption {
    /// Wire value submitted by the form.
    pub value: &'static str,
    /// Label shown to the user.
    pub label: &'static str,
}

/// Returns the display label for a history `fieldName`, if it names a
/// known asset field.
#[must_use]
pub fn field_label(field_name: &str) -> Option<&'static str> {
    AssetField::from_wire_name(field_name).map(AssetField::label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AssetCondition, AssetStatus, MaintenanceStatus};

    #[test]
    fn from_wire_round_trips_every_value() {
        for status in AssetStatus::ALL {
            assert_eq!(AssetStatus::from_wire(status.as_str()), Some(*status));
        }
        for condition in AssetCondition::ALL {
            assert_eq!(AssetCondition::from_wire(condition.as_str()), Some(*condition));
        }
    }

    #[test]
    fn from_wire_rejects_labels_and_unknown_values() {
        assert_eq!(AssetStatus::from_wire("Active"), None);
        assert_eq!(AssetStatus::from_wire("broken"), None);
        assert_eq!(MaintenanceStatus::from_wire(" in_progress "), Some(MaintenanceStatus::InProgress));
    }

    #[test]
    fn options_follow_declaration_order() {
        let options = AssetCondition::options();
        assert_eq!(options.len(), 5);
        assert_eq!(options.first().map(|o| o.value), Some("excellent"));
        assert_eq!(options.last().map(|o| o.label), Some("Critical"));
    }

    #[test]
    fn field_label_resolves_known_fields_only() {
        assert_eq!(field_label("acquisitionCost"), Some("Acquisition cost"));
        assert_eq!(field_label("status"), Some("Status"));
        assert_eq!(field_label("colour"), None);
    }
}
