//! Presentation of history change types.
//!
//! One static table, defined once, maps each [`ChangeType`] to an icon,
//! a label and a color class. Unknown types fall through to the generic
//! "other" presentation.

use serde::Serialize;

use crate::domain::ChangeType;

/// How a change type is shown in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePresentation {
    /// Icon identifier.
    pub icon: &'static str,
    /// Display label.
    pub label: &'static str,
    /// CSS color classes.
    pub color_class: &'static str,
}

const CREATION: ChangePresentation = ChangePresentation {
    icon: "plus-circle",
    label: "Created",
    color_class: "bg-green-100 text-green-800",
};
const ACQUISITION: ChangePresentation = ChangePresentation {
    icon: "shopping-cart",
    label: "Acquired",
    color_class: "bg-blue-100 text-blue-800",
};
const UPDATED: ChangePresentation = ChangePresentation {
    icon: "edit",
    label: "Updated",
    color_class: "bg-yellow-100 text-yellow-800",
};
const MODIFICATION: ChangePresentation = ChangePresentation {
    icon: "settings",
    label: "Modified",
    color_class: "bg-amber-100 text-amber-800",
};
const MAINTENANCE: ChangePresentation = ChangePresentation {
    icon: "wrench",
    label: "Maintenance",
    color_class: "bg-purple-100 text-purple-800",
};
const RETIREMENT: ChangePresentation = ChangePresentation {
    icon: "archive",
    label: "Retired",
    color_class: "bg-gray-100 text-gray-800",
};
const DELETION: ChangePresentation = ChangePresentation {
    icon: "trash",
    label: "Deleted",
    color_class: "bg-red-100 text-red-800",
};
const OTHER: ChangePresentation = ChangePresentation {
    icon: "info",
    label: "Other",
    color_class: "bg-slate-100 text-slate-800",
};

/// Returns the presentation for a change type. Total over all inputs.
#[must_use]
pub const fn classify_change_type(change_type: &ChangeType) -> ChangePresentation {
    match change_type {
        ChangeType::Creation => CREATION,
        ChangeType::Acquisition => ACQUISITION,
        ChangeType::Updated => UPDATED,
        ChangeType::Modification => MODIFICATION,
        ChangeType::Maintenance => MAINTENANCE,
        ChangeType::Retirement => RETIREMENT,
        ChangeType::Deletion => DELETION,
        ChangeType::Other(_) => OTHER,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_distinct_presentations() {
        let known = [
            ChangeType::Creation,
            ChangeType::Acquisition,
            ChangeType::Updated,
            ChangeType::Modification,
            ChangeType::Maintenance,
            ChangeType::Retirement,
            ChangeType::Deletion,
        ];
        let mut labels: Vec<&str> = known.iter().map(|t| classify_change_type(t).label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), known.len());
        assert!(!labels.contains(&"Other"));
    }

    #[test]
    fn unknown_type_falls_through_to_other() {
        let p = classify_change_type(&ChangeType::from_wire("transfer"));
        assert_eq!(p, OTHER);
        assert_eq!(p.icon, "info");
    }

    #[test]
    fn maintenance_uses_wrench() {
        assert_eq!(classify_change_type(&ChangeType::Maintenance).icon, "wrench");
    }
}
