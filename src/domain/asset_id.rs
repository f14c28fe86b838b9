//! Type-safe asset identifier.
//!
//! [`AssetId`] is a newtype wrapper around the backend's positive integer
//! key so that asset identifiers cannot be confused with park, category or
//! user references, which are plain integers on the wire.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Unique identifier for an inventoried asset.
///
/// Assigned by the server when the asset is registered and immutable
/// thereafter. Used as the key of the query cache and the path segment of
/// every asset endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct AssetId(i64);

impl AssetId {
    /// Creates an `AssetId` from a raw integer key.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer key.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for AssetId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<AssetId> for i64 {
    fn from(id: AssetId) -> Self {
        id.0
    }
}

impl FromStr for AssetId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn display_is_plain_integer() {
        assert_eq!(AssetId::new(7).to_string(), "7");
    }

    #[test]
    fn serializes_transparently() {
        let json = serde_json::to_string(&AssetId::new(42)).unwrap_or_default();
        assert_eq!(json, "42");
    }

    #[test]
    fn parses_with_surrounding_whitespace() {
        let Ok(id) = " 12 ".parse::<AssetId>() else {
            panic!("expected a valid id");
        };
        assert_eq!(id.get(), 12);
    }

    #[test]
    fn hash_works_in_hashmap() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(AssetId::new(3), "bench");
        assert_eq!(map.get(&AssetId::new(3)), Some(&"bench"));
    }
}
