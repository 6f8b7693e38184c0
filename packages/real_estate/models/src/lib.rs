#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! House and neighborhood types resolved from the real-estate lookup API.

use std::collections::BTreeMap;

use crime_overlay_map_models::Coordinate;
/// Descriptive attributes of a single house.
///
/// `bed`, `bath` and `sqft` are passed through verbatim from the source,
/// so they may carry formatting such as `"2.0"`.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseRecord {
    /// Full address: `"{street}, {city} {state}, {zipcode}"`.
    pub address: String,
    /// Estimated value, prefixed with `$`.
    pub price: String,
    /// Bedroom count.
    pub bed: String,
    /// Bathroom count.
    pub bath: String,
    /// Finished square footage.
    pub sqft: String,
    /// Latitude (WGS84).
    pub latitude: f64,
    /// Longitude (WGS84).
    pub longitude: f64,
}

impl HouseRecord {
    /// The house's position.
    #[must_use]
    pub const fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

/// Neighborhood name to centroid, sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeighborhoodTable(BTreeMap<String, Coordinate>);

impl NeighborhoodTable {
    /// Creates an empty table.
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts or replaces the centroid for `name`.
    pub fn insert(&mut self, name: impl Into<String>, center: Coordinate) {
        self.0.insert(name.into(), center);
    }

    /// Looks up the centroid of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Coordinate> {
        self.0.get(name).copied()
    }

    /// Iterates neighborhood names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Iterates `(name, centroid)` pairs in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Coordinate)> {
        self.0.iter().map(|(name, center)| (name.as_str(), *center))
    }

    /// Number of neighborhoods.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
