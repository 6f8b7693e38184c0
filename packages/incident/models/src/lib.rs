#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident record and category group types.
//!
//! [`IncidentRecord`] mirrors the raw Seattle Police Department Socrata
//! payload, where any key may be absent. [`CategoryGroups`] is the result
//! of bucketing those records by their summarized offense description.

use std::collections::BTreeMap;

use crime_overlay_map_models::Coordinate;
use serde::Deserialize;

/// A single police incident as returned by the Socrata API.
///
/// The dataset is heterogeneous, so every field is optional. Coordinates
/// are kept as the raw strings Socrata sends and parsed during
/// aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct IncidentRecord {
    /// Category label used for grouping (e.g., `"CAR PROWL"`).
    #[serde(default, rename = "summarized_offense_description")]
    pub category: Option<String>,
    /// Short offense code (e.g., `"THEFT-CARPROWL"`).
    #[serde(default, rename = "offense_type")]
    pub offense_code: Option<String>,
    /// Latitude (WGS84) as a decimal string.
    #[serde(default)]
    pub latitude: Option<String>,
    /// Longitude (WGS84) as a decimal string.
    #[serde(default)]
    pub longitude: Option<String>,
    /// When the incident was reported (ISO 8601, no zone).
    #[serde(default)]
    pub date_reported: Option<String>,
}

impl IncidentRecord {
    /// Parses the record's coordinates. Returns `None` if either side is
    /// missing or not a finite number.
    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        let latitude = self.latitude.as_deref()?.trim().parse::<f64>().ok()?;
        let longitude = self.longitude.as_deref()?.trim().parse::<f64>().ok()?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return None;
        }
        Some(Coordinate::new(latitude, longitude))
    }
}

/// All incidents that share one category label.
///
/// `points` and `labels` are parallel: entry `i` of each describes the
/// `i`-th incident in fetch order. A point is `None` when the source
/// record had no usable coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup {
    category: String,
    points: Vec<Option<Coordinate>>,
    labels: Vec<String>,
}

impl CategoryGroup {
    fn new(category: String) -> Self {
        Self {
            category,
            points: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// The category label shared by every incident in this group.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Incident positions in fetch order.
    #[must_use]
    pub fn points(&self) -> &[Option<Coordinate>] {
        &self.points
    }

    /// Display labels in fetch order.
    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of incidents in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the group holds no incidents.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterates `(point, label)` pairs in fetch order.
    pub fn entries(&self) -> impl Iterator<Item = (Option<Coordinate>, &str)> {
        self.points
            .iter()
            .copied()
            .zip(self.labels.iter().map(String::as_str))
    }
}

/// Category groups in the order each category was first seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroups {
    groups: Vec<CategoryGroup>,
    index: BTreeMap<String, usize>,
}

impl CategoryGroups {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an incident to the group for `category`, creating the group
    /// at the end of the ordering if this is the first time the category
    /// has been seen.
    pub fn push(&mut self, category: &str, point: Option<Coordinate>, label: String) {
        let idx = if let Some(&idx) = self.index.get(category) {
            idx
        } else {
            let idx = self.groups.len();
            self.groups.push(CategoryGroup::new(category.to_string()));
            self.index.insert(category.to_string(), idx);
            idx
        };

        let group = &mut self.groups[idx];
        group.points.push(point);
        group.labels.push(label);
    }

    /// Returns the group for `category`, if any incident carried it.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&CategoryGroup> {
        self.index.get(category).map(|&idx| &self.groups[idx])
    }

    /// Iterates groups in first-seen order.
    pub fn iter(&self) -> std::slice::Iter<'_, CategoryGroup> {
        self.groups.iter()
    }

    /// Number of distinct categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no category has been seen.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of incidents across all groups.
    #[must_use]
    pub fn incident_count(&self) -> usize {
        self.groups.iter().map(CategoryGroup::len).sum()
    }
}

impl<'a> IntoIterator for &'a CategoryGroups {
    type Item = &'a CategoryGroup;
    type IntoIter = std::slice::Iter<'a, CategoryGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_partial_socrata_record() {
        let json = serde_json::json!({
            "summarized_offense_description": "BURGLARY",
            "offense_type": "BURGLARY-FORCE-RES",
            "latitude": "47.6205",
            "longitude": "-122.3212",
            "zone_beat": "E2"
        });
        let record: IncidentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.category.as_deref(), Some("BURGLARY"));
        assert_eq!(record.offense_code.as_deref(), Some("BURGLARY-FORCE-RES"));
        assert!(record.date_reported.is_none());

        let point = record.coordinate().unwrap();
        assert!((point.latitude - 47.6205).abs() < f64::EPSILON);
        assert!((point.longitude - -122.3212).abs() < f64::EPSILON);
    }

    #[test]
    fn coordinate_requires_both_sides() {
        let record = IncidentRecord {
            latitude: Some("47.6".to_string()),
            ..IncidentRecord::default()
        };
        assert!(record.coordinate().is_none());

        let record = IncidentRecord {
            latitude: Some("47.6".to_string()),
            longitude: Some("not-a-number".to_string()),
            ..IncidentRecord::default()
        };
        assert!(record.coordinate().is_none());
    }

    #[test]
    fn groups_keep_first_seen_order() {
        let mut groups = CategoryGroups::new();
        groups.push("THEFT", None, "a".to_string());
        groups.push("ASSAULT", None, "b".to_string());
        groups.push("THEFT", Some(Coordinate::new(1.0, 2.0)), "c".to_string());

        let order: Vec<&str> = groups.iter().map(CategoryGroup::category).collect();
        assert_eq!(order, ["THEFT", "ASSAULT"]);

        let theft = groups.get("THEFT").unwrap();
        assert_eq!(theft.labels(), ["a", "c"]);
        assert_eq!(theft.points(), [None, Some(Coordinate::new(1.0, 2.0))]);
        assert_eq!(groups.incident_count(), 3);
    }
}
