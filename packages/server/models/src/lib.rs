#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Form and response types for the crime overlay web server.
//!
//! Form field names match the HTML pages (`neighborhoods`,
//! `street-address`, `city-state-zip`), so they are renamed explicitly
//! rather than following a blanket case convention.

use crime_overlay_map_models::Coordinate;
use crime_overlay_real_estate_models::NeighborhoodTable;
use serde::{Deserialize, Serialize};

/// Submission of the neighborhood selection form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NeighborhoodForm {
    /// Selected neighborhood name.
    #[serde(default)]
    pub neighborhoods: Option<String>,
}

impl NeighborhoodForm {
    /// The selected neighborhood, if one was submitted.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.neighborhoods
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Submission of the address lookup form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HouseForm {
    /// Street address line.
    #[serde(default, rename = "street-address")]
    pub street_address: Option<String>,
    /// City, state and zip line.
    #[serde(default, rename = "city-state-zip")]
    pub city_state_zip: Option<String>,
}

impl HouseForm {
    /// Both address lines, when both were submitted and non-empty.
    #[must_use]
    pub fn address(&self) -> Option<(&str, &str)> {
        let street = self.street_address.as_deref().map(str::trim)?;
        let csz = self.city_state_zip.as_deref().map(str::trim)?;
        if street.is_empty() || csz.is_empty() {
            return None;
        }
        Some((street, csz))
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

/// A neighborhood as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNeighborhood {
    /// Neighborhood name.
    pub name: String,
    /// Centroid latitude.
    pub latitude: f64,
    /// Centroid longitude.
    pub longitude: f64,
}

impl ApiNeighborhood {
    /// Converts a neighborhood table into API entries, sorted by name.
    #[must_use]
    pub fn from_table(table: &NeighborhoodTable) -> Vec<Self> {
        table
            .iter()
            .map(|(name, Coordinate { latitude, longitude })| Self {
                name: name.to_string(),
                latitude,
                longitude,
            })
            .collect()
    }
}
