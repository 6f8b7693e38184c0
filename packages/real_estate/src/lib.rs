#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Address and neighborhood resolution against the real-estate lookup API.
//!
//! Two lookups are exposed through the [`RealEstateLookup`] trait:
//!
//! 1. **Deep search**: a street address plus city/state/zip resolves to a
//!    [`HouseRecord`] with coordinates and descriptive attributes.
//! 2. **Region children**: the configured city resolves to a
//!    [`NeighborhoodTable`] of neighborhood centroids.
//!
//! [`zillow::ZillowClient`] implements both against the Zillow XML web
//! service. Credentials are part of [`RealEstateConfig`] and are handed to
//! the client at construction time.

pub mod xml;
pub mod zillow;

use async_trait::async_trait;
use crime_overlay_real_estate_models::{HouseRecord, NeighborhoodTable};
use serde::Deserialize;
use thiserror::Error;

pub use zillow::ZillowClient;

/// Errors from real-estate lookups.
#[derive(Debug, Error)]
pub enum RealEstateError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was not the expected XML document.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::de::DeError),

    /// The API processed the request but reported a failure.
    #[error("API error {code}: {message}")]
    Api {
        /// API status code.
        code: String,
        /// API status text.
        message: String,
    },

    /// The address did not match any property.
    #[error("No results for address")]
    NoResults,

    /// An expected element was absent from the response.
    #[error("Missing field in response: {field}")]
    MissingField {
        /// Element path that was missing.
        field: &'static str,
    },

    /// A coordinate element held something other than a number.
    #[error("Invalid coordinate in {field}: {value:?}")]
    InvalidCoordinate {
        /// Element path of the coordinate.
        field: &'static str,
        /// The raw element text.
        value: String,
    },
}

/// Configuration for the real-estate lookup API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RealEstateConfig {
    /// Deep-search endpoint URL.
    pub deep_search_url: String,
    /// Region-children endpoint URL.
    pub region_children_url: String,
    /// City whose neighborhoods are listed (e.g., `"Seattle"`).
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    /// Sub-region type to list.
    #[serde(default = "default_child_type")]
    pub child_type: String,
    /// API key sent as the `zws-id` query parameter.
    #[serde(default)]
    pub api_key: String,
}

fn default_child_type() -> String {
    "neighborhood".to_string()
}

/// Resolves locations to coordinates.
#[async_trait]
pub trait RealEstateLookup: Send + Sync {
    /// Resolves a street address to a house. When the address matches
    /// several properties (e.g., units in one building) the first match is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`RealEstateError`] if the request fails, the address does
    /// not match, or the response lacks an expected field.
    async fn resolve_address(
        &self,
        street: &str,
        city_state_zip: &str,
    ) -> Result<HouseRecord, RealEstateError>;

    /// Lists every neighborhood of the configured city.
    ///
    /// # Errors
    ///
    /// Returns [`RealEstateError`] if the request or response parsing
    /// fails.
    async fn neighborhoods(&self) -> Result<NeighborhoodTable, RealEstateError>;
}
