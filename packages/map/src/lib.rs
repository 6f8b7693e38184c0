#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map layer construction, rendering, and the two map views.
//!
//! The pipeline for a single request is:
//!
//! 1. resolve a location (house or neighborhood) through
//!    [`crime_overlay_real_estate::RealEstateLookup`];
//! 2. fetch and [`aggregate`](crime_overlay_incident::aggregate) recent
//!    incidents;
//! 3. turn the category groups into [`MapLayer`](crime_overlay_map_models::MapLayer)s
//!    with [`layers::build_layers`];
//! 4. render the [`MapDocument`](crime_overlay_map_models::MapDocument) to
//!    HTML with [`plotly::render_document`] and write it atomically with
//!    [`writer::write_atomic`].
//!
//! [`views::MapViews`] drives the whole sequence.

pub mod layers;
pub mod plotly;
pub mod views;
pub mod writer;

use serde::Deserialize;

pub use views::{MapViews, RenderedMap, ViewError};

/// Errors from rendering or writing a map document.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    /// I/O error while writing the document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The figure could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Viewport and theme settings for the rendered maps.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapConfig {
    /// Zoom level of the house view.
    #[serde(default = "default_house_zoom")]
    pub house_zoom: u8,
    /// Zoom level of the neighborhood view.
    #[serde(default = "default_neighborhood_zoom")]
    pub neighborhood_zoom: u8,
    /// Visual theme shared by both views.
    #[serde(default)]
    pub theme: crime_overlay_map_models::MapTheme,
}

const fn default_house_zoom() -> u8 {
    15
}

const fn default_neighborhood_zoom() -> u8 {
    13
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            house_zoom: default_house_zoom(),
            neighborhood_zoom: default_neighborhood_zoom(),
            theme: crime_overlay_map_models::MapTheme::default(),
        }
    }
}
