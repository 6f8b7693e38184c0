#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Map layer, theme, and document types.
//!
//! A [`MapDocument`] is everything needed to draw one interactive map: the
//! ordered [`MapLayer`]s, the viewport, and the visual [`MapTheme`]. These
//! types are renderer-agnostic; the `crime_overlay_map` crate turns them
//! into a Plotly `scattermapbox` figure.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// A WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate from a latitude/longitude pair.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Marker glyph drawn for each point of a layer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MarkerSymbol {
    /// Small filled circle.
    Circle,
    /// Star, used to highlight a point of interest.
    Star,
}

/// Shared marker style for every point in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerStyle {
    /// Marker size in pixels.
    pub size: u8,
    /// Marker glyph.
    pub symbol: MarkerSymbol,
}

impl MarkerStyle {
    /// Style for incident category layers.
    pub const CATEGORY: Self = Self {
        size: 5,
        symbol: MarkerSymbol::Circle,
    };

    /// Style for the single highlighted point of interest.
    pub const HIGHLIGHT: Self = Self {
        size: 12,
        symbol: MarkerSymbol::Star,
    };
}

/// What a layer represents.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum LayerKind {
    /// All incidents of one offense category.
    Category,
    /// A single highlighted location (e.g., a house).
    Highlight,
}

/// A named set of points drawn with one marker style.
///
/// `points` and `labels` are parallel; `labels[i]` is the hover text of
/// `points[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapLayer {
    /// Legend entry for this layer.
    pub name: String,
    /// What this layer represents.
    pub kind: LayerKind,
    /// Marker positions.
    pub points: Vec<Coordinate>,
    /// Hover text per marker.
    pub labels: Vec<String>,
    /// Marker style shared by every point.
    pub marker: MarkerStyle,
}

impl MapLayer {
    /// Number of markers in this layer.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether this layer draws nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Visual theme of a rendered map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapTheme {
    /// Mapbox base style (e.g., `"dark"`).
    pub map_style: String,
    /// Page and legend background color.
    pub background: String,
    /// Legend text color.
    pub legend_font_color: String,
    /// Mapbox access token for the base tiles.
    pub access_token: String,
}

impl Default for MapTheme {
    fn default() -> Self {
        Self {
            map_style: "dark".to_string(),
            background: "#202020".to_string(),
            legend_font_color: "#ffffff".to_string(),
            access_token: String::new(),
        }
    }
}

/// A complete map: layers plus viewport and theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// Layers in draw/legend order.
    pub layers: Vec<MapLayer>,
    /// Viewport center.
    pub center: Coordinate,
    /// Mapbox zoom level.
    pub zoom: u8,
    /// Visual theme.
    pub theme: MapTheme,
}

impl MapDocument {
    /// Iterates only the highlight layers.
    pub fn highlight_layers(&self) -> impl Iterator<Item = &MapLayer> {
        self.layers
            .iter()
            .filter(|layer| layer.kind == LayerKind::Highlight)
    }
}

/// The two map views the application renders.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ViewKind {
    /// Centered on a single house, with the house highlighted.
    House,
    /// Centered on a neighborhood centroid.
    Neighborhood,
}

impl ViewKind {
    /// File name of the rendered document inside the output directory.
    #[must_use]
    pub const fn output_filename(self) -> &'static str {
        match self {
            Self::House => "houseplot.html",
            Self::Neighborhood => "neighborhoodplot.html",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_kinds_have_distinct_outputs() {
        assert_ne!(
            ViewKind::House.output_filename(),
            ViewKind::Neighborhood.output_filename()
        );
    }

    #[test]
    fn marker_symbol_serializes_lowercase() {
        assert_eq!(MarkerSymbol::Star.to_string(), "star");
        assert_eq!(MarkerSymbol::Circle.as_ref(), "circle");
    }

    #[test]
    fn view_kind_parses_from_str() {
        assert_eq!("house".parse::<ViewKind>().unwrap(), ViewKind::House);
        assert_eq!(
            "neighborhood".parse::<ViewKind>().unwrap(),
            ViewKind::Neighborhood
        );
        assert!("street".parse::<ViewKind>().is_err());
    }
}
