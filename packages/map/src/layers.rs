//! Converts category groups and an optional house into map layers.

use crime_overlay_incident_models::{CategoryGroup, CategoryGroups};
use crime_overlay_map_models::{LayerKind, MapLayer, MarkerStyle};
use crime_overlay_real_estate_models::HouseRecord;

/// Builds one layer per category in group order, with a highlight layer
/// for `house` prepended when given.
///
/// Incidents whose coordinates are unknown are left out of their layer
/// along with their labels, so a category may produce an empty layer.
#[must_use]
pub fn build_layers(groups: &CategoryGroups, house: Option<&HouseRecord>) -> Vec<MapLayer> {
    let mut layers = Vec::with_capacity(groups.len() + usize::from(house.is_some()));

    if let Some(house) = house {
        layers.push(highlight_layer(house));
    }
    layers.extend(groups.iter().map(category_layer));

    layers
}

/// One small-circle layer holding every positioned incident of a group.
#[must_use]
pub fn category_layer(group: &CategoryGroup) -> MapLayer {
    let (points, labels): (Vec<_>, Vec<_>) = group
        .entries()
        .filter_map(|(point, label)| point.map(|p| (p, label.to_string())))
        .unzip();

    let dropped = group.len() - points.len();
    if dropped > 0 {
        log::debug!(
            "Dropped {dropped} unpositioned incidents from {:?}",
            group.category()
        );
    }

    MapLayer {
        name: group.category().to_string(),
        kind: LayerKind::Category,
        points,
        labels,
        marker: MarkerStyle::CATEGORY,
    }
}

/// A single star marker for `house`, named after its address.
#[must_use]
pub fn highlight_layer(house: &HouseRecord) -> MapLayer {
    MapLayer {
        name: house.address.clone(),
        kind: LayerKind::Highlight,
        points: vec![house.coordinate()],
        labels: vec![house_tooltip(house)],
        marker: MarkerStyle::HIGHLIGHT,
    }
}

/// Hover text for a highlighted house.
#[must_use]
pub fn house_tooltip(house: &HouseRecord) -> String {
    format!(
        "Address: {}<br><br>Bedrooms: {}<br>Bathrooms: {}<br>Price: {}<br>Sq. Ft.: {}",
        house.address, house.bed, house.bath, house.price, house.sqft
    )
}
