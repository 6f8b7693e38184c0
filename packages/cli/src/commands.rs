//! One-shot operations behind the CLI subcommands.

use crime_overlay_map::{MapViews, RenderedMap, ViewError};
use crime_overlay_real_estate_models::NeighborhoodTable;

/// Renders the neighborhood view for `name`.
///
/// # Errors
///
/// Returns [`ViewError`] if the neighborhood list, the render, or the
/// write fails.
pub async fn render_neighborhood(views: &MapViews, name: &str) -> Result<RenderedMap, ViewError> {
    let table = views.neighborhoods().await?;
    let rendered = views.render_neighborhood(&table, name).await?;
    log::info!(
        "Rendered {} layers for {name}",
        rendered.document.layers.len()
    );
    Ok(rendered)
}

/// Renders the house view for the given address.
///
/// # Errors
///
/// Returns [`ViewError`] if resolution, the render, or the write fails.
pub async fn render_house(
    views: &MapViews,
    street: &str,
    city_state_zip: &str,
) -> Result<RenderedMap, ViewError> {
    let rendered = views.render_house(street, city_state_zip).await?;
    log::info!(
        "Rendered {} layers around {street}, {city_state_zip}",
        rendered.document.layers.len()
    );
    Ok(rendered)
}

/// Lists the city's neighborhoods as printable lines.
///
/// # Errors
///
/// Returns [`ViewError::RealEstate`] if the lookup fails.
pub async fn list_neighborhoods(views: &MapViews) -> Result<Vec<String>, ViewError> {
    Ok(format_neighborhoods(&views.neighborhoods().await?))
}

fn format_neighborhoods(table: &NeighborhoodTable) -> Vec<String> {
    let width = table.names().map(str::len).max().unwrap_or(0);
    table
        .iter()
        .map(|(name, center)| {
            format!(
                "{name:<width$}  {:>10.6} {:>11.6}",
                center.latitude, center.longitude
            )
        })
        .collect()
}
