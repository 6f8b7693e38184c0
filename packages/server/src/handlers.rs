//! HTTP handler functions for the crime overlay pages and API.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use crime_overlay_map::ViewError;
use crime_overlay_real_estate::RealEstateError;
use crime_overlay_server_models::{ApiHealth, ApiNeighborhood, HouseForm, NeighborhoodForm};

use crate::AppState;
use crate::pages;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/neighborhoods`
///
/// Returns the city's neighborhoods and their centroids.
pub async fn api_neighborhoods(state: web::Data<AppState>) -> HttpResponse {
    match state.views.neighborhoods().await {
        Ok(table) => HttpResponse::Ok().json(ApiNeighborhood::from_table(&table)),
        Err(e) => {
            log::error!("Failed to list neighborhoods: {e}");
            HttpResponse::build(error_status(&e)).json(serde_json::json!({
                "error": e.to_string()
            }))
        }
    }
}

/// `GET /`
pub async fn index() -> HttpResponse {
    html(StatusCode::OK, pages::index())
}

/// `GET /about`
pub async fn about() -> HttpResponse {
    html(StatusCode::OK, pages::about())
}

/// `GET /neighborhoods`
pub async fn neighborhoods(state: web::Data<AppState>) -> HttpResponse {
    neighborhood_view(&state, None).await
}

/// `POST /neighborhoods`
pub async fn neighborhoods_submit(
    state: web::Data<AppState>,
    form: web::Form<NeighborhoodForm>,
) -> HttpResponse {
    neighborhood_view(&state, form.selected()).await
}

/// `GET /byhouse`
pub async fn by_house(state: web::Data<AppState>) -> HttpResponse {
    house_view(&state, None).await
}

/// `POST /byhouse`
pub async fn by_house_submit(
    state: web::Data<AppState>,
    form: web::Form<HouseForm>,
) -> HttpResponse {
    house_view(&state, form.address()).await
}

/// Renders the neighborhood map for `selected` (or the default) and the
/// page embedding it.
async fn neighborhood_view(state: &AppState, selected: Option<&str>) -> HttpResponse {
    let name = selected.unwrap_or(state.defaults.neighborhood.as_str());

    let table = match state.views.neighborhoods().await {
        Ok(table) => table,
        Err(e) => {
            log::error!("Failed to list neighborhoods: {e}");
            return html(
                error_status(&e),
                pages::neighborhoods(None, name, None, Some(e.to_string().as_str())),
            );
        }
    };

    match state.views.render_neighborhood(&table, name).await {
        Ok(rendered) => {
            log::info!("Rendered {name} to {}", rendered.path.display());
            html(
                StatusCode::OK,
                pages::neighborhoods(Some(&table), name, Some(cache_buster()), None),
            )
        }
        Err(e) => {
            log::error!("Failed to render neighborhood {name}: {e}");
            html(
                error_status(&e),
                pages::neighborhoods(
                    Some(&table),
                    name,
                    None,
                    Some(e.to_string().as_str()),
                ),
            )
        }
    }
}

/// Renders the house map for `address` (or the default) and the page
/// embedding it.
async fn house_view(state: &AppState, address: Option<(&str, &str)>) -> HttpResponse {
    let (street, city_state_zip) = address.unwrap_or((
        state.defaults.street.as_str(),
        state.defaults.city_state_zip.as_str(),
    ));

    match state.views.render_house(street, city_state_zip).await {
        Ok(rendered) => {
            log::info!(
                "Rendered {street}, {city_state_zip} to {}",
                rendered.path.display()
            );
            html(
                StatusCode::OK,
                pages::by_house(street, city_state_zip, Some(cache_buster()), None),
            )
        }
        Err(e) => {
            log::error!("Failed to render house {street}, {city_state_zip}: {e}");
            html(
                error_status(&e),
                pages::by_house(street, city_state_zip, None, Some(e.to_string().as_str())),
            )
        }
    }
}

/// Maps a view failure to the response status: lookups that found nothing
/// are 404, upstream failures 502, local output failures 500.
fn error_status(error: &ViewError) -> StatusCode {
    match error {
        ViewError::UnknownNeighborhood { .. }
        | ViewError::RealEstate(RealEstateError::NoResults) => StatusCode::NOT_FOUND,
        ViewError::RealEstate(_) | ViewError::Incident(_) => StatusCode::BAD_GATEWAY,
        ViewError::Map(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Query value appended to the iframe URL so the browser refetches the
/// freshly written document.
fn cache_buster() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn html(status: StatusCode, body: String) -> HttpResponse {
    HttpResponse::build(status)
        .content_type(ContentType::html())
        .body(body)
}
