#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for the crime overlay application.
//!
//! Serves the HTML pages that embed the rendered maps, re-rendering the
//! relevant map on every form submission, plus the rendered documents
//! themselves under `/static`.

mod handlers;
pub mod interactive;
mod pages;

use std::sync::Arc;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use crime_overlay_config::{AppConfig, ViewDefaults};
use crime_overlay_incident::SocrataIncidentSource;
use crime_overlay_map::MapViews;
use crime_overlay_real_estate::ZillowClient;

/// Shared application state.
pub struct AppState {
    /// Map views backed by the live data sources.
    pub views: MapViews,
    /// Inputs used when a form is submitted without a location.
    pub defaults: ViewDefaults,
}

/// Builds the map views from configuration, sharing one HTTP client
/// between the incident and real-estate sources.
#[must_use]
pub fn build_views(config: &AppConfig) -> MapViews {
    let client = reqwest::Client::new();
    MapViews::new(
        Arc::new(SocrataIncidentSource::with_client(
            client.clone(),
            config.socrata.clone(),
        )),
        Arc::new(ZillowClient::with_client(
            client,
            config.real_estate.clone(),
        )),
        config.map.clone(),
        config.offense_types_path(),
        config.output_dir(),
    )
}

/// Registers every route except the static file service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/about", web::get().to(handlers::about))
        .service(
            web::resource("/neighborhoods")
                .route(web::get().to(handlers::neighborhoods))
                .route(web::post().to(handlers::neighborhoods_submit)),
        )
        .service(
            web::resource("/byhouse")
                .route(web::get().to(handlers::by_house))
                .route(web::post().to(handlers::by_house_submit)),
        )
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/neighborhoods", web::get().to(handlers::api_neighborhoods)),
        );
}

/// Starts the crime overlay server.
///
/// The caller is responsible for initializing logging and providing the
/// async runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the output directory cannot be
/// created, or the HTTP server fails to bind or encounters a runtime
/// error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: AppConfig) -> std::io::Result<()> {
    let views = build_views(&config);
    let static_dir = views.output_dir().to_path_buf();
    std::fs::create_dir_all(&static_dir)?;
    log::info!("Serving rendered maps from {}", static_dir.display());

    let state = web::Data::new(AppState {
        views,
        defaults: config.defaults.clone(),
    });

    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
            .service(Files::new("/static", static_dir.clone()))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use async_trait::async_trait;
    use crime_overlay_incident::{IncidentError, IncidentSource};
    use crime_overlay_incident_models::IncidentRecord;
    use crime_overlay_map::MapConfig;
    use crime_overlay_map_models::Coordinate;
    use crime_overlay_real_estate::{RealEstateError, RealEstateLookup};
    use crime_overlay_real_estate_models::{HouseRecord, NeighborhoodTable};
    use std::path::PathBuf;

    struct FakeIncidents;

    #[async_trait]
    impl IncidentSource for FakeIncidents {
        async fn fetch_incidents(&self) -> Result<Vec<IncidentRecord>, IncidentError> {
            Ok(vec![IncidentRecord {
                category: Some("CAR PROWL".to_string()),
                offense_code: Some("THEFT-CARPROWL".to_string()),
                latitude: Some("47.621".to_string()),
                longitude: Some("-122.321".to_string()),
                date_reported: None,
            }])
        }
    }

    struct FakeRealEstate {
        fail: bool,
    }

    #[async_trait]
    impl RealEstateLookup for FakeRealEstate {
        async fn resolve_address(
            &self,
            street: &str,
            _city_state_zip: &str,
        ) -> Result<HouseRecord, RealEstateError> {
            if self.fail {
                return Err(RealEstateError::NoResults);
            }
            Ok(HouseRecord {
                address: format!("{street}, Seattle WA, 98109"),
                price: "$1370000".to_string(),
                bed: "4".to_string(),
                bath: "3.0".to_string(),
                sqft: "3470".to_string(),
                latitude: 47.63,
                longitude: -122.36,
            })
        }

        async fn neighborhoods(&self) -> Result<NeighborhoodTable, RealEstateError> {
            if self.fail {
                return Err(RealEstateError::Api {
                    code: "3".to_string(),
                    message: "Web services are currently unavailable".to_string(),
                });
            }
            let mut table = NeighborhoodTable::new();
            table.insert("Capitol Hill", Coordinate::new(47.62, -122.32));
            table.insert("Ballard", Coordinate::new(47.67, -122.38));
            Ok(table)
        }
    }

    fn state(name: &str, fail: bool) -> (web::Data<AppState>, PathBuf) {
        let dir = std::env::temp_dir().join(format!("crime_overlay_server_{name}"));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let offense_names = dir.join("offense_types.csv");
        std::fs::write(&offense_names, "THEFT-CARPROWL,Theft - Car Prowl\n").unwrap();

        let views = MapViews::new(
            Arc::new(FakeIncidents),
            Arc::new(FakeRealEstate { fail }),
            MapConfig::default(),
            offense_names,
            dir.join("static"),
        );
        let defaults = ViewDefaults {
            neighborhood: "Capitol Hill".to_string(),
            street: "315 Howe St.".to_string(),
            city_state_zip: "Seattle WA, 98109".to_string(),
        };
        (web::Data::new(AppState { views, defaults }), dir)
    }

    async fn body_text(resp: actix_web::dev::ServiceResponse) -> String {
        let bytes = test::read_body(resp).await;
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[actix_web::test]
    async fn health_reports_version() {
        let (state, dir) = state("health", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["healthy"], true);
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn landing_page_links_both_views() {
        let (state, dir) = state("index", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;
        assert!(body.contains("href=\"/neighborhoods\""));
        assert!(body.contains("href=\"/byhouse\""));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn neighborhood_page_defaults_and_renders() {
        let (state, dir) = state("neighborhood_default", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/neighborhoods").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;

        assert!(body.contains("<option value=\"Capitol Hill\" selected>"));
        assert!(body.contains("<option value=\"Ballard\">"));
        assert!(body.contains("/static/neighborhoodplot.html?t="));
        assert!(dir.join("static/neighborhoodplot.html").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn neighborhood_form_selects_submission() {
        let (state, dir) = state("neighborhood_post", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/neighborhoods")
            .set_form([("neighborhoods", "Ballard")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;

        assert!(body.contains("<option value=\"Ballard\" selected>"));
        assert!(body.contains("<option value=\"Capitol Hill\">"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn unknown_neighborhood_is_not_found_and_escaped() {
        let (state, dir) = state("neighborhood_unknown", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/neighborhoods")
            .set_form([("neighborhoods", "<script>")])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_text(resp).await;

        assert!(body.contains("&lt;script&gt;"));
        assert!(!body.contains("<script>"));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn house_form_prefills_submission() {
        let (state, dir) = state("house_post", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/byhouse")
            .set_form([
                ("street-address", "1 Main St"),
                ("city-state-zip", "Seattle WA, 98101"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = body_text(resp).await;

        assert!(body.contains("value=\"1 Main St\""));
        assert!(body.contains("value=\"Seattle WA, 98101\""));
        assert!(body.contains("/static/houseplot.html?t="));
        assert!(dir.join("static/houseplot.html").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn house_page_uses_default_address() {
        let (state, dir) = state("house_default", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/byhouse").to_request();
        let body = body_text(test::call_service(&app, req).await).await;

        assert!(body.contains("value=\"315 Howe St.\""));
        assert!(body.contains("value=\"Seattle WA, 98109\""));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn resolver_failure_renders_bad_gateway() {
        let (state, dir) = state("failure", true);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/neighborhoods").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body = body_text(resp).await;
        assert!(body.contains("class=\"error\""));

        let req = test::TestRequest::get().uri("/api/neighborhoods").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let req = test::TestRequest::get().uri("/byhouse").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(!dir.join("static/houseplot.html").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn unmatched_address_is_not_found() {
        let (state, dir) = state("unmatched_address", true);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::post()
            .uri("/byhouse")
            .set_form([
                ("street-address", "0 Nowhere Ln"),
                ("city-state-zip", "Seattle WA, 98101"),
            ])
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let body = body_text(resp).await;

        assert!(body.contains("class=\"error\""));
        assert!(body.contains("value=\"0 Nowhere Ln\""));
        assert!(!dir.join("static/houseplot.html").exists());
        let _ = std::fs::remove_dir_all(dir);
    }

    #[actix_web::test]
    async fn api_lists_neighborhoods() {
        let (state, dir) = state("api_neighborhoods", false);
        let app = test::init_service(App::new().app_data(state).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/neighborhoods").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body[0]["name"], "Ballard");
        assert_eq!(body[1]["name"], "Capitol Hill");
        assert_eq!(body[1]["latitude"], 47.62);
        let _ = std::fs::remove_dir_all(dir);
    }
}
