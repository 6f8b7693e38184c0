//! Seattle Police Department incidents via the Socrata SODA API.
//!
//! Issues a single request using the `$limit` and `$order` query
//! parameters; there is no pagination beyond the configured limit.
//! Dataset: <https://data.seattle.gov/resource/y7pv-r3kh>

use async_trait::async_trait;
use crime_overlay_incident_models::IncidentRecord;
use serde::Deserialize;

use crate::{IncidentError, IncidentSource};

/// Configuration for the Socrata incident endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocrataConfig {
    /// Resource URL (e.g., `"https://data.seattle.gov/resource/y7pv-r3kh.json"`).
    pub api_url: String,
    /// Maximum number of records to request.
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Column to sort by, newest first.
    #[serde(default = "default_order_column")]
    pub order_column: String,
    /// Header that carries the application token.
    #[serde(default = "default_token_header")]
    pub token_header: String,
    /// Application token. Omitted from the request when empty.
    #[serde(default)]
    pub app_token: String,
}

const fn default_limit() -> u32 {
    5000
}

fn default_order_column() -> String {
    "date_reported".to_string()
}

fn default_token_header() -> String {
    "X-App-Token".to_string()
}

/// Incident source backed by a Socrata dataset.
pub struct SocrataIncidentSource {
    client: reqwest::Client,
    config: SocrataConfig,
}

impl SocrataIncidentSource {
    /// Creates a source with its own HTTP client.
    #[must_use]
    pub fn new(config: SocrataConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a source that shares an existing HTTP client.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: SocrataConfig) -> Self {
        Self { client, config }
    }

    fn order_clause(&self) -> String {
        format!("{} DESC", self.config.order_column)
    }

    /// Builds the incident request: one page of `limit` rows, newest first,
    /// with the app token attached when one is configured.
    fn request(&self) -> reqwest::RequestBuilder {
        let limit = self.config.limit.to_string();
        let order = self.order_clause();

        let request = self
            .client
            .get(&self.config.api_url)
            .query(&[("$limit", limit.as_str()), ("$order", order.as_str())]);
        if self.config.app_token.is_empty() {
            request
        } else {
            request.header(self.config.token_header.as_str(), &self.config.app_token)
        }
    }
}

#[async_trait]
impl IncidentSource for SocrataIncidentSource {
    async fn fetch_incidents(&self) -> Result<Vec<IncidentRecord>, IncidentError> {
        log::info!(
            "Fetching up to {} incidents from {}",
            self.config.limit,
            self.config.api_url
        );
        let response = self.request().send().await?;
        if !response.status().is_success() {
            return Err(IncidentError::Status {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        let records = parse_records(&body)?;
        log::info!("Downloaded {} incident records", records.len());
        Ok(records)
    }
}

/// Parses a Socrata JSON array into incident records.
fn parse_records(body: &str) -> Result<Vec<IncidentRecord>, IncidentError> {
    Ok(serde_json::from_str(body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_url: &str) -> SocrataConfig {
        SocrataConfig {
            api_url: api_url.to_string(),
            limit: default_limit(),
            order_column: default_order_column(),
            token_header: default_token_header(),
            app_token: String::new(),
        }
    }

    #[test]
    fn parses_heterogeneous_records() {
        let body = r#"[
            {"summarized_offense_description": "CAR PROWL", "offense_type": "THEFT-CARPROWL",
             "latitude": "47.61", "longitude": "-122.33", "date_reported": "2017-03-01T10:00:00.000"},
            {"offense_type": "WARRARR-FELONY", "latitude": "47.60", "longitude": "-122.32"},
            {}
        ]"#;
        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].category.as_deref(), Some("CAR PROWL"));
        assert!(records[1].category.is_none());
        assert_eq!(records[2], IncidentRecord::default());
    }

    #[test]
    fn rejects_non_array_body() {
        assert!(matches!(
            parse_records(r#"{"error": true}"#),
            Err(IncidentError::Json(_))
        ));
    }

    const DATASET: &str = "https://data.seattle.gov/resource/y7pv-r3kh.json";

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn orders_newest_first() {
        let source = SocrataIncidentSource::new(config("http://localhost"));
        assert_eq!(source.order_clause(), "date_reported DESC");
    }

    #[test]
    fn request_limits_and_orders_rows() {
        let source = SocrataIncidentSource::new(config(DATASET));
        let request = source.request().build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/resource/y7pv-r3kh.json");
        assert_eq!(
            query_pairs(&request),
            [
                ("$limit".to_string(), "5000".to_string()),
                ("$order".to_string(), "date_reported DESC".to_string()),
            ]
        );
    }

    #[test]
    fn app_token_goes_in_configured_header() {
        let source = SocrataIncidentSource::new(SocrataConfig {
            app_token: "tok".to_string(),
            ..config(DATASET)
        });
        let request = source.request().build().unwrap();
        assert_eq!(request.headers().get("X-App-Token").unwrap(), "tok");

        let source = SocrataIncidentSource::new(SocrataConfig {
            app_token: "tok".to_string(),
            token_header: "X-API-Key".to_string(),
            ..config(DATASET)
        });
        let request = source.request().build().unwrap();
        assert_eq!(request.headers().get("X-API-Key").unwrap(), "tok");
        assert!(request.headers().get("X-App-Token").is_none());
    }

    #[test]
    fn empty_app_token_is_omitted() {
        let source = SocrataIncidentSource::new(config(DATASET));
        let request = source.request().build().unwrap();
        assert!(request.headers().get("X-App-Token").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_an_error() {
        let source = SocrataIncidentSource::new(config("http://127.0.0.1:9/resource.json"));
        assert!(matches!(
            source.fetch_incidents().await,
            Err(IncidentError::Http(_))
        ));
    }
}
