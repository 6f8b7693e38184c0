//! Zillow web-service client.
//!
//! Uses the `GetDeepSearchResults` and `GetRegionChildren` endpoints. Both
//! take the API key as the `zws-id` query parameter and answer with XML.
//!
//! See <https://www.zillow.com/howto/api/APIOverview.htm>

use async_trait::async_trait;
use crime_overlay_real_estate_models::{HouseRecord, NeighborhoodTable};

use crate::xml::{parse_house, parse_neighborhoods};
use crate::{RealEstateConfig, RealEstateError, RealEstateLookup};

/// Real-estate lookups backed by the Zillow XML API.
pub struct ZillowClient {
    client: reqwest::Client,
    config: RealEstateConfig,
}

impl ZillowClient {
    /// Creates a client with its own HTTP connection pool.
    #[must_use]
    pub fn new(config: RealEstateConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Creates a client that shares an existing HTTP connection pool.
    #[must_use]
    pub const fn with_client(client: reqwest::Client, config: RealEstateConfig) -> Self {
        Self { client, config }
    }

    /// A GET against `url` carrying the API key.
    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .query(&[("zws-id", self.config.api_key.as_str())])
    }

    fn deep_search_request(&self, street: &str, city_state_zip: &str) -> reqwest::RequestBuilder {
        self.get(&self.config.deep_search_url)
            .query(&[("address", street), ("citystatezip", city_state_zip)])
    }

    fn region_children_request(&self) -> reqwest::RequestBuilder {
        self.get(&self.config.region_children_url).query(&[
            ("state", self.config.state.as_str()),
            ("city", self.config.city.as_str()),
            ("childtype", self.config.child_type.as_str()),
        ])
    }
}

/// Sends `request` and returns the body text of a successful response.
async fn get_text(request: reqwest::RequestBuilder) -> Result<String, RealEstateError> {
    let resp = request.send().await?.error_for_status()?;
    Ok(resp.text().await?)
}

#[async_trait]
impl RealEstateLookup for ZillowClient {
    async fn resolve_address(
        &self,
        street: &str,
        city_state_zip: &str,
    ) -> Result<HouseRecord, RealEstateError> {
        log::info!("Resolving address {street:?} / {city_state_zip:?}");
        let body = get_text(self.deep_search_request(street, city_state_zip)).await?;
        let house = parse_house(&body)?;
        log::debug!(
            "Resolved {:?} to ({}, {})",
            house.address,
            house.latitude,
            house.longitude
        );
        Ok(house)
    }

    async fn neighborhoods(&self) -> Result<NeighborhoodTable, RealEstateError> {
        log::info!(
            "Fetching {} regions for {}, {}",
            self.config.child_type,
            self.config.city,
            self.config.state
        );
        let body = get_text(self.region_children_request()).await?;
        let table = parse_neighborhoods(&body)?;
        log::info!("Loaded {} neighborhoods", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> RealEstateConfig {
        RealEstateConfig {
            deep_search_url: "http://127.0.0.1:9/GetDeepSearchResults.htm".to_string(),
            region_children_url: "http://127.0.0.1:9/GetRegionChildren.htm".to_string(),
            city: "Seattle".to_string(),
            state: "WA".to_string(),
            child_type: "neighborhood".to_string(),
            api_key: "test-key".to_string(),
        }
    }

    fn query_pairs(request: &reqwest::Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn pair(key: &str, value: &str) -> (String, String) {
        (key.to_string(), value.to_string())
    }

    #[test]
    fn deep_search_request_carries_key_and_address() {
        let client = ZillowClient::new(unreachable_config());
        let request = client
            .deep_search_request("315 Howe St.", "Seattle WA, 98109")
            .build()
            .unwrap();

        assert_eq!(request.url().path(), "/GetDeepSearchResults.htm");
        assert_eq!(
            query_pairs(&request),
            [
                pair("zws-id", "test-key"),
                pair("address", "315 Howe St."),
                pair("citystatezip", "Seattle WA, 98109"),
            ]
        );
    }

    #[test]
    fn region_children_request_names_city_and_child_type() {
        let client = ZillowClient::new(unreachable_config());
        let request = client.region_children_request().build().unwrap();

        assert_eq!(request.url().path(), "/GetRegionChildren.htm");
        assert_eq!(
            query_pairs(&request),
            [
                pair("zws-id", "test-key"),
                pair("state", "WA"),
                pair("city", "Seattle"),
                pair("childtype", "neighborhood"),
            ]
        );
    }

    #[tokio::test]
    async fn neighborhood_failure_is_returned_as_error() {
        let client = ZillowClient::new(unreachable_config());
        let result = client.neighborhoods().await;
        assert!(matches!(result, Err(RealEstateError::Http(_))));
    }

    #[tokio::test]
    async fn address_failure_is_returned_as_error() {
        let client = ZillowClient::new(unreachable_config());
        let result = client
            .resolve_address("315 Howe St.", "Seattle WA, 98109")
            .await;
        assert!(matches!(result, Err(RealEstateError::Http(_))));
    }
}
