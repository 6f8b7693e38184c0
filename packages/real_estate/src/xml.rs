//! Response parsing for the deep-search and region-children endpoints.
//!
//! Both endpoints wrap their payload in a namespaced root element with a
//! `<message>` status block and a `<response>` body. Only the elements the
//! application uses are modeled; everything else is ignored.

use crime_overlay_map_models::Coordinate;
use crime_overlay_real_estate_models::{HouseRecord, NeighborhoodTable};
use serde::Deserialize;

use crate::RealEstateError;

#[derive(Debug, Deserialize)]
struct Message {
    text: Option<String>,
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DeepSearchDocument {
    message: Option<Message>,
    response: Option<DeepSearchBody>,
}

#[derive(Debug, Deserialize)]
struct DeepSearchBody {
    results: Option<SearchResults>,
}

#[derive(Debug, Deserialize)]
struct SearchResults {
    #[serde(default)]
    result: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    address: Option<Address>,
    zestimate: Option<Zestimate>,
    bedrooms: Option<String>,
    bathrooms: Option<String>,
    #[serde(rename = "finishedSqFt")]
    finished_sq_ft: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Address {
    street: Option<String>,
    zipcode: Option<String>,
    city: Option<String>,
    state: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Zestimate {
    amount: Option<Amount>,
}

#[derive(Debug, Deserialize)]
struct Amount {
    #[serde(rename = "$text")]
    value: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RegionChildrenDocument {
    message: Option<Message>,
    response: Option<RegionChildrenBody>,
}

#[derive(Debug, Deserialize)]
struct RegionChildrenBody {
    list: Option<RegionList>,
}

#[derive(Debug, Deserialize)]
struct RegionList {
    #[serde(default)]
    region: Vec<Region>,
}

#[derive(Debug, Deserialize)]
struct Region {
    name: Option<String>,
    latitude: Option<String>,
    longitude: Option<String>,
}

/// Deep-search status codes meaning the address itself did not match
/// (unresolvable, no match, ambiguous without results).
const NO_MATCH_CODES: &[&str] = &["502", "507", "508"];

/// Fails with [`RealEstateError::Api`] when the status block reports a
/// non-zero code.
fn check_message(message: Option<&Message>) -> Result<(), RealEstateError> {
    let Some(message) = message else {
        return Ok(());
    };
    match message.code.as_deref().map(str::trim) {
        None | Some("0") => Ok(()),
        Some(code) => Err(RealEstateError::Api {
            code: code.to_string(),
            message: message.text.clone().unwrap_or_default(),
        }),
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, RealEstateError> {
    value.ok_or(RealEstateError::MissingField { field })
}

fn parse_coordinate(value: &str, field: &'static str) -> Result<f64, RealEstateError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RealEstateError::InvalidCoordinate {
            field,
            value: value.to_string(),
        })
}

/// Parses a deep-search response into the first matching house.
///
/// # Errors
///
/// Returns [`RealEstateError`] if the XML is malformed, the API reported
/// an error, nothing matched (including the no-match status codes), or an
/// expected element is missing.
pub fn parse_house(xml: &str) -> Result<HouseRecord, RealEstateError> {
    let document: DeepSearchDocument = quick_xml::de::from_str(xml)?;
    match check_message(document.message.as_ref()) {
        Err(RealEstateError::Api { code, message }) if NO_MATCH_CODES.contains(&code.as_str()) => {
            log::debug!("Address not found (code {code}): {message}");
            return Err(RealEstateError::NoResults);
        }
        result => result?,
    }

    let results = document
        .response
        .and_then(|body| body.results)
        .map(|results| results.result)
        .unwrap_or_default();

    let candidates = results.len();
    let Some(first) = results.into_iter().next() else {
        return Err(RealEstateError::NoResults);
    };
    if candidates > 1 {
        log::debug!("Address matched {candidates} properties, using the first");
    }

    let address = first.address.ok_or(RealEstateError::MissingField {
        field: "result/address",
    })?;
    let street = required(address.street, "address/street")?;
    let city = required(address.city, "address/city")?;
    let state = required(address.state, "address/state")?;
    let zipcode = required(address.zipcode, "address/zipcode")?;
    let latitude = parse_coordinate(
        &required(address.latitude, "address/latitude")?,
        "address/latitude",
    )?;
    let longitude = parse_coordinate(
        &required(address.longitude, "address/longitude")?,
        "address/longitude",
    )?;

    let amount = first
        .zestimate
        .and_then(|z| z.amount)
        .and_then(|a| a.value)
        .ok_or(RealEstateError::MissingField {
            field: "zestimate/amount",
        })?;

    Ok(HouseRecord {
        address: format!("{street}, {city} {state}, {zipcode}"),
        price: format!("${}", amount.trim()),
        bed: required(first.bedrooms, "bedrooms")?,
        bath: required(first.bathrooms, "bathrooms")?,
        sqft: required(first.finished_sq_ft, "finishedSqFt")?,
        latitude,
        longitude,
    })
}

/// Parses a region-children response into a neighborhood table.
///
/// Regions with a missing name or unusable coordinates are skipped.
///
/// # Errors
///
/// Returns [`RealEstateError`] if the XML is malformed, the API reported
/// an error, or the response has no region list.
pub fn parse_neighborhoods(xml: &str) -> Result<NeighborhoodTable, RealEstateError> {
    let document: RegionChildrenDocument = quick_xml::de::from_str(xml)?;
    check_message(document.message.as_ref())?;

    let list = document
        .response
        .and_then(|body| body.list)
        .ok_or(RealEstateError::MissingField {
            field: "response/list",
        })?;

    let mut table = NeighborhoodTable::new();
    for region in list.region {
        let Some(name) = region.name else {
            log::warn!("Skipping region without a name");
            continue;
        };
        let center = region
            .latitude
            .as_deref()
            .zip(region.longitude.as_deref())
            .and_then(|(lat, lon)| {
                Some(Coordinate::new(
                    parse_coordinate(lat, "region/latitude").ok()?,
                    parse_coordinate(lon, "region/longitude").ok()?,
                ))
            });
        match center {
            Some(center) => table.insert(name, center),
            None => log::warn!("Skipping region {name:?} without usable coordinates"),
        }
    }

    Ok(table)
}
