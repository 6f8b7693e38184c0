#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Seattle police incident fetching, offense-name lookup, and aggregation.
//!
//! Incidents are pulled from the City of Seattle Socrata endpoint through
//! the [`IncidentSource`] trait, labeled with human-readable offense names
//! from [`offense_names::OffenseNames`], and bucketed by category with
//! [`aggregate::aggregate`].

pub mod aggregate;
pub mod offense_names;
pub mod socrata;

use async_trait::async_trait;
use crime_overlay_incident_models::IncidentRecord;

pub use aggregate::aggregate;
pub use offense_names::OffenseNames;
pub use socrata::{SocrataConfig, SocrataIncidentSource};

/// Errors that can occur while fetching or labeling incidents.
#[derive(Debug, thiserror::Error)]
pub enum IncidentError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("Incident endpoint returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// The offense-name table could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O error (offense table read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A provider of recent police incidents.
#[async_trait]
pub trait IncidentSource: Send + Sync {
    /// Fetches the most recent incidents, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentError`] if the request or response parsing fails.
    async fn fetch_incidents(&self) -> Result<Vec<IncidentRecord>, IncidentError>;
}
