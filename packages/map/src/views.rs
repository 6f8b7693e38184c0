//! The house-centric and neighborhood-centric map views.
//!
//! Every render is a full rebuild: the location is resolved, incidents are
//! re-fetched, the offense table is re-read, and the document is written
//! over the view's fixed output file.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crime_overlay_incident::{IncidentError, IncidentSource, OffenseNames, aggregate};
use crime_overlay_incident_models::CategoryGroups;
use crime_overlay_map_models::{Coordinate, MapDocument, ViewKind};
use crime_overlay_real_estate::{RealEstateError, RealEstateLookup};
use crime_overlay_real_estate_models::{HouseRecord, NeighborhoodTable};
use thiserror::Error;

use crate::layers::build_layers;
use crate::writer::write_document;
use crate::{MapConfig, MapError};

/// Errors from building or rendering a view.
#[derive(Debug, Error)]
pub enum ViewError {
    /// Incident fetch or offense table failure.
    #[error(transparent)]
    Incident(#[from] IncidentError),

    /// Location resolution failure.
    #[error(transparent)]
    RealEstate(#[from] RealEstateError),

    /// Rendering or output failure.
    #[error(transparent)]
    Map(#[from] MapError),

    /// The requested neighborhood is not in the city's table.
    #[error("Unknown neighborhood: {name}")]
    UnknownNeighborhood {
        /// The name that was requested.
        name: String,
    },
}

/// A document that has been written to disk.
#[derive(Debug, Clone)]
pub struct RenderedMap {
    /// Which view produced it.
    pub view: ViewKind,
    /// Where it was written.
    pub path: PathBuf,
    /// What was written.
    pub document: MapDocument,
}

/// Builds and renders the map views from injected data sources.
pub struct MapViews {
    incidents: Arc<dyn IncidentSource>,
    real_estate: Arc<dyn RealEstateLookup>,
    config: MapConfig,
    offense_names_path: PathBuf,
    output_dir: PathBuf,
}

impl MapViews {
    /// Creates the views.
    ///
    /// `offense_names_path` is the CSV offense table, re-read on every
    /// render. Documents are written under `output_dir`.
    #[must_use]
    pub fn new(
        incidents: Arc<dyn IncidentSource>,
        real_estate: Arc<dyn RealEstateLookup>,
        config: MapConfig,
        offense_names_path: PathBuf,
        output_dir: PathBuf,
    ) -> Self {
        Self {
            incidents,
            real_estate,
            config,
            offense_names_path,
            output_dir,
        }
    }

    /// Directory the documents are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fixed output path of `view`.
    #[must_use]
    pub fn output_path(&self, view: ViewKind) -> PathBuf {
        self.output_dir.join(view.output_filename())
    }

    /// Lists the city's neighborhoods.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::RealEstate`] if the lookup fails.
    pub async fn neighborhoods(&self) -> Result<NeighborhoodTable, ViewError> {
        Ok(self.real_estate.neighborhoods().await?)
    }

    /// Resolves a street address to a house.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::RealEstate`] if the lookup fails.
    pub async fn resolve_house(
        &self,
        street: &str,
        city_state_zip: &str,
    ) -> Result<HouseRecord, ViewError> {
        Ok(self
            .real_estate
            .resolve_address(street, city_state_zip)
            .await?)
    }

    /// Fetches recent incidents and groups them by category.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::Incident`] if the offense table cannot be read
    /// or the fetch fails.
    pub async fn crime_groups(&self) -> Result<CategoryGroups, ViewError> {
        let names = OffenseNames::load(&self.offense_names_path)?;
        let records = self.incidents.fetch_incidents().await?;
        Ok(aggregate(&records, &names))
    }

    /// Builds the neighborhood view for `name` from an already fetched
    /// neighborhood table.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError::UnknownNeighborhood`] if `name` is not in
    /// `neighborhoods`, or any incident error.
    pub async fn neighborhood_document(
        &self,
        neighborhoods: &NeighborhoodTable,
        name: &str,
    ) -> Result<MapDocument, ViewError> {
        let center = neighborhoods
            .get(name)
            .ok_or_else(|| ViewError::UnknownNeighborhood {
                name: name.to_string(),
            })?;
        let groups = self.crime_groups().await?;
        Ok(self.document(&groups, None, center, self.config.neighborhood_zoom))
    }

    /// Builds the house view for `house`.
    ///
    /// # Errors
    ///
    /// Returns any incident error.
    pub async fn house_document(&self, house: &HouseRecord) -> Result<MapDocument, ViewError> {
        let groups = self.crime_groups().await?;
        Ok(self.document(
            &groups,
            Some(house),
            house.coordinate(),
            self.config.house_zoom,
        ))
    }

    /// Builds the neighborhood view and writes it to its output file.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if building or writing fails.
    pub async fn render_neighborhood(
        &self,
        neighborhoods: &NeighborhoodTable,
        name: &str,
    ) -> Result<RenderedMap, ViewError> {
        let document = self.neighborhood_document(neighborhoods, name).await?;
        self.write(ViewKind::Neighborhood, document)
    }

    /// Resolves the address, builds the house view, and writes it to its
    /// output file.
    ///
    /// # Errors
    ///
    /// Returns [`ViewError`] if resolution, building, or writing fails.
    pub async fn render_house(
        &self,
        street: &str,
        city_state_zip: &str,
    ) -> Result<RenderedMap, ViewError> {
        let house = self.resolve_house(street, city_state_zip).await?;
        let document = self.house_document(&house).await?;
        self.write(ViewKind::House, document)
    }

    fn document(
        &self,
        groups: &CategoryGroups,
        house: Option<&HouseRecord>,
        center: Coordinate,
        zoom: u8,
    ) -> MapDocument {
        MapDocument {
            layers: build_layers(groups, house),
            center,
            zoom,
            theme: self.config.theme.clone(),
        }
    }

    fn write(&self, view: ViewKind, document: MapDocument) -> Result<RenderedMap, ViewError> {
        let path = write_document(&document, &self.output_path(view))?;
        Ok(RenderedMap {
            view,
            path,
            document,
        })
    }
}
