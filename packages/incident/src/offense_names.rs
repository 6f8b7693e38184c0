//! Offense code to human-readable name lookup.
//!
//! The table is a headerless two-column CSV (`code,description`). It is
//! read fresh on every call to [`OffenseNames::load`].

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use crate::IncidentError;

/// Mapping from short offense codes to expanded descriptions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OffenseNames(BTreeMap<String, String>);

impl OffenseNames {
    /// Reads the table from a CSV file.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentError`] if the file cannot be opened or is not
    /// valid CSV.
    pub fn load(path: &Path) -> Result<Self, IncidentError> {
        let file = std::fs::File::open(path)?;
        let names = Self::from_reader(file)?;
        log::debug!(
            "Loaded {} offense names from {}",
            names.len(),
            path.display()
        );
        Ok(names)
    }

    /// Reads the table from any CSV source. Rows with fewer than two
    /// columns are ignored; later rows win on duplicate codes.
    ///
    /// # Errors
    ///
    /// Returns [`IncidentError::Csv`] if the input is not valid CSV.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, IncidentError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut names = BTreeMap::new();
        for row in csv_reader.records() {
            let row = row?;
            let (Some(code), Some(description)) = (row.get(0), row.get(1)) else {
                continue;
            };
            if code.is_empty() {
                continue;
            }
            names.insert(code.to_string(), description.to_string());
        }

        Ok(Self(names))
    }

    /// Returns the description for `code`, or `code` itself when the table
    /// has no entry for it.
    #[must_use]
    pub fn label_for<'a>(&'a self, code: &'a str) -> &'a str {
        self.0.get(code).map_or(code, String::as_str)
    }

    /// Number of known codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
