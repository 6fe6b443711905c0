use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::geo::{CoordinateError, Coordinates};
use crate::ConfigError;

const BUILTIN_CATALOG: &str = include_str!("../../../config/chargers.yaml");

/// One charging station as it appears in the catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChargerRecord {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Decimal degrees as text. Missing or unparseable values make the
    /// record unlocatable.
    #[serde(default)]
    pub latitude: String,
    #[serde(default)]
    pub longitude: String,
    /// Raw connector codes, e.g. `"lvl2dc-2"`.
    #[serde(default)]
    pub connector_types: Vec<String>,
    /// Precomputed distance shipped with the feed (e.g. `"2102"`). Not used
    /// for any computation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    /// Unit of [`ChargerRecord::distance`], e.g. `"metres"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_metrics: Option<String>,
}

impl ChargerRecord {
    /// Parse this record's textual coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError`] when either axis is not a finite number.
    pub fn coordinates(&self) -> Result<Coordinates, CoordinateError> {
        Coordinates::parse(&self.latitude, &self.longitude)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CatalogFile {
    pub chargers: Vec<ChargerRecord>,
}

/// Immutable, cheaply cloneable charger list.
///
/// Built once at startup and shared read-only for the lifetime of the
/// process.
#[derive(Debug, Clone)]
pub struct ChargerCatalog {
    records: Arc<[ChargerRecord]>,
}

impl ChargerCatalog {
    /// Build a catalog from already-deserialized records.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if an id is empty or repeated.
    pub fn new(records: Vec<ChargerRecord>) -> Result<Self, ConfigError> {
        validate_records(&records)?;
        Ok(Self {
            records: records.into(),
        })
    }

    /// The catalog compiled into the binary from `config/chargers.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded file fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_yaml(BUILTIN_CATALOG)
    }

    #[must_use]
    pub fn records(&self) -> &[ChargerRecord] {
        &self.records
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ChargerRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChargerRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a ChargerCatalog {
    type Item = &'a ChargerRecord;
    type IntoIter = std::slice::Iter<'a, ChargerRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Load and validate a charger catalog file.
///
/// Files ending in `.json` are read as JSON; everything else as YAML. Both
/// use the same `{ chargers: [...] }` shape.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_catalog(path: &Path) -> Result<ChargerCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let catalog = if is_json {
        let file: CatalogFile = serde_json::from_str(&content)?;
        ChargerCatalog::new(file.chargers)?
    } else {
        parse_yaml(&content)?
    };

    tracing::info!(
        path = %path.display(),
        chargers = catalog.len(),
        "loaded charger catalog"
    );
    Ok(catalog)
}

fn parse_yaml(content: &str) -> Result<ChargerCatalog, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(content)?;
    ChargerCatalog::new(file.chargers)
}

fn validate_records(records: &[ChargerRecord]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for record in records {
        if record.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "charger '{}' has an empty id",
                record.name
            )));
        }

        if !seen_ids.insert(record.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate charger id: '{}'",
                record.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
