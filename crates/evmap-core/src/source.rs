//! Where the charger catalog comes from.
//!
//! Everything downstream takes a [`ChargerCatalog`], so replacing the static
//! file with a live feed only means adding another [`CatalogSource`].

use std::path::PathBuf;

use crate::catalog::{load_catalog, ChargerCatalog};
use crate::ConfigError;

pub trait CatalogSource {
    /// Produce the catalog. Called once at startup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the source cannot be read or validated.
    fn load(&self) -> Result<ChargerCatalog, ConfigError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// Catalog read from a YAML or JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileCatalogSource {
    pub path: PathBuf,
}

impl FileCatalogSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalogSource {
    fn load(&self) -> Result<ChargerCatalog, ConfigError> {
        load_catalog(&self.path)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalogSource;

impl CatalogSource for BuiltinCatalogSource {
    fn load(&self) -> Result<ChargerCatalog, ConfigError> {
        ChargerCatalog::builtin()
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// Pick the source for an optional configured path.
#[must_use]
pub fn source_for(path: Option<PathBuf>) -> Box<dyn CatalogSource + Send + Sync> {
    match path {
        Some(path) => Box::new(FileCatalogSource::new(path)),
        None => Box::new(BuiltinCatalogSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_path_uses_builtin() {
        let source = source_for(None);
        assert_eq!(source.describe(), "built-in catalog");
        assert_eq!(source.load().unwrap().len(), 4);
    }

    #[test]
    fn path_uses_file_source() {
        let source = source_for(Some(PathBuf::from("/tmp/nope.yaml")));
        assert_eq!(source.describe(), "file /tmp/nope.yaml");
        assert!(matches!(
            source.load(),
            Err(ConfigError::CatalogFileIo { .. })
        ));
    }
}
