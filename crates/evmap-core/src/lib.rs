pub mod app_config;
pub mod catalog;
pub mod config;
pub mod geo;
pub mod source;

pub use app_config::{AppConfig, Environment};
pub use catalog::{load_catalog, CatalogFile, ChargerCatalog, ChargerRecord};
pub use config::{load_app_config, load_app_config_from_env};
pub use geo::{Axis, CoordinateError, Coordinates};
pub use source::{source_for, BuiltinCatalogSource, CatalogSource, FileCatalogSource};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read catalog file {path}: {source}")]
    CatalogFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog YAML: {0}")]
    CatalogYaml(#[from] serde_yaml::Error),

    #[error("failed to parse catalog JSON: {0}")]
    CatalogJson(#[from] serde_json::Error),

    #[error("catalog validation failed: {0}")]
    Validation(String),
}
