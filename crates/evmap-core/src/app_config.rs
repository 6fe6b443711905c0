use std::path::PathBuf;

use crate::geo::Coordinates;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// Catalog file to load. `None` means the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Map centre used until the first position fix arrives.
    pub default_center: Coordinates,
    /// Visible latitude/longitude span of the map region, in degrees.
    pub region_delta: f64,
    /// Fixes closer than this to the last accepted one are dropped.
    pub min_movement_meters: f64,
    /// Fixes arriving sooner than this after the last accepted one are dropped.
    pub fastest_interval_ms: u64,
}
