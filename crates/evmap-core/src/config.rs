use crate::app_config::{AppConfig, Environment};
use crate::geo::Coordinates;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(invalid(var, format!("{raw} is not a finite number")))
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("EVMAP_ENV", "development"))?;
    let log_level = or_default("EVMAP_LOG_LEVEL", "info");
    let catalog_path = lookup("EVMAP_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let default_center = Coordinates::new(
        parse_f64("EVMAP_DEFAULT_LATITUDE", "28.6315")?,
        parse_f64("EVMAP_DEFAULT_LONGITUDE", "77.2167")?,
    );
    if !(-90.0..=90.0).contains(&default_center.latitude) {
        return Err(invalid(
            "EVMAP_DEFAULT_LATITUDE",
            format!("{} is outside [-90, 90]", default_center.latitude),
        ));
    }
    if !(-180.0..=180.0).contains(&default_center.longitude) {
        return Err(invalid(
            "EVMAP_DEFAULT_LONGITUDE",
            format!("{} is outside [-180, 180]", default_center.longitude),
        ));
    }

    let region_delta = parse_f64("EVMAP_REGION_DELTA", "0.012")?;
    if region_delta <= 0.0 {
        return Err(invalid(
            "EVMAP_REGION_DELTA",
            format!("{region_delta} must be greater than zero"),
        ));
    }

    let min_movement_meters = parse_f64("EVMAP_MIN_MOVEMENT_METERS", "5")?;
    if min_movement_meters < 0.0 {
        return Err(invalid(
            "EVMAP_MIN_MOVEMENT_METERS",
            format!("{min_movement_meters} must not be negative"),
        ));
    }

    let fastest_interval_ms = parse_u64("EVMAP_FASTEST_INTERVAL_MS", "2000")?;

    Ok(AppConfig {
        env,
        log_level,
        catalog_path,
        default_center,
        region_delta,
        min_movement_meters,
        fastest_interval_ms,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "EVMAP_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
