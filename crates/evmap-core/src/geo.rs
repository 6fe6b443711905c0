//! Parsed coordinate pairs.
//!
//! Charger records carry their position as text. [`Coordinates::parse`] is
//! the single place that text becomes numbers; anything it rejects is
//! unlocatable and never reaches the map.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// A coordinate that could not be turned into a finite number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateError {
    #[error("unparseable {axis} {raw:?}")]
    Unparseable { axis: Axis, raw: String },
}

/// Decimal-degree position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Parse a latitude/longitude pair stored as text.
    ///
    /// Surrounding whitespace is ignored. Empty text, non-numeric text and
    /// non-finite values (`NaN`, `inf`) are all rejected.
    ///
    /// # Errors
    ///
    /// Returns [`CoordinateError::Unparseable`] naming the first axis that
    /// failed.
    pub fn parse(latitude: &str, longitude: &str) -> Result<Self, CoordinateError> {
        Ok(Self {
            latitude: parse_axis(Axis::Latitude, latitude)?,
            longitude: parse_axis(Axis::Longitude, longitude)?,
        })
    }

    /// Whether both components lie inside the valid degree ranges.
    ///
    /// Out-of-range positions are a data-quality concern only; distance
    /// computation accepts them as-is.
    #[must_use]
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

fn parse_axis(axis: Axis, raw: &str) -> Result<f64, CoordinateError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::Unparseable {
            axis,
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_decimal_text() {
        let c = Coordinates::parse("28.6315", "77.2167").unwrap();
        assert!((c.latitude - 28.6315).abs() < f64::EPSILON);
        assert!((c.longitude - 77.2167).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_trims_whitespace() {
        let c = Coordinates::parse(" -33.86 ", "151.21\n").unwrap();
        assert!((c.latitude + 33.86).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_rejects_non_numeric_latitude() {
        let err = Coordinates::parse("abc", "77.2167").unwrap_err();
        assert_eq!(
            err,
            CoordinateError::Unparseable {
                axis: Axis::Latitude,
                raw: "abc".to_string()
            }
        );
    }

    #[test]
    fn parse_rejects_empty_longitude() {
        let err = Coordinates::parse("28.6", "").unwrap_err();
        assert!(matches!(
            err,
            CoordinateError::Unparseable {
                axis: Axis::Longitude,
                ..
            }
        ));
    }

    #[test]
    fn parse_rejects_non_finite_values() {
        assert!(Coordinates::parse("NaN", "0").is_err());
        assert!(Coordinates::parse("0", "inf").is_err());
    }

    #[test]
    fn in_range_bounds_are_inclusive() {
        assert!(Coordinates::new(90.0, -180.0).in_range());
        assert!(!Coordinates::new(90.5, 0.0).in_range());
        assert!(!Coordinates::new(0.0, 181.0).in_range());
    }

    #[test]
    fn error_message_names_axis_and_raw_text() {
        let err = Coordinates::parse("12", "east").unwrap_err();
        assert_eq!(err.to_string(), "unparseable longitude \"east\"");
    }
}
