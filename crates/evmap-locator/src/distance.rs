//! Great-circle distance on a spherical Earth.

use evmap_core::Coordinates;

pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two decimal-degree points.
///
/// Symmetric, zero for identical inputs, and stable for antipodal points:
/// `a` is clamped to `[0, 1]` so rounding never feeds a negative value to
/// the square roots.
#[must_use]
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = ((d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[must_use]
pub fn distance_km(from: Coordinates, to: Coordinates) -> f64 {
    haversine_km(from.latitude, from.longitude, to.latitude, to.longitude)
}
