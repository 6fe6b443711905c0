use chrono::{DateTime, Utc};
use evmap_core::Coordinates;
use serde::{Deserialize, Serialize};

/// The device's current location.
///
/// Always replaced as a whole; there is no way to update one component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserPosition {
    pub latitude: f64,
    pub longitude: f64,
}

impl UserPosition {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    #[must_use]
    pub fn coordinates(self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

impl From<Coordinates> for UserPosition {
    fn from(c: Coordinates) -> Self {
        Self::new(c.latitude, c.longitude)
    }
}

impl From<UserPosition> for Coordinates {
    fn from(p: UserPosition) -> Self {
        p.coordinates()
    }
}

/// A position report as delivered by the location collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionFix {
    pub position: UserPosition,
    pub received_at: DateTime<Utc>,
}

impl PositionFix {
    #[must_use]
    pub fn new(position: UserPosition, received_at: DateTime<Utc>) -> Self {
        Self {
            position,
            received_at,
        }
    }
}
