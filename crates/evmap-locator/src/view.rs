//! View models consumed by the map and the detail card.

use evmap_core::Coordinates;
use serde::{Deserialize, Serialize};

use crate::annotate::AnnotatedCharger;
use crate::position::UserPosition;

/// Marker 1 is the user's own "You" pin, so chargers start at 2.
pub const FIRST_CHARGER_MARKER: usize = 2;

pub const USER_MARKER_LABEL: &str = "You";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargerMarker {
    pub number: usize,
    pub id: String,
    pub coordinates: Coordinates,
    /// Omitted from the pin entirely until there is a position.
    pub distance_label: Option<String>,
}

impl ChargerMarker {
    #[must_use]
    pub fn from_annotated(charger: &AnnotatedCharger) -> Self {
        Self {
            number: charger.catalog_index + FIRST_CHARGER_MARKER,
            id: charger.record.id.clone(),
            coordinates: charger.coordinates,
            distance_label: charger.distance.map(|d| d.to_string()),
        }
    }
}

#[must_use]
pub fn charger_markers(annotated: &[AnnotatedCharger]) -> Vec<ChargerMarker> {
    annotated.iter().map(ChargerMarker::from_annotated).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMarker {
    pub coordinates: Coordinates,
    pub label: String,
}

impl UserMarker {
    #[must_use]
    pub fn at(position: UserPosition) -> Self {
        Self {
            coordinates: position.coordinates(),
            label: USER_MARKER_LABEL.to_string(),
        }
    }
}

/// Visible map area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub center: Coordinates,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl MapRegion {
    /// Centre on the user when known, otherwise on `default_center`.
    #[must_use]
    pub fn follow(position: Option<UserPosition>, default_center: Coordinates, delta: f64) -> Self {
        Self {
            center: position.map_or(default_center, UserPosition::coordinates),
            latitude_delta: delta,
            longitude_delta: delta,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Coordinates) -> bool {
        (point.latitude - self.center.latitude).abs() <= self.latitude_delta / 2.0
            && (point.longitude - self.center.longitude).abs() <= self.longitude_delta / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorRow {
    pub display_name: String,
    pub power: String,
    pub count_label: String,
}

/// Bottom card for the selected charger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailCard {
    pub id: String,
    pub title: String,
    pub address: String,
    pub distance_label: String,
    pub connectors: Vec<ConnectorRow>,
}

impl DetailCard {
    #[must_use]
    pub fn from_annotated(charger: &AnnotatedCharger) -> Self {
        Self {
            id: charger.record.id.clone(),
            title: charger.record.name.to_uppercase(),
            address: charger.record.address.clone(),
            distance_label: charger.distance_label(),
            connectors: charger
                .connectors
                .iter()
                .map(|c| ConnectorRow {
                    display_name: c.display_name.clone(),
                    power: c.power.clone(),
                    count_label: c.count_label(),
                })
                .collect(),
        }
    }
}
