//! Proximity annotation: catalog + optional user position → display rows.
//!
//! Pure and recomputed on every fix or selection. Catalog order is kept;
//! nothing is sorted by distance.

use evmap_core::{ChargerCatalog, ChargerRecord, CoordinateError, Coordinates};
use serde::{Deserialize, Serialize};

use crate::connector::{resolve_connectors, ConnectorDescriptor};
use crate::distance::distance_km;
use crate::position::UserPosition;

/// Shown wherever a distance would go before the first position fix.
pub const DISTANCE_PLACEHOLDER: &str = "... Km";

/// Great-circle distance in kilometres. Displays with two decimals.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Distance(f64);

impl Distance {
    #[must_use]
    pub fn from_km(km: f64) -> Self {
        Self(km)
    }

    #[must_use]
    pub fn km(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Distance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} Km", self.0)
    }
}

/// Distance text, or [`DISTANCE_PLACEHOLDER`] when there is no position.
#[must_use]
pub fn distance_label(distance: Option<Distance>) -> String {
    distance.map_or_else(|| DISTANCE_PLACEHOLDER.to_string(), |d| d.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedCharger {
    /// Position of the record in the catalog, counting unlocatable ones.
    pub catalog_index: usize,
    #[serde(flatten)]
    pub record: ChargerRecord,
    pub coordinates: Coordinates,
    /// Present only when a user position was supplied. Serialized as
    /// `distance_km`; the flattened record keeps its own feed `distance`.
    #[serde(rename = "distance_km", default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<Distance>,
    pub connectors: Vec<ConnectorDescriptor>,
}

impl AnnotatedCharger {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.record.id
    }

    #[must_use]
    pub fn distance_label(&self) -> String {
        distance_label(self.distance)
    }
}

/// A record left out of the annotated view because it cannot be placed.
#[derive(Debug, Clone, PartialEq)]
pub struct ExcludedRecord {
    pub catalog_index: usize,
    pub id: String,
    pub error: CoordinateError,
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationReport {
    pub chargers: Vec<AnnotatedCharger>,
    pub excluded: Vec<ExcludedRecord>,
}

/// Annotate a catalog for display. See [`annotate_records`].
#[must_use]
pub fn annotate(catalog: &ChargerCatalog, position: Option<UserPosition>) -> Vec<AnnotatedCharger> {
    annotate_records(catalog.records(), position).chargers
}

/// Annotate records, keeping catalog order.
///
/// Records whose coordinates do not parse are excluded and reported; the
/// rest always come back. Distances are attached only when `position` is
/// present.
#[must_use]
pub fn annotate_records(
    records: &[ChargerRecord],
    position: Option<UserPosition>,
) -> AnnotationReport {
    let mut report = AnnotationReport::default();

    for (catalog_index, record) in records.iter().enumerate() {
        let coordinates = match record.coordinates() {
            Ok(c) => c,
            Err(error) => {
                tracing::warn!(id = %record.id, %error, "excluding unlocatable charger");
                report.excluded.push(ExcludedRecord {
                    catalog_index,
                    id: record.id.clone(),
                    error,
                });
                continue;
            }
        };

        let distance =
            position.map(|p| Distance::from_km(distance_km(p.coordinates(), coordinates)));

        report.chargers.push(AnnotatedCharger {
            catalog_index,
            record: record.clone(),
            coordinates,
            distance,
            connectors: resolve_connectors(&record.connector_types),
        });
    }

    report
}

/// Look up a charger selected by id.
#[must_use]
pub fn find_charger<'a>(annotated: &'a [AnnotatedCharger], id: &str) -> Option<&'a AnnotatedCharger> {
    annotated.iter().find(|c| c.record.id == id)
}
