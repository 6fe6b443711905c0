//! Proximity and connector computations behind the charger map.
//!
//! [`annotate`] combines a [`evmap_core::ChargerCatalog`] with an optional
//! [`UserPosition`] into display rows; [`ScreenState`] drives it from
//! position fixes and selections, and [`LocationTracker`] carries fixes
//! between tasks.

pub mod annotate;
pub mod connector;
pub mod distance;
pub mod error;
pub mod feed;
pub mod position;
pub mod screen;
pub mod tracker;
pub mod view;

pub use annotate::{
    annotate, annotate_records, distance_label, find_charger, AnnotatedCharger, AnnotationReport,
    Distance, ExcludedRecord, DISTANCE_PLACEHOLDER,
};
pub use connector::{resolve_connector, resolve_connectors, ConnectorDescriptor, ConnectorKind};
pub use distance::{distance_km, haversine_km, EARTH_RADIUS_KM};
pub use error::LocatorError;
pub use feed::parse_fix_line;
pub use position::{PositionFix, UserPosition};
pub use screen::ScreenState;
pub use tracker::{FixFilter, LocationTracker, PositionSubscription, TrackerOptions};
pub use view::{charger_markers, ChargerMarker, ConnectorRow, DetailCard, MapRegion, UserMarker};
