//! Interaction state of the charger map screen.
//!
//! Owns the position slot and the current selection. Every query
//! re-annotates from scratch; the catalog is small and nothing is cached.

use evmap_core::{AppConfig, ChargerCatalog, Coordinates};

use crate::annotate::{annotate, find_charger, AnnotatedCharger};
use crate::position::UserPosition;
use crate::view::{charger_markers, ChargerMarker, DetailCard, MapRegion, UserMarker};

#[derive(Debug, Clone)]
pub struct ScreenState {
    catalog: ChargerCatalog,
    position: Option<UserPosition>,
    selected: Option<String>,
    default_center: Coordinates,
    region_delta: f64,
}

impl ScreenState {
    #[must_use]
    pub fn new(catalog: ChargerCatalog, default_center: Coordinates, region_delta: f64) -> Self {
        Self {
            catalog,
            position: None,
            selected: None,
            default_center,
            region_delta,
        }
    }

    #[must_use]
    pub fn from_config(catalog: ChargerCatalog, config: &AppConfig) -> Self {
        Self::new(catalog, config.default_center, config.region_delta)
    }

    #[must_use]
    pub fn catalog(&self) -> &ChargerCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn position(&self) -> Option<UserPosition> {
        self.position
    }

    /// Replace the position with a new fix.
    pub fn apply_fix(&mut self, position: UserPosition) {
        self.position = Some(position);
    }

    /// Select a charger by id. Returns `false`, leaving the selection
    /// unchanged, if the id is unknown or the charger cannot be placed.
    pub fn select(&mut self, id: &str) -> bool {
        let locatable = self
            .catalog
            .get(id)
            .is_some_and(|record| record.coordinates().is_ok());
        if locatable {
            self.selected = Some(id.to_string());
        } else {
            tracing::warn!(id, "ignoring selection of unknown or unlocatable charger");
        }
        locatable
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected_id(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    #[must_use]
    pub fn annotated(&self) -> Vec<AnnotatedCharger> {
        annotate(&self.catalog, self.position)
    }

    #[must_use]
    pub fn markers(&self) -> Vec<ChargerMarker> {
        charger_markers(&self.annotated())
    }

    #[must_use]
    pub fn user_marker(&self) -> Option<UserMarker> {
        self.position.map(UserMarker::at)
    }

    #[must_use]
    pub fn region(&self) -> MapRegion {
        MapRegion::follow(self.position, self.default_center, self.region_delta)
    }

    #[must_use]
    pub fn selected_card(&self) -> Option<DetailCard> {
        let id = self.selected.as_deref()?;
        let annotated = self.annotated();
        find_charger(&annotated, id).map(DetailCard::from_annotated)
    }
}
