//! One-shot catalog commands: `chargers`, `show`, `connectors`, `validate`.

use evmap_core::{AppConfig, ChargerCatalog};
use evmap_locator::{
    annotate_records, resolve_connectors, AnnotatedCharger, ChargerMarker, DetailCard, MapRegion,
    ScreenState, UserMarker, UserPosition,
};
use serde::Serialize;

use crate::render::{self, OutputFormat};

#[derive(Debug, Serialize)]
struct ChargerListing<'a> {
    region: MapRegion,
    user: Option<UserMarker>,
    markers: Vec<ChargerMarker>,
    chargers: &'a [AnnotatedCharger],
}

/// Print every locatable charger in catalog order.
pub(crate) fn run_chargers(
    catalog: ChargerCatalog,
    config: &AppConfig,
    position: Option<UserPosition>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut screen = ScreenState::from_config(catalog, config);
    if let Some(position) = position {
        screen.apply_fix(position);
    }

    let annotated = screen.annotated();
    let markers: Vec<ChargerMarker> = annotated.iter().map(ChargerMarker::from_annotated).collect();

    match format {
        OutputFormat::Json => render::print_json(&ChargerListing {
            region: screen.region(),
            user: screen.user_marker(),
            markers,
            chargers: &annotated,
        }),
        OutputFormat::Text => {
            println!("{}", render::region_line(&screen.region()));
            for (charger, marker) in annotated.iter().zip(&markers) {
                println!("{}", render::charger_line(charger, marker.number));
                for connector in &charger.connectors {
                    println!("      {}", render::connector_line(connector));
                }
            }
            Ok(())
        }
    }
}

/// Print the detail card for `id`.
///
/// # Errors
///
/// Fails if the id is not in the catalog or its coordinates are unusable.
pub(crate) fn run_show(
    catalog: ChargerCatalog,
    config: &AppConfig,
    id: &str,
    position: Option<UserPosition>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut screen = ScreenState::from_config(catalog, config);
    if let Some(position) = position {
        screen.apply_fix(position);
    }

    if !screen.select(id) {
        anyhow::bail!("charger '{id}' not found or has no usable coordinates");
    }
    let card = screen
        .selected_card()
        .ok_or_else(|| anyhow::anyhow!("charger '{id}' disappeared from the annotated view"))?;

    match format {
        OutputFormat::Json => render::print_json(&card),
        OutputFormat::Text => {
            print!("{}", render::detail_card(&card));
            Ok(())
        }
    }
}

pub(crate) fn run_connectors(codes: &[String], format: OutputFormat) -> anyhow::Result<()> {
    let descriptors = resolve_connectors(codes);
    match format {
        OutputFormat::Json => render::print_json(&descriptors),
        OutputFormat::Text => {
            for d in &descriptors {
                println!("{:<14} {}", d.code, render::connector_line(d));
            }
            Ok(())
        }
    }
}

#[derive(Debug, Default, Serialize)]
struct ValidationSummary {
    chargers: usize,
    locatable: usize,
    unlocatable: Vec<Issue>,
    out_of_range: Vec<Issue>,
    unrecognized_connectors: Vec<Issue>,
}

#[derive(Debug, Serialize)]
struct Issue {
    id: String,
    detail: String,
}

impl ValidationSummary {
    fn issue_count(&self) -> usize {
        self.unlocatable.len() + self.out_of_range.len() + self.unrecognized_connectors.len()
    }
}

fn summarize(catalog: &ChargerCatalog) -> ValidationSummary {
    let report = annotate_records(catalog.records(), None);
    let mut summary = ValidationSummary {
        chargers: catalog.len(),
        locatable: report.chargers.len(),
        ..ValidationSummary::default()
    };

    for excluded in &report.excluded {
        summary.unlocatable.push(Issue {
            id: excluded.id.clone(),
            detail: excluded.error.to_string(),
        });
    }

    for charger in &report.chargers {
        if !charger.coordinates.in_range() {
            summary.out_of_range.push(Issue {
                id: charger.record.id.clone(),
                detail: format!(
                    "{},{} is outside valid degree ranges",
                    charger.coordinates.latitude, charger.coordinates.longitude
                ),
            });
        }
        for connector in charger.connectors.iter().filter(|c| !c.is_recognized()) {
            summary.unrecognized_connectors.push(Issue {
                id: charger.record.id.clone(),
                detail: format!("unrecognized connector label in {:?}", connector.code),
            });
        }
    }

    summary
}

/// Report data-quality problems in the catalog.
///
/// # Errors
///
/// Returns an error (non-zero exit) when any issue is found.
pub(crate) fn run_validate(catalog: &ChargerCatalog, format: OutputFormat) -> anyhow::Result<()> {
    let summary = summarize(catalog);

    match format {
        OutputFormat::Json => render::print_json(&summary)?,
        OutputFormat::Text => {
            println!(
                "{} charger(s), {} locatable",
                summary.chargers, summary.locatable
            );
            let sections = [
                ("unlocatable", &summary.unlocatable),
                ("out of range", &summary.out_of_range),
                ("unrecognized connectors", &summary.unrecognized_connectors),
            ];
            for (title, issues) in sections {
                for issue in issues {
                    println!("{title}: {}: {}", issue.id, issue.detail);
                }
            }
        }
    }

    let count = summary.issue_count();
    if count > 0 {
        anyhow::bail!("catalog has {count} issue(s)");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use evmap_core::ChargerRecord;

    use super::*;

    fn record(id: &str, lat: &str, lng: &str, connectors: &[&str]) -> ChargerRecord {
        ChargerRecord {
            id: id.to_string(),
            name: id.to_string(),
            address: "x".to_string(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            connector_types: connectors.iter().map(ToString::to_string).collect(),
            distance: None,
            distance_metrics: None,
        }
    }

    #[test]
    fn builtin_catalog_is_clean() {
        let summary = summarize(&ChargerCatalog::builtin().unwrap());
        assert_eq!(summary.chargers, 4);
        assert_eq!(summary.locatable, 4);
        assert_eq!(summary.issue_count(), 0);
        assert!(run_validate(&ChargerCatalog::builtin().unwrap(), OutputFormat::Json).is_ok());
    }

    #[test]
    fn summarize_collects_each_issue_kind() {
        let catalog = ChargerCatalog::new(vec![
            record("bad", "abc", "1", &[]),
            record("far", "95", "10", &["lvl1dc-1"]),
            record("odd", "10", "10", &["fastdc-1", "normalac-2"]),
        ])
        .unwrap();
        let summary = summarize(&catalog);
        assert_eq!(summary.locatable, 2);
        assert_eq!(summary.unlocatable[0].id, "bad");
        assert_eq!(summary.out_of_range[0].id, "far");
        assert_eq!(summary.unrecognized_connectors.len(), 1);
        assert!(summary.unrecognized_connectors[0].detail.contains("fastdc-1"));
        assert_eq!(summary.issue_count(), 3);
        assert!(run_validate(&catalog, OutputFormat::Text).is_err());
    }

    #[test]
    fn show_unknown_id_fails() {
        let config = test_config();
        let result = run_show(
            ChargerCatalog::builtin().unwrap(),
            &config,
            "zzz",
            None,
            OutputFormat::Text,
        );
        assert!(result.is_err());
    }

    fn test_config() -> AppConfig {
        AppConfig {
            env: evmap_core::Environment::Test,
            log_level: "info".to_string(),
            catalog_path: None,
            default_center: evmap_core::Coordinates::new(28.6315, 77.2167),
            region_delta: 0.012,
            min_movement_meters: 5.0,
            fastest_interval_ms: 2000,
        }
    }
}
