//! Text and JSON output for the CLI.

use evmap_locator::{AnnotatedCharger, ConnectorDescriptor, DetailCard, MapRegion};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub(crate) fn from_json_flag(json: bool) -> Self {
        if json {
            Self::Json
        } else {
            Self::Text
        }
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// One compact JSON document per line, for streaming output.
pub(crate) fn print_json_line<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string(value)?);
    Ok(())
}

/// `Level 2 DC  50kW Fast Charging  x2`; unknown labels show the raw code.
pub(crate) fn connector_line(connector: &ConnectorDescriptor) -> String {
    if connector.is_recognized() {
        format!(
            "{}  {}  {}",
            connector.display_name,
            connector.power,
            connector.count_label()
        )
    } else {
        format!("({})  {}", connector.code, connector.count_label())
    }
}

/// `#2  a001  expressway charging  2.10 Km`
pub(crate) fn charger_line(charger: &AnnotatedCharger, marker_number: usize) -> String {
    format!(
        "#{marker_number:<3} {:<6} {:<42} {}",
        charger.record.id,
        charger.record.name,
        charger.distance_label()
    )
}

pub(crate) fn region_line(region: &MapRegion) -> String {
    format!(
        "region centre {:.4},{:.4} span {}°",
        region.center.latitude, region.center.longitude, region.latitude_delta
    )
}

pub(crate) fn detail_card(card: &DetailCard) -> String {
    let mut out = format!(
        "{}\n{}, {}\nSUPPORTED CONNECTORS\n",
        card.title, card.address, card.distance_label
    );
    for row in &card.connectors {
        out.push_str(&format!(
            "  {:<12} {:<20} {}\n",
            row.display_name, row.power, row.count_label
        ));
    }
    out
}
