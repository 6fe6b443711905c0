//! `track`: follow a stream of position fixes and re-render after each one.
//!
//! A reader task parses fixes, throttles them and publishes to the tracker.
//! The render loop holds the only subscription and ends when the reader
//! finishes and drops the tracker.

use std::path::PathBuf;

use anyhow::Context;
use evmap_core::{AppConfig, ChargerCatalog};
use evmap_locator::{
    parse_fix_line, ChargerMarker, DetailCard, FixFilter, LocationTracker, MapRegion,
    ScreenState, TrackerOptions, UserPosition,
};
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

use crate::render::{self, OutputFormat};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct FeedStats {
    accepted: usize,
    throttled: usize,
    malformed: usize,
}

#[derive(Debug, Serialize)]
struct Frame {
    position: UserPosition,
    region: MapRegion,
    markers: Vec<ChargerMarker>,
    /// Ids of markers that fall outside `region`.
    off_screen: Vec<String>,
    selected: Option<DetailCard>,
}

impl Frame {
    fn build(screen: &ScreenState, position: UserPosition) -> Self {
        let region = screen.region();
        let markers = screen.markers();
        let off_screen = markers
            .iter()
            .filter(|m| !region.contains(m.coordinates))
            .map(|m| m.id.clone())
            .collect();
        Self {
            position,
            region,
            markers,
            off_screen,
            selected: screen.selected_card(),
        }
    }

    fn is_off_screen(&self, id: &str) -> bool {
        self.off_screen.iter().any(|off| off == id)
    }
}

pub(crate) async fn run_track(
    catalog: ChargerCatalog,
    config: &AppConfig,
    input: Option<PathBuf>,
    select: Option<&str>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut screen = ScreenState::from_config(catalog, config);
    if let Some(id) = select {
        if !screen.select(id) {
            anyhow::bail!("charger '{id}' not found or has no usable coordinates");
        }
    }

    let tracker = LocationTracker::new();
    let mut subscription = tracker.subscribe();
    let options = TrackerOptions::from_config(config);

    let reader = open_input(input).await?;
    let feed = tokio::spawn(feed_fixes(reader, tracker, options));

    let mut frames = 0usize;
    while let Ok(update) = subscription.changed().await {
        let Some(position) = update else { continue };
        screen.apply_fix(position);
        render_frame(&screen, position, format)?;
        frames += 1;
    }
    drop(subscription);

    let stats = feed.await.context("fix reader task panicked")??;
    tracing::info!(
        accepted = stats.accepted,
        throttled = stats.throttled,
        malformed = stats.malformed,
        frames,
        "position feed ended"
    );
    Ok(())
}

type FixReader = Box<dyn AsyncBufRead + Unpin + Send>;

async fn open_input(input: Option<PathBuf>) -> anyhow::Result<FixReader> {
    match input {
        Some(path) => {
            let file = tokio::fs::File::open(&path)
                .await
                .with_context(|| format!("opening fix file {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(tokio::io::stdin()))),
    }
}

/// Read fixes until EOF, publishing the ones the filter admits.
///
/// Owns the tracker, so returning closes every subscription.
async fn feed_fixes<R>(
    reader: R,
    tracker: LocationTracker,
    options: TrackerOptions,
) -> anyhow::Result<FeedStats>
where
    R: AsyncBufRead + Unpin,
{
    let mut filter = FixFilter::new(options);
    let mut stats = FeedStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        match parse_fix_line(&line, chrono::Utc::now()) {
            Ok(Some(fix)) => {
                if filter.admit(fix) {
                    tracker.publish(fix.position);
                    stats.accepted += 1;
                    // Let the render loop observe this fix before the next one replaces it.
                    tokio::task::yield_now().await;
                } else {
                    tracing::debug!(?fix, "fix throttled");
                    stats.throttled += 1;
                }
            }
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(%error, "skipping malformed fix");
                stats.malformed += 1;
            }
        }
    }

    Ok(stats)
}

fn render_frame(
    screen: &ScreenState,
    position: UserPosition,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let frame = Frame::build(screen, position);

    match format {
        OutputFormat::Json => render::print_json_line(&frame),
        OutputFormat::Text => {
            println!(
                "fix {:.5},{:.5}",
                frame.position.latitude, frame.position.longitude
            );
            for marker in &frame.markers {
                let note = if frame.is_off_screen(&marker.id) {
                    "  (off screen)"
                } else {
                    ""
                };
                println!(
                    "  #{:<3} {:<6} {}{note}",
                    marker.number,
                    marker.id,
                    marker.distance_label.as_deref().unwrap_or_default()
                );
            }
            if let Some(card) = &frame.selected {
                print!("{}", render::detail_card(card));
            }
            Ok(())
        }
    }
}
