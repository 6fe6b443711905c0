mod chargers;
mod render;
mod track;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use evmap_core::{AppConfig, CatalogSource, ChargerCatalog, ConfigError};
use evmap_locator::UserPosition;
use tracing_subscriber::EnvFilter;

use render::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "evmap")]
#[command(about = "EV charger map command line interface")]
struct Cli {
    /// Catalog file (YAML or JSON); overrides `EVMAP_CATALOG_PATH`
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Optional user position given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Args)]
struct PositionArgs {
    /// User latitude in decimal degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// User longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

impl PositionArgs {
    fn position(self) -> Option<UserPosition> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Some(UserPosition::new(lat, lon)),
            _ => None,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List chargers with their marker numbers, distances and connectors
    Chargers {
        #[command(flatten)]
        position: PositionArgs,
    },
    /// Show the detail card for one charger
    Show {
        /// Charger id, e.g. `a001`
        id: String,

        #[command(flatten)]
        position: PositionArgs,
    },
    /// Resolve raw connector codes such as `lvl2dc-2`
    Connectors {
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Follow position fixes (`lat,lon[,rfc3339]` per line) and re-render on each one
    Track {
        /// Read fixes from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,

        /// Keep this charger's detail card on screen
        #[arg(long)]
        select: Option<String>,
    },
    /// Report unlocatable records and unrecognized connector labels
    Validate,
}

/// Log filter used when neither `RUST_LOG` nor a loaded config supplies one.
const DEFAULT_LOG_LEVEL: &str = "info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    run(cli, evmap_core::load_app_config).await
}

/// Dispatch a parsed command. Configuration is loaded only for commands
/// that use it.
async fn run<F>(cli: Cli, load_config: F) -> anyhow::Result<()>
where
    F: FnOnce() -> Result<AppConfig, ConfigError>,
{
    let format = OutputFormat::from_json_flag(cli.json);

    let command = match cli.command {
        Some(Commands::Connectors { codes }) => {
            init_tracing(DEFAULT_LOG_LEVEL)?;
            return chargers::run_connectors(&codes, format);
        }
        other => other,
    };

    let config = load_config()?;
    init_tracing(&config.log_level)?;
    let catalog_path = cli.catalog.or_else(|| config.catalog_path.clone());
    let catalog = load_catalog(catalog_path)?;

    match command {
        Some(Commands::Chargers { position }) => {
            chargers::run_chargers(catalog, &config, position.position(), format)
        }
        Some(Commands::Show { id, position }) => {
            chargers::run_show(catalog, &config, &id, position.position(), format)
        }
        Some(Commands::Track { input, select }) => {
            track::run_track(catalog, &config, input, select.as_deref(), format).await
        }
        Some(Commands::Validate) => chargers::run_validate(&catalog, format),
        Some(Commands::Connectors { codes }) => chargers::run_connectors(&codes, format),
        None => {
            print_summary(&catalog, &config);
            Ok(())
        }
    }
}

/// Install the stderr subscriber. `RUST_LOG` wins over `fallback`.
fn init_tracing(fallback: &str) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(fallback))?;
    if tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

fn load_catalog(path: Option<PathBuf>) -> anyhow::Result<ChargerCatalog> {
    let source = evmap_core::source_for(path);
    let catalog = source
        .load()
        .with_context(|| format!("loading charger catalog from {}", source.describe()))?;
    tracing::debug!(source = %source.describe(), chargers = catalog.len(), "catalog ready");
    Ok(catalog)
}

fn print_summary(catalog: &ChargerCatalog, config: &AppConfig) {
    println!(
        "evmap ready: {} charger(s), env {}, map centre {:.4},{:.4}",
        catalog.len(),
        config.env,
        config.default_center.latitude,
        config.default_center.longitude
    );
}
