//! FeelsLike CLI
//!
//! Serves the browser frontend or answers one-off feels-like questions from
//! the terminal.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use feelslike::{
    DualUnitState, FeelsLikeConfig, FeelsLikeError, LocationResolver, LookupOutcome,
    NominatimGeocoder, OpenMeteoClient, ReportedPosition, Session, SessionSnapshot, UnitSystem,
    api::AppState, logging, models::Coordinates, web,
};
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "feelslike")]
#[command(author, version, about = "Weather lookup and feels-like temperature estimator", long_about = None)]
struct Cli {
    /// Path to a config file (default: <config dir>/feelslike/config.toml)
    #[arg(short, long, env = "FEELSLIKE_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web server
    Serve {
        /// Address to bind (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Compute feels-like temperatures for manual inputs, offline
    ///
    /// Example: feelslike compute --temperature 90 --humidity 50 --wind 0
    Compute {
        /// Air temperature in the unit system's temperature unit
        #[arg(short, long, allow_negative_numbers = true)]
        temperature: f64,

        /// Relative humidity in percent
        #[arg(long, allow_negative_numbers = true)]
        humidity: f64,

        /// Wind speed in the unit system's speed unit
        #[arg(short, long, allow_negative_numbers = true)]
        wind: f64,

        /// imperial (°F, mph) or metric (°C, km/h)
        #[arg(short, long)]
        units: Option<UnitSystem>,
    },

    /// Look up a place and show its current feels-like temperatures
    ///
    /// Example: feelslike lookup "Phoenix, AZ"
    Lookup {
        /// Place name, postal code or "lat,lon"
        query: String,

        #[arg(short, long)]
        units: Option<UnitSystem>,
    },

    /// Show current feels-like temperatures at a coordinate pair
    Locate {
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,

        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,

        #[arg(short, long)]
        units: Option<UnitSystem>,
    },
}

fn build_resolver(config: &FeelsLikeConfig) -> Result<LocationResolver> {
    let geocoder = NominatimGeocoder::new(&config.geocoding)
        .map_err(|e| FeelsLikeError::api(format!("Geocoding client: {e}")))?;
    let weather = OpenMeteoClient::new(&config.weather)
        .map_err(|e| FeelsLikeError::api(format!("Weather client: {e}")))?;
    Ok(LocationResolver::new(Arc::new(geocoder), Arc::new(weather)))
}

fn print_conditions(state: &DualUnitState) {
    let units = state.unit_system();
    let temperature_unit = units.temperature_unit();
    let wind_unit = units.wind_unit();
    let apparent = state.apparent();

    println!(
        "Temperature:        {:.1}{}",
        state.native_temperature(),
        temperature_unit.symbol()
    );
    println!("Humidity:           {:.0}%", state.humidity());
    println!(
        "Wind:               {:.1} {}",
        state.native_wind(),
        wind_unit.symbol()
    );
    println!(
        "Feels like (shade): {:.1}{}",
        apparent.shade.in_unit(temperature_unit),
        temperature_unit.symbol()
    );
    println!(
        "Feels like (sun):   {:.1}{}",
        apparent.sun.in_unit(temperature_unit),
        temperature_unit.symbol()
    );
}

fn report(outcome: LookupOutcome, session: &Session) -> Result<()> {
    match outcome {
        LookupOutcome::Resolved(location) => {
            println!("📍 {}", location.name);
            println!("   ({})", location.format_coordinates());
            if let Some(observed_at) = session.observed_at {
                println!("   observed {}", observed_at.format("%Y-%m-%d %H:%M UTC"));
            }
            print_conditions(&session.conditions);
            Ok(())
        }
        LookupOutcome::Failed(error) => bail!(error.user_message()),
        LookupOutcome::Skipped => bail!(FeelsLikeError::validation("Query is empty")),
        LookupOutcome::Ignored => bail!("Another lookup is already in progress"),
    }
}

fn log_snapshot(snapshot: &SessionSnapshot) -> Result<()> {
    debug!("Session snapshot: {}", serde_json::to_string(snapshot)?);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!("Command failed: {:#}", e);
            match e.downcast_ref::<FeelsLikeError>() {
                Some(error) => eprintln!("Error: {}", error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = FeelsLikeConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    match cli.command {
        Commands::Serve { host, port } => {
            let mut server = config.server.clone();
            if let Some(host) = host {
                server.host = host;
            }
            if let Some(port) = port {
                server.port = port;
            }

            let resolver = build_resolver(&config)?;
            let state = AppState::new(Session::shared(config.defaults.units), resolver);
            info!("Starting FeelsLike {}", feelslike::VERSION);
            web::run(&server, state).await?;
        }

        Commands::Compute {
            temperature,
            humidity,
            wind,
            units,
        } => {
            let mut state = DualUnitState::with_units(units.unwrap_or(config.defaults.units));
            state.set_temperature_native(temperature);
            state.set_humidity(humidity);
            state.set_wind_native(wind);
            print_conditions(&state);
        }

        Commands::Lookup { query, units } => {
            let resolver = build_resolver(&config)?;
            let session = Session::shared(units.unwrap_or(config.defaults.units));
            let outcome = resolver.search(&session, &query).await;

            let session = session.lock().await;
            log_snapshot(&session.snapshot())?;
            report(outcome, &session)?;
        }

        Commands::Locate {
            latitude,
            longitude,
            units,
        } => {
            let coordinates = Coordinates::new(latitude, longitude);
            if !coordinates.is_valid() {
                bail!(FeelsLikeError::validation(
                    "latitude must be -90 to 90, longitude must be -180 to 180"
                ));
            }

            let resolver = build_resolver(&config)?;
            let session = Session::shared(units.unwrap_or(config.defaults.units));
            let outcome = resolver
                .locate(&session, &ReportedPosition::located(coordinates))
                .await;

            let session = session.lock().await;
            log_snapshot(&session.snapshot())?;
            report(outcome, &session)?;
        }
    }

    Ok(())
}
