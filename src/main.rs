//! `plotwalk` - walking directions over a cemetery road network.
//!
//! Loads road records from a JSON file, builds the routing graph and prints
//! routes as text, JSON or GeoJSON. Logging goes to stderr and is filtered by
//! `RUST_LOG` (default `info`).

mod cli;
mod commands;
mod config;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use config::PlotwalkConfig;
use error::Result;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = PlotwalkConfig::load(args.config.as_deref())?;

    match args.cmd {
        Command::Route {
            roads,
            from,
            destinations,
            format,
            fallback,
            snap_max,
        } => {
            if fallback {
                config.route.allow_straight_line_fallback = true;
            }
            if let Some(meters) = snap_max {
                config.route.snap_max_distance_meters = meters;
            }
            config.route.validate()?;

            let graph = commands::load_graph(&roads, &config);
            let results = commands::route_all(&graph, from, &destinations, &config);
            println!("{}", commands::render_routes(&results, format)?);
        }
        Command::Inspect { roads } => {
            let graph = commands::load_graph(&roads, &config);
            print!("{}", commands::render_stats(&graph));
        }
    }
    Ok(())
}
