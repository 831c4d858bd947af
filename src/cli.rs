use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use plotwalk_core::GeoPoint;

#[derive(Parser, Debug)]
#[command(author, version, about = "Walking routes over cemetery road networks", long_about = None)]
pub struct Args {
    /// TOML file with `[graph]` and `[route]` tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Route from one position to one or more destinations
    Route {
        /// Road records (FeatureCollection, array or `{data: ...}` wrapper)
        #[arg(long)]
        roads: PathBuf,

        /// Start position as `lat,lng`
        #[arg(long, allow_hyphen_values = true)]
        from: GeoPoint,

        /// Destination as `lat,lng`; repeat for batch routing
        #[arg(long = "to", required = true, allow_hyphen_values = true)]
        destinations: Vec<GeoPoint>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Return a straight line when no road path exists
        #[arg(long)]
        fallback: bool,

        /// Override the maximum snap distance to the road network, in meters
        #[arg(long)]
        snap_max: Option<f64>,
    },
    /// Build the graph and print its statistics
    Inspect {
        #[arg(long)]
        roads: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Geojson,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_batch_route_with_negative_coordinates() {
        let args = Args::try_parse_from([
            "plotwalk",
            "route",
            "--roads",
            "roads.json",
            "--from",
            "-33.9,18.4",
            "--to",
            "-33.91,18.41",
            "--to",
            "-33.92,18.42",
            "--format",
            "geojson",
        ])
        .unwrap();

        let Command::Route {
            from,
            destinations,
            format,
            fallback,
            ..
        } = args.cmd
        else {
            panic!("expected route command");
        };
        assert_eq!(from, GeoPoint { lat: -33.9, lng: 18.4 });
        assert_eq!(destinations.len(), 2);
        assert_eq!(format, OutputFormat::Geojson);
        assert!(!fallback);
    }

    #[test]
    fn route_requires_a_destination() {
        let result = Args::try_parse_from([
            "plotwalk", "route", "--roads", "r.json", "--from", "1,2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn rejects_malformed_position() {
        let result = Args::try_parse_from([
            "plotwalk", "route", "--roads", "r.json", "--from", "north", "--to", "1,2",
        ]);
        assert!(result.is_err());
    }
}
