use std::{fmt::Write as _, path::Path, time::Instant};

use geojson::FeatureCollection;
use plotwalk_core::{
    GeoPoint, RoadGraph, RouteResult, build_graph_from_json, build_routed_polyline,
    prelude::{format_distance, read_road_file},
};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{cli::OutputFormat, config::PlotwalkConfig, error::Result};

/// Reads road records and builds the graph.
///
/// An unreadable file yields an empty graph, so routing reports `no_graph`
/// instead of failing.
pub fn load_graph(roads: &Path, config: &PlotwalkConfig) -> RoadGraph {
    let start = Instant::now();
    let records = read_road_file(roads);
    if records.is_empty() {
        warn!("No road records read from {}", roads.display());
    }
    let graph = build_graph_from_json(&records, &config.graph);
    debug!("Loaded {} in {:?}", roads.display(), start.elapsed());
    graph
}

/// Routes from `from` to every destination in parallel over one shared graph
pub fn route_all(
    graph: &RoadGraph,
    from: GeoPoint,
    destinations: &[GeoPoint],
    config: &PlotwalkConfig,
) -> Vec<RouteResult> {
    destinations
        .par_iter()
        .map(|&destination| build_routed_polyline(from, destination, graph, &config.route))
        .collect()
}

pub fn render_routes(results: &[RouteResult], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(results)),
        OutputFormat::Json => match results {
            [single] => Ok(serde_json::to_string_pretty(single)?),
            _ => Ok(serde_json::to_string_pretty(results)?),
        },
        OutputFormat::Geojson => {
            let mut features = Vec::new();
            for result in results {
                features.extend(result.to_geojson()?.features);
            }
            let collection = FeatureCollection {
                bbox: None,
                features,
                foreign_members: None,
            };
            Ok(serde_json::to_string_pretty(&collection)?)
        }
    }
}

fn render_text(results: &[RouteResult]) -> String {
    let mut out = String::new();
    for (i, result) in results.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "Route to {}", result.destination);
        let _ = writeln!(out, "  source:   {}", result.debug_info.used);
        if !result.is_routed() {
            continue;
        }
        let _ = writeln!(out, "  distance: {}", format_distance(result.distance_meters));
        for (n, step) in result.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {step}", n + 1);
        }
    }
    out
}

pub fn render_stats(graph: &RoadGraph) -> String {
    let stats = graph.stats();
    format!(
        "nodes:      {}\nedges:      {}\nlength:     {}\ncomponents: {}\n",
        stats.nodes,
        stats.edges,
        format_distance(stats.total_length_meters),
        stats.components
    )
}
