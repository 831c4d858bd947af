use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use super::{
    dijkstra::dijkstra,
    snap::{Anchor, anchor_point},
    steps::route_to_steps,
    trim::{
        ROUTE_DEDUP_METERS, dedup_consecutive, push_end, trim_ahead_at_destination,
        trim_behind_at_user,
    },
};
use crate::{Error, GeoPoint, Meters, RoadGraph, geometry::polyline_length};

/// Tuning for [`build_routed_polyline`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteOptions {
    /// How close the visitor must be to the route for it to be cut at them
    pub user_trim_threshold_meters: Meters,
    /// How close the destination must be to the route for it to be cut there
    pub destination_trim_threshold_meters: Meters,
    /// Max distance from a road for either end to join the graph
    pub snap_max_distance_meters: Meters,
    /// Draw a straight line when the road network has no path
    pub allow_straight_line_fallback: bool,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            user_trim_threshold_meters: 25.0,
            destination_trim_threshold_meters: 25.0,
            snap_max_distance_meters: 60.0,
            allow_straight_line_fallback: false,
        }
    }
}

impl RouteOptions {
    /// # Errors
    ///
    /// Returns an error if a distance is negative or not finite
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("user_trim_threshold_meters", self.user_trim_threshold_meters),
            (
                "destination_trim_threshold_meters",
                self.destination_trim_threshold_meters,
            ),
            ("snap_max_distance_meters", self.snap_max_distance_meters),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidData(format!(
                    "{name} must be a non-negative distance, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Which code path produced a [`RouteResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteSource {
    RoadGraph,
    FallbackLine,
    NoGraph,
    StartTooFarFromRoad,
    EndTooFarFromRoad,
    NoPathOnRoads,
}

impl RouteSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoadGraph => "road_graph",
            Self::FallbackLine => "fallback_line",
            Self::NoGraph => "no_graph",
            Self::StartTooFarFromRoad => "start_too_far_from_road",
            Self::EndTooFarFromRoad => "end_too_far_from_road",
            Self::NoPathOnRoads => "no_path_on_roads",
        }
    }

    /// Whether a polyline was produced
    pub fn is_routed(self) -> bool {
        matches!(self, Self::RoadGraph | Self::FallbackLine)
    }
}

impl fmt::Display for RouteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics for a routing request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteDebug {
    pub used: RouteSource,
    pub start: Option<Anchor>,
    pub end: Option<Anchor>,
}

/// Outcome of a routing request.
///
/// Failures are not errors: they come back with an empty polyline and the
/// reason in `debug_info.used`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub user: GeoPoint,
    pub destination: GeoPoint,
    pub polyline: Vec<GeoPoint>,
    pub graph_path: Vec<GeoPoint>,
    pub distance_meters: Meters,
    pub steps: Vec<String>,
    pub debug_info: RouteDebug,
}

impl RouteResult {
    fn failed(
        user: GeoPoint,
        destination: GeoPoint,
        used: RouteSource,
        start: Option<Anchor>,
        end: Option<Anchor>,
    ) -> Self {
        debug!("No route from {user} to {destination}: {used}");
        Self {
            user,
            destination,
            polyline: Vec::new(),
            graph_path: Vec::new(),
            distance_meters: 0.0,
            steps: Vec::new(),
            debug_info: RouteDebug { used, start, end },
        }
    }

    pub fn is_routed(&self) -> bool {
        !self.polyline.is_empty()
    }
}

/// Computes a walking route from `user` to `destination` over `graph`.
///
/// The shared graph is never modified: both ends are snapped onto a
/// request-local copy. A routed polyline starts at `user` and ends at
/// `destination`; a destination off the road is reached by a straight last
/// stretch from the point where it joined the graph.
pub fn build_routed_polyline(
    user: GeoPoint,
    destination: GeoPoint,
    graph: &RoadGraph,
    options: &RouteOptions,
) -> RouteResult {
    if graph.is_empty() {
        return RouteResult::failed(user, destination, RouteSource::NoGraph, None, None);
    }

    let mut graph = graph.clone();
    let max_snap = options.snap_max_distance_meters;
    let Some(start) = anchor_point(&mut graph, user, max_snap) else {
        return RouteResult::failed(
            user,
            destination,
            RouteSource::StartTooFarFromRoad,
            None,
            None,
        );
    };
    let Some(end) = anchor_point(&mut graph, destination, max_snap) else {
        return RouteResult::failed(
            user,
            destination,
            RouteSource::EndTooFarFromRoad,
            Some(start),
            None,
        );
    };

    let path = dijkstra(&graph, start.key(), end.key());
    if path.is_empty() {
        if options.allow_straight_line_fallback {
            let line = dedup_consecutive(&[user, destination], ROUTE_DEDUP_METERS);
            return finish(
                user,
                destination,
                &line,
                Vec::new(),
                RouteDebug {
                    used: RouteSource::FallbackLine,
                    start: Some(start),
                    end: Some(end),
                },
                options,
            );
        }
        return RouteResult::failed(
            user,
            destination,
            RouteSource::NoPathOnRoads,
            Some(start),
            Some(end),
        );
    }

    let graph_path: Vec<GeoPoint> = path.iter().map(|key| key.point()).collect();
    let mut core = Vec::with_capacity(graph_path.len() + 2);
    if let Anchor::Edge { point, .. } = start {
        core.push(point);
    }
    core.extend_from_slice(&graph_path);
    if let Anchor::Edge { point, .. } = end {
        core.push(point);
    }
    let core = dedup_consecutive(&core, ROUTE_DEDUP_METERS);

    finish(
        user,
        destination,
        &core,
        graph_path,
        RouteDebug {
            used: RouteSource::RoadGraph,
            start: Some(start),
            end: Some(end),
        },
        options,
    )
}

fn finish(
    user: GeoPoint,
    destination: GeoPoint,
    core: &[GeoPoint],
    graph_path: Vec<GeoPoint>,
    debug_info: RouteDebug,
    options: &RouteOptions,
) -> RouteResult {
    let mut polyline = trim_behind_at_user(core, user, options.user_trim_threshold_meters);
    // off-road destinations keep the overland stretch from the snapped end
    push_end(&mut polyline, destination);
    let polyline = trim_ahead_at_destination(
        &polyline,
        destination,
        options.destination_trim_threshold_meters,
    );
    let distance_meters = polyline_length(&polyline);
    let steps = route_to_steps(&polyline);

    debug!(
        "Routed {user} -> {destination} via {}: {} points, {distance_meters:.1} m",
        debug_info.used,
        polyline.len()
    );
    RouteResult {
        user,
        destination,
        polyline,
        graph_path,
        distance_meters,
        steps,
        debug_info,
    }
}
