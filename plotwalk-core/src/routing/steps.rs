//! Turn-by-turn instructions derived from a route polyline

use std::fmt;

use itertools::Itertools;

use crate::{
    GeoPoint, MIN_EDGE_METERS, Meters,
    geometry::{bearing_degrees, distance_meters},
};

/// Heading changes at least this large produce a turn instruction
const TURN_EMIT_DEGREES: f64 = 35.0;

const START_INSTRUCTION: &str = "Start walking from your current location";

/// Direction change between two consecutive legs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Straight,
    SlightLeft,
    SlightRight,
    Left,
    Right,
    SharpLeft,
    SharpRight,
}

impl Turn {
    /// Classifies a signed heading change in degrees, positive meaning
    /// clockwise (to the right).
    ///
    /// Changes under 25° are `Straight`. Steps only report turns of 35° or
    /// more, so that class never shows up in instructions.
    pub fn classify(delta: f64) -> Self {
        let magnitude = delta.abs();
        let right = delta > 0.0;
        match magnitude {
            m if m < 25.0 => Self::Straight,
            m if m < 60.0 => {
                if right {
                    Self::SlightRight
                } else {
                    Self::SlightLeft
                }
            }
            m if m < 130.0 => {
                if right {
                    Self::Right
                } else {
                    Self::Left
                }
            }
            _ => {
                if right {
                    Self::SharpRight
                } else {
                    Self::SharpLeft
                }
            }
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Straight => "continue straight",
            Self::SlightLeft => "turn slightly left",
            Self::SlightRight => "turn slightly right",
            Self::Left => "turn left",
            Self::Right => "turn right",
            Self::SharpLeft => "turn sharply left",
            Self::SharpRight => "turn sharply right",
        })
    }
}

/// `"412 m"` below a kilometer, `"1.25 km"` above
#[allow(clippy::cast_possible_truncation)]
pub fn format_distance(meters: Meters) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.round() as i64)
    } else {
        format!("{:.2} km", meters / 1000.0)
    }
}

/// Normalizes a bearing difference into `(-180, 180]`
fn signed_delta(from: f64, to: f64) -> f64 {
    let delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 { delta - 360.0 } else { delta }
}

/// Human-readable walking instructions for a route.
///
/// Always starts with a fixed start instruction and ends with the distance
/// left to the destination; in between, one instruction per heading change
/// of 35° or more.
pub fn route_to_steps(route: &[GeoPoint]) -> Vec<String> {
    if route.is_empty() {
        return Vec::new();
    }

    let legs: Vec<(Meters, f64)> = route
        .iter()
        .tuple_windows()
        .map(|(a, b)| (distance_meters(*a, *b), bearing_degrees(*a, *b)))
        .filter(|(distance, _)| *distance >= MIN_EDGE_METERS)
        .collect();

    let mut steps = vec![START_INSTRUCTION.to_string()];
    let Some((&(last_distance, _), _)) = legs.split_last() else {
        steps.push(format!("Continue {} to the destination", format_distance(0.0)));
        return steps;
    };

    let mut accumulated = 0.0;
    for ((distance, bearing), (_, next_bearing)) in legs.iter().copied().tuple_windows() {
        accumulated += distance;
        let delta = signed_delta(bearing, next_bearing);
        if delta.abs() >= TURN_EMIT_DEGREES {
            steps.push(format!(
                "Walk {}, then {}",
                format_distance(accumulated),
                Turn::classify(delta)
            ));
            accumulated = 0.0;
        }
    }

    steps.push(format!(
        "Continue {} to the destination",
        format_distance(accumulated + last_distance)
    ));
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn formats_distances() {
        assert_eq!(format_distance(0.0), "0 m");
        assert_eq!(format_distance(412.4), "412 m");
        assert_eq!(format_distance(999.4), "999 m");
        assert_eq!(format_distance(1000.0), "1.00 km");
        assert_eq!(format_distance(1254.0), "1.25 km");
    }

    #[test]
    fn classifies_turns() {
        assert_eq!(Turn::classify(10.0), Turn::Straight);
        assert_eq!(Turn::classify(-40.0), Turn::SlightLeft);
        assert_eq!(Turn::classify(90.0), Turn::Right);
        assert_eq!(Turn::classify(-90.0), Turn::Left);
        assert_eq!(Turn::classify(150.0), Turn::SharpRight);
        assert_eq!(Turn::classify(-180.0), Turn::SharpLeft);
    }

    #[test]
    fn normalizes_deltas() {
        assert!((signed_delta(350.0, 10.0) - 20.0).abs() < 1e-9);
        assert!((signed_delta(10.0, 350.0) + 20.0).abs() < 1e-9);
        assert!((signed_delta(0.0, 180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn l_shaped_route() {
        // North for two legs (~222 m), then east (~111 m)
        let route = [p(0.0, 0.0), p(0.001, 0.0), p(0.002, 0.0), p(0.002, 0.001)];
        let steps = route_to_steps(&route);
        assert_eq!(
            steps,
            vec![
                START_INSTRUCTION.to_string(),
                "Walk 222 m, then turn right".to_string(),
                "Continue 111 m to the destination".to_string(),
            ]
        );
    }

    #[test]
    fn gentle_bends_are_not_reported() {
        let route = [p(0.0, 0.0), p(0.001, 0.0), p(0.002, 0.000_3)];
        let steps = route_to_steps(&route);
        assert_eq!(steps.len(), 2);
        assert!(steps[1].starts_with("Continue 2"));
    }

    #[test]
    fn degenerate_routes() {
        assert!(route_to_steps(&[]).is_empty());
        let single = route_to_steps(&[p(0.0, 0.0)]);
        assert_eq!(single.len(), 2);
        assert_eq!(single[1], "Continue 0 m to the destination");
    }
}
