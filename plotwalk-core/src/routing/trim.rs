//! Trimming a routed polyline to the visitor's actual position and to the
//! destination, so the line neither starts behind the visitor nor runs past
//! the grave plot.

use crate::{
    GeoPoint, Meters,
    geometry::{closest_point_on_segment, distance_meters, project_point_on_infinite_line},
};

/// Consecutive route points closer than this are collapsed
pub const ROUTE_DEDUP_METERS: Meters = 0.25;

pub fn dedup_consecutive(points: &[GeoPoint], min_gap: Meters) -> Vec<GeoPoint> {
    let mut out: Vec<GeoPoint> = Vec::with_capacity(points.len());
    for &point in points {
        if out
            .last()
            .is_none_or(|&last| distance_meters(last, point) >= min_gap)
        {
            out.push(point);
        }
    }
    out
}

/// Starts the route at `user`.
///
/// When the user is within `threshold` of the route, everything before
/// their projection onto it is dropped. Otherwise the user is simply
/// prepended and has to walk to the first route point.
pub fn trim_behind_at_user(route: &[GeoPoint], user: GeoPoint, threshold: Meters) -> Vec<GeoPoint> {
    let closest = route
        .windows(2)
        .enumerate()
        .map(|(i, pair)| (i, closest_point_on_segment(user, pair[0], pair[1])))
        .min_by(|a, b| a.1.distance_meters.total_cmp(&b.1.distance_meters));

    let mut out = vec![user];
    match closest {
        Some((i, hit)) if hit.distance_meters <= threshold => {
            let segment_end = route[i + 1];
            if distance_meters(hit.point, segment_end) > ROUTE_DEDUP_METERS {
                out.push(hit.point);
            }
            out.extend_from_slice(&route[i + 1..]);
        }
        _ => out.extend_from_slice(route),
    }
    dedup_consecutive(&out, ROUTE_DEDUP_METERS)
}

/// Ends the route at `destination`.
///
/// The route is cut at the first segment the destination projects onto
/// within `threshold`. Failing that, a last point within `threshold` is
/// replaced by the destination. A destination further away leaves the route
/// as is: the last stretch is off-road.
pub fn trim_ahead_at_destination(
    route: &[GeoPoint],
    destination: GeoPoint,
    threshold: Meters,
) -> Vec<GeoPoint> {
    for (i, pair) in route.windows(2).enumerate() {
        let projection = project_point_on_infinite_line(pair[0], pair[1], destination);
        if !(0.0..=1.0).contains(&projection.t)
            || distance_meters(destination, projection.point) > threshold
        {
            continue;
        }

        let mut out = route[..=i].to_vec();
        if distance_meters(projection.point, pair[1]) > ROUTE_DEDUP_METERS {
            out.push(projection.point);
        } else {
            out.push(pair[1]);
        }
        let mut out = dedup_consecutive(&out, ROUTE_DEDUP_METERS);
        push_end(&mut out, destination);
        return out;
    }

    match route.split_last() {
        Some((&last, rest)) if distance_meters(last, destination) <= threshold => {
            let mut out = dedup_consecutive(rest, ROUTE_DEDUP_METERS);
            push_end(&mut out, destination);
            out
        }
        _ => route.to_vec(),
    }
}

/// Appends the final point, replacing a last point that is practically the same
pub(crate) fn push_end(route: &mut Vec<GeoPoint>, point: GeoPoint) {
    match route.last_mut() {
        Some(last) if distance_meters(*last, point) < ROUTE_DEDUP_METERS => *last = point,
        _ => route.push(point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    /// Straight east-bound route along the equator, one point every ~111 m
    fn route() -> Vec<GeoPoint> {
        (0..4).map(|i| p(0.0, f64::from(i) * 0.001)).collect()
    }

    #[test]
    fn dedup_drops_near_duplicates() {
        let points = [p(0.0, 0.0), p(0.0, 0.000_001), p(0.0, 0.001)];
        assert_eq!(dedup_consecutive(&points, ROUTE_DEDUP_METERS).len(), 2);
    }

    #[test]
    fn user_on_route_drops_what_is_behind() {
        // 5 m north of the road, 1.5 legs in
        let user = p(0.000_045, 0.0015);
        let trimmed = trim_behind_at_user(&route(), user, 25.0);
        assert_eq!(trimmed[0], user);
        assert!((trimmed[1].lng - 0.0015).abs() < 1e-9);
        assert!(trimmed[1].lat.abs() < 1e-12);
        assert_eq!(&trimmed[2..], &route()[2..]);
    }

    #[test]
    fn user_off_route_is_prepended() {
        let user = p(0.001, 0.0015);
        let trimmed = trim_behind_at_user(&route(), user, 25.0);
        assert_eq!(trimmed[0], user);
        assert_eq!(&trimmed[1..], &route()[..]);
    }

    #[test]
    fn destination_on_route_cuts_the_tail() {
        let destination = p(-0.000_09, 0.0012);
        let trimmed = trim_ahead_at_destination(&route(), destination, 25.0);
        assert_eq!(trimmed.len(), 4);
        assert_eq!(&trimmed[..2], &route()[..2]);
        assert!((trimmed[2].lng - 0.0012).abs() < 1e-9);
        assert_eq!(trimmed[3], destination);
    }

    #[test]
    fn destination_past_the_end_replaces_last_point() {
        let destination = p(0.0, 0.003_1);
        let trimmed = trim_ahead_at_destination(&route(), destination, 25.0);
        assert_eq!(trimmed.len(), 4);
        assert_eq!(trimmed[3], destination);
    }

    #[test]
    fn destination_next_to_a_route_point_ends_exactly_there() {
        let destination = p(0.0, 0.002_000_5);
        let trimmed = trim_ahead_at_destination(&route(), destination, 25.0);
        assert_eq!(trimmed.len(), 3);
        assert_eq!(trimmed[2], destination);
    }

    #[test]
    fn destination_far_off_route_is_left_alone() {
        let destination = p(0.001, 0.0015);
        assert_eq!(trim_ahead_at_destination(&route(), destination, 25.0), route());
    }
}
