use geo::Coord;

const PARALLEL_EPSILON: f64 = 1e-12;

/// Crossing point of two segments in a planar frame.
///
/// `t` is the parameter along the first segment, `u` along the second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentIntersection {
    pub t: f64,
    pub u: f64,
    pub point: Coord<f64>,
}

fn cross(a: Coord<f64>, b: Coord<f64>) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Intersection of segments AB and CD.
///
/// Returns `None` for parallel or collinear segments and when the crossing
/// lies outside either segment.
pub fn segment_intersection_xy(
    a: Coord<f64>,
    b: Coord<f64>,
    c: Coord<f64>,
    d: Coord<f64>,
) -> Option<SegmentIntersection> {
    let r = b - a;
    let s = d - c;
    let denom = cross(r, s);
    if denom.abs() < PARALLEL_EPSILON {
        return None;
    }

    let ac = c - a;
    let t = cross(ac, s) / denom;
    let u = cross(ac, r) / denom;
    if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
        return None;
    }

    Some(SegmentIntersection {
        t,
        u,
        point: a + r * t,
    })
}

/// Axis-aligned bounding box overlap of segments A1A2 and B1B2, each box
/// grown by `padding` on every side.
pub fn bounding_boxes_overlap(
    a1: Coord<f64>,
    a2: Coord<f64>,
    b1: Coord<f64>,
    b2: Coord<f64>,
    padding: f64,
) -> bool {
    let (a_min_x, a_max_x) = (a1.x.min(a2.x) - padding, a1.x.max(a2.x) + padding);
    let (a_min_y, a_max_y) = (a1.y.min(a2.y) - padding, a1.y.max(a2.y) + padding);
    let (b_min_x, b_max_x) = (b1.x.min(b2.x) - padding, b1.x.max(b2.x) + padding);
    let (b_min_y, b_max_y) = (b1.y.min(b2.y) - padding, b1.y.max(b2.y) + padding);

    a_min_x <= b_max_x && b_min_x <= a_max_x && a_min_y <= b_max_y && b_min_y <= a_max_y
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(x: f64, y: f64) -> Coord<f64> {
        Coord { x, y }
    }

    #[test]
    fn crossing_segments() {
        let hit = segment_intersection_xy(c(0.0, 0.0), c(10.0, 0.0), c(5.0, -5.0), c(5.0, 5.0))
            .expect("segments cross");
        assert!((hit.point.x - 5.0).abs() < 1e-12);
        assert!(hit.point.y.abs() < 1e-12);
        assert!((hit.t - 0.5).abs() < 1e-12);
        assert!((hit.u - 0.5).abs() < 1e-12);
    }

    #[test]
    fn parallel_and_collinear_segments() {
        assert!(
            segment_intersection_xy(c(0.0, 0.0), c(10.0, 0.0), c(0.0, 1.0), c(10.0, 1.0))
                .is_none()
        );
        assert!(
            segment_intersection_xy(c(0.0, 0.0), c(10.0, 0.0), c(5.0, 0.0), c(15.0, 0.0))
                .is_none()
        );
    }

    #[test]
    fn crossing_outside_segment() {
        assert!(
            segment_intersection_xy(c(0.0, 0.0), c(4.0, 0.0), c(5.0, -5.0), c(5.0, 5.0))
                .is_none()
        );
    }

    #[test]
    fn touching_endpoint_counts() {
        let hit = segment_intersection_xy(c(0.0, 0.0), c(10.0, 0.0), c(10.0, 0.0), c(10.0, 5.0))
            .expect("shared endpoint");
        assert!((hit.t - 1.0).abs() < 1e-12);
        assert!(hit.u.abs() < 1e-12);
    }

    #[test]
    fn padded_boxes() {
        let (a1, a2) = (c(0.0, 0.0), c(10.0, 0.0));
        let (b1, b2) = (c(0.0, 2.0), c(10.0, 3.0));
        assert!(!bounding_boxes_overlap(a1, a2, b1, b2, 0.0));
        assert!(!bounding_boxes_overlap(a1, a2, b1, b2, 0.9));
        assert!(bounding_boxes_overlap(a1, a2, b1, b2, 1.0));
    }
}
