use serde::{Deserialize, Serialize};

use super::coerce::AxisOrder;
use crate::{Error, Meters};

/// Tuning for [`build_graph`](super::build_graph)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphBuildOptions {
    /// Max gap between two dangling endpoints that get connected
    pub snap_distance_meters: Meters,
    /// How many nearby dangling endpoints one endpoint may connect to
    pub snap_max_neighbors: usize,
    /// Read every record strictly as a `{from, to}` pair
    pub only_segments: bool,
    /// Split segments where roads cross or touch
    pub split_intersections: bool,
    /// Max gap between a road end and another road's interior for a T-junction
    pub junction_snap_distance_meters: Meters,
    /// Reading of `[a, b]` point arrays whose order is ambiguous
    pub ambiguous_axis_order: AxisOrder,
}

impl Default for GraphBuildOptions {
    fn default() -> Self {
        Self {
            snap_distance_meters: 2.5,
            snap_max_neighbors: 3,
            only_segments: false,
            split_intersections: true,
            junction_snap_distance_meters: 1.2,
            ambiguous_axis_order: AxisOrder::LatLng,
        }
    }
}

impl GraphBuildOptions {
    /// # Errors
    ///
    /// Returns an error if a distance is negative or not finite
    pub fn validate(&self) -> Result<(), Error> {
        for (name, value) in [
            ("snap_distance_meters", self.snap_distance_meters),
            ("junction_snap_distance_meters", self.junction_snap_distance_meters),
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let json = r#"{"snap_distance_meters": 4.0, "ambiguous_axis_order": "lng_lat"}"#;
        let options: GraphBuildOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.snap_distance_meters, 4.0);
        assert_eq!(options.ambiguous_axis_order, AxisOrder::LngLat);
        assert_eq!(options.snap_max_neighbors, 3);
        assert!(options.split_intersections);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn rejects_negative_distances() {
        let options = GraphBuildOptions {
            junction_snap_distance_meters: -1.0,
            ..GraphBuildOptions::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidData(_))));
    }
}
