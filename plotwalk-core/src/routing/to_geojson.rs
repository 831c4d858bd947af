use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::{RouteResult, format_distance};
use crate::{Error, GeoPoint};

impl RouteResult {
    /// Converts the route to a `GeoJSON` `FeatureCollection`: the walking
    /// line (when there is one) followed by the user and destination points.
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(3);

        if self.polyline.len() >= 2 {
            let coords: Vec<Coord<f64>> = self.polyline.iter().map(|&p| p.into()).collect();
            let geometry = Geometry::new(GeoJsonValue::from(&LineString::new(coords)));
            let value = json!({
                "type": "Feature",
                "geometry": geometry,
                "properties": {
                    "kind": "route",
                    "source": self.debug_info.used,
                    "distance_meters": self.distance_meters,
                    "distance_text": format_distance(self.distance_meters),
                    "steps": self.steps,
                }
            });
            features.push(
                Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))?,
            );
        }

        features.push(point_feature(self.user, "user")?);
        features.push(point_feature(self.destination, "destination")?);

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(&self.to_geojson()?)?)
    }
}

fn point_feature(point: GeoPoint, kind: &str) -> Result<Feature, Error> {
    let geometry = Geometry::new(GeoJsonValue::from(&Point::from(point)));
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": { "kind": kind }
    });
    Feature::from_json_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}
