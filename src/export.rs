//! GeoJSON and WKT output of isochrone responses

use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use ors_isochrones_core::{
    Error, Isochrone, IsochroneMap, IsochronesIntersection, request::IsochroneAttribute,
};
use serde_json::{Map, Value, json};
use wkt::ToWkt;

use crate::service::IsochronesResponse;

/// Reach factors are reported with four decimals
const REACH_FACTOR_PRECISION: f64 = 10_000.0;

impl IsochronesResponse {
    /// One feature per isochrone, followed by one feature per intersection
    pub fn to_geojson(&self) -> Result<FeatureCollection, Error> {
        let mut features = Vec::with_capacity(self.collection.isochrones_count());

        for (group_index, map) in self.collection.maps().iter().enumerate() {
            for isochrone in map.isochrones() {
                features.push(self.isochrone_feature(group_index, map, isochrone)?);
            }
        }
        if let Some(intersections) = &self.intersections {
            for intersection in intersections {
                features.push(self.intersection_feature(intersection)?);
            }
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson()?).map_err(|e| Error::GeoJsonError(e.to_string()))
    }

    fn isochrone_feature(
        &self,
        group_index: usize,
        map: &IsochroneMap,
        isochrone: &Isochrone,
    ) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(isochrone.geometry()));
        let center = map.center();

        let mut properties = Map::new();
        properties.insert("group_index".into(), json!(group_index));
        properties.insert("value".into(), json!(isochrone.value()));
        properties.insert("center".into(), json!([center.x, center.y]));
        if self.has_attribute(IsochroneAttribute::Area) {
            properties.insert("area".into(), json!(isochrone.area(self.area_units)));
        }
        if self.has_attribute(IsochroneAttribute::ReachFactor) {
            let reach_factor =
                (isochrone.reach_factor() * REACH_FACTOR_PRECISION).round() / REACH_FACTOR_PRECISION;
            properties.insert("reachfactor".into(), json!(reach_factor));
        }

        feature(geometry, properties)
    }

    fn intersection_feature(&self, intersection: &IsochronesIntersection) -> Result<Feature, Error> {
        let geometry = Geometry::new(GeoJsonValue::from(intersection.geometry()));
        let contours: Vec<[usize; 2]> = intersection
            .contour_refs()
            .iter()
            .map(|r| [r.map_index, r.isochrone_index])
            .collect();

        let mut properties = Map::new();
        properties.insert("contours".into(), json!(contours));
        if self.has_attribute(IsochroneAttribute::Area) {
            properties.insert("area".into(), json!(intersection.area(self.area_units)));
        }

        feature(geometry, properties)
    }
}

fn feature(geometry: Geometry, properties: Map<String, Value>) -> Result<Feature, Error> {
    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": properties,
    });
    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Polygon of an isochrone as WKT
pub fn isochrone_wkt(isochrone: &Isochrone) -> String {
    isochrone.geometry().to_wkt().to_string()
}

/// Polygons of all isochrones of a map as WKT, in threshold order
pub fn map_wkt(map: &IsochroneMap) -> Vec<String> {
    map.isochrones().iter().map(isochrone_wkt).collect()
}

#[cfg(test)]
mod tests {
    use geo::{Coord, polygon};
    use ors_isochrones_core::{
        IsochroneMapCollection, compute_intersections, units::DistanceUnit,
    };

    use super::*;

    fn square(min_x: f64, size: f64, value: f64) -> Isochrone {
        let polygon = polygon![
            (x: min_x, y: 0.0),
            (x: min_x + size, y: 0.0),
            (x: min_x + size, y: size),
            (x: min_x, y: size),
            (x: min_x, y: 0.0),
        ];
        Isochrone::new(polygon, value, 1000.0).unwrap()
    }

    fn response(attributes: Vec<IsochroneAttribute>) -> IsochronesResponse {
        let mut collection = IsochroneMapCollection::new();
        for (id, min_x) in [0.0, 0.005].into_iter().enumerate() {
            let mut map = IsochroneMap::new(id, Coord { x: min_x, y: 0.0 });
            map.add_isochrone(square(min_x, 0.01, 300.0));
            collection.add(map);
        }
        let intersections = compute_intersections(&collection);
        IsochronesResponse {
            collection,
            intersections,
            attributes,
            units: DistanceUnit::Meters,
            area_units: DistanceUnit::Kilometers,
        }
    }

    #[test]
    fn exports_isochrones_and_intersections() {
        let collection = response(vec![IsochroneAttribute::Area])
            .to_geojson()
            .unwrap();
        assert_eq!(collection.features.len(), 3);

        let first = &collection.features[0];
        assert_eq!(first.property("group_index"), Some(&json!(0)));
        assert_eq!(first.property("value"), Some(&json!(300.0)));
        assert!(first.property("area").is_some());
        assert!(first.property("reachfactor").is_none());

        let overlap = &collection.features[2];
        assert_eq!(overlap.property("contours"), Some(&json!([[0, 0], [1, 0]])));
    }

    #[test]
    fn reach_factor_is_rounded() {
        let collection = response(vec![IsochroneAttribute::ReachFactor])
            .to_geojson()
            .unwrap();
        let reach_factor = collection.features[0]
            .property("reachfactor")
            .and_then(|v| v.as_f64())
            .unwrap();
        assert!(reach_factor > 0.0 && reach_factor <= 1.0);
        let scaled = reach_factor * REACH_FACTOR_PRECISION;
        assert!((scaled - scaled.round()).abs() < 1e-6);
        assert!(collection.features[0].property("area").is_none());
    }

    #[test]
    fn geojson_string_is_a_feature_collection() {
        let text = response(vec![]).to_geojson_string().unwrap();
        let parsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["type"], "FeatureCollection");
        assert_eq!(parsed["features"][0]["geometry"]["type"], "Polygon");
    }

    #[test]
    fn wkt_output() {
        let response = response(vec![]);
        let map = &response.collection.maps()[0];
        let wkt = map_wkt(map);
        assert_eq!(wkt.len(), 1);
        assert!(wkt[0].starts_with("POLYGON"));
    }
}
