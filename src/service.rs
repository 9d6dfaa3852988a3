//! Request execution: validation, per-traveller computation and the optional
//! intersection analysis.

use ors_isochrones_core::{
    Error, IsochroneMapCollection, IsochronesConfig, IsochronesIntersection, RoadGraph,
    compute_intersections, compute_isochrones,
    request::{IsochroneAttribute, IsochroneRequest},
    units::DistanceUnit,
};

/// Result of an isochrone request, together with the output options it asked for
#[derive(Debug, Clone)]
pub struct IsochronesResponse {
    pub collection: IsochroneMapCollection,
    pub intersections: Option<Vec<IsochronesIntersection>>,
    pub attributes: Vec<IsochroneAttribute>,
    pub units: DistanceUnit,
    pub area_units: DistanceUnit,
}

impl IsochronesResponse {
    pub fn has_attribute(&self, attribute: IsochroneAttribute) -> bool {
        self.attributes.contains(&attribute)
    }
}

/// Runs a request against `graph`.
///
/// Intersections are only computed when the request asks for them and
/// more than one traveller produced a map.
pub fn process_request(
    graph: &RoadGraph,
    request: &IsochroneRequest,
    config: &IsochronesConfig,
) -> Result<IsochronesResponse, Error> {
    log::info!(
        "Processing isochrone request with {} travellers",
        request.travellers().len()
    );
    let collection = compute_isochrones(graph, request, config)?;

    let intersections = if request.include_intersections() {
        let intersections = compute_intersections(&collection);
        if let Some(found) = &intersections {
            log::info!("Found {} intersections", found.len());
        }
        intersections
    } else {
        None
    };

    Ok(IsochronesResponse {
        collection,
        intersections,
        attributes: request.attributes().to_vec(),
        units: request.units(),
        area_units: request.area_units(),
    })
}

#[cfg(test)]
mod tests {
    use ors_isochrones_core::loading::graph_from_json_str;

    use super::*;

    const GRAPH: &str = r#"{
        "nodes": [
            {"id": 1, "lon": 0.0, "lat": 0.0},
            {"id": 2, "lon": 0.01, "lat": 0.0},
            {"id": 3, "lon": 0.02, "lat": 0.0},
            {"id": 4, "lon": 0.01, "lat": 0.01}
        ],
        "edges": [
            {"from": 1, "to": 2, "speed": 36, "bidirectional": true},
            {"from": 2, "to": 3, "speed": 36, "bidirectional": true},
            {"from": 2, "to": 4, "speed": 36, "bidirectional": true}
        ]
    }"#;

    fn request(intersections: bool) -> IsochroneRequest {
        IsochroneRequest::from_json_str(&format!(
            r#"{{
                "travellers": [
                    {{"location": [0.0, 0.0], "ranges": [150]}},
                    {{"location": [0.02, 0.0], "ranges": [150]}}
                ],
                "attributes": ["area"],
                "area_units": "km",
                "intersections": {intersections}
            }}"#
        ))
        .unwrap()
    }

    #[test]
    fn computes_maps_and_intersections() {
        let graph = graph_from_json_str(GRAPH).unwrap();
        let response =
            process_request(&graph, &request(true), &IsochronesConfig::default()).unwrap();

        assert_eq!(response.collection.len(), 2);
        assert_eq!(response.collection.isochrones_count(), 2);
        assert!(response.has_attribute(IsochroneAttribute::Area));
        assert_eq!(response.area_units, DistanceUnit::Kilometers);
        assert!(response.intersections.is_some());
    }

    #[test]
    fn skips_intersections_unless_requested() {
        let graph = graph_from_json_str(GRAPH).unwrap();
        let response =
            process_request(&graph, &request(false), &IsochronesConfig::default()).unwrap();
        assert!(response.intersections.is_none());
    }

    #[test]
    fn rejects_requests_over_the_limits() {
        let graph = graph_from_json_str(GRAPH).unwrap();
        let config = IsochronesConfig {
            maximum_range_time: 60.0,
            ..IsochronesConfig::default()
        };
        assert!(matches!(
            process_request(&graph, &request(false), &config),
            Err(Error::RequestLimit(_))
        ));
    }
}
