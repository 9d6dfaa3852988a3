//! Synthetic road networks shared by the unit tests

use geo::{Coord, Polygon, Rect, polygon};
use petgraph::graph::NodeIndex;

use crate::{
    Isochrone,
    loading::RoadGraphBuilder,
    model::{RoadEdge, RoadGraph},
    request::{
        IsochroneSearchParameters, LocationType, RouteSearchParameters, TravelRangeType,
        TravellerInfo,
    },
    routing::RoutingProfile,
};

/// Metres per degree of longitude on the equator (haversine sphere)
pub(crate) const METERS_PER_DEGREE: f64 = 111_195.08;

pub(crate) fn east_of_origin(meters: f64) -> Coord<f64> {
    Coord {
        x: meters / METERS_PER_DEGREE,
        y: 0.0,
    }
}

/// A (id 1) -> B (id 2) -> C (id 3) on the equator, one-way.
///
/// A→B is 1000 m and B→C 1500 m, both at 36 km/h: 100 s and 150 s.
pub(crate) fn line_graph() -> RoadGraph {
    let mut builder = RoadGraphBuilder::new();
    let a = east_of_origin(0.0);
    let b = east_of_origin(1000.0);
    let c = east_of_origin(2500.0);
    builder.add_node(1, a.x, a.y);
    builder.add_node(2, b.x, b.y);
    builder.add_node(3, c.x, c.y);
    builder
        .add_road(1, 2, RoadEdge::new(1000.0, 36.0, vec![a, b].into()), false)
        .unwrap();
    builder
        .add_road(2, 3, RoadEdge::new(1500.0, 36.0, vec![b, c].into()), false)
        .unwrap();
    builder.build()
}

/// Square grid of `size` x `size` nodes, `spacing` metres apart, roads in both
/// directions at `speed` km/h. Node ids are `row * size + col + 1`.
pub(crate) fn grid_graph(size: usize, spacing: f64, speed: f64) -> RoadGraph {
    let mut builder = RoadGraphBuilder::new();
    let step = spacing / METERS_PER_DEGREE;
    let id = |row: usize, col: usize| (row * size + col + 1) as u64;

    for row in 0..size {
        for col in 0..size {
            builder.add_node(id(row, col), col as f64 * step, row as f64 * step);
        }
    }
    for row in 0..size {
        for col in 0..size {
            if col + 1 < size {
                builder
                    .add_road(
                        id(row, col),
                        id(row, col + 1),
                        RoadEdge::new(spacing, speed, geo::LineString::new(vec![])),
                        true,
                    )
                    .unwrap();
            }
            if row + 1 < size {
                builder
                    .add_road(
                        id(row, col),
                        id(row + 1, col),
                        RoadEdge::new(spacing, speed, geo::LineString::new(vec![])),
                        true,
                    )
                    .unwrap();
            }
        }
    }
    builder.build()
}

pub(crate) fn node_by_id(graph: &RoadGraph, id: u64) -> NodeIndex {
    graph
        .graph
        .node_indices()
        .find(|&idx| graph.graph[idx].id == id)
        .unwrap()
}

pub(crate) fn traveller(
    location: Coord<f64>,
    location_type: LocationType,
    range_type: TravelRangeType,
    ranges: Vec<f64>,
) -> TravellerInfo {
    TravellerInfo::new(
        location,
        location_type,
        range_type,
        ranges,
        RouteSearchParameters::new(RoutingProfile::DrivingCar),
    )
}

pub(crate) fn time_parameters(location: Coord<f64>, ranges: Vec<f64>) -> IsochroneSearchParameters {
    IsochroneSearchParameters::from_traveller(
        0,
        &traveller(location, LocationType::Start, TravelRangeType::Time, ranges),
    )
}

/// Axis aligned square polygon
pub(crate) fn square(min_x: f64, min_y: f64, size: f64) -> Polygon<f64> {
    polygon![
        (x: min_x, y: min_y),
        (x: min_x + size, y: min_y),
        (x: min_x + size, y: min_y + size),
        (x: min_x, y: min_y + size),
        (x: min_x, y: min_y),
    ]
}

pub(crate) fn isochrone(polygon: Polygon<f64>, value: f64) -> Isochrone {
    Isochrone::new(polygon, value, 1000.0).unwrap()
}

pub(crate) fn rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Rect<f64> {
    Rect::new(Coord { x: min_x, y: min_y }, Coord { x: max_x, y: max_y })
}
