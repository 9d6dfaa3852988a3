//! Edge cost functions

use crate::{
    model::RoadEdge,
    request::{RouteSearchParameters, TravelRangeType},
};

/// Cost of traversing a single edge
pub trait Weighting: Send + Sync {
    fn calc_edge_weight(&self, edge: &RoadEdge) -> f64;

    fn name(&self) -> &'static str;
}

/// Travel time in seconds with the speed capped at `max_speed` km/h
#[derive(Debug, Clone, Copy)]
pub struct FastestWeighting {
    max_speed: f64,
}

impl FastestWeighting {
    pub fn new(max_speed: f64) -> Self {
        Self { max_speed }
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }
}

impl Weighting for FastestWeighting {
    fn calc_edge_weight(&self, edge: &RoadEdge) -> f64 {
        edge.travel_time(Some(self.max_speed))
    }

    fn name(&self) -> &'static str {
        "fastest"
    }
}

/// Edge length in metres
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortestWeighting;

impl Weighting for ShortestWeighting {
    fn calc_edge_weight(&self, edge: &RoadEdge) -> f64 {
        edge.distance
    }

    fn name(&self) -> &'static str {
        "shortest"
    }
}

/// Picks the cost function matching the range type.
///
/// Time ranges are capped by the profile speed, lowered further by an explicit
/// `max_speed` of the request.
pub fn create_weighting(
    range_type: TravelRangeType,
    route_parameters: &RouteSearchParameters,
) -> Box<dyn Weighting> {
    match range_type {
        TravelRangeType::Time => Box::new(FastestWeighting::new(
            route_parameters.effective_max_speed(),
        )),
        TravelRangeType::Distance => Box::new(ShortestWeighting),
    }
}
