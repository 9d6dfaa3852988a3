// Re-export key components
pub use crate::algo::intersection::{ContourRef, IsochronesIntersection, compute_intersections};
pub use crate::algo::isochrone::{
    CalculationMethod, IsochroneMapBuilder, IsochroneMapBuilderFactory, build_isochrone_map,
    compute_isochrones, compute_traveller_isochrones,
};
pub use crate::algo::reachability::{ReachabilityMap, find_reachability};
pub use crate::config::IsochronesConfig;
pub use crate::error::Error;
pub use crate::loading::{RoadGraphBuilder, graph_from_json_str, load_graph};
pub use crate::model::{Isochrone, IsochroneMap, IsochroneMapCollection, RoadGraph};
pub use crate::request::{
    IsochroneAttribute, IsochroneRequest, IsochroneSearchParameters, LocationType,
    RouteSearchParameters, TravelRangeType, TravellerInfo,
};
pub use crate::routing::{RoutingProfile, SearchContext};
pub use crate::units::DistanceUnit;

// Core types for the road network
pub use crate::Cost; // seconds or metres
pub use crate::RoadEdgeId;
pub use crate::RoadNodeId;
