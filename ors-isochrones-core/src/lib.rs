//! Reachability and isochrone engine.
//!
//! Computes "reachable area" polygons around (or towards) a set of locations
//! under a travel time or travel distance budget, and analyses where the
//! reachable areas of different locations overlap.
//!
//! The engine owns a minimal directed road graph ([`RoadGraph`]) with
//! nearest-node snapping and bounded shortest path relaxation; everything else
//! (polygon construction, data model, intersections) is built on top of it.

pub mod algo;
pub mod config;
pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod request;
pub mod routing;
pub mod units;

#[cfg(test)]
pub(crate) mod test_utils;

pub use algo::intersection::{ContourRef, IsochronesIntersection, compute_intersections};
pub use algo::isochrone::{
    CalculationMethod, IsochroneMapBuilder, IsochroneMapBuilderFactory, build_isochrone_map,
    compute_isochrones, compute_traveller_isochrones,
};
pub use algo::reachability::{ReachEntry, ReachParent, ReachabilityMap, find_reachability};
pub use config::IsochronesConfig;
pub use error::Error;
pub use model::{Isochrone, IsochroneMap, IsochroneMapCollection, RoadEdge, RoadGraph, RoadNode};

/// Node of the road graph
pub type RoadNodeId = petgraph::graph::NodeIndex;
/// Directed edge of the road graph
pub type RoadEdgeId = petgraph::graph::EdgeIndex;
/// Search cost: seconds for time ranges, metres for distance ranges
pub type Cost = f64;
