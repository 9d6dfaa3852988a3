//! Data model of the engine
//!
//! Contains the road network the searches run on and the isochrone
//! aggregates produced from it.

pub mod isochrone;
pub mod streets;

pub use isochrone::{Isochrone, IsochroneMap, IsochroneMapCollection};
pub use streets::{AvoidFeature, IndexedPoint, RoadEdge, RoadGraph, RoadNode, TravelMode};
