//! Road network model

pub mod components;
pub mod network;

pub use components::{AvoidFeature, RoadEdge, RoadNode, TravelMode};
pub use network::{IndexedPoint, RoadGraph};
