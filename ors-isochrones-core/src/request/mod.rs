//! Request model: travellers, their routing parameters and the per-traveller
//! search parameters handed to the isochrone builders.

mod isochrone_request;
mod route_search_parameters;
mod search_parameters;
mod traveller;

pub use isochrone_request::{IsochroneAttribute, IsochroneRequest};
pub use route_search_parameters::RouteSearchParameters;
pub use search_parameters::IsochroneSearchParameters;
pub use traveller::{LocationType, TravelRangeType, TravellerInfo};
