//! Isochrone service layer.
//!
//! Runs [`IsochroneRequest`]s against a road graph with the engine from
//! `ors_isochrones_core` and exports the resulting maps and intersections as
//! GeoJSON or WKT.

pub mod export;
pub mod service;

pub use ors_isochrones_core::prelude;
pub use ors_isochrones_core::request::IsochroneRequest;

pub use export::{isochrone_wkt, map_wkt};
pub use service::{IsochronesResponse, process_request};
