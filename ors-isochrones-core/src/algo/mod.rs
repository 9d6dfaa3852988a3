pub mod intersection;
pub mod isochrone;
pub mod reachability;
