pub mod dijkstra;
pub mod edge_filter;
pub mod profile;
pub mod search_context;
pub mod weighting;

pub use dijkstra::{BoundedSearch, SearchLabel, bounded_dijkstra};
pub use edge_filter::{
    AvoidFeaturesFilter, EdgeFilter, EdgeFilterSequence, TravelModeFilter, create_edge_filter,
};
pub use profile::RoutingProfile;
pub use search_context::SearchContext;
pub use weighting::{FastestWeighting, ShortestWeighting, Weighting, create_weighting};
