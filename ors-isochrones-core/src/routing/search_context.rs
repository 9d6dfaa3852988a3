use petgraph::graph::NodeIndex;

use super::{EdgeFilter, RoutingProfile, Weighting, create_edge_filter, create_weighting};
use crate::{
    IsochronesConfig, RoadGraph, model::RoadEdge, request::IsochroneSearchParameters,
};

/// Default snapping tolerance in metres
pub const DEFAULT_SNAPPING_RADIUS: f64 = 350.0;

/// Everything a search needs besides its origin: the graph, the cost function
/// and the edge admissibility predicate.
pub struct SearchContext<'a> {
    graph: &'a RoadGraph,
    weighting: Box<dyn Weighting>,
    edge_filter: Box<dyn EdgeFilter>,
    profile: RoutingProfile,
    snapping_radius: f64,
}

impl<'a> SearchContext<'a> {
    pub fn new(
        graph: &'a RoadGraph,
        weighting: Box<dyn Weighting>,
        edge_filter: Box<dyn EdgeFilter>,
        profile: RoutingProfile,
    ) -> Self {
        Self {
            graph,
            weighting,
            edge_filter,
            profile,
            snapping_radius: DEFAULT_SNAPPING_RADIUS,
        }
    }

    /// Context for one traveller's search
    pub fn for_parameters(
        graph: &'a RoadGraph,
        parameters: &IsochroneSearchParameters,
        config: &IsochronesConfig,
    ) -> Self {
        let route_parameters = parameters.route_parameters();
        Self::new(
            graph,
            create_weighting(parameters.range_type(), route_parameters),
            Box::new(create_edge_filter(route_parameters)),
            route_parameters.profile,
        )
        .with_snapping_radius(config.maximum_snapping_radius)
    }

    #[must_use]
    pub fn with_snapping_radius(mut self, radius: f64) -> Self {
        self.snapping_radius = radius;
        self
    }

    pub fn graph(&self) -> &'a RoadGraph {
        self.graph
    }

    pub fn weighting(&self) -> &dyn Weighting {
        self.weighting.as_ref()
    }

    pub fn profile(&self) -> RoutingProfile {
        self.profile
    }

    pub fn snapping_radius(&self) -> f64 {
        self.snapping_radius
    }

    pub fn accept(&self, edge: &RoadEdge) -> bool {
        self.edge_filter.accept(edge)
    }

    /// Whether any edge touching `node`, in either direction, passes the filter
    pub fn has_admissible_edge(&self, node: NodeIndex) -> bool {
        self.graph
            .adjacent_edges(node, false)
            .chain(self.graph.adjacent_edges(node, true))
            .any(|(_, _, edge)| self.accept(edge))
    }
}
