//! Directed road graph with a spatial index over its nodes

use geo::{Coord, Point};
use petgraph::{
    Direction,
    graph::{DiGraph, EdgeIndex, NodeIndex},
    visit::EdgeRef,
};
use rstar::{RTree, primitives::GeomWithData};

use super::components::{RoadEdge, RoadNode};
use crate::{geometry::haversine_distance, units::metres_to_degrees};

/// Node position stored in the spatial index
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Read-only road network the searches run on
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub graph: DiGraph<RoadNode, RoadEdge>,
    rtree: RTree<IndexedPoint>,
}

impl RoadGraph {
    pub fn new(graph: DiGraph<RoadNode, RoadEdge>) -> Self {
        let points = graph
            .node_indices()
            .map(|idx| {
                let position = graph[idx].geometry;
                IndexedPoint::new([position.x(), position.y()], idx)
            })
            .collect();

        Self {
            graph,
            rtree: RTree::bulk_load(points),
        }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node(&self, node: NodeIndex) -> Option<&RoadNode> {
        self.graph.node_weight(node)
    }

    pub fn edge(&self, edge: EdgeIndex) -> Option<&RoadEdge> {
        self.graph.edge_weight(edge)
    }

    pub fn node_position(&self, node: NodeIndex) -> Option<Coord<f64>> {
        self.node(node).map(|n| n.geometry.0)
    }

    /// Edges leaving `node`, or entering it when `reverse` is set, together
    /// with the node on the other side of each edge.
    pub fn adjacent_edges(
        &self,
        node: NodeIndex,
        reverse: bool,
    ) -> impl Iterator<Item = (EdgeIndex, NodeIndex, &RoadEdge)> + '_ {
        let direction = if reverse {
            Direction::Incoming
        } else {
            Direction::Outgoing
        };

        self.graph
            .edges_directed(node, direction)
            .map(move |edge| {
                let adjacent = if reverse { edge.source() } else { edge.target() };
                (edge.id(), adjacent, edge.weight())
            })
    }

    /// Edge geometry oriented so that it starts at `from`.
    ///
    /// Falls back to the straight segment between the endpoints when the
    /// edge carries no geometry.
    pub fn edge_geometry_from(&self, edge: EdgeIndex, from: NodeIndex) -> Option<Vec<Coord<f64>>> {
        let (source, target) = self.graph.edge_endpoints(edge)?;
        let weight = self.edge(edge)?;

        let mut coords: Vec<Coord<f64>> = if weight.geometry.0.len() >= 2 {
            weight.geometry.0.clone()
        } else {
            vec![self.node_position(source)?, self.node_position(target)?]
        };

        if from == target && from != source {
            coords.reverse();
        }
        Some(coords)
    }

    /// Nearest node within `max_distance` metres for which `accept` holds.
    ///
    /// Returns the node together with its distance in metres.
    pub fn nearest_node<F>(
        &self,
        point: &Point<f64>,
        max_distance: f64,
        accept: F,
    ) -> Option<(NodeIndex, f64)>
    where
        F: Fn(NodeIndex) -> bool,
    {
        // Longitude degrees shrink towards the poles; widen the planar search
        // window accordingly so that no candidate inside `max_distance` is missed.
        let latitude_scale = point.y().to_radians().cos().max(0.01);
        let search_radius = 2.0 * metres_to_degrees(max_distance) / latitude_scale;
        let search_radius_2 = search_radius * search_radius;

        self.rtree
            .nearest_neighbor_iter_with_distance_2(&[point.x(), point.y()])
            .take_while(|(_, distance_2)| *distance_2 <= search_radius_2)
            .filter(|(candidate, _)| accept(candidate.data))
            .map(|(candidate, _)| {
                let position = Coord {
                    x: candidate.geom()[0],
                    y: candidate.geom()[1],
                };
                (candidate.data, haversine_distance(point.0, position))
            })
            .filter(|(_, distance)| *distance <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use crate::test_utils::{line_graph, node_by_id};

    #[test]
    fn finds_nearest_node_within_radius() {
        let graph = line_graph();
        let a = node_by_id(&graph, 1);
        let probe = Point::new(0.0001, 0.0001);

        let (node, distance) = graph.nearest_node(&probe, 350.0, |_| true).unwrap();
        assert_eq!(node, a);
        assert!(distance < 20.0);
    }

    #[test]
    fn rejects_nodes_outside_radius() {
        let graph = line_graph();
        let probe = Point::new(0.0, 0.05);
        assert!(graph.nearest_node(&probe, 350.0, |_| true).is_none());
    }

    #[test]
    fn respects_acceptance_predicate() {
        let graph = line_graph();
        let a = node_by_id(&graph, 1);
        let b = node_by_id(&graph, 2);
        let probe = Point::new(0.0001, 0.0);

        let (node, _) = graph.nearest_node(&probe, 5000.0, |n| n != a).unwrap();
        assert_eq!(node, b);
    }

    #[test]
    fn reverse_adjacency_uses_incoming_edges() {
        let graph = line_graph();
        let a = node_by_id(&graph, 1);
        let b = node_by_id(&graph, 2);

        let forward: Vec<_> = graph.adjacent_edges(a, false).map(|(_, n, _)| n).collect();
        assert_eq!(forward, vec![b]);
        let backward: Vec<_> = graph.adjacent_edges(b, true).map(|(_, n, _)| n).collect();
        assert_eq!(backward, vec![a]);
        assert_eq!(graph.adjacent_edges(a, true).count(), 0);
    }

    #[test]
    fn edge_geometry_is_oriented_from_requested_node() {
        let graph = line_graph();
        let a = node_by_id(&graph, 1);
        let b = node_by_id(&graph, 2);
        let (edge, _, _) = graph.adjacent_edges(a, false).next().unwrap();

        let forward = graph.edge_geometry_from(edge, a).unwrap();
        let backward = graph.edge_geometry_from(edge, b).unwrap();
        assert_eq!(forward.first(), backward.last());
        assert_eq!(forward[0].x, 0.0);
    }
}
