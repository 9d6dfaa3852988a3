use geo::{Coord, LineString, Point};
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};

use crate::{Error, geometry::haversine_distance, model::RoadEdge, model::RoadGraph, model::RoadNode};

/// Incrementally assembles a [`RoadGraph`] from nodes keyed by external ids
#[derive(Debug, Default)]
pub struct RoadGraphBuilder {
    graph: DiGraph<RoadNode, RoadEdge>,
    ids: HashMap<u64, NodeIndex>,
}

impl RoadGraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a node, or returns the existing one registered under `id`
    pub fn add_node(&mut self, id: u64, lon: f64, lat: f64) -> NodeIndex {
        if let Some(&existing) = self.ids.get(&id) {
            return existing;
        }
        let idx = self.graph.add_node(RoadNode {
            id,
            geometry: Point::new(lon, lat),
        });
        self.ids.insert(id, idx);
        idx
    }

    /// Adds a road between two known nodes.
    ///
    /// Missing geometry becomes the straight segment between the nodes and a
    /// non-positive distance is replaced by the geometry length.
    pub fn add_road(
        &mut self,
        from: u64,
        to: u64,
        mut edge: RoadEdge,
        bidirectional: bool,
    ) -> Result<EdgeIndex, Error> {
        let source = *self.ids.get(&from).ok_or(Error::InvalidNodeIndex)?;
        let target = *self.ids.get(&to).ok_or(Error::InvalidNodeIndex)?;

        if edge.geometry.0.len() < 2 {
            edge.geometry = LineString::new(vec![
                self.graph[source].geometry.0,
                self.graph[target].geometry.0,
            ]);
        }
        if edge.distance <= 0.0 {
            edge.distance = line_length(&edge.geometry.0);
        }

        if bidirectional {
            self.graph.add_edge(target, source, edge.reversed());
        }
        Ok(self.graph.add_edge(source, target, edge))
    }

    pub fn build(self) -> RoadGraph {
        log::info!(
            "Built road graph with {} nodes and {} edges",
            self.graph.node_count(),
            self.graph.edge_count()
        );
        RoadGraph::new(self.graph)
    }
}

pub(crate) fn line_length(coords: &[Coord<f64>]) -> f64 {
    coords
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .sum()
}
