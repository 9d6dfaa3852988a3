//! Cost bounded reachability search around a traveller's location

use geo::{Coord, Point};
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};

use crate::{
    Cost, Error,
    request::IsochroneSearchParameters,
    routing::{SearchContext, SearchLabel, bounded_dijkstra},
};

/// Predecessor of a reached node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachParent {
    pub node: NodeIndex,
    /// Edge between the parent and the reached node
    pub edge: EdgeIndex,
    /// Cost at the parent node
    pub cost: Cost,
}

/// Best known cost of a reached node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReachEntry {
    pub node: NodeIndex,
    pub cost: Cost,
    /// `None` for the snapped origin
    pub parent: Option<ReachParent>,
}

/// Every node reachable within the cost ceiling, plus the first labels beyond it
#[derive(Debug, Clone)]
pub struct ReachabilityMap {
    snapped_node: NodeIndex,
    snapped_position: Coord<f64>,
    entries: HashMap<NodeIndex, ReachEntry>,
    boundary: HashMap<NodeIndex, ReachEntry>,
    frontier_edge: Option<EdgeIndex>,
    max_cost: Cost,
}

impl ReachabilityMap {
    pub fn snapped_node(&self) -> NodeIndex {
        self.snapped_node
    }

    pub fn snapped_position(&self) -> Coord<f64> {
        self.snapped_position
    }

    /// Nodes with cost within the ceiling, the origin included
    pub fn entries(&self) -> &HashMap<NodeIndex, ReachEntry> {
        &self.entries
    }

    pub fn get(&self, node: NodeIndex) -> Option<&ReachEntry> {
        self.entries.get(&node)
    }

    pub fn contains(&self, node: NodeIndex) -> bool {
        self.entries.contains_key(&node)
    }

    /// Nodes first reached beyond the ceiling through an edge crossing it
    pub fn boundary(&self) -> &HashMap<NodeIndex, ReachEntry> {
        &self.boundary
    }

    /// Last edge relaxed by the search. Informational, polygon building does not read it.
    pub fn frontier_edge(&self) -> Option<EdgeIndex> {
        self.frontier_edge
    }

    pub fn max_cost(&self) -> Cost {
        self.max_cost
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries reached through an edge, within and beyond the ceiling,
    /// ordered by edge index
    pub fn tree_entries(&self) -> Vec<&ReachEntry> {
        let mut entries: Vec<&ReachEntry> = self
            .entries
            .values()
            .chain(self.boundary.values())
            .filter(|entry| entry.parent.is_some())
            .collect();
        entries.sort_by_key(|entry| entry.parent.map(|p| p.edge.index()));
        entries
    }
}

/// Snaps the search location to the graph and runs a bounded search up to the
/// largest range of `parameters`.
pub fn find_reachability(
    ctx: &SearchContext<'_>,
    parameters: &IsochroneSearchParameters,
) -> Result<ReachabilityMap, Error> {
    let location = parameters.location();
    let graph = ctx.graph();

    let Some((snapped_node, distance)) = graph.nearest_node(
        &Point::from(location),
        ctx.snapping_radius(),
        |node| ctx.has_admissible_edge(node),
    ) else {
        log::trace!(
            "No admissible node within {} m of ({}, {})",
            ctx.snapping_radius(),
            location.x,
            location.y
        );
        return Err(Error::LocationNotFound {
            lon: location.x,
            lat: location.y,
        });
    };
    let snapped_position = graph
        .node_position(snapped_node)
        .ok_or(Error::InvalidNodeIndex)?;
    log::trace!(
        "Snapped ({}, {}) to node {} at {distance:.1} m",
        location.x,
        location.y,
        graph.graph[snapped_node].id
    );

    let max_cost = parameters.maximum_range();
    let search = bounded_dijkstra(ctx, snapped_node, max_cost, parameters.reverse_direction());

    let entries = to_entries(&search.settled, &search.settled);
    let boundary = to_entries(&search.beyond, &search.settled);

    Ok(ReachabilityMap {
        snapped_node,
        snapped_position,
        entries,
        boundary,
        frontier_edge: search.last_edge,
        max_cost,
    })
}

fn to_entries(
    labels: &HashMap<NodeIndex, SearchLabel>,
    settled: &HashMap<NodeIndex, SearchLabel>,
) -> HashMap<NodeIndex, ReachEntry> {
    labels
        .iter()
        .map(|(&node, label)| {
            let parent = label.parent.and_then(|(parent_node, edge)| {
                settled.get(&parent_node).map(|parent_label| ReachParent {
                    node: parent_node,
                    edge,
                    cost: parent_label.cost,
                })
            });
            (
                node,
                ReachEntry {
                    node,
                    cost: label.cost,
                    parent,
                },
            )
        })
        .collect()
}
