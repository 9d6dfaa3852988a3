use std::collections::BinaryHeap;

use fixedbitset::FixedBitSet;
use hashbrown::{HashMap, hash_map::Entry};
use petgraph::graph::{EdgeIndex, NodeIndex};

use super::state::State;
use crate::{Cost, routing::SearchContext};

/// Best known way to reach a node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchLabel {
    pub cost: Cost,
    /// Predecessor node and the edge leading from it
    pub parent: Option<(NodeIndex, EdgeIndex)>,
}

/// Result of a cost bounded search
#[derive(Debug, Default)]
pub struct BoundedSearch {
    /// Nodes settled within the cost ceiling
    pub settled: HashMap<NodeIndex, SearchLabel>,
    /// Tentative labels of nodes first reached beyond the ceiling
    pub beyond: HashMap<NodeIndex, SearchLabel>,
    /// Last edge that improved a label
    pub last_edge: Option<EdgeIndex>,
}

/// Node based Dijkstra from `source` that stops once the cheapest open label
/// exceeds `max_cost`.
///
/// With `reverse` set the search walks incoming edges, yielding costs *to*
/// `source` instead of costs from it.
pub fn bounded_dijkstra(
    ctx: &SearchContext<'_>,
    source: NodeIndex,
    max_cost: Cost,
    reverse: bool,
) -> BoundedSearch {
    let graph = ctx.graph();
    let weighting = ctx.weighting();

    let estimated_nodes = graph.node_count().min(1000);
    let mut labels: HashMap<NodeIndex, SearchLabel> = HashMap::with_capacity(estimated_nodes);
    let mut done = FixedBitSet::with_capacity(graph.node_count());
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);
    let mut last_edge = None;

    labels.insert(
        source,
        SearchLabel {
            cost: 0.0,
            parent: None,
        },
    );
    heap.push(State {
        cost: 0.0,
        node: source,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if done.contains(node.index()) {
            continue;
        }
        if cost > max_cost {
            break;
        }
        done.insert(node.index());

        for (edge_id, next, edge) in graph.adjacent_edges(node, reverse) {
            if done.contains(next.index()) || !ctx.accept(edge) {
                continue;
            }
            let weight = weighting.calc_edge_weight(edge);
            if !weight.is_finite() {
                continue;
            }
            let next_cost = cost + weight;
            let label = SearchLabel {
                cost: next_cost,
                parent: Some((node, edge_id)),
            };

            match labels.entry(next) {
                Entry::Vacant(entry) => {
                    entry.insert(label);
                }
                Entry::Occupied(mut entry) => {
                    if next_cost >= entry.get().cost {
                        continue;
                    }
                    *entry.get_mut() = label;
                }
            }
            last_edge = Some(edge_id);
            heap.push(State {
                cost: next_cost,
                node: next,
            });
        }
    }

    let (settled, beyond) = labels
        .into_iter()
        .partition(|(node, _)| done.contains(node.index()));

    BoundedSearch {
        settled,
        beyond,
        last_edge,
    }
}
