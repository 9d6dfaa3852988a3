//! This module is responsible for loading road network data and building
//! the routing graph the isochrone searches run on.

mod builder;
mod graph_file;

pub use builder::RoadGraphBuilder;
pub use graph_file::{GraphFile, GraphFileEdge, GraphFileNode, graph_from_json_str, load_graph};
