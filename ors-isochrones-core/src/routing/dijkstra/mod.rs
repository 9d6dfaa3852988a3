mod bounded_dijkstra;
mod state;

pub use bounded_dijkstra::{BoundedSearch, SearchLabel, bounded_dijkstra};
