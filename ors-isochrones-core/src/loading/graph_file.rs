//! JSON road network format

use std::{fs, path::Path};

use geo::{Coord, LineString};
use serde::Deserialize;

use super::builder::RoadGraphBuilder;
use crate::{
    Error,
    model::{AvoidFeature, RoadEdge, RoadGraph, TravelMode},
};

/// Node record of a graph file
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFileNode {
    pub id: u64,
    pub lon: f64,
    pub lat: f64,
}

/// Edge record of a graph file
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFileEdge {
    pub from: u64,
    pub to: u64,
    /// Length in metres, derived from the geometry when absent
    #[serde(default)]
    pub distance: Option<f64>,
    /// Speed in km/h
    pub speed: f64,
    #[serde(default)]
    pub bidirectional: bool,
    /// Modes allowed on the edge, all of them when absent
    #[serde(default)]
    pub access: Option<Vec<TravelMode>>,
    #[serde(default)]
    pub features: Vec<AvoidFeature>,
    /// Intermediate geometry as `[lon, lat]` pairs, including the end nodes
    #[serde(default)]
    pub geometry: Vec<[f64; 2]>,
}

/// Road network as stored on disk
#[derive(Debug, Clone, Deserialize)]
pub struct GraphFile {
    pub nodes: Vec<GraphFileNode>,
    pub edges: Vec<GraphFileEdge>,
}

impl GraphFile {
    pub fn into_graph(self) -> Result<RoadGraph, Error> {
        let mut builder = RoadGraphBuilder::new();
        for node in &self.nodes {
            if !node.lon.is_finite() || !node.lat.is_finite() {
                return Err(Error::InvalidData(format!(
                    "node {} has invalid coordinates",
                    node.id
                )));
            }
            builder.add_node(node.id, node.lon, node.lat);
        }

        for edge in self.edges {
            if !edge.speed.is_finite() || edge.speed < 0.0 {
                return Err(Error::InvalidData(format!(
                    "edge {} -> {} has invalid speed {}",
                    edge.from, edge.to, edge.speed
                )));
            }

            let geometry: LineString<f64> = edge
                .geometry
                .iter()
                .map(|&[x, y]| Coord { x, y })
                .collect();
            let mut road = RoadEdge::new(edge.distance.unwrap_or(0.0), edge.speed, geometry)
                .with_features(&edge.features);
            if let Some(access) = &edge.access {
                road = road.with_access(access);
            }

            builder.add_road(edge.from, edge.to, road, edge.bidirectional)?;
        }

        Ok(builder.build())
    }
}

pub fn graph_from_json_str(json: &str) -> Result<RoadGraph, Error> {
    let file: GraphFile = serde_json::from_str(json)?;
    file.into_graph()
}

/// Loads a road network from a JSON graph file
pub fn load_graph(path: impl AsRef<Path>) -> Result<RoadGraph, Error> {
    let path = path.as_ref();
    log::info!("Loading road graph from {}", path.display());
    let contents = fs::read_to_string(path)?;
    graph_from_json_str(&contents)
}
