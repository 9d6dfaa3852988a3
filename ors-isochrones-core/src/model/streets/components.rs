//! Road network components - nodes, edges and their attributes

use geo::{LineString, Point};
use serde::Deserialize;

/// Kind of vehicle (or pedestrian) an edge can be traversed with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Car,
    Bike,
    Foot,
    Wheelchair,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Car,
        TravelMode::Bike,
        TravelMode::Foot,
        TravelMode::Wheelchair,
    ];

    pub const fn bit(self) -> u8 {
        match self {
            TravelMode::Car => 1,
            TravelMode::Bike => 1 << 1,
            TravelMode::Foot => 1 << 2,
            TravelMode::Wheelchair => 1 << 3,
        }
    }
}

/// Road feature a traveller may ask to avoid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvoidFeature {
    Highways,
    Tollways,
    Ferries,
    Fords,
    Steps,
}

impl AvoidFeature {
    pub const fn bit(self) -> u8 {
        match self {
            AvoidFeature::Highways => 1,
            AvoidFeature::Tollways => 1 << 1,
            AvoidFeature::Ferries => 1 << 2,
            AvoidFeature::Fords => 1 << 3,
            AvoidFeature::Steps => 1 << 4,
        }
    }

    pub fn mask(features: &[AvoidFeature]) -> u8 {
        features.iter().fold(0, |mask, feature| mask | feature.bit())
    }
}

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// External ID of the node
    pub id: u64,
    /// Node coordinates (lon/lat)
    pub geometry: Point<f64>,
}

/// Directed road graph edge (street segment)
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Length in metres
    pub distance: f64,
    /// Average speed in km/h
    pub speed: f64,
    /// Bit mask of [`TravelMode`]s allowed on the edge
    pub access: u8,
    /// Bit mask of [`AvoidFeature`]s present on the edge
    pub features: u8,
    /// Geometry oriented from the source node to the target node
    pub geometry: LineString<f64>,
}

impl RoadEdge {
    /// Edge open to every travel mode, without special features
    pub fn new(distance: f64, speed: f64, geometry: LineString<f64>) -> Self {
        Self {
            distance,
            speed,
            access: TravelMode::ALL.iter().fold(0, |mask, mode| mask | mode.bit()),
            features: 0,
            geometry,
        }
    }

    #[must_use]
    pub fn with_access(mut self, modes: &[TravelMode]) -> Self {
        self.access = modes.iter().fold(0, |mask, mode| mask | mode.bit());
        self
    }

    #[must_use]
    pub fn with_features(mut self, features: &[AvoidFeature]) -> Self {
        self.features = AvoidFeature::mask(features);
        self
    }

    pub fn allows(&self, mode: TravelMode) -> bool {
        self.access & mode.bit() != 0
    }

    pub fn has_any_feature(&self, mask: u8) -> bool {
        self.features & mask != 0
    }

    /// Traversal time in seconds, optionally capping the speed (km/h)
    pub fn travel_time(&self, max_speed: Option<f64>) -> f64 {
        let speed = max_speed.map_or(self.speed, |cap| self.speed.min(cap));
        if speed <= 0.0 {
            return f64::INFINITY;
        }
        self.distance / (speed / 3.6)
    }

    /// The same road travelled the other way round
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut geometry = self.geometry.clone();
        geometry.0.reverse();
        Self {
            geometry,
            ..self.clone()
        }
    }
}
