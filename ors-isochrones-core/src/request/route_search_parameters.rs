use serde::Deserialize;

use crate::{model::AvoidFeature, routing::RoutingProfile};

/// Routing options of a traveller
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct RouteSearchParameters {
    pub profile: RoutingProfile,
    /// Speed cap in km/h, ignored unless positive
    pub max_speed: Option<f64>,
    pub avoid_features: Vec<AvoidFeature>,
}

impl RouteSearchParameters {
    pub fn new(profile: RoutingProfile) -> Self {
        Self {
            profile,
            ..Self::default()
        }
    }

    /// Speed cap actually applied: the profile maximum, lowered by `max_speed`
    pub fn effective_max_speed(&self) -> f64 {
        match self.max_speed {
            Some(speed) if speed > 0.0 => speed.min(self.profile.max_speed()),
            _ => self.profile.max_speed(),
        }
    }
}
