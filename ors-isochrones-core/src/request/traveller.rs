use geo::Coord;
use serde::{Deserialize, Deserializer};

use super::RouteSearchParameters;

/// Whether the location is where travel starts or where it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationType {
    #[default]
    Start,
    Destination,
}

/// What the ranges of a traveller measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelRangeType {
    /// Seconds
    #[default]
    Time,
    /// Metres, or the request's distance unit before normalisation
    Distance,
}

/// One participant of an isochrone request
#[derive(Debug, Clone, Deserialize)]
pub struct TravellerInfo {
    #[serde(default)]
    pub id: usize,
    /// `[lon, lat]`
    #[serde(deserialize_with = "deserialize_location")]
    pub location: Coord<f64>,
    #[serde(default)]
    pub location_type: LocationType,
    #[serde(default)]
    pub range_type: TravelRangeType,
    /// Thresholds, ascending
    pub ranges: Vec<f64>,
    #[serde(flatten)]
    pub route_parameters: RouteSearchParameters,
}

impl TravellerInfo {
    pub fn new(
        location: Coord<f64>,
        location_type: LocationType,
        range_type: TravelRangeType,
        ranges: Vec<f64>,
        route_parameters: RouteSearchParameters,
    ) -> Self {
        Self {
            id: 0,
            location,
            location_type,
            range_type,
            ranges,
            route_parameters,
        }
    }

    pub fn maximum_range(&self) -> f64 {
        self.ranges.iter().copied().fold(0.0, f64::max)
    }
}

fn deserialize_location<'de, D>(deserializer: D) -> Result<Coord<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let [x, y] = <[f64; 2]>::deserialize(deserializer)?;
    Ok(Coord { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{model::AvoidFeature, routing::RoutingProfile};

    #[test]
    fn deserializes_with_defaults() {
        let traveller: TravellerInfo =
            serde_json::from_str(r#"{"location": [8.68, 49.41], "ranges": [300, 600]}"#).unwrap();
        assert_eq!(traveller.location, Coord { x: 8.68, y: 49.41 });
        assert_eq!(traveller.location_type, LocationType::Start);
        assert_eq!(traveller.range_type, TravelRangeType::Time);
        assert_eq!(traveller.route_parameters.profile, RoutingProfile::DrivingCar);
        assert_eq!(traveller.maximum_range(), 600.0);
    }

    #[test]
    fn deserializes_routing_options() {
        let traveller: TravellerInfo = serde_json::from_str(
            r#"{"location": [0, 0], "ranges": [1000], "location_type": "destination",
                "range_type": "distance", "profile": "foot-walking",
                "avoid_features": ["steps"], "max_speed": 4}"#,
        )
        .unwrap();
        assert_eq!(traveller.location_type, LocationType::Destination);
        assert_eq!(traveller.range_type, TravelRangeType::Distance);
        assert_eq!(traveller.route_parameters.profile, RoutingProfile::FootWalking);
        assert_eq!(traveller.route_parameters.avoid_features, vec![AvoidFeature::Steps]);
        assert_eq!(traveller.route_parameters.max_speed, Some(4.0));
    }

    #[test]
    fn rejects_malformed_location() {
        let result = serde_json::from_str::<TravellerInfo>(r#"{"location": [1], "ranges": [1]}"#);
        assert!(result.is_err());
    }
}
