//! Service limits and defaults of the isochrone engine

use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

use crate::{Error, request::TravelRangeType, routing::RoutingProfile};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IsochronesConfig {
    /// Travellers allowed in one request
    pub maximum_locations: usize,
    /// Thresholds allowed per traveller
    pub maximum_intervals: usize,
    /// Metres
    pub maximum_range_distance: f64,
    /// Seconds
    pub maximum_range_time: f64,
    /// Per profile overrides keyed by profile name, e.g. `driving-car`
    pub profile_maximum_range_distance: HashMap<String, f64>,
    pub profile_maximum_range_time: HashMap<String, f64>,
    pub allow_compute_area: bool,
    /// Metres
    pub maximum_snapping_radius: f64,
    pub default_calc_method: String,
}

impl Default for IsochronesConfig {
    fn default() -> Self {
        Self {
            maximum_locations: 2,
            maximum_intervals: 10,
            maximum_range_distance: 50_000.0,
            maximum_range_time: 18_000.0,
            profile_maximum_range_distance: HashMap::new(),
            profile_maximum_range_time: HashMap::new(),
            allow_compute_area: true,
            maximum_snapping_radius: 350.0,
            default_calc_method: "concaveballs".to_string(),
        }
    }
}

impl IsochronesConfig {
    pub fn from_toml_str(toml: &str) -> Result<Self, Error> {
        Ok(toml::from_str(toml)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        log::info!("Loading isochrones config from {}", path.display());
        Self::from_toml_str(&fs::read_to_string(path)?)
    }

    /// Largest range a profile may request, in seconds or metres
    pub fn maximum_range(&self, profile: RoutingProfile, range_type: TravelRangeType) -> f64 {
        let (overrides, default) = match range_type {
            TravelRangeType::Time => (&self.profile_maximum_range_time, self.maximum_range_time),
            TravelRangeType::Distance => (
                &self.profile_maximum_range_distance,
                self.maximum_range_distance,
            ),
        };
        overrides.get(profile.as_str()).copied().unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = IsochronesConfig::from_toml_str("").unwrap();
        assert_eq!(config, IsochronesConfig::default());
        assert_eq!(config.default_calc_method, "concaveballs");
    }

    #[test]
    fn profile_overrides_take_precedence() {
        let config = IsochronesConfig::from_toml_str(
            r#"
            maximum_locations = 5
            maximum_range_time = 3600

            [profile_maximum_range_time]
            foot-walking = 7200
            "#,
        )
        .unwrap();

        assert_eq!(config.maximum_locations, 5);
        assert_eq!(
            config.maximum_range(RoutingProfile::FootWalking, TravelRangeType::Time),
            7200.0
        );
        assert_eq!(
            config.maximum_range(RoutingProfile::DrivingCar, TravelRangeType::Time),
            3600.0
        );
        assert_eq!(
            config.maximum_range(RoutingProfile::DrivingCar, TravelRangeType::Distance),
            50_000.0
        );
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let result = IsochronesConfig::from_toml_str("maximum_locations = \"many\"");
        assert!(matches!(result, Err(Error::ConfigError(_))));
    }
}
