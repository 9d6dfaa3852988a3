use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{Error, model::TravelMode};

/// Routing profile a traveller moves with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoutingProfile {
    #[default]
    DrivingCar,
    DrivingHgv,
    CyclingRegular,
    FootWalking,
    FootHiking,
    Wheelchair,
}

impl RoutingProfile {
    pub fn as_str(self) -> &'static str {
        match self {
            RoutingProfile::DrivingCar => "driving-car",
            RoutingProfile::DrivingHgv => "driving-hgv",
            RoutingProfile::CyclingRegular => "cycling-regular",
            RoutingProfile::FootWalking => "foot-walking",
            RoutingProfile::FootHiking => "foot-hiking",
            RoutingProfile::Wheelchair => "wheelchair",
        }
    }

    pub fn travel_mode(self) -> TravelMode {
        match self {
            RoutingProfile::DrivingCar | RoutingProfile::DrivingHgv => TravelMode::Car,
            RoutingProfile::CyclingRegular => TravelMode::Bike,
            RoutingProfile::FootWalking | RoutingProfile::FootHiking => TravelMode::Foot,
            RoutingProfile::Wheelchair => TravelMode::Wheelchair,
        }
    }

    /// Highest speed (km/h) the profile can travel at
    pub fn max_speed(self) -> f64 {
        match self {
            RoutingProfile::DrivingCar => 140.0,
            RoutingProfile::DrivingHgv => 90.0,
            RoutingProfile::CyclingRegular => 30.0,
            RoutingProfile::FootWalking | RoutingProfile::FootHiking => 5.0,
            RoutingProfile::Wheelchair => 4.0,
        }
    }

    /// Speed (km/h) bounding the max radius of time isochrones.
    ///
    /// Walking profiles route at up to 5 km/h but their areas are sized at 4 km/h.
    pub fn isochrone_speed(self) -> f64 {
        match self {
            RoutingProfile::FootWalking | RoutingProfile::FootHiking => 4.0,
            _ => self.max_speed(),
        }
    }

    /// Typical speed (km/h), used for the mean radius of time isochrones
    pub fn mean_speed(self) -> f64 {
        match self {
            RoutingProfile::DrivingCar => 64.0,
            RoutingProfile::DrivingHgv => 60.0,
            RoutingProfile::CyclingRegular => 16.0,
            RoutingProfile::FootWalking => 5.0,
            RoutingProfile::FootHiking => 4.0,
            RoutingProfile::Wheelchair => 4.0,
        }
    }
}

impl FromStr for RoutingProfile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let profile = match s.to_ascii_lowercase().as_str() {
            "driving-car" => RoutingProfile::DrivingCar,
            "driving-hgv" => RoutingProfile::DrivingHgv,
            "cycling-regular" => RoutingProfile::CyclingRegular,
            "foot-walking" => RoutingProfile::FootWalking,
            "foot-hiking" => RoutingProfile::FootHiking,
            "wheelchair" => RoutingProfile::Wheelchair,
            _ => return Err(Error::InvalidData(format!("unknown routing profile '{s}'"))),
        };
        Ok(profile)
    }
}

impl fmt::Display for RoutingProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_profile_names() {
        assert_eq!(
            "cycling-regular".parse::<RoutingProfile>().unwrap(),
            RoutingProfile::CyclingRegular
        );
        assert_eq!(
            "Driving-Car".parse::<RoutingProfile>().unwrap(),
            RoutingProfile::DrivingCar
        );
        assert!("rocket".parse::<RoutingProfile>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        let parsed: RoutingProfile = serde_json::from_str("\"foot-hiking\"").unwrap();
        assert_eq!(parsed.to_string(), "foot-hiking");
    }

    #[test]
    fn mean_speed_never_exceeds_max_speed() {
        for profile in [
            RoutingProfile::DrivingCar,
            RoutingProfile::DrivingHgv,
            RoutingProfile::CyclingRegular,
            RoutingProfile::FootWalking,
            RoutingProfile::FootHiking,
            RoutingProfile::Wheelchair,
        ] {
            assert!(profile.mean_speed() <= profile.max_speed(), "{profile}");
            assert!(profile.isochrone_speed() <= profile.max_speed(), "{profile}");
        }
    }

    #[test]
    fn walking_isochrones_use_reduced_speed() {
        assert_eq!(RoutingProfile::FootWalking.isochrone_speed(), 4.0);
        assert_eq!(RoutingProfile::FootHiking.isochrone_speed(), 4.0);
        assert_eq!(RoutingProfile::FootWalking.max_speed(), 5.0);
        assert_eq!(RoutingProfile::DrivingCar.isochrone_speed(), 140.0);
    }
}
