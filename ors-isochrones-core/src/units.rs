//! Distance and area units used by requests and results.
//!
//! Everything inside the engine is expressed in metres and square metres;
//! conversion happens only at the request boundary and in result accessors.

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::Error;

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.34;
const METERS_TO_KILOMETERS: f64 = 0.001;
const METERS_TO_MILES: f64 = 0.000_621_371;
const SQ_METERS_TO_SQ_KILOMETERS: f64 = 1e-6;
const SQ_METERS_TO_SQ_MILES: f64 = 3.861_02e-7;

/// One degree of latitude on a spherical earth
const ONE_DEGREE_LATITUDE_IN_METRES: f64 = 111_139.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    pub fn abbreviation(self) -> &'static str {
        match self {
            DistanceUnit::Meters => "m",
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Factor turning a value expressed in this unit into metres
    pub fn meters_scale(self) -> f64 {
        match self {
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Kilometers => METERS_PER_KILOMETER,
            DistanceUnit::Miles => METERS_PER_MILE,
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "m" | "meters" | "metres" => Ok(DistanceUnit::Meters),
            "km" | "kilometers" | "kilometres" => Ok(DistanceUnit::Kilometers),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(Error::InvalidData(format!("Unknown distance unit '{other}'"))),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Converts a length in metres into `unit`
pub fn convert_distance(meters: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meters => meters,
        DistanceUnit::Kilometers => meters * METERS_TO_KILOMETERS,
        DistanceUnit::Miles => meters * METERS_TO_MILES,
    }
}

/// Converts an area in square metres into the square of `unit`
pub fn convert_area(sq_meters: f64, unit: DistanceUnit) -> f64 {
    match unit {
        DistanceUnit::Meters => sq_meters,
        DistanceUnit::Kilometers => sq_meters * SQ_METERS_TO_SQ_KILOMETERS,
        DistanceUnit::Miles => sq_meters * SQ_METERS_TO_SQ_MILES,
    }
}

pub fn metres_to_degrees(metres: f64) -> f64 {
    metres / ONE_DEGREE_LATITUDE_IN_METRES
}

pub fn degrees_to_metres(degrees: f64) -> f64 {
    degrees * ONE_DEGREE_LATITUDE_IN_METRES
}
