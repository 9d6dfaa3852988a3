use std::str::FromStr;

use geo::Coord;
use serde::Deserialize;

use super::{IsochroneSearchParameters, TravelRangeType, TravellerInfo};
use crate::{Error, IsochronesConfig, algo::isochrone::CalculationMethod, units::DistanceUnit};

/// Optional per-isochrone values a request can ask for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IsochroneAttribute {
    Area,
    #[serde(rename = "reachfactor")]
    ReachFactor,
}

/// A multi-traveller isochrone request
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IsochroneRequest {
    travellers: Vec<TravellerInfo>,
    calc_method: String,
    /// Unit of distance ranges and of reported radii
    units: DistanceUnit,
    area_units: DistanceUnit,
    #[serde(rename = "intersections")]
    include_intersections: bool,
    attributes: Vec<IsochroneAttribute>,
    #[serde(rename = "smoothing")]
    smoothing_factor: Option<f32>,
}

impl IsochroneRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self, Error> {
        let mut request: IsochroneRequest = serde_json::from_str(json)?;
        for (id, traveller) in request.travellers.iter_mut().enumerate() {
            traveller.id = id;
        }
        Ok(request)
    }

    /// Appends a traveller, assigning it the next id
    pub fn add_traveller(&mut self, mut traveller: TravellerInfo) {
        traveller.id = self.travellers.len();
        self.travellers.push(traveller);
    }

    pub fn travellers(&self) -> &[TravellerInfo] {
        &self.travellers
    }

    pub fn locations(&self) -> Vec<Coord<f64>> {
        self.travellers.iter().map(|t| t.location).collect()
    }

    pub fn calc_method(&self) -> &str {
        &self.calc_method
    }

    #[must_use]
    pub fn with_calc_method(mut self, calc_method: impl Into<String>) -> Self {
        self.calc_method = calc_method.into();
        self
    }

    pub fn units(&self) -> DistanceUnit {
        self.units
    }

    pub fn area_units(&self) -> DistanceUnit {
        self.area_units
    }

    #[must_use]
    pub fn with_units(mut self, units: DistanceUnit, area_units: DistanceUnit) -> Self {
        self.units = units;
        self.area_units = area_units;
        self
    }

    pub fn include_intersections(&self) -> bool {
        self.include_intersections
    }

    #[must_use]
    pub fn with_intersections(mut self, include: bool) -> Self {
        self.include_intersections = include;
        self
    }

    pub fn attributes(&self) -> &[IsochroneAttribute] {
        &self.attributes
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<IsochroneAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn has_attribute(&self, attribute: IsochroneAttribute) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn smoothing_factor(&self) -> Option<f32> {
        self.smoothing_factor
    }

    #[must_use]
    pub fn with_smoothing_factor(mut self, smoothing_factor: Option<f32>) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    /// Search parameters of one traveller, with distance ranges in metres
    pub fn search_parameters(
        &self,
        traveller_index: usize,
    ) -> Result<IsochroneSearchParameters, Error> {
        let traveller = self.travellers.get(traveller_index).ok_or_else(|| {
            Error::InvalidData(format!("no traveller with index {traveller_index}"))
        })?;

        let ranges = match traveller.range_type {
            TravelRangeType::Time => traveller.ranges.clone(),
            TravelRangeType::Distance => traveller
                .ranges
                .iter()
                .map(|range| range * self.units.meters_scale())
                .collect(),
        };

        Ok(IsochroneSearchParameters::from_traveller(traveller.id, traveller)
            .with_ranges(ranges)
            .with_calc_method(self.calc_method.clone())
            .with_smoothing_factor(self.smoothing_factor)
            .with_units(self.units, self.area_units)
            .with_attributes(self.attributes.clone()))
    }

    /// Checks the request against the service limits
    pub fn validate(&self, config: &IsochronesConfig) -> Result<(), Error> {
        if self.travellers.is_empty() {
            return Err(Error::InvalidData("request has no travellers".to_string()));
        }
        if self.travellers.len() > config.maximum_locations {
            return Err(Error::RequestLimit(format!(
                "{} locations requested, at most {} allowed",
                self.travellers.len(),
                config.maximum_locations
            )));
        }
        if !self.calc_method.is_empty() {
            CalculationMethod::from_str(&self.calc_method)?;
        }
        if !config.allow_compute_area && !self.attributes.is_empty() {
            return Err(Error::RequestLimit(
                "area computation is disabled".to_string(),
            ));
        }

        for index in 0..self.travellers.len() {
            let parameters = self.search_parameters(index)?;
            let ranges = parameters.ranges();
            if ranges.is_empty() {
                return Err(Error::InvalidData(format!(
                    "traveller {index} has no ranges"
                )));
            }
            if ranges.len() > config.maximum_intervals {
                return Err(Error::RequestLimit(format!(
                    "traveller {index} requests {} intervals, at most {} allowed",
                    ranges.len(),
                    config.maximum_intervals
                )));
            }
            if ranges.iter().any(|range| !range.is_finite() || *range < 0.0) {
                return Err(Error::InvalidData(format!(
                    "traveller {index} has a negative or non-finite range"
                )));
            }

            let limit = config.maximum_range(
                parameters.route_parameters().profile,
                parameters.range_type(),
            );
            if parameters.maximum_range() > limit {
                return Err(Error::RequestLimit(format!(
                    "traveller {index} range {} exceeds the limit of {limit}",
                    parameters.maximum_range()
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUEST: &str = r#"{
        "travellers": [
            {"location": [8.68, 49.41], "ranges": [300, 600]},
            {"location": [8.70, 49.42], "range_type": "distance", "ranges": [2, 5],
             "location_type": "destination", "profile": "cycling-regular"}
        ],
        "units": "km",
        "area_units": "mi",
        "attributes": ["area", "reachfactor"],
        "intersections": true,
        "smoothing": 25
    }"#;

    #[test]
    fn parses_request_and_assigns_ids() {
        let request = IsochroneRequest::from_json_str(REQUEST).unwrap();
        assert_eq!(request.travellers().len(), 2);
        assert_eq!(request.travellers()[1].id, 1);
        assert!(request.include_intersections());
        assert!(request.has_attribute(IsochroneAttribute::ReachFactor));
        assert_eq!(request.smoothing_factor(), Some(25.0));
        assert_eq!(request.area_units(), DistanceUnit::Miles);
        assert_eq!(request.locations()[0], Coord { x: 8.68, y: 49.41 });
    }

    #[test]
    fn distance_ranges_are_converted_to_metres() {
        let request = IsochroneRequest::from_json_str(REQUEST).unwrap();

        let time = request.search_parameters(0).unwrap();
        assert_eq!(time.ranges(), &[300.0, 600.0]);

        let distance = request.search_parameters(1).unwrap();
        assert_eq!(distance.ranges(), &[2000.0, 5000.0]);
        assert!(distance.reverse_direction());
        assert_eq!(distance.smoothing_factor(), Some(25.0));
        assert!(request.search_parameters(2).is_err());
    }

    #[test]
    fn validates_against_limits() {
        let request = IsochroneRequest::from_json_str(REQUEST).unwrap();
        let config = IsochronesConfig::default();
        assert!(request.validate(&config).is_ok());

        let strict = IsochronesConfig {
            maximum_locations: 1,
            ..IsochronesConfig::default()
        };
        assert!(matches!(request.validate(&strict), Err(Error::RequestLimit(_))));

        let short = IsochronesConfig {
            maximum_range_distance: 4000.0,
            ..IsochronesConfig::default()
        };
        assert!(matches!(request.validate(&short), Err(Error::RequestLimit(_))));

        let no_area = IsochronesConfig {
            allow_compute_area: false,
            ..IsochronesConfig::default()
        };
        assert!(matches!(request.validate(&no_area), Err(Error::RequestLimit(_))));
    }

    #[test]
    fn rejects_bad_ranges_and_methods() {
        let config = IsochronesConfig::default();

        let negative =
            IsochroneRequest::from_json_str(r#"{"travellers": [{"location": [0, 0], "ranges": [-5]}]}"#)
                .unwrap();
        assert!(matches!(negative.validate(&config), Err(Error::InvalidData(_))));

        let empty = IsochroneRequest::new();
        assert!(matches!(empty.validate(&config), Err(Error::InvalidData(_))));

        let method = IsochroneRequest::from_json_str(
            r#"{"travellers": [{"location": [0, 0], "ranges": [60]}], "calc_method": "grid"}"#,
        )
        .unwrap();
        assert!(matches!(method.validate(&config), Err(Error::UnsupportedMethod(_))));
    }
}
