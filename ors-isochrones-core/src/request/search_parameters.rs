use geo::Coord;

use super::{
    IsochroneAttribute, LocationType, RouteSearchParameters, TravelRangeType, TravellerInfo,
};
use crate::units::DistanceUnit;

/// Everything one traveller's isochrone computation needs.
///
/// Ranges are normalised: seconds for time, metres for distance.
#[derive(Debug, Clone)]
pub struct IsochroneSearchParameters {
    traveller_id: usize,
    location: Coord<f64>,
    reverse_direction: bool,
    range_type: TravelRangeType,
    ranges: Vec<f64>,
    calc_method: String,
    smoothing_factor: Option<f32>,
    units: DistanceUnit,
    area_units: DistanceUnit,
    attributes: Vec<IsochroneAttribute>,
    route_parameters: RouteSearchParameters,
}

impl IsochroneSearchParameters {
    pub fn from_traveller(traveller_id: usize, traveller: &TravellerInfo) -> Self {
        Self {
            traveller_id,
            location: traveller.location,
            reverse_direction: traveller.location_type == LocationType::Destination,
            range_type: traveller.range_type,
            ranges: traveller.ranges.clone(),
            calc_method: String::new(),
            smoothing_factor: None,
            units: DistanceUnit::Meters,
            area_units: DistanceUnit::Meters,
            attributes: Vec::new(),
            route_parameters: traveller.route_parameters.clone(),
        }
    }

    #[must_use]
    pub fn with_calc_method(mut self, calc_method: impl Into<String>) -> Self {
        self.calc_method = calc_method.into();
        self
    }

    #[must_use]
    pub fn with_smoothing_factor(mut self, smoothing_factor: Option<f32>) -> Self {
        self.smoothing_factor = smoothing_factor;
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: DistanceUnit, area_units: DistanceUnit) -> Self {
        self.units = units;
        self.area_units = area_units;
        self
    }

    #[must_use]
    pub fn with_attributes(mut self, attributes: Vec<IsochroneAttribute>) -> Self {
        self.attributes = attributes;
        self
    }

    #[must_use]
    pub fn with_ranges(mut self, ranges: Vec<f64>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn traveller_id(&self) -> usize {
        self.traveller_id
    }

    pub fn location(&self) -> Coord<f64> {
        self.location
    }

    pub fn reverse_direction(&self) -> bool {
        self.reverse_direction
    }

    pub fn range_type(&self) -> TravelRangeType {
        self.range_type
    }

    pub fn ranges(&self) -> &[f64] {
        &self.ranges
    }

    /// Largest threshold, the cost ceiling of the reachability search
    pub fn maximum_range(&self) -> f64 {
        self.ranges.iter().copied().fold(0.0, f64::max)
    }

    /// Requested method name, empty for the default one
    pub fn calc_method(&self) -> &str {
        &self.calc_method
    }

    pub fn smoothing_factor(&self) -> Option<f32> {
        self.smoothing_factor
    }

    pub fn units(&self) -> DistanceUnit {
        self.units
    }

    pub fn area_units(&self) -> DistanceUnit {
        self.area_units
    }

    pub fn attributes(&self) -> &[IsochroneAttribute] {
        &self.attributes
    }

    pub fn route_parameters(&self) -> &RouteSearchParameters {
        &self.route_parameters
    }
}
