//! Isochrone polygons and their per-traveller and per-request aggregates

use std::sync::OnceLock;

use geo::{BoundingRect, Coord, Polygon, Rect, Validation};

use crate::{
    Error,
    geometry::{empty_rect, expand_envelope, polygon_area},
    units::{DistanceUnit, convert_area, convert_distance},
};

/// Area reachable within one threshold
#[derive(Debug, Clone)]
pub struct Isochrone {
    geometry: Polygon<f64>,
    value: f64,
    /// Metres
    max_radius: f64,
    area: OnceLock<f64>,
    envelope: OnceLock<Rect<f64>>,
}

impl Isochrone {
    /// Wraps a polygon built for threshold `value`.
    ///
    /// The polygon must be a simple closed ring of finite coordinates.
    pub fn new(geometry: Polygon<f64>, value: f64, max_radius: f64) -> Result<Self, Error> {
        let ring = geometry.exterior();
        if ring.0.len() < 4 || !ring.is_closed() {
            return Err(Error::IsochroneComputation(format!(
                "isochrone for {value} is not a closed polygon"
            )));
        }
        if ring.0.iter().any(|c| !c.x.is_finite() || !c.y.is_finite()) {
            return Err(Error::IsochroneComputation(format!(
                "isochrone for {value} has non-finite coordinates"
            )));
        }
        if let Err(e) = geometry.check_validation() {
            return Err(Error::IsochroneComputation(format!(
                "isochrone for {value} is not a simple polygon: {e}"
            )));
        }

        Ok(Self {
            geometry,
            value,
            max_radius,
            area: OnceLock::new(),
            envelope: OnceLock::new(),
        })
    }

    /// Polygon in WGS84 longitude/latitude
    pub fn geometry(&self) -> &Polygon<f64> {
        &self.geometry
    }

    /// Threshold in seconds or metres
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Area in the square of `unit`, measured on an equal-area projection
    pub fn area(&self, unit: DistanceUnit) -> f64 {
        let sq_meters = *self.area.get_or_init(|| polygon_area(&self.geometry));
        convert_area(sq_meters, unit)
    }

    pub fn max_radius(&self, unit: DistanceUnit) -> f64 {
        convert_distance(self.max_radius, unit)
    }

    /// Share of the circle with radius `max_radius` covered by the polygon, at most 1
    pub fn reach_factor(&self) -> f64 {
        if self.max_radius <= 0.0 {
            return 0.0;
        }
        let circle = std::f64::consts::PI * self.max_radius * self.max_radius;
        (self.area(DistanceUnit::Meters) / circle).min(1.0)
    }

    pub fn envelope(&self) -> Rect<f64> {
        *self
            .envelope
            .get_or_init(|| self.geometry.bounding_rect().unwrap_or_else(empty_rect))
    }
}

/// Isochrones of one traveller, ascending by threshold
#[derive(Debug, Clone)]
pub struct IsochroneMap {
    traveller_id: usize,
    center: Coord<f64>,
    isochrones: Vec<Isochrone>,
    envelope: Option<Rect<f64>>,
}

impl IsochroneMap {
    pub fn new(traveller_id: usize, center: Coord<f64>) -> Self {
        Self {
            traveller_id,
            center,
            isochrones: Vec::new(),
            envelope: None,
        }
    }

    /// Appends an isochrone; callers add them in ascending threshold order
    pub fn add_isochrone(&mut self, isochrone: Isochrone) {
        self.envelope = Some(expand_envelope(self.envelope, isochrone.envelope()));
        self.isochrones.push(isochrone);
    }

    pub fn traveller_id(&self) -> usize {
        self.traveller_id
    }

    pub fn center(&self) -> Coord<f64> {
        self.center
    }

    pub fn isochrones(&self) -> &[Isochrone] {
        &self.isochrones
    }

    pub fn isochrone(&self, index: usize) -> Option<&Isochrone> {
        self.isochrones.get(index)
    }

    pub fn isochrones_count(&self) -> usize {
        self.isochrones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.isochrones.is_empty()
    }

    /// Union of the envelopes of all isochrones, `None` while empty
    pub fn envelope(&self) -> Option<Rect<f64>> {
        self.envelope
    }
}

/// Isochrone maps of all travellers of a request
#[derive(Debug, Clone, Default)]
pub struct IsochroneMapCollection {
    maps: Vec<IsochroneMap>,
    isochrones_count: usize,
}

impl IsochroneMapCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, map: IsochroneMap) {
        self.isochrones_count += map.isochrones_count();
        self.maps.push(map);
    }

    pub fn maps(&self) -> &[IsochroneMap] {
        &self.maps
    }

    pub fn get(&self, index: usize) -> Option<&IsochroneMap> {
        self.maps.get(index)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    pub fn isochrones_count(&self) -> usize {
        self.isochrones_count
    }
}
