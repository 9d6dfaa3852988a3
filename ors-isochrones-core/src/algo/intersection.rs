//! Overlaps between the isochrones of different travellers

use std::sync::OnceLock;

use geo::{BooleanOps, BoundingRect, Intersects, MultiPolygon, Rect};
use itertools::Itertools;

use crate::{
    IsochroneMapCollection,
    geometry::{empty_rect, polygon_area},
    units::{DistanceUnit, convert_area},
};

/// Source isochrone of an intersection: map index and isochrone index
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContourRef {
    pub map_index: usize,
    pub isochrone_index: usize,
}

impl ContourRef {
    pub fn new(map_index: usize, isochrone_index: usize) -> Self {
        Self {
            map_index,
            isochrone_index,
        }
    }
}

/// Region covered by isochrones of two or more travellers
#[derive(Debug, Clone)]
pub struct IsochronesIntersection {
    geometry: MultiPolygon<f64>,
    contour_refs: Vec<ContourRef>,
    area: OnceLock<f64>,
    envelope: OnceLock<Rect<f64>>,
}

impl IsochronesIntersection {
    fn new(geometry: MultiPolygon<f64>, contour_refs: Vec<ContourRef>) -> Self {
        Self {
            geometry,
            contour_refs,
            area: OnceLock::new(),
            envelope: OnceLock::new(),
        }
    }

    pub fn geometry(&self) -> &MultiPolygon<f64> {
        &self.geometry
    }

    /// Contributing isochrones, sorted and without duplicates
    pub fn contour_refs(&self) -> &[ContourRef] {
        &self.contour_refs
    }

    pub fn area(&self, unit: DistanceUnit) -> f64 {
        let sq_meters = *self
            .area
            .get_or_init(|| self.geometry.iter().map(polygon_area).sum());
        convert_area(sq_meters, unit)
    }

    pub fn envelope(&self) -> Rect<f64> {
        *self
            .envelope
            .get_or_init(|| self.geometry.bounding_rect().unwrap_or_else(empty_rect))
    }
}

/// Pairwise overlaps between isochrones of different maps, followed by one
/// round of overlaps between those pairwise results.
///
/// Returns `None` when the collection has fewer than two maps. Pairs are
/// visited in ascending index order, so the output is deterministic.
pub fn compute_intersections(
    collection: &IsochroneMapCollection,
) -> Option<Vec<IsochronesIntersection>> {
    if collection.len() < 2 {
        return None;
    }

    let mut first_order = Vec::new();
    for ((i, map_a), (j, map_b)) in collection.maps().iter().enumerate().tuple_combinations() {
        for (k, iso_a) in map_a.isochrones().iter().enumerate() {
            for (l, iso_b) in map_b.isochrones().iter().enumerate() {
                if !iso_a.envelope().intersects(&iso_b.envelope()) {
                    continue;
                }
                let geometry = iso_a.geometry().intersection(iso_b.geometry());
                if geometry.0.is_empty() {
                    continue;
                }
                first_order.push(IsochronesIntersection::new(
                    geometry,
                    vec![ContourRef::new(i, k), ContourRef::new(j, l)],
                ));
            }
        }
    }

    let mut higher_order = Vec::new();
    for (a, b) in first_order.iter().tuple_combinations() {
        if !a.envelope().intersects(&b.envelope()) {
            continue;
        }
        let geometry = a.geometry().intersection(b.geometry());
        if geometry.0.is_empty() {
            continue;
        }
        let refs = a
            .contour_refs()
            .iter()
            .chain(b.contour_refs())
            .copied()
            .sorted()
            .dedup()
            .collect();
        higher_order.push(IsochronesIntersection::new(geometry, refs));
    }

    log::debug!(
        "Found {} pairwise and {} higher order intersections",
        first_order.len(),
        higher_order.len()
    );
    first_order.extend(higher_order);
    Some(first_order)
}
