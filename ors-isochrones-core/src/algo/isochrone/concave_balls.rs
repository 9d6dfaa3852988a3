//! Isochrone polygons from buffered shortest path tree edges.
//!
//! Every tree edge reachable within a threshold contributes points offset
//! perpendicular to its geometry ("balls" around the road); edges crossing the
//! threshold are cut where the cost reaches it. The concave hull of the point
//! cloud becomes the isochrone.

use std::time::Instant;

use geo::algorithm::concave_hull::ConcaveHullOptions;
use geo::{Area, BooleanOps, ConcaveHull, Contains, Coord, MultiPoint, Polygon};
use hashbrown::HashSet;
use petgraph::graph::EdgeIndex;

use super::IsochroneMapBuilder;
use crate::{
    Error, Isochrone, IsochroneMap,
    algo::reachability::{ReachabilityMap, find_reachability},
    geometry::haversine_distance,
    request::{IsochroneSearchParameters, TravelRangeType},
    routing::SearchContext,
    units::{degrees_to_metres, metres_to_degrees},
};

/// Perpendicular offset of buffer points, degrees
const BUFFER_SIZE: f64 = 0.0018;
const HIGH_DETAIL_BUFFER_SIZE: f64 = 0.000_18;
/// Below this many reached nodes the point cloud is built in high detail
const HIGH_DETAIL_ENTRY_LIMIT: usize = 1000;
/// Threshold spacing below which consecutive isochrones are built in high detail
const HIGH_DETAIL_RANGE_DIFFERENCE: f64 = 1000.0;
/// Edges ending beyond this share of the threshold follow their geometry
const DETAILED_ZONE_FACTOR: f64 = 0.85;
/// Edges longer than this (metres) always follow their geometry
const DETAILED_EDGE_LENGTH: f64 = 200.0;
/// Edges longer than this (metres) are never split
const MAX_SPLIT_EDGE_LENGTH: f64 = 20_000.0;
const MIN_SMOOTHING_DISTANCE: f64 = 0.006;
const LARGE_SMOOTHING_DISTANCE: f64 = 0.012;
/// Radius (metres) from which the coarser default smoothing is used
const LARGE_RADIUS: f64 = 5000.0;
const DEFAULT_CONCAVITY: f64 = 2.0;

pub struct ConcaveBallsIsochroneMapBuilder<'a> {
    ctx: &'a SearchContext<'a>,
    previous_hull: Vec<Coord<f64>>,
    previous_polygon: Option<Polygon<f64>>,
}

impl<'a> ConcaveBallsIsochroneMapBuilder<'a> {
    pub fn new(ctx: &'a SearchContext<'a>) -> Self {
        Self {
            ctx,
            previous_hull: Vec::new(),
            previous_polygon: None,
        }
    }

    /// Metres covered per unit of range at the max and the mean speed
    fn metres_per_unit(&self, parameters: &IsochroneSearchParameters) -> (f64, f64) {
        match parameters.range_type() {
            TravelRangeType::Distance => (1.0, 1.0),
            TravelRangeType::Time => {
                let profile = self.ctx.profile();
                let max_speed = parameters
                    .route_parameters()
                    .effective_max_speed()
                    .min(profile.isochrone_speed());
                let mean_speed = profile.mean_speed().min(max_speed);
                (max_speed / 3.6, mean_speed / 3.6)
            }
        }
    }

    fn collect_points(
        &self,
        reachability: &ReachabilityMap,
        dead_ends: &HashSet<EdgeIndex>,
        band: &Band,
    ) -> PointCloud {
        let graph = self.ctx.graph();
        let detailed_zone = band.value * DETAILED_ZONE_FACTOR;
        let mut cloud = PointCloud::default();

        for entry in reachability.tree_entries() {
            let Some(parent) = entry.parent else {
                continue;
            };
            let (min_cost, max_cost) = (parent.cost, entry.cost);

            // covered by the previous hull
            if min_cost < band.previous && band.difference > HIGH_DETAIL_RANGE_DIFFERENCE {
                continue;
            }
            let (Some(road), Some(coords)) = (
                graph.edge(parent.edge),
                graph.edge_geometry_from(parent.edge, parent.node),
            ) else {
                continue;
            };

            if max_cost <= band.value {
                let dead_end = dead_ends.contains(&parent.edge);
                // dead ends only matter for small, detailed areas
                if dead_end && !band.high_detail {
                    continue;
                }

                let long_edge = road.distance > DETAILED_EDGE_LENGTH;
                if !long_edge && max_cost < detailed_zone {
                    if let Some(end) = coords.last() {
                        cloud.add(*end);
                    }
                    continue;
                }

                let coords = if road.distance < MAX_SPLIT_EDGE_LENGTH {
                    split_line(&coords, band.split_length)
                } else {
                    coords
                };
                if long_edge {
                    add_line_buffer(&mut cloud, &coords, dead_end, band.buffer_size);
                } else {
                    for &coord in &coords {
                        cloud.add(coord);
                    }
                }
            } else if min_cost < band.value {
                let fraction = (band.value - min_cost) / (max_cost - min_cost);
                let cut = cut_line(&coords, fraction);
                add_line_buffer(&mut cloud, &cut, true, band.buffer_size);
            }
        }

        cloud
    }

    /// Hull of the band's point cloud, grown to cover the previous isochrone.
    ///
    /// Hull edges shorter than `length_threshold` degrees are kept as they are.
    fn build_polygon(
        &self,
        cloud: PointCloud,
        concavity: f64,
        length_threshold: f64,
        value: f64,
    ) -> Result<Polygon<f64>, Error> {
        let options = ConcaveHullOptions::default()
            .concavity(concavity)
            .length_threshold(length_threshold);
        let hull = MultiPoint::from(cloud.points).concave_hull_with_options(options);
        if hull.exterior().0.len() < 4 || hull.unsigned_area() <= 0.0 {
            return Err(Error::IsochroneComputation(format!(
                "degenerate hull for threshold {value}"
            )));
        }

        let Some(previous) = &self.previous_polygon else {
            return Ok(hull);
        };
        if hull.contains(previous) {
            return Ok(hull);
        }

        hull.union(previous)
            .0
            .into_iter()
            .max_by(|a, b| a.unsigned_area().total_cmp(&b.unsigned_area()))
            .map(|largest| Polygon::new(largest.exterior().clone(), vec![]))
            .ok_or_else(|| {
                Error::IsochroneComputation(format!("empty union for threshold {value}"))
            })
    }
}

impl IsochroneMapBuilder for ConcaveBallsIsochroneMapBuilder<'_> {
    fn compute(&mut self, parameters: &IsochroneSearchParameters) -> Result<IsochroneMap, Error> {
        let started = Instant::now();
        let reachability = find_reachability(self.ctx, parameters)?;
        log::debug!(
            "Traveller {}: {} nodes reached in {:?}",
            parameters.traveller_id(),
            reachability.len(),
            started.elapsed()
        );

        let mut map = IsochroneMap::new(parameters.traveller_id(), reachability.snapped_position());
        let dead_ends = mark_dead_ends(&reachability);
        let hull_concavity = concavity(parameters.smoothing_factor());
        self.previous_hull.clear();
        self.previous_polygon = None;

        let (max_metres_per_unit, mean_metres_per_unit) = self.metres_per_unit(parameters);
        let mut previous = 0.0;
        for &value in parameters.ranges() {
            let started = Instant::now();
            let mean_radius = mean_metres_per_unit * value;
            let band = Band::new(
                value,
                previous,
                max_metres_per_unit,
                reachability.len(),
                parameters.smoothing_factor(),
            );

            let mut cloud = self.collect_points(&reachability, &dead_ends, &band);
            for &coord in &self.previous_hull {
                cloud.add(coord);
            }
            previous = value;

            if cloud.len() < 3 {
                log::debug!(
                    "Traveller {}: skipping threshold {value}, only {} points",
                    parameters.traveller_id(),
                    cloud.len()
                );
                continue;
            }

            let points = cloud.len();
            let polygon = self.build_polygon(cloud, hull_concavity, band.smoothing, value)?;
            self.previous_hull = polygon.exterior().0.clone();
            self.previous_hull.pop();
            self.previous_polygon = Some(polygon.clone());

            map.add_isochrone(Isochrone::new(polygon, value, mean_radius)?);
            log::debug!(
                "Traveller {}: threshold {value} from {points} points in {:?}",
                parameters.traveller_id(),
                started.elapsed()
            );
        }

        Ok(map)
    }
}

/// Per-threshold settings of the point collection
struct Band {
    value: f64,
    previous: f64,
    /// Metres
    difference: f64,
    high_detail: bool,
    /// Degrees
    buffer_size: f64,
    /// Degrees
    smoothing: f64,
    /// Metres
    split_length: f64,
}

impl Band {
    /// `metres_per_unit` converts the range unit into metres at the max speed
    fn new(
        value: f64,
        previous: f64,
        metres_per_unit: f64,
        reached: usize,
        smoothing_factor: Option<f32>,
    ) -> Self {
        let difference = metres_per_unit * (value - previous);
        let high_detail =
            reached < HIGH_DETAIL_ENTRY_LIMIT || difference < HIGH_DETAIL_RANGE_DIFFERENCE;
        let smoothing = smoothing_distance(smoothing_factor, metres_per_unit * value);
        Self {
            value,
            previous,
            difference,
            high_detail,
            buffer_size: if high_detail {
                HIGH_DETAIL_BUFFER_SIZE
            } else {
                BUFFER_SIZE
            },
            smoothing,
            split_length: degrees_to_metres(smoothing),
        }
    }
}

/// Insertion ordered set of coordinates
#[derive(Default)]
struct PointCloud {
    points: Vec<Coord<f64>>,
    seen: HashSet<(u64, u64)>,
}

impl PointCloud {
    fn add(&mut self, coord: Coord<f64>) {
        if self.seen.insert((coord.x.to_bits(), coord.y.to_bits())) {
            self.points.push(coord);
        }
    }

    fn len(&self) -> usize {
        self.points.len()
    }
}

/// Tree edges leading to a node nothing else is reached from
fn mark_dead_ends(reachability: &ReachabilityMap) -> HashSet<EdgeIndex> {
    let entries = reachability
        .entries()
        .values()
        .chain(reachability.boundary().values());
    let parents: HashSet<_> = entries
        .clone()
        .filter_map(|entry| entry.parent.map(|p| p.node))
        .collect();

    entries
        .filter(|entry| !parents.contains(&entry.node))
        .filter_map(|entry| entry.parent.map(|p| p.edge))
        .collect()
}

/// Split length in degrees
fn smoothing_distance(smoothing_factor: Option<f32>, max_radius: f64) -> f64 {
    match smoothing_factor {
        None if max_radius < LARGE_RADIUS => MIN_SMOOTHING_DISTANCE,
        None => LARGE_SMOOTHING_DISTANCE,
        Some(factor) => {
            (metres_to_degrees(max_radius) / 100.0 * f64::from(factor)).max(MIN_SMOOTHING_DISTANCE)
        }
    }
}

/// Hull concavity; higher smoothing gives smoother, larger polygons
fn concavity(smoothing_factor: Option<f32>) -> f64 {
    smoothing_factor.map_or(DEFAULT_CONCAVITY, |factor| {
        1.0 + f64::from(factor).clamp(0.0, 100.0) / 25.0
    })
}

/// Inserts points so that no segment is longer than `max_length` metres
fn split_line(coords: &[Coord<f64>], max_length: f64) -> Vec<Coord<f64>> {
    let Some(&first) = coords.first() else {
        return Vec::new();
    };
    let mut result = vec![first];

    for pair in coords.windows(2) {
        let (start, end) = (pair[0], pair[1]);
        let length = haversine_distance(start, end);
        if max_length > 0.0 && length > max_length {
            let pieces = (length / max_length).ceil() as usize;
            for i in 1..pieces {
                result.push(lerp(start, end, i as f64 / pieces as f64));
            }
        }
        result.push(end);
    }
    result
}

/// Leading part of the line covering `fraction` of its length
fn cut_line(coords: &[Coord<f64>], fraction: f64) -> Vec<Coord<f64>> {
    let Some(&first) = coords.first() else {
        return Vec::new();
    };
    let lengths: Vec<f64> = coords
        .windows(2)
        .map(|pair| haversine_distance(pair[0], pair[1]))
        .collect();
    let target = lengths.iter().sum::<f64>() * fraction.clamp(0.0, 1.0);

    let mut result = vec![first];
    let mut covered = 0.0;
    for (pair, &length) in coords.windows(2).zip(&lengths) {
        if covered + length >= target {
            let t = if length > 0.0 {
                (target - covered) / length
            } else {
                0.0
            };
            result.push(lerp(pair[0], pair[1], t));
            break;
        }
        covered += length;
        result.push(pair[1]);
    }
    result
}

fn add_line_buffer(
    cloud: &mut PointCloud,
    coords: &[Coord<f64>],
    add_last: bool,
    buffer_size: f64,
) {
    if coords.len() == 1 {
        cloud.add(coords[0]);
        return;
    }
    let segments = coords.len().saturating_sub(1);
    for (i, pair) in coords.windows(2).enumerate() {
        let last = add_last && i + 1 == segments;
        add_buffer_points(cloud, pair[0], pair[1], last, buffer_size);
    }
}

/// Points offset perpendicular to the segment at its start, its middle when
/// long enough, and optionally its end
fn add_buffer_points(
    cloud: &mut PointCloud,
    start: Coord<f64>,
    end: Coord<f64>,
    add_last: bool,
    buffer_size: f64,
) {
    let dx = start.x - end.x;
    let dy = start.y - end.y;
    let norm = dx.hypot(dy);
    if norm == 0.0 {
        cloud.add(start);
        return;
    }
    let scale = buffer_size / norm;
    let offset = Coord {
        x: -dy * scale,
        y: dx * scale,
    };

    cloud.add(start + offset);
    cloud.add(start - offset);
    if norm > 2.0 * buffer_size {
        let middle = lerp(start, end, 0.5);
        cloud.add(middle + offset);
        cloud.add(middle - offset);
    }
    if add_last {
        cloud.add(end + offset);
        cloud.add(end - offset);
    }
}

fn lerp(start: Coord<f64>, end: Coord<f64>, t: f64) -> Coord<f64> {
    Coord {
        x: start.x + (end.x - start.x) * t,
        y: start.y + (end.y - start.y) * t,
    }
}
