//! Geometry helpers: equal-area projection, envelopes and distances.
//!
//! Polygons are kept in WGS84 longitude/latitude. Anything that needs a planar
//! measure (areas, extents) goes through the Mollweide projection first.

use std::f64::consts::{FRAC_PI_2, PI, SQRT_2};

use geo::{Area, Coord, Distance, Haversine, MapCoords, Point, Polygon, Rect};

/// Radius of the sphere with the same surface as the WGS84 ellipsoid
const AUTHALIC_EARTH_RADIUS: f64 = 6_371_007.181;
const MOLLWEIDE_MAX_ITERATIONS: usize = 50;
const MOLLWEIDE_EPSILON: f64 = 1e-12;

/// Projects a WGS84 coordinate to the Mollweide equal-area projection (metres)
pub fn mollweide(coord: Coord<f64>) -> Coord<f64> {
    let lambda = coord.x.to_radians();
    let phi = coord.y.to_radians();

    let theta = if (phi.abs() - FRAC_PI_2).abs() < MOLLWEIDE_EPSILON {
        phi
    } else {
        // Newton iteration on 2θ + sin 2θ = π sin φ
        let target = PI * phi.sin();
        let mut theta = phi;
        for _ in 0..MOLLWEIDE_MAX_ITERATIONS {
            let derivative = 2.0 + 2.0 * (2.0 * theta).cos();
            if derivative.abs() < MOLLWEIDE_EPSILON {
                break;
            }
            let delta = (2.0 * theta + (2.0 * theta).sin() - target) / derivative;
            theta -= delta;
            if delta.abs() < MOLLWEIDE_EPSILON {
                break;
            }
        }
        theta
    };

    Coord {
        x: AUTHALIC_EARTH_RADIUS * 2.0 * SQRT_2 / PI * lambda * theta.cos(),
        y: AUTHALIC_EARTH_RADIUS * SQRT_2 * theta.sin(),
    }
}

/// Area of a WGS84 polygon in square metres
pub fn polygon_area(polygon: &Polygon<f64>) -> f64 {
    polygon.map_coords(mollweide).unsigned_area()
}

/// Smallest rectangle covering both envelopes
pub fn expand_envelope(envelope: Option<Rect<f64>>, other: Rect<f64>) -> Rect<f64> {
    match envelope {
        None => other,
        Some(current) => Rect::new(
            Coord {
                x: current.min().x.min(other.min().x),
                y: current.min().y.min(other.min().y),
            },
            Coord {
                x: current.max().x.max(other.max().x),
                y: current.max().y.max(other.max().y),
            },
        ),
    }
}

/// Whether `outer` covers `inner` (boundaries included)
pub fn envelope_contains(outer: &Rect<f64>, inner: &Rect<f64>) -> bool {
    outer.min().x <= inner.min().x
        && outer.min().y <= inner.min().y
        && outer.max().x >= inner.max().x
        && outer.max().y >= inner.max().y
}

/// Great-circle distance in metres
pub fn haversine_distance(a: Coord<f64>, b: Coord<f64>) -> f64 {
    Haversine.distance(Point::from(a), Point::from(b))
}

pub(crate) fn empty_rect() -> Rect<f64> {
    let origin = Coord { x: 0.0, y: 0.0 };
    Rect::new(origin, origin)
}
