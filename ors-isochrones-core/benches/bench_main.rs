use criterion::{Criterion, black_box, criterion_group, criterion_main};
use geo::{Coord, LineString};

use ors_isochrones_core::{
    IsochroneMapCollection, RoadEdge, RoadGraph, build_isochrone_map, compute_intersections,
    loading::RoadGraphBuilder,
    prelude::{
        IsochroneSearchParameters, IsochronesConfig, LocationType, RouteSearchParameters,
        RoutingProfile, TravelRangeType, TravellerInfo,
    },
};

const GRID_SIZE: usize = 60;
const SPACING: f64 = 150.0;
const METERS_PER_DEGREE: f64 = 111_195.08;

fn grid_graph() -> RoadGraph {
    let mut builder = RoadGraphBuilder::new();
    let step = SPACING / METERS_PER_DEGREE;
    let id = |row: usize, col: usize| (row * GRID_SIZE + col) as u64;

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            builder.add_node(id(row, col), col as f64 * step, row as f64 * step);
        }
    }
    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            // alternate residential and arterial speeds
            let speed = if row % 5 == 0 || col % 5 == 0 { 50.0 } else { 30.0 };
            let road = RoadEdge::new(SPACING, speed, LineString::new(vec![]));
            if col + 1 < GRID_SIZE {
                builder
                    .add_road(id(row, col), id(row, col + 1), road.clone(), true)
                    .unwrap();
            }
            if row + 1 < GRID_SIZE {
                builder
                    .add_road(id(row, col), id(row + 1, col), road, true)
                    .unwrap();
            }
        }
    }
    builder.build()
}

fn parameters(location: Coord<f64>) -> IsochroneSearchParameters {
    let traveller = TravellerInfo::new(
        location,
        LocationType::Start,
        TravelRangeType::Time,
        vec![120.0, 240.0, 360.0],
        RouteSearchParameters::new(RoutingProfile::DrivingCar),
    );
    IsochroneSearchParameters::from_traveller(0, &traveller)
}

fn isochrone_benchmark(c: &mut Criterion) {
    let graph = grid_graph();
    let config = IsochronesConfig::default();
    let half = GRID_SIZE as f64 * SPACING / METERS_PER_DEGREE / 2.0;
    let center = parameters(Coord { x: half, y: half });

    c.bench_function("concave balls, three thresholds", |b| {
        b.iter(|| black_box(build_isochrone_map(&graph, &center, &config).unwrap()))
    });

    let mut collection = IsochroneMapCollection::new();
    for offset in [0.7, 1.0, 1.3] {
        let location = Coord {
            x: half * offset,
            y: half,
        };
        collection.add(build_isochrone_map(&graph, &parameters(location), &config).unwrap());
    }
    c.bench_function("intersections of three travellers", |b| {
        b.iter(|| black_box(compute_intersections(&collection)))
    });
}

criterion_group!(benches, isochrone_benchmark);
criterion_main!(benches);
