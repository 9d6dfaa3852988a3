//! Edge admissibility predicates

use crate::{
    model::{AvoidFeature, RoadEdge, TravelMode},
    request::RouteSearchParameters,
};

pub trait EdgeFilter: Send + Sync {
    fn accept(&self, edge: &RoadEdge) -> bool;
}

impl<F> EdgeFilter for F
where
    F: Fn(&RoadEdge) -> bool + Send + Sync,
{
    fn accept(&self, edge: &RoadEdge) -> bool {
        self(edge)
    }
}

/// Accepts edges open to a travel mode
#[derive(Debug, Clone, Copy)]
pub struct TravelModeFilter {
    mode: TravelMode,
}

impl TravelModeFilter {
    pub fn new(mode: TravelMode) -> Self {
        Self { mode }
    }
}

impl EdgeFilter for TravelModeFilter {
    fn accept(&self, edge: &RoadEdge) -> bool {
        edge.allows(self.mode)
    }
}

/// Rejects edges carrying any of the avoided features
#[derive(Debug, Clone, Copy)]
pub struct AvoidFeaturesFilter {
    mask: u8,
}

impl AvoidFeaturesFilter {
    pub fn new(features: &[AvoidFeature]) -> Self {
        Self {
            mask: AvoidFeature::mask(features),
        }
    }
}

impl EdgeFilter for AvoidFeaturesFilter {
    fn accept(&self, edge: &RoadEdge) -> bool {
        !edge.has_any_feature(self.mask)
    }
}

/// Conjunction of filters, evaluated in insertion order
#[derive(Default)]
pub struct EdgeFilterSequence {
    filters: Vec<Box<dyn EdgeFilter>>,
}

impl EdgeFilterSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, filter: impl EdgeFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl EdgeFilter for EdgeFilterSequence {
    fn accept(&self, edge: &RoadEdge) -> bool {
        self.filters.iter().all(|filter| filter.accept(edge))
    }
}

/// Travel mode access plus avoid-features, when any are requested
pub fn create_edge_filter(route_parameters: &RouteSearchParameters) -> EdgeFilterSequence {
    let mut sequence = EdgeFilterSequence::new();
    sequence.add(TravelModeFilter::new(route_parameters.profile.travel_mode()));
    if !route_parameters.avoid_features.is_empty() {
        sequence.add(AvoidFeaturesFilter::new(&route_parameters.avoid_features));
    }
    sequence
}

#[cfg(test)]
mod tests {
    use geo::LineString;

    use super::*;
    use crate::routing::RoutingProfile;

    fn road() -> RoadEdge {
        RoadEdge::new(10.0, 50.0, LineString::new(vec![]))
    }

    #[test]
    fn sequence_requires_every_filter() {
        let mut parameters = RouteSearchParameters::new(RoutingProfile::DrivingCar);
        parameters.avoid_features = vec![AvoidFeature::Ferries];
        let filter = create_edge_filter(&parameters);
        assert_eq!(filter.len(), 2);

        assert!(filter.accept(&road()));
        assert!(!filter.accept(&road().with_features(&[AvoidFeature::Ferries])));
        assert!(!filter.accept(&road().with_access(&[TravelMode::Foot])));
    }

    #[test]
    fn closures_are_filters() {
        let mut sequence = EdgeFilterSequence::new();
        sequence.add(|edge: &RoadEdge| edge.distance < 5.0);
        assert!(!sequence.accept(&road()));
    }

    #[test]
    fn empty_sequence_accepts_everything() {
        let sequence = EdgeFilterSequence::new();
        assert!(sequence.is_empty());
        assert!(sequence.accept(&road().with_access(&[])));
    }
}
