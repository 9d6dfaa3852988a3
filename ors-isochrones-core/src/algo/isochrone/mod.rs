//! Isochrone map construction: builder strategies, the factory selecting
//! them and parallel execution over all travellers of a request.

mod concave_balls;

use std::str::FromStr;

use rayon::prelude::*;

pub use concave_balls::ConcaveBallsIsochroneMapBuilder;

use crate::{
    Error, IsochroneMap, IsochroneMapCollection, IsochronesConfig, RoadGraph,
    request::{IsochroneRequest, IsochroneSearchParameters},
    routing::SearchContext,
};

/// Strategy turning one traveller's search parameters into an isochrone map
pub trait IsochroneMapBuilder {
    fn compute(&mut self, parameters: &IsochroneSearchParameters) -> Result<IsochroneMap, Error>;
}

/// Polygon construction methods
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalculationMethod {
    #[default]
    ConcaveBalls,
}

impl FromStr for CalculationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "default" | "concaveballs" => Ok(CalculationMethod::ConcaveBalls),
            _ => Err(Error::UnsupportedMethod(s.to_string())),
        }
    }
}

/// Picks the builder named by the search parameters
pub struct IsochroneMapBuilderFactory<'a> {
    ctx: SearchContext<'a>,
    default_method: String,
}

impl<'a> IsochroneMapBuilderFactory<'a> {
    pub fn new(ctx: SearchContext<'a>) -> Self {
        Self {
            ctx,
            default_method: String::new(),
        }
    }

    /// Method used when the parameters name none
    #[must_use]
    pub fn with_default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = method.into();
        self
    }

    pub fn build_map(&self, parameters: &IsochroneSearchParameters) -> Result<IsochroneMap, Error> {
        let name = if parameters.calc_method().is_empty() {
            self.default_method.as_str()
        } else {
            parameters.calc_method()
        };

        match name.parse::<CalculationMethod>()? {
            CalculationMethod::ConcaveBalls => {
                ConcaveBallsIsochroneMapBuilder::new(&self.ctx).compute(parameters)
            }
        }
    }
}

/// Builds the isochrone map of one traveller
pub fn build_isochrone_map(
    graph: &RoadGraph,
    parameters: &IsochroneSearchParameters,
    config: &IsochronesConfig,
) -> Result<IsochroneMap, Error> {
    let ctx = SearchContext::for_parameters(graph, parameters, config);
    IsochroneMapBuilderFactory::new(ctx)
        .with_default_method(config.default_calc_method.clone())
        .build_map(parameters)
}

/// Computes every traveller independently and in parallel.
///
/// Results are in traveller order; a failing traveller does not affect the others.
pub fn compute_traveller_isochrones(
    graph: &RoadGraph,
    request: &IsochroneRequest,
    config: &IsochronesConfig,
) -> Vec<Result<IsochroneMap, Error>> {
    (0..request.travellers().len())
        .into_par_iter()
        .map(|index| {
            let parameters = request.search_parameters(index)?;
            build_isochrone_map(graph, &parameters, config)
        })
        .collect()
}

/// Validates the request and computes the maps of all travellers, failing on
/// the first traveller error
pub fn compute_isochrones(
    graph: &RoadGraph,
    request: &IsochroneRequest,
    config: &IsochronesConfig,
) -> Result<IsochroneMapCollection, Error> {
    request.validate(config)?;

    let mut collection = IsochroneMapCollection::new();
    for result in compute_traveller_isochrones(graph, request, config) {
        collection.add(result?);
    }
    log::info!(
        "Computed {} isochrones for {} travellers",
        collection.isochrones_count(),
        collection.len()
    );
    Ok(collection)
}
