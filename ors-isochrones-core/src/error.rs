use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported isochrone calculation method: {0}")]
    UnsupportedMethod(String),
    #[error("No road network node found near ({lon}, {lat})")]
    LocationNotFound { lon: f64, lat: f64 },
    #[error("Isochrone error: {0}")]
    IsochroneComputation(String),
    #[error("Request limit exceeded: {0}")]
    RequestLimit(String),
    #[error("Invalid node index")]
    InvalidNodeIndex,
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] toml::de::Error),
}
