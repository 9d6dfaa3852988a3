use std::{fs, path::PathBuf, process::ExitCode};

use clap::Parser;
use ors_isochrones::{IsochroneRequest, process_request};
use ors_isochrones_core::{Error, IsochronesConfig, loading::load_graph};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Road graph in the JSON graph format
    #[arg(short, long)]
    graph: PathBuf,

    /// Isochrone request as JSON
    #[arg(short, long)]
    request: PathBuf,

    /// TOML file with service limits and defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the GeoJSON response here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Compute intersections even if the request does not ask for them
    #[arg(long)]
    intersections: bool,

    #[arg(short, long)]
    debug: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => IsochronesConfig::from_file(path)?,
        None => IsochronesConfig::default(),
    };

    let graph = load_graph(&cli.graph)?;
    info!(
        "Loaded graph with {} nodes and {} edges",
        graph.node_count(),
        graph.edge_count()
    );

    let mut request = IsochroneRequest::from_json_str(&fs::read_to_string(&cli.request)?)?;
    if cli.intersections {
        request = request.with_intersections(true);
    }

    let response = process_request(&graph, &request, &config)?;
    let body = response.to_geojson_string()?;

    match &cli.output {
        Some(path) => {
            fs::write(path, body)?;
            info!(
                "Wrote {} isochrones to {}",
                response.collection.isochrones_count(),
                path.display()
            );
        }
        None => println!("{body}"),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
