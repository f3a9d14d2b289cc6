use anyhow::Result;
use clap::Parser;
use grb_core::GrbConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Compute ground risk buffer layers for a flight geography")]
struct Args {
    /// GeoJSON FeatureCollection with the flight geography
    #[arg(long)]
    fg: PathBuf,

    /// JSON file with the flight parameters
    #[arg(long)]
    params: PathBuf,

    /// PROJ definition of the metric CRS (defaults to Swiss LV95)
    #[arg(long)]
    crs: Option<String>,

    /// Methodology version
    #[arg(long = "methodology", default_value = grb_core::CURRENT)]
    methodology: String,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = GrbConfig {
        methodology_version: args.methodology,
        ..GrbConfig::default()
    };
    if let Some(crs) = args.crs {
        config.metric_crs = crs;
    }
    config.check()?;

    let request = grb_cli::load_request(&args.fg, &args.params)?;
    let response = grb_core::run(&request, &config)?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", out);

    Ok(())
}
