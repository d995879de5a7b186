use anyhow::{Context, Result};
use clap::Parser;
use std::{fmt::Debug, path::PathBuf};
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mrd_server::catalog::{Catalog, LoadCatalogProblem, LoadedCatalog};
use mrd_server::config::{self, DEFAULT_CORS_ORIGIN};
use mrd_server::recommend::Recommender;
use mrd_server::server::{metrics, run_server, RequestsLoggingLevel, ServerConfig};

fn parse_path(s: &str) -> Result<PathBuf, String> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(format!("Error resolving path '{}': {}", s, msg));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir().map_err(|e| format!("Failed to get current dir: {}", e))?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
struct CliArgs {
    /// Path to the tracks CSV file. Can also be specified in config file.
    #[clap(value_parser = parse_path)]
    pub catalog_path: Option<PathBuf>,

    /// Path to TOML configuration file. Values in the file override CLI arguments.
    #[clap(long, value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// The port to listen on.
    #[clap(short, long, default_value_t = 8000)]
    pub port: u16,

    /// The port for the metrics server (Prometheus scraping).
    #[clap(long, default_value_t = 9091)]
    pub metrics_port: u16,

    /// The level of logging to perform on each request.
    #[clap(long, default_value = "path")]
    pub logging_level: RequestsLoggingLevel,

    /// Origin allowed to call the API from a browser. Repeat for more origins.
    #[clap(long = "cors-origin", default_value = DEFAULT_CORS_ORIGIN)]
    pub cors_origins: Vec<String>,

    /// Load the catalog, print what was read and exit.
    #[clap(long)]
    pub check_only: bool,
}

/// Convert CLI args to CliConfig for config resolution
impl From<&CliArgs> for config::CliConfig {
    fn from(args: &CliArgs) -> Self {
        config::CliConfig {
            catalog_path: args.catalog_path.clone(),
            port: args.port,
            metrics_port: args.metrics_port,
            logging_level: args.logging_level.clone(),
            cors_origins: args.cors_origins.clone(),
        }
    }
}

fn print_problem(problem: &LoadCatalogProblem) {
    match problem {
        LoadCatalogProblem::InvalidValue {
            line,
            column,
            value,
        } => println!("  line {}: invalid {} value {:?}", line, column, value),
    }
}

fn print_check_report(loaded: &LoadedCatalog) {
    let catalog = &loaded.catalog;
    println!("Catalog check:");
    println!("  rows read:           {}", loaded.stats.rows_read);
    println!("  duplicates dropped:  {}", loaded.stats.duplicates_dropped);
    println!("  incomplete dropped:  {}", loaded.stats.incomplete_dropped);
    println!("  invalid dropped:     {}", loaded.stats.invalid_dropped);
    println!("  tracks kept:         {}", catalog.get_tracks_count());
    println!("  similarity rows:     {}", catalog.similarity_rows().len());
    println!("  neighbor rows:       {}", catalog.neighbor_rows().len());
    println!("  genres:              {}", catalog.genres().len());

    if loaded.problems.is_empty() {
        println!("No problems found.");
    } else {
        println!("{} problems:", loaded.problems.len());
        for problem in &loaded.problems {
            print_problem(problem);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialize logging")?;

    // Load TOML config if provided
    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            Some(config::FileConfig::load(path)?)
        }
        None => None,
    };

    // Resolve final configuration (TOML overrides CLI)
    let cli_config: config::CliConfig = (&cli_args).into();
    let app_config = config::AppConfig::resolve(&cli_config, file_config)?;

    info!("Configuration loaded:");
    info!("  catalog_path: {:?}", app_config.catalog_path);
    info!("  port: {}", app_config.port);
    info!("  cors_origins: {:?}", app_config.cors_origins);
    info!("  recommender: {:?}", app_config.recommender);

    let loaded = Catalog::load(&app_config.catalog_path, &app_config.recommender.catalog)
        .with_context(|| format!("Failed to load catalog {:?}", app_config.catalog_path))?;
    if !loaded.problems.is_empty() {
        warn!(
            "{} catalog rows had invalid values and were skipped",
            loaded.problems.len()
        );
    }

    if cli_args.check_only {
        print_check_report(&loaded);
        return Ok(());
    }

    // Initialize metrics system
    info!("Initializing metrics...");
    metrics::init_metrics();
    metrics::init_catalog_metrics(
        loaded.catalog.get_tracks_count(),
        loaded.catalog.similarity_rows().len(),
        loaded.catalog.neighbor_rows().len(),
    );

    info!("Preparing recommendation engines...");
    let recommender = Recommender::new(loaded.catalog, &app_config.recommender);

    let server_config = ServerConfig {
        requests_logging_level: app_config.logging_level,
        port: app_config.port,
        metrics_port: app_config.metrics_port,
        cors_origins: app_config.cors_origins,
    };

    info!("Ready to serve at port {}!", server_config.port);
    info!("Metrics available at port {}!", server_config.metrics_port);
    run_server(recommender, server_config).await
}
