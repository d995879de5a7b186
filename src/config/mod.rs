mod file_config;

pub use file_config::{FileConfig, RecommenderConfig};

use crate::catalog::CatalogSettings;
use crate::recommend::RecommenderSettings;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub catalog_path: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog_path: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub cors_origins: Vec<String>,

    pub recommender: RecommenderSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let catalog_path = file
            .catalog_path
            .map(PathBuf::from)
            .or_else(|| cli.catalog_path.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("catalog_path must be specified as an argument or in config file")
            })?;

        if !catalog_path.exists() {
            bail!("Catalog file does not exist: {:?}", catalog_path);
        }
        if !catalog_path.is_file() {
            bail!("catalog_path is not a file: {:?}", catalog_path);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let cors_origins = match file.cors_origins {
            Some(origins) => origins,
            None if cli.cors_origins.is_empty() => vec![DEFAULT_CORS_ORIGIN.to_string()],
            None => cli.cors_origins.clone(),
        };

        let recommender = resolve_recommender(file.recommender.unwrap_or_default())?;

        Ok(Self {
            catalog_path,
            port,
            metrics_port,
            logging_level,
            cors_origins,
            recommender,
        })
    }
}

fn resolve_recommender(file: RecommenderConfig) -> Result<RecommenderSettings> {
    let defaults = RecommenderSettings::default();
    let settings = RecommenderSettings {
        catalog: CatalogSettings {
            similarity_size: file
                .similarity_catalog_size
                .unwrap_or(defaults.catalog.similarity_size),
            neighbor_size: file
                .neighbor_catalog_size
                .unwrap_or(defaults.catalog.neighbor_size),
        },
        match_threshold: file.match_threshold.unwrap_or(defaults.match_threshold),
        results_count: file.results_count.unwrap_or(defaults.results_count),
        fallback_sample_size: file
            .fallback_sample_size
            .unwrap_or(defaults.fallback_sample_size),
        max_seed_length: file.max_seed_length.unwrap_or(defaults.max_seed_length),
        genre_min_popularity: file
            .genre_min_popularity
            .unwrap_or(defaults.genre_min_popularity),
        genre_sample_size: file.genre_sample_size.unwrap_or(defaults.genre_sample_size),
    };

    if settings.match_threshold > 100 {
        bail!(
            "match_threshold must be between 0 and 100, got {}",
            settings.match_threshold
        );
    }
    if settings.results_count == 0 {
        bail!("results_count must be greater than 0");
    }
    if settings.max_seed_length == 0 {
        bail!("max_seed_length must be greater than 0");
    }
    if settings.genre_sample_size == 0 {
        bail!("genre_sample_size must be greater than 0");
    }
    if settings.catalog.similarity_size == 0 || settings.catalog.neighbor_size == 0 {
        bail!("Catalog sizes must be greater than 0");
    }
    Ok(settings)
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}
