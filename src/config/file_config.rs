use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub catalog_path: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub cors_origins: Option<Vec<String>>,

    pub recommender: Option<RecommenderConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct RecommenderConfig {
    pub similarity_catalog_size: Option<usize>,
    pub neighbor_catalog_size: Option<usize>,
    /// Fuzzy title match score, 0 to 100.
    pub match_threshold: Option<u8>,
    pub results_count: Option<usize>,
    pub fallback_sample_size: Option<usize>,
    pub max_seed_length: Option<usize>,
    pub genre_min_popularity: Option<u32>,
    pub genre_sample_size: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}
