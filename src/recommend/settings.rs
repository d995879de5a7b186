use crate::catalog::CatalogSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct RecommenderSettings {
    pub catalog: CatalogSettings,
    /// Fuzzy match score (0-100) below which a seed title is treated as unknown.
    pub match_threshold: u8,
    /// Number of tracks returned by the similarity and neighbor engines.
    pub results_count: usize,
    /// Number of random tracks returned after the seed on the fallback path.
    pub fallback_sample_size: usize,
    /// Longest accepted seed title, in characters.
    pub max_seed_length: usize,
    /// Tracks must be strictly more popular than this to be picked by the genre filter.
    pub genre_min_popularity: u32,
    pub genre_sample_size: usize,
}

impl Default for RecommenderSettings {
    fn default() -> Self {
        RecommenderSettings {
            catalog: CatalogSettings::default(),
            match_threshold: 88,
            results_count: 11,
            fallback_sample_size: 10,
            max_seed_length: 200,
            genre_min_popularity: 30,
            genre_sample_size: 11,
        }
    }
}
