mod error;
mod genre_filter;
mod genre_vectorizer;
pub mod math;
mod neighbor;
mod settings;
mod similarity;

pub use error::{RecommendError, RecommendResult};
pub use genre_filter::{GenreFilter, GenreSample};
pub use genre_vectorizer::GenreVectorizer;
pub use neighbor::{Neighbor, NeighborEngine};
pub use settings::RecommenderSettings;
pub use similarity::{SimilarityEngine, SimilarityOutcome, SimilarityRecommendation};

use crate::catalog::Catalog;
use rand::Rng;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, Serialize)]
pub struct RecommenderStats {
    pub tracks: usize,
    pub similarity_rows: usize,
    pub neighbor_rows: usize,
    pub genres: usize,
}

/// Read-only entry point to every engine, shared by all request handlers.
pub struct Recommender {
    catalog: Arc<Catalog>,
    similarity: SimilarityEngine,
    neighbor: NeighborEngine,
    genre_filter: GenreFilter,
}

impl Recommender {
    pub fn new(catalog: Catalog, settings: &RecommenderSettings) -> Recommender {
        let catalog = Arc::new(catalog);
        Recommender {
            similarity: SimilarityEngine::new(catalog.clone(), settings),
            neighbor: NeighborEngine::new(catalog.clone(), settings),
            genre_filter: GenreFilter::new(&catalog, settings),
            catalog,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn stats(&self) -> RecommenderStats {
        RecommenderStats {
            tracks: self.catalog.get_tracks_count(),
            similarity_rows: self.catalog.similarity_rows().len(),
            neighbor_rows: self.catalog.neighbor_rows().len(),
            genres: self.catalog.genres().len(),
        }
    }

    pub fn recommend<R: Rng + ?Sized>(
        &self,
        seed_title: &str,
        rng: &mut R,
    ) -> RecommendResult<SimilarityRecommendation> {
        self.similarity.recommend(seed_title, rng)
    }

    pub fn recommend_by_vector(&self, features: &[f64]) -> RecommendResult<Vec<String>> {
        self.neighbor.recommend_by_vector(features)
    }

    pub fn recommend_by_genres<R: Rng + ?Sized>(
        &self,
        genres: &[String],
        rng: &mut R,
    ) -> RecommendResult<Vec<GenreSample>> {
        self.genre_filter.sample_many(genres, rng)
    }
}
