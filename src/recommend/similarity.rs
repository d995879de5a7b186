use super::error::{RecommendError, RecommendResult};
use super::genre_vectorizer::GenreVectorizer;
use super::math::cosine_similarity;
use super::settings::RecommenderSettings;
use crate::catalog::{Catalog, SIMILARITY_FEATURES_COUNT};
use crate::search::TitleMatcher;
use rand::Rng;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum SimilarityOutcome {
    /// The seed matched a catalog title and the catalog was ranked against it.
    Matched { title: String, score: u8 },
    /// No title matched well enough, the songs are a random sample.
    Fallback { best_score: u8 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityRecommendation {
    pub outcome: SimilarityOutcome,
    pub songs: Vec<String>,
}

/// Content based ranking over the similarity view of the catalog.
///
/// Everything is precomputed per row at construction, a query only allocates its
/// own list of `(row, score)` pairs.
pub struct SimilarityEngine {
    catalog: Arc<Catalog>,
    matcher: TitleMatcher,
    genre_vectors: Vec<Vec<f64>>,
    numeric_vectors: Vec<[f64; SIMILARITY_FEATURES_COUNT]>,
    match_threshold: u8,
    results_count: usize,
    fallback_sample_size: usize,
    max_seed_length: usize,
}

impl SimilarityEngine {
    pub fn new(catalog: Arc<Catalog>, settings: &RecommenderSettings) -> SimilarityEngine {
        let rows = catalog.similarity_rows();
        let matcher = TitleMatcher::new(rows.iter().map(|i| catalog.track(*i).name.as_str()));
        let vectorizer = GenreVectorizer::fit(rows.iter().map(|i| catalog.track(*i).genre.as_str()));
        let genre_vectors = rows
            .iter()
            .map(|i| vectorizer.vectorize(&catalog.track(*i).genre))
            .collect();
        let numeric_vectors = rows
            .iter()
            .map(|i| catalog.track(*i).similarity_vector())
            .collect();
        debug!(
            "Similarity engine ready: {} titles, {} genre tokens",
            matcher.len(),
            vectorizer.vocabulary().len()
        );

        SimilarityEngine {
            catalog,
            matcher,
            genre_vectors,
            numeric_vectors,
            match_threshold: settings.match_threshold,
            results_count: settings.results_count,
            fallback_sample_size: settings.fallback_sample_size,
            max_seed_length: settings.max_seed_length,
        }
    }

    pub fn rows_count(&self) -> usize {
        self.numeric_vectors.len()
    }

    /// Genre cosine plus numeric cosine between two rows of the similarity view.
    pub fn combined_similarity(&self, a: usize, b: usize) -> f64 {
        cosine_similarity(&self.genre_vectors[a], &self.genre_vectors[b])
            + cosine_similarity(&self.numeric_vectors[a], &self.numeric_vectors[b])
    }

    /// Every row of the view scored against `seed`, best first. Equal scores are
    /// ordered by popularity, then by view order.
    pub fn rank(&self, seed: usize) -> Vec<(usize, f64)> {
        let mut scored: Vec<(usize, f64)> = (0..self.rows_count())
            .into_par_iter()
            .map(|row| (row, self.combined_similarity(seed, row)))
            .collect();

        let popularity = |row: usize| self.track_at(row).popularity;
        scored.sort_by(|(row_a, score_a), (row_b, score_b)| {
            score_b
                .total_cmp(score_a)
                .then_with(|| popularity(*row_b).cmp(&popularity(*row_a)))
        });
        scored
    }

    pub fn recommend<R: Rng + ?Sized>(
        &self,
        seed_title: &str,
        rng: &mut R,
    ) -> RecommendResult<SimilarityRecommendation> {
        if seed_title.trim().is_empty() {
            return Err(RecommendError::InvalidInput(
                "song name must not be empty".to_string(),
            ));
        }
        // Partial matching scans every window of the seed, so its length bounds the cost.
        let seed_length = seed_title.trim().chars().count();
        if seed_length > self.max_seed_length {
            return Err(RecommendError::InvalidInput(format!(
                "song name must be at most {} characters, got {}",
                self.max_seed_length, seed_length
            )));
        }

        let best = self.matcher.best_match(seed_title);
        let best_score = best.map(|m| m.score).unwrap_or(0);

        let best = match best {
            Some(m) if m.score >= self.match_threshold => m,
            _ => {
                debug!(
                    "No confident match for {:?} (best score {}), sampling instead",
                    seed_title, best_score
                );
                return Ok(SimilarityRecommendation {
                    outcome: SimilarityOutcome::Fallback { best_score },
                    songs: self.fallback(seed_title, rng),
                });
            }
        };

        let matched_title = self.track_at(best.position).name.clone();
        debug!(
            "Seed {:?} matched {:?} with score {}",
            seed_title, matched_title, best.score
        );

        let songs = self
            .rank(best.position)
            .into_iter()
            .take(self.results_count)
            .map(|(row, _)| self.track_at(row).display_name())
            .collect();

        Ok(SimilarityRecommendation {
            outcome: SimilarityOutcome::Matched {
                title: matched_title,
                score: best.score,
            },
            songs,
        })
    }

    fn fallback<R: Rng + ?Sized>(&self, seed_title: &str, rng: &mut R) -> Vec<String> {
        let amount = self.fallback_sample_size.min(self.rows_count());
        let mut songs = Vec::with_capacity(amount + 1);
        songs.push(seed_title.to_owned());
        songs.extend(
            rand::seq::index::sample(rng, self.rows_count(), amount)
                .into_iter()
                .map(|row| self.track_at(row).display_name()),
        );
        songs
    }

    fn track_at(&self, row: usize) -> &crate::catalog::Track {
        self.catalog.track(self.catalog.similarity_rows()[row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{testing::track, CatalogSettings};
    use crate::recommend::testing::{sample_catalog, seeded_rng};

    fn engine() -> SimilarityEngine {
        SimilarityEngine::new(sample_catalog(), &RecommenderSettings::default())
    }

    #[test]
    fn exact_title_ranks_itself_first() {
        let engine = engine();
        let result = engine.recommend("Night Drive", &mut seeded_rng()).unwrap();

        assert_eq!(
            result.outcome,
            SimilarityOutcome::Matched {
                title: "Night Drive".to_string(),
                score: 100
            }
        );
        assert_eq!(result.songs.len(), 11);
        assert_eq!(result.songs[0], "Night Drive by Artist 3");
    }

    #[test]
    fn every_catalog_title_ranks_itself_first() {
        let engine = engine();
        for row in 0..engine.rows_count() {
            let track = engine.track_at(row);
            let result = engine.recommend(&track.name, &mut seeded_rng()).unwrap();
            assert_eq!(result.songs[0], track.display_name());
        }
    }

    #[test]
    fn sloppy_title_still_matches() {
        let engine = engine();
        let result = engine.recommend("night drive!!", &mut seeded_rng()).unwrap();
        assert_eq!(result.songs[0], "Night Drive by Artist 3");
    }

    #[test]
    fn unknown_title_falls_back_to_sample() {
        let engine = engine();
        let seed = "zzz_not_a_real_song_zzz";
        let result = engine.recommend(seed, &mut seeded_rng()).unwrap();

        assert!(matches!(result.outcome, SimilarityOutcome::Fallback { best_score } if best_score < 88));
        assert_eq!(result.songs.len(), 11);
        assert_eq!(result.songs[0], seed);
        let mut sampled = result.songs[1..].to_vec();
        sampled.sort();
        sampled.dedup();
        assert_eq!(sampled.len(), 10);
    }

    #[test]
    fn fallback_sample_is_deterministic_with_seeded_rng() {
        let engine = engine();
        let a = engine.recommend("qqqqqqqq", &mut seeded_rng()).unwrap();
        let b = engine.recommend("qqqqqqqq", &mut seeded_rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_calls_return_identical_rankings() {
        let engine = engine();
        let a = engine.recommend("Golden Hour", &mut seeded_rng()).unwrap();
        let b = engine.recommend("Golden Hour", &mut rand::rng()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn combined_similarity_is_symmetric() {
        let engine = engine();
        for a in 0..engine.rows_count() {
            for b in 0..engine.rows_count() {
                assert_eq!(
                    engine.combined_similarity(a, b),
                    engine.combined_similarity(b, a)
                );
            }
        }
    }

    #[test]
    fn ranking_prefers_same_genre() {
        let engine = engine();
        let ranked = engine.rank(0);
        let seed_genre = &engine.track_at(0).genre;
        // The best non-seed match shares the genre, numeric similarity alone is close to 1 for every row.
        assert_eq!(&engine.track_at(ranked[1].0).genre, seed_genre);
        assert!(ranked.windows(2).all(|w| w[0].1 >= w[1].1));
    }

    #[test]
    fn overlong_seed_is_invalid() {
        let engine = engine();
        let seed = "ab cd ".repeat(2000);
        assert_eq!(
            engine.recommend(&seed, &mut seeded_rng()),
            Err(RecommendError::InvalidInput(
                "song name must be at most 200 characters, got 11999".to_string()
            ))
        );

        let at_limit = "x".repeat(200);
        assert!(engine.recommend(&at_limit, &mut seeded_rng()).is_ok());
    }

    #[test]
    fn small_catalog_fallback_returns_every_track() {
        let tracks = vec![
            track("a", "First", "pop", 90),
            track("b", "Second", "rock", 80),
            track("c", "Third", "jazz", 70),
        ];
        let catalog = Arc::new(Catalog::build(tracks, &CatalogSettings::default()).unwrap());
        let engine = SimilarityEngine::new(catalog, &RecommenderSettings::default());

        let seed = "zzz_not_a_real_song_zzz";
        let result = engine.recommend(seed, &mut seeded_rng()).unwrap();
        assert!(matches!(result.outcome, SimilarityOutcome::Fallback { .. }));
        assert_eq!(result.songs.len(), 4);
        assert_eq!(result.songs[0], seed);
        let mut sampled = result.songs[1..].to_vec();
        sampled.sort();
        assert_eq!(
            sampled,
            vec!["First by Artist a", "Second by Artist b", "Third by Artist c"]
        );
    }

    #[test]
    fn blank_seed_is_invalid() {
        let engine = engine();
        assert!(matches!(
            engine.recommend("   ", &mut seeded_rng()),
            Err(RecommendError::InvalidInput(_))
        ));
    }
}
