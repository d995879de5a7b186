use super::error::{RecommendError, RecommendResult};
use super::settings::RecommenderSettings;
use crate::catalog::Catalog;
use rand::Rng;
use std::collections::{HashMap, HashSet};

/// Random picks of popular tracks for a genre label.
pub struct GenreFilter {
    /// Display names of the qualifying tracks, by exact genre label.
    candidates: HashMap<String, Vec<String>>,
    sample_size: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenreSample {
    pub genre: String,
    pub result: RecommendResult<Vec<String>>,
}

impl GenreFilter {
    pub fn new(catalog: &Catalog, settings: &RecommenderSettings) -> GenreFilter {
        let mut candidates: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(&str, String)> = HashSet::new();
        for track in catalog.tracks() {
            if track.popularity <= settings.genre_min_popularity {
                continue;
            }
            let display_name = track.display_name();
            if seen.insert((track.genre.as_str(), display_name.clone())) {
                candidates
                    .entry(track.genre.clone())
                    .or_default()
                    .push(display_name);
            }
        }
        GenreFilter {
            candidates,
            sample_size: settings.genre_sample_size,
        }
    }

    /// Samples tracks of exactly `genre`, without replacement.
    pub fn sample<R: Rng + ?Sized>(&self, genre: &str, rng: &mut R) -> RecommendResult<Vec<String>> {
        let candidates = self.candidates.get(genre).map(Vec::as_slice).unwrap_or(&[]);
        if candidates.len() < self.sample_size {
            return Err(RecommendError::InsufficientData {
                genre: genre.to_owned(),
                found: candidates.len(),
                required: self.sample_size,
            });
        }
        Ok(
            rand::seq::index::sample(rng, candidates.len(), self.sample_size)
                .into_iter()
                .map(|i| candidates[i].clone())
                .collect(),
        )
    }

    /// One sample per requested genre, each with its own outcome.
    pub fn sample_many<R: Rng + ?Sized>(
        &self,
        genres: &[String],
        rng: &mut R,
    ) -> RecommendResult<Vec<GenreSample>> {
        if genres.is_empty() {
            return Err(RecommendError::InvalidInput(
                "genre list must not be empty".to_string(),
            ));
        }
        Ok(genres
            .iter()
            .map(|genre| GenreSample {
                genre: genre.clone(),
                result: self.sample(genre, rng),
            })
            .collect())
    }
}
