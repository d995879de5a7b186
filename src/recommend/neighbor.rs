use super::error::{RecommendError, RecommendResult};
use super::math::{squared_euclidean, ColumnStats};
use super::settings::RecommenderSettings;
use crate::catalog::{Catalog, AUDIO_FEATURES_COUNT, AUDIO_FEATURE_NAMES};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub struct Neighbor {
    /// Index of the track in the full catalog.
    pub track_index: usize,
    pub distance: f64,
}

/// Brute force k-nearest-neighbor search over z-score normalized audio features.
pub struct NeighborEngine {
    catalog: Arc<Catalog>,
    stats: ColumnStats,
    normalized_rows: Vec<Vec<f64>>,
    results_count: usize,
}

impl NeighborEngine {
    pub fn new(catalog: Arc<Catalog>, settings: &RecommenderSettings) -> NeighborEngine {
        let raw_rows: Vec<[f64; AUDIO_FEATURES_COUNT]> = catalog
            .neighbor_rows()
            .iter()
            .map(|i| catalog.track(*i).features.to_array())
            .collect();
        let stats = ColumnStats::from_rows(raw_rows.iter().map(|r| r.as_slice()), AUDIO_FEATURES_COUNT);
        let normalized_rows = raw_rows.iter().map(|r| stats.normalize(r)).collect();

        NeighborEngine {
            catalog,
            stats,
            normalized_rows,
            results_count: settings.results_count,
        }
    }

    pub fn stats(&self) -> &ColumnStats {
        &self.stats
    }

    fn validate(features: &[f64]) -> RecommendResult<()> {
        if features.len() != AUDIO_FEATURES_COUNT {
            return Err(RecommendError::InvalidInput(format!(
                "expected {} features ({}), got {}",
                AUDIO_FEATURES_COUNT,
                AUDIO_FEATURE_NAMES.join(", "),
                features.len()
            )));
        }
        if let Some(i) = features.iter().position(|v| !v.is_finite()) {
            return Err(RecommendError::InvalidInput(format!(
                "{} must be a finite number",
                AUDIO_FEATURE_NAMES[i]
            )));
        }
        Ok(())
    }

    /// The closest rows to `features`, nearest first. Rows at the same distance keep
    /// their order in the neighbor view.
    pub fn nearest(&self, features: &[f64]) -> RecommendResult<Vec<Neighbor>> {
        Self::validate(features)?;
        let query = self.stats.normalize(features);

        let mut distances: Vec<(usize, f64)> = self
            .normalized_rows
            .iter()
            .enumerate()
            .map(|(row, values)| (row, squared_euclidean(&query, values)))
            .collect();
        distances.sort_by(|(_, a), (_, b)| a.total_cmp(b));

        let rows = self.catalog.neighbor_rows();
        Ok(distances
            .into_iter()
            .take(self.results_count)
            .map(|(row, squared)| Neighbor {
                track_index: rows[row],
                distance: squared.sqrt(),
            })
            .collect())
    }

    pub fn recommend_by_vector(&self, features: &[f64]) -> RecommendResult<Vec<String>> {
        Ok(self
            .nearest(features)?
            .into_iter()
            .map(|n| self.catalog.track(n.track_index).display_name())
            .collect())
    }
}
