use super::load::{load_tracks_from_path, CatalogLoadError, LoadStats, Problem};
use super::track::Track;
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogSettings {
    /// Maximum number of rows in the similarity catalog, before title de-duplication.
    pub similarity_size: usize,
    /// Maximum number of rows in the neighbor catalog.
    pub neighbor_size: usize,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        CatalogSettings {
            similarity_size: 5000,
            neighbor_size: 10000,
        }
    }
}

/// The full set of loaded tracks plus the two derived views used by the engines.
///
/// Views are stored as indices into `tracks`, in ranking order: descending
/// popularity, ties in source order.
#[derive(Debug)]
pub struct Catalog {
    tracks: Vec<Track>,
    similarity_rows: Vec<usize>,
    neighbor_rows: Vec<usize>,
}

pub struct LoadedCatalog {
    pub catalog: Catalog,
    pub stats: LoadStats,
    pub problems: Vec<Problem>,
}

/// Indices of `rows` sorted by descending popularity. The sort is stable so equally
/// popular tracks keep their relative order.
fn by_popularity(tracks: &[Track], mut rows: Vec<usize>) -> Vec<usize> {
    rows.sort_by(|a, b| tracks[*b].popularity.cmp(&tracks[*a].popularity));
    rows
}

fn select_similarity_rows(tracks: &[Track], size: usize) -> Vec<usize> {
    let mut rows = by_popularity(tracks, (0..tracks.len()).collect());
    rows.truncate(size);
    let mut seen_names = HashSet::new();
    rows.retain(|i| seen_names.insert(tracks[*i].name.as_str()));
    rows
}

fn select_neighbor_rows(tracks: &[Track], size: usize) -> Vec<usize> {
    let mut seen_ids = HashSet::new();
    let unique: Vec<usize> = (0..tracks.len())
        .filter(|i| seen_ids.insert(tracks[*i].id.as_str()))
        .collect();
    let mut rows = by_popularity(tracks, unique);
    rows.truncate(size);
    rows
}

impl Catalog {
    pub fn build(tracks: Vec<Track>, settings: &CatalogSettings) -> Result<Catalog, CatalogLoadError> {
        if tracks.is_empty() {
            return Err(CatalogLoadError::Empty { rows_read: 0 });
        }
        let similarity_rows = select_similarity_rows(&tracks, settings.similarity_size);
        let neighbor_rows = select_neighbor_rows(&tracks, settings.neighbor_size);
        if similarity_rows.is_empty() || neighbor_rows.is_empty() {
            return Err(CatalogLoadError::Empty {
                rows_read: tracks.len(),
            });
        }
        Ok(Catalog {
            tracks,
            similarity_rows,
            neighbor_rows,
        })
    }

    pub fn load(path: &Path, settings: &CatalogSettings) -> Result<LoadedCatalog, CatalogLoadError> {
        info!("Loading catalog from {:?}...", path);
        let loaded = load_tracks_from_path(path)?;
        let catalog = Catalog::build(loaded.tracks, settings)?;
        info!(
            "Catalog loaded: {} rows read, {} tracks kept, {} in similarity view, {} in neighbor view",
            loaded.stats.rows_read,
            catalog.get_tracks_count(),
            catalog.similarity_rows.len(),
            catalog.neighbor_rows.len()
        );
        Ok(LoadedCatalog {
            catalog,
            stats: loaded.stats,
            problems: loaded.problems,
        })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn track(&self, index: usize) -> &Track {
        &self.tracks[index]
    }

    pub fn similarity_rows(&self) -> &[usize] {
        &self.similarity_rows
    }

    pub fn neighbor_rows(&self) -> &[usize] {
        &self.neighbor_rows
    }

    pub fn get_tracks_count(&self) -> usize {
        self.tracks.len()
    }

    /// Distinct genre labels, sorted.
    pub fn genres(&self) -> Vec<String> {
        self.tracks
            .iter()
            .map(|t| t.genre.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }
}
