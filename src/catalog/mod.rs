mod catalog;
mod load;
mod track;

pub use catalog::{Catalog, CatalogSettings, LoadedCatalog};
pub use load::{load_tracks, CatalogLoadError, LoadStats, LoadedTracks, Problem as LoadCatalogProblem};
pub use track::{
    AudioFeatures, Track, AUDIO_FEATURES_COUNT, AUDIO_FEATURE_NAMES, SIMILARITY_FEATURES_COUNT,
};
