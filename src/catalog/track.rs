use serde::Serialize;

/// Number of audio features used by the nearest-neighbor engine.
pub const AUDIO_FEATURES_COUNT: usize = 8;

/// Names of the audio features, in the order used by [`AudioFeatures::to_array`].
pub const AUDIO_FEATURE_NAMES: [&str; AUDIO_FEATURES_COUNT] = [
    "danceability",
    "energy",
    "loudness",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
];

/// Number of numeric attributes compared by the similarity engine.
pub const SIMILARITY_FEATURES_COUNT: usize = 11;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AudioFeatures {
    pub danceability: f64,
    pub energy: f64,
    /// Decibels, usually negative.
    pub loudness: f64,
    pub speechiness: f64,
    pub acousticness: f64,
    pub instrumentalness: f64,
    pub liveness: f64,
    pub valence: f64,
}

impl AudioFeatures {
    pub fn from_array(values: [f64; AUDIO_FEATURES_COUNT]) -> AudioFeatures {
        let [danceability, energy, loudness, speechiness, acousticness, instrumentalness, liveness, valence] =
            values;
        AudioFeatures {
            danceability,
            energy,
            loudness,
            speechiness,
            acousticness,
            instrumentalness,
            liveness,
            valence,
        }
    }

    pub fn to_array(&self) -> [f64; AUDIO_FEATURES_COUNT] {
        [
            self.danceability,
            self.energy,
            self.loudness,
            self.speechiness,
            self.acousticness,
            self.instrumentalness,
            self.liveness,
            self.valence,
        ]
    }
}

/// A single row of the source catalog, after the load-time filter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    /// Artist names as they appear in the source, multiple artists are `;` separated.
    pub artists: String,
    pub album_name: String,
    pub genre: String,
    pub popularity: u32,
    pub duration_ms: u64,
    pub explicit: bool,
    pub features: AudioFeatures,
    pub key: i32,
    pub mode: i32,
    pub tempo: f64,
    pub time_signature: i32,
}

impl Track {
    /// The string shown to users for a recommended track.
    pub fn display_name(&self) -> String {
        format!("{} by {}", self.name, self.artists)
    }

    /// Numeric attributes compared by the similarity engine. Identifier, duration,
    /// mode and time signature are not part of it.
    pub fn similarity_vector(&self) -> [f64; SIMILARITY_FEATURES_COUNT] {
        let f = &self.features;
        [
            self.popularity as f64,
            f.danceability,
            f.energy,
            self.key as f64,
            f.loudness,
            f.speechiness,
            f.acousticness,
            f.instrumentalness,
            f.liveness,
            f.valence,
            self.tempo,
        ]
    }
}
