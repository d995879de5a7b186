use super::track::{AudioFeatures, Track};
use std::collections::{HashMap, HashSet};
use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("Could not open catalog file {path:?}: {source}")]
    Open { path: PathBuf, source: csv::Error },

    #[error("Malformed catalog file: {0}")]
    Csv(#[from] csv::Error),

    #[error("Catalog header has no \"{0}\" column")]
    MissingColumn(&'static str),

    #[error("Catalog has no usable rows ({rows_read} rows read)")]
    Empty { rows_read: usize },
}

/// A row that was skipped because one of its values could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub enum Problem {
    InvalidValue {
        line: u64,
        column: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadStats {
    pub rows_read: usize,
    pub duplicates_dropped: usize,
    pub incomplete_dropped: usize,
    pub invalid_dropped: usize,
}

#[derive(Debug)]
pub struct LoadedTracks {
    pub tracks: Vec<Track>,
    pub stats: LoadStats,
    pub problems: Vec<Problem>,
}

const REQUIRED_COLUMNS: [&str; 20] = [
    "track_id",
    "artists",
    "album_name",
    "track_name",
    "popularity",
    "duration_ms",
    "explicit",
    "danceability",
    "energy",
    "key",
    "loudness",
    "mode",
    "speechiness",
    "acousticness",
    "instrumentalness",
    "liveness",
    "valence",
    "tempo",
    "time_signature",
    "track_genre",
];

/// Position of every required column inside a record.
struct ColumnMap {
    positions: HashMap<&'static str, usize>,
}

impl ColumnMap {
    fn from_headers(headers: &csv::StringRecord) -> Result<ColumnMap, CatalogLoadError> {
        let mut positions = HashMap::new();
        for column in REQUIRED_COLUMNS {
            // The first column is the index artifact, never a data column.
            let position = headers
                .iter()
                .enumerate()
                .skip(1)
                .find(|(_, header)| header.trim() == column)
                .map(|(position, _)| position)
                .ok_or(CatalogLoadError::MissingColumn(column))?;
            positions.insert(column, position);
        }
        Ok(ColumnMap { positions })
    }

    fn get<'a>(&self, record: &'a csv::StringRecord, column: &'static str) -> &'a str {
        self.positions
            .get(column)
            .and_then(|p| record.get(*p))
            .unwrap_or("")
    }

    fn has_missing_value(&self, record: &csv::StringRecord) -> bool {
        self.positions
            .values()
            .any(|p| record.get(*p).map_or(true, |v| v.is_empty()))
    }
}

struct RowParser<'a> {
    columns: &'a ColumnMap,
    record: &'a csv::StringRecord,
    line: u64,
}

impl RowParser<'_> {
    fn text(&self, column: &'static str) -> String {
        self.columns.get(self.record, column).to_owned()
    }

    fn invalid(&self, column: &'static str) -> Problem {
        Problem::InvalidValue {
            line: self.line,
            column,
            value: self.columns.get(self.record, column).to_owned(),
        }
    }

    fn float(&self, column: &'static str) -> Result<f64, Problem> {
        self.columns
            .get(self.record, column)
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| self.invalid(column))
    }

    /// Integers may be written as `4` or `4.0`.
    fn integer(&self, column: &'static str) -> Result<i64, Problem> {
        let raw = self.columns.get(self.record, column).trim();
        if let Ok(v) = raw.parse::<i64>() {
            return Ok(v);
        }
        match raw.parse::<f64>() {
            Ok(v) if v.is_finite() && v.fract() == 0.0 => Ok(v as i64),
            _ => Err(self.invalid(column)),
        }
    }

    fn int32(&self, column: &'static str) -> Result<i32, Problem> {
        let v = self.integer(column)?;
        i32::try_from(v).map_err(|_| self.invalid(column))
    }

    fn unsigned(&self, column: &'static str) -> Result<u64, Problem> {
        let v = self.integer(column)?;
        u64::try_from(v).map_err(|_| self.invalid(column))
    }

    fn boolean(&self, column: &'static str) -> Result<bool, Problem> {
        match self
            .columns
            .get(self.record, column)
            .trim()
            .to_lowercase()
            .as_str()
        {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(self.invalid(column)),
        }
    }

    fn parse(&self) -> Result<Track, Problem> {
        let features = AudioFeatures {
            danceability: self.float("danceability")?,
            energy: self.float("energy")?,
            loudness: self.float("loudness")?,
            speechiness: self.float("speechiness")?,
            acousticness: self.float("acousticness")?,
            instrumentalness: self.float("instrumentalness")?,
            liveness: self.float("liveness")?,
            valence: self.float("valence")?,
        };
        let popularity =
            u32::try_from(self.unsigned("popularity")?).map_err(|_| self.invalid("popularity"))?;
        Ok(Track {
            id: self.text("track_id"),
            name: self.text("track_name"),
            artists: self.text("artists"),
            album_name: self.text("album_name"),
            genre: self.text("track_genre"),
            popularity,
            duration_ms: self.unsigned("duration_ms")?,
            explicit: self.boolean("explicit")?,
            features,
            key: self.int32("key")?,
            mode: self.int32("mode")?,
            tempo: self.float("tempo")?,
            time_signature: self.int32("time_signature")?,
        })
    }
}

/// Reads catalog rows from CSV data.
///
/// The first column is discarded, exact duplicate rows are dropped, and so are rows
/// with an empty required value or a value that does not parse.
pub fn load_tracks<R: Read>(reader: R) -> Result<LoadedTracks, CatalogLoadError> {
    let mut csv_reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);
    let columns = ColumnMap::from_headers(csv_reader.headers()?)?;

    let mut stats = LoadStats::default();
    let mut problems = Vec::new();
    let mut tracks = Vec::new();
    let mut seen_rows: HashSet<Vec<String>> = HashSet::new();

    for record_result in csv_reader.records() {
        let record = record_result?;
        stats.rows_read += 1;

        let row_key: Vec<String> = record.iter().skip(1).map(str::to_owned).collect();
        if !seen_rows.insert(row_key) {
            stats.duplicates_dropped += 1;
            continue;
        }

        if columns.has_missing_value(&record) {
            stats.incomplete_dropped += 1;
            continue;
        }

        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let parser = RowParser {
            columns: &columns,
            record: &record,
            line,
        };
        match parser.parse() {
            Ok(track) => tracks.push(track),
            Err(problem) => {
                warn!("Skipping catalog row: {:?}", problem);
                stats.invalid_dropped += 1;
                problems.push(problem);
            }
        }
    }

    debug!("Catalog load stats: {:?}", stats);

    if tracks.is_empty() {
        return Err(CatalogLoadError::Empty {
            rows_read: stats.rows_read,
        });
    }

    Ok(LoadedTracks {
        tracks,
        stats,
        problems,
    })
}

pub fn load_tracks_from_path(path: &Path) -> Result<LoadedTracks, CatalogLoadError> {
    let file = std::fs::File::open(path).map_err(|err| CatalogLoadError::Open {
        path: path.to_owned(),
        source: csv::Error::from(err),
    })?;
    load_tracks(std::io::BufReader::new(file))
}
