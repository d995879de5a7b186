//! Test fixture creation
//!
//! Writes a small tracks CSV shaped like the real dataset: a leading index
//! column, quoted fields, multi-artist values and a few rows the loader must drop.

use super::constants::*;
use std::collections::HashSet;
use std::fmt::Write as _;
use std::path::PathBuf;
use tempfile::TempDir;

const CSV_HEADER: &str = ",track_id,artists,album_name,track_name,popularity,duration_ms,explicit,danceability,energy,key,loudness,mode,speechiness,acousticness,instrumentalness,liveness,valence,tempo,time_signature,track_genre";

/// The eight audio features of fixture row `k`, in request order.
///
/// Every value is a single division so its decimal form parses back to the same `f64`.
pub fn fixture_features(k: usize) -> [f64; 8] {
    [
        ((k * 37) % 80 + 20) as f64 / 100.0,
        ((k * 53) % 100) as f64 / 100.0,
        -(((k * 19) % 90 + 10) as f64 / 10.0),
        ((k * 11) % 30) as f64 / 100.0,
        ((k * 29) % 100) as f64 / 100.0,
        ((k * 17) % 10) as f64 / 100.0,
        ((k * 7) % 40) as f64 / 100.0,
        ((k * 43) % 100) as f64 / 100.0,
    ]
}

pub fn fixture_display_name(k: usize) -> String {
    let (title, artists, _, _) = FIXTURE_TRACKS[k];
    format!("{} by {}", title, artists)
}

/// Display strings of the fixture tracks of `genre`, at any popularity.
pub fn genre_display_names(genre: &str) -> HashSet<String> {
    FIXTURE_TRACKS
        .iter()
        .enumerate()
        .filter(|(_, (_, _, g, _))| *g == genre)
        .map(|(k, _)| fixture_display_name(k))
        .collect()
}

struct Row<'a> {
    index: usize,
    k: usize,
    title: &'a str,
    artists: &'a str,
    genre: &'a str,
    popularity: u32,
    album: String,
    tempo: String,
}

impl Row<'_> {
    fn to_csv(&self) -> String {
        let f = fixture_features(self.k);
        format!(
            "{},track-{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},{},4,{}",
            self.index,
            self.k,
            self.artists,
            self.album,
            self.title,
            self.popularity,
            180_000 + self.k * 1000,
            if self.k % 5 == 0 { "True" } else { "False" },
            f[0],
            f[1],
            self.k % 12,
            f[2],
            self.k % 2,
            f[3],
            f[4],
            f[5],
            f[6],
            f[7],
            self.tempo,
            self.genre,
        )
    }
}

fn fixture_row(index: usize, k: usize) -> Row<'static> {
    let (title, artists, genre, popularity) = FIXTURE_TRACKS[k];
    Row {
        index,
        k,
        title,
        artists,
        genre,
        popularity,
        album: format!("\"Hits, Vol. {}\"", k),
        tempo: ((80 + (k * 13) % 90) as f64).to_string(),
    }
}

fn fixture_csv() -> String {
    let mut text = String::from(CSV_HEADER);
    for k in 0..FIXTURE_TRACKS.len() {
        let _ = write!(text, "\n{}", fixture_row(k, k).to_csv());
    }

    let next = FIXTURE_TRACKS.len();
    // Same row as the first one under a new index: dropped as a duplicate.
    let _ = write!(text, "\n{}", fixture_row(next, 0).to_csv());

    let incomplete = Row {
        index: next + 1,
        k: next + 1,
        title: "Lost Tape",
        artists: "Nobody",
        genre: "pop",
        popularity: 70,
        album: String::new(),
        tempo: "100".to_string(),
    };
    let _ = write!(text, "\n{}", incomplete.to_csv());

    let invalid = Row {
        index: next + 2,
        k: next + 2,
        title: "Broken Meter",
        artists: "Nobody",
        genre: "rock",
        popularity: 70,
        album: "Demos".to_string(),
        tempo: "fast".to_string(),
    };
    let _ = write!(text, "\n{}", invalid.to_csv());

    text.push('\n');
    text
}

/// Creates a temporary directory holding the fixture catalog.
///
/// Returns the directory (keep it alive for the test duration) and the CSV path.
pub fn create_test_catalog() -> anyhow::Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join("tracks.csv");
    std::fs::write(&path, fixture_csv())?;
    Ok((dir, path))
}
