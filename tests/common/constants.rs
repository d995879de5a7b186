//! Shared constants for end-to-end tests
//!
//! When the fixture catalog changes, update only this file.

// ============================================================================
// Fixture Catalog
// ============================================================================

/// (title, artists, genre, popularity) of every valid fixture row, in file order.
pub const FIXTURE_TRACKS: &[(&str, &str, &str, u32)] = &[
    ("Midnight Train", "Luna Ray;The Comets", "pop", 90),
    ("Golden Skies", "Mara Vale", "pop", 87),
    ("Electric Dreams", "Nova Park", "pop", 84),
    ("Paper Hearts", "Mara Vale", "pop", 81),
    ("Summer Rain", "The Daylights", "pop", 78),
    ("Neon Lights", "Nova Park", "pop", 75),
    ("Dancing Alone", "Kit Harper", "pop", 72),
    ("City Of Stars", "The Daylights", "pop", 69),
    ("Silver Lining", "Kit Harper", "pop", 66),
    ("Ocean Eyes", "Mara Vale", "pop", 63),
    ("Broken Mirrors", "Nova Park", "pop", 60),
    ("Velvet Morning", "The Daylights", "pop", 57),
    ("Starlight Drive", "Luna Ray", "pop", 54),
    ("Crystal Waves", "Kit Harper", "pop", 51),
    ("Thunder Road", "Iron Valley", "rock", 85),
    ("Iron Horse", "Iron Valley", "rock", 81),
    ("Black Canyon", "Dust Kings", "rock", 77),
    ("Wild Fire", "Dust Kings", "rock", 73),
    ("Stone Cold", "Red Summit", "rock", 69),
    ("Highway Ghost", "Iron Valley", "rock", 65),
    ("Rusty Chains", "Red Summit", "rock", 61),
    ("Desert Storm", "Dust Kings", "rock", 57),
    ("Burning Bridges", "Red Summit", "rock", 53),
    ("Loud Engines", "Iron Valley", "rock", 49),
    ("Rebel Heart", "Dust Kings", "rock", 45),
    ("Steel Wheels", "Red Summit", "rock", 41),
    ("Blue Hour", "Miles Quartet", "jazz", 45),
    ("Smoky Lounge", "Miles Quartet", "jazz", 38),
    ("Late Night Sax", "Cole Trio", "jazz", 33),
    ("Quiet Piano", "Cole Trio", "jazz", 30),
    ("Brushes", "Miles Quartet", "jazz", 12),
];

/// Rows in the fixture file, including the ones the loader drops.
pub const FIXTURE_ROWS_READ: usize = 34;

/// Tracks kept after loading.
pub const FIXTURE_TRACK_COUNT: usize = 31;

/// Distinct genres in the fixture, sorted.
pub const FIXTURE_GENRES: [&str; 3] = ["jazz", "pop", "rock"];

/// A title present in the catalog
pub const SEED_TITLE: &str = "Midnight Train";

/// Display string of `SEED_TITLE`, artists kept verbatim
pub const SEED_DISPLAY_NAME: &str = "Midnight Train by Luna Ray;The Comets";

/// A title nothing in the catalog resembles
pub const UNKNOWN_TITLE: &str = "zzz_not_a_real_song_zzz";

/// Genre with more than enough popular tracks
pub const POP_GENRE: &str = "pop";

/// Genre with only three tracks above the popularity threshold
pub const JAZZ_GENRE: &str = "jazz";

/// Number of songs returned by every engine
pub const RESULTS_COUNT: usize = 11;

// ============================================================================
// Test Timeouts and Configuration
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

/// Origin the front end is served from
pub const FRONT_END_ORIGIN: &str = "http://localhost:5173";
