use std::path::PathBuf;

use serde::Deserialize;

/// A single track as listed in the catalog.
///
/// `duration` is the catalog's estimate in seconds; the playback backend
/// reports the authoritative value once the source is loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub duration: f64,
    pub source: PathBuf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Album {
    pub slug: String,
    pub title: String,
    pub artist: String,
    pub cover: Option<PathBuf>,
    pub release_info: String,
    /// Playback order.
    pub tracks: Vec<Track>,
}

impl Album {
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Sum of the catalog durations, used for the album header.
    pub fn total_duration(&self) -> f64 {
        self.tracks
            .iter()
            .map(|t| t.duration)
            .filter(|d| d.is_finite() && *d > 0.0)
            .sum()
    }
}

/// Read-only collection of albums. Slugs are unique.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub(super) albums: Vec<Album>,
}

impl Catalog {
    pub fn albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn is_empty(&self) -> bool {
        self.albums.is_empty()
    }

    pub fn first(&self) -> Option<&Album> {
        self.albums.first()
    }
}
