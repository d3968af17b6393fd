//! Error types shared across the catalog, media and session layers.

use std::path::PathBuf;

use thiserror::Error;

/// Failures while building or querying the album catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// No album carries the requested slug.
    #[error("album not found: {0}")]
    NotFound(String),

    /// Two albums resolved to the same slug.
    #[error("duplicate album slug: {0}")]
    DuplicateSlug(String),

    /// An album record has no tracks.
    #[error("album has no tracks: {0}")]
    EmptyAlbum(String),

    /// The catalog source yielded no albums at all.
    #[error("no albums found in {0}")]
    Empty(String),

    #[error("failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Failures reported by a playback primitive.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MediaError {
    /// The source locator does not point at anything playable.
    #[error("source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("failed to decode {0}")]
    Decode(String),

    /// The output device could not be opened or is busy.
    #[error("audio device error: {0}")]
    Device(String),

    /// The primitive's backend is gone (e.g. the audio thread exited).
    #[error("playback backend disconnected")]
    Disconnected,

    /// `play` was requested with nothing loaded.
    #[error("no source loaded")]
    NothingLoaded,
}

/// Errors a caller can get back from a `PlaybackSession` operation.
///
/// These are programming errors on the caller's side. Primitive failures are
/// never reported here; they show up in the session state instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("track index {index} is outside the album ({len} tracks)")]
    InvalidTrack { index: usize, len: usize },

    #[error("album {0:?} has no tracks")]
    EmptyAlbum(String),

    /// The session was torn down; no further transitions are permitted.
    #[error("session is closed")]
    Closed,
}
