use crate::catalog::{Album, Track};

/// Where the session is in its lifecycle.
///
/// There is no "idle" variant: a session only exists once it has been
/// initialized with an album.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TransportState {
    Paused,
    Playing,
    /// The primitive rejected the current source. Cleared by loading a track.
    LoadFailed,
    /// Torn down; every operation is rejected.
    Closed,
}

/// Options a session is created with.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub volume: f32,
    pub auto_advance: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            volume: 0.8,
            auto_advance: true,
        }
    }
}

/// Read-only view of the session handed to the presentation layer.
///
/// `elapsed` and `duration` are the session's cached copies of the
/// primitive's values: they are updated optimistically on seek/track change
/// and corrected by the next primitive notification.
#[derive(Debug, Clone, Copy)]
pub struct SessionSnapshot<'a> {
    pub album: &'a Album,
    pub current: usize,
    pub is_playing: bool,
    pub elapsed: f64,
    pub duration: f64,
    pub volume: f32,
    pub transport: TransportState,
}

impl<'a> SessionSnapshot<'a> {
    pub fn current_track(&self) -> &'a Track {
        &self.album.tracks[self.current]
    }
}
