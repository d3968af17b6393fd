//! Commands and shared state exchanged with the audio thread.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::media::LoadId;

#[derive(Debug)]
pub enum AudioCmd {
    /// Replace the current sink with a paused one for `path`.
    Load { id: LoadId, path: PathBuf },
    /// Stop and drop the current sink.
    Unload,
    Play,
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    SetVolume(f32),
    /// Quit the audio thread, optionally fading out over `fade_out_ms` milliseconds.
    Quit { fade_out_ms: u64 },
}

#[derive(Debug, Clone)]
/// Runtime playback information published by the audio thread.
pub struct PlaybackInfo {
    /// Load currently held by the thread, if any.
    pub load: Option<LoadId>,
    /// Elapsed playback time for the loaded source.
    pub elapsed: Duration,
    /// Duration reported by the decoder (or the file tags), when known.
    pub duration: Option<Duration>,
}

impl Default for PlaybackInfo {
    fn default() -> Self {
        Self {
            load: None,
            elapsed: Duration::ZERO,
            duration: None,
        }
    }
}

pub type PlaybackHandle = Arc<Mutex<PlaybackInfo>>;
