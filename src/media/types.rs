use crate::error::MediaError;

/// Identifies one `load` call on a primitive. Events carry the id of the
/// load they describe so listeners can drop events for a source that has
/// since been replaced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

#[derive(Debug, Clone, PartialEq)]
pub struct MediaEvent {
    pub load: LoadId,
    pub kind: MediaEventKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MediaEventKind {
    /// Playback position, in seconds.
    PositionChanged(f64),
    /// The real duration of the loaded source, in seconds.
    DurationChanged(f64),
    /// Output volume changed outside of `set_volume`. Best-effort.
    VolumeChanged(f32),
    /// The loaded source played to its end.
    Ended,
    /// The source could not be loaded or started.
    Failed(MediaError),
}
