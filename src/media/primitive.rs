use std::path::Path;

use crate::error::MediaError;

use super::events::Subscription;
use super::types::LoadId;

/// The minimal contract the playback session needs from a media backend.
///
/// Commands are fire-and-forget: a backend may accept `play` and report a
/// failure later through a `Failed` event.
pub trait MediaPrimitive {
    /// Replace whatever is loaded with `source`, paused at position 0.
    fn load(&mut self, source: &Path) -> Result<LoadId, MediaError>;

    /// Release the loaded source and stop any output.
    fn unload(&mut self);

    fn play(&mut self) -> Result<(), MediaError>;

    fn pause(&mut self);

    fn set_position(&mut self, seconds: f64);

    /// `level` is in `[0, 1]`.
    fn set_volume(&mut self, level: f32);

    fn current_position(&self) -> f64;

    /// `None` until the backend knows the real duration.
    fn current_duration(&self) -> Option<f64>;

    /// Register for position/duration/end/failure notifications.
    fn subscribe(&mut self) -> Subscription;
}
