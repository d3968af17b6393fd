//! rodio-backed playback primitive.
//!
//! `AudioPlayer` implements `MediaPrimitive` by forwarding commands to a
//! dedicated audio thread that owns the output stream and the current `Sink`.
//! The thread publishes a `PlaybackInfo` snapshot for synchronous reads and
//! emits `MediaEvent`s through an `EventHub`.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;

#[cfg(test)]
mod tests;
