//! Playback session: one album view's transport state, kept in sync with a
//! `MediaPrimitive` through its event subscription.

mod playback;
mod state;

pub use playback::PlaybackSession;
pub use state::*;
