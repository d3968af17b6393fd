//! Playback primitive contract: the trait a media backend implements and the
//! event types it publishes.

mod events;
mod primitive;
mod types;

pub use events::{EventHub, Subscription};
pub use primitive::MediaPrimitive;
pub use types::*;

#[cfg(test)]
pub(crate) mod testing;
