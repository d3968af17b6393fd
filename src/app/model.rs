//! The `App` struct: a playback session plus what only the terminal view
//! needs (cursor, popup, last rendered click targets).

use crate::error::SessionError;
use crate::media::MediaPrimitive;
use crate::session::PlaybackSession;
use crate::ui::{Intent, TransportAreas};

pub struct App<P: MediaPrimitive> {
    pub session: PlaybackSession<P>,
    /// Cursor row in the track list. Independent of the current track.
    pub selected: usize,
    pub metadata_window: bool,
    /// Click targets from the last frame.
    pub areas: TransportAreas,
    /// Current track last seen by `follow_playback`.
    followed: usize,
}

impl<P: MediaPrimitive> App<P> {
    pub fn new(session: PlaybackSession<P>) -> Self {
        let current = session.current_index();
        Self {
            session,
            selected: current,
            metadata_window: false,
            areas: TransportAreas::default(),
            followed: current,
        }
    }

    pub fn track_count(&self) -> usize {
        self.session.album().len()
    }

    /// Move the cursor to the next track, wrapping to the first.
    pub fn next(&mut self) {
        let len = self.track_count();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor to the previous track, wrapping to the last.
    pub fn prev(&mut self) {
        let len = self.track_count();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    /// Hand `intent` to the session.
    pub fn dispatch(&mut self, intent: Intent) -> Result<(), SessionError> {
        intent.apply(&mut self.session)
    }

    /// Move the cursor onto the current track when it changed since the last
    /// call (skips, auto-advance). Returns whether the cursor moved.
    pub fn follow_playback(&mut self) -> bool {
        let current = self.session.current_index();
        if current == self.followed {
            return false;
        }
        self.followed = current;
        let moved = self.selected != current;
        self.selected = current;
        moved
    }

    /// Seek intent `delta` seconds away from the current position; `None`
    /// while the duration is unknown.
    pub fn scrub_intent(&self, delta: f64) -> Option<Intent> {
        let duration = self.session.duration();
        if !(duration.is_finite() && duration > 0.0) {
            return None;
        }
        let target = (self.session.elapsed() + delta).clamp(0.0, duration);
        Some(Intent::Seek(target / duration))
    }

    pub fn volume_intent(&self, delta: f32) -> Intent {
        Intent::SetVolume((self.session.volume() + delta).clamp(0.0, 1.0))
    }
}
