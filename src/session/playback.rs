use tracing::{debug, error, info, warn};

use crate::catalog::Album;
use crate::error::SessionError;
use crate::media::{LoadId, MediaEvent, MediaEventKind, MediaPrimitive, Subscription};

use super::state::{SessionOptions, SessionSnapshot, TransportState};

/// The single source of truth for what is playing and where.
///
/// Owns the primitive and its event subscription. State changes come from
/// two places only: the transport operations below, and primitive events
/// drained by `pump_events`.
pub struct PlaybackSession<P: MediaPrimitive> {
    album: Album,
    current: usize,
    is_playing: bool,
    elapsed: f64,
    duration: f64,
    /// Whether `duration` came from the primitive rather than the catalog.
    duration_reported: bool,
    volume: f32,
    transport: TransportState,
    auto_advance: bool,

    primitive: P,
    subscription: Option<Subscription>,
    /// The load whose events we accept; `None` when nothing is loaded.
    load: Option<LoadId>,
}

impl<P: MediaPrimitive> PlaybackSession<P> {
    /// Open a session on `album`: first track loaded, paused.
    pub fn initialize(
        album: Album,
        mut primitive: P,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        if album.is_empty() {
            return Err(SessionError::EmptyAlbum(album.slug));
        }

        let subscription = primitive.subscribe();
        let volume = sanitize_level(options.volume).unwrap_or(0.8);
        primitive.set_volume(volume);

        let mut session = Self {
            current: 0,
            is_playing: false,
            elapsed: 0.0,
            duration: album.tracks[0].duration,
            duration_reported: false,
            volume,
            transport: TransportState::Paused,
            auto_advance: options.auto_advance,
            album,
            primitive,
            subscription: Some(subscription),
            load: None,
        };
        session.load_track(0);
        info!(album = %session.album.slug, tracks = session.album.len(), "session opened");
        Ok(session)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            album: &self.album,
            current: self.current,
            is_playing: self.is_playing,
            elapsed: self.elapsed,
            duration: self.duration,
            volume: self.volume,
            transport: self.transport,
        }
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn transport(&self) -> TransportState {
        self.transport
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn play(&mut self) -> Result<(), SessionError> {
        self.ensure_open("play")?;
        self.start();
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), SessionError> {
        self.ensure_open("pause")?;
        self.primitive.pause();
        self.is_playing = false;
        if self.transport == TransportState::Playing {
            self.transport = TransportState::Paused;
        }
        Ok(())
    }

    /// Make `index` the current track. Selecting the current track again is a
    /// no-op: it neither reloads nor rewinds.
    pub fn select_track(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_open("select_track")?;
        self.check_index(index)?;
        if index != self.current {
            self.load_track(index);
        }
        Ok(())
    }

    /// Track-row gesture: toggles transport on the current track, otherwise
    /// switches to `index` and starts it.
    pub fn handle_track_activate(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_open("handle_track_activate")?;
        self.check_index(index)?;
        if index == self.current {
            if self.is_playing {
                self.pause()
            } else {
                self.play()
            }
        } else {
            self.select_track(index)?;
            self.play()
        }
    }

    /// Previous track, or the first track again from 0 when already there.
    pub fn skip_to_previous(&mut self) -> Result<(), SessionError> {
        self.ensure_open("skip_to_previous")?;
        self.load_track(self.current.saturating_sub(1));
        self.start();
        Ok(())
    }

    /// Next track, or the last track again from 0 when already there.
    pub fn skip_to_next(&mut self) -> Result<(), SessionError> {
        self.ensure_open("skip_to_next")?;
        let last = self.album.len() - 1;
        self.load_track((self.current + 1).min(last));
        self.start();
        Ok(())
    }

    /// Jump to `fraction` of the current duration. `elapsed` is updated right
    /// away; the primitive's next position event may correct it.
    pub fn seek(&mut self, fraction: f64) -> Result<(), SessionError> {
        self.ensure_open("seek")?;
        if !fraction.is_finite() {
            warn!(fraction, "ignoring non-finite seek");
            return Ok(());
        }
        let duration = if self.duration.is_finite() && self.duration > 0.0 {
            self.duration
        } else {
            0.0
        };
        let target = fraction.clamp(0.0, 1.0) * duration;
        self.primitive.set_position(target);
        self.elapsed = target;
        Ok(())
    }

    pub fn set_volume(&mut self, level: f32) -> Result<(), SessionError> {
        self.ensure_open("set_volume")?;
        let Some(level) = sanitize_level(level) else {
            warn!(level, "ignoring non-finite volume");
            return Ok(());
        };
        self.primitive.set_volume(level);
        self.volume = level;
        Ok(())
    }

    /// Apply every pending primitive notification; returns how many were
    /// applied. A closed session has no subscription and applies nothing.
    pub fn pump_events(&mut self) -> usize {
        let events: Vec<MediaEvent> = match &self.subscription {
            Some(sub) => sub.try_iter().collect(),
            None => return 0,
        };

        let mut applied = 0;
        for event in events {
            if self.apply_event(event) {
                applied += 1;
            }
        }
        applied
    }

    /// Detach from the primitive and release the loaded source. Idempotent;
    /// also runs on drop.
    pub fn teardown(&mut self) {
        if self.transport == TransportState::Closed {
            return;
        }
        self.subscription = None;
        self.primitive.unload();
        self.load = None;
        self.is_playing = false;
        self.transport = TransportState::Closed;
        info!(album = %self.album.slug, "session closed");
    }

    fn apply_event(&mut self, event: MediaEvent) -> bool {
        if self.load != Some(event.load) {
            debug!(load = event.load.0, "dropping event for a replaced source");
            return false;
        }

        match event.kind {
            MediaEventKind::PositionChanged(pos) => {
                if !pos.is_finite() {
                    return false;
                }
                let mut pos = pos.max(0.0);
                if self.duration_reported {
                    pos = pos.min(self.duration);
                }
                self.elapsed = pos;
            }
            MediaEventKind::DurationChanged(d) => {
                if !(d.is_finite() && d > 0.0) {
                    return false;
                }
                self.duration = d;
                self.duration_reported = true;
                self.elapsed = self.elapsed.min(d);
            }
            MediaEventKind::VolumeChanged(v) => match sanitize_level(v) {
                Some(v) => self.volume = v,
                None => return false,
            },
            MediaEventKind::Ended => {
                self.is_playing = false;
                self.elapsed = self.duration;
                self.transport = TransportState::Paused;
                if self.auto_advance && self.current + 1 < self.album.len() {
                    debug!(track = self.current, "track ended, advancing");
                    self.load_track(self.current + 1);
                    self.start();
                } else {
                    debug!(track = self.current, "track ended");
                }
            }
            MediaEventKind::Failed(e) => {
                warn!(
                    album = %self.album.slug,
                    track = self.current,
                    error = %e,
                    "playback failed"
                );
                self.is_playing = false;
                self.transport = TransportState::LoadFailed;
            }
        }
        true
    }

    /// Load `index` unconditionally: position 0, catalog duration, paused.
    fn load_track(&mut self, index: usize) {
        let track = &self.album.tracks[index];
        self.current = index;
        self.elapsed = 0.0;
        self.duration = track.duration;
        self.duration_reported = false;
        self.is_playing = false;

        match self.primitive.load(&track.source) {
            Ok(id) => {
                self.load = Some(id);
                self.transport = TransportState::Paused;
                debug!(track = index, title = %track.title, load = id.0, "track loaded");
            }
            Err(e) => {
                warn!(
                    track = index,
                    source = %track.source.display(),
                    error = %e,
                    "failed to load track"
                );
                self.load = None;
                self.transport = TransportState::LoadFailed;
            }
        }
    }

    /// Shared body of `play`: optimistic, never retried.
    fn start(&mut self) {
        if self.is_playing {
            return;
        }
        if self.transport == TransportState::LoadFailed {
            warn!(track = self.current, "not starting a track that failed to load");
            return;
        }
        match self.primitive.play() {
            Ok(()) => {
                self.is_playing = true;
                self.transport = TransportState::Playing;
            }
            Err(e) => {
                warn!(track = self.current, error = %e, "primitive refused to play");
                self.is_playing = false;
                self.transport = TransportState::LoadFailed;
            }
        }
    }

    fn ensure_open(&self, op: &'static str) -> Result<(), SessionError> {
        if self.transport == TransportState::Closed {
            error!(op, album = %self.album.slug, "operation on a closed session");
            return Err(SessionError::Closed);
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<(), SessionError> {
        if index >= self.album.len() {
            error!(index, len = self.album.len(), "track index outside the album");
            return Err(SessionError::InvalidTrack {
                index,
                len: self.album.len(),
            });
        }
        Ok(())
    }
}

impl<P: MediaPrimitive> Drop for PlaybackSession<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

fn sanitize_level(level: f32) -> Option<f32> {
    level.is_finite().then(|| level.clamp(0.0, 1.0))
}
