use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::{debug, error, info, warn};

use crate::config::AudioSettings;
use crate::error::MediaError;
use crate::media::{EventHub, LoadId, MediaEvent, MediaEventKind};

use super::sink::create_sink_at;
use super::types::{AudioCmd, PlaybackHandle};

/// Everything the audio thread owns between commands.
pub(super) struct AudioState {
    stream: Option<OutputStream>,
    sink: Option<Sink>,
    loaded: Option<(LoadId, PathBuf)>,
    paused: bool,
    volume: f32,

    // Track start time and accumulated elapsed when paused.
    started_at: Option<Instant>,
    accumulated: Duration,

    playback_info: PlaybackHandle,
    events: EventHub,
}

impl AudioState {
    pub(super) fn new(
        stream: Option<OutputStream>,
        playback_info: PlaybackHandle,
        events: EventHub,
    ) -> Self {
        Self {
            stream,
            sink: None,
            loaded: None,
            paused: true,
            volume: 1.0,
            started_at: None,
            accumulated: Duration::ZERO,
            playback_info,
            events,
        }
    }

    fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    fn emit(&self, kind: MediaEventKind) {
        if let Some((id, _)) = &self.loaded {
            self.events.emit(MediaEvent { load: *id, kind });
        }
    }

    fn emit_for(&self, id: LoadId, kind: MediaEventKind) {
        self.events.emit(MediaEvent { load: id, kind });
    }

    fn publish(&self) {
        if let Ok(mut info) = self.playback_info.lock() {
            info.load = self.loaded.as_ref().map(|(id, _)| *id);
            info.elapsed = self.elapsed();
        }
    }

    pub(super) fn stop_sink(&mut self) {
        if let Some(s) = self.sink.take() {
            s.stop();
        }
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub(super) fn do_load(&mut self, id: LoadId, path: PathBuf) {
        self.stop_sink();
        self.loaded = Some((id, path.clone()));
        if let Ok(mut info) = self.playback_info.lock() {
            info.duration = None;
        }

        let Some(stream) = self.stream.as_ref() else {
            self.emit_for(
                id,
                MediaEventKind::Failed(MediaError::Device("no audio output device".to_string())),
            );
            self.publish();
            return;
        };

        match create_sink_at(stream, &path, Duration::ZERO) {
            Ok((sink, duration)) => {
                sink.set_volume(self.volume);
                self.sink = Some(sink);
                debug!(path = %path.display(), ?duration, "source loaded");
                if let Ok(mut info) = self.playback_info.lock() {
                    info.duration = duration;
                }
                self.emit_for(id, MediaEventKind::PositionChanged(0.0));
                if let Some(d) = duration {
                    self.emit_for(id, MediaEventKind::DurationChanged(d.as_secs_f64()));
                }
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load source");
                self.emit_for(id, MediaEventKind::Failed(e));
            }
        }
        self.publish();
    }

    /// Replace a drained sink with a fresh one at position 0, the way a new
    /// load would.
    fn rewind(&mut self) {
        let Some((id, path)) = self.loaded.clone() else {
            return;
        };
        self.stop_sink();

        let Some(stream) = self.stream.as_ref() else {
            self.emit_for(
                id,
                MediaEventKind::Failed(MediaError::Device("no audio output device".to_string())),
            );
            return;
        };
        match create_sink_at(stream, &path, Duration::ZERO) {
            Ok((sink, _)) => {
                sink.set_volume(self.volume);
                self.sink = Some(sink);
                debug!(path = %path.display(), "rewound finished source");
                self.emit_for(id, MediaEventKind::PositionChanged(0.0));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to rewind source");
                self.emit_for(id, MediaEventKind::Failed(e));
            }
        }
    }

    pub(super) fn do_play(&mut self) {
        // Playing a source that ran to its end starts it over.
        if self.sink.as_ref().is_some_and(Sink::empty) {
            self.rewind();
            if self.sink.is_none() {
                self.publish();
                return;
            }
        }

        match self.sink.as_ref() {
            Some(s) => {
                if self.paused {
                    s.play();
                    self.paused = false;
                    self.started_at = Some(Instant::now());
                }
            }
            None => {
                // Loaded but the sink never came up; the failure was already
                // reported, repeat it so the caller sees this attempt fail too.
                if self.loaded.is_some() {
                    self.emit(MediaEventKind::Failed(MediaError::NothingLoaded));
                }
            }
        }
        self.publish();
    }

    pub(super) fn do_pause(&mut self) {
        if let Some(s) = self.sink.as_ref() {
            if !self.paused {
                s.pause();
                if let Some(st) = self.started_at.take() {
                    self.accumulated += st.elapsed();
                }
                self.paused = true;
            }
        }
        self.publish();
    }

    pub(super) fn do_seek(&mut self, to: Duration) {
        // Rebuild the current sink and skip into the file. This uses
        // `Source::skip_duration` (works for common formats).
        let (Some(stream), Some((id, path))) = (self.stream.as_ref(), self.loaded.clone()) else {
            return;
        };
        if self.sink.is_none() {
            return;
        }

        match create_sink_at(stream, &path, to) {
            Ok((new_sink, _)) => {
                if let Some(s) = self.sink.take() {
                    s.stop();
                }
                new_sink.set_volume(self.volume);
                if self.paused {
                    self.started_at = None;
                } else {
                    new_sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(new_sink);
                self.accumulated = to;
                self.emit_for(id, MediaEventKind::PositionChanged(to.as_secs_f64()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "seek failed");
                self.stop_sink();
                self.emit_for(id, MediaEventKind::Failed(e));
            }
        }
        self.publish();
    }

    pub(super) fn do_set_volume(&mut self, level: f32) {
        self.volume = level.clamp(0.0, 1.0);
        if let Some(s) = self.sink.as_ref() {
            s.set_volume(self.volume);
        }
        self.emit(MediaEventKind::VolumeChanged(self.volume));
    }

    /// Handle one command; returns false once the thread should exit.
    pub(super) fn handle(&mut self, cmd: AudioCmd) -> bool {
        match cmd {
            AudioCmd::Load { id, path } => self.do_load(id, path),
            AudioCmd::Unload => {
                self.stop_sink();
                self.loaded = None;
                if let Ok(mut info) = self.playback_info.lock() {
                    info.duration = None;
                }
                self.publish();
            }
            AudioCmd::Play => self.do_play(),
            AudioCmd::Pause => self.do_pause(),
            AudioCmd::Seek(to) => self.do_seek(to),
            AudioCmd::SetVolume(level) => self.do_set_volume(level),
            AudioCmd::Quit { fade_out_ms } => {
                if let Some(ref s) = self.sink {
                    // Fade out gently before stopping.
                    if !self.paused {
                        fade_out_sink(s, self.volume, fade_out_ms);
                    }
                    s.stop();
                }
                self.sink = None;
                self.paused = true;
                self.started_at = None;
                self.publish();
                info!("audio thread exiting");
                return false;
            }
        }
        true
    }

    #[cfg(test)]
    pub(super) fn attach_playing_sink(&mut self, sink: Sink) {
        self.sink = Some(sink);
        self.paused = false;
        self.started_at = Some(Instant::now());
    }

    /// Periodic work between commands: position updates and end detection.
    pub(super) fn tick(&mut self) {
        let Some(sink) = self.sink.as_ref() else {
            return;
        };
        if self.paused {
            return;
        }

        if sink.empty() {
            if let Some(st) = self.started_at.take() {
                self.accumulated += st.elapsed();
            }
            self.paused = true;
            let end = self
                .playback_info
                .lock()
                .ok()
                .and_then(|info| info.duration)
                .unwrap_or(self.accumulated);
            self.accumulated = end;
            self.emit(MediaEventKind::PositionChanged(end.as_secs_f64()));
            self.emit(MediaEventKind::Ended);
        } else {
            self.emit(MediaEventKind::PositionChanged(self.elapsed().as_secs_f64()));
        }
        self.publish();
    }
}

/// Fixed-rate schedule for `AudioState::tick`, independent of how often
/// commands arrive.
pub(super) struct Ticker {
    interval: Duration,
    next: Instant,
}

impl Ticker {
    pub(super) fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next: now + interval,
        }
    }

    /// How long to wait for a command before the next tick is due.
    pub(super) fn wait(&self, now: Instant) -> Duration {
        self.next.saturating_duration_since(now)
    }

    /// True when a tick is due; schedules the following one.
    pub(super) fn due(&mut self, now: Instant) -> bool {
        if now < self.next {
            return false;
        }
        self.next = now + self.interval;
        true
    }
}

fn fade_out_sink(sink: &Sink, from: f32, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(from * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}

pub(super) fn spawn_audio_thread(
    rx: Receiver<AudioCmd>,
    playback_info: PlaybackHandle,
    events: EventHub,
    audio_settings: AudioSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut stream) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                stream.log_on_drop(false);
                Some(stream)
            }
            Err(e) => {
                error!(error = %e, "no audio output device; every load will fail");
                None
            }
        };

        let mut state = AudioState::new(stream, playback_info, events);

        let mut ticker = Ticker::new(
            Duration::from_millis(audio_settings.position_interval_ms.max(1)),
            Instant::now(),
        );

        loop {
            match rx.recv_timeout(ticker.wait(Instant::now())) {
                Ok(cmd) => {
                    if !state.handle(cmd) {
                        break;
                    }
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
            // A steady stream of commands must not starve position updates.
            if ticker.due(Instant::now()) {
                state.tick();
            }
        }
    })
}
