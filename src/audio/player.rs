use std::path::Path;
use std::sync::{Arc, Mutex};
use std::sync::mpsc::{self, Sender};
use std::thread::JoinHandle;
use std::time::Duration;

use tracing::debug;

use crate::config::AudioSettings;
use crate::error::MediaError;
use crate::media::{EventHub, LoadId, MediaPrimitive, Subscription};

use super::thread::spawn_audio_thread;
use super::types::{AudioCmd, PlaybackHandle, PlaybackInfo};

pub struct AudioPlayer {
    tx: Sender<AudioCmd>,
    playback: PlaybackHandle,
    events: EventHub,
    next_load: u64,
    loaded: Option<LoadId>,
    join: Mutex<Option<JoinHandle<()>>>,
}

impl AudioPlayer {
    pub fn new(audio_settings: AudioSettings) -> Self {
        let (tx, rx) = mpsc::channel::<AudioCmd>();
        let playback_info = Arc::new(Mutex::new(PlaybackInfo::default()));
        let events = EventHub::new();

        let audio_handle =
            spawn_audio_thread(rx, playback_info.clone(), events.clone(), audio_settings);

        Self {
            tx,
            playback: playback_info,
            events,
            next_load: 0,
            loaded: None,
            join: Mutex::new(Some(audio_handle)),
        }
    }

    fn send(&self, cmd: AudioCmd) -> Result<(), MediaError> {
        self.tx.send(cmd).map_err(|_| MediaError::Disconnected)
    }

    /// Ask the audio thread to fade out and exit, then wait for it.
    pub fn quit_softly(&self, fade_out: Duration) {
        let _ = self.send(AudioCmd::Quit {
            fade_out_ms: fade_out.as_millis() as u64,
        });

        if let Ok(mut j) = self.join.lock() {
            if let Some(h) = j.take() {
                let _ = h.join();
            }
        }
    }
}

impl MediaPrimitive for AudioPlayer {
    fn load(&mut self, source: &Path) -> Result<LoadId, MediaError> {
        if !source.is_file() {
            // Don't leave the previous source playing behind a failed load.
            self.unload();
            return Err(MediaError::SourceUnavailable(source.display().to_string()));
        }

        self.next_load += 1;
        let id = LoadId(self.next_load);
        self.send(AudioCmd::Load {
            id,
            path: source.to_path_buf(),
        })?;
        self.loaded = Some(id);
        debug!(load = id.0, path = %source.display(), "load requested");
        Ok(id)
    }

    fn unload(&mut self) {
        self.loaded = None;
        let _ = self.send(AudioCmd::Unload);
    }

    fn play(&mut self) -> Result<(), MediaError> {
        if self.loaded.is_none() {
            return Err(MediaError::NothingLoaded);
        }
        self.send(AudioCmd::Play)
    }

    fn pause(&mut self) {
        let _ = self.send(AudioCmd::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        let secs = if seconds.is_finite() { seconds.max(0.0) } else { 0.0 };
        let _ = self.send(AudioCmd::Seek(Duration::from_secs_f64(secs)));
    }

    fn set_volume(&mut self, level: f32) {
        let _ = self.send(AudioCmd::SetVolume(level));
    }

    fn current_position(&self) -> f64 {
        // Until the thread has picked up our latest load, its snapshot
        // describes the previous source.
        self.playback
            .lock()
            .ok()
            .filter(|info| info.load.is_some() && info.load == self.loaded)
            .map_or(0.0, |info| info.elapsed.as_secs_f64())
    }

    fn current_duration(&self) -> Option<f64> {
        self.playback
            .lock()
            .ok()
            .filter(|info| info.load.is_some() && info.load == self.loaded)
            .and_then(|info| info.duration)
            .map(|d| d.as_secs_f64())
    }

    fn subscribe(&mut self) -> Subscription {
        self.events.subscribe()
    }
}

impl Drop for AudioPlayer {
    fn drop(&mut self) {
        self.quit_softly(Duration::ZERO);
    }
}
