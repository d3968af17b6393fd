//! In-memory primitive for exercising the session without an audio device.

use std::cell::RefCell;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::MediaError;

use super::{EventHub, LoadId, MediaEvent, MediaEventKind, MediaPrimitive, Subscription};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cmd {
    Load(PathBuf),
    Unload,
    Play,
    Pause,
    Seek(f64),
    Volume(f32),
}

#[derive(Default)]
pub(crate) struct StubLog {
    pub(crate) commands: Vec<Cmd>,
    pub(crate) loaded: Option<LoadId>,
    pub(crate) fail_load: HashSet<PathBuf>,
    pub(crate) fail_play: bool,
}

/// Records every command and lets the test publish events as the backend.
pub(crate) struct StubPrimitive {
    log: Rc<RefCell<StubLog>>,
    hub: EventHub,
    next_load: u64,
}

#[derive(Clone)]
pub(crate) struct StubHandle {
    pub(crate) log: Rc<RefCell<StubLog>>,
    pub(crate) hub: EventHub,
}

impl StubHandle {
    /// Emit `kind` for whatever is loaded right now.
    pub(crate) fn emit(&self, kind: MediaEventKind) -> usize {
        let load = self.log.borrow().loaded.unwrap_or(LoadId(0));
        self.hub.emit(MediaEvent { load, kind })
    }

    pub(crate) fn emit_for(&self, load: LoadId, kind: MediaEventKind) -> usize {
        self.hub.emit(MediaEvent { load, kind })
    }

    pub(crate) fn loaded(&self) -> Option<LoadId> {
        self.log.borrow().loaded
    }

    pub(crate) fn commands(&self) -> Vec<Cmd> {
        self.log.borrow().commands.clone()
    }

    pub(crate) fn clear(&self) {
        self.log.borrow_mut().commands.clear();
    }
}

pub(crate) fn stub() -> (StubPrimitive, StubHandle) {
    let log = Rc::new(RefCell::new(StubLog::default()));
    let hub = EventHub::new();
    (
        StubPrimitive {
            log: log.clone(),
            hub: hub.clone(),
            next_load: 0,
        },
        StubHandle { log, hub },
    )
}

impl MediaPrimitive for StubPrimitive {
    fn load(&mut self, source: &Path) -> Result<LoadId, MediaError> {
        let mut log = self.log.borrow_mut();
        log.commands.push(Cmd::Load(source.to_path_buf()));
        if log.fail_load.contains(source) {
            log.loaded = None;
            return Err(MediaError::SourceUnavailable(source.display().to_string()));
        }
        self.next_load += 1;
        let id = LoadId(self.next_load);
        log.loaded = Some(id);
        Ok(id)
    }

    fn unload(&mut self) {
        let mut log = self.log.borrow_mut();
        log.commands.push(Cmd::Unload);
        log.loaded = None;
    }

    fn play(&mut self) -> Result<(), MediaError> {
        let mut log = self.log.borrow_mut();
        log.commands.push(Cmd::Play);
        if log.fail_play {
            return Err(MediaError::Device("busy".to_string()));
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.log.borrow_mut().commands.push(Cmd::Pause);
    }

    fn set_position(&mut self, seconds: f64) {
        self.log.borrow_mut().commands.push(Cmd::Seek(seconds));
    }

    fn set_volume(&mut self, level: f32) {
        self.log.borrow_mut().commands.push(Cmd::Volume(level));
    }

    fn current_position(&self) -> f64 {
        0.0
    }

    fn current_duration(&self) -> Option<f64> {
        None
    }

    fn subscribe(&mut self) -> Subscription {
        self.hub.subscribe()
    }
}

