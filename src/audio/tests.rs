use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use super::thread::{AudioState, Ticker};
use super::types::{PlaybackHandle, PlaybackInfo};
use crate::error::MediaError;
use crate::media::{EventHub, LoadId, MediaEvent, MediaEventKind};

fn deviceless_state() -> (AudioState, PlaybackHandle, EventHub) {
    let info: PlaybackHandle = Arc::new(Mutex::new(PlaybackInfo::default()));
    let hub = EventHub::new();
    let state = AudioState::new(None, info.clone(), hub.clone());
    (state, info, hub)
}

#[test]
fn load_without_device_reports_failure_for_that_load() {
    let (mut state, info, hub) = deviceless_state();
    let sub = hub.subscribe();

    state.do_load(LoadId(3), PathBuf::from("/tmp/whatever.mp3"));

    let events: Vec<MediaEvent> = sub.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].load, LoadId(3));
    assert!(matches!(
        events[0].kind,
        MediaEventKind::Failed(MediaError::Device(_))
    ));

    let info = info.lock().unwrap();
    assert_eq!(info.load, Some(LoadId(3)));
    assert_eq!(info.duration, None);
}

#[test]
fn play_after_failed_load_fails_again() {
    let (mut state, info, hub) = deviceless_state();
    state.do_load(LoadId(1), PathBuf::from("/tmp/whatever.mp3"));
    let sub = hub.subscribe();

    state.do_play();

    let events: Vec<MediaEvent> = sub.try_iter().collect();
    assert_eq!(
        events,
        vec![MediaEvent {
            load: LoadId(1),
            kind: MediaEventKind::Failed(MediaError::NothingLoaded),
        }]
    );
    assert_eq!(info.lock().unwrap().elapsed, Duration::ZERO);
}

#[test]
fn volume_is_clamped_and_reported() {
    let (mut state, _info, hub) = deviceless_state();
    state.do_load(LoadId(2), PathBuf::from("/tmp/whatever.mp3"));
    let sub = hub.subscribe();

    state.do_set_volume(1.7);
    state.do_set_volume(0.25);

    let kinds: Vec<MediaEventKind> = sub.try_iter().map(|e| e.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MediaEventKind::VolumeChanged(1.0),
            MediaEventKind::VolumeChanged(0.25),
        ]
    );
}

#[test]
fn volume_before_any_load_is_not_reported() {
    let (mut state, _info, hub) = deviceless_state();
    let sub = hub.subscribe();
    state.do_set_volume(0.5);
    assert_eq!(sub.try_iter().count(), 0);
}

#[test]
fn tick_and_seek_without_sink_are_silent() {
    let (mut state, info, hub) = deviceless_state();
    let sub = hub.subscribe();

    state.tick();
    state.do_seek(Duration::from_secs(10));
    state.do_pause();

    assert_eq!(sub.try_iter().count(), 0);
    assert_eq!(info.lock().unwrap().elapsed, Duration::ZERO);
}

#[test]
fn play_after_end_starts_over_instead_of_ending_again() {
    let (mut state, info, hub) = deviceless_state();
    state.do_load(LoadId(4), PathBuf::from("/tmp/whatever.mp3"));
    let (drained, _queue) = rodio::Sink::new();
    state.attach_playing_sink(drained);
    let sub = hub.subscribe();

    state.tick();
    let kinds: Vec<MediaEventKind> = sub.try_iter().map(|e| e.kind).collect();
    assert!(matches!(kinds.last(), Some(MediaEventKind::Ended)));

    state.do_play();
    // No device to rebuild on, but the finished sink is gone and the
    // position is back at the start.
    let events: Vec<MediaEvent> = sub.try_iter().collect();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].load, LoadId(4));
    assert!(matches!(
        events[0].kind,
        MediaEventKind::Failed(MediaError::Device(_))
    ));
    assert_eq!(info.lock().unwrap().elapsed, Duration::ZERO);

    state.tick();
    assert_eq!(sub.try_iter().count(), 0);
}

#[test]
fn ticker_fires_on_schedule_regardless_of_commands() {
    let start = Instant::now();
    let interval = Duration::from_millis(250);
    let mut ticker = Ticker::new(interval, start);

    assert_eq!(ticker.wait(start), interval);
    // Commands arriving every 100ms: the tick still comes due at 250ms.
    assert!(!ticker.due(start + Duration::from_millis(100)));
    assert!(!ticker.due(start + Duration::from_millis(200)));
    assert_eq!(
        ticker.wait(start + Duration::from_millis(200)),
        Duration::from_millis(50)
    );
    assert!(ticker.due(start + Duration::from_millis(300)));
    assert!(!ticker.due(start + Duration::from_millis(400)));
    assert!(ticker.due(start + Duration::from_millis(550)));
    // Overdue: no waiting.
    assert_eq!(ticker.wait(start + Duration::from_secs(5)), Duration::ZERO);
}
