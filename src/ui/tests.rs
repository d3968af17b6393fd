use std::path::PathBuf;

use ratatui::{Terminal, backend::TestBackend, layout::Rect};

use super::format::seek_ratio;
use super::transport::{play_pause_label, slider_value};
use super::*;
use crate::app::App;
use crate::catalog::{Album, Track};
use crate::config::{ControlsSettings, UiSettings};
use crate::media::MediaEventKind;
use crate::media::testing::{StubHandle, StubPrimitive, stub};
use crate::session::{PlaybackSession, SessionOptions};

fn telephone() -> Album {
    let tracks = [
        ("Hello, Operator?", 180.0),
        ("Ring, Ring, Ring", 200.0),
        ("Fits in Your Pocket", 150.0),
    ];
    Album {
        slug: "the-telephone".into(),
        title: "The Telephone".into(),
        artist: "Guglielmo Marconi".into(),
        cover: None,
        release_info: "1909 EM Records".into(),
        tracks: tracks
            .iter()
            .enumerate()
            .map(|(i, (title, duration))| Track {
                title: (*title).into(),
                duration: *duration,
                source: PathBuf::from(format!("/music/{i}.mp3")),
            })
            .collect(),
    }
}

fn app() -> (App<StubPrimitive>, StubHandle) {
    let (prim, handle) = stub();
    let session =
        PlaybackSession::initialize(telephone(), prim, SessionOptions::default()).unwrap();
    (App::new(session), handle)
}

fn render(app: &App<StubPrimitive>) -> (String, TransportAreas) {
    let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
    let mut areas = TransportAreas::default();
    terminal
        .draw(|f| {
            areas = draw(f, app, &UiSettings::default(), &ControlsSettings::default());
        })
        .unwrap();
    let text = terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|c| c.symbol())
        .collect::<String>();
    (text, areas)
}

#[test]
fn format_time_pads_minutes_and_seconds() {
    assert_eq!(format_time(Some(65.0)), "01:05");
    assert_eq!(format_time(Some(5.0)), "00:05");
    assert_eq!(format_time(Some(0.0)), "00:00");
    assert_eq!(format_time(Some(161.71)), "02:41");
}

#[test]
fn format_time_rejects_unusable_input() {
    assert_eq!(format_time(None), "");
    assert_eq!(format_time(Some(f64::NAN)), "");
    assert_eq!(format_time(Some(f64::INFINITY)), "");
    assert_eq!(format_time(Some(-1.0)), "");
}

#[test]
fn format_time_minutes_wrap_at_an_hour() {
    assert_eq!(format_time(Some(3600.0 + 65.0)), "01:05");
}

#[test]
fn format_running_time_adds_hours_when_needed() {
    assert_eq!(format_running_time(544.0), "9:04");
    assert_eq!(format_running_time(3733.0), "1:02:13");
    assert_eq!(format_running_time(0.0), "-");
}

#[test]
fn seek_ratio_guards_against_bad_durations() {
    assert_eq!(seek_ratio(50.0, 200.0), 0.25);
    assert_eq!(seek_ratio(50.0, 0.0), 0.0);
    assert_eq!(seek_ratio(50.0, -3.0), 0.0);
    assert_eq!(seek_ratio(50.0, f64::NAN), 0.0);
    assert_eq!(seek_ratio(500.0, 200.0), 1.0);
}

#[test]
fn slider_value_spans_the_area() {
    let area = Rect::new(10, 3, 11, 1);
    assert_eq!(slider_value(area, 10), 0.0);
    assert_eq!(slider_value(area, 15), 0.5);
    assert_eq!(slider_value(area, 20), 1.0);
    // Outside columns clamp to the edges.
    assert_eq!(slider_value(area, 2), 0.0);
    assert_eq!(slider_value(area, 40), 1.0);
    assert_eq!(slider_value(Rect::new(0, 0, 1, 1), 0), 0.0);
}

#[test]
fn hit_maps_clicks_to_intents() {
    let areas = TransportAreas {
        seek: Rect::new(10, 20, 11, 1),
        volume: Rect::new(10, 21, 11, 1),
        tracks: Rect::new(1, 5, 40, 4),
        first_row: 2,
        track_count: 5,
    };
    assert_eq!(areas.hit(15, 20), Some(Intent::Seek(0.5)));
    assert_eq!(areas.hit(20, 21), Some(Intent::SetVolume(1.0)));
    assert_eq!(areas.hit(3, 5), Some(Intent::ActivateTrack(2)));
    assert_eq!(areas.hit(3, 7), Some(Intent::ActivateTrack(4)));
    // Row past the last track.
    assert_eq!(areas.hit(3, 8), None);
    assert_eq!(areas.hit(0, 0), None);
}

#[test]
fn play_pause_intent_toggles_transport() {
    let (mut app, _handle) = app();
    app.dispatch(Intent::PlayPause).unwrap();
    assert!(app.session.is_playing());
    assert_eq!(play_pause_label(&app.session.snapshot()), "⏸");
    app.dispatch(Intent::PlayPause).unwrap();
    assert!(!app.session.is_playing());
    assert_eq!(play_pause_label(&app.session.snapshot()), "▶");
}

#[test]
fn each_intent_reaches_its_operation() {
    let (mut app, _handle) = app();

    app.dispatch(Intent::Next).unwrap();
    assert_eq!(app.session.current_index(), 1);
    app.dispatch(Intent::Previous).unwrap();
    assert_eq!(app.session.current_index(), 0);
    app.dispatch(Intent::Seek(0.5)).unwrap();
    assert_eq!(app.session.elapsed(), 90.0);
    app.dispatch(Intent::SetVolume(0.25)).unwrap();
    assert_eq!(app.session.volume(), 0.25);
    app.dispatch(Intent::ActivateTrack(2)).unwrap();
    assert_eq!(app.session.current_index(), 2);
    assert!(app.session.is_playing());
}

#[test]
fn track_marker_shows_state_on_current_row() {
    let (mut app, _handle) = app();
    let snap = app.session.snapshot();
    assert_eq!(track_marker(&snap, 0), " ⏸");
    assert_eq!(track_marker(&snap, 1), " 2");
    assert_eq!(track_marker(&snap, 2), " 3");

    app.session.play().unwrap();
    assert_eq!(track_marker(&app.session.snapshot(), 0), " ▶");
}

#[test]
fn visible_window_centers_selection() {
    assert_eq!(visible_window(3, 10, 2), (0, 3));
    assert_eq!(visible_window(20, 5, 0), (0, 5));
    assert_eq!(visible_window(20, 5, 10), (8, 13));
    assert_eq!(visible_window(20, 5, 19), (15, 20));
}

#[test]
fn controls_text_uses_configured_steps() {
    let controls = ControlsSettings {
        scrub_seconds: 10,
        volume_step: 0.1,
    };
    let text = controls_text(&controls);
    assert!(text.contains("[H/L] scrub -/+10s"));
    assert!(text.contains("[-/+] volume -/+10%"));
    assert!(text.starts_with("[j/k] up/down"));
}

#[test]
fn draw_renders_album_tracks_and_times() {
    let (mut app, handle) = app();
    handle.emit(MediaEventKind::PositionChanged(65.0));
    app.session.pump_events();

    let (text, areas) = render(&app);
    assert!(text.contains("The Telephone"));
    assert!(text.contains("Guglielmo Marconi"));
    assert!(text.contains("1909 EM Records"));
    assert!(text.contains("Ring, Ring, Ring"));
    assert!(text.contains("01:05"));
    assert!(text.contains("03:00"));
    assert!(text.contains("80%"));
    assert_eq!(areas.track_count, 3);
    assert_eq!(areas.first_row, 0);
    assert!(areas.seek.width > 0);
    assert!(areas.volume.width > 0);
}

#[test]
fn drawn_areas_accept_clicks() {
    let (app, _handle) = app();
    let (_, areas) = render(&app);

    let right = areas.seek.x + areas.seek.width - 1;
    assert_eq!(areas.hit(right, areas.seek.y), Some(Intent::Seek(1.0)));
    assert_eq!(
        areas.hit(areas.tracks.x, areas.tracks.y + 1),
        Some(Intent::ActivateTrack(1))
    );
}

#[test]
fn draw_shows_details_popup() {
    let (mut app, _handle) = app();
    app.selected = 1;
    app.toggle_metadata_window();

    let (text, _) = render(&app);
    assert!(text.contains("details (K closes)"));
    assert!(text.contains("/music/1.mp3"));
}
