use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, LineGauge, Padding, Paragraph},
};

use crate::error::SessionError;
use crate::media::MediaPrimitive;
use crate::session::{PlaybackSession, SessionSnapshot, TransportState};

use super::format::{format_time, seek_ratio};

/// A user gesture on the transport. Each one maps to exactly one session
/// operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    Previous,
    PlayPause,
    Next,
    /// Seek slider value in `[0, 1]`.
    Seek(f64),
    /// Volume slider value in `[0, 1]`.
    SetVolume(f32),
    /// A track row was activated.
    ActivateTrack(usize),
}

impl Intent {
    pub fn apply<P: MediaPrimitive>(
        self,
        session: &mut PlaybackSession<P>,
    ) -> Result<(), SessionError> {
        match self {
            Intent::Previous => session.skip_to_previous(),
            Intent::PlayPause => {
                if session.is_playing() {
                    session.pause()
                } else {
                    session.play()
                }
            }
            Intent::Next => session.skip_to_next(),
            Intent::Seek(value) => session.seek(value),
            Intent::SetVolume(level) => session.set_volume(level),
            Intent::ActivateTrack(index) => session.handle_track_activate(index),
        }
    }
}

/// Where the last frame put its clickable parts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportAreas {
    pub seek: Rect,
    pub volume: Rect,
    /// Inner area of the track list.
    pub tracks: Rect,
    /// Album index of the first visible track row.
    pub first_row: usize,
    pub track_count: usize,
}

impl TransportAreas {
    /// Map a mouse press or drag at (`column`, `row`) to an intent.
    pub fn hit(&self, column: u16, row: u16) -> Option<Intent> {
        let pos = Position::new(column, row);
        if self.seek.contains(pos) {
            return Some(Intent::Seek(slider_value(self.seek, column)));
        }
        if self.volume.contains(pos) {
            return Some(Intent::SetVolume(slider_value(self.volume, column) as f32));
        }
        if self.tracks.contains(pos) {
            let index = self.first_row + usize::from(row - self.tracks.y);
            if index < self.track_count {
                return Some(Intent::ActivateTrack(index));
            }
        }
        None
    }
}

/// Slider value for a click at `column` inside `area`: left edge 0, right
/// edge 1.
pub fn slider_value(area: Rect, column: u16) -> f64 {
    if area.width <= 1 {
        return 0.0;
    }
    let offset = column.saturating_sub(area.x).min(area.width - 1);
    f64::from(offset) / f64::from(area.width - 1)
}

/// Label of the play/pause button: the action it would perform.
pub fn play_pause_label(snapshot: &SessionSnapshot) -> &'static str {
    if snapshot.is_playing { "⏸" } else { "▶" }
}

fn status_text(snapshot: &SessionSnapshot) -> &'static str {
    match snapshot.transport {
        TransportState::Playing => "playing",
        TransportState::Paused => "paused",
        TransportState::LoadFailed => "unavailable",
        TransportState::Closed => "closed",
    }
}

/// Render the transport box and return the seek and volume slider areas.
pub(super) fn render(frame: &mut Frame, area: Rect, snapshot: &SessionSnapshot) -> (Rect, Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" transport ")
        .padding(Padding {
            left: 1,
            right: 1,
            top: 0,
            bottom: 0,
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    let track = snapshot.current_track();
    let buttons = Line::from(vec![
        Span::styled(
            format!("⏮  {}  ⏭", play_pause_label(snapshot)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "   {}. {} • {}",
            snapshot.current + 1,
            track.title,
            status_text(snapshot)
        )),
    ]);
    frame.render_widget(Paragraph::new(buttons), rows[0]);

    let seek_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(7),
        ])
        .split(rows[1]);
    frame.render_widget(
        Paragraph::new(format_time(Some(snapshot.elapsed))),
        seek_row[0],
    );
    let seek = LineGauge::default()
        .filled_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(seek_ratio(snapshot.elapsed, snapshot.duration))
        .label("");
    frame.render_widget(seek, seek_row[1]);
    frame.render_widget(
        Paragraph::new(format!(" {}", format_time(Some(snapshot.duration)))),
        seek_row[2],
    );

    let volume_row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(7),
            Constraint::Min(1),
            Constraint::Length(7),
        ])
        .split(rows[2]);
    frame.render_widget(Paragraph::new("vol"), volume_row[0]);
    let level = f64::from(snapshot.volume.clamp(0.0, 1.0));
    let volume = LineGauge::default()
        .filled_style(Style::default().add_modifier(Modifier::BOLD))
        .ratio(level)
        .label("");
    frame.render_widget(volume, volume_row[1]);
    frame.render_widget(
        Paragraph::new(format!(" {:>3}%", (level * 100.0).round() as u32)),
        volume_row[2],
    );

    (seek_row[1], volume_row[1])
}
