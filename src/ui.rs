//! UI rendering helpers for the terminal user interface.
//!
//! Rendering is a pure function of the session snapshot and the cursor; all
//! changes go back through `Intent`s.

mod format;
mod transport;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::config::{ControlsSettings, UiSettings};
use crate::media::MediaPrimitive;
use crate::session::{SessionSnapshot, TransportState};

use format::{format_running_time, format_time};
pub use transport::{Intent, TransportAreas};

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("enter", "play selected");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next");
    // H/L and -/+ are filled from config.
    map.insert("0-9", "seek to n×10%");
    map.insert("K", "details");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    let order = [
        "j/k", "enter", "space/p", "h/l", "H/L", "0-9", "-/+", "K", "q",
    ];
    order
        .iter()
        .filter_map(|k| match *k {
            "H/L" => Some(format!("[H/L] scrub -/+{}s", controls.scrub_seconds)),
            "-/+" => Some(format!(
                "[-/+] volume -/+{}%",
                (controls.volume_step * 100.0).round() as u32
            )),
            _ => CONTROLS_MAP.get(k).map(|v| format!("[{k}] {v}")),
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Leading cell of a track row: a state marker on the current track, the
/// 1-based number elsewhere.
fn track_marker(snapshot: &SessionSnapshot, index: usize) -> String {
    if index != snapshot.current {
        return format!("{:>2}", index + 1);
    }
    match snapshot.transport {
        TransportState::LoadFailed => " ✗".to_string(),
        _ => format!(" {}", if snapshot.is_playing { "▶" } else { "⏸" }),
    }
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Visible slice `[start, end)` of a list of `total` rows that keeps
/// `selected` centered when it can.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn album_info(snapshot: &SessionSnapshot) -> Vec<Line<'static>> {
    let album = snapshot.album;
    let mut lines = vec![
        Line::from(Span::styled(
            album.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(album.artist.clone()),
    ];

    let mut details: Vec<String> = Vec::new();
    if !album.release_info.trim().is_empty() {
        details.push(album.release_info.clone());
    }
    details.push(format!(
        "{} tracks, {}",
        album.len(),
        format_running_time(album.total_duration())
    ));
    if let Some(cover) = &album.cover {
        details.push(format!("cover: {}", cover.display()));
    }
    lines.push(Line::from(details.join(" • ")));
    lines
}

/// Render the entire UI into `frame`. Returns the clickable areas for mouse
/// handling on the next input event.
pub fn draw<P: MediaPrimitive>(
    frame: &mut Frame,
    app: &App<P>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) -> TransportAreas {
    let snapshot = app.session.snapshot();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" encore ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let info = Paragraph::new(album_info(&snapshot))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" album "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(info, chunks[1]);

    // Track list
    let list_block = Block::default().borders(Borders::ALL).title(" tracks ");
    let list_inner = list_block.inner(chunks[2]);
    let tracks = &snapshot.album.tracks;
    let (start, end) = visible_window(tracks.len(), list_inner.height as usize, app.selected);
    {
        let items: Vec<ListItem> = (start..end)
            .map(|i| {
                let track = &tracks[i];
                let duration = if i == snapshot.current {
                    snapshot.duration
                } else {
                    track.duration
                };
                let style = if i == snapshot.current {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{}  ", track_marker(&snapshot, i))),
                    Span::styled(track.title.clone(), style),
                    Span::raw(format!("  {}", format_time(Some(duration)))),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(list_block)
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        if end > start {
            state.select(Some(app.selected.saturating_sub(start)));
        }
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    // Details popup over the list.
    if app.metadata_window {
        let popup_area = centered_rect_sized(72, 8, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let track = &tracks[app.selected.min(tracks.len() - 1)];
        let meta = format!(
            "Title: {}\nAlbum: {}\nArtist: {}\nDuration: {}\nSource: {}",
            track.title,
            snapshot.album.title,
            snapshot.album.artist,
            format_time(Some(track.duration)),
            track.source.display()
        );
        let meta_paragraph = Paragraph::new(meta)
            .block(
                Block::default()
                    .padding(Padding {
                        left: 1,
                        right: 0,
                        top: 0,
                        bottom: 0,
                    })
                    .borders(Borders::ALL)
                    .title(" details (K closes) "),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(meta_paragraph, popup_area);
    }

    let (seek, volume) = transport::render(frame, chunks[3], &snapshot);

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);

    TransportAreas {
        seek,
        volume,
        tracks: list_inner,
        first_row: start,
        track_count: tracks.len(),
    }
}

#[cfg(test)]
mod tests;
