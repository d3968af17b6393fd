use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{debug, warn};

use crate::app::{Action, App, action_for_key, action_for_mouse};
use crate::config;
use crate::media::MediaPrimitive;
use crate::ui;

const INPUT_POLL: Duration = Duration::from_millis(50);

/// Main terminal event loop: drains primitive events into the session,
/// redraws, and turns input into session operations. Returns `Ok(())` when
/// the user quits.
pub fn run<P: MediaPrimitive>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    settings: &config::Settings,
    app: &mut App<P>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.session.pump_events();
        app.follow_playback();

        let mut areas = app.areas;
        terminal.draw(|f| areas = ui::draw(f, app, &settings.ui, &settings.controls))?;
        app.areas = areas;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        let action = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                action_for_key(key, app, &settings.controls)
            }
            Event::Mouse(mouse) => action_for_mouse(mouse, &app.areas),
            _ => None,
        };
        let Some(action) = action else {
            continue;
        };

        if handle_action(action, app) {
            return Ok(());
        }
    }
}

/// Apply `action`; returns true when the loop should stop.
fn handle_action<P: MediaPrimitive>(action: Action, app: &mut App<P>) -> bool {
    match action {
        Action::Quit => return true,
        Action::CursorDown => app.next(),
        Action::CursorUp => app.prev(),
        Action::ToggleDetails => app.toggle_metadata_window(),
        Action::Transport(intent) => {
            debug!(?intent, "transport intent");
            if let Err(e) = app.dispatch(intent) {
                warn!(?intent, error = %e, "intent rejected");
            }
        }
    }
    false
}
