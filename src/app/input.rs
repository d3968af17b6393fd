use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::config::ControlsSettings;
use crate::media::MediaPrimitive;
use crate::ui::{Intent, TransportAreas};

use super::model::App;

/// What a single input event asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Quit,
    CursorDown,
    CursorUp,
    ToggleDetails,
    Transport(Intent),
}

pub fn action_for_key<P: MediaPrimitive>(
    key: KeyEvent,
    app: &App<P>,
    controls: &ControlsSettings,
) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::CursorDown),
            KeyCode::Char('p') => Some(Action::CursorUp),
            _ => None,
        };
    }

    let scrub = controls.scrub_seconds as f64;
    let action = match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Char('K') => Action::ToggleDetails,
        KeyCode::Enter => Action::Transport(Intent::ActivateTrack(app.selected)),
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::Transport(Intent::PlayPause),
        KeyCode::Char('h') => Action::Transport(Intent::Previous),
        KeyCode::Char('l') => Action::Transport(Intent::Next),
        KeyCode::Char('H') | KeyCode::Left => Action::Transport(app.scrub_intent(-scrub)?),
        KeyCode::Char('L') | KeyCode::Right => Action::Transport(app.scrub_intent(scrub)?),
        KeyCode::Char(c @ '0'..='9') => {
            let tenths = c.to_digit(10).unwrap_or(0);
            Action::Transport(Intent::Seek(f64::from(tenths) / 10.0))
        }
        KeyCode::Char('-') => Action::Transport(app.volume_intent(-controls.volume_step)),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Action::Transport(app.volume_intent(controls.volume_step))
        }
        _ => return None,
    };
    Some(action)
}

/// Left press or drag on a slider or track row.
pub fn action_for_mouse(event: MouseEvent, areas: &TransportAreas) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => areas
            .hit(event.column, event.row)
            .map(Action::Transport),
        // Dragging only moves sliders; rows are activated by the press.
        MouseEventKind::Drag(MouseButton::Left) => match areas.hit(event.column, event.row) {
            Some(Intent::ActivateTrack(_)) | None => None,
            Some(intent) => Some(Action::Transport(intent)),
        },
        _ => None,
    }
}
