use std::env;
use std::time::Duration;

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{error, info, warn};

use crate::app::App;
use crate::audio::AudioPlayer;
use crate::logging;
use crate::session::PlaybackSession;

mod event_loop;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_warning) = settings::load_settings();
    if let Err(e) = logging::init(&settings.logging) {
        eprintln!("encore: could not open log file: {e}");
    }
    if let Some(msg) = config_warning {
        warn!("{msg}");
    }

    let slug = env::args().nth(1);
    let catalog = startup::load_catalog(&settings.catalog).inspect_err(|e| {
        error!(error = %e, "no catalog");
    })?;
    let album = startup::choose_album(&catalog, slug.as_deref()).inspect_err(|e| {
        error!(error = %e, "cannot open album");
    })?;

    let audio_player = AudioPlayer::new(settings.audio.clone());
    let session = PlaybackSession::initialize(
        album,
        audio_player,
        startup::session_options(&settings),
    )?;
    let mut app = App::new(session);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(&mut terminal, &settings, &mut app);

    // Fade out while the source is still loaded, then release it.
    app.session
        .primitive()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    app.session.teardown();
    info!("shutting down");

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}
