//! Tracing setup. The terminal belongs to the UI, so log output only goes to
//! a file and is dropped when none is configured.

use std::fs::OpenOptions;
use std::io;
use std::sync::Mutex;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LoggingSettings;

/// Install the global subscriber. `RUST_LOG` takes precedence over
/// `logging.level`.
pub fn init(settings: &LoggingSettings) -> io::Result<()> {
    let Some(path) = settings.file.as_ref() else {
        return Ok(());
    };

    let (filter, bad_level) = match EnvFilter::try_from_default_env() {
        Ok(f) => (f, None),
        Err(_) => match EnvFilter::try_new(&settings.level) {
            Ok(f) => (f, None),
            Err(e) => (EnvFilter::new("info"), Some(e.to_string())),
        },
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    if tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .is_err()
    {
        // Already installed (tests, embedding); keep the existing one.
        return Ok(());
    }

    if let Some(e) = bad_level {
        warn!(level = %settings.level, error = %e, "invalid log level, using info");
    }
    Ok(())
}
