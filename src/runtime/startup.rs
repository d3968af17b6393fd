use std::env;
use std::path::PathBuf;

use tracing::info;

use crate::catalog::{self, Album, Catalog};
use crate::config::{self, CatalogSettings};
use crate::error::CatalogError;
use crate::session::SessionOptions;

/// Build the catalog: the configured TOML file when set, otherwise a scan of
/// `music_dir` (default: the current directory).
pub fn load_catalog(settings: &CatalogSettings) -> Result<Catalog, CatalogError> {
    let (catalog, origin) = match &settings.file {
        Some(file) => (Catalog::load(file)?, file.clone()),
        None => {
            let dir = settings
                .music_dir
                .clone()
                .or_else(|| env::current_dir().ok())
                .unwrap_or_else(|| PathBuf::from("."));
            (catalog::scan(&dir, settings)?, dir)
        }
    };

    if catalog.is_empty() {
        return Err(CatalogError::Empty(origin.display().to_string()));
    }
    info!(
        albums = catalog.albums().len(),
        origin = %origin.display(),
        "catalog ready"
    );
    Ok(catalog)
}

/// The album to open: the one named by `slug`, or the first one.
pub fn choose_album(catalog: &Catalog, slug: Option<&str>) -> Result<Album, CatalogError> {
    match slug {
        Some(slug) => catalog::find_album_by_slug(catalog, slug).cloned(),
        None => catalog
            .first()
            .cloned()
            .ok_or_else(|| CatalogError::Empty("catalog".to_string())),
    }
}

pub fn session_options(settings: &config::Settings) -> SessionOptions {
    SessionOptions {
        volume: settings.audio.default_volume,
        auto_advance: settings.playback.auto_advance,
    }
}
